//! Lexer for the zelang language
//!
//! Handles tokenization including:
//! - Keywords and identifiers (case-sensitive registry lookup)
//! - Integer, float and string literals
//! - One- and two-character operators, punctuation
//! - `//` line comments and non-nesting `/* */` block comments
//!
//! The lexer never fails. Anything it cannot classify becomes a [`TokenKind::Invalid`] token and
//! the parser decides what to do with it.
//!
//! ## Module Structure
//!
//! - `tokens` - Token types (TokenKind, Token)

pub mod tokens;

pub use tokens::{Token, TokenKind, keyword_id};

use crate::ast::Span;
use zelang_core::lang::operators::OperatorId;
use zelang_core::lang::punctuation::PunctuationId;

/// Lexer for zelang source code.
///
/// Pull-based: each [`Lexer::next_token`] call scans one token. After end of input every call
/// returns an `Eof` token positioned at the end of the source.
pub struct Lexer<'a> {
    source: &'a str,
    /// Byte offset of the next unread character.
    pos: usize,
    /// Line of the next unread character (1-based).
    line: usize,
    /// Column of the next unread character (1-based, counted in characters).
    column: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    /// Return the next token, advancing past it.
    pub fn next_token(&mut self) -> Token {
        self.skip_trivia();

        let start = self.pos;
        let (line, column) = (self.line, self.column);

        let Some(c) = self.advance() else {
            return Token::new(TokenKind::Eof, "", line, column, Span::new(start, start));
        };

        let kind = match c {
            '"' => return self.string(start, line, column),
            c if c.is_ascii_digit() => return self.number(start, line, column),
            c if is_ident_start(c) => return self.identifier(start, line, column),

            '=' => self.one_or_two('=', OperatorId::EqEq, OperatorId::Assign),
            '!' => self.one_or_two('=', OperatorId::NotEq, OperatorId::Bang),
            '<' => self.one_or_two('=', OperatorId::LtEq, OperatorId::Lt),
            '>' => self.one_or_two('=', OperatorId::GtEq, OperatorId::Gt),
            '&' => self.pair_or_invalid('&', OperatorId::AndAnd),
            '|' => self.pair_or_invalid('|', OperatorId::OrOr),
            '+' => TokenKind::Operator(OperatorId::Plus),
            '-' => TokenKind::Operator(OperatorId::Minus),
            '*' => TokenKind::Operator(OperatorId::Star),
            '/' => TokenKind::Operator(OperatorId::Slash),

            '@' => TokenKind::Punctuation(PunctuationId::At),
            ',' => TokenKind::Punctuation(PunctuationId::Comma),
            ';' => TokenKind::Punctuation(PunctuationId::Semicolon),
            ':' => TokenKind::Punctuation(PunctuationId::Colon),
            '(' => TokenKind::Punctuation(PunctuationId::LParen),
            ')' => TokenKind::Punctuation(PunctuationId::RParen),
            '{' => TokenKind::Punctuation(PunctuationId::LBrace),
            '}' => TokenKind::Punctuation(PunctuationId::RBrace),
            '[' => TokenKind::Punctuation(PunctuationId::LBracket),
            ']' => TokenKind::Punctuation(PunctuationId::RBracket),

            _ => TokenKind::Invalid,
        };

        self.token_from(kind, start, line, column)
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    fn peek_next(&self) -> Option<char> {
        let mut iter = self.source[self.pos..].chars();
        iter.next();
        iter.next()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn token_from(&self, kind: TokenKind, start: usize, line: usize, column: usize) -> Token {
        Token::new(
            kind,
            &self.source[start..self.pos],
            line,
            column,
            Span::new(start, self.pos),
        )
    }

    // ========================================================================
    // Trivia
    // ========================================================================

    fn skip_trivia(&mut self) {
        loop {
            match (self.peek(), self.peek_next()) {
                (Some(' ' | '\t' | '\r' | '\n'), _) => {
                    self.advance();
                }
                (Some('/'), Some('/')) => {
                    while self.peek().is_some_and(|c| c != '\n') {
                        self.advance();
                    }
                }
                (Some('/'), Some('*')) => {
                    self.advance();
                    self.advance();
                    // Runs to the first `*/`; an unclosed comment swallows the rest of the file.
                    while let Some(c) = self.advance() {
                        if c == '*' && self.match_char('/') {
                            break;
                        }
                    }
                }
                _ => return,
            }
        }
    }

    // ========================================================================
    // Operators
    // ========================================================================

    fn one_or_two(&mut self, second: char, two: OperatorId, one: OperatorId) -> TokenKind {
        if self.match_char(second) {
            TokenKind::Operator(two)
        } else {
            TokenKind::Operator(one)
        }
    }

    fn pair_or_invalid(&mut self, second: char, pair: OperatorId) -> TokenKind {
        if self.match_char(second) {
            TokenKind::Operator(pair)
        } else {
            TokenKind::Invalid
        }
    }

    // ========================================================================
    // Literals and identifiers
    // ========================================================================

    /// Scan a string literal; the opening quote is already consumed.
    ///
    /// `\"` does not terminate the string and stays in the literal text verbatim. An
    /// unterminated string consumes to end of input.
    fn string(&mut self, start: usize, line: usize, column: usize) -> Token {
        let content_start = self.pos;
        let mut content_end = self.source.len();
        while let Some(c) = self.peek() {
            match c {
                '"' => {
                    content_end = self.pos;
                    self.advance();
                    break;
                }
                '\\' => {
                    self.advance();
                    self.match_char('"');
                }
                _ => {
                    self.advance();
                }
            }
        }
        Token::new(
            TokenKind::String,
            &self.source[content_start..content_end],
            line,
            column,
            Span::new(start, self.pos),
        )
    }

    /// Scan an integer or float; the first digit is already consumed.
    fn number(&mut self, start: usize, line: usize, column: usize) -> Token {
        self.digits();
        let is_float = self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit());
        if is_float {
            self.advance();
            self.digits();
        }
        let kind = if is_float { TokenKind::Float } else { TokenKind::Int };
        self.token_from(kind, start, line, column)
    }

    fn digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
    }

    fn identifier(&mut self, start: usize, line: usize, column: usize) -> Token {
        while self.peek().is_some_and(is_ident_continue) {
            self.advance();
        }
        let kind = match keyword_id(&self.source[start..self.pos]) {
            Some(id) => TokenKind::Keyword(id),
            None => TokenKind::Ident,
        };
        self.token_from(kind, start, line, column)
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Tokenize an entire source string.
///
/// The returned vector always ends with exactly one `Eof` token.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex(source: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token();
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            break;
        }
    }
    tracing::debug!(token_count = tokens.len(), "lexed");
    tokens
}
