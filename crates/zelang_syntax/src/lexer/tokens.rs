//! Token types for the zelang lexer.
//!
//! The lexer uses **registry-backed IDs** for language vocabulary:
//! - `Keyword(KeywordId)` for reserved words
//! - `Operator(OperatorId)` for operators
//! - `Punctuation(PunctuationId)` for delimiters and separators
//!
//! ## Notes
//! - Kinds carry no payload; the source text of every token lives in [`Token::literal`].
//! - Use `crate::token_helpers` for ergonomic token matching at call sites.

use std::fmt;

use crate::ast::Span;
use zelang_core::lang::keywords::{self, KeywordId};
use zelang_core::lang::operators::{self, OperatorId};
use zelang_core::lang::punctuation::{self, PunctuationId};

/// Kind of token produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // ========== Keyword / operator / punctuation (ID-based) ==========
    Keyword(KeywordId),
    Operator(OperatorId),
    Punctuation(PunctuationId),

    // ========== Identifiers and Literals ==========
    Ident,
    Int,
    Float,
    String,

    // ========== Special ==========
    /// Unrecognized input (a lone `&`, `|`, `.`, or any other character).
    Invalid,
    Eof,
}

impl fmt::Display for TokenKind {
    /// Human-readable description used in diagnostics.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Keyword(id) => write!(f, "'{}'", keywords::as_str(*id)),
            TokenKind::Operator(id) => write!(f, "'{}'", operators::as_str(*id)),
            TokenKind::Punctuation(id) => write!(f, "'{}'", punctuation::as_str(*id)),
            TokenKind::Ident => f.write_str("identifier"),
            TokenKind::Int => f.write_str("integer literal"),
            TokenKind::Float => f.write_str("float literal"),
            TokenKind::String => f.write_str("string literal"),
            TokenKind::Invalid => f.write_str("invalid token"),
            TokenKind::Eof => f.write_str("end of input"),
        }
    }
}

/// A token with its kind, text and position.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Source text. For strings this excludes the delimiting quotes.
    pub literal: String,
    /// 1-based line of the first character.
    pub line: usize,
    /// 1-based column of the first character.
    pub column: usize,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<String>, line: usize, column: usize, span: Span) -> Self {
        Self {
            kind,
            literal: literal.into(),
            line,
            column,
            span,
        }
    }
}

/// Resolve an identifier spelling to a keyword id, if reserved.
pub fn keyword_id(name: &str) -> Option<KeywordId> {
    keywords::from_str(name)
}
