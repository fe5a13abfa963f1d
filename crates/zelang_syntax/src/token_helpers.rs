//! Small helper APIs for working with `Token` / `TokenKind`.
//!
//! These helpers exist to reduce repetitive `matches!(...)` at call sites and to make it easy
//! to work with ID-based tokens.

use crate::lexer::{Token, TokenKind};
use zelang_core::lang::keywords::{self, KeywordId};
use zelang_core::lang::punctuation::PunctuationId;

impl TokenKind {
    /// Return the keyword id, if this is a keyword token.
    pub fn keyword_id(&self) -> Option<KeywordId> {
        match self {
            TokenKind::Keyword(id) => Some(*id),
            _ => None,
        }
    }

    /// Return `true` if this is the given keyword.
    pub fn is_keyword(&self, id: KeywordId) -> bool {
        matches!(self, TokenKind::Keyword(k) if *k == id)
    }

    /// Return `true` if this is the given punctuation.
    pub fn is_punctuation(&self, id: PunctuationId) -> bool {
        matches!(self, TokenKind::Punctuation(p) if *p == id)
    }

    /// Return `true` for `{` and `}`.
    pub fn is_brace(&self) -> bool {
        self.is_punctuation(PunctuationId::LBrace) || self.is_punctuation(PunctuationId::RBrace)
    }

    /// Return `true` for tokens usable as a bare decorator/component argument.
    pub fn is_argument(&self) -> bool {
        matches!(
            self,
            TokenKind::String | TokenKind::Int | TokenKind::Float | TokenKind::Ident
        )
    }

    /// Return `true` for tokens that can name a field type: a primitive type keyword or any
    /// identifier.
    pub fn is_field_type(&self) -> bool {
        match self {
            TokenKind::Ident => true,
            TokenKind::Keyword(id) => keywords::is_field_type(*id),
            _ => false,
        }
    }

    /// Return `true` for tokens that start a function declaration (`void` or a primitive type).
    pub fn starts_function(&self) -> bool {
        matches!(self, TokenKind::Keyword(id) if *id == KeywordId::Void || keywords::is_field_type(*id))
    }
}

impl Token {
    /// Convenience wrapper for `self.kind.keyword_id()`.
    pub fn keyword_id(&self) -> Option<KeywordId> {
        self.kind.keyword_id()
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}
