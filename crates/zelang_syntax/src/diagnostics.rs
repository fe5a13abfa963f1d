//! Diagnostics for the zelang front end.
//!
//! Every parse problem becomes a [`CompileError`]. Its `Display` form is the stable
//! `Line L:C: message` string drivers and tests match on; its [`miette::Diagnostic`] impl carries a
//! labelled source span so a CLI can render the offending line.

use miette::SourceSpan;

use crate::ast::Span;
use crate::lexer::Token;

/// A compile-time error with location information.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
#[error("Line {line}:{column}: {message}")]
#[diagnostic(code(zelang::syntax))]
pub struct CompileError {
    pub message: String,
    /// 1-based line of the offending token.
    pub line: usize,
    /// 1-based column of the offending token.
    pub column: usize,
    #[label("here")]
    pub label: SourceSpan,
}

impl CompileError {
    pub fn new(message: impl Into<String>, line: usize, column: usize, span: Span) -> Self {
        Self {
            message: message.into(),
            line,
            column,
            label: SourceSpan::from((span.start, span.len())),
        }
    }

    /// Build a syntax error positioned at `token`.
    pub fn syntax(message: impl Into<String>, token: &Token) -> Self {
        Self::new(message, token.line, token.column, token.span)
    }

    /// Byte span of the offending token.
    pub fn span(&self) -> Span {
        Span::new(self.label.offset(), self.label.offset() + self.label.len())
    }
}

/// Render diagnostics as their `Line L:C: message` strings, in order.
pub fn messages(errors: &[CompileError]) -> Vec<String> {
    errors.iter().map(ToString::to_string).collect()
}
