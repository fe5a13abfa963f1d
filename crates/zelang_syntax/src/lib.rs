//! Syntax frontend for zelang: lexer, parser, AST, diagnostics.
//!
//! ## Notes
//! - This crate is "syntax-only". It does no name resolution, type checking or code generation.
//! - Vocabulary identity (keywords/operators/punctuation/decorators) comes from `zelang_core::lang`
//!   registries.
//!
//! ## Examples
//! ```rust
//! use zelang_syntax::{lexer, parser};
//!
//! let tokens = lexer::lex("struct Note { string body; }");
//! assert_eq!(tokens.len(), 8);
//!
//! let output = parser::parse("struct Note { string body; }");
//! assert_eq!(output.program.declarations.len(), 1);
//! ```

pub mod ast;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod token_helpers;
