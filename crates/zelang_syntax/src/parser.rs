//! Parser for the zelang language
//!
//! Recursive descent over a pull-based [`Lexer`] with one token of lookahead. The parser never
//! fails: it returns the declarations it could build plus every diagnostic it recorded.
//!
//! ## Examples
//!
//! ```rust
//! use zelang_syntax::parser;
//!
//! let output = parser::parse("struct Todo { @primary int id; string title; }");
//! assert!(output.diagnostics.is_empty());
//! assert_eq!(output.program.declarations.len(), 1);
//! ```

use crate::ast::*;
use crate::diagnostics::CompileError;
use crate::lexer::{Lexer, Token, TokenKind};
use zelang_core::lang::keywords::KeywordId;
use zelang_core::lang::punctuation::PunctuationId;

// NOTE: This module is split across multiple files using `include!` to keep all parser
// methods in the same Rust module (preserving privacy + call patterns) while avoiding
// a single large source file.

include!("parser/core.rs");
include!("parser/helpers.rs");
include!("parser/decl.rs");
include!("parser/items.rs");
include!("parser/util.rs");
include!("parser/api.rs");
include!("parser/tests.rs");
