//! zelang language vocabulary registries.
//!
//! This module is the “front door” for language-level vocabulary: reserved keywords, operators,
//! punctuation, decorators and the domain type mapping table.
//!
//! The design goal is to avoid stringly-typed checks scattered across the compiler.
//! Instead, callers work with **stable IDs** (e.g. `KeywordId`, `DecoratorId`) and look up
//! spellings/metadata via registry tables.
//!
//! ## Notes
//! - Registries are intentionally **pure**: no AST types, no IO, no side effects.
//! - The lexer/parser enforce syntax; registries provide spellings and metadata for shared use
//!   (diagnostics, code generation tables).

pub mod decorators;
pub mod keywords;
pub mod operators;
pub mod punctuation;
pub mod registry;
pub mod types;
