//! Canonical language vocabulary for the zelang compiler.
//!
//! This crate is intentionally small and dependency-free. It holds the registry tables that the
//! lexer, parser and C generator all agree on: keywords, operators, punctuation, decorators and
//! the domain type → C/SQL mapping.
//!
//! ## Notes
//!
//! - This is a “vocabulary core” crate: **no IO**, no global state, and no compiler-specific types.

pub mod lang;
