#![forbid(unsafe_code)]
//! zelang Compiler
//!
//! zelang describes persisted record types, simple web pages and request handler stubs. This
//! crate compiles a zelang source file into one C translation unit: SQLite-backed CRUD functions
//! per record type, plus either a libmicrohttpd web front end or a console demonstration `main`.
//!
//! The syntax frontend (lexer, parser, AST, diagnostics) lives in `zelang_syntax` and is
//! re-exported here; this crate adds the C backend and the command-line driver.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` and `backend` modules
//!   enforce `#![deny(clippy::unwrap_used)]`.
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! ## Examples
//!
//! ```rust
//! let output = zelang::parser::parse("struct Todo { @primary @autoincrement int id; string title; }");
//! assert!(output.diagnostics.is_empty());
//!
//! let c = zelang::backend::generate(&output.program).unwrap();
//! assert!(c.contains("Todo* Todo_create(char* title)"));
//! ```

pub mod backend;
pub mod cli;
pub mod version;

pub use zelang_syntax::{ast, diagnostics, lexer, parser};

pub use backend::{CGenerator, GenerateError, GeneratorConfig};
