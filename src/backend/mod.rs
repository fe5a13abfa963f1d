//! zelang Compiler Backend
//!
//! This module turns a parsed [`Program`](zelang_syntax::ast::Program) into one C translation unit
//! backed by SQLite, plus a libmicrohttpd front end when the program declares pages or handlers.
//!
//! The pipeline is:
//! 1. AST → CGenerator → C source text
//! 2. Write the `.c` file
//! 3. Optionally invoke the native C compiler (`native.rs`) and run the binary
//!
//! ## Module Organization
//!
//! - `codegen/` - Code generation from AST to C
//! - `c_emitter.rs` - Low-level C code string builder
//! - `config.rs` - Generator settings (database path, port, buffer sizes)
//! - `native.rs` - C compiler invocation

#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod c_emitter;
pub mod codegen;
pub mod config;
pub mod native;

pub use codegen::{CGenerator, generate};
pub use config::GeneratorConfig;

/// Failure while producing C text. Generation either completes or yields this; never partial output.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("failed to format generated C: {0}")]
    Format(#[from] std::fmt::Error),
}
