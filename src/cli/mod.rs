//! CLI module for the zelang compiler
//!
//! This module provides the command-line interface for the compiler.
//!
//! ## Commands
//!
//! - `<file>` - Parse and report diagnostics
//! - `build <file>` - Compile to C (and optionally to a native binary)
//! - `run <file>` - Compile to C, build natively and run the program
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};

use crate::version::ZELANG_VERSION;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// The zelang compiler: declarative records and pages to C with SQLite
#[derive(Parser, Debug)]
#[command(name = "zelang")]
#[command(version = ZELANG_VERSION)]
#[command(about = "Compile zelang sources to C backed by SQLite", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// File to check (default action when no subcommand given)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    // Debug/development flags
    /// Tokenize only (debug)
    #[arg(long = "lex", value_name = "FILE", conflicts_with = "file")]
    pub lex_file: Option<PathBuf>,

    /// Parse only (debug)
    #[arg(long = "parse", value_name = "FILE", conflicts_with = "file")]
    pub parse_file: Option<PathBuf>,

    /// Print generated C to stdout (debug)
    #[arg(long = "emit-c", value_name = "FILE", conflicts_with = "file")]
    pub emit_c_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compile to C, optionally building a native binary
    Build {
        #[command(flatten)]
        options: BuildArgs,
        /// Also invoke the C compiler on the generated file
        #[arg(long)]
        compile: bool,
    },

    /// Compile, build natively and run the program
    Run {
        #[command(flatten)]
        options: BuildArgs,
    },
}

/// Options shared by `build` and `run`.
#[derive(Args, Debug, Clone)]
pub struct BuildArgs {
    /// Source file to compile
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Output C file (default: the source file name with a `.c` extension)
    #[arg(short = 'o', long = "output", value_name = "OUT")]
    pub output: Option<PathBuf>,

    /// C compiler (default: $CC, else `cc`)
    #[arg(long = "cc", value_name = "CC")]
    pub cc: Option<String>,

    /// SQLite database path used by the generated program
    #[arg(long = "db", value_name = "PATH")]
    pub db: Option<String>,

    /// HTTP port for the generated web server
    #[arg(long = "port", value_name = "N")]
    pub port: Option<u16>,

    /// Emit output even when the parser reported diagnostics
    #[arg(long = "allow-diagnostics")]
    pub allow_diagnostics: bool,
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
pub fn execute(cli: Cli) -> CliResult<ExitCode> {
    // Handle debug flags first
    if let Some(file) = cli.lex_file {
        return commands::lex_file(&file);
    }
    if let Some(file) = cli.parse_file {
        return commands::parse_file(&file);
    }
    if let Some(file) = cli.emit_c_file {
        return commands::emit_c(&file);
    }

    match cli.command {
        Some(Command::Build { options, compile }) => commands::build_file(&options, compile).map(|_| ExitCode::SUCCESS),
        Some(Command::Run { options }) => commands::run_file(&options),
        None => match cli.file {
            Some(file) => commands::check_file(&file),
            None => Err(CliError::failure("Usage: zelang <FILE> | zelang build <FILE> | zelang run <FILE>")),
        },
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_check() {
        let cli = Cli::try_parse_from(["zelang", "todo.zl"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.file, Some(PathBuf::from("todo.zl")));
    }

    #[test]
    fn test_cli_parse_build_options() {
        let cli = Cli::try_parse_from([
            "zelang",
            "build",
            "todo.zl",
            "-o",
            "out/todo.c",
            "--compile",
            "--cc",
            "clang",
            "--db",
            "todo.db",
            "--port",
            "9000",
            "--allow-diagnostics",
        ])
        .unwrap();
        let Some(Command::Build { options, compile }) = cli.command else {
            panic!("Expected Build command");
        };
        assert!(compile);
        assert_eq!(options.file, PathBuf::from("todo.zl"));
        assert_eq!(options.output, Some(PathBuf::from("out/todo.c")));
        assert_eq!(options.cc.as_deref(), Some("clang"));
        assert_eq!(options.db.as_deref(), Some("todo.db"));
        assert_eq!(options.port, Some(9000));
        assert!(options.allow_diagnostics);
    }

    #[test]
    fn test_cli_parse_run() {
        let cli = Cli::try_parse_from(["zelang", "run", "todo.zl", "--port", "8081"]).unwrap();
        let Some(Command::Run { options }) = cli.command else {
            panic!("Expected Run command");
        };
        assert_eq!(options.port, Some(8081));
        assert!(!options.allow_diagnostics);
    }

    #[test]
    fn test_cli_rejects_bad_port() {
        assert!(Cli::try_parse_from(["zelang", "build", "todo.zl", "--port", "99999"]).is_err());
    }

    #[test]
    fn test_cli_parse_debug_flags() {
        let cli = Cli::try_parse_from(["zelang", "--lex", "todo.zl"]).unwrap();
        assert!(cli.lex_file.is_some());

        let cli = Cli::try_parse_from(["zelang", "--parse", "todo.zl"]).unwrap();
        assert!(cli.parse_file.is_some());

        let cli = Cli::try_parse_from(["zelang", "--emit-c", "todo.zl"]).unwrap();
        assert!(cli.emit_c_file.is_some());
    }

    #[test]
    fn test_debug_flag_conflicts_with_file() {
        assert!(Cli::try_parse_from(["zelang", "a.zl", "--lex", "b.zl"]).is_err());
    }
}
