//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;
use std::path::{Component, Path, PathBuf};

use miette::{NamedSource, Report};
use zelang_syntax::ast::Program;
use zelang_syntax::diagnostics::CompileError;
use zelang_syntax::{lexer, parser};

use crate::backend::codegen::CompilationContext;
use crate::backend::native::NativeBuild;
use crate::backend::{CGenerator, GeneratorConfig};

use super::{BuildArgs, CliError, CliResult, ExitCode};

/// Maximum source file size (100 MB)
///
/// Files larger than this are rejected to prevent out-of-memory conditions
/// during compilation.
const MAX_SOURCE_SIZE: u64 = 100 * 1024 * 1024;

/// Read source file contents.
///
/// ## Errors
///
/// Returns an error if:
/// - The file cannot be read (I/O error)
/// - The file exceeds `MAX_SOURCE_SIZE` (100 MB)
pub fn read_source(path: &Path) -> CliResult<String> {
    let metadata = fs::metadata(path)
        .map_err(|e| CliError::failure(format!("Cannot access file '{}': {}", path.display(), e)))?;

    if metadata.len() > MAX_SOURCE_SIZE {
        return Err(CliError::failure(format!(
            "Source file '{}' is too large ({} bytes, max {} bytes)",
            path.display(),
            metadata.len(),
            MAX_SOURCE_SIZE
        )));
    }

    fs::read_to_string(path).map_err(|e| CliError::failure(format!("Error reading file '{}': {}", path.display(), e)))
}

/// Reject output paths containing `..` components.
pub fn validate_output_path(path: &Path) -> CliResult<()> {
    if path.components().any(|c| matches!(c, Component::ParentDir)) {
        return Err(CliError::failure(format!(
            "Output path '{}' contains path traversal (..)",
            path.display()
        )));
    }

    if path.is_absolute() {
        tracing::warn!("Using absolute output path: {}. Consider using a relative path.", path.display());
    }

    Ok(())
}

/// Render parse diagnostics with source snippets, one report per diagnostic.
pub fn render_diagnostics(file_name: &str, source: &str, diagnostics: &[CompileError]) -> String {
    let mut out = String::new();
    for diagnostic in diagnostics {
        let report = Report::new(diagnostic.clone()).with_source_code(NamedSource::new(file_name, source.to_string()));
        out.push_str(&format!("{report:?}\n"));
    }
    out
}

/// Default output for `build`: the source file name with a `.c` extension, in the current
/// directory.
pub fn default_output_path(source: &Path) -> PathBuf {
    let stem = source.file_stem().map_or_else(|| "out".into(), |s| s.to_os_string());
    PathBuf::from(stem).with_extension("c")
}

/// Generator settings from the command line; unset flags keep the defaults.
pub fn generator_config(options: &BuildArgs) -> GeneratorConfig {
    let mut config = GeneratorConfig::default();
    if let Some(db) = &options.db {
        config = config.with_db_path(db.clone());
    }
    if let Some(port) = options.port {
        config = config.with_port(port);
    }
    config
}

/// Parse `path`, failing with rendered diagnostics unless `allow_diagnostics` is set.
fn parse_checked(path: &Path, source: &str, allow_diagnostics: bool) -> CliResult<Program> {
    let output = parser::parse(source);
    if output.has_errors() {
        let rendered = render_diagnostics(&path.display().to_string(), source, &output.diagnostics);
        if !allow_diagnostics {
            return Err(CliError::failure(rendered.trim_end()));
        }
        eprint!("{rendered}");
        tracing::warn!(count = output.diagnostics.len(), "continuing despite parse diagnostics");
    }
    Ok(output.program)
}

fn generate(config: GeneratorConfig, program: &Program) -> CliResult<String> {
    CGenerator::new(config)
        .generate(program)
        .map_err(|e| CliError::failure(format!("Code generation error: {e}")))
}

// ============================================================================
// Debug commands
// ============================================================================

/// Tokenize a file and print one token per line.
pub fn lex_file(path: &Path) -> CliResult<ExitCode> {
    let source = read_source(path)?;
    for token in lexer::lex(&source) {
        println!("{:>4}:{:<4} {:<20} {:?}", token.line, token.column, token.kind.to_string(), token.literal);
    }
    Ok(ExitCode::SUCCESS)
}

/// Parse a file and print the AST.
pub fn parse_file(path: &Path) -> CliResult<ExitCode> {
    let source = read_source(path)?;
    let output = parser::parse(&source);
    println!("{:#?}", output.program);
    if output.has_errors() {
        let rendered = render_diagnostics(&path.display().to_string(), &source, &output.diagnostics);
        return Err(CliError::failure(rendered.trim_end()));
    }
    Ok(ExitCode::SUCCESS)
}

/// Print the generated C for a file.
pub fn emit_c(path: &Path) -> CliResult<ExitCode> {
    let source = read_source(path)?;
    let program = parse_checked(path, &source, false)?;
    print!("{}", generate(GeneratorConfig::default(), &program)?);
    Ok(ExitCode::SUCCESS)
}

/// Parse a file and report diagnostics.
pub fn check_file(path: &Path) -> CliResult<ExitCode> {
    let source = read_source(path)?;
    let program = parse_checked(path, &source, false)?;
    println!("✓ {} declaration(s), no problems found", program.declarations.len());
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// Build / run
// ============================================================================

/// What a `build` produced.
#[derive(Debug)]
pub struct BuildOutcome {
    pub c_file: PathBuf,
    /// Set when the native compiler ran.
    pub native: Option<NativeBuild>,
}

/// Write the generated C file, then optionally compile it.
pub fn build_file(options: &BuildArgs, compile: bool) -> CliResult<BuildOutcome> {
    let source = read_source(&options.file)?;
    let program = parse_checked(&options.file, &source, options.allow_diagnostics)?;
    let web = CompilationContext::classify(&program).is_web();
    let code = generate(generator_config(options), &program)?;

    let c_file = options.output.clone().unwrap_or_else(|| default_output_path(&options.file));
    validate_output_path(&c_file)?;
    if let Some(parent) = c_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| CliError::failure(format!("Error creating '{}': {}", parent.display(), e)))?;
    }
    fs::write(&c_file, code).map_err(|e| CliError::failure(format!("Error writing '{}': {}", c_file.display(), e)))?;
    println!("Generated C code in: {}", c_file.display());

    if !compile {
        return Ok(BuildOutcome { c_file, native: None });
    }

    let native = NativeBuild::new(&c_file, web).with_compiler(options.cc.as_deref());
    println!("Compiling with {}...", native.compiler());
    let result = native
        .compile()
        .map_err(|e| CliError::failure(format!("Build failed: {e}")))?;
    if !result.stderr.is_empty() {
        eprint!("{}", result.stderr);
    }
    println!("✓ Build successful!");
    println!("Binary: {}", native.binary_path().display());

    Ok(BuildOutcome {
        c_file,
        native: Some(native),
    })
}

/// Build, compile and run a file, passing the program's exit code through.
pub fn run_file(options: &BuildArgs) -> CliResult<ExitCode> {
    let outcome = build_file(options, true)?;
    let Some(native) = outcome.native else {
        return Err(CliError::failure("Nothing to run: native build was skipped"));
    };

    let result = native
        .run()
        .map_err(|e| CliError::failure(format!("Error running program: {e}")))?;
    if result.success {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode(result.exit_code.unwrap_or(1)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn args(file: &str) -> BuildArgs {
        BuildArgs {
            file: PathBuf::from(file),
            output: None,
            cc: None,
            db: None,
            port: None,
            allow_diagnostics: false,
        }
    }

    #[test]
    fn test_output_path_traversal_rejected() {
        assert!(validate_output_path(Path::new("../escape.c")).is_err());
        assert!(validate_output_path(Path::new("out/../../escape.c")).is_err());
        assert!(validate_output_path(Path::new("out/todo.c")).is_ok());
    }

    #[test]
    fn test_default_output_uses_source_stem() {
        assert_eq!(default_output_path(Path::new("apps/todo.zl")), PathBuf::from("todo.c"));
        assert_eq!(default_output_path(Path::new("notes")), PathBuf::from("notes.c"));
    }

    #[test]
    fn test_generator_config_from_flags() {
        let mut options = args("todo.zl");
        assert_eq!(generator_config(&options), GeneratorConfig::default());

        options.db = Some("todo.db".into());
        options.port = Some(9000);
        let config = generator_config(&options);
        assert_eq!(config.db_path, "todo.db");
        assert_eq!(config.port, 9000);
    }

    #[test]
    fn test_missing_file_is_reported() {
        let err = read_source(Path::new("definitely/not/here.zl")).unwrap_err();
        assert!(err.message.contains("Cannot access file"));
        assert_eq!(err.exit_code, ExitCode::FAILURE);
    }

    #[test]
    fn test_rendered_diagnostics_name_the_file() {
        let source = "struct { int x; }";
        let output = parser::parse(source);
        let rendered = render_diagnostics("bad.zl", source, &output.diagnostics);
        assert!(rendered.contains("bad.zl"));
        assert!(rendered.contains("expected next token to be identifier"));
    }
}
