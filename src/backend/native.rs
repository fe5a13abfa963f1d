//! Native build driver - compiles generated C with the system C compiler
//!
//! The generated program links against SQLite always and libmicrohttpd in web mode. The compiler
//! is `--cc` when given, else `$CC`, else `cc`.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Compiler used when neither an explicit choice nor `$CC` is available.
pub const DEFAULT_CC: &str = "cc";

#[derive(Debug, thiserror::Error)]
pub enum NativeBuildError {
    #[error("failed to launch `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("`{program}` exited with status {status}:\n{stderr}")]
    CompileFailed { program: String, status: String, stderr: String },
}

/// One native compilation of a generated `.c` file.
#[derive(Debug, Clone)]
pub struct NativeBuild {
    compiler: String,
    source: PathBuf,
    binary: PathBuf,
    web: bool,
}

impl NativeBuild {
    /// Build `source` into a binary next to it with the same stem.
    pub fn new(source: impl AsRef<Path>, web: bool) -> Self {
        let source = source.as_ref().to_path_buf();
        let binary = source.with_extension("");
        Self {
            compiler: resolve_compiler(None, std::env::var("CC").ok()),
            source,
            binary,
            web,
        }
    }

    /// Override the compiler; `None` keeps the environment choice.
    pub fn with_compiler(mut self, compiler: Option<&str>) -> Self {
        if let Some(cc) = compiler {
            self.compiler = resolve_compiler(Some(cc), None);
        }
        self
    }

    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = binary.into();
        self
    }

    pub fn compiler(&self) -> &str {
        &self.compiler
    }

    pub fn binary_path(&self) -> &Path {
        &self.binary
    }

    /// Libraries passed as `-l` flags, in link order.
    pub fn libraries(&self) -> &'static [&'static str] {
        if self.web { &["sqlite3", "microhttpd"] } else { &["sqlite3"] }
    }

    /// Compiler arguments: `<source> -o <binary> -lsqlite3 [-lmicrohttpd]`.
    pub fn args(&self) -> Vec<OsString> {
        let mut args = vec![self.source.clone().into_os_string(), "-o".into(), self.binary.clone().into_os_string()];
        args.extend(self.libraries().iter().map(|lib| OsString::from(format!("-l{lib}"))));
        args
    }

    /// Run the compiler, capturing its output.
    #[tracing::instrument(skip_all, fields(cc = %self.compiler, source = %self.source.display()))]
    pub fn compile(&self) -> Result<BuildResult, NativeBuildError> {
        let output = Command::new(&self.compiler)
            .args(self.args())
            .output()
            .map_err(|source| NativeBuildError::Spawn {
                program: self.compiler.clone(),
                source,
            })?;

        let result = BuildResult {
            success: output.status.success(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        };
        if !result.success {
            return Err(NativeBuildError::CompileFailed {
                program: self.compiler.clone(),
                status: output.status.to_string(),
                stderr: result.stderr,
            });
        }
        tracing::debug!(binary = %self.binary.display(), "native build finished");
        Ok(result)
    }

    /// Run the built binary with inherited stdio so server output streams to the terminal.
    pub fn run(&self) -> Result<RunResult, NativeBuildError> {
        let program = self.runnable_path();
        let status = Command::new(&program)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| NativeBuildError::Spawn {
                program: program.display().to_string(),
                source,
            })?;

        Ok(RunResult {
            success: status.success(),
            exit_code: status.code(),
        })
    }

    /// A bare file name would be looked up on `PATH`; anchor it to the current directory.
    fn runnable_path(&self) -> PathBuf {
        if self.binary.components().count() == 1 {
            Path::new(".").join(&self.binary)
        } else {
            self.binary.clone()
        }
    }
}

/// Pick the compiler: explicit choice, then `$CC` (if non-empty), then [`DEFAULT_CC`].
pub fn resolve_compiler(explicit: Option<&str>, env_cc: Option<String>) -> String {
    explicit
        .map(str::to_string)
        .or(env_cc)
        .map(|cc| cc.trim().to_string())
        .filter(|cc| !cc.is_empty())
        .unwrap_or_else(|| DEFAULT_CC.to_string())
}

/// Result of a native compile
#[derive(Debug)]
pub struct BuildResult {
    pub success: bool,
    /// Compiler diagnostics; on success these are warnings only.
    pub stderr: String,
}

/// Result of running the built program
#[derive(Debug)]
pub struct RunResult {
    pub success: bool,
    pub exit_code: Option<i32>,
}
