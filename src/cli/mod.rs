//! CLI module for the Rill compiler backend.
//!
//! ## Commands
//!
//! - `build <model.json>` - Generate target sources and build the executable
//! - `emit <model.json>` - Generate target sources only
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

use clap::{Parser, Subcommand};

use crate::targets::Target;
use crate::version::RILLC_VERSION;

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
    /// Create a new CLI error with a message and exit code.
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

/// The Rill coordination language compiler backend
#[derive(Parser, Debug)]
#[command(name = "rillc")]
#[command(version = RILLC_VERSION)]
#[command(about = "Code generator backend for the Rill coordination language", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate target sources from a validated program model and build them
    Build {
        /// Program model file (JSON) produced by the front-end
        #[arg(value_name = "MODEL")]
        model: PathBuf,
        /// Output target
        #[arg(long, default_value = "rust")]
        target: Target,
        /// Root directory for the emitted source tree
        #[arg(long, value_name = "DIR")]
        src_gen_dir: Option<PathBuf>,
        /// Directory receiving the compiled artifact
        #[arg(long, value_name = "DIR")]
        bin_dir: Option<PathBuf>,
        /// Stop after emitting sources, without invoking the toolchain
        #[arg(long)]
        no_compile: bool,
    },

    /// Generate target sources only (same as `build --no-compile`)
    Emit {
        /// Program model file (JSON) produced by the front-end
        #[arg(value_name = "MODEL")]
        model: PathBuf,
        /// Output target
        #[arg(long, default_value = "rust")]
        target: Target,
        /// Root directory for the emitted source tree
        #[arg(long, value_name = "DIR")]
        src_gen_dir: Option<PathBuf>,
    },
}

// clap resolves `--target` values through Target's FromStr
impl clap::builder::ValueParserFactory for Target {
    type Parser = clap::builder::ValueParser;

    fn value_parser() -> Self::Parser {
        clap::builder::ValueParser::new(|s: &str| s.parse::<Target>())
    }
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
fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::Build {
            model,
            target,
            src_gen_dir,
            bin_dir,
            no_compile,
        } => commands::build_file(&model, target, src_gen_dir, bin_dir, no_compile),
        Command::Emit {
            model,
            target,
            src_gen_dir,
        } => commands::build_file(&model, target, src_gen_dir, None, true),
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
    fn cli_parses_build() {
        let cli = Cli::try_parse_from(["rillc", "build", "model.json"]).unwrap();
        match cli.command {
            Command::Build {
                target, no_compile, ..
            } => {
                assert_eq!(target, Target::Rust);
                assert!(!no_compile);
            }
            other => panic!("expected Build, got {other:?}"),
        }
    }

    #[test]
    fn cli_parses_target_and_flags() {
        let cli = Cli::try_parse_from([
            "rillc",
            "build",
            "model.json",
            "--target",
            "cpp",
            "--no-compile",
            "--src-gen-dir",
            "out/src",
            "--bin-dir",
            "out/bin",
        ])
        .unwrap();
        match cli.command {
            Command::Build {
                target,
                no_compile,
                src_gen_dir,
                bin_dir,
                ..
            } => {
                assert_eq!(target, Target::Cpp);
                assert!(no_compile);
                assert_eq!(src_gen_dir, Some(PathBuf::from("out/src")));
                assert_eq!(bin_dir, Some(PathBuf::from("out/bin")));
            }
            other => panic!("expected Build, got {other:?}"),
        }
    }

    #[test]
    fn cli_parses_emit() {
        let cli = Cli::try_parse_from(["rillc", "emit", "model.json"]).unwrap();
        assert!(matches!(cli.command, Command::Emit { .. }));
    }

    #[test]
    fn cli_rejects_unknown_target() {
        assert!(Cli::try_parse_from(["rillc", "build", "model.json", "--target", "java"]).is_err());
    }
}
