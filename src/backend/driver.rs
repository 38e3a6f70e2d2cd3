//! The generation driver: sequences the pipeline and enforces abort rules.
//!
//! `Start -> ValidationCheck -> {Abort | EntryPointFound} -> BuildModel ->
//! Emit -> {SkipCompile | Compile} -> Done`.
//!
//! Two abort paths look similar but must stay distinct: front-end validation
//! errors are a hard stop ([`GenerationError::ValidationFailed`]), while a
//! missing main reactor is a warning-level soft abort
//! ([`GenerationOutcome::NoMainReactor`]) with a clean exit. Callers key
//! their exit status off this asymmetry.
//!
//! There are no retries anywhere; every failure is terminal for the current
//! invocation, and files written before a late failure stay on disk.

use std::fs;
use std::path::PathBuf;

use tracing::{info, warn};

use crate::frontend::ast::Program;
use crate::frontend::diagnostics::Reporter;
use crate::targets::Target;

use super::emitter::emit_project;
use super::error::GenerationError;
use super::invoke::{self, BuildOutcome, BuildReport};
use super::model::build_model;

/// Where generated sources and compiled artifacts go.
#[derive(Debug, Clone)]
pub struct FileConfig {
    /// Root of the emitted source tree; created (with parents) on demand.
    pub src_gen_dir: PathBuf,
    /// Directory receiving the toolchain's compiled artifact.
    pub bin_dir: PathBuf,
}

/// How one generation run ended, when it did not fail.
#[derive(Debug, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// The program defines no main reactor: a warning was reported and no
    /// files were written. Deliberately not an error.
    NoMainReactor,
    /// Sources were emitted; the toolchain was not invoked, either because
    /// the configuration said so or because emission reported errors.
    SkippedCompile { src_dir: PathBuf },
    /// Sources were emitted and the toolchain succeeded.
    Compiled { src_dir: PathBuf, bin_dir: PathBuf },
}

/// Run the full generation pipeline for one validated program.
#[tracing::instrument(skip_all, fields(target = %target))]
pub fn generate(
    program: &Program,
    reporter: &mut Reporter,
    files: &FileConfig,
    target: Target,
) -> Result<GenerationOutcome, GenerationError> {
    // Hard stop if the front-end already reported errors: no side effects.
    if reporter.errors_occurred() {
        return Err(GenerationError::ValidationFailed {
            errors: reporter.error_count(),
        });
    }

    // Soft abort: a program without a main reactor is legal but generates
    // nothing.
    if program.main.is_none() {
        warn!("the program does not define a main reactor; no code was generated");
        reporter.warning("the program does not define a main reactor, so no code was generated");
        return Ok(GenerationOutcome::NoMainReactor);
    }

    fs::create_dir_all(&files.src_gen_dir)?;

    let model = build_model(program);
    let types = target.types();
    emit_project(&model, types, &files.src_gen_dir, reporter)?;

    if model.properties.no_compile || reporter.errors_occurred() {
        info!("exiting before invoking the target compiler");
        return Ok(GenerationOutcome::SkippedCompile {
            src_dir: files.src_gen_dir.clone(),
        });
    }

    let command = match target {
        Target::Rust => invoke::cargo_build_command(
            &files.src_gen_dir,
            &files.bin_dir,
            &model.properties.compiler_flags,
        ),
        // no emitter for other targets means nothing to compile; emission
        // above already refused
        Target::Cpp => return Err(types.unsupported("toolchain invocation").into()),
    };

    let tool = command.program.clone();
    let report = invoke::run_build(&command);
    classify_build(report, tool, files)
}

/// Map a build report onto the pipeline's outcome/error split.
fn classify_build(
    report: BuildReport,
    tool: String,
    files: &FileConfig,
) -> Result<GenerationOutcome, GenerationError> {
    match report.outcome {
        BuildOutcome::Success => {
            info!(
                src = %files.src_gen_dir.display(),
                bin = %files.bin_dir.display(),
                "target compilation succeeded"
            );
            Ok(GenerationOutcome::Compiled {
                src_dir: files.src_gen_dir.clone(),
                bin_dir: files.bin_dir.clone(),
            })
        }
        BuildOutcome::Failure { code } => Err(GenerationError::ToolchainFailed {
            tool,
            code,
            stderr: report.stderr,
        }),
        BuildOutcome::Unavailable { tool, reason } => {
            Err(GenerationError::ToolchainUnavailable { tool, reason })
        }
    }
}
