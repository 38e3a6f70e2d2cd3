//! Invokes the target's native build tool and classifies the result.
//!
//! Exactly one subprocess is spawned per call, synchronously; the calling
//! thread blocks until it terminates. The raw exit code is the sole signal
//! used for classification. Stdout and stderr are captured for display,
//! never parsed. No timeout is imposed here: a hung toolchain hangs the
//! pipeline, and guarding against that is the caller's concern.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

/// A fully assembled toolchain invocation.
#[derive(Debug, Clone)]
pub struct BuildCommand {
    /// Toolchain binary name, resolved through `PATH`.
    pub program: String,
    /// Ordered arguments: fixed flags first, user flags appended verbatim.
    pub args: Vec<String>,
    /// Working directory: the emitted source root.
    pub cwd: PathBuf,
}

impl BuildCommand {
    /// The command line as one displayable string.
    pub fn display_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

/// Classification of one toolchain run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    /// Exit code 0.
    Success,
    /// Any nonzero exit code, preserved verbatim. A signal-terminated child
    /// has no code and is reported as `-1`.
    Failure { code: i32 },
    /// The binary could not be resolved or started. Never reported as an
    /// exit code.
    Unavailable { tool: String, reason: String },
}

/// One toolchain run: classification plus captured output.
#[derive(Debug)]
pub struct BuildReport {
    pub outcome: BuildOutcome,
    pub stdout: String,
    pub stderr: String,
}

/// Run the command to completion and classify its exit status.
pub fn run_build(cmd: &BuildCommand) -> BuildReport {
    debug!(command = %cmd.display_line(), cwd = %cmd.cwd.display(), "invoking toolchain");

    let output = match Command::new(&cmd.program)
        .args(&cmd.args)
        .current_dir(&cmd.cwd)
        .output()
    {
        Ok(output) => output,
        Err(e) => {
            return BuildReport {
                outcome: BuildOutcome::Unavailable {
                    tool: cmd.program.clone(),
                    reason: e.to_string(),
                },
                stdout: String::new(),
                stderr: String::new(),
            };
        }
    };

    let outcome = match output.status.code() {
        Some(0) => BuildOutcome::Success,
        Some(code) => BuildOutcome::Failure { code },
        None => BuildOutcome::Failure { code: -1 },
    };

    BuildReport {
        outcome,
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}

/// The cargo invocation for an emitted Rust project.
///
/// `--out-dir` is unstable, hence the nightly toolchain and the feature
/// flag. User-supplied compiler flags come last, in order, unvalidated.
pub fn cargo_build_command(src_dir: &Path, bin_dir: &Path, compiler_flags: &[String]) -> BuildCommand {
    let mut args = vec![
        "+nightly".to_string(),
        "build".to_string(),
        "--release".to_string(),
        "--out-dir".to_string(),
        bin_dir.to_string_lossy().into_owned(),
        "-Z".to_string(),
        "unstable-options".to_string(),
    ];
    args.extend(compiler_flags.iter().cloned());

    BuildCommand {
        program: "cargo".to_string(),
        args,
        cwd: src_dir.to_path_buf(),
    }
}
