//! Error types for the generation pipeline.
//!
//! Every failure here is terminal for the current generation request: there
//! are no retries, and files written before a later-stage failure stay on
//! disk. The absence of a main reactor is not represented here; that is a
//! soft abort reported through
//! [`GenerationOutcome::NoMainReactor`](crate::backend::driver::GenerationOutcome).

use thiserror::Error;

use crate::targets::UnsupportedTargetOp;

/// A failure of the generation pipeline.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The front-end reported validation errors; nothing was generated.
    #[error("{errors} validation error(s) reported before generation; no code was generated")]
    ValidationFailed { errors: usize },

    /// Rendering the generation model to source files failed.
    #[error("emission failed: {0}")]
    Emission(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The configured build tool could not be located or started.
    ///
    /// Distinct from [`GenerationError::ToolchainFailed`]: an unresolvable
    /// binary is never reported as an exit code.
    #[error("toolchain `{tool}` is unavailable: {reason}")]
    ToolchainUnavailable { tool: String, reason: String },

    /// The build tool ran and exited with a nonzero code.
    #[error("{tool} failed with error code {code}")]
    ToolchainFailed {
        tool: String,
        code: i32,
        /// Captured diagnostics for display; never parsed.
        stderr: String,
    },

    /// The selected target does not implement a required operation.
    #[error(transparent)]
    Unsupported(#[from] UnsupportedTargetOp),
}
