//! Rill compiler backend.
//!
//! This module turns a validated program model into a buildable target
//! project. The pipeline is:
//!
//! 1. Validated AST from the front-end → `model::build_model` → [`model::GenerationModel`]
//! 2. `emitter::emit_project` renders the model into a source tree, with all
//!    target syntax delegated to a [`TargetTypes`](crate::targets::TargetTypes)
//!    implementation
//! 3. `invoke::run_build` drives the target's native build tool and
//!    classifies its exit status
//! 4. `driver::generate` sequences the stages and enforces the abort rules
//!
//! ## Module Organization
//!
//! - `model` - generation model data shapes and the flattening builder
//! - `emitter` - model-to-source rendering and the source builder
//! - `invoke` - toolchain subprocess invocation and outcome classification
//! - `driver` - pipeline orchestration
//! - `error` - the pipeline's error taxonomy

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod driver;
pub mod emitter;
pub mod error;
pub mod invoke;
pub mod model;

pub use driver::{generate, FileConfig, GenerationOutcome};
pub use error::GenerationError;
pub use invoke::{BuildCommand, BuildOutcome, BuildReport};
pub use model::GenerationModel;
