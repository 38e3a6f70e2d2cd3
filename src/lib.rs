#![forbid(unsafe_code)]
//! Rill Coordination Language Compiler Backend
//!
//! Rill is a reactor-oriented coordination language: programs are built from
//! reactors with timed reactions ordered by logical time. This crate is the
//! backend of its compiler: it takes a validated program model from the
//! front-end, renders it into idiomatic source code for a supported runtime
//! target, and drives that target's native build tool to produce an
//! executable.
//!
//! Per-target differences (time literal syntax, list syntax, generics
//! support) live behind the [`targets::TargetTypes`] capability trait, one
//! implementation per target, injected into the pipeline at construction
//! time.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` and `backend` modules
//!   enforce `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **Generated code**: The emitter writes target source as *string output*; anything it emits is data, not
//!   method calls in this compiler.

pub mod backend;
pub mod cli;
pub mod frontend;
pub mod targets;
pub mod version;

pub use frontend::ast;
pub use frontend::diagnostics;

pub use backend::driver::{generate, FileConfig, GenerationOutcome};
pub use backend::error::GenerationError;
pub use targets::{Target, TargetTypes};
