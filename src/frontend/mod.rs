//! Front-end boundary of the Rill compiler backend.
//!
//! Parsing and semantic validation of Rill source live in the front-end, which
//! is an external collaborator of this crate. What crosses the boundary is a
//! *validated program model* (`ast::Program`) plus the diagnostics the
//! front-end has already reported (`diagnostics::Reporter`). The backend
//! trusts both: it never re-validates the model, it only checks whether
//! errors were reported before it ran.

pub mod ast;
pub mod diagnostics;
