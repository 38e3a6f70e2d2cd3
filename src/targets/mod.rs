//! Per-target capability abstraction.
//!
//! Every behavior that differs between output targets (time literal syntax,
//! list syntax, generics support, the per-target synthesis hooks) lives
//! behind the [`TargetTypes`] trait, with exactly one implementation per
//! supported target. The pipeline receives a `&dyn TargetTypes` at
//! construction time instead of subclassing a generator, so the same control
//! flow drives every target.
//!
//! All operations here are deterministic pure functions of their inputs:
//! no I/O, no hidden state. An operation a target does not implement returns
//! an explicit [`UnsupportedTargetOp`] rather than guessing at syntax.

pub mod cpp;
pub mod rust;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::frontend::ast::{Action, PortRef, TimeValue, TypeDescriptor, Value};

/// A supported output target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    Rust,
    Cpp,
}

impl Target {
    /// The type system for this target.
    pub fn types(self) -> &'static dyn TargetTypes {
        match self {
            Target::Rust => &rust::RustTypes,
            Target::Cpp => &cpp::CppTypes,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Target::Rust => "Rust",
            Target::Cpp => "Cpp",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Target {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rust" => Ok(Target::Rust),
            "cpp" | "c++" => Ok(Target::Cpp),
            other => Err(format!("unknown target `{other}` (expected `rust` or `cpp`)")),
        }
    }
}

/// A target type-system operation the selected target does not implement.
///
/// Carries the operation name so callers can tell "not yet supported for
/// this target" apart from every other failure. Never conflated with a
/// successful-but-empty result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("operation `{operation}` is not supported for the {target} target")]
pub struct UnsupportedTargetOp {
    pub target: Target,
    pub operation: &'static str,
}

/// The capability set a target must provide to the generation pipeline.
///
/// The required methods are the target-specific leaves; `type_name` and
/// `expression` are provided combinators that recurse through descriptors so
/// callers never hand-assemble list syntax. The synthesis hooks
/// (`delay_body`, `forward_body`, `delay_generic`, `tag_interval_type`)
/// default to unsupported; a target opts in by overriding them.
pub trait TargetTypes {
    fn target(&self) -> Target;

    /// Whether the target language can express parameterized reactor types.
    fn supports_generics(&self) -> bool;

    /// How the target spells a duration type.
    fn time_type(&self) -> &'static str;

    /// How the target spells a logical timestamp.
    fn tag_type(&self) -> &'static str;

    /// How the target spells an absent/unit value type.
    fn undefined_type(&self) -> &'static str;

    /// How the target spells the interval between two tags, for runtimes
    /// that expose one.
    fn tag_interval_type(&self) -> Result<&'static str, UnsupportedTargetOp> {
        Err(self.unsupported("tag interval type"))
    }

    /// A type holding exactly `size` contiguous elements of `base`.
    fn fixed_size_list_type(&self, base: &str, size: usize) -> String;

    /// A growable sequence of `base`.
    fn variable_size_list_type(&self, base: &str) -> String;

    /// An expression constructing a duration equal to `time`.
    ///
    /// Minute-and-above units are folded into seconds (×60, ×3600, ×86400,
    /// ×604800); sub-second units stay in their own base. The rendered
    /// magnitude is exact for any 64-bit input.
    fn time_literal(&self, time: TimeValue) -> String;

    /// A literal constructing a fixed-size list from rendered elements.
    fn fixed_size_list_literal(&self, elements: &[String]) -> String;

    /// A literal constructing a growable list from rendered elements.
    fn variable_size_list_literal(&self, elements: &[String]) -> String;

    /// The target's canonical default/zero expression, used when the program
    /// supplied no value.
    fn missing_value(&self) -> &'static str;

    /// Body of the synthesized reaction that forwards a delayed action's
    /// payload to `port`.
    fn delay_body(&self, _action: &Action, _port: &PortRef) -> Result<String, UnsupportedTargetOp> {
        Err(self.unsupported("delay body"))
    }

    /// Body of the synthesized reaction that schedules `action` from `port`.
    fn forward_body(&self, _action: &Action, _port: &PortRef) -> Result<String, UnsupportedTargetOp> {
        Err(self.unsupported("forward body"))
    }

    /// Generic parameter clause of the synthesized delay reactor.
    fn delay_generic(&self) -> Result<String, UnsupportedTargetOp> {
        Err(self.unsupported("delay generic"))
    }

    /// Render an abstract type descriptor in target syntax.
    fn type_name(&self, ty: &TypeDescriptor) -> String {
        match ty {
            TypeDescriptor::Scalar(name) => name.clone(),
            TypeDescriptor::FixedList { base, size } => {
                self.fixed_size_list_type(&self.type_name(base), *size)
            }
            TypeDescriptor::VariableList { base } => {
                self.variable_size_list_type(&self.type_name(base))
            }
            TypeDescriptor::Unit => self.undefined_type().to_string(),
        }
    }

    /// Render an abstract initializer value in target syntax.
    fn expression(&self, value: &Value) -> String {
        match value {
            Value::Code(code) => code.clone(),
            Value::Time(time) => self.time_literal(*time),
            Value::FixedList(elements) => {
                let rendered: Vec<String> = elements.iter().map(|e| self.expression(e)).collect();
                self.fixed_size_list_literal(&rendered)
            }
            Value::VariableList(elements) => {
                let rendered: Vec<String> = elements.iter().map(|e| self.expression(e)).collect();
                self.variable_size_list_literal(&rendered)
            }
            Value::Absent => self.missing_value().to_string(),
        }
    }

    /// Build the error value for an operation this target does not support.
    fn unsupported(&self, operation: &'static str) -> UnsupportedTargetOp {
        UnsupportedTargetOp {
            target: self.target(),
            operation,
        }
    }
}
