//! Type and literal mapping for the Rust target.
//!
//! Durations map onto `std::time::Duration` constructors. Minute-and-above
//! units are folded into seconds at generation time so the emitted literal is
//! a plain integer; the fold is done in 128-bit arithmetic so no 64-bit
//! magnitude ever wraps in the rendered text.

use crate::frontend::ast::{TimeUnit, TimeValue};

use super::{Target, TargetTypes, UnsupportedTargetOp};

/// The Rust target's type system.
#[derive(Debug, Clone, Copy)]
pub struct RustTypes;

impl TargetTypes for RustTypes {
    fn target(&self) -> Target {
        Target::Rust
    }

    fn supports_generics(&self) -> bool {
        true
    }

    fn time_type(&self) -> &'static str {
        "Duration"
    }

    fn tag_type(&self) -> &'static str {
        "LogicalInstant"
    }

    fn undefined_type(&self) -> &'static str {
        "()"
    }

    // The Rust runtime subtracts tags directly; there is no distinct
    // interval type, so the default unsupported answer stands.

    fn fixed_size_list_type(&self, base: &str, size: usize) -> String {
        format!("[ {base} ; {size} ]")
    }

    fn variable_size_list_type(&self, base: &str) -> String {
        format!("Vec<{base}>")
    }

    fn time_literal(&self, time: TimeValue) -> String {
        let m = time.magnitude;
        match time.unit {
            TimeUnit::Nanos => format!("Duration::from_nanos({m})"),
            TimeUnit::Micros => format!("Duration::from_micros({m})"),
            TimeUnit::Millis => format!("Duration::from_millis({m})"),
            TimeUnit::Seconds
            | TimeUnit::Minutes
            | TimeUnit::Hours
            | TimeUnit::Days
            | TimeUnit::Weeks
            | TimeUnit::Unspecified => {
                // seconds_factor covers every unit in this arm
                let factor = time.unit.seconds_factor().unwrap_or(1);
                let secs = u128::from(m) * u128::from(factor);
                format!("Duration::from_secs({secs})")
            }
        }
    }

    fn fixed_size_list_literal(&self, elements: &[String]) -> String {
        format!("[{}]", elements.join(", "))
    }

    fn variable_size_list_literal(&self, elements: &[String]) -> String {
        format!("vec![{}]", elements.join(", "))
    }

    fn missing_value(&self) -> &'static str {
        "Default::default()"
    }

    fn delay_generic(&self) -> Result<String, UnsupportedTargetOp> {
        // TODO: synthesize `<T: Send + 'static>` once the runtime's delay
        // reactor lands; until then callers must see an explicit refusal.
        Err(self.unsupported("delay generic"))
    }
}
