//! Type and literal mapping for the C++ target.
//!
//! Only the type system is implemented; project emission for C++ is out of
//! scope, so the synthesis hooks keep their unsupported defaults. Durations
//! map onto `std::chrono` constructors with the same second-folding rule as
//! the Rust target.

use crate::frontend::ast::{TimeUnit, TimeValue};

use super::{Target, TargetTypes, UnsupportedTargetOp};

/// The C++ target's type system.
#[derive(Debug, Clone, Copy)]
pub struct CppTypes;

impl TargetTypes for CppTypes {
    fn target(&self) -> Target {
        Target::Cpp
    }

    fn supports_generics(&self) -> bool {
        true
    }

    fn time_type(&self) -> &'static str {
        "reactor::Duration"
    }

    fn tag_type(&self) -> &'static str {
        "reactor::Tag"
    }

    fn undefined_type(&self) -> &'static str {
        "void"
    }

    fn tag_interval_type(&self) -> Result<&'static str, UnsupportedTargetOp> {
        Ok("reactor::Duration")
    }

    fn fixed_size_list_type(&self, base: &str, size: usize) -> String {
        format!("std::array<{base}, {size}>")
    }

    fn variable_size_list_type(&self, base: &str) -> String {
        format!("std::vector<{base}>")
    }

    fn time_literal(&self, time: TimeValue) -> String {
        let m = time.magnitude;
        match time.unit {
            TimeUnit::Nanos => format!("std::chrono::nanoseconds({m})"),
            TimeUnit::Micros => format!("std::chrono::microseconds({m})"),
            TimeUnit::Millis => format!("std::chrono::milliseconds({m})"),
            TimeUnit::Seconds
            | TimeUnit::Minutes
            | TimeUnit::Hours
            | TimeUnit::Days
            | TimeUnit::Weeks
            | TimeUnit::Unspecified => {
                let factor = time.unit.seconds_factor().unwrap_or(1);
                let secs = u128::from(m) * u128::from(factor);
                format!("std::chrono::seconds({secs})")
            }
        }
    }

    fn fixed_size_list_literal(&self, elements: &[String]) -> String {
        format!("{{ {} }}", elements.join(", "))
    }

    fn variable_size_list_literal(&self, elements: &[String]) -> String {
        format!("{{ {} }}", elements.join(", "))
    }

    fn missing_value(&self) -> &'static str {
        "{}"
    }
}
