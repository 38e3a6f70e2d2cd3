//! Property-based tests for the target type systems.
//!
//! These tests use proptest to verify the time-literal invariants across many
//! randomly generated magnitudes, catching edge cases that hand-written
//! tests might miss: alias spellings must be indistinguishable downstream,
//! and minute-and-above units must fold into seconds with no precision loss
//! for any 64-bit magnitude.

use proptest::prelude::*;

use rillc::ast::{TimeUnit, TimeValue};
use rillc::targets::{Target, TargetTypes};

/// Every spelling the grammar recognizes, grouped by unit.
const SPELLINGS: &[(&[&str], TimeUnit)] = &[
    (&["nsec", "nsecs"], TimeUnit::Nanos),
    (&["usec", "usecs"], TimeUnit::Micros),
    (&["msec", "msecs"], TimeUnit::Millis),
    (&["sec", "secs", "second", "seconds"], TimeUnit::Seconds),
    (&["min", "mins", "minute", "minutes"], TimeUnit::Minutes),
    (&["hour", "hours"], TimeUnit::Hours),
    (&["day", "days"], TimeUnit::Days),
    (&["week", "weeks"], TimeUnit::Weeks),
];

/// Pull the integer argument back out of a rendered literal like
/// `Duration::from_secs(7200)` or `std::chrono::seconds(7200)`.
fn literal_magnitude(literal: &str) -> u128 {
    let open = literal.find('(').expect("literal has an opening paren");
    let close = literal.rfind(')').expect("literal has a closing paren");
    literal[open + 1..close]
        .parse()
        .expect("literal argument is a plain integer")
}

fn all_targets() -> Vec<&'static dyn TargetTypes> {
    vec![Target::Rust.types(), Target::Cpp.types()]
}

proptest! {
    /// Alias spellings of one unit always render the same literal.
    #[test]
    fn alias_spellings_are_indistinguishable(magnitude in any::<u64>()) {
        for types in all_targets() {
            for (spellings, _) in SPELLINGS {
                let units: Vec<TimeUnit> = spellings
                    .iter()
                    .map(|s| TimeUnit::from_name(s).expect("known spelling"))
                    .collect();
                let first = types.time_literal(TimeValue::new(magnitude, units[0]));
                for unit in &units[1..] {
                    prop_assert_eq!(
                        types.time_literal(TimeValue::new(magnitude, *unit)),
                        first.clone()
                    );
                }
            }
        }
    }

    /// Minute-and-above units fold into seconds by their exact factor, with
    /// no wraparound for any 64-bit magnitude.
    #[test]
    fn second_folding_is_exact(magnitude in any::<u64>()) {
        for types in all_targets() {
            for unit in [
                TimeUnit::Seconds,
                TimeUnit::Minutes,
                TimeUnit::Hours,
                TimeUnit::Days,
                TimeUnit::Weeks,
                TimeUnit::Unspecified,
            ] {
                let factor = unit.seconds_factor().expect("second-folding unit");
                let literal = types.time_literal(TimeValue::new(magnitude, unit));
                prop_assert_eq!(
                    literal_magnitude(&literal),
                    u128::from(magnitude) * u128::from(factor),
                    "unit {:?} in {}", unit, literal
                );
            }
        }
    }

    /// Sub-second units keep their magnitude in their own base.
    #[test]
    fn sub_second_units_keep_their_base(magnitude in any::<u64>()) {
        for types in all_targets() {
            for unit in [TimeUnit::Nanos, TimeUnit::Micros, TimeUnit::Millis] {
                let literal = types.time_literal(TimeValue::new(magnitude, unit));
                prop_assert_eq!(literal_magnitude(&literal), u128::from(magnitude));
            }
        }
    }

    /// The unspecified unit means seconds, always.
    #[test]
    fn unspecified_defaults_to_seconds(magnitude in any::<u64>()) {
        for types in all_targets() {
            prop_assert_eq!(
                types.time_literal(TimeValue::new(magnitude, TimeUnit::Unspecified)),
                types.time_literal(TimeValue::new(magnitude, TimeUnit::Seconds))
            );
        }
    }

    /// Rendering the same descriptor twice yields textually equal output.
    #[test]
    fn type_rendering_is_idempotent(size in any::<usize>(), base in "[a-z][a-z0-9]{0,12}") {
        for types in all_targets() {
            prop_assert_eq!(
                types.fixed_size_list_type(&base, size),
                types.fixed_size_list_type(&base, size)
            );
            prop_assert_eq!(
                types.variable_size_list_type(&base),
                types.variable_size_list_type(&base)
            );
            prop_assert_ne!(
                types.fixed_size_list_type(&base, size),
                types.variable_size_list_type(&base)
            );
        }
    }
}
