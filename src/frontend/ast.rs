//! The validated program model handed to the backend.
//!
//! These types are the input contract of the generation pipeline. A front-end
//! (or the CLI, via the JSON interchange format) produces a [`Program`] that
//! has already been parsed and semantically validated; the backend only
//! flattens and renders it. Everything here is target-independent: durations
//! carry their unit, types and initializers are abstract descriptors, and the
//! per-target syntax is decided later by a `TargetTypes` implementation.

use serde::{Deserialize, Serialize};

/// A complete, validated Rill program.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Program {
    /// All reactor definitions, in declaration order.
    pub reactors: Vec<Reactor>,
    /// Name of the main (entry) reactor, if the program declares one.
    ///
    /// Absence is a legal state, not a validation error: the backend emits a
    /// warning and generates nothing.
    #[serde(default)]
    pub main: Option<String>,
    /// Global target configuration from the program's `target` declaration.
    #[serde(default)]
    pub properties: TargetProperties,
}

/// Recognized options of the program's `target` declaration.
///
/// The front-end validates these; the backend trusts them as-is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TargetProperties {
    /// Stop after emitting sources, without invoking the target toolchain.
    #[serde(default)]
    pub no_compile: bool,
    /// Extra flags appended verbatim (and unvalidated) to the toolchain
    /// invocation, after the fixed flags.
    #[serde(default)]
    pub compiler_flags: Vec<String>,
}

/// A reactor definition: a component with timed reactions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reactor {
    pub name: String,
    #[serde(default)]
    pub params: Vec<Parameter>,
    #[serde(default)]
    pub state: Vec<StateVar>,
    #[serde(default)]
    pub timers: Vec<Timer>,
    #[serde(default)]
    pub actions: Vec<Action>,
    #[serde(default)]
    pub reactions: Vec<Reaction>,
}

/// A constructor parameter of a reactor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub ty: TypeDescriptor,
    /// Default value; [`Value::Absent`] when the program supplied none.
    #[serde(default)]
    pub default: Value,
}

/// A state variable of a reactor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateVar {
    pub name: String,
    pub ty: TypeDescriptor,
    #[serde(default)]
    pub init: Value,
}

/// A timer: fires once after `offset`, then every `period` if one is given.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timer {
    pub name: String,
    pub offset: TimeValue,
    #[serde(default)]
    pub period: Option<TimeValue>,
}

/// A logical action, schedulable from reaction bodies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Action {
    pub name: String,
    #[serde(default)]
    pub min_delay: Option<TimeValue>,
    #[serde(default)]
    pub ty: Option<TypeDescriptor>,
}

/// A reference to a port, possibly on a contained reactor instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortRef {
    #[serde(default)]
    pub container: Option<String>,
    pub port: String,
}

/// A reaction: a trigger set plus a verbatim target-code body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reaction {
    pub triggers: Vec<Trigger>,
    /// Body code in the target language, passed through untouched.
    pub body: String,
}

/// What causes a reaction to fire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    Startup,
    Shutdown,
    Timer(String),
    Action(String),
}

/// A duration: a non-negative magnitude paired with its unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeValue {
    pub magnitude: u64,
    #[serde(default)]
    pub unit: TimeUnit,
}

impl TimeValue {
    pub fn new(magnitude: u64, unit: TimeUnit) -> Self {
        Self { magnitude, unit }
    }
}

/// Units of time recognized in Rill programs.
///
/// Surface syntax admits singular and plural spellings of each unit (plus the
/// terse `nsec`/`usec`/`msec`/`sec`/`min` forms); all aliases of a unit map to
/// the same variant, so downstream rendering cannot distinguish them. A time
/// value written without a unit gets [`TimeUnit::Unspecified`], which means
/// seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeUnit {
    #[serde(alias = "nsec", alias = "nsecs")]
    Nanos,
    #[serde(alias = "usec", alias = "usecs")]
    Micros,
    #[serde(alias = "msec", alias = "msecs")]
    Millis,
    #[serde(alias = "sec", alias = "secs", alias = "second", alias = "seconds")]
    Seconds,
    #[serde(alias = "min", alias = "mins", alias = "minute", alias = "minutes")]
    Minutes,
    #[serde(alias = "hour", alias = "hours")]
    Hours,
    #[serde(alias = "day", alias = "days")]
    Days,
    #[serde(alias = "week", alias = "weeks")]
    Weeks,
    /// No unit written in the source; defaults to seconds.
    #[default]
    Unspecified,
}

impl TimeUnit {
    /// Resolve a surface spelling to its unit. Accepts every alias the
    /// grammar recognizes; returns `None` for unknown spellings.
    pub fn from_name(name: &str) -> Option<TimeUnit> {
        match name {
            "nsec" | "nsecs" => Some(TimeUnit::Nanos),
            "usec" | "usecs" => Some(TimeUnit::Micros),
            "msec" | "msecs" => Some(TimeUnit::Millis),
            "sec" | "secs" | "second" | "seconds" => Some(TimeUnit::Seconds),
            "min" | "mins" | "minute" | "minutes" => Some(TimeUnit::Minutes),
            "hour" | "hours" => Some(TimeUnit::Hours),
            "day" | "days" => Some(TimeUnit::Days),
            "week" | "weeks" => Some(TimeUnit::Weeks),
            _ => None,
        }
    }

    /// Multiplicative factor to seconds for minute-and-above units.
    ///
    /// Sub-second units are expressed directly in their own base and return
    /// `None`; callers must not normalize them through seconds.
    pub fn seconds_factor(self) -> Option<u64> {
        match self {
            TimeUnit::Seconds | TimeUnit::Unspecified => Some(1),
            TimeUnit::Minutes => Some(60),
            TimeUnit::Hours => Some(3600),
            TimeUnit::Days => Some(86400),
            TimeUnit::Weeks => Some(604800),
            TimeUnit::Nanos | TimeUnit::Micros | TimeUnit::Millis => None,
        }
    }
}

/// An abstract type, carrying enough structure for a target type system to
/// render valid target syntax without further lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeDescriptor {
    /// A named scalar type, spelled the way the target spells it.
    Scalar(String),
    /// Exactly `size` contiguous elements of `base`.
    FixedList { base: Box<TypeDescriptor>, size: usize },
    /// A growable sequence of `base`.
    VariableList { base: Box<TypeDescriptor> },
    /// The absent/unit type.
    Unit,
}

/// An abstract initializer value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    /// Verbatim target code from the source program.
    Code(String),
    Time(TimeValue),
    FixedList(Vec<Value>),
    VariableList(Vec<Value>),
    /// No value was supplied; renders as the target's default expression.
    #[default]
    Absent,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_aliases_resolve_to_same_variant() {
        for (aliases, unit) in [
            (&["nsec", "nsecs"][..], TimeUnit::Nanos),
            (&["usec", "usecs"][..], TimeUnit::Micros),
            (&["msec", "msecs"][..], TimeUnit::Millis),
            (&["sec", "secs", "second", "seconds"][..], TimeUnit::Seconds),
            (&["min", "mins", "minute", "minutes"][..], TimeUnit::Minutes),
            (&["hour", "hours"][..], TimeUnit::Hours),
            (&["day", "days"][..], TimeUnit::Days),
            (&["week", "weeks"][..], TimeUnit::Weeks),
        ] {
            for alias in aliases {
                assert_eq!(TimeUnit::from_name(alias), Some(unit), "alias {alias}");
            }
        }
        assert_eq!(TimeUnit::from_name("fortnight"), None);
    }

    #[test]
    fn seconds_factors_match_the_unit_table() {
        assert_eq!(TimeUnit::Unspecified.seconds_factor(), Some(1));
        assert_eq!(TimeUnit::Seconds.seconds_factor(), Some(1));
        assert_eq!(TimeUnit::Minutes.seconds_factor(), Some(60));
        assert_eq!(TimeUnit::Hours.seconds_factor(), Some(3600));
        assert_eq!(TimeUnit::Days.seconds_factor(), Some(86400));
        assert_eq!(TimeUnit::Weeks.seconds_factor(), Some(604800));
        assert_eq!(TimeUnit::Millis.seconds_factor(), None);
    }

    #[test]
    fn program_model_round_trips_through_json() {
        let json = r#"{
            "reactors": [{
                "name": "Clock",
                "timers": [{"name": "tick", "offset": {"magnitude": 0}, "period": {"magnitude": 100, "unit": "msecs"}}],
                "reactions": [{"triggers": [{"timer": "tick"}], "body": "ctx.advance();"}]
            }],
            "main": "Clock"
        }"#;
        let program: Program = serde_json::from_str(json).expect("model should deserialize");
        assert_eq!(program.main.as_deref(), Some("Clock"));
        let timer = &program.reactors[0].timers[0];
        assert_eq!(timer.offset.unit, TimeUnit::Unspecified);
        assert_eq!(timer.period.map(|p| p.unit), Some(TimeUnit::Millis));
        assert!(!program.properties.no_compile);
    }
}
