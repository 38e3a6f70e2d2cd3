//! Renders the generation model into a target source tree on disk.
//!
//! The Rust target gets a full Cargo project: a manifest, a `src/main.rs`
//! that wires the entry reactor into the runtime scheduler, and one module
//! per reactor. All type and literal syntax goes through the injected
//! [`TargetTypes`] implementation; the emitter itself never spells out
//! target-specific syntax for descriptors.
//!
//! Problems found while rendering (a reaction triggering a timer or action
//! the reactor does not declare) are reported to the [`Reporter`] and
//! emission continues; the driver then skips compilation. Hard I/O failures
//! abort emission. Files already written stay on disk either way.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::frontend::ast::Trigger;
use crate::frontend::diagnostics::Reporter;
use crate::targets::{Target, TargetTypes};
use crate::version::RILLC_VERSION;

use super::error::GenerationError;
use super::model::{GenerationModel, ReactorModel};

/// Name of the runtime crate generated projects depend on.
const RUNTIME_CRATE: &str = "rill-runtime";
const RUNTIME_VERSION: &str = "0.1";

/// A buffer for building generated source with proper indentation.
#[derive(Debug, Default)]
pub struct SourceBuilder {
    buffer: String,
    indent_level: usize,
}

impl SourceBuilder {
    const INDENT: &'static str = "    ";

    pub fn new() -> Self {
        Self::default()
    }

    /// Append one line at the current indentation.
    pub fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if text.is_empty() {
            self.buffer.push('\n');
            return;
        }
        for _ in 0..self.indent_level {
            self.buffer.push_str(Self::INDENT);
        }
        self.buffer.push_str(text);
        self.buffer.push('\n');
    }

    pub fn blank(&mut self) {
        self.buffer.push('\n');
    }

    /// Append `text` followed by an indented block, then the closer.
    pub fn block(&mut self, opener: &str, closer: &str, body: impl FnOnce(&mut Self)) {
        self.line(opener);
        self.indent_level += 1;
        body(self);
        self.indent_level -= 1;
        self.line(closer);
    }

    /// Append already-indented lines verbatim, re-indented to this level.
    pub fn verbatim(&mut self, code: &str) {
        for line in code.lines() {
            self.line(line);
        }
    }

    pub fn finish(self) -> String {
        self.buffer
    }
}

/// Render the model into a project rooted at `src_dir`.
///
/// Only the Rust target has an emitter; any other target yields an explicit
/// unsupported-operation error rather than quietly wrong syntax.
pub fn emit_project(
    model: &GenerationModel,
    types: &dyn TargetTypes,
    src_dir: &Path,
    reporter: &mut Reporter,
) -> Result<(), GenerationError> {
    if types.target() != Target::Rust {
        return Err(types.unsupported("project emission").into());
    }

    let crate_name = model
        .main_reactor()
        .map(|r| r.ident.clone())
        .unwrap_or_else(|| "rill_app".to_string());

    let source_dir = src_dir.join("src");
    fs::create_dir_all(&source_dir)?;

    fs::write(src_dir.join("Cargo.toml"), manifest(&crate_name))?;
    fs::write(source_dir.join("main.rs"), main_module(model))?;

    for reactor in &model.reactors {
        let code = reactor_module(reactor, types, reporter);
        fs::write(source_dir.join(format!("{}.rs", reactor.ident)), code)?;
    }

    debug!(
        reactors = model.reactors.len(),
        dir = %src_dir.display(),
        "emitted generated project"
    );
    Ok(())
}

fn header() -> String {
    format!("// Generated by rillc {RILLC_VERSION} - do not edit.\n")
}

fn manifest(crate_name: &str) -> String {
    format!(
        r#"[package]
name = "{crate_name}"
version = "{RILLC_VERSION}"
edition = "2021"

# Generated by the Rill compiler

[dependencies]
{RUNTIME_CRATE} = "{RUNTIME_VERSION}"

[[bin]]
name = "{crate_name}"
path = "src/main.rs"
"#
    )
}

fn main_module(model: &GenerationModel) -> String {
    let mut out = SourceBuilder::new();
    out.verbatim(&header());
    for reactor in &model.reactors {
        out.line(format!("mod {};", reactor.ident));
    }
    out.blank();
    out.block("fn main() {", "}", |out| {
        match model.main_reactor() {
            Some(main) => {
                out.line("let mut scheduler = rill_runtime::Scheduler::new();");
                out.line(format!(
                    "let main_reactor = {}::{}::new();",
                    main.ident, main.name
                ));
                out.line("scheduler.run(main_reactor);");
            }
            None => {
                // the driver aborts before emission when no main exists;
                // keep the generated program loadable regardless
                out.line("// no entry reactor was resolved");
            }
        }
    });
    out.finish()
}

fn reactor_module(reactor: &ReactorModel, types: &dyn TargetTypes, reporter: &mut Reporter) -> String {
    let mut out = SourceBuilder::new();
    out.verbatim(&header());
    out.line("#![allow(dead_code, unused_variables)]");
    out.blank();
    out.line("use rill_runtime::{Context, Duration};");
    out.blank();

    // struct holding parameters and state
    out.block(&format!("pub struct {} {{", reactor.name), "}", |out| {
        for param in &reactor.params {
            out.line(format!("pub {}: {},", param.name, types.type_name(&param.ty)));
        }
        for state in &reactor.state {
            out.line(format!("{}: {},", state.name, types.type_name(&state.ty)));
        }
    });
    out.blank();

    out.block(&format!("impl {} {{", reactor.name), "}", |out| {
        // timer schedules as associated constants
        for timer in &reactor.timers {
            let upper = timer.name.to_uppercase();
            out.line(format!(
                "pub const {}_OFFSET: Duration = {};",
                upper,
                types.time_literal(timer.offset)
            ));
            if let Some(period) = timer.period {
                out.line(format!(
                    "pub const {}_PERIOD: Duration = {};",
                    upper,
                    types.time_literal(period)
                ));
            }
        }
        if !reactor.timers.is_empty() {
            out.blank();
        }

        out.block("pub fn new() -> Self {", "}", |out| {
            out.block("Self {", "}", |out| {
                for param in &reactor.params {
                    out.line(format!("{}: {},", param.name, types.expression(&param.default)));
                }
                for state in &reactor.state {
                    out.line(format!("{}: {},", state.name, types.expression(&state.init)));
                }
            });
        });

        for reaction in &reactor.reactions {
            check_triggers(reactor, &reaction.reaction.triggers, reporter);
            out.blank();
            let triggers = describe_triggers(&reaction.reaction.triggers);
            out.line(format!("/// Reaction {}: triggered by {}.", reaction.index, triggers));
            out.block(
                &format!(
                    "pub fn reaction_{}(&mut self, ctx: &mut Context) {{",
                    reaction.index
                ),
                "}",
                |out| {
                    out.verbatim(&reaction.reaction.body);
                },
            );
        }
    });

    out.finish()
}

/// Report reactions wired to timers or actions the reactor never declared.
/// Validation upstream should have rejected these; when one slips through we
/// still emit the module, and the driver skips compilation.
fn check_triggers(reactor: &ReactorModel, triggers: &[Trigger], reporter: &mut Reporter) {
    for trigger in triggers {
        match trigger {
            Trigger::Timer(name) if !reactor.timers.iter().any(|t| &t.name == name) => {
                reporter.error(format!(
                    "reactor `{}` has a reaction triggered by unknown timer `{}`",
                    reactor.name, name
                ));
            }
            Trigger::Action(name) if !reactor.actions.iter().any(|a| &a.name == name) => {
                reporter.error(format!(
                    "reactor `{}` has a reaction triggered by unknown action `{}`",
                    reactor.name, name
                ));
            }
            _ => {}
        }
    }
}

fn describe_triggers(triggers: &[Trigger]) -> String {
    if triggers.is_empty() {
        return "nothing".to_string();
    }
    let mut described = String::new();
    for (i, trigger) in triggers.iter().enumerate() {
        if i > 0 {
            described.push_str(", ");
        }
        match trigger {
            Trigger::Startup => described.push_str("startup"),
            Trigger::Shutdown => described.push_str("shutdown"),
            Trigger::Timer(name) => {
                let _ = write!(described, "timer `{name}`");
            }
            Trigger::Action(name) => {
                let _ = write!(described, "action `{name}`");
            }
        }
    }
    described
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::backend::model::build_model;
    use crate::frontend::ast::{
        Program, Reaction, Reactor, StateVar, TargetProperties, TimeUnit, TimeValue, Timer,
        TypeDescriptor, Value,
    };

    fn clock_program() -> Program {
        Program {
            reactors: vec![Reactor {
                name: "Clock".into(),
                params: Vec::new(),
                state: vec![StateVar {
                    name: "count".into(),
                    ty: TypeDescriptor::Scalar("u64".into()),
                    init: Value::Code("0".into()),
                }],
                timers: vec![Timer {
                    name: "tick".into(),
                    offset: TimeValue::new(0, TimeUnit::Unspecified),
                    period: Some(TimeValue::new(100, TimeUnit::Millis)),
                }],
                actions: Vec::new(),
                reactions: vec![Reaction {
                    triggers: vec![Trigger::Timer("tick".into())],
                    body: "self.count += 1;".into(),
                }],
            }],
            main: Some("Clock".into()),
            properties: TargetProperties::default(),
        }
    }

    #[test]
    fn source_builder_indents_blocks() {
        let mut out = SourceBuilder::new();
        out.block("fn main() {", "}", |out| {
            out.line("let x = 1;");
        });
        assert_eq!(out.finish(), "fn main() {\n    let x = 1;\n}\n");
    }

    #[test]
    fn reactor_module_renders_through_the_type_system() {
        let model = build_model(&clock_program());
        let mut reporter = Reporter::new();
        let code = reactor_module(&model.reactors[0], Target::Rust.types(), &mut reporter);

        assert!(code.contains("pub struct Clock {"));
        assert!(code.contains("count: u64,"));
        assert!(code.contains("pub const TICK_OFFSET: Duration = Duration::from_secs(0);"));
        assert!(code.contains("pub const TICK_PERIOD: Duration = Duration::from_millis(100);"));
        assert!(code.contains("pub fn reaction_0(&mut self, ctx: &mut Context) {"));
        assert!(code.contains("self.count += 1;"));
        assert!(!reporter.errors_occurred());
    }

    #[test]
    fn unknown_timer_trigger_is_reported_but_still_emitted() {
        let mut program = clock_program();
        program.reactors[0].reactions[0].triggers = vec![Trigger::Timer("missing".into())];
        let model = build_model(&program);
        let mut reporter = Reporter::new();
        let code = reactor_module(&model.reactors[0], Target::Rust.types(), &mut reporter);

        assert!(reporter.errors_occurred());
        assert!(code.contains("pub struct Clock {"));
    }

    #[test]
    fn emit_project_writes_manifest_main_and_reactor_modules() {
        let dir = std::env::temp_dir().join(format!("rillc_emit_{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);

        let model = build_model(&clock_program());
        let mut reporter = Reporter::new();
        emit_project(&model, Target::Rust.types(), &dir, &mut reporter).expect("emission failed");

        let manifest = fs::read_to_string(dir.join("Cargo.toml")).expect("manifest missing");
        assert!(manifest.contains("name = \"clock\""));
        assert!(manifest.contains("rill-runtime"));

        let main_rs = fs::read_to_string(dir.join("src/main.rs")).expect("main.rs missing");
        assert!(main_rs.contains("mod clock;"));
        assert!(main_rs.contains("clock::Clock::new()"));

        assert!(dir.join("src/clock.rs").exists());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn non_rust_targets_are_an_explicit_unsupported_error() {
        let dir = std::env::temp_dir().join(format!("rillc_emit_cpp_{}", std::process::id()));
        let model = build_model(&clock_program());
        let mut reporter = Reporter::new();
        let err = emit_project(&model, Target::Cpp.types(), &dir, &mut reporter).unwrap_err();
        assert!(matches!(err, GenerationError::Unsupported(_)));
        assert!(!dir.exists());
    }
}
