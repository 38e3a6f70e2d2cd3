//! The generation model and its builder.
//!
//! The model is the flattened, target-independent intermediate representation
//! the emitter renders from. Building it takes no design decisions away from
//! the emitter beyond flattening: reactors keep declaration order, reactions
//! get stable indices, and names are pre-normalized into module identifiers.
//! The model is immutable once built and owned by the driver for one run.

use crate::frontend::ast::{Action, Parameter, Program, Reaction, StateVar, TargetProperties, Timer};

/// Target-independent intermediate representation of one program.
#[derive(Debug)]
pub struct GenerationModel {
    pub reactors: Vec<ReactorModel>,
    /// Name of the resolved entry reactor. Absence is a legal state; the
    /// driver decides what to do about it before building the model.
    pub main: Option<String>,
    pub properties: TargetProperties,
}

impl GenerationModel {
    /// The reactor the generated executable starts, if one was resolved.
    pub fn main_reactor(&self) -> Option<&ReactorModel> {
        let name = self.main.as_deref()?;
        self.reactors.iter().find(|r| r.name == name)
    }
}

/// A flattened reactor definition.
#[derive(Debug)]
pub struct ReactorModel {
    /// Declared reactor name, e.g. `HelloWorld`.
    pub name: String,
    /// Module identifier derived from the name, e.g. `hello_world`.
    pub ident: String,
    pub params: Vec<Parameter>,
    pub state: Vec<StateVar>,
    pub timers: Vec<Timer>,
    pub actions: Vec<Action>,
    pub reactions: Vec<ReactionModel>,
}

/// A reaction with its stable index within the owning reactor.
#[derive(Debug)]
pub struct ReactionModel {
    pub index: usize,
    pub reaction: Reaction,
}

/// Flatten a validated program into the generation model.
///
/// Pure: no I/O, no diagnostics. The main reference is resolved against the
/// reactor set; a dangling reference (which validation would have rejected)
/// degrades to `None` rather than panicking.
pub fn build_model(program: &Program) -> GenerationModel {
    let reactors: Vec<ReactorModel> = program
        .reactors
        .iter()
        .map(|reactor| ReactorModel {
            name: reactor.name.clone(),
            ident: module_ident(&reactor.name),
            params: reactor.params.clone(),
            state: reactor.state.clone(),
            timers: reactor.timers.clone(),
            actions: reactor.actions.clone(),
            reactions: reactor
                .reactions
                .iter()
                .enumerate()
                .map(|(index, reaction)| ReactionModel {
                    index,
                    reaction: reaction.clone(),
                })
                .collect(),
        })
        .collect();

    let main = program
        .main
        .as_deref()
        .filter(|name| reactors.iter().any(|r| r.name == *name))
        .map(str::to_string);

    GenerationModel {
        reactors,
        main,
        properties: program.properties.clone(),
    }
}

/// Derive a snake_case module identifier from a reactor name.
pub fn module_ident(name: &str) -> String {
    let mut ident = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;
    for ch in name.chars() {
        if ch.is_uppercase() {
            if prev_lower {
                ident.push('_');
            }
            for lower in ch.to_lowercase() {
                ident.push(lower);
            }
            prev_lower = false;
        } else if ch.is_alphanumeric() {
            ident.push(ch);
            prev_lower = ch.is_lowercase() || ch.is_ascii_digit();
        } else {
            // spaces, dashes and other separators all become underscores
            if !ident.ends_with('_') && !ident.is_empty() {
                ident.push('_');
            }
            prev_lower = false;
        }
    }
    if ident.is_empty() {
        ident.push_str("reactor");
    }
    ident
}
