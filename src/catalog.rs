//! Embedded demo machines.
//!
//! The rule-text format carries no metadata, so each entry pairs its rule text
//! with the seed tape, start state and halt labels a driver needs to run it.

use crate::machine::Machine;
use crate::parser::parse;
use crate::types::{HaltStates, ParseError, TransitionTable};

/// A ready-to-run demo machine.
#[derive(Debug, Clone, Copy)]
pub struct DemoMachine {
    pub name: &'static str,
    pub description: &'static str,
    pub rules: &'static str,
    pub seed: &'static str,
    pub start_state: &'static str,
    pub halt_labels: &'static [&'static str],
}

/// The built-in demos, embedded at compile time.
pub const DEMOS: [DemoMachine; 3] = [
    DemoMachine {
        name: "bit-flipper",
        description: "Flips every bit on the tape, accepting on the first blank",
        rules: include_str!("../demos/bit-flipper.rules"),
        seed: "1011",
        start_state: "q0",
        halt_labels: &["halt-accept", "halt-reject"],
    },
    DemoMachine {
        name: "binary-increment",
        description: "Adds one to a binary number",
        rules: include_str!("../demos/binary-increment.rules"),
        seed: "1011",
        start_state: "seek",
        halt_labels: &["done-accept"],
    },
    DemoMachine {
        name: "parity",
        description: "Accepts tapes holding an even number of 1s",
        rules: include_str!("../demos/parity.rules"),
        seed: "1001",
        start_state: "even",
        halt_labels: &["halt-accept", "halt-reject"],
    },
];

impl DemoMachine {
    /// Parses this demo's rule text.
    pub fn table(&self) -> Result<TransitionTable, ParseError> {
        parse(self.rules)
    }

    /// The demo's halt states, classified from its labels.
    pub fn halt_states(&self) -> HaltStates {
        HaltStates::infer(self.halt_labels.iter().copied())
    }

    /// Builds a fresh [`Machine`] for this demo.
    pub fn machine(&self) -> Result<Machine, ParseError> {
        Ok(Machine::new(
            self.table()?,
            self.halt_states(),
            self.seed,
            self.start_state,
        ))
    }
}

/// Looks up a demo by name.
pub fn find(name: &str) -> Option<&'static DemoMachine> {
    DEMOS.iter().find(|demo| demo.name == name)
}

/// The names of all built-in demos.
pub fn names() -> Vec<&'static str> {
    DEMOS.iter().map(|demo| demo.name).collect()
}
