//! This crate provides the core logic for a single-tape deterministic Turing
//! machine simulator. It includes a parser for transition rule text, a pure
//! step-execution engine with an unbounded tape, a loader for rule files, and
//! a catalog of embedded demo machines.

pub mod catalog;
pub mod loader;
pub mod machine;
pub mod parser;
pub mod types;

/// Re-exports the demo catalog from the catalog module.
pub use catalog::{DemoMachine, DEMOS};
/// Re-exports the `RulesLoader` struct from the loader module.
pub use loader::RulesLoader;
/// Re-exports the step engine and machine configuration from the machine module.
pub use machine::{seed_tape, step, Machine};
/// Re-exports the `parse` function from the parser module.
pub use parser::parse;
/// Re-exports the core types used for machine definition and execution.
pub use types::{
    HaltStates, MachineError, Move, ParseError, Status, Step, StepResult, SymbolField, Transition,
    TransitionTable, Verdict, BLANK_SYMBOL,
};
