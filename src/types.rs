//! Core data structures for the Turing machine simulator: tape symbols, moves,
//! the transition table, halt-state classification, step outcomes, and error types.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// The blank symbol for untouched tape cells.
///
/// Existing rule files spell blank as a literal `b`, so it is part of the wire
/// format and not configurable.
pub const BLANK_SYMBOL: char = 'b';

/// A head movement, one per applied transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Move {
    /// Move the head one cell to the left.
    Left,
    /// Move the head one cell to the right.
    Right,
    /// Keep the head where it is.
    Stay,
}

impl Move {
    /// The single-letter wire form (`L`, `R`, `S`).
    pub fn letter(self) -> char {
        match self {
            Move::Left => 'L',
            Move::Right => 'R',
            Move::Stay => 'S',
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// The right-hand side of a rule: what to do when a (state, symbol) key matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    /// The state the machine transitions to.
    pub next_state: String,
    /// The symbol written into the cell under the head.
    pub write: char,
    /// The head movement applied after writing.
    pub movement: Move,
}

/// A validated transition table: a partial function from (state, symbol) to
/// [`Transition`].
///
/// Built once per parse and immutable during execution. Each key maps to at
/// most one transition, which is what makes the machine deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransitionTable {
    rules: HashMap<String, HashMap<char, Transition>>,
    count: usize,
}

impl TransitionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a rule for `(state, symbol)`. Returns `false` without replacing
    /// anything if the key is already present (first occurrence wins).
    pub fn insert(&mut self, state: &str, symbol: char, transition: Transition) -> bool {
        let by_symbol = self.rules.entry(state.to_string()).or_default();
        if by_symbol.contains_key(&symbol) {
            return false;
        }
        by_symbol.insert(symbol, transition);
        self.count += 1;
        true
    }

    /// Looks up the transition for `(state, symbol)`, if any.
    pub fn get(&self, state: &str, symbol: char) -> Option<&Transition> {
        self.rules.get(state)?.get(&symbol)
    }

    pub fn contains(&self, state: &str, symbol: char) -> bool {
        self.get(state, symbol).is_some()
    }

    /// The number of rules in the table. Used for reporting only.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// The outcome a halt state stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Accept,
    Reject,
}

/// The set of halting states, each tagged with an explicit [`Verdict`].
///
/// Supplied by the driver, never parsed from rule text. Tagging the verdict per
/// label replaces the older convention of inferring it from the label's
/// spelling; [`HaltStates::infer`] keeps that convention available for drivers
/// that only have a plain list of labels.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HaltStates {
    verdicts: HashMap<String, Verdict>,
}

impl HaltStates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `label` as a halting state with an explicit verdict.
    pub fn tag(&mut self, label: impl Into<String>, verdict: Verdict) {
        self.verdicts.insert(label.into(), verdict);
    }

    /// Classifies a plain list of labels by the legacy naming convention:
    /// a label whose lowercase form contains `accept` is an accepting halt
    /// state, anything else rejects.
    pub fn infer<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut halt_states = Self::new();
        for label in labels {
            let label = label.into();
            let verdict = if label.to_lowercase().contains("accept") {
                Verdict::Accept
            } else {
                Verdict::Reject
            };
            halt_states.tag(label, verdict);
        }
        halt_states
    }

    pub fn contains(&self, label: &str) -> bool {
        self.verdicts.contains_key(label)
    }

    /// The verdict for `label`, or `None` if it is not a halting state.
    pub fn verdict(&self, label: &str) -> Option<Verdict> {
        self.verdicts.get(label).copied()
    }

    pub fn len(&self) -> usize {
        self.verdicts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verdicts.is_empty()
    }
}

/// The status of a machine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    /// Freshly reset, no step taken yet.
    Idle,
    /// The last step applied a transition into a non-halting state.
    Running,
    /// Terminated in an accepting halt state.
    HaltedAccept,
    /// Terminated in a rejecting halt state, or no transition applied.
    HaltedReject,
    /// The driver rejected the rule text; no valid table exists.
    Error,
}

impl Status {
    /// Whether no further step can change the configuration.
    pub fn is_terminal(self) -> bool {
        matches!(self, Status::HaltedAccept | Status::HaltedReject)
    }
}

impl From<Verdict> for Status {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Accept => Status::HaltedAccept,
            Verdict::Reject => Status::HaltedReject,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Status::Idle => "idle",
            Status::Running => "running",
            Status::HaltedAccept => "halted-accept",
            Status::HaltedReject => "halted-reject",
            Status::Error => "error",
        };
        write!(f, "{s}")
    }
}

/// Everything one engine step produces: the successor configuration fields plus
/// a human-readable account of what happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepResult {
    /// The state after the step. On a reject-halt with no matching rule this is
    /// the unchanged current state.
    pub next_state: String,
    /// The new tape. Always normalized: `head` is a valid index into it.
    pub tape: Vec<char>,
    /// The new head position.
    pub head: usize,
    /// `Running`, `HaltedAccept`, or `HaltedReject`.
    pub status: Status,
    /// What was read, written and moved, or why the machine halted.
    pub message: String,
}

/// The outcome of advancing a [`Machine`](crate::machine::Machine) by one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// A transition applied and the machine keeps running.
    Continue,
    /// This step reached a terminal status.
    Halt(Verdict),
    /// The machine was already halted; nothing was done.
    Noop,
}

/// Which single-character field of a rule failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolField {
    Read,
    Write,
}

impl fmt::Display for SymbolField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolField::Read => write!(f, "Read"),
            SymbolField::Write => write!(f, "Write"),
        }
    }
}

/// Errors produced while parsing transition rule text.
///
/// Parsing stops at the first error; there is no accumulation. Line numbers are
/// 1-based into the text handed to the parser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A non-comment line did not match `(state, read) -> (state, write, move)`.
    #[error("invalid transition format on line {line}: \"{text}\"")]
    Syntax { line: usize, text: String },
    /// A read or write symbol was not exactly one character after trimming.
    #[error("{field} symbol must be a single character on line {line}: \"{value}\"")]
    SymbolLength {
        line: usize,
        field: SymbolField,
        value: String,
    },
    /// The same (state, symbol) key was defined twice.
    #[error("duplicate transition key on line {line}: ({state}, {symbol})")]
    DuplicateKey {
        line: usize,
        state: String,
        symbol: char,
    },
}

/// Errors surfaced by the surrounding machinery (loading, parsing).
///
/// Execution itself has no error variants: a missing rule is a defined
/// terminal status, not a failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MachineError {
    #[error("rule parsing error: {0}")]
    Parse(#[from] ParseError),
    #[error("file error: {0}")]
    File(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_serialization() {
        let left = Move::Left;
        let right = Move::Right;

        let left_json = serde_json::to_string(&left).unwrap();
        let right_json = serde_json::to_string(&right).unwrap();

        assert_eq!(left_json, "\"Left\"");
        assert_eq!(right_json, "\"Right\"");

        let left_deserialized: Move = serde_json::from_str(&left_json).unwrap();
        let right_deserialized: Move = serde_json::from_str(&right_json).unwrap();

        assert_eq!(left, left_deserialized);
        assert_eq!(right, right_deserialized);
    }

    #[test]
    fn test_status_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_string(&Status::HaltedAccept).unwrap(),
            "\"halted-accept\""
        );
        assert_eq!(Status::HaltedReject.to_string(), "halted-reject");
    }

    #[test]
    fn test_table_insert_and_lookup() {
        let mut table = TransitionTable::new();
        let transition = Transition {
            next_state: "q1".to_string(),
            write: '0',
            movement: Move::Right,
        };

        assert!(table.insert("q0", '1', transition.clone()));
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("q0", '1'), Some(&transition));
        assert!(table.get("q0", '0').is_none());
        assert!(table.get("q1", '1').is_none());
    }

    #[test]
    fn test_table_first_occurrence_wins() {
        let mut table = TransitionTable::new();
        let first = Transition {
            next_state: "q1".to_string(),
            write: '0',
            movement: Move::Right,
        };
        let second = Transition {
            next_state: "q2".to_string(),
            write: '1',
            movement: Move::Left,
        };

        assert!(table.insert("q0", '1', first.clone()));
        assert!(!table.insert("q0", '1', second));
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("q0", '1'), Some(&first));
    }

    #[test]
    fn test_halt_states_infer_verdicts() {
        let halt_states = HaltStates::infer(["halt-accept", "halt-reject", "q2", "ACCEPTED"]);

        assert_eq!(halt_states.verdict("halt-accept"), Some(Verdict::Accept));
        assert_eq!(halt_states.verdict("ACCEPTED"), Some(Verdict::Accept));
        assert_eq!(halt_states.verdict("halt-reject"), Some(Verdict::Reject));
        assert_eq!(halt_states.verdict("q2"), Some(Verdict::Reject));
        assert_eq!(halt_states.verdict("q0"), None);
        assert!(!halt_states.contains("q0"));
    }

    #[test]
    fn test_halt_states_explicit_tag_overrides_spelling() {
        let mut halt_states = HaltStates::new();
        halt_states.tag("done", Verdict::Accept);
        halt_states.tag("acceptable-loss", Verdict::Reject);

        assert_eq!(halt_states.verdict("done"), Some(Verdict::Accept));
        assert_eq!(halt_states.verdict("acceptable-loss"), Some(Verdict::Reject));
    }

    #[test]
    fn test_error_display() {
        let error = ParseError::DuplicateKey {
            line: 2,
            state: "q0".to_string(),
            symbol: '1',
        };

        let error_msg = format!("{}", error);
        assert!(error_msg.contains("line 2"));
        assert!(error_msg.contains("(q0, 1)"));

        let wrapped: MachineError = error.into();
        assert!(format!("{}", wrapped).contains("rule parsing error"));
    }
}
