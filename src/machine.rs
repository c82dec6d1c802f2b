//! The step-execution engine and the machine configuration it drives.
//!
//! [`step`] is the engine proper: a pure function computing one deterministic
//! transition. [`Machine`] is the configuration object a driver owns,
//! applying each [`StepResult`] and tracking step count, status, and the
//! last message.

use crate::types::{
    HaltStates, Move, Status, Step, StepResult, TransitionTable, Verdict, BLANK_SYMBOL,
};

/// Builds the initial tape from seed text.
///
/// An empty seed yields a single blank cell; otherwise every character becomes
/// one tape cell.
pub fn seed_tape(input: &str) -> Vec<char> {
    if input.is_empty() {
        vec![BLANK_SYMBOL]
    } else {
        input.chars().collect()
    }
}

/// Computes one transition of the machine.
///
/// Returns `None` when `state` is already a halting state: nothing to do, and
/// the caller must treat it as a terminal no-op rather than an error. In every
/// other case it returns a [`StepResult`] holding the successor configuration:
///
/// * If the table has no entry for (state, read symbol), the machine
///   reject-halts in place. This is a defined termination, not a failure.
/// * Otherwise the transition's symbol is written, the head moves, and the
///   status is [`Status::Running`] unless the next state is a halting state,
///   in which case its [`Verdict`] decides accept or reject.
///
/// The inputs are never mutated; the result carries a fresh tape, normalized
/// so that `head` is a valid index. `head` may be negative on the way in —
/// the tape is blank-extended at whichever end the head has left, both before
/// reading and again after the move.
pub fn step(
    state: &str,
    tape: &[char],
    head: isize,
    table: &TransitionTable,
    halt_states: &HaltStates,
) -> Option<StepResult> {
    if halt_states.contains(state) {
        return None;
    }

    let mut tape = tape.to_vec();
    let mut head = head;
    normalize(&mut tape, &mut head);
    let position = head as usize;

    let read = tape[position];
    let Some(transition) = table.get(state, read) else {
        return Some(StepResult {
            next_state: state.to_string(),
            tape,
            head: position,
            status: Status::HaltedReject,
            message: format!(
                "Halted (Reject): no transition for state \"{state}\" and symbol '{read}'."
            ),
        });
    };

    tape[position] = transition.write;
    let mut head = position as isize
        + match transition.movement {
            Move::Left => -1,
            Move::Right => 1,
            Move::Stay => 0,
        };
    normalize(&mut tape, &mut head);

    let next_state = transition.next_state.clone();
    let (status, message) = match halt_states.verdict(&next_state) {
        Some(Verdict::Accept) => (
            Status::HaltedAccept,
            format!("Halted (Accept): reached halt state \"{next_state}\"."),
        ),
        Some(Verdict::Reject) => (
            Status::HaltedReject,
            format!("Halted (Reject): reached halt state \"{next_state}\"."),
        ),
        None => (
            Status::Running,
            format!(
                "Read '{read}', wrote '{}', moved {}.",
                transition.write, transition.movement
            ),
        ),
    };

    Some(StepResult {
        next_state,
        tape,
        head: head as usize,
        status,
        message,
    })
}

/// Blank-extends the tape until `head` indexes a real cell. A single step can
/// push the head past either end by at most one cell, but seed positions may
/// be further out.
fn normalize(tape: &mut Vec<char>, head: &mut isize) {
    while *head < 0 {
        tape.insert(0, BLANK_SYMBOL);
        *head += 1;
    }
    while *head >= tape.len() as isize {
        tape.push(BLANK_SYMBOL);
    }
}

/// A machine configuration: tape, head, current state, step count, status and
/// last message, bound to the table and halt states it runs against.
///
/// Mutated exclusively through [`Machine::step`]; [`Machine::reset`] replaces
/// the configuration wholesale from the stored seed input and start state.
pub struct Machine {
    table: TransitionTable,
    halt_states: HaltStates,
    state: String,
    tape: Vec<char>,
    head: usize,
    steps: usize,
    status: Status,
    message: String,
    seed: String,
    start_state: String,
}

impl Machine {
    /// Creates a fresh configuration in [`Status::Idle`] with the head at
    /// position 0 of the seeded tape.
    pub fn new(
        table: TransitionTable,
        halt_states: HaltStates,
        input: &str,
        start_state: &str,
    ) -> Self {
        Self {
            table,
            halt_states,
            state: start_state.to_string(),
            tape: seed_tape(input),
            head: 0,
            steps: 0,
            status: Status::Idle,
            message: "Ready.".to_string(),
            seed: input.to_string(),
            start_state: start_state.to_string(),
        }
    }

    /// Advances the machine by one transition.
    ///
    /// Once a terminal status is reached every further call is a
    /// [`Step::Noop`]; the only way forward is [`Machine::reset`]. Schedulers
    /// driving continuous runs must stop their cadence when this returns
    /// anything other than [`Step::Continue`].
    pub fn step(&mut self) -> Step {
        if self.status.is_terminal() {
            return Step::Noop;
        }

        match step(
            &self.state,
            &self.tape,
            self.head as isize,
            &self.table,
            &self.halt_states,
        ) {
            None => {
                let verdict = self
                    .halt_states
                    .verdict(&self.state)
                    .unwrap_or(Verdict::Reject);
                self.status = verdict.into();
                self.message =
                    format!("Already halted: state \"{}\" is a halt state.", self.state);
                Step::Noop
            }
            Some(result) => {
                self.state = result.next_state;
                self.tape = result.tape;
                self.head = result.head;
                self.status = result.status;
                self.message = result.message;
                self.steps += 1;

                match self.status {
                    Status::HaltedAccept => Step::Halt(Verdict::Accept),
                    Status::HaltedReject => Step::Halt(Verdict::Reject),
                    _ => Step::Continue,
                }
            }
        }
    }

    /// Discards the configuration and restarts from the seed input and start
    /// state.
    pub fn reset(&mut self) {
        self.state = self.start_state.clone();
        self.tape = seed_tape(&self.seed);
        self.head = 0;
        self.steps = 0;
        self.status = Status::Idle;
        self.message = "Reset to initial configuration.".to_string();
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn tape(&self) -> &[char] {
        &self.tape
    }

    /// The tape rendered as a string, one character per cell.
    pub fn tape_string(&self) -> String {
        self.tape.iter().collect()
    }

    pub fn head(&self) -> usize {
        self.head
    }

    pub fn step_count(&self) -> usize {
        self.steps
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether no further progress is possible: either a step already reached
    /// a terminal status, or the current state is itself a halting state.
    pub fn is_halted(&self) -> bool {
        self.status.is_terminal() || self.halt_states.contains(&self.state)
    }

    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    pub fn halt_states(&self) -> &HaltStates {
        &self.halt_states
    }
}
