//! Parser for transition rule text.
//!
//! The wire format is one rule per line, `(State, R) -> (State, W, M)`, with
//! `//` or `#` comment lines and blank lines ignored. Parsing builds a
//! [`TransitionTable`] and stops at the first malformed line, over-long
//! symbol, or duplicate (state, symbol) key.

use crate::types::{Move, ParseError, SymbolField, Transition, TransitionTable};
use regex::Regex;

lazy_static::lazy_static! {
    static ref RULE_RE: Regex = Regex::new(
        r"^\s*\(\s*([^,]+)\s*,\s*([^)]+)\s*\)\s*->\s*\(\s*([^,]+)\s*,\s*([^,]+)\s*,\s*([LRS])\s*\)\s*$"
    )
    .unwrap();
}

/// Parses transition rule text into a [`TransitionTable`].
///
/// The parser is pure: the same text always yields the same table. On failure
/// the returned [`ParseError`] carries the 1-based line number of the first
/// offending line, and the caller must treat the whole text as invalid.
pub fn parse(text: &str) -> Result<TransitionTable, ParseError> {
    let mut table = TransitionTable::new();

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with("//") || trimmed.starts_with('#') {
            continue;
        }

        let caps = RULE_RE.captures(trimmed).ok_or_else(|| ParseError::Syntax {
            line,
            text: trimmed.to_string(),
        })?;

        let state = caps[1].trim().to_string();
        let next_state = caps[3].trim().to_string();
        if !valid_label(&state) || !valid_label(&next_state) {
            return Err(ParseError::Syntax {
                line,
                text: trimmed.to_string(),
            });
        }

        let read = single_char(caps[2].trim(), SymbolField::Read, line)?;
        let write = single_char(caps[4].trim(), SymbolField::Write, line)?;
        let movement = match &caps[5] {
            "L" => Move::Left,
            "R" => Move::Right,
            _ => Move::Stay,
        };

        let transition = Transition {
            next_state,
            write,
            movement,
        };
        if !table.insert(&state, read, transition) {
            return Err(ParseError::DuplicateKey {
                line,
                state,
                symbol: read,
            });
        }
    }

    Ok(table)
}

/// State labels must be non-empty and must not contain parentheses. Commas are
/// already impossible inside a label capture.
fn valid_label(label: &str) -> bool {
    !label.is_empty() && !label.contains(['(', ')'])
}

fn single_char(value: &str, field: SymbolField, line: usize) -> Result<char, ParseError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ParseError::SymbolLength {
            line,
            field,
            value: value.to_string(),
        }),
    }
}
