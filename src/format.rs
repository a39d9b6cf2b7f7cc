//! Textual encoding and decoding of automata.
//!
//! The description format has four header lines followed by the transitions:
//!
//! ```text
//! line 1: comma-separated state names
//! line 2: comma-separated alphabet symbols
//! line 3: comma-separated accepting state names (may be blank)
//! line 4: initial state name
//! line 5..: one transition "state,symbol->target" per line; a blank line
//!           terminates the list
//! ```
//!
//! Decoding rejects malformed text before the model is constructed, so
//! [`MalformedInput`] and the model's [`InvalidAutomaton`] stay distinct
//! error kinds. Encoding emits the same shape in canonical order, making the
//! output deterministic and [`parse`]/[`render`] mutually inverse.

use std::error::Error;
use std::fmt::Display;

use indexmap::IndexSet;
use itertools::Itertools;

use crate::{Dfa, DfaBuilder, InvalidAutomaton};

/// Text that does not decode into a well-formed automaton description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedInput {
    /// A required line is absent. Carries the name of the missing field.
    MissingLine(&'static str),
    /// A required field or list item is empty.
    EmptyField(&'static str),
    /// A state name occurs twice in the state list.
    DuplicateState(String),
    /// A symbol occurs twice in the alphabet list.
    DuplicateSymbol(String),
    /// A transition line is not of the form `state,symbol->target`.
    BadTransition(String),
}

impl Display for MalformedInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MalformedInput::MissingLine(what) => write!(f, "missing {} line", what),
            MalformedInput::EmptyField(what) => write!(f, "empty {}", what),
            MalformedInput::DuplicateState(name) => {
                write!(f, "state '{}' is declared twice", name)
            }
            MalformedInput::DuplicateSymbol(name) => {
                write!(f, "symbol '{}' is declared twice", name)
            }
            MalformedInput::BadTransition(line) => {
                write!(f, "malformed transition line '{}'", line)
            }
        }
    }
}

impl Error for MalformedInput {}

/// Failure to decode an automaton description: either the text itself is
/// malformed, or it decodes into declarations that violate a model
/// invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    Malformed(MalformedInput),
    Invalid(InvalidAutomaton),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::Malformed(e) => write!(f, "malformed input: {}", e),
            ParseError::Invalid(e) => write!(f, "invalid automaton: {}", e),
        }
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ParseError::Malformed(e) => Some(e),
            ParseError::Invalid(e) => Some(e),
        }
    }
}

impl From<MalformedInput> for ParseError {
    fn from(e: MalformedInput) -> Self {
        ParseError::Malformed(e)
    }
}

impl From<InvalidAutomaton> for ParseError {
    fn from(e: InvalidAutomaton) -> Self {
        ParseError::Invalid(e)
    }
}

/// Splits a required comma-separated line into its trimmed items.
fn list<'a>(line: Option<&'a str>, what: &'static str) -> Result<Vec<&'a str>, MalformedInput> {
    let line = line.ok_or(MalformedInput::MissingLine(what))?.trim();
    if line.is_empty() {
        return Err(MalformedInput::EmptyField(what));
    }
    let mut items = Vec::new();
    for item in line.split(',') {
        let item = item.trim();
        if item.is_empty() {
            return Err(MalformedInput::EmptyField(what));
        }
        items.push(item);
    }
    Ok(items)
}

/// Decodes an automaton description.
///
/// All text is read and checked before the model is constructed: malformed
/// text surfaces as [`ParseError::Malformed`], while declarations that
/// violate a model invariant surface as [`ParseError::Invalid`] from
/// [`DfaBuilder::build`].
pub fn parse(input: &str) -> Result<Dfa, ParseError> {
    let mut lines = input.lines();
    let mut builder = DfaBuilder::new();

    let mut seen = IndexSet::new();
    for state in list(lines.next(), "state list")? {
        if !seen.insert(state) {
            return Err(MalformedInput::DuplicateState(state.to_string()).into());
        }
        builder.state(state);
    }

    let mut seen = IndexSet::new();
    for symbol in list(lines.next(), "alphabet")? {
        if !seen.insert(symbol) {
            return Err(MalformedInput::DuplicateSymbol(symbol.to_string()).into());
        }
        builder.symbol(symbol);
    }

    // The accepting line is positional and may be blank: an automaton
    // without accepting states is valid.
    let accepting = lines
        .next()
        .ok_or(MalformedInput::MissingLine("accepting-state list"))?;
    if !accepting.trim().is_empty() {
        for state in list(Some(accepting), "accepting-state list")? {
            builder.accepting(state);
        }
    }

    let initial = lines
        .next()
        .ok_or(MalformedInput::MissingLine("initial state"))?
        .trim();
    if initial.is_empty() {
        return Err(MalformedInput::EmptyField("initial state").into());
    }
    builder.initial(initial);

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            break;
        }
        let (left, target) = line
            .split_once("->")
            .ok_or_else(|| MalformedInput::BadTransition(line.to_string()))?;
        let (state, symbol) = left
            .split_once(',')
            .ok_or_else(|| MalformedInput::BadTransition(line.to_string()))?;
        let (state, symbol, target) = (state.trim(), symbol.trim(), target.trim());
        if state.is_empty() || symbol.is_empty() || target.is_empty() {
            return Err(MalformedInput::BadTransition(line.to_string()).into());
        }
        builder.transition(state, symbol, target);
    }

    Ok(builder.build()?)
}

/// Encodes an automaton in the same shape [`parse`] reads, in canonical
/// order: state list, alphabet, accepting states, initial state, then one
/// transition per line grouped by source state.
pub fn render(dfa: &Dfa) -> String {
    let mut out = String::new();
    out.push_str(&dfa.states().map(|q| dfa.state_name(q)).join(","));
    out.push('\n');
    out.push_str(&dfa.symbols().map(|s| dfa.symbol_name(s)).join(","));
    out.push('\n');
    out.push_str(&dfa.accepting().map(|q| dfa.state_name(q)).join(","));
    out.push('\n');
    out.push_str(dfa.state_name(dfa.initial()));
    out.push('\n');
    for q in dfa.states() {
        for s in dfa.symbols() {
            out.push_str(&format!(
                "{},{}->{}\n",
                dfa.state_name(q),
                dfa.symbol_name(s),
                dfa.state_name(dfa.successor(q, s))
            ));
        }
    }
    out
}
