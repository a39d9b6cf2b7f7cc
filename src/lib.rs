//! Minimization of complete deterministic finite automata.
//!
//! The crate implements the classical minimization pipeline: a DFA is first
//! restricted to the states reachable from its initial state, then the
//! distinguishability relation over state pairs is computed by table filling
//! (Moore's algorithm), and finally each equivalence class is collapsed onto a
//! single representative state. The result is the unique (up to state
//! renaming) minimal automaton recognizing the same language.
//!
//! The [`Dfa`] value is immutable after construction and is only obtainable
//! through [`DfaBuilder`], which validates all structural invariants: the
//! initial state and every accepting state must be declared, and the
//! transition function must be total over states × symbols with every target
//! declared. All algorithms rely on these invariants unconditionally.
//!
//! The [`format`] module decodes and encodes the textual automaton
//! description; [`minimize_text`] runs the whole pipeline on such a
//! description in one call.

pub mod dot;
pub mod format;
pub mod minimize;

use std::error::Error;
use std::fmt::Display;

use bit_set::BitSet;
use indexmap::IndexSet;
use itertools::Itertools;
use quickcheck::Arbitrary;

/// Every state of an automaton is identified by its position in the canonical
/// state enumeration.
pub type StateId = usize;

/// Every alphabet symbol is identified by its position in the canonical
/// symbol enumeration.
pub type SymbolId = usize;

/// Violation of a structural invariant detected when building a [`Dfa`].
///
/// Every variant carries the state and symbol names needed to locate the
/// offending declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidAutomaton {
    /// No initial state was set.
    NoInitialState,
    /// The initial state is not in the declared state set.
    UndeclaredInitial(String),
    /// An accepting state is not in the declared state set.
    UndeclaredAccepting(String),
    /// A transition starts in a state that was never declared.
    UndeclaredSource { state: String, symbol: String },
    /// A transition is labelled with a symbol that is not in the alphabet.
    UndeclaredSymbol { state: String, symbol: String },
    /// A transition targets a state that was never declared.
    UndeclaredTarget {
        state: String,
        symbol: String,
        target: String,
    },
    /// Two transitions give the same (state, symbol) pair different targets.
    ConflictingTransition { state: String, symbol: String },
    /// A declared (state, symbol) pair has no transition at all.
    MissingTransition { state: String, symbol: String },
}

impl Display for InvalidAutomaton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidAutomaton::NoInitialState => write!(f, "no initial state set"),
            InvalidAutomaton::UndeclaredInitial(name) => {
                write!(f, "initial state '{}' is not declared", name)
            }
            InvalidAutomaton::UndeclaredAccepting(name) => {
                write!(f, "accepting state '{}' is not declared", name)
            }
            InvalidAutomaton::UndeclaredSource { state, symbol } => {
                write!(
                    f,
                    "transition '{},{}' starts in an undeclared state",
                    state, symbol
                )
            }
            InvalidAutomaton::UndeclaredSymbol { state, symbol } => {
                write!(
                    f,
                    "transition '{},{}' uses a symbol outside the alphabet",
                    state, symbol
                )
            }
            InvalidAutomaton::UndeclaredTarget {
                state,
                symbol,
                target,
            } => {
                write!(
                    f,
                    "transition '{},{}' targets undeclared state '{}'",
                    state, symbol, target
                )
            }
            InvalidAutomaton::ConflictingTransition { state, symbol } => {
                write!(f, "conflicting transitions for '{},{}'", state, symbol)
            }
            InvalidAutomaton::MissingTransition { state, symbol } => {
                write!(f, "missing transition for '{},{}'", state, symbol)
            }
        }
    }
}

impl Error for InvalidAutomaton {}

/// A complete deterministic finite automaton.
///
/// State and symbol names are kept in canonical (lexicographic) order; a
/// [`StateId`] or [`SymbolId`] is a position in the respective table. The
/// transition table is total: `trans[q][s]` is defined for every state `q`
/// and symbol `s`. Values of this type are immutable; transformations such
/// as [`minimize::minimize`] produce a fresh automaton.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dfa {
    /// State names in canonical order.
    states: Vec<String>,
    /// Symbol names in canonical order.
    symbols: Vec<String>,
    /// Accepting states.
    accepting: BitSet,
    /// Initial state.
    initial: StateId,
    /// `trans[q][s]` is the successor of `q` on the symbol with id `s`.
    trans: Vec<Vec<StateId>>,
}

impl Dfa {
    /// Returns the number of states in the automaton.
    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    /// Returns the number of symbols in the alphabet.
    pub fn num_symbols(&self) -> usize {
        self.symbols.len()
    }

    /// Returns an iterator over the state ids, in canonical order.
    pub fn states(&self) -> impl Iterator<Item = StateId> {
        0..self.states.len()
    }

    /// Returns an iterator over the symbol ids, in canonical order.
    pub fn symbols(&self) -> impl Iterator<Item = SymbolId> + Clone {
        0..self.symbols.len()
    }

    /// Returns the name of a state.
    pub fn state_name(&self, state: StateId) -> &str {
        &self.states[state]
    }

    /// Returns the name of a symbol.
    pub fn symbol_name(&self, symbol: SymbolId) -> &str {
        &self.symbols[symbol]
    }

    /// Returns the id of the symbol with the given name, if it is in the
    /// alphabet.
    pub fn symbol_id(&self, name: &str) -> Option<SymbolId> {
        self.symbols.binary_search_by(|s| s.as_str().cmp(name)).ok()
    }

    /// Returns the id of the state with the given name, if it is declared.
    pub fn state_id(&self, name: &str) -> Option<StateId> {
        self.states.binary_search_by(|s| s.as_str().cmp(name)).ok()
    }

    /// Returns the initial state.
    pub fn initial(&self) -> StateId {
        self.initial
    }

    /// Returns if a state is an accepting state.
    pub fn is_accepting(&self, state: StateId) -> bool {
        self.accepting.contains(state)
    }

    /// Returns the number of accepting states.
    pub fn num_accepting(&self) -> usize {
        self.accepting.len()
    }

    /// Returns an iterator over the accepting states, in canonical order.
    pub fn accepting(&self) -> impl Iterator<Item = StateId> + '_ {
        self.accepting.iter()
    }

    /// Returns the successor of a state on a symbol. The transition table is
    /// total, so this is defined for every declared state and symbol.
    ///
    /// Panics if the state or symbol id is out of range.
    pub fn successor(&self, state: StateId, symbol: SymbolId) -> StateId {
        self.trans[state][symbol]
    }

    /// Runs the automaton on a word and returns if it ends in an accepting
    /// state.
    ///
    /// Panics if a symbol id in the word is out of range.
    pub fn accepts(&self, word: &[SymbolId]) -> bool {
        let mut current = self.initial;
        for &s in word {
            current = self.trans[current][s];
        }
        self.accepting.contains(current)
    }
}

impl Display for Dfa {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "DFA {{")?;
        writeln!(f, "\tStates:")?;
        for q in self.states() {
            write!(f, "\t\t{}: ", self.state_name(q))?;
            for s in self.symbols() {
                write!(
                    f,
                    "{} -> {}, ",
                    self.symbol_name(s),
                    self.state_name(self.successor(q, s))
                )?;
            }
            writeln!(f)?;
        }
        writeln!(f, "\tInitial: {}", self.state_name(self.initial))?;
        writeln!(
            f,
            "\tAccepting: {{{}}}",
            self.accepting().map(|q| self.state_name(q)).join(", ")
        )?;
        writeln!(f, "}}")
    }
}

/// Builder collecting name-based declarations for a [`Dfa`].
///
/// Declarations can be added in any order; [`DfaBuilder::build`] sorts state
/// and symbol names into their canonical order and validates every invariant
/// of the model. This is the only way to obtain a `Dfa`.
#[derive(Debug, Clone, Default)]
pub struct DfaBuilder {
    states: IndexSet<String>,
    symbols: IndexSet<String>,
    accepting: IndexSet<String>,
    initial: Option<String>,
    transitions: Vec<(String, String, String)>,
}

impl DfaBuilder {
    /// Creates a builder with no declarations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a state. Re-declaring a state has no effect.
    pub fn state(&mut self, name: impl Into<String>) -> &mut Self {
        self.states.insert(name.into());
        self
    }

    /// Declares an alphabet symbol. Re-declaring a symbol has no effect.
    pub fn symbol(&mut self, name: impl Into<String>) -> &mut Self {
        self.symbols.insert(name.into());
        self
    }

    /// Marks a state as accepting.
    pub fn accepting(&mut self, name: impl Into<String>) -> &mut Self {
        self.accepting.insert(name.into());
        self
    }

    /// Sets the initial state, replacing any earlier choice.
    pub fn initial(&mut self, name: impl Into<String>) -> &mut Self {
        self.initial = Some(name.into());
        self
    }

    /// Declares the transition `from --on--> to`.
    pub fn transition(
        &mut self,
        from: impl Into<String>,
        on: impl Into<String>,
        to: impl Into<String>,
    ) -> &mut Self {
        self.transitions.push((from.into(), on.into(), to.into()));
        self
    }

    /// Validates all declarations and builds the automaton.
    ///
    /// Fails with [`InvalidAutomaton`] if the initial state is missing or
    /// undeclared, an accepting state is undeclared, a transition names an
    /// undeclared state or symbol, two transitions conflict, or the
    /// transition function is not total over states × symbols.
    pub fn build(&self) -> Result<Dfa, InvalidAutomaton> {
        let states: Vec<String> = self.states.iter().cloned().sorted().collect();
        let symbols: Vec<String> = self.symbols.iter().cloned().sorted().collect();
        let state_id = |name: &str| states.binary_search_by(|s| s.as_str().cmp(name)).ok();
        let symbol_id = |name: &str| symbols.binary_search_by(|s| s.as_str().cmp(name)).ok();

        let initial_name = self
            .initial
            .as_ref()
            .ok_or(InvalidAutomaton::NoInitialState)?;
        let initial = state_id(initial_name)
            .ok_or_else(|| InvalidAutomaton::UndeclaredInitial(initial_name.clone()))?;

        let mut accepting = BitSet::with_capacity(states.len());
        for name in &self.accepting {
            let q = state_id(name)
                .ok_or_else(|| InvalidAutomaton::UndeclaredAccepting(name.clone()))?;
            accepting.insert(q);
        }

        let mut table: Vec<Vec<Option<StateId>>> = vec![vec![None; symbols.len()]; states.len()];
        for (from, on, to) in &self.transitions {
            let q = state_id(from).ok_or_else(|| InvalidAutomaton::UndeclaredSource {
                state: from.clone(),
                symbol: on.clone(),
            })?;
            let s = symbol_id(on).ok_or_else(|| InvalidAutomaton::UndeclaredSymbol {
                state: from.clone(),
                symbol: on.clone(),
            })?;
            let t = state_id(to).ok_or_else(|| InvalidAutomaton::UndeclaredTarget {
                state: from.clone(),
                symbol: on.clone(),
                target: to.clone(),
            })?;
            match table[q][s] {
                Some(prev) if prev != t => {
                    return Err(InvalidAutomaton::ConflictingTransition {
                        state: from.clone(),
                        symbol: on.clone(),
                    })
                }
                _ => table[q][s] = Some(t),
            }
        }

        // Totality: every declared (state, symbol) pair must be filled.
        let trans = states
            .iter()
            .enumerate()
            .map(|(q, state)| {
                symbols
                    .iter()
                    .enumerate()
                    .map(|(s, symbol)| {
                        table[q][s].ok_or_else(|| InvalidAutomaton::MissingTransition {
                            state: state.clone(),
                            symbol: symbol.clone(),
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Dfa {
            states,
            symbols,
            accepting,
            initial,
            trans,
        })
    }
}

/// Decodes a textual automaton description, minimizes it, and encodes the
/// result. This is the one-call form of the full pipeline; on any decoding or
/// validation error no output is produced.
pub fn minimize_text(input: &str) -> Result<String, format::ParseError> {
    let dfa = format::parse(input)?;
    Ok(format::render(&minimize::minimize(&dfa)))
}

impl Arbitrary for Dfa {
    /// Generates a small random automaton with a total transition function.
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let num_states = usize::arbitrary(g) % 6 + 1;
        let num_symbols = usize::arbitrary(g) % 3 + 1;
        let symbols = ["a", "b", "c"];

        let mut builder = DfaBuilder::new();
        for q in 0..num_states {
            builder.state(format!("q{}", q));
            if bool::arbitrary(g) {
                builder.accepting(format!("q{}", q));
            }
        }
        for &s in symbols.iter().take(num_symbols) {
            builder.symbol(s);
        }
        builder.initial(format!("q{}", usize::arbitrary(g) % num_states));
        for q in 0..num_states {
            for &s in symbols.iter().take(num_symbols) {
                let t = usize::arbitrary(g) % num_states;
                builder.transition(format!("q{}", q), s, format!("q{}", t));
            }
        }
        // Total by construction, so building cannot fail.
        builder.build().unwrap()
    }
}
