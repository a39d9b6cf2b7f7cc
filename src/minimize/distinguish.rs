//! Table-filling computation of distinguishable state pairs.
//!
//! Two states are distinguishable if some input suffix leads exactly one of
//! them to an accepting state. The relation over unordered pairs is computed
//! by Moore's algorithm: seed with the pairs whose acceptance status differs,
//! then propagate backwards through one-symbol lookahead until a full pass
//! adds no pair. The complement of the converged relation is the
//! Myhill-Nerode equivalence.

use bit_set::BitSet;
use itertools::Itertools;

use crate::{Dfa, StateId};

/// A symmetric relation over unordered state pairs, marking the pairs known
/// to be distinguishable.
///
/// Pairs are stored in a flat bitset indexed by the normalized pair
/// `(min, max)`, so `(p, q)` and `(q, p)` share one slot and lookups are
/// order-insensitive. The relation only ever grows.
#[derive(Debug, Clone, Default)]
pub struct Distinguishability {
    n: usize,
    marked: BitSet,
}

impl Distinguishability {
    fn new(n: usize) -> Self {
        Self {
            n,
            marked: BitSet::with_capacity(n * n),
        }
    }

    /// Returns the number of states the relation ranges over.
    pub fn num_states(&self) -> usize {
        self.n
    }

    /// Flat index of the unordered pair.
    fn index(&self, p: StateId, q: StateId) -> usize {
        let (lo, hi) = if p <= q { (p, q) } else { (q, p) };
        lo * self.n + hi
    }

    /// Marks the pair as distinguishable. Returns true if it was not marked
    /// before.
    fn mark(&mut self, p: StateId, q: StateId) -> bool {
        let index = self.index(p, q);
        self.marked.insert(index)
    }

    /// Returns if the pair has been marked distinguishable, in either order.
    pub fn distinguishable(&self, p: StateId, q: StateId) -> bool {
        self.marked.contains(self.index(p, q))
    }

    /// Returns if the two states are equivalent, i.e. identical or never
    /// marked distinguishable. Only meaningful once the relation has
    /// converged.
    pub fn equivalent(&self, p: StateId, q: StateId) -> bool {
        p == q || !self.distinguishable(p, q)
    }
}

/// Computes the distinguishability relation of the automaton.
///
/// The refinement loop runs full passes over all unmarked pairs with an
/// explicit changed flag and stops at the first pass that marks nothing.
/// Each productive pass marks at least one of at most n·(n-1)/2 pairs, so
/// the loop terminates after at most `n` passes.
pub fn distinguish(dfa: &Dfa) -> Distinguishability {
    let n = dfa.num_states();
    let mut rel = Distinguishability::new(n);

    // Base case: acceptance is the only zero-length distinguishing
    // observation.
    for (p, q) in (0..n).tuple_combinations() {
        if dfa.is_accepting(p) != dfa.is_accepting(q) {
            rel.mark(p, q);
        }
    }

    // One-symbol lookahead: a pair whose successors on some symbol are
    // already distinguishable is distinguishable itself.
    let mut changed = true;
    while changed {
        changed = false;
        for (p, q) in (0..n).tuple_combinations() {
            if rel.distinguishable(p, q) {
                continue;
            }
            for s in dfa.symbols() {
                if rel.distinguishable(dfa.successor(p, s), dfa.successor(q, s)) {
                    rel.mark(p, q);
                    changed = true;
                    break;
                }
            }
        }
    }
    rel
}
