//! Removal of states that are unreachable from the initial state.

use std::collections::VecDeque;

use bit_set::BitSet;

use crate::{Dfa, StateId};

/// Restricts the automaton to the states reachable from the initial state.
///
/// The reachable set is closed under all transitions, so every transition of
/// the restricted automaton stays inside it; dropping a state drops its
/// outgoing transitions with it. Canonical state order is preserved.
/// Runs one breadth-first traversal, enqueueing every state at most once.
pub fn trim_unreachable(dfa: &Dfa) -> Dfa {
    let mut reachable = BitSet::with_capacity(dfa.num_states());
    let mut queue = VecDeque::new();
    reachable.insert(dfa.initial());
    queue.push_back(dfa.initial());

    while let Some(q) = queue.pop_front() {
        for s in dfa.symbols() {
            let dest = dfa.successor(q, s);
            if reachable.insert(dest) {
                queue.push_back(dest);
            }
        }
    }

    if reachable.len() == dfa.num_states() {
        return dfa.clone();
    }

    // Bitset iteration is ascending, so the canonical name order carries
    // over to the renumbered states.
    let mut map: Vec<Option<StateId>> = vec![None; dfa.num_states()];
    for (new_id, old_id) in reachable.iter().enumerate() {
        map[old_id] = Some(new_id);
    }

    let mut states = Vec::with_capacity(reachable.len());
    let mut accepting = BitSet::with_capacity(reachable.len());
    let mut trans = Vec::with_capacity(reachable.len());
    for old_id in reachable.iter() {
        let new_id = states.len();
        states.push(dfa.state_name(old_id).to_string());
        if dfa.is_accepting(old_id) {
            accepting.insert(new_id);
        }
        // Targets of reachable states are reachable themselves.
        trans.push(
            dfa.symbols()
                .map(|s| map[dfa.successor(old_id, s)].unwrap())
                .collect(),
        );
    }

    Dfa {
        states,
        symbols: dfa.symbols.clone(),
        accepting,
        initial: map[dfa.initial()].unwrap(),
        trans,
    }
}

#[cfg(test)]
mod tests {
    use crate::DfaBuilder;

    use super::*;

    #[test]
    fn test_trim_all_reachable() {
        let mut b = DfaBuilder::new();
        b.state("q0").state("q1").symbol("a").initial("q0");
        b.transition("q0", "a", "q1").transition("q1", "a", "q0");
        let dfa = b.build().unwrap();
        let trimmed = trim_unreachable(&dfa);
        assert_eq!(trimmed, dfa);
    }

    #[test]
    fn test_trim_removes_unreachable() {
        // q2 is never reached from q0.
        let mut b = DfaBuilder::new();
        b.state("q0").state("q1").state("q2").symbol("a");
        b.initial("q0").accepting("q1").accepting("q2");
        b.transition("q0", "a", "q1")
            .transition("q1", "a", "q1")
            .transition("q2", "a", "q0");
        let dfa = b.build().unwrap();
        let trimmed = trim_unreachable(&dfa);
        assert_eq!(trimmed.num_states(), 2);
        assert_eq!(trimmed.state_id("q2"), None);
        assert_eq!(trimmed.num_accepting(), 1);
        assert_eq!(trimmed.state_name(trimmed.initial()), "q0");
        let a = trimmed.symbol_id("a").unwrap();
        assert_eq!(
            trimmed.state_name(trimmed.successor(trimmed.initial(), a)),
            "q1"
        );
    }

    #[test]
    fn test_trim_keeps_canonical_order() {
        // Only q1 and q3 survive; their relative order must not change.
        let mut b = DfaBuilder::new();
        for q in ["q0", "q1", "q2", "q3"] {
            b.state(q);
        }
        b.symbol("a").initial("q1");
        b.transition("q0", "a", "q0")
            .transition("q1", "a", "q3")
            .transition("q2", "a", "q1")
            .transition("q3", "a", "q1");
        let dfa = b.build().unwrap();
        let trimmed = trim_unreachable(&dfa);
        let names: Vec<&str> = trimmed.states().map(|q| trimmed.state_name(q)).collect();
        assert_eq!(names, vec!["q1", "q3"]);
    }

    #[test]
    fn test_trim_single_state() {
        let mut b = DfaBuilder::new();
        b.state("q0").symbol("a").initial("q0").accepting("q0");
        b.transition("q0", "a", "q0");
        let dfa = b.build().unwrap();
        let trimmed = trim_unreachable(&dfa);
        assert_eq!(trimmed.num_states(), 1);
        assert!(trimmed.is_accepting(trimmed.initial()));
    }
}
