//! The DFA minimization pipeline.
//!
//! Minimization runs in three pure stages, each consuming an automaton (or a
//! relation) by reference and producing a fresh owned value:
//!
//! 1. [`trim_unreachable`] restricts the automaton to the states reachable
//!    from the initial state.
//! 2. [`distinguish`] computes the distinguishability relation over the
//!    remaining state pairs by fixed-point table filling.
//! 3. [`quotient`] collapses each equivalence class onto its representative.
//!
//! The relation is computed in full before quotienting begins, so merging
//! never races with detection.

pub mod distinguish;
pub mod quotient;
pub mod reach;

pub use distinguish::{distinguish, Distinguishability};
pub use quotient::quotient;
pub use reach::trim_unreachable;

use crate::Dfa;

/// Produces the minimal automaton recognizing the same language as `dfa`.
///
/// The result is unique up to state renaming; here the surviving states keep
/// their original names, so minimizing an already-minimal automaton returns
/// it unchanged.
pub fn minimize(dfa: &Dfa) -> Dfa {
    let trimmed = trim_unreachable(dfa);
    let rel = distinguish(&trimmed);
    quotient(&trimmed, &rel)
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use quickcheck_macros::quickcheck;

    use crate::{Dfa, DfaBuilder};

    use super::*;

    /// All words over the automaton's alphabet of exactly the given length.
    fn words(dfa: &Dfa, len: usize) -> Vec<Vec<usize>> {
        if len == 0 {
            return vec![vec![]];
        }
        (0..len)
            .map(|_| dfa.symbols())
            .multi_cartesian_product()
            .collect()
    }

    fn merge_candidate() -> Dfa {
        // q1 and q2 step to q3 on 'a' and loop on 'b'; neither accepts.
        let mut b = DfaBuilder::new();
        for q in ["q0", "q1", "q2", "q3"] {
            b.state(q);
        }
        b.symbol("a").symbol("b").initial("q0").accepting("q3");
        b.transition("q0", "a", "q1")
            .transition("q0", "b", "q2")
            .transition("q1", "a", "q3")
            .transition("q1", "b", "q1")
            .transition("q2", "a", "q3")
            .transition("q2", "b", "q2")
            .transition("q3", "a", "q3")
            .transition("q3", "b", "q3");
        b.build().unwrap()
    }

    #[test]
    fn test_minimize_merges_identical_states() {
        let dfa = merge_candidate();
        let min = minimize(&dfa);
        assert_eq!(min.num_states(), 3);
        let names: Vec<&str> = min.states().map(|q| min.state_name(q)).collect();
        assert_eq!(names, vec!["q0", "q1", "q3"]);
    }

    #[test]
    fn test_minimize_drops_unreachable_state() {
        // q9 is disconnected from q0 and must not survive.
        let mut b = DfaBuilder::new();
        for q in ["q0", "q1", "q9"] {
            b.state(q);
        }
        b.symbol("a").initial("q0").accepting("q1").accepting("q9");
        b.transition("q0", "a", "q1")
            .transition("q1", "a", "q1")
            .transition("q9", "a", "q9");
        let dfa = b.build().unwrap();
        let min = minimize(&dfa);
        assert_eq!(min.state_id("q9"), None);
        assert_eq!(min.num_states(), 2);
        assert_eq!(min.num_accepting(), 1);
    }

    #[test]
    fn test_minimize_already_minimal() {
        // Parity automaton: two states, no mergeable pair.
        let mut b = DfaBuilder::new();
        b.state("even").state("odd").symbol("a");
        b.initial("even").accepting("even");
        b.transition("even", "a", "odd").transition("odd", "a", "even");
        let dfa = b.build().unwrap();
        let min = minimize(&dfa);
        assert_eq!(min, dfa);
    }

    #[test]
    fn test_minimize_preserves_language_on_example() {
        let dfa = merge_candidate();
        let min = minimize(&dfa);
        for len in 0..=2 * dfa.num_states() {
            for word in words(&dfa, len) {
                assert_eq!(dfa.accepts(&word), min.accepts(&word), "word {:?}", word);
            }
        }
    }

    #[quickcheck]
    fn minimized_is_total_over_same_alphabet(dfa: Dfa) -> bool {
        let min = minimize(&dfa);
        min.num_symbols() == dfa.num_symbols()
            && min
                .states()
                .all(|q| min.symbols().all(|s| min.successor(q, s) < min.num_states()))
    }

    #[quickcheck]
    fn minimized_states_are_all_reachable(dfa: Dfa) -> bool {
        let min = minimize(&dfa);
        trim_unreachable(&min).num_states() == min.num_states()
    }

    #[quickcheck]
    fn minimization_is_idempotent(dfa: Dfa) -> bool {
        let min = minimize(&dfa);
        minimize(&min) == min
    }

    #[quickcheck]
    fn state_count_is_monotone(dfa: Dfa) -> bool {
        let trimmed = trim_unreachable(&dfa);
        let min = minimize(&dfa);
        min.num_states() <= trimmed.num_states() && trimmed.num_states() <= dfa.num_states()
    }

    #[quickcheck]
    fn minimization_preserves_language(dfa: Dfa) {
        let min = minimize(&dfa);
        // Bounded exhaustive check; the cap keeps the word count manageable
        // for the larger random alphabets.
        let cap = (2 * dfa.num_states()).min(8);
        for len in 0..=cap {
            for word in words(&dfa, len) {
                assert_eq!(dfa.accepts(&word), min.accepts(&word), "word {:?}", word);
            }
        }
    }
}
