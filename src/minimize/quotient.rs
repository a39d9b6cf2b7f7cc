//! Collapsing equivalence classes of states onto representative states.

use bit_set::BitSet;

use crate::{Dfa, StateId};

use super::distinguish::Distinguishability;

/// Builds the quotient automaton induced by a converged distinguishability
/// relation.
///
/// Every state is mapped to its representative, the least-indexed surviving
/// state it is equivalent to. Equivalence is transitive for a converged
/// relation, so chains like p ≡ q ≡ r collapse onto a single representative
/// without a union-find pass. Transition targets, the accepting set, and the
/// initial state are all rewritten through the representative map; the
/// alphabet is unchanged.
///
/// The relation must range over exactly the states of `dfa` and must be
/// fully converged before this is called; panics on a size mismatch.
pub fn quotient(dfa: &Dfa, rel: &Distinguishability) -> Dfa {
    assert_eq!(
        rel.num_states(),
        dfa.num_states(),
        "relation and automaton disagree on the number of states"
    );
    let n = dfa.num_states();

    let mut rep: Vec<StateId> = Vec::with_capacity(n);
    for q in 0..n {
        let r = (0..q)
            .find(|&p| rep[p] == p && rel.equivalent(p, q))
            .unwrap_or(q);
        rep.push(r);
    }

    // Renumber the survivors, keeping canonical order.
    let mut map: Vec<Option<StateId>> = vec![None; n];
    let mut states = Vec::new();
    for q in 0..n {
        if rep[q] == q {
            map[q] = Some(states.len());
            states.push(dfa.state_name(q).to_string());
        }
    }

    let mut accepting = BitSet::with_capacity(states.len());
    let mut trans = Vec::with_capacity(states.len());
    for q in (0..n).filter(|&q| rep[q] == q) {
        let new_id = trans.len();
        if dfa.is_accepting(q) {
            accepting.insert(new_id);
        }
        trans.push(
            dfa.symbols()
                .map(|s| map[rep[dfa.successor(q, s)]].unwrap())
                .collect(),
        );
    }

    Dfa {
        states,
        symbols: dfa.symbols.clone(),
        accepting,
        initial: map[rep[dfa.initial()]].unwrap(),
        trans,
    }
}

#[cfg(test)]
mod tests {
    use crate::minimize::distinguish::distinguish;
    use crate::DfaBuilder;

    use super::*;

    #[test]
    fn test_quotient_merges_equivalent_pair() {
        // q1 and q2 are behaviorally identical and collapse onto q1.
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
        let dfa = b.build().unwrap();
        let min = quotient(&dfa, &distinguish(&dfa));

        assert_eq!(min.num_states(), 3);
        assert_eq!(min.state_id("q2"), None);
        let q0 = min.state_id("q0").unwrap();
        let q1 = min.state_id("q1").unwrap();
        let a = min.symbol_id("a").unwrap();
        let bb = min.symbol_id("b").unwrap();
        // q0's 'b' edge pointed at q2 and now points at its representative.
        assert_eq!(min.successor(q0, bb), q1);
        assert_eq!(min.successor(q1, a), min.state_id("q3").unwrap());
        assert_eq!(min.num_accepting(), 1);
    }

    #[test]
    fn test_quotient_collapses_chain() {
        // q0, q1, q2 are pairwise equivalent and all collapse onto q0.
        let mut b = DfaBuilder::new();
        for q in ["q0", "q1", "q2", "qf"] {
            b.state(q);
        }
        b.symbol("a").initial("q0").accepting("qf");
        b.transition("q0", "a", "qf")
            .transition("q1", "a", "qf")
            .transition("q2", "a", "qf")
            .transition("qf", "a", "qf");
        let dfa = b.build().unwrap();
        let min = quotient(&dfa, &distinguish(&dfa));
        assert_eq!(min.num_states(), 2);
        let names: Vec<&str> = min.states().map(|q| min.state_name(q)).collect();
        assert_eq!(names, vec!["q0", "qf"]);
    }

    #[test]
    fn test_quotient_redirects_initial() {
        // The initial state q2 merges into q1; the quotient must start
        // at the representative.
        let mut b = DfaBuilder::new();
        for q in ["q1", "q2", "qf"] {
            b.state(q);
        }
        b.symbol("a").initial("q2").accepting("qf");
        b.transition("q1", "a", "qf")
            .transition("q2", "a", "qf")
            .transition("qf", "a", "qf");
        let dfa = b.build().unwrap();
        let min = quotient(&dfa, &distinguish(&dfa));
        assert_eq!(min.num_states(), 2);
        assert_eq!(min.state_name(min.initial()), "q1");
    }

    #[test]
    fn test_quotient_of_minimal_automaton_is_identity() {
        let mut b = DfaBuilder::new();
        b.state("q0").state("q1").symbol("a").initial("q0").accepting("q1");
        b.transition("q0", "a", "q1").transition("q1", "a", "q0");
        let dfa = b.build().unwrap();
        let min = quotient(&dfa, &distinguish(&dfa));
        assert_eq!(min, dfa);
    }
}
