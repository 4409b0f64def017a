use std::collections::VecDeque;

use itertools::Itertools;
use petgraph::graph::NodeIndex;

use crate::automaton::{
    Alphabet, FiniteAutomaton, index_map::IndexMap, minimization::Minimizable,
};

/// A witness that two deterministic automata have the same structure: maps
/// every reachable state of the first automaton to its counterpart in the
/// second one.
#[derive(Debug, Clone)]
pub struct Isomorphism {
    forward: IndexMap<NodeIndex>,
}

impl Isomorphism {
    pub fn get(&self, state: NodeIndex) -> Option<NodeIndex> {
        self.forward.get(state).copied()
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex)> + '_ {
        self.forward.iter().map(|(from, &to)| (from, to))
    }

    /// The mapping expressed through the state labels of both automata,
    /// sorted by the label in `a`.
    pub fn label_pairs(&self, a: &FiniteAutomaton, b: &FiniteAutomaton) -> Vec<(String, String)> {
        self.iter()
            .map(|(from, to)| (a.label(from).to_string(), b.label(to).to_string()))
            .sorted()
            .collect_vec()
    }
}

/// Checks whether two deterministic automata are equal up to renaming of
/// their states. Both automata are traversed in lockstep from their initial
/// states. The traversal fails as soon as two paired states differ in being
/// accepting, only one of them has a transition on some symbol, or a state
/// would be paired with two different states.
///
/// Only the reachable parts are compared, and a missing transition is not
/// the same as a transition into a rejecting sink. The check is therefore
/// meant for minimized automata, see [`are_equivalent`] for a language
/// comparison.
///
/// Panics if one of the automata has no initial state or is not
/// deterministic.
pub fn is_isomorphic(a: &FiniteAutomaton, b: &FiniteAutomaton) -> Option<Isomorphism> {
    a.assert_deterministic();
    b.assert_deterministic();

    let symbols = a
        .alphabet()
        .iter()
        .chain(b.alphabet())
        .copied()
        .sorted()
        .dedup()
        .collect_vec();

    let mut forward = IndexMap::new(a.state_count());
    let mut backward = IndexMap::new(b.state_count());

    let initial = (a.get_initial(), b.get_initial());
    forward.insert(initial.0, initial.1);
    backward.insert(initial.1, initial.0);

    let mut queue = VecDeque::from([initial]);

    while let Some((state_a, state_b)) = queue.pop_front() {
        if a.is_accepting(state_a) != b.is_accepting(state_b) {
            tracing::trace!(?state_a, ?state_b, "accepting flags differ");
            return None;
        }

        for &symbol in &symbols {
            match (a.successor(state_a, symbol), b.successor(state_b, symbol)) {
                (None, None) => {}
                (Some(target_a), Some(target_b)) => {
                    match (forward.get(target_a), backward.get(target_b)) {
                        (None, None) => {
                            forward.insert(target_a, target_b);
                            backward.insert(target_b, target_a);
                            queue.push_back((target_a, target_b));
                        }
                        (Some(&mapped_a), Some(&mapped_b))
                            if mapped_a == target_b && mapped_b == target_a => {}
                        _ => {
                            tracing::trace!(?target_a, ?target_b, %symbol, "inconsistent mapping");
                            return None;
                        }
                    }
                }
                _ => {
                    tracing::trace!(?state_a, ?state_b, %symbol, "transition missing on one side");
                    return None;
                }
            }
        }
    }

    Some(Isomorphism { forward })
}

/// Checks whether two automata accept the same language by minimizing both
/// and comparing the results structurally. Nondeterministic automata are
/// determinized first.
pub fn are_equivalent(a: &FiniteAutomaton, b: &FiniteAutomaton) -> bool {
    let canonical = |automaton: &FiniteAutomaton| {
        if automaton.is_deterministic() {
            automaton.minimize()
        } else {
            automaton.determinize().minimize()
        }
    };

    is_isomorphic(&canonical(a), &canonical(b)).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::{StateNode, Transition};

    /// Words over `{a, b}` with an even number of `a`, states declared in the
    /// given order.
    fn even_a(labels: [&str; 2], swap: bool) -> FiniteAutomaton {
        let mut dfa = FiniteAutomaton::new();
        let (even, odd) = if swap {
            let odd = dfa.add_state(StateNode::non_accepting(labels[1]));
            let even = dfa.add_state(StateNode::accepting(labels[0]));
            (even, odd)
        } else {
            let even = dfa.add_state(StateNode::accepting(labels[0]));
            let odd = dfa.add_state(StateNode::non_accepting(labels[1]));
            (even, odd)
        };
        dfa.set_initial(even);

        dfa.add_transition(even, odd, Transition::Symbol('a'));
        dfa.add_transition(odd, even, Transition::Symbol('a'));
        dfa.add_transition(even, even, Transition::Symbol('b'));
        dfa.add_transition(odd, odd, Transition::Symbol('b'));

        dfa
    }

    #[test]
    fn test_isomorphic_under_renaming() {
        let a = even_a(["e", "o"], false);
        let b = even_a(["x", "y"], true);

        let isomorphism = is_isomorphic(&a, &b).unwrap();
        assert_eq!(isomorphism.len(), 2);
        assert_eq!(
            isomorphism.label_pairs(&a, &b),
            vec![("e".into(), "x".into()), ("o".into(), "y".into())]
        );
        assert_eq!(isomorphism.get(NodeIndex::new(0)), Some(NodeIndex::new(1)));
    }

    #[test]
    fn test_not_isomorphic() {
        let a = even_a(["e", "o"], false);

        let mut flipped = a.clone();
        flipped.set_accepting(NodeIndex::new(0), false);
        flipped.set_accepting(NodeIndex::new(1), true);
        assert!(is_isomorphic(&a, &flipped).is_none());

        let mut extra = a.clone();
        extra.add_transition(NodeIndex::new(0), NodeIndex::new(0), Transition::Symbol('c'));
        assert!(is_isomorphic(&a, &extra).is_none());
        assert!(is_isomorphic(&extra, &a).is_none());
    }

    #[test]
    fn test_mapping_must_be_injective() {
        // one accepting state looping on `a` against two accepting states
        // swapping on `a`
        let mut one = FiniteAutomaton::new();
        let q = one.add_state(StateNode::accepting("q"));
        one.set_initial(q);
        one.add_transition(q, q, Transition::Symbol('a'));

        let mut two = FiniteAutomaton::new();
        let p0 = two.add_state(StateNode::accepting("p0"));
        let p1 = two.add_state(StateNode::accepting("p1"));
        two.set_initial(p0);
        two.add_transition(p0, p1, Transition::Symbol('a'));
        two.add_transition(p1, p0, Transition::Symbol('a'));

        assert!(is_isomorphic(&one, &two).is_none());
        assert!(is_isomorphic(&two, &one).is_none());
        assert!(are_equivalent(&one, &two));
    }

    #[test]
    fn test_are_equivalent() {
        let a = even_a(["e", "o"], false);

        let mut nfa = FiniteAutomaton::new();
        let q0 = nfa.add_state(StateNode::accepting("q0"));
        let q1 = nfa.add_state(StateNode::non_accepting("q1"));
        nfa.set_initial(q0);
        nfa.add_transition(q0, q0, Transition::Symbol('b'));
        nfa.add_transition(q0, q1, Transition::Symbol('a'));
        nfa.add_transition(q1, q1, Transition::Symbol('b'));
        nfa.add_transition(q1, q0, Transition::Symbol('a'));
        nfa.add_transition(q1, q1, Transition::Epsilon);

        assert!(are_equivalent(&a, &nfa));

        nfa.add_transition(q1, q0, Transition::Epsilon);
        assert!(!are_equivalent(&a, &nfa));
    }
}
