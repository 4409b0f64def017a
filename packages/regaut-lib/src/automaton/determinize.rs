use std::collections::VecDeque;

use hashbrown::HashMap;
use petgraph::graph::NodeIndex;

use crate::automaton::{Alphabet, FiniteAutomaton, StateNode, Transition};

/// The label of the state standing for the empty subset.
pub const SINK_LABEL: &str = "∅";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeterminizeOptions {
    /// Keep the empty subset as a non-accepting sink state. Without it the
    /// resulting DFA is partial: a missing transition rejects the word.
    pub explicit_sink: bool,
}

impl FiniteAutomaton {
    /// Converts the automaton into an equivalent deterministic automaton using
    /// the subset construction. Only subsets reachable from the initial state
    /// are created and the empty subset is left out, so the result may be
    /// partial.
    ///
    /// Each state of the result is labelled with the concatenated labels of
    /// the states it stands for, ordered by state index.
    pub fn determinize(&self) -> FiniteAutomaton {
        self.determinize_with(DeterminizeOptions::default())
    }

    pub fn determinize_with(&self, options: DeterminizeOptions) -> FiniteAutomaton {
        let nfa_initial = self.get_initial();
        let mut state_map: HashMap<Vec<NodeIndex>, NodeIndex> = HashMap::new();

        let mut dfa = FiniteAutomaton::with_alphabet(self.alphabet().iter().copied());

        let initial_set = self.epsilon_closure(&[nfa_initial]);
        let dfa_initial = dfa.add_state(self.state_from_set(&initial_set));
        dfa.set_initial(dfa_initial);
        state_map.insert(initial_set.clone(), dfa_initial);

        let mut queue = VecDeque::from([initial_set]);

        while let Some(set) = queue.pop_front() {
            let source = state_map[&set];

            for &symbol in self.alphabet() {
                let target_set = self.step(&set, symbol);

                if target_set.is_empty() && !options.explicit_sink {
                    continue;
                }

                let target = match state_map.get(&target_set) {
                    Some(&target) => target,
                    None => {
                        let target = dfa.add_state(self.state_from_set(&target_set));
                        state_map.insert(target_set.clone(), target);
                        queue.push_back(target_set);
                        target
                    }
                };

                dfa.add_transition(source, target, Transition::Symbol(symbol));
            }
        }

        tracing::debug!(
            nfa_states = self.state_count(),
            dfa_states = dfa.state_count(),
            "determinized automaton"
        );

        dfa
    }

    /// Same as [`FiniteAutomaton::determinize`].
    pub fn to_deterministic(&self) -> FiniteAutomaton {
        self.determinize()
    }

    fn state_from_set(&self, set: &[NodeIndex]) -> StateNode {
        if set.is_empty() {
            return StateNode::non_accepting(SINK_LABEL);
        }

        let label: String = set.iter().map(|&state| self.label(state)).collect();
        StateNode::new(self.is_accepting_set(set), label)
    }
}
