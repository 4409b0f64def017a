use std::collections::VecDeque;

use hashbrown::HashMap;
use itertools::Itertools;
use petgraph::graph::NodeIndex;

use crate::automaton::{
    Alphabet, FiniteAutomaton, StateNode, Transition,
    index_map::IndexMap,
};

/// The table used in the minimization of a DFA.
/// It holds one entry per live state, i.e. per state that is reachable from
/// the initial state and can reach an accepting state. The transitions of an
/// entry are ordered like the sorted alphabet. Transitions into dead states
/// are stored as `None`, so dead states and missing transitions both behave
/// like an implicit non-accepting sink.
#[derive(Debug, Clone)]
pub struct PartitionTable<'a> {
    pub entries: Vec<PartitionTableEntry>,
    pub automaton: &'a FiniteAutomaton,
    pub symbols: Vec<char>,
    /// The block each live state currently belongs to.
    pub blocks: IndexMap<usize>,
    pub block_count: usize,
}

#[derive(Debug, Clone)]
pub struct PartitionTableEntry {
    pub state: NodeIndex,
    pub is_final: bool,
    pub transitions: Vec<Option<NodeIndex>>,
}

impl<'a> PartitionTable<'a> {
    pub fn new(automaton: &'a FiniteAutomaton) -> Self {
        let symbols = automaton.alphabet().iter().copied().sorted().collect_vec();
        let coreachable = automaton.coreachable_states();

        let entries = automaton
            .reachable_states()
            .into_iter()
            .filter(|&state| coreachable.contains(state))
            .map(|state| PartitionTableEntry {
                state,
                is_final: automaton.is_accepting(state),
                transitions: symbols
                    .iter()
                    .map(|&symbol| {
                        automaton
                            .successor(state, symbol)
                            .filter(|&target| coreachable.contains(target))
                    })
                    .collect(),
            })
            .collect_vec();

        let mut table = PartitionTable {
            entries,
            automaton,
            symbols,
            blocks: IndexMap::new(automaton.state_count()),
            block_count: 0,
        };
        table.seed();
        table
    }

    /// Splits the live states into accepting and non-accepting ones.
    fn seed(&mut self) {
        let mut ids = HashMap::new();

        for entry in &self.entries {
            let next_id = ids.len();
            let id = *ids.entry(entry.is_final).or_insert(next_id);
            self.blocks.insert(entry.state, id);
        }

        self.block_count = ids.len();
    }

    /// Performs one refinement round. Two states stay in the same block if
    /// they were in the same block before and every symbol leads both of them
    /// into the same block. Returns true if a block was split.
    fn refine(&mut self) -> bool {
        let mut signatures: HashMap<(usize, Vec<Option<usize>>), usize> = HashMap::new();
        let mut next_blocks = IndexMap::new(self.automaton.state_count());

        for entry in &self.entries {
            let signature = (
                self.blocks[entry.state],
                entry
                    .transitions
                    .iter()
                    .map(|target| target.map(|target| self.blocks[target]))
                    .collect_vec(),
            );

            let next_id = signatures.len();
            let id = *signatures.entry(signature).or_insert(next_id);
            next_blocks.insert(entry.state, id);
        }

        let changed = signatures.len() != self.block_count;
        self.blocks = next_blocks;
        self.block_count = signatures.len();
        changed
    }

    pub fn minimize(&mut self) {
        let mut rounds = 0;

        while self.refine() {
            rounds += 1;
            tracing::trace!(round = rounds, blocks = self.block_count, "refined partition");
        }

        tracing::debug!(
            states = self.automaton.state_count(),
            live_states = self.entries.len(),
            blocks = self.block_count,
            "minimized automaton"
        );
    }

    /// Builds the automaton with one state per block. States are numbered in
    /// breadth first order from the initial block, following the symbols in
    /// sorted order.
    pub fn to_automaton(&self) -> FiniteAutomaton {
        let mut minimized =
            FiniteAutomaton::with_alphabet(self.automaton.alphabet().iter().copied());

        let initial = self.automaton.get_initial();
        let Some(&initial_block) = self.blocks.get(initial) else {
            // no accepting state is reachable
            let state = minimized.add_state(StateNode::non_accepting("0"));
            minimized.set_initial(state);
            return minimized;
        };

        let mut representatives = HashMap::new();
        for entry in &self.entries {
            representatives
                .entry(self.blocks[entry.state])
                .or_insert(entry);
        }

        let mut numbering: HashMap<usize, NodeIndex> = HashMap::new();
        let mut order = vec![];
        let mut queue = VecDeque::from([initial_block]);
        numbering.insert(initial_block, NodeIndex::new(0));

        while let Some(block) = queue.pop_front() {
            order.push(block);

            for target in representatives[&block].transitions.iter().flatten() {
                let target_block = self.blocks[*target];
                if !numbering.contains_key(&target_block) {
                    numbering.insert(target_block, NodeIndex::new(numbering.len()));
                    queue.push_back(target_block);
                }
            }
        }

        for (number, block) in order.iter().enumerate() {
            let entry = representatives[block];
            minimized.add_state(StateNode::new(entry.is_final, number.to_string()));
        }
        minimized.set_initial(numbering[&initial_block]);

        for block in order {
            let entry = representatives[&block];

            for (symbol, target) in self.symbols.iter().zip(&entry.transitions) {
                if let Some(target) = target {
                    minimized.add_transition(
                        numbering[&block],
                        numbering[&self.blocks[*target]],
                        Transition::Symbol(*symbol),
                    );
                }
            }
        }

        minimized
    }
}

pub trait Minimizable {
    fn minimize(&self) -> Self;
}

impl Minimizable for FiniteAutomaton {
    /// Computes the minimal DFA for the language of a deterministic automaton.
    /// States that are unreachable or cannot reach an accepting state are
    /// dropped, so the result is partial and unique up to isomorphism.
    ///
    /// Panics if the automaton has no initial state or is not deterministic.
    fn minimize(&self) -> Self {
        assert!(self.initial().is_some(), "Automaton must have an initial state");
        self.assert_deterministic();

        let mut table = PartitionTable::new(self);
        table.minimize();
        table.to_automaton()
    }
}

impl FiniteAutomaton {
    /// Same as [`Minimizable::minimize`].
    pub fn to_minimized(&self) -> FiniteAutomaton {
        self.minimize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A DFA for `(a + b)* a` with a redundant copy of the accepting state and
    /// an unreachable state.
    fn redundant_dfa() -> FiniteAutomaton {
        let mut dfa = FiniteAutomaton::new();
        let q0 = dfa.add_state(StateNode::non_accepting("q0"));
        let q1 = dfa.add_state(StateNode::accepting("q1"));
        let q2 = dfa.add_state(StateNode::accepting("q2"));
        let q3 = dfa.add_state(StateNode::accepting("q3"));
        dfa.set_initial(q0);

        dfa.add_transition(q0, q1, Transition::Symbol('a'));
        dfa.add_transition(q0, q0, Transition::Symbol('b'));
        dfa.add_transition(q1, q2, Transition::Symbol('a'));
        dfa.add_transition(q1, q0, Transition::Symbol('b'));
        dfa.add_transition(q2, q1, Transition::Symbol('a'));
        dfa.add_transition(q2, q0, Transition::Symbol('b'));
        dfa.add_transition(q3, q0, Transition::Symbol('a'));

        dfa
    }

    #[test]
    fn test_minimize() {
        let dfa = redundant_dfa();
        let minimized = dfa.minimize();

        assert_eq!(minimized.state_count(), 2);
        assert_eq!(minimized.transition_count(), 4);
        assert_eq!(minimized.label(minimized.get_initial()), "0");
        assert!(!minimized.is_accepting(minimized.get_initial()));
        assert_eq!(
            minimized.successor(minimized.get_initial(), 'a'),
            minimized.find_state("1")
        );

        for word in ["a", "ba", "aaa", "abba"] {
            assert!(minimized.accepts_str(word), "{word}");
        }
        for word in ["", "b", "ab"] {
            assert!(!minimized.accepts_str(word), "{word}");
        }
    }

    #[test]
    fn test_minimize_drops_dead_states() {
        let mut dfa = FiniteAutomaton::new();
        let q0 = dfa.add_state(StateNode::non_accepting("q0"));
        let q1 = dfa.add_state(StateNode::accepting("q1"));
        let dead = dfa.add_state(StateNode::non_accepting("dead"));
        dfa.set_initial(q0);

        dfa.add_transition(q0, q1, Transition::Symbol('a'));
        dfa.add_transition(q0, dead, Transition::Symbol('b'));
        dfa.add_transition(dead, dead, Transition::Symbol('a'));
        dfa.add_transition(dead, dead, Transition::Symbol('b'));

        let minimized = dfa.minimize();
        assert_eq!(minimized.state_count(), 2);
        assert_eq!(minimized.transition_count(), 1);
        assert_eq!(minimized.alphabet(), &['a', 'b']);
    }

    #[test]
    fn test_minimize_empty_language() {
        let mut dfa = FiniteAutomaton::new();
        let q0 = dfa.add_state(StateNode::non_accepting("q0"));
        let q1 = dfa.add_state(StateNode::non_accepting("q1"));
        dfa.set_initial(q0);
        dfa.add_transition(q0, q1, Transition::Symbol('a'));

        let minimized = dfa.to_minimized();
        assert_eq!(minimized.state_count(), 1);
        assert_eq!(minimized.transition_count(), 0);
        assert!(minimized.is_language_empty());
    }

    #[test]
    #[should_panic(expected = "not deterministic")]
    fn test_minimize_rejects_nfa() {
        let mut nfa = FiniteAutomaton::new();
        let q0 = nfa.add_state(StateNode::accepting("q0"));
        nfa.set_initial(q0);
        nfa.add_transition(q0, q0, Transition::Epsilon);

        nfa.minimize();
    }
}
