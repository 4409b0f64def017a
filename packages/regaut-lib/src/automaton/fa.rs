use std::{collections::VecDeque, fmt::Debug, path::Path};

use itertools::Itertools;
use petgraph::{
    Direction,
    graph::{DiGraph, EdgeIndex, NodeIndex},
    visit::EdgeRef,
};
use serde::{Deserialize, Serialize};

use crate::{
    automaton::{
        Alphabet, Language,
        index_map::IndexSet,
        node::StateNode,
        transition::{EPSILON_MARKER, Transition},
    },
    format::{FormatError, reader, writer},
};

/// A finite automaton over single characters.
///
/// The same type is used for the nondeterministic automata built from regular
/// expressions and for the deterministic automata produced from them.
/// Determinism is a property established by construction (see
/// [`FiniteAutomaton::is_deterministic`]) and is asserted by the algorithms
/// that require it.
///
/// States live in a `petgraph` arena and are addressed by [`NodeIndex`].
#[derive(Clone, Serialize, Deserialize)]
#[serde(into = "SerializableAutomaton", try_from = "SerializableAutomaton")]
pub struct FiniteAutomaton {
    initial: Option<NodeIndex>,
    graph: DiGraph<StateNode, Transition>,
    alphabet: Vec<char>,
}

impl FiniteAutomaton {
    /// Creates an automaton without states over an empty alphabet. Symbols are
    /// added to the alphabet as transitions on them are added.
    pub fn new() -> Self {
        FiniteAutomaton {
            initial: None,
            graph: DiGraph::new(),
            alphabet: Vec::new(),
        }
    }

    /// Creates an automaton without states over a predeclared alphabet.
    pub fn with_alphabet(alphabet: impl IntoIterator<Item = char>) -> Self {
        let mut automaton = FiniteAutomaton::new();
        for symbol in alphabet {
            automaton.add_symbol(symbol);
        }
        automaton
    }

    /// Adds a symbol to the alphabet. Returns true if it was not part of it.
    pub fn add_symbol(&mut self, symbol: char) -> bool {
        assert_ne!(
            symbol, EPSILON_MARKER,
            "The epsilon marker cannot be part of the alphabet"
        );

        if self.alphabet.contains(&symbol) {
            return false;
        }

        self.alphabet.push(symbol);
        true
    }

    pub fn add_state(&mut self, data: StateNode) -> NodeIndex {
        self.graph.add_node(data)
    }

    /// Adds a transition. The transition relation is a set, so adding an
    /// existing transition again returns the index of the existing edge.
    pub fn add_transition(
        &mut self,
        from: NodeIndex,
        to: NodeIndex,
        label: Transition,
    ) -> EdgeIndex {
        if let Some(symbol) = label.symbol() {
            self.add_symbol(symbol);
        }

        let existing = self
            .graph
            .edges_connecting(from, to)
            .find(|edge| *edge.weight() == label)
            .map(|edge| edge.id());

        existing.unwrap_or_else(|| self.graph.add_edge(from, to, label))
    }

    pub fn set_initial(&mut self, state: NodeIndex) {
        self.initial = Some(state);
    }

    pub fn initial(&self) -> Option<NodeIndex> {
        self.initial
    }

    /// Returns the initial state, panicking if none is set.
    pub fn get_initial(&self) -> NodeIndex {
        self.initial.expect("Automaton must have an initial state")
    }

    pub fn set_accepting(&mut self, state: NodeIndex, accepting: bool) {
        self.graph[state].accepting = accepting;
    }

    pub fn is_accepting(&self, state: NodeIndex) -> bool {
        self.graph[state].accepting
    }

    /// Checks if a set of states contains an accepting state.
    pub fn is_accepting_set(&self, states: &[NodeIndex]) -> bool {
        states.iter().any(|&state| self.is_accepting(state))
    }

    pub fn state(&self, state: NodeIndex) -> &StateNode {
        &self.graph[state]
    }

    pub fn label(&self, state: NodeIndex) -> &str {
        self.graph[state].label()
    }

    /// Finds the first state carrying the given label.
    pub fn find_state(&self, label: &str) -> Option<NodeIndex> {
        self.graph
            .node_indices()
            .find(|&node| self.graph[node].label == label)
    }

    pub fn state_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn transition_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn graph(&self) -> &DiGraph<StateNode, Transition> {
        &self.graph
    }

    pub fn states(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    pub fn final_states(&self) -> Vec<NodeIndex> {
        self.graph
            .node_indices()
            .filter(|&node| self.graph[node].accepting)
            .collect_vec()
    }

    /// All transitions as `(source, label, target)`, in insertion order.
    pub fn transitions(&self) -> impl Iterator<Item = (NodeIndex, Transition, NodeIndex)> + '_ {
        self.graph
            .edge_references()
            .map(|edge| (edge.source(), *edge.weight(), edge.target()))
    }

    /// The outgoing transitions of a state as `(label, target)`, sorted by
    /// label and target so that iteration is independent of insertion order.
    pub fn outgoing(&self, state: NodeIndex) -> Vec<(Transition, NodeIndex)> {
        self.graph
            .edges_directed(state, Direction::Outgoing)
            .map(|edge| (*edge.weight(), edge.target()))
            .sorted()
            .collect_vec()
    }

    /// Returns the target of the transition on `symbol`, if there is one.
    /// On a nondeterministic automaton an arbitrary one of the targets is
    /// returned.
    pub fn successor(&self, state: NodeIndex, symbol: char) -> Option<NodeIndex> {
        self.graph
            .edges_directed(state, Direction::Outgoing)
            .find(|edge| edge.weight().matches(&symbol))
            .map(|edge| edge.target())
    }

    pub fn successors_on(
        &self,
        state: NodeIndex,
        label: Transition,
    ) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph
            .edges_directed(state, Direction::Outgoing)
            .filter(move |edge| *edge.weight() == label)
            .map(|edge| edge.target())
    }

    pub fn has_epsilon_transitions(&self) -> bool {
        self.graph
            .edge_references()
            .any(|edge| edge.weight().is_epsilon())
    }

    /// Returns the first state and symbol violating determinism, if any.
    fn find_nondeterminism(&self) -> Option<(NodeIndex, Transition)> {
        for node in self.graph.node_indices() {
            let mut seen = Vec::new();

            for edge in self.graph.edges_directed(node, Direction::Outgoing) {
                let label = *edge.weight();
                if label.is_epsilon() || seen.contains(&label) {
                    return Some((node, label));
                }
                seen.push(label);
            }
        }

        None
    }

    /// An automaton is deterministic if it has no epsilon transitions and no
    /// state has two transitions on the same symbol. Missing transitions are
    /// allowed.
    pub fn is_deterministic(&self) -> bool {
        self.find_nondeterminism().is_none()
    }

    /// Assert that the automaton is deterministic.
    ///
    /// If it is not, this function will panic.
    pub fn assert_deterministic(&self) {
        if let Some((node, label)) = self.find_nondeterminism() {
            panic!(
                "Automaton is not deterministic. State {:?} ({}) has an ambiguous transition on {}",
                node,
                self.label(node),
                label
            );
        }
    }

    /// Calculates the epsilon closure of a set of states in place.
    /// The extended set is duplicate free if the input was.
    pub fn extend_to_e_closure(&self, states: &mut Vec<NodeIndex>) {
        let mut seen = IndexSet::new(self.state_count());
        for &state in states.iter() {
            seen.insert(state);
        }

        let mut stack = states.clone();

        while let Some(state) = stack.pop() {
            for target in self.successors_on(state, Transition::Epsilon) {
                if seen.insert(target) {
                    states.push(target);
                    stack.push(target);
                }
            }
        }
    }

    /// Returns the sorted epsilon closure of a set of states.
    pub fn epsilon_closure(&self, states: &[NodeIndex]) -> Vec<NodeIndex> {
        let mut closure = states.iter().copied().unique().collect_vec();
        self.extend_to_e_closure(&mut closure);
        closure.sort();
        closure
    }

    /// Reads one symbol from a set of states: collects every target of a
    /// transition on `symbol` and returns the sorted epsilon closure of them.
    pub fn step(&self, states: &[NodeIndex], symbol: char) -> Vec<NodeIndex> {
        let targets = states
            .iter()
            .flat_map(|&state| self.successors_on(state, Transition::Symbol(symbol)))
            .collect_vec();

        self.epsilon_closure(&targets)
    }

    /// All states reachable from the initial state, in breadth-first order.
    /// Epsilon transitions are followed like any other transition.
    pub fn reachable_states(&self) -> Vec<NodeIndex> {
        let Some(initial) = self.initial else {
            return vec![];
        };

        let mut visited = IndexSet::new(self.state_count());
        let mut queue = VecDeque::from([initial]);
        let mut order = vec![];
        visited.insert(initial);

        while let Some(state) = queue.pop_front() {
            order.push(state);

            for (_, target) in self.outgoing(state) {
                if visited.insert(target) {
                    queue.push_back(target);
                }
            }
        }

        order
    }

    /// The set of states from which an accepting state can be reached.
    pub fn coreachable_states(&self) -> IndexSet {
        let mut coreachable = IndexSet::new(self.state_count());
        let mut stack = self.final_states();
        for &state in &stack {
            coreachable.insert(state);
        }

        while let Some(state) = stack.pop() {
            for edge in self.graph.edges_directed(state, Direction::Incoming) {
                if coreachable.insert(edge.source()) {
                    stack.push(edge.source());
                }
            }
        }

        coreachable
    }

    /// Checks if `L(Self) = ∅`, i.e. if no accepting state is reachable.
    pub fn is_language_empty(&self) -> bool {
        !self
            .reachable_states()
            .into_iter()
            .any(|state| self.is_accepting(state))
    }

    /// Adds a non-accepting sink state if needed. This turns a partial DFA
    /// into a complete one, where every state has a transition for every
    /// symbol of the alphabet. Returns the sink if one was added.
    pub fn complete(&mut self) -> Option<NodeIndex> {
        let missing = self
            .graph
            .node_indices()
            .cartesian_product(self.alphabet.iter().copied())
            .filter(|&(state, symbol)| self.successor(state, symbol).is_none())
            .collect_vec();

        if missing.is_empty() {
            return None;
        }

        let sink = self.add_state(StateNode::non_accepting("∅"));

        for (state, symbol) in missing {
            self.add_transition(state, sink, Transition::Symbol(symbol));
        }

        for symbol in self.alphabet.clone() {
            self.add_transition(sink, sink, Transition::Symbol(symbol));
        }

        Some(sink)
    }

    pub fn accepts_str(&self, word: &str) -> bool {
        self.accepts(&word.chars().collect_vec())
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let value: SerializableAutomaton = serde_json::from_str(json)?;
        Ok(FiniteAutomaton::try_from(value)?)
    }

    pub fn to_json_file(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        Ok(std::fs::write(path, self.to_json()?)?)
    }

    pub fn to_text_file(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        Ok(std::fs::write(path, writer::write(self))?)
    }

    /// Loads an automaton from a file. Files ending in `.json` are read as
    /// JSON, everything else as the textual notation.
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        match path.extension() {
            Some(ext) if ext == "json" => Self::from_json(&content),
            _ => Ok(reader::read(&content)?),
        }
    }
}

impl Default for FiniteAutomaton {
    fn default() -> Self {
        FiniteAutomaton::new()
    }
}

impl Alphabet for FiniteAutomaton {
    type Letter = char;

    fn alphabet(&self) -> &[char] {
        self.alphabet.as_slice()
    }
}

impl Language for FiniteAutomaton {
    fn accepts<'a>(&self, input: impl IntoIterator<Item = &'a char>) -> bool {
        let Some(initial) = self.initial else {
            return false;
        };

        let mut current_states = self.epsilon_closure(&[initial]);

        for symbol in input {
            current_states = self.step(&current_states, *symbol);

            if current_states.is_empty() {
                return false;
            }
        }

        self.is_accepting_set(&current_states)
    }
}

impl Debug for FiniteAutomaton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FiniteAutomaton")
            .field("alphabet", &self.alphabet)
            .field("state_count", &self.graph.node_count())
            .field(
                "states",
                &self
                    .graph
                    .node_indices()
                    .map(|node| (&self.graph[node].label, node))
                    .collect_vec(),
            )
            .field("initial_state", &self.initial)
            .field("final_states", &self.final_states())
            .field("edge_count", &self.graph.edge_count())
            .field(
                "edges",
                &self
                    .graph
                    .edge_references()
                    .map(|edge| {
                        format!(
                            "{:?} --- {} --> {:?}",
                            edge.source(),
                            edge.weight(),
                            edge.target()
                        )
                    })
                    .collect_vec(),
            )
            .finish()
    }
}

/// The JSON shape of a [`FiniteAutomaton`]: states are referred to by their
/// position in `states`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableAutomaton {
    pub alphabet: Vec<char>,
    pub states: Vec<StateNode>,
    pub initial: Option<usize>,
    pub transitions: Vec<(usize, Transition, usize)>,
}

impl From<FiniteAutomaton> for SerializableAutomaton {
    fn from(automaton: FiniteAutomaton) -> Self {
        SerializableAutomaton {
            alphabet: automaton.alphabet.clone(),
            states: automaton
                .graph
                .node_indices()
                .map(|node| automaton.graph[node].clone())
                .collect(),
            initial: automaton.initial.map(|node| node.index()),
            transitions: automaton
                .transitions()
                .map(|(from, label, to)| (from.index(), label, to.index()))
                .collect(),
        }
    }
}

impl TryFrom<SerializableAutomaton> for FiniteAutomaton {
    type Error = FormatError;

    fn try_from(value: SerializableAutomaton) -> Result<Self, Self::Error> {
        let epsilon_symbol = value.alphabet.contains(&EPSILON_MARKER)
            || value
                .transitions
                .iter()
                .any(|(_, label, _)| *label == Transition::Symbol(EPSILON_MARKER));
        if epsilon_symbol {
            return Err(FormatError::EpsilonSymbol);
        }

        let Some(initial) = value.initial else {
            return Err(FormatError::MissingInitial);
        };

        let mut automaton = FiniteAutomaton::with_alphabet(value.alphabet);
        let state_count = value.states.len();
        let check = |index: usize| {
            if index < state_count {
                Ok(NodeIndex::new(index))
            } else {
                Err(FormatError::InvalidStateIndex { index })
            }
        };

        for state in value.states {
            automaton.add_state(state);
        }

        automaton.set_initial(check(initial)?);

        for (from, label, to) in value.transitions {
            automaton.add_transition(check(from)?, check(to)?, label);
        }

        Ok(automaton)
    }
}
