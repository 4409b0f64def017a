use petgraph::graph::NodeIndex;

use crate::{
    automaton::{FiniteAutomaton, StateNode, Transition},
    regex::ast::Regex,
};

/// A partially built automaton for a subexpression: its entry state and the
/// states in which a match of the subexpression ends.
#[derive(Debug, Clone)]
struct Fragment {
    initial: NodeIndex,
    finals: Vec<NodeIndex>,
}

/// Builds an NFA with the Thompson construction. States are created in post
/// order and labelled `s0`, `s1`, ... in creation order, so equal input gives
/// equal labels.
struct Compiler {
    nfa: FiniteAutomaton,
}

impl Compiler {
    fn new_state(&mut self) -> NodeIndex {
        let label = format!("s{}", self.nfa.state_count());
        self.nfa.add_state(StateNode::non_accepting(label))
    }

    fn edge(&mut self, from: NodeIndex, to: NodeIndex, label: Transition) {
        self.nfa.add_transition(from, to, label);
    }

    fn compile(&mut self, regex: &Regex) -> Fragment {
        match regex {
            Regex::Empty => self.single(Transition::Epsilon),
            Regex::Symbol(symbol) => self.single(Transition::Symbol(*symbol)),
            Regex::Union(left, right) => {
                let left = self.compile(left);
                let right = self.compile(right);

                let initial = self.new_state();
                self.edge(initial, left.initial, Transition::Epsilon);
                self.edge(initial, right.initial, Transition::Epsilon);

                let mut finals = left.finals;
                finals.extend(right.finals);

                Fragment { initial, finals }
            }
            Regex::Concat(left, right) => {
                let left = self.compile(left);
                let right = self.compile(right);

                for &state in &left.finals {
                    self.edge(state, right.initial, Transition::Epsilon);
                }

                Fragment {
                    initial: left.initial,
                    finals: right.finals,
                }
            }
            Regex::Star(inner) => {
                let inner = self.compile(inner);

                let initial = self.new_state();
                let last = self.new_state();
                self.edge(initial, inner.initial, Transition::Epsilon);
                self.edge(initial, last, Transition::Epsilon);

                for &state in &inner.finals {
                    self.edge(state, inner.initial, Transition::Epsilon);
                    self.edge(state, last, Transition::Epsilon);
                }

                Fragment {
                    initial,
                    finals: vec![last],
                }
            }
        }
    }

    fn single(&mut self, label: Transition) -> Fragment {
        let from = self.new_state();
        let to = self.new_state();
        self.edge(from, to, label);

        Fragment {
            initial: from,
            finals: vec![to],
        }
    }
}

/// Builds a nondeterministic automaton with epsilon transitions accepting the
/// language of `regex`. The alphabet lists the symbols in order of first
/// occurrence.
pub fn compile(regex: &Regex) -> FiniteAutomaton {
    let mut compiler = Compiler {
        nfa: FiniteAutomaton::with_alphabet(regex.symbols()),
    };

    let fragment = compiler.compile(regex);
    let mut nfa = compiler.nfa;

    nfa.set_initial(fragment.initial);
    for state in fragment.finals {
        nfa.set_accepting(state, true);
    }

    tracing::trace!(
        states = nfa.state_count(),
        transitions = nfa.transition_count(),
        "compiled {}",
        regex
    );

    nfa
}

impl Regex {
    pub fn to_nfa(&self) -> FiniteAutomaton {
        compile(self)
    }
}
