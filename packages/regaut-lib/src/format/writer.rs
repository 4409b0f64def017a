use hashbrown::HashSet;
use itertools::Itertools;
use petgraph::graph::NodeIndex;

use crate::{
    automaton::{Alphabet, FiniteAutomaton, index_map::IndexMap},
    format::reader::RESERVED_LABELS,
};

/// Picks a printable, unique name for every state. Labels that are empty,
/// contain whitespace or collide with an earlier label are replaced by the
/// state index.
fn state_names(automaton: &FiniteAutomaton) -> IndexMap<String> {
    let mut names = IndexMap::new(automaton.state_count());
    let mut used = HashSet::new();

    for state in automaton.states() {
        let label = automaton.label(state);
        let printable = !label.is_empty()
            && !label.chars().any(char::is_whitespace)
            && !RESERVED_LABELS.contains(&label);

        let name = if printable && !used.contains(label) {
            label.to_string()
        } else {
            let mut fallback = format!("q{}", state.index());
            while used.contains(fallback.as_str()) {
                fallback.push('\'');
            }
            fallback
        };

        used.insert(name.clone());
        names.insert(state, name);
    }

    names
}

/// Writes an automaton in the textual notation read by
/// [`reader::read`](super::reader::read).
pub fn write(automaton: &FiniteAutomaton) -> String {
    let names = state_names(automaton);
    let initial = automaton.initial();

    let mut text = String::new();
    text.push_str("Automaton:\n");
    text.push_str(&format!(
        "Symbols: {}\n\n",
        automaton.alphabet().iter().collect::<String>()
    ));

    // the initial state is marked on its first transition, or on its
    // declaration if it has none
    let initial_has_transitions =
        initial.is_some_and(|state| !automaton.outgoing(state).is_empty());

    for state in automaton.states() {
        let marker = if Some(state) == initial && !initial_has_transitions {
            "ini "
        } else {
            ""
        };
        let suffix = if automaton.is_accepting(state) {
            " final"
        } else {
            ""
        };
        text.push_str(&format!("{}{}{}\n", marker, names[state], suffix));
    }

    text.push('\n');

    let order: Vec<NodeIndex> = initial
        .into_iter()
        .chain(automaton.states().filter(|&state| Some(state) != initial))
        .collect_vec();

    let mut first = initial_has_transitions;
    for state in order {
        for (label, target) in automaton.outgoing(state) {
            let marker = if first { "ini " } else { "" };
            first = false;

            text.push_str(&format!(
                "{}{} -{}-> {}\n",
                marker, names[state], label, names[target]
            ));
        }
    }

    text
}
