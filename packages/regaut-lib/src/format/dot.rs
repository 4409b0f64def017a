use itertools::Itertools;

use crate::{automaton::FiniteAutomaton, config::DotConfig};

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Renders an automaton as a Graphviz `digraph`. Accepting states are drawn
/// as double circles and the initial state is pointed to by an invisible
/// `START` node.
pub fn to_graphviz(automaton: &FiniteAutomaton, config: &DotConfig) -> String {
    let mut dot = String::new();
    dot.push_str("digraph finite_state_machine {\n");
    dot.push_str("fontname=\"Helvetica,Arial,sans-serif\"\n");
    dot.push_str("node [fontname=\"Helvetica,Arial,sans-serif\"]\n");
    dot.push_str("edge [fontname=\"Helvetica,Arial,sans-serif\"]\n");
    dot.push_str(&format!("rankdir={};\n", config.rankdir.as_str()));
    dot.push_str("node [shape=point,label=\"\"]START\n");

    let accepting_states = automaton.final_states();

    if !accepting_states.is_empty() {
        dot.push_str(&format!(
            "node [shape = doublecircle]; {};\n",
            accepting_states
                .iter()
                .map(|node| node.index().to_string())
                .join(" ")
        ));
    }
    dot.push_str("node [shape = circle];\n");

    if let Some(start) = automaton.initial() {
        dot.push_str(&format!("START -> {};\n", start.index()));
    }

    for node in automaton.states() {
        let label = if config.show_state_labels {
            escape(automaton.label(node))
        } else {
            node.index().to_string()
        };

        dot.push_str(&format!("{} [ label=\"{}\" ];\n", node.index(), label));
    }

    // parallel edges are merged into one arrow with a comma separated label
    let edges = automaton
        .transitions()
        .map(|(source, label, target)| ((source, target), label))
        .into_group_map();

    for ((source, target), labels) in edges.into_iter().sorted() {
        dot.push_str(&format!(
            "{} -> {} [ label=\"{}\" ];\n",
            source.index(),
            target.index(),
            escape(&labels.iter().sorted().join(","))
        ));
    }

    dot.push_str("}\n");

    dot
}
