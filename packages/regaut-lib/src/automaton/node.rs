use serde::{Deserialize, Serialize};

/// A state of a [`FiniteAutomaton`](super::FiniteAutomaton).
/// It carries a boolean flag indicating whether the state is accepting and a
/// label. The label is only used for display and diagnostics, two states are
/// never compared by their labels.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct StateNode {
    pub accepting: bool,
    pub label: String,
}

impl StateNode {
    pub fn new(accepting: bool, label: impl Into<String>) -> Self {
        StateNode {
            accepting,
            label: label.into(),
        }
    }

    pub fn accepting(label: impl Into<String>) -> Self {
        StateNode::new(true, label)
    }

    pub fn non_accepting(label: impl Into<String>) -> Self {
        StateNode::new(false, label)
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}
