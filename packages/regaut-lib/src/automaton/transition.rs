use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// The character used to write the empty word, both in regular expressions
/// and in the textual automaton notation.
pub const EPSILON_MARKER: char = 'λ';

/// The label of an edge in a [`FiniteAutomaton`](super::FiniteAutomaton).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Transition {
    Symbol(char),
    Epsilon,
}

impl Transition {
    pub fn is_epsilon(&self) -> bool {
        matches!(self, Transition::Epsilon)
    }

    pub fn symbol(&self) -> Option<char> {
        match self {
            Transition::Symbol(s) => Some(*s),
            Transition::Epsilon => None,
        }
    }

    /// Checks whether this edge can be taken when reading `letter`.
    /// Epsilon edges never match a letter.
    pub fn matches(&self, letter: &char) -> bool {
        match self {
            Transition::Symbol(s) => s == letter,
            Transition::Epsilon => false,
        }
    }
}

impl From<Option<char>> for Transition {
    fn from(value: Option<char>) -> Self {
        match value {
            Some(s) => Transition::Symbol(s),
            None => Transition::Epsilon,
        }
    }
}

impl From<char> for Transition {
    fn from(value: char) -> Self {
        if value == EPSILON_MARKER {
            Transition::Epsilon
        } else {
            Transition::Symbol(value)
        }
    }
}

impl Display for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Transition::Symbol(s) => write!(f, "{s}"),
            Transition::Epsilon => write!(f, "{EPSILON_MARKER}"),
        }
    }
}

#[test]
fn test_marker_is_epsilon() {
    assert_eq!(Transition::from('λ'), Transition::Epsilon);
    assert_eq!(Transition::from('a'), Transition::Symbol('a'));
    assert_eq!(Transition::Epsilon.to_string(), "λ");
    assert!(!Transition::Epsilon.matches(&'λ'));
}
