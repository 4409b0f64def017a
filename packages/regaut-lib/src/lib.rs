pub mod automaton;
pub mod config;
pub mod format;
pub mod logger;
pub mod regex;
pub mod validation;

use automaton::{FiniteAutomaton, Language, minimization::Minimizable};

pub use automaton::isomorphism::{Isomorphism, are_equivalent};
pub use regex::{ParseError, build_automaton};

/// Subset construction, see [`FiniteAutomaton::determinize`].
pub fn determinize(automaton: &FiniteAutomaton) -> FiniteAutomaton {
    automaton.determinize()
}

/// Minimization of a deterministic automaton, see [`Minimizable::minimize`].
pub fn minimize(automaton: &FiniteAutomaton) -> FiniteAutomaton {
    automaton.minimize()
}

/// Checks if the automaton accepts `word`. Works on deterministic and
/// nondeterministic automata alike. Characters outside the alphabet are
/// rejected.
pub fn accepts(automaton: &FiniteAutomaton, word: &str) -> bool {
    let word: Vec<char> = word.chars().collect();
    automaton.accepts(&word)
}

/// Structural comparison of two deterministic automata, see
/// [`automaton::isomorphism::is_isomorphic`].
pub fn is_isomorphic(a: &FiniteAutomaton, b: &FiniteAutomaton) -> Option<Isomorphism> {
    automaton::isomorphism::is_isomorphic(a, b)
}
