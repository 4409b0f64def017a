use std::{fmt::Debug, hash::Hash};

pub mod determinize;
pub mod fa;
pub mod index_map;
pub mod isomorphism;
pub mod minimization;
pub mod node;
pub mod transition;

pub use fa::FiniteAutomaton;
pub use node::StateNode;
pub use transition::{EPSILON_MARKER, Transition};

/// Types that can be read by an automaton one at a time.
pub trait Letter: Debug + Clone + PartialEq + Eq + Hash + Ord {}

impl<T: Debug + Clone + PartialEq + Eq + Hash + Ord> Letter for T {}

pub trait Alphabet {
    type Letter: Letter;

    fn alphabet(&self) -> &[Self::Letter];
}

/// The basic trait for anything that defines a language over a set alphabet.
pub trait Language: Alphabet {
    fn accepts<'a>(&self, input: impl IntoIterator<Item = &'a Self::Letter>) -> bool
    where
        Self::Letter: 'a;
}
