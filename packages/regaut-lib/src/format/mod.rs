//! Conversions between automata and text: the fixture notation (`reader`,
//! `writer`) and Graphviz (`dot`). JSON goes through serde on
//! [`FiniteAutomaton`](crate::automaton::FiniteAutomaton) itself.
pub mod dot;
pub mod error;
pub mod reader;
pub mod writer;

pub use error::FormatError;
