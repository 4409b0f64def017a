//! Regular expressions over single characters with union `+`, explicit
//! concatenation `.`, Kleene star `*`, grouping and the empty word `λ`.
pub mod ast;
pub mod compile;
pub mod error;
pub mod parser;

pub use ast::Regex;
pub use error::{ParseError, ParseErrorKind};

use crate::automaton::FiniteAutomaton;

/// Parses `input` and builds a nondeterministic automaton for it.
pub fn build_automaton(input: &str) -> Result<FiniteAutomaton, ParseError> {
    let regex = parser::parse(input)?;
    Ok(compile::compile(&regex))
}
