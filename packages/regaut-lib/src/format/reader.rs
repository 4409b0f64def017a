//! Reader for the textual automaton notation used by fixtures.
//!
//! ```text
//! Automaton:
//! Symbols: ab
//!
//! q0
//! q1 final
//!
//! ini q0 -a-> q1
//! q1 -b-> q1
//! ```
//!
//! After the header and the alphabet, every line either declares a state
//! (optionally followed by `final`) or a transition `source -symbol-> target`.
//! Exactly one line carries the `ini` prefix, its state is the initial state.
//! The prefix normally sits on a transition line, a state without outgoing
//! transitions can carry it on its declaration line instead. The symbol `λ`
//! denotes an epsilon transition. Indentation and blank lines are ignored.
use hashbrown::HashMap;
use nom::{
    Parser,
    bytes::complete::{tag, take_till1},
    character::complete::{anychar, char, space0, space1},
    combinator::{eof, opt, rest},
    error::ParseError,
    sequence::terminated,
};
use petgraph::graph::NodeIndex;

use crate::{
    automaton::{FiniteAutomaton, StateNode, Transition, transition::EPSILON_MARKER},
    format::FormatError,
};

/// Words of the notation that cannot be used as state labels.
pub const RESERVED_LABELS: [&str; 2] = ["ini", "final"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateLine<'a> {
    pub initial: bool,
    pub label: &'a str,
    pub accepting: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionLine<'a> {
    pub initial: bool,
    pub source: &'a str,
    pub symbol: char,
    pub target: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    State(StateLine<'a>),
    Transition(TransitionLine<'a>),
}

fn header<'a, E: ParseError<&'a str>>(input: &'a str) -> nom::IResult<&'a str, &'a str, E> {
    terminated(tag("Automaton:"), eof).parse(input)
}

fn symbols<'a, E: ParseError<&'a str>>(input: &'a str) -> nom::IResult<&'a str, Vec<char>, E> {
    let (input, _) = tag("Symbols:")(input)?;
    let (input, list) = rest(input)?;

    Ok((input, list.chars().filter(|c| !c.is_whitespace()).collect()))
}

#[test]
fn test_symbols() {
    let (_, list) = symbols::<nom::error::Error<&str>>("Symbols: ba#").unwrap();
    assert_eq!(list, vec!['b', 'a', '#']);

    let (_, list) = symbols::<nom::error::Error<&str>>("Symbols:").unwrap();
    assert!(list.is_empty());
}

fn label<'a, E: ParseError<&'a str>>(input: &'a str) -> nom::IResult<&'a str, &'a str, E> {
    take_till1(|c: char| c.is_whitespace())(input)
}

fn initial_marker<'a, E: ParseError<&'a str>>(input: &'a str) -> nom::IResult<&'a str, bool, E> {
    let (input, marker) = opt(terminated(tag("ini"), space1)).parse(input)?;
    Ok((input, marker.is_some()))
}

// E.g., ini s0 -a-> s1
fn transition_line<'a, E: ParseError<&'a str>>(
    input: &'a str,
) -> nom::IResult<&'a str, TransitionLine<'a>, E> {
    let (input, initial) = initial_marker(input)?;
    let (input, source) = label(input)?;
    let (input, _) = space1(input)?;
    let (input, _) = char('-')(input)?;
    let (input, symbol) = anychar(input)?;
    let (input, _) = tag("->")(input)?;
    let (input, _) = space0(input)?;
    let (input, target) = label(input)?;
    let (input, _) = space0(input)?;
    let (input, _) = eof(input)?;

    Ok((
        input,
        TransitionLine {
            initial,
            source,
            symbol,
            target,
        },
    ))
}

#[test]
fn test_transition_line_1() {
    let (_, line) = transition_line::<nom::error::Error<&str>>("ini s3s0s2 -a-> s1s0s3").unwrap();
    assert!(line.initial);
    assert_eq!(line.source, "s3s0s2");
    assert_eq!(line.symbol, 'a');
    assert_eq!(line.target, "s1s0s3");
}

#[test]
fn test_transition_line_2() {
    // the minus sign is a valid symbol
    let (_, line) = transition_line::<nom::error::Error<&str>>("0 ---> 1").unwrap();
    assert!(!line.initial);
    assert_eq!(line.symbol, '-');

    let (_, line) = transition_line::<nom::error::Error<&str>>("0 -λ->1").unwrap();
    assert_eq!(line.symbol, 'λ');
    assert_eq!(line.target, "1");
}

#[test]
fn test_transition_line_3() {
    assert!(transition_line::<nom::error::Error<&str>>("0 -a-> 1 2").is_err());
    assert!(transition_line::<nom::error::Error<&str>>("0 final").is_err());
}

// E.g., s0 final
fn state_line<'a, E: ParseError<&'a str>>(
    input: &'a str,
) -> nom::IResult<&'a str, StateLine<'a>, E> {
    let (input, initial) = initial_marker(input)?;
    let (input, label) = label(input)?;
    let (input, _) = space0(input)?;
    let (input, accepting) = opt(tag("final")).parse(input)?;
    let (input, _) = space0(input)?;
    let (input, _) = eof(input)?;

    Ok((
        input,
        StateLine {
            initial,
            label,
            accepting: accepting.is_some(),
        },
    ))
}

#[test]
fn test_state_line() {
    let (_, line) = state_line::<nom::error::Error<&str>>("s0s8s4 final").unwrap();
    assert_eq!(
        line,
        StateLine {
            initial: false,
            label: "s0s8s4",
            accepting: true
        }
    );

    let (_, line) = state_line::<nom::error::Error<&str>>("ini 1").unwrap();
    assert!(line.initial);
    assert!(!line.accepting);
    assert_eq!(line.label, "1");

    assert!(state_line::<nom::error::Error<&str>>("1 accepting").is_err());
}

fn line<'a, E: ParseError<&'a str>>(input: &'a str) -> nom::IResult<&'a str, Line<'a>, E> {
    if let Ok((rest, transition)) = transition_line::<E>(input) {
        return Ok((rest, Line::Transition(transition)));
    }

    let (rest, state) = state_line(input)?;
    Ok((rest, Line::State(state)))
}

/// Reads an automaton from the textual notation.
pub fn read(input: &str) -> Result<FiniteAutomaton, FormatError> {
    let mut lines = input
        .lines()
        .enumerate()
        .map(|(i, content)| (i + 1, content.trim()))
        .filter(|(_, content)| !content.is_empty());

    match lines.next() {
        Some((_, content)) if header::<nom::error::Error<&str>>(content).is_ok() => {}
        _ => return Err(FormatError::MissingHeader),
    }

    let alphabet = match lines.next() {
        Some((_, content)) => match symbols::<nom::error::Error<&str>>(content) {
            Ok((_, alphabet)) => alphabet,
            Err(_) => return Err(FormatError::MissingSymbols),
        },
        None => return Err(FormatError::MissingSymbols),
    };

    if alphabet.contains(&EPSILON_MARKER) {
        return Err(FormatError::EpsilonSymbol);
    }

    let mut parsed = vec![];
    for (number, content) in lines {
        match line::<nom::error::Error<&str>>(content) {
            Ok((_, parsed_line)) => parsed.push((number, parsed_line)),
            Err(_) => {
                return Err(FormatError::Syntax {
                    line: number,
                    content: content.to_string(),
                });
            }
        }
    }

    let mut automaton = FiniteAutomaton::with_alphabet(alphabet.iter().copied());
    let mut states = HashMap::new();
    let mut initial = None;

    let mut mark_initial = |automaton: &mut FiniteAutomaton,
                            state: NodeIndex,
                            line: usize|
     -> Result<(), FormatError> {
        if initial.is_some() {
            return Err(FormatError::DuplicateInitial { line });
        }
        initial = Some(state);
        automaton.set_initial(state);
        Ok(())
    };

    // declarations first, so transitions may refer to any declared state
    for (number, parsed_line) in &parsed {
        if let Line::State(state) = parsed_line {
            if RESERVED_LABELS.contains(&state.label) {
                return Err(FormatError::ReservedLabel {
                    line: *number,
                    label: state.label.to_string(),
                });
            }

            if states.contains_key(state.label) {
                return Err(FormatError::DuplicateState {
                    line: *number,
                    label: state.label.to_string(),
                });
            }

            let index = automaton.add_state(StateNode::new(state.accepting, state.label));
            states.insert(state.label, index);

            if state.initial {
                mark_initial(&mut automaton, index, *number)?;
            }
        }
    }

    for (number, parsed_line) in &parsed {
        if let Line::Transition(transition) = parsed_line {
            let resolve = |label: &str| {
                states
                    .get(label)
                    .copied()
                    .ok_or_else(|| FormatError::UnknownState {
                        line: *number,
                        label: label.to_string(),
                    })
            };

            let source = resolve(transition.source)?;
            let target = resolve(transition.target)?;

            let label = Transition::from(transition.symbol);
            if let Transition::Symbol(symbol) = label
                && !alphabet.contains(&symbol)
            {
                return Err(FormatError::UnknownSymbol {
                    line: *number,
                    symbol,
                });
            }

            if transition.initial {
                mark_initial(&mut automaton, source, *number)?;
            }

            automaton.add_transition(source, target, label);
        }
    }

    if initial.is_none() {
        return Err(FormatError::MissingInitial);
    }

    Ok(automaton)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::Alphabet;

    #[test]
    fn test_read_fixture() {
        let automaton = read(
            r#"
            Automaton:
            Symbols: ab

            0 final
            1

            0 -a-> 0
            0 -b-> 1
            ini 1 -a-> 0
            1 -b-> 1
            "#,
        )
        .unwrap();

        assert_eq!(automaton.alphabet(), &['a', 'b']);
        assert_eq!(automaton.state_count(), 2);
        assert_eq!(automaton.transition_count(), 4);
        assert_eq!(automaton.label(automaton.get_initial()), "1");
        assert!(automaton.is_deterministic());
        assert!(automaton.accepts_str("ba"));
        assert!(!automaton.accepts_str("ab"));
    }

    #[test]
    fn test_read_initial_on_state_line() {
        let automaton = read("Automaton:\nSymbols: a\nini q final\n").unwrap();
        assert_eq!(automaton.state_count(), 1);
        assert!(automaton.accepts_str(""));
        assert!(!automaton.accepts_str("a"));
    }

    #[test]
    fn test_keywords_cannot_name_states() {
        assert_eq!(
            read("Automaton:\nSymbols: a\nq\nini\nini q -a-> q"),
            Err(FormatError::ReservedLabel {
                line: 4,
                label: "ini".into()
            })
        );
        assert_eq!(
            read("Automaton:\nSymbols: a\nfinal final\n"),
            Err(FormatError::ReservedLabel {
                line: 3,
                label: "final".into()
            })
        );
        assert_eq!(
            read("Automaton:\nSymbols: a\nini final\n"),
            Err(FormatError::ReservedLabel {
                line: 3,
                label: "final".into()
            })
        );
    }

    #[test]
    fn test_read_errors() {
        assert_eq!(read("Symbols: a"), Err(FormatError::MissingHeader));
        assert_eq!(read("Automaton:\nq0"), Err(FormatError::MissingSymbols));
        assert_eq!(
            read("Automaton:\nSymbols: a\nq0\nini q0 -a-> q1"),
            Err(FormatError::UnknownState {
                line: 4,
                label: "q1".into()
            })
        );
        assert_eq!(
            read("Automaton:\nSymbols: a\nq0\nini q0 -b-> q0"),
            Err(FormatError::UnknownSymbol { line: 4, symbol: 'b' })
        );
        assert_eq!(
            read("Automaton:\nSymbols: a\nq0\nini q0 -a-> q0\nini q0 -λ-> q0"),
            Err(FormatError::DuplicateInitial { line: 5 })
        );
        assert_eq!(
            read("Automaton:\nSymbols: a\nq0\nq0 final"),
            Err(FormatError::DuplicateState {
                line: 4,
                label: "q0".into()
            })
        );
        assert_eq!(
            read("Automaton:\nSymbols: a\nq0\nq0 -a-> q0"),
            Err(FormatError::MissingInitial)
        );
        assert_eq!(
            read("Automaton:\nSymbols: aλ\nq0"),
            Err(FormatError::EpsilonSymbol)
        );
        assert_eq!(
            read("Automaton:\nSymbols: a\nq0 => q0"),
            Err(FormatError::Syntax {
                line: 3,
                content: "q0 => q0".into()
            })
        );
    }
}
