use std::{fmt::Display, str::FromStr};

use crate::{
    automaton::EPSILON_MARKER,
    regex::{error::ParseError, parser::Parser},
};

/// The characters with a meaning in the regular expression syntax. All other
/// characters stand for themselves.
pub const OPERATORS: [char; 6] = ['+', '.', '*', '(', ')', EPSILON_MARKER];

/// A parsed regular expression. Binary operators are left associative, so
/// `a+b+c` is `Union(Union(a, b), c)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Regex {
    /// The empty word, written `λ`.
    Empty,
    Symbol(char),
    Concat(Box<Regex>, Box<Regex>),
    Union(Box<Regex>, Box<Regex>),
    Star(Box<Regex>),
}

impl Regex {
    pub fn symbol(symbol: char) -> Self {
        assert!(
            !OPERATORS.contains(&symbol),
            "`{}` is an operator and cannot be used as a symbol",
            symbol
        );
        Regex::Symbol(symbol)
    }

    pub fn concat(self, other: Regex) -> Self {
        Regex::Concat(Box::new(self), Box::new(other))
    }

    pub fn union(self, other: Regex) -> Self {
        Regex::Union(Box::new(self), Box::new(other))
    }

    pub fn star(self) -> Self {
        Regex::Star(Box::new(self))
    }

    /// The distinct symbols in order of first occurrence.
    pub fn symbols(&self) -> Vec<char> {
        let mut symbols = vec![];
        self.collect_symbols(&mut symbols);
        symbols
    }

    fn collect_symbols(&self, symbols: &mut Vec<char>) {
        match self {
            Regex::Empty => {}
            Regex::Symbol(symbol) => {
                if !symbols.contains(symbol) {
                    symbols.push(*symbol);
                }
            }
            Regex::Concat(left, right) | Regex::Union(left, right) => {
                left.collect_symbols(symbols);
                right.collect_symbols(symbols);
            }
            Regex::Star(inner) => inner.collect_symbols(symbols),
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            Regex::Union(..) => 0,
            Regex::Concat(..) => 1,
            Regex::Star(..) => 2,
            Regex::Empty | Regex::Symbol(_) => 3,
        }
    }

    fn fmt_with_precedence(&self, f: &mut std::fmt::Formatter<'_>, min: u8) -> std::fmt::Result {
        let parenthesize = self.precedence() < min;
        if parenthesize {
            write!(f, "(")?;
        }

        match self {
            Regex::Empty => write!(f, "{}", EPSILON_MARKER)?,
            Regex::Symbol(symbol) => write!(f, "{}", symbol)?,
            Regex::Union(left, right) => {
                left.fmt_with_precedence(f, 0)?;
                write!(f, "+")?;
                right.fmt_with_precedence(f, 1)?;
            }
            Regex::Concat(left, right) => {
                left.fmt_with_precedence(f, 1)?;
                write!(f, ".")?;
                right.fmt_with_precedence(f, 2)?;
            }
            Regex::Star(inner) => {
                inner.fmt_with_precedence(f, 3)?;
                write!(f, "*")?;
            }
        }

        if parenthesize {
            write!(f, ")")?;
        }

        Ok(())
    }
}

/// Writes the expression with as few parentheses as possible. The output
/// parses back to the same tree.
impl Display for Regex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.fmt_with_precedence(f, 0)
    }
}

impl FromStr for Regex {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Parser::new(s).parse()
    }
}
