//! Recursive descent parser for regular expressions.
//!
//! ```text
//! expr   := term ('+' term)*
//! term   := factor ('.' factor)*
//! factor := atom '*'?
//! atom   := symbol | 'λ' | '(' expr ')'
//! ```
//!
//! Concatenation is always written with `.`, two atoms next to each other are
//! an error. There is no escaping, so the operator characters cannot be used
//! as symbols.
use crate::{
    automaton::EPSILON_MARKER,
    regex::{
        ast::Regex,
        error::{ParseError, ParseErrorKind},
    },
};

/// Where an atom is expected, used to report what is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Context {
    /// At the start of the input.
    Start,
    /// Right after the `(` at the given position.
    Group(usize),
    /// Right after a binary operator at the given position.
    Operator(char, usize),
}

/// Deepest allowed nesting of groups. Parsing, compiling and dropping a
/// [`Regex`] all recurse along the nesting.
pub const MAX_NESTING: usize = 512;

#[derive(Debug, Clone)]
pub struct Parser {
    chars: Vec<char>,
    position: usize,
    depth: usize,
}

impl Parser {
    pub fn new(input: &str) -> Self {
        Parser {
            chars: input.chars().collect(),
            position: 0,
            depth: 0,
        }
    }

    pub fn parse(mut self) -> Result<Regex, ParseError> {
        if self.chars.is_empty() {
            return Err(ParseError::new(ParseErrorKind::EmptyExpression, 0));
        }

        let regex = self.expr(Context::Start)?;

        match self.peek() {
            None => Ok(regex),
            Some(')') => Err(self.error(ParseErrorKind::UnbalancedParenthesis)),
            Some(c) => Err(self.error(ParseErrorKind::TrailingInput(c))),
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.position).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(kind, self.position)
    }

    fn expr(&mut self, context: Context) -> Result<Regex, ParseError> {
        let mut regex = self.term(context)?;

        while self.peek() == Some('+') {
            let operator = Context::Operator('+', self.position);
            self.advance();
            regex = regex.union(self.term(operator)?);
        }

        Ok(regex)
    }

    fn term(&mut self, context: Context) -> Result<Regex, ParseError> {
        let mut regex = self.factor(context)?;

        while self.peek() == Some('.') {
            let operator = Context::Operator('.', self.position);
            self.advance();
            regex = regex.concat(self.factor(operator)?);
        }

        Ok(regex)
    }

    fn factor(&mut self, context: Context) -> Result<Regex, ParseError> {
        let regex = self.atom(context)?;

        if self.peek() == Some('*') {
            self.advance();
            return Ok(regex.star());
        }

        Ok(regex)
    }

    fn atom(&mut self, context: Context) -> Result<Regex, ParseError> {
        let missing = |kind: ParseErrorKind, position: usize| match context {
            Context::Operator(operator, at) => {
                ParseError::new(ParseErrorKind::MissingOperand(operator), at)
            }
            _ => ParseError::new(kind, position),
        };

        match self.peek() {
            None => Err(match context {
                Context::Group(open) => {
                    ParseError::new(ParseErrorKind::UnbalancedParenthesis, open)
                }
                _ => missing(ParseErrorKind::UnexpectedEnd, self.position),
            }),
            Some('(') => {
                let open = self.position;
                if self.depth == MAX_NESTING {
                    return Err(ParseError::new(ParseErrorKind::NestingTooDeep, open));
                }

                self.advance();
                self.depth += 1;
                let inner = self.expr(Context::Group(open))?;
                self.depth -= 1;

                match self.peek() {
                    Some(')') => {
                        self.advance();
                        Ok(inner)
                    }
                    None => Err(ParseError::new(ParseErrorKind::UnbalancedParenthesis, open)),
                    Some(c) => Err(self.error(ParseErrorKind::UnexpectedCharacter(c))),
                }
            }
            Some(')') => Err(match context {
                Context::Group(_) => missing(ParseErrorKind::EmptyExpression, self.position),
                _ => missing(ParseErrorKind::UnbalancedParenthesis, self.position),
            }),
            Some(c @ ('+' | '.' | '*')) => {
                Err(missing(ParseErrorKind::MissingOperand(c), self.position))
            }
            Some(EPSILON_MARKER) => {
                self.advance();
                Ok(Regex::Empty)
            }
            Some(c) => {
                self.advance();
                Ok(Regex::Symbol(c))
            }
        }
    }
}

/// Parses a regular expression.
pub fn parse(input: &str) -> Result<Regex, ParseError> {
    Parser::new(input).parse()
}
