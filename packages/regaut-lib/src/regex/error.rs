#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("unexpected end of input")]
    UnexpectedEnd,
    #[error("unexpected character `{0}`")]
    UnexpectedCharacter(char),
    #[error("unbalanced parenthesis")]
    UnbalancedParenthesis,
    #[error("operator `{0}` is missing an operand")]
    MissingOperand(char),
    #[error("unexpected `{0}` after the end of the expression")]
    TrailingInput(char),
    #[error("empty expression, write `λ` for the empty word")]
    EmptyExpression,
    #[error("groups are nested too deeply")]
    NestingTooDeep,
}

/// A malformed regular expression. The position counts characters, not
/// bytes, from the start of the input.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{kind} at position {position}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub position: usize,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, position: usize) -> Self {
        ParseError { kind, position }
    }
}
