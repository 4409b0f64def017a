/// Errors raised while reading an automaton from its textual notation (or
/// from JSON). Line numbers are 1-based and count every line of the input.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("expected the header line `Automaton:`")]
    MissingHeader,
    #[error("expected the alphabet line `Symbols: ...` after the header")]
    MissingSymbols,
    #[error("line {line}: cannot parse `{content}`")]
    Syntax { line: usize, content: String },
    #[error("line {line}: state `{label}` was never declared")]
    UnknownState { line: usize, label: String },
    #[error("line {line}: state `{label}` is declared twice")]
    DuplicateState { line: usize, label: String },
    #[error("line {line}: a second state is marked as initial with `ini`")]
    DuplicateInitial { line: usize },
    #[error("no state is marked as initial with `ini`")]
    MissingInitial,
    #[error("line {line}: symbol `{symbol}` is not part of the declared alphabet")]
    UnknownSymbol { line: usize, symbol: char },
    #[error("state index {index} is out of range")]
    InvalidStateIndex { index: usize },
    #[error("the epsilon marker `λ` cannot be used as a symbol")]
    EpsilonSymbol,
    #[error("line {line}: `{label}` is a keyword and cannot name a state")]
    ReservedLabel { line: usize, label: String },
}
