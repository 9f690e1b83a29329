//! Front-end errors.

use realign_ir::SpanError;
use thiserror::Error;

/// A source file the lexer cannot tokenize.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Error)]
pub enum LexError {
    #[error("line {line}: string literal not terminated")]
    UnterminatedString { line: u32 },
    #[error("line {line}: rune literal not terminated")]
    UnterminatedRune { line: u32 },
    #[error("line {line}: raw string literal not terminated")]
    UnterminatedRawString { line: u32 },
    #[error("line {line}: comment not terminated")]
    UnterminatedComment { line: u32 },
    #[error("line {line}: unexpected character {ch:?}")]
    UnexpectedChar { ch: char, line: u32 },
    #[error(transparent)]
    TooLarge(#[from] SpanError),
}

/// A source file the parser cannot make sense of.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error("line {line}: expected {expected}, found {found}")]
    Expected {
        expected: &'static str,
        found: String,
        line: u32,
    },
    #[error("missing package clause")]
    MissingPackage,
}
