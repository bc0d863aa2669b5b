use std::fmt;

use thiserror::Error;

/// A byte of the pattern, or the end of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Found(pub Option<u8>);

impl fmt::Display for Found {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(byte) => write!(f, "'{}'", std::ascii::escape_default(byte)),
            None => write!(f, "end of pattern"),
        }
    }
}

fn escaped(byte: &u8) -> std::ascii::EscapeDefault {
    std::ascii::escape_default(*byte)
}

/// Pattern syntax error. Offsets are byte positions in the pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("expected '{}' and got {found} at offset {offset}", escaped(.expected))]
    Expected {
        expected: u8,
        found: Found,
        offset: usize,
    },
    #[error("dangling '\\' at offset {offset}")]
    DanglingEscape { offset: usize },
}

impl SyntaxError {
    pub fn offset(&self) -> usize {
        match *self {
            SyntaxError::Expected { offset, .. }
            | SyntaxError::DanglingEscape { offset } => offset,
        }
    }
}

pub type Result<T> = std::result::Result<T, SyntaxError>;
