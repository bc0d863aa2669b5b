use std::fmt;

use crate::charset::CharSet;

/// Selects which primitive automaton to build.
///
/// `Wildcard` and `EmptyString` only exist at construction sites; they are
/// never compared against input bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    Byte(u8),
    Wildcard,
    EmptyString,
}

impl From<u8> for Symbol {
    fn from(byte: u8) -> Self {
        Symbol::Byte(byte)
    }
}

/// Edge label of an automaton.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Label {
    Epsilon,
    Literal(u8),
    /// Any byte except newline.
    Wildcard,
    /// Negated classes are complemented before they get here.
    Class(CharSet),
}

impl Label {
    /// Whether this label consumes `byte`. Epsilon never does.
    pub fn matches(&self, byte: u8) -> bool {
        match self {
            Label::Epsilon => false,
            Label::Literal(c) => *c == byte,
            Label::Wildcard => byte != b'\n',
            Label::Class(set) => set.contains(byte),
        }
    }

    pub fn is_epsilon(&self) -> bool {
        matches!(self, Label::Epsilon)
    }
}

impl From<Symbol> for Label {
    fn from(symbol: Symbol) -> Self {
        match symbol {
            Symbol::Byte(c) => Label::Literal(c),
            Symbol::Wildcard => Label::Wildcard,
            Symbol::EmptyString => Label::Epsilon,
        }
    }
}

impl From<CharSet> for Label {
    fn from(set: CharSet) -> Self {
        Label::Class(set)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Epsilon => write!(f, "ε"),
            Label::Literal(c) => write!(f, "'{}'", std::ascii::escape_default(*c)),
            Label::Wildcard => write!(f, "."),
            Label::Class(set) => write!(f, "{set}"),
        }
    }
}
