use std::fmt;
use std::str::FromStr;

use crate::error::SyntaxError;
use crate::nfa::Automaton;
use crate::parser::parse_regex;

/// Which outer anchors the pattern carried.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Anchors {
    pub start: bool,
    pub end: bool,
}

/// A compiled pattern: the source bytes plus the automaton built from them.
///
/// The automaton already includes the implicit `.*` on each unanchored
/// side, so [`Regex::find_match`] is a whole-line acceptance check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Regex {
    pattern: Vec<u8>,
    anchors: Anchors,
    nfa: Automaton,
}

impl Regex {
    pub(crate) fn new(pattern: Vec<u8>, anchors: Anchors, nfa: Automaton) -> Self {
        Self {
            pattern,
            anchors,
            nfa,
        }
    }

    pub fn find_match(&self, line: impl AsRef<[u8]>) -> bool {
        self.nfa.accepts(line.as_ref())
    }

    pub fn pattern(&self) -> &[u8] {
        &self.pattern
    }

    pub fn anchors(&self) -> Anchors {
        self.anchors
    }

    pub fn automaton(&self) -> &Automaton {
        &self.nfa
    }
}

impl FromStr for Regex {
    type Err = SyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_regex(s)
    }
}

impl fmt::Display for Regex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.pattern))
    }
}
