//! Thompson-construction automata.
//!
//! An [`Automaton`] owns an arena of labeled edges between integer states,
//! with exactly one start and one accepting state. States are never stored
//! on their own; they only exist as edge endpoints in `0..=max_state`.
//!
//! The combinators consume the left operand and copy the right one, shifting
//! the copy's state ids past the left operand's so the two never collide.

use std::fmt;

use crate::charset::CharSet;
use crate::matcher;
use crate::symbol::{Label, Symbol};

pub type StateId = usize;

/// Handle of an edge inside its automaton's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(usize);

impl EdgeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub label: Label,
    pub src: StateId,
    pub dst: StateId,
}

impl Edge {
    fn epsilon(src: StateId, dst: StateId) -> Self {
        Self {
            label: Label::Epsilon,
            src,
            dst,
        }
    }

    fn shifted(&self, delta: usize) -> Self {
        Self {
            label: self.label.clone(),
            src: self.src + delta,
            dst: self.dst + delta,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Automaton {
    edges: Vec<Edge>,
    start: StateId,
    final_state: StateId,
    max_state: StateId,
}

impl Automaton {
    /// Two states and a single `0 -> 1` edge carrying `label`.
    pub fn primitive(label: impl Into<Label>) -> Self {
        Self {
            edges: vec![Edge {
                label: label.into(),
                src: 0,
                dst: 1,
            }],
            start: 0,
            final_state: 1,
            max_state: 1,
        }
    }

    pub fn literal(byte: u8) -> Self {
        Self::primitive(Symbol::Byte(byte))
    }

    pub fn wildcard() -> Self {
        Self::primitive(Symbol::Wildcard)
    }

    pub fn empty_string() -> Self {
        Self::primitive(Symbol::EmptyString)
    }

    pub fn class(set: CharSet) -> Self {
        Self::primitive(set)
    }

    pub fn start(&self) -> StateId {
        self.start
    }

    pub fn final_state(&self) -> StateId {
        self.final_state
    }

    pub fn max_state(&self) -> StateId {
        self.max_state
    }

    pub fn state_count(&self) -> usize {
        self.max_state + 1
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.0]
    }

    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> {
        (0..self.edges.len()).map(EdgeId)
    }

    /// Accepts L(self) ∪ L(other).
    pub fn union(mut self, other: &Automaton) -> Automaton {
        let (other_start, other_final) = self.absorb(other);
        let new_start = self.fresh_state();
        let new_final = self.fresh_state();
        self.push(Edge::epsilon(new_start, self.start));
        self.push(Edge::epsilon(new_start, other_start));
        self.push(Edge::epsilon(self.final_state, new_final));
        self.push(Edge::epsilon(other_final, new_final));
        self.start = new_start;
        self.final_state = new_final;
        self
    }

    /// Accepts L(self)·L(other).
    pub fn concat(mut self, other: &Automaton) -> Automaton {
        let (other_start, other_final) = self.absorb(other);
        self.push(Edge::epsilon(self.final_state, other_start));
        self.final_state = other_final;
        self
    }

    /// Zero or more repetitions.
    ///
    /// The loop runs through the old final state: `new_start -> final`,
    /// `final -> start` and `final -> new_final`. No separate loop-entry
    /// state is allocated.
    pub fn kleene(mut self) -> Automaton {
        let new_start = self.fresh_state();
        let new_final = self.fresh_state();
        self.push(Edge::epsilon(new_start, self.final_state));
        self.push(Edge::epsilon(self.final_state, self.start));
        self.push(Edge::epsilon(self.final_state, new_final));
        self.start = new_start;
        self.final_state = new_final;
        self
    }

    /// One or more repetitions: `self · self*`.
    pub fn plus(self) -> Automaton {
        let rest = self.clone().kleene();
        self.concat(&rest)
    }

    /// Zero or one occurrence: `self | ε`.
    pub fn optional(self) -> Automaton {
        self.union(&Automaton::empty_string())
    }

    /// Runs the subset simulation of [`matcher::accept`] on `input`.
    pub fn accepts(&self, input: &[u8]) -> bool {
        matcher::accept(self, input)
    }

    /// Copies `other`'s edges into this arena, renumbered above `max_state`.
    /// Returns the renumbered start and final states of `other`.
    fn absorb(&mut self, other: &Automaton) -> (StateId, StateId) {
        let delta = self.max_state + 1;
        self.edges
            .extend(other.edges.iter().map(|edge| edge.shifted(delta)));
        self.max_state += other.max_state + 1;
        (other.start + delta, other.final_state + delta)
    }

    fn fresh_state(&mut self) -> StateId {
        self.max_state += 1;
        self.max_state
    }

    fn push(&mut self, edge: Edge) -> EdgeId {
        self.edges.push(edge);
        EdgeId(self.edges.len() - 1)
    }
}

impl From<Symbol> for Automaton {
    fn from(symbol: Symbol) -> Self {
        Self::primitive(symbol)
    }
}

impl From<CharSet> for Automaton {
    fn from(set: CharSet) -> Self {
        Self::primitive(set)
    }
}

impl fmt::Display for Automaton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "start: {}, final: {}, states: {}, edges: {}",
            self.start,
            self.final_state,
            self.state_count(),
            self.edges.len()
        )?;
        for edge in &self.edges {
            writeln!(f, "  {} -{}-> {}", edge.src, edge.label, edge.dst)?;
        }
        Ok(())
    }
}
