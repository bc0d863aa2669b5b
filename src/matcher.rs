//! Acceptance by on-the-fly subset simulation.
//!
//! No DFA is built. The current state set is widened by epsilon closure,
//! stepped over one byte, and the process repeats until the input runs out
//! or the set becomes empty. The automaton is only read, so one compiled
//! pattern can be simulated against any number of lines.

use crate::nfa::{Automaton, StateId};

#[derive(Debug, Clone)]
struct StateSet {
    members: Vec<bool>,
    len: usize,
}

impl StateSet {
    fn new(state_count: usize) -> Self {
        Self {
            members: vec![false; state_count],
            len: 0,
        }
    }

    /// Returns true if the state was not already present.
    fn insert(&mut self, state: StateId) -> bool {
        if self.members[state] {
            return false;
        }
        self.members[state] = true;
        self.len += 1;
        true
    }

    fn contains(&self, state: StateId) -> bool {
        self.members[state]
    }

    fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Adds every state reachable over epsilon edges, scanning all edges until
/// a full pass adds nothing.
fn epsilon_closure(nfa: &Automaton, states: &mut StateSet) {
    loop {
        let mut changed = false;
        for edge in nfa.edges() {
            if edge.label.is_epsilon() && states.contains(edge.src) {
                changed |= states.insert(edge.dst);
            }
        }
        if !changed {
            break;
        }
    }
}

fn step(nfa: &Automaton, states: &StateSet, byte: u8) -> StateSet {
    let mut next = StateSet::new(nfa.state_count());
    for edge in nfa.edges() {
        if edge.label.matches(byte) && states.contains(edge.src) {
            next.insert(edge.dst);
        }
    }
    next
}

/// Whether `nfa` accepts the whole of `input`.
pub fn accept(nfa: &Automaton, input: &[u8]) -> bool {
    let mut states = StateSet::new(nfa.state_count());
    states.insert(nfa.start());

    for &byte in input {
        epsilon_closure(nfa, &mut states);
        states = step(nfa, &states, byte);
        if states.is_empty() {
            return false;
        }
    }

    epsilon_closure(nfa, &mut states);
    states.contains(nfa.final_state())
}
