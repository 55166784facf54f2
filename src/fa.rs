use bitvec::prelude::BitVec;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// A named node of the automaton. Only equality is meaningful.
#[derive(Debug, PartialEq, Eq, Hash, Clone, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct State(String);

/// A named element of the input alphabet. Only equality is meaningful.
#[derive(Debug, PartialEq, Eq, Hash, Clone, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl State {
    pub fn new(name: impl Into<String>) -> Self {
        State(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Symbol {
    pub fn new(name: impl Into<String>) -> Self {
        Symbol(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Borrow<str> lets the tables be queried with a plain &str, which is how input
// characters are looked up during simulation without allocating.
impl Borrow<str> for State {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Symbol {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for State {
    fn from(name: &str) -> Self {
        State::new(name)
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Symbol::new(name)
    }
}

impl From<char> for Symbol {
    fn from(ch: char) -> Self {
        Symbol(ch.to_string())
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Read-only view of a finite automaton, shared by the renderers.
pub trait FA {
    fn get_num_states(&self) -> usize;
    fn get_states(&self) -> &IndexSet<State>;
    fn get_start_state(&self) -> Option<&State>;
    fn get_alphabet(&self) -> &IndexSet<Symbol>;
    /// Bit i is set when the i-th declared state is accepting.
    fn get_acceptor_states(&self) -> BitVec<u8>;
    fn get_state_transitions(&self, state: &State) -> Option<&IndexMap<Symbol, State>>;
}
