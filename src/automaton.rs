use crate::fa::{State, Symbol, FA};
use crate::transition::{TransitionTable, Transitions};
use bitvec::prelude::*;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Identifier reported for descriptions which do not carry one.
pub const UNKNOWN_ID: &str = "<unknown>";

/// The identifier of a description, echoed back in its report. Submitters use both strings and
/// numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AutomatonId {
    Text(String),
    Number(serde_json::Number),
}

impl AutomatonId {
    pub fn unknown() -> Self {
        AutomatonId::Text(UNKNOWN_ID.to_string())
    }
}

impl fmt::Display for AutomatonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AutomatonId::Text(text) => write!(f, "{}", text),
            AutomatonId::Number(number) => write!(f, "{}", number),
        }
    }
}

// Ids of any other JSON type are dropped instead of failing the whole description, the
// automaton is then reported as <unknown>.
fn deserialize_lenient_id<'de, D>(deserializer: D) -> Result<Option<AutomatonId>, D::Error>
where
    D: Deserializer<'de>,
{
    let id: Option<Value> = Option::deserialize(deserializer)?;
    Ok(id.and_then(|id| serde_json::from_value(id).ok()))
}

impl From<&str> for AutomatonId {
    fn from(id: &str) -> Self {
        AutomatonId::Text(id.to_string())
    }
}

/// An automaton as it is submitted, before its transitions are normalized. Every field may be
/// missing, the validator is the one which decides what is acceptable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AutomatonDescription {
    #[serde(default, deserialize_with = "deserialize_lenient_id")]
    pub id: Option<AutomatonId>,
    #[serde(default)]
    pub states: Option<Vec<State>>,
    #[serde(default)]
    pub alphabet: Option<Vec<Symbol>>,
    #[serde(default)]
    pub transitions: Option<Transitions>,
    #[serde(default)]
    pub initial_state: Option<State>,
    #[serde(default)]
    pub acceptance_states: Option<Vec<State>>,
    #[serde(default, alias = "test_string")]
    pub test_strings: Option<Vec<String>>,
}

impl AutomatonDescription {
    pub fn id(&self) -> AutomatonId {
        self.id.clone().unwrap_or_else(AutomatonId::unknown)
    }

    /// The candidate strings to simulate, in the order they were given.
    pub fn candidates(&self) -> &[String] {
        self.test_strings.as_deref().unwrap_or(&[])
    }
}

/// A structured automaton. It is built once per description and never mutated afterwards, so a
/// shared reference can be simulated from several threads at once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Automaton {
    states: IndexSet<State>,
    alphabet: IndexSet<Symbol>,
    transitions: TransitionTable,
    initial_state: Option<State>,
    accept_states: IndexSet<State>,
}

impl FA for Automaton {
    fn get_num_states(&self) -> usize {
        self.states.len()
    }

    fn get_states(&self) -> &IndexSet<State> {
        &self.states
    }

    fn get_start_state(&self) -> Option<&State> {
        self.initial_state.as_ref()
    }

    fn get_alphabet(&self) -> &IndexSet<Symbol> {
        &self.alphabet
    }

    fn get_acceptor_states(&self) -> BitVec<u8> {
        let mut acceptors: BitVec<u8> = BitVec::repeat(false, self.states.len());
        for accept in self.accept_states.iter() {
            if let Some(idx) = self.states.get_index_of(accept) {
                acceptors.set(idx, true);
            }
        }
        acceptors
    }

    fn get_state_transitions(&self, state: &State) -> Option<&IndexMap<Symbol, State>> {
        self.transitions.get(state)
    }
}

impl Automaton {
    pub fn new(
        states: IndexSet<State>,
        alphabet: IndexSet<Symbol>,
        transitions: TransitionTable,
        initial_state: Option<State>,
        accept_states: IndexSet<State>,
    ) -> Self {
        Automaton {
            states,
            alphabet,
            transitions,
            initial_state,
            accept_states,
        }
    }

    /// Build an automaton from a description. Missing collections become empty ones and an
    /// empty initial state name counts as no initial state.
    pub fn from_description(description: AutomatonDescription) -> Self {
        let states: IndexSet<State> = description.states.unwrap_or_default().into_iter().collect();
        let alphabet: IndexSet<Symbol> = description
            .alphabet
            .unwrap_or_default()
            .into_iter()
            .collect();
        let transitions = description.transitions.unwrap_or_default().into_table();
        let initial_state = description.initial_state.filter(|state| !state.is_empty());
        let accept_states: IndexSet<State> = description
            .acceptance_states
            .unwrap_or_default()
            .into_iter()
            .collect();

        Automaton::new(
            states,
            alphabet,
            transitions,
            initial_state,
            accept_states,
        )
    }

    pub fn get_transitions(&self) -> &TransitionTable {
        &self.transitions
    }

    pub fn get_accept_states(&self) -> &IndexSet<State> {
        &self.accept_states
    }

    pub fn has_state(&self, state: &State) -> bool {
        self.states.contains(state)
    }

    pub fn has_symbol(&self, symbol: &str) -> bool {
        self.alphabet.contains(symbol)
    }

    pub fn is_accepting(&self, state: &State) -> bool {
        self.accept_states.contains(state)
    }

    /// Destination reached from `state` on `symbol`, if such a transition is defined.
    pub fn next_state(&self, state: &State, symbol: &str) -> Option<&State> {
        self.transitions.get(state)?.get(symbol)
    }
}

impl From<AutomatonDescription> for Automaton {
    fn from(description: AutomatonDescription) -> Self {
        Automaton::from_description(description)
    }
}
