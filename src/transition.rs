/* Normalize the transitions of an automaton description into a lookup table keyed by origin
 * state and then by symbol. The builder never checks membership of the states or symbols it
 * sees, that is left to the validator. */

use crate::fa::{State, Symbol};
use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};

/// Mapping of origin state to the symbol keyed destinations leaving it. Iteration follows
/// insertion order.
pub type TransitionTable = IndexMap<State, IndexMap<Symbol, State>>;

/// A single (origin, symbol, destination) triple as it appears in a description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRecord {
    pub from_state: State,
    pub symbol: Symbol,
    pub to_state: State,
}

impl TransitionRecord {
    pub fn new(from_state: &str, symbol: &str, to_state: &str) -> Self {
        TransitionRecord {
            from_state: State::new(from_state),
            symbol: Symbol::new(symbol),
            to_state: State::new(to_state),
        }
    }
}

/// The two shapes the `transitions` field of a description may take.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Transitions {
    Table(TransitionTable),
    Records(Vec<TransitionRecord>),
}

impl Default for Transitions {
    fn default() -> Self {
        Transitions::Table(TransitionTable::new())
    }
}

impl Transitions {
    /// Turn either shape into a transition table, building it from the records when needed.
    pub fn into_table(self) -> TransitionTable {
        match self {
            Transitions::Table(table) => table,
            Transitions::Records(records) => build_transition_table(records),
        }
    }
}

/// Build a transition table from an ordered list of transition records. When two records share
/// the same origin and symbol the later destination replaces the earlier one.
pub fn build_transition_table<I>(records: I) -> TransitionTable
where
    I: IntoIterator<Item = TransitionRecord>,
{
    let mut table = TransitionTable::new();

    for record in records {
        let outgoing = table.entry(record.from_state.clone()).or_default();

        if let Some(previous) = outgoing.insert(record.symbol.clone(), record.to_state.clone()) {
            debug!(
                "Transition {} --{}--> {} replaced by {} --{}--> {}",
                record.from_state,
                record.symbol,
                previous,
                record.from_state,
                record.symbol,
                record.to_state
            );
        }
    }

    table
}
