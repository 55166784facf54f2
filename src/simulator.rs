/* Deterministic simulation of an input string. The automaton is only read, so any number of
 * strings can be run against the same automaton concurrently. */

use crate::automaton::Automaton;
use crate::fa::FA;
use log::debug;
use serde::{Deserialize, Serialize};

/// Verdict for a single candidate string, echoing the string back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationResult {
    input: String,
    result: bool,
}

impl SimulationResult {
    pub fn new(input: String, result: bool) -> Self {
        SimulationResult { input, result }
    }
    /// Get the string which was simulated
    pub fn get_input(&self) -> &String {
        &self.input
    }
    /// True if the automaton accepted the string
    pub fn is_accepted(&self) -> bool {
        self.result
    }
}

/// Run `input` through the automaton one character at a time, starting at the initial state.
/// A character outside the alphabet or a missing transition rejects the string on the spot,
/// otherwise the string is accepted iff the scan ends in an accepting state.
///
/// The automaton is expected to have passed validation. An automaton without an initial state
/// rejects everything.
pub fn simulate(automaton: &Automaton, input: &str) -> bool {
    let mut state = match automaton.get_start_state() {
        Some(state) => state,
        None => return false,
    };

    let mut buf = [0u8; 4];

    for ch in input.chars() {
        let symbol: &str = ch.encode_utf8(&mut buf);

        if !automaton.has_symbol(symbol) {
            debug!("Rejecting {:?}: {:?} is not in the alphabet", input, ch);
            return false;
        }

        state = match automaton.next_state(state, symbol) {
            Some(next_state) => next_state,
            None => {
                debug!(
                    "Rejecting {:?}: no transition from {} on {:?}",
                    input, state, ch
                );
                return false;
            }
        };
    }

    automaton.is_accepting(state)
}

/// Simulate a string and pair the verdict with the string itself.
pub fn simulate_result(automaton: &Automaton, input: &str) -> SimulationResult {
    SimulationResult::new(input.to_string(), simulate(automaton, input))
}
