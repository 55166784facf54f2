/* Structural validation of an automaton. Every check is a separate function which looks at the
 * automaton and reports zero or more defects. validate runs all of them in a fixed order and
 * gathers everything it finds, it never stops at the first problem. */

use crate::automaton::Automaton;
use crate::fa::{State, Symbol, FA};
use serde::{Serialize, Serializer};
use std::fmt;

/// One way in which an automaton fails to be well formed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Defect {
    /// No states were declared
    MissingStates,
    /// No alphabet was declared
    MissingAlphabet,
    /// No initial state was declared
    MissingInitialState,
    /// The initial state is not one of the declared states
    UnknownInitialState(State),
    /// No accepting states were declared
    MissingAcceptStates,
    /// At least one accepting state is not one of the declared states
    UnknownAcceptState,
    /// A transition uses a symbol outside the alphabet
    UnknownSymbol { state: State, symbol: Symbol },
    /// Transitions are declared for an undeclared origin state
    UnknownOrigin(State),
    /// A transition leads to an undeclared state
    UnknownDestination {
        state: State,
        symbol: Symbol,
        destination: State,
    },
    /// A declared state has no entry in the transition table
    NoTransitionsFrom(State),
    /// The transition table is empty
    MissingTransitions,
}

impl fmt::Display for Defect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Defect::MissingStates => write!(f, "states are not defined or type is incorrect."),
            Defect::MissingAlphabet => {
                write!(f, "alphabet is not defined or type is incorrect.")
            }
            Defect::MissingInitialState => write!(f, "no initial state defined."),
            Defect::UnknownInitialState(state) => {
                write!(f, "initial state '{}' does not exist.", state)
            }
            Defect::MissingAcceptStates => write!(f, "no accepting states defined."),
            Defect::UnknownAcceptState => write!(
                f,
                "some accepting state does not exist in the list of states"
            ),
            Defect::UnknownSymbol { state, symbol } => write!(
                f,
                "symbol '{}' in transitions of state '{}' is not in the alphabet",
                symbol, state
            ),
            Defect::UnknownOrigin(state) => {
                write!(f, "state '{}' in transitions does not exist", state)
            }
            Defect::UnknownDestination {
                state,
                symbol,
                destination,
            } => write!(
                f,
                "destination state '{}' of transition '{}' --'{}'--> does not exist",
                destination, state, symbol
            ),
            Defect::NoTransitionsFrom(state) => {
                write!(f, "state '{}' has no defined transitions", state)
            }
            Defect::MissingTransitions => write!(f, "no transitions defined"),
        }
    }
}

impl Serialize for Defect {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// The ordered list of defects found in one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationResult {
    defects: Vec<Defect>,
}

impl ValidationResult {
    /// True when no defect was found
    pub fn is_valid(&self) -> bool {
        self.defects.is_empty()
    }

    pub fn get_defects(&self) -> &[Defect] {
        &self.defects
    }

    pub fn first(&self) -> Option<&Defect> {
        self.defects.first()
    }

    pub fn messages(&self) -> Vec<String> {
        self.defects.iter().map(|defect| defect.to_string()).collect()
    }

    pub fn into_defects(self) -> Vec<Defect> {
        self.defects
    }
}

fn check_states(automaton: &Automaton) -> Vec<Defect> {
    if automaton.get_states().is_empty() {
        vec![Defect::MissingStates]
    } else {
        vec![]
    }
}

fn check_alphabet(automaton: &Automaton) -> Vec<Defect> {
    if automaton.get_alphabet().is_empty() {
        vec![Defect::MissingAlphabet]
    } else {
        vec![]
    }
}

fn check_initial_state(automaton: &Automaton) -> Vec<Defect> {
    match automaton.get_start_state() {
        None => vec![Defect::MissingInitialState],
        Some(state) if !automaton.has_state(state) => {
            vec![Defect::UnknownInitialState(state.clone())]
        }
        Some(_) => vec![],
    }
}

fn check_accept_states(automaton: &Automaton) -> Vec<Defect> {
    let accept_states = automaton.get_accept_states();

    if accept_states.is_empty() {
        return vec![Defect::MissingAcceptStates];
    }

    // A single defect no matter how many accepting states are unknown
    if accept_states.iter().all(|state| automaton.has_state(state)) {
        vec![]
    } else {
        vec![Defect::UnknownAcceptState]
    }
}

fn check_transition_members(automaton: &Automaton) -> Vec<Defect> {
    let mut defects = Vec::new();

    for (state, outgoing) in automaton.get_transitions() {
        for symbol in outgoing.keys() {
            if !automaton.has_symbol(symbol.as_str()) {
                defects.push(Defect::UnknownSymbol {
                    state: state.clone(),
                    symbol: symbol.clone(),
                });
            }
        }

        if !automaton.has_state(state) {
            defects.push(Defect::UnknownOrigin(state.clone()));
        }

        for (symbol, destination) in outgoing {
            if !automaton.has_state(destination) {
                defects.push(Defect::UnknownDestination {
                    state: state.clone(),
                    symbol: symbol.clone(),
                    destination: destination.clone(),
                });
            }
        }
    }

    defects
}

// Only asks that each state has an entry in the table, not that the entry covers the whole
// alphabet. Missing symbols reject at simulation time instead.
fn check_transition_coverage(automaton: &Automaton) -> Vec<Defect> {
    let transitions = automaton.get_transitions();

    automaton
        .get_states()
        .iter()
        .filter(|state| !transitions.contains_key(*state))
        .map(|state| Defect::NoTransitionsFrom(state.clone()))
        .collect()
}

fn check_transitions(automaton: &Automaton) -> Vec<Defect> {
    if automaton.get_transitions().is_empty() {
        return vec![Defect::MissingTransitions];
    }

    let mut defects = check_transition_members(automaton);
    defects.extend(check_transition_coverage(automaton));
    defects
}

/// Validate the structure of an automaton and return every defect found, in check order. An
/// empty result means the automaton can be simulated.
pub fn validate(automaton: &Automaton) -> ValidationResult {
    let checks: [fn(&Automaton) -> Vec<Defect>; 5] = [
        check_states,
        check_alphabet,
        check_initial_state,
        check_accept_states,
        check_transitions,
    ];

    let defects: Vec<Defect> = checks.iter().flat_map(|check| check(automaton)).collect();

    ValidationResult { defects }
}

#[cfg(test)]
mod validator_tests {
    use super::*;
    use crate::automaton::AutomatonDescription;

    fn automaton_from_json(json: &str) -> Automaton {
        let description: AutomatonDescription = serde_json::from_str(json).unwrap();
        Automaton::from(description)
    }

    fn parity_automaton() -> Automaton {
        automaton_from_json(
            r#"{
                "states": ["q0", "q1"],
                "alphabet": ["0", "1"],
                "transitions": {"q0": {"0": "q0", "1": "q1"}, "q1": {"0": "q1", "1": "q0"}},
                "initial_state": "q0",
                "acceptance_states": ["q1"]
            }"#,
        )
    }

    #[test]
    fn test_valid_automaton() {
        let result = validate(&parity_automaton());
        assert!(result.is_valid());
        assert!(result.get_defects().is_empty());
        assert!(result.first().is_none());
    }

    #[test]
    fn test_everything_missing() {
        let result = validate(&automaton_from_json("{}"));

        assert_eq!(
            result.into_defects(),
            vec![
                Defect::MissingStates,
                Defect::MissingAlphabet,
                Defect::MissingInitialState,
                Defect::MissingAcceptStates,
                Defect::MissingTransitions,
            ]
        );
    }

    #[test]
    fn test_unknown_initial_and_accept_states() {
        let automaton = automaton_from_json(
            r#"{
                "states": ["q0"],
                "alphabet": ["0", "1"],
                "transitions": {},
                "initial_state": "q2",
                "acceptance_states": ["q3"]
            }"#,
        );

        let result = validate(&automaton);
        assert!(!result.is_valid());
        assert_eq!(
            result.messages(),
            vec![
                "initial state 'q2' does not exist.".to_string(),
                "some accepting state does not exist in the list of states".to_string(),
                "no transitions defined".to_string(),
            ]
        );
    }

    #[test]
    fn test_accept_state_defect_is_aggregated() {
        let automaton = automaton_from_json(
            r#"{"states": ["q0"], "acceptance_states": ["q0", "x", "y", "z"]}"#,
        );

        let defects = check_accept_states(&automaton);
        assert_eq!(defects, vec![Defect::UnknownAcceptState]);
    }

    #[test]
    fn test_transition_member_defects_in_table_order() {
        let automaton = automaton_from_json(
            r#"{
                "states": ["q0", "q1"],
                "alphabet": ["a"],
                "transitions": {
                    "q0": {"a": "q1", "b": "q9"},
                    "qx": {"a": "q0"},
                    "q1": {"a": "q0"}
                },
                "initial_state": "q0",
                "acceptance_states": ["q1"]
            }"#,
        );

        let defects = check_transition_members(&automaton);
        assert_eq!(
            defects,
            vec![
                Defect::UnknownSymbol {
                    state: State::new("q0"),
                    symbol: Symbol::new("b"),
                },
                Defect::UnknownDestination {
                    state: State::new("q0"),
                    symbol: Symbol::new("b"),
                    destination: State::new("q9"),
                },
                Defect::UnknownOrigin(State::new("qx")),
            ]
        );
        assert!(check_transition_coverage(&automaton).is_empty());
    }

    #[test]
    fn test_state_without_transitions() {
        let automaton = automaton_from_json(
            r#"{
                "states": ["q0", "q1"],
                "alphabet": ["a", "b"],
                "transitions": [{"from_state": "q0", "symbol": "a", "to_state": "q1"}],
                "initial_state": "q0",
                "acceptance_states": ["q1"]
            }"#,
        );

        let result = validate(&automaton);
        assert_eq!(result.messages(), vec!["state 'q1' has no defined transitions"]);
    }

    #[test]
    fn test_empty_table_skips_coverage() {
        let automaton = automaton_from_json(r#"{"states": ["q0", "q1"]}"#);

        let defects = check_transitions(&automaton);
        assert_eq!(defects, vec![Defect::MissingTransitions]);
    }

    #[test]
    fn test_partial_alphabet_coverage_is_valid() {
        let automaton = automaton_from_json(
            r#"{
                "states": ["q0"],
                "alphabet": ["a", "b"],
                "transitions": {"q0": {"a": "q0"}},
                "initial_state": "q0",
                "acceptance_states": ["q0"]
            }"#,
        );

        assert!(validate(&automaton).is_valid());
    }

    #[test]
    fn test_defect_serializes_as_message() {
        let json = serde_json::to_string(&Defect::NoTransitionsFrom(State::new("q1"))).unwrap();
        assert_eq!(json, r#""state 'q1' has no defined transitions""#);
    }
}
