// Property-based tests for the validator and the simulator
//
// Well formed automata are generated over a small state and alphabet space with a complete
// transition function, then the properties are checked against them.

use fasim::fa::{State, Symbol, FA};
use fasim::transition::{build_transition_table, TransitionRecord, TransitionTable};
use fasim::validator::Defect;
use fasim::{simulate, validate, Automaton};
use indexmap::IndexSet;
use proptest::prelude::*;

// ============================================================================
// GENERATORS
// ============================================================================

const ALPHABET: [&str; 3] = ["a", "b", "c"];

/// (number of states, alphabet size, destination per (state, symbol), accepting flags, initial)
fn dfa_parts() -> impl Strategy<Value = (usize, usize, Vec<usize>, Vec<bool>, usize)> {
    (1usize..6, 1usize..=3).prop_flat_map(|(num_states, num_symbols)| {
        (
            Just(num_states),
            Just(num_symbols),
            prop::collection::vec(0..num_states, num_states * num_symbols),
            prop::collection::vec(any::<bool>(), num_states),
            0..num_states,
        )
    })
}

fn build_dfa(
    num_states: usize,
    num_symbols: usize,
    destinations: &[usize],
    accepting: &[bool],
    initial: usize,
) -> Automaton {
    let name = |idx: usize| format!("q{}", idx);

    let states: IndexSet<State> = (0..num_states).map(|idx| State::new(name(idx))).collect();
    let alphabet: IndexSet<Symbol> = ALPHABET[..num_symbols]
        .iter()
        .map(|symbol| Symbol::from(*symbol))
        .collect();

    let mut records = Vec::new();
    for state in 0..num_states {
        for (symbol_idx, symbol) in ALPHABET[..num_symbols].iter().enumerate() {
            let destination = destinations[state * num_symbols + symbol_idx];
            records.push(TransitionRecord::new(&name(state), symbol, &name(destination)));
        }
    }

    let mut accept_states: IndexSet<State> = accepting
        .iter()
        .enumerate()
        .filter(|(_, accept)| **accept)
        .map(|(idx, _)| State::new(name(idx)))
        .collect();
    if accept_states.is_empty() {
        accept_states.insert(State::new(name(0)));
    }

    Automaton::new(
        states,
        alphabet,
        build_transition_table(records),
        Some(State::new(name(initial))),
        accept_states,
    )
}

/// Strings over the full alphabet plus a symbol which is never declared
fn input_string() -> impl Strategy<Value = String> {
    "[abcz]{0,12}"
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    #[test]
    fn well_formed_automata_validate((n, k, dest, acc, init) in dfa_parts()) {
        let automaton = build_dfa(n, k, &dest, &acc, init);
        let result = validate(&automaton);

        prop_assert!(result.is_valid());
        prop_assert!(result.get_defects().is_empty());
    }

    #[test]
    fn emptying_states_is_reported((n, k, dest, acc, init) in dfa_parts()) {
        let automaton = build_dfa(n, k, &dest, &acc, init);
        let emptied = Automaton::new(
            IndexSet::new(),
            automaton.get_alphabet().clone(),
            automaton.get_transitions().clone(),
            Some(State::new(format!("q{}", init))),
            automaton.get_accept_states().clone(),
        );

        let result = validate(&emptied);
        prop_assert!(!result.is_valid());
        prop_assert_eq!(result.first(), Some(&Defect::MissingStates));
        prop_assert!(result.messages().iter().any(|m| m.contains("states")));
    }

    #[test]
    fn emptying_alphabet_is_reported((n, k, dest, acc, init) in dfa_parts()) {
        let automaton = build_dfa(n, k, &dest, &acc, init);
        let emptied = Automaton::new(
            automaton.get_states().clone(),
            IndexSet::new(),
            automaton.get_transitions().clone(),
            Some(State::new(format!("q{}", init))),
            automaton.get_accept_states().clone(),
        );

        let result = validate(&emptied);
        prop_assert!(result.get_defects().contains(&Defect::MissingAlphabet));
        prop_assert!(result.messages().iter().any(|m| m.contains("alphabet")));
    }

    #[test]
    fn emptying_initial_state_is_reported((n, k, dest, acc, init) in dfa_parts()) {
        let automaton = build_dfa(n, k, &dest, &acc, init);
        let emptied = Automaton::new(
            automaton.get_states().clone(),
            automaton.get_alphabet().clone(),
            automaton.get_transitions().clone(),
            None,
            automaton.get_accept_states().clone(),
        );

        let result = validate(&emptied);
        prop_assert_eq!(result.get_defects(), &[Defect::MissingInitialState][..]);
        prop_assert!(result.messages().iter().any(|m| m.contains("initial state")));
    }

    #[test]
    fn emptying_accept_states_is_reported((n, k, dest, acc, init) in dfa_parts()) {
        let automaton = build_dfa(n, k, &dest, &acc, init);
        let emptied = Automaton::new(
            automaton.get_states().clone(),
            automaton.get_alphabet().clone(),
            automaton.get_transitions().clone(),
            Some(State::new(format!("q{}", init))),
            IndexSet::new(),
        );

        let result = validate(&emptied);
        prop_assert_eq!(result.get_defects(), &[Defect::MissingAcceptStates][..]);
        prop_assert!(result.messages().iter().any(|m| m.contains("accepting")));
    }

    #[test]
    fn emptying_transitions_is_reported((n, k, dest, acc, init) in dfa_parts()) {
        let automaton = build_dfa(n, k, &dest, &acc, init);
        let emptied = Automaton::new(
            automaton.get_states().clone(),
            automaton.get_alphabet().clone(),
            TransitionTable::new(),
            Some(State::new(format!("q{}", init))),
            automaton.get_accept_states().clone(),
        );

        let result = validate(&emptied);
        prop_assert_eq!(result.get_defects(), &[Defect::MissingTransitions][..]);
        prop_assert!(result.messages().iter().any(|m| m.contains("transitions")));
    }

    #[test]
    fn simulation_is_idempotent(
        (n, k, dest, acc, init) in dfa_parts(),
        input in input_string(),
    ) {
        let automaton = build_dfa(n, k, &dest, &acc, init);
        prop_assert_eq!(simulate(&automaton, &input), simulate(&automaton, &input));
    }

    #[test]
    fn empty_string_accepted_iff_initial_accepting((n, k, dest, acc, init) in dfa_parts()) {
        let automaton = build_dfa(n, k, &dest, &acc, init);
        let initial = State::new(format!("q{}", init));

        prop_assert_eq!(simulate(&automaton, ""), automaton.is_accepting(&initial));
    }

    #[test]
    fn undeclared_symbol_rejects(
        (n, k, dest, acc, init) in dfa_parts(),
        prefix in input_string(),
        suffix in input_string(),
    ) {
        let automaton = build_dfa(n, k, &dest, &acc, init);
        let input = format!("{}z{}", prefix, suffix);

        prop_assert!(!simulate(&automaton, &input));
    }
}
