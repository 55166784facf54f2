//! # fasim
//!
//! A library to check and run deterministic finite automata described in JSON.
//!
//! This library provides functionality to:
//! - Normalize lists of transition records into a transition table
//! - Validate the structure of an automaton and report every defect found
//! - Simulate candidate strings against a well formed automaton
//! - Process whole batches of automaton descriptions into result reports
//! - Render the automaton as a Graphviz diagram or in an interactive window

// Re-export the modules
pub mod automaton;
pub mod fa;
pub mod loader;
pub mod processor;
pub mod render;
pub mod simulator;
pub mod transition;
pub mod validator;
pub mod visualizer;

// Re-export commonly used functions for convenience
pub use automaton::{Automaton, AutomatonDescription, AutomatonId};
pub use loader::{parse_automata_list, read_automata_file};
pub use processor::{
    process, process_automata_list, process_description, DefectFormat, ProcessOptions,
    ProcessOutcome,
};
pub use render::{save_diagram, to_dot};
pub use simulator::simulate;
pub use transition::build_transition_table;
pub use validator::validate;
pub use visualizer::visualize;
