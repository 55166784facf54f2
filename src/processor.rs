/* Orchestration of validation and simulation, for one automaton or for a whole batch. Each
 * candidate string is an independent computation over a shared read-only automaton, so they are
 * handed to rayon. collect keeps the input order whatever the completion order. */

use crate::automaton::{Automaton, AutomatonDescription, AutomatonId};
use crate::render;
use crate::simulator::{simulate_result, SimulationResult};
use crate::validator::{validate, ValidationResult};
use log::{debug, info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

/// How the defects of an invalid automaton are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DefectFormat {
    /// Every defect, in check order
    #[default]
    Full,
    /// Only the first defect
    First,
}

/// Knobs for processing automata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOptions {
    /// Simulate candidate strings and batch entries in parallel
    pub parallel: bool,
    pub defect_format: DefectFormat,
    /// Render a diagram of every valid automaton into this directory
    pub diagram_dir: Option<PathBuf>,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        ProcessOptions {
            parallel: true,
            defect_format: DefectFormat::Full,
            diagram_dir: None,
        }
    }
}

/// Outcome of processing one automaton.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// Validation failed, nothing was simulated
    Invalid(ValidationResult),
    /// Validation passed, one result per candidate string in input order
    Simulated(Vec<SimulationResult>),
}

impl ProcessOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, ProcessOutcome::Simulated(_))
    }
}

/// Validate the automaton and, only if it is well formed, simulate every candidate string.
pub fn process(automaton: &Automaton, candidates: &[String]) -> ProcessOutcome {
    process_with(automaton, candidates, true)
}

/// Same as `process`, but lets the caller choose whether the candidates are simulated in
/// parallel.
pub fn process_with(automaton: &Automaton, candidates: &[String], parallel: bool) -> ProcessOutcome {
    let validation = validate(automaton);

    if !validation.is_valid() {
        return ProcessOutcome::Invalid(validation);
    }

    let results: Vec<SimulationResult> = if parallel {
        candidates
            .par_iter()
            .map(|input| simulate_result(automaton, input))
            .collect()
    } else {
        candidates
            .iter()
            .map(|input| simulate_result(automaton, input))
            .collect()
    };

    ProcessOutcome::Simulated(results)
}

/// The record reported for one entry of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomatonReport {
    pub id: AutomatonId,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagram: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inputs_validation: Option<Vec<SimulationResult>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AutomatonReport {
    fn success(id: AutomatonId, results: Vec<SimulationResult>, diagram: Option<PathBuf>) -> Self {
        AutomatonReport {
            id,
            success: true,
            diagram,
            inputs_validation: Some(results),
            errors: None,
            error: None,
        }
    }

    fn failure(id: AutomatonId, messages: Vec<String>, format: DefectFormat) -> Self {
        let (errors, error) = match format {
            DefectFormat::Full => (Some(messages), None),
            DefectFormat::First => (None, messages.into_iter().next()),
        };

        AutomatonReport {
            id,
            success: false,
            diagram: None,
            inputs_validation: None,
            errors,
            error,
        }
    }

    /// The reported defect messages, whichever format was used.
    pub fn messages(&self) -> Vec<String> {
        match (&self.errors, &self.error) {
            (Some(errors), _) => errors.clone(),
            (None, Some(error)) => vec![error.clone()],
            (None, None) => vec![],
        }
    }
}

// The id is submitted data, keep it from naming a path outside the diagram directory
fn diagram_name(id: &AutomatonId) -> String {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_secs())
        .unwrap_or_default();
    let id: String = id
        .to_string()
        .chars()
        .map(|ch| match ch {
            '/' | '\\' | ':' | '\0' => '_',
            '.' => '-',
            _ => ch,
        })
        .collect();
    format!("automaton_{}_{}", id, timestamp)
}

fn render_diagram(automaton: &Automaton, id: &AutomatonId, options: &ProcessOptions) -> Option<PathBuf> {
    let dir = options.diagram_dir.as_ref()?;

    match render::save_diagram(automaton, dir, &diagram_name(id)) {
        Ok(path) => Some(path),
        Err(error) => {
            warn!("Could not render diagram for automaton {}: {}", id, error);
            None
        }
    }
}

/// Process a single, already deserialized description into its report.
pub fn process_description(
    description: AutomatonDescription,
    options: &ProcessOptions,
) -> AutomatonReport {
    let id = description.id();
    let candidates = description.candidates().to_vec();
    let automaton = Automaton::from_description(description);

    match process_with(&automaton, &candidates, options.parallel) {
        ProcessOutcome::Invalid(validation) => {
            debug!(
                "Automaton {} is not well formed: {} defect(s)",
                id,
                validation.get_defects().len()
            );
            AutomatonReport::failure(id, validation.messages(), options.defect_format)
        }
        ProcessOutcome::Simulated(results) => {
            debug!("Automaton {} simulated {} string(s)", id, results.len());
            let diagram = render_diagram(&automaton, &id, options);
            AutomatonReport::success(id, results, diagram)
        }
    }
}

fn entry_id(entry: &Value) -> AutomatonId {
    entry
        .get("id")
        .cloned()
        .and_then(|id| serde_json::from_value(id).ok())
        .unwrap_or_else(AutomatonId::unknown)
}

/// Process one raw entry of a batch. An entry whose fields have the wrong shape is reported as
/// a processing error without reaching validation.
pub fn process_entry(entry: Value, options: &ProcessOptions) -> AutomatonReport {
    let id = entry_id(&entry);

    match serde_json::from_value::<AutomatonDescription>(entry) {
        Ok(description) => process_description(description, options),
        Err(error) => {
            debug!("Automaton {} has a malformed description: {}", id, error);
            let message = format!("Processing error: {}", error);
            AutomatonReport::failure(id, vec![message], options.defect_format)
        }
    }
}

/// Process every entry of a batch. The reports come back in the order of the entries.
pub fn process_automata_list(entries: Vec<Value>, options: &ProcessOptions) -> Vec<AutomatonReport> {
    let reports: Vec<AutomatonReport> = if options.parallel {
        entries
            .into_par_iter()
            .map(|entry| process_entry(entry, options))
            .collect()
    } else {
        entries
            .into_iter()
            .map(|entry| process_entry(entry, options))
            .collect()
    };

    let valid = reports.iter().filter(|report| report.success).count();
    info!(
        "Processed {} automata, {} valid and {} rejected",
        reports.len(),
        valid,
        reports.len() - valid
    );

    reports
}
