/* Render an automaton as a Graphviz diagram. The DOT text is built through petgraph, the image
 * is produced by handing the DOT file to the `dot` executable. Nothing in the validator or the
 * simulator depends on this module. */

use crate::automaton::Automaton;
use crate::fa::FA;
use color_eyre::eyre::{Report, Result};
use log::debug;
use petgraph::dot::Dot;
use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::prelude::StableGraph;
use std::collections::HashMap;
use std::fmt;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

/// List of possible errors while rendering a diagram
#[derive(Debug)]
pub enum RenderError {
    /// The DOT file could not be written
    WriteFailed(PathBuf),
    /// Graphviz could not be run or exited unsuccessfully
    GraphvizFailed(String),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::WriteFailed(path) => {
                write!(f, "Error: Failed to write the dot file {}!", path.display())
            }
            RenderError::GraphvizFailed(reason) => {
                write!(f, "Error: Failed to execute Graphviz! {}", reason)
            }
        }
    }
}

impl std::error::Error for RenderError {}

fn build_graph<T: FA>(fa: &T) -> StableGraph<String, String> {
    let mut stable_graph = StableGraph::new();
    let mut node_map: HashMap<&str, NodeIndex> = HashMap::new();
    let mut edge_map: HashMap<(NodeIndex, NodeIndex), EdgeIndex> = HashMap::new();

    let acceptors = fa.get_acceptor_states();
    let start_state = fa.get_start_state();

    // Add all declared states as nodes

    for (state_idx, state) in fa.get_states().iter().enumerate() {
        let mut node_label = state.to_string();

        if acceptors[state_idx] {
            node_label = format!("Accept\n{}", node_label);
        }
        if start_state == Some(state) {
            node_label = format!("Start\n{}", node_label);
        }

        let node = stable_graph.add_node(node_label);
        node_map.insert(state.as_str(), node);
    }

    // Add the edges, merging the labels of parallel transitions into one edge

    for state in fa.get_states() {
        let transition_list = match fa.get_state_transitions(state) {
            Some(transition_list) => transition_list,
            None => continue,
        };

        for (symbol, target) in transition_list {
            // Validated automata only point at declared states
            let (Some(&from), Some(&to)) =
                (node_map.get(state.as_str()), node_map.get(target.as_str()))
            else {
                continue;
            };

            match edge_map.get(&(from, to)) {
                Some(edge_idx) => {
                    let old_label = &stable_graph[*edge_idx];
                    let new_label = format!("{}, {}", old_label, symbol);
                    stable_graph[*edge_idx] = new_label;
                }
                None => {
                    let edge_idx = stable_graph.add_edge(from, to, symbol.to_string());
                    edge_map.insert((from, to), edge_idx);
                }
            }
        }
    }

    stable_graph
}

/// Produce the Graphviz DOT source for an automaton.
pub fn to_dot<T: FA>(fa: &T) -> String {
    let stable_graph = build_graph(fa);
    Dot::new(&stable_graph).to_string()
}

/// Write `<dir>/<name>.dot` and render it to `<dir>/<name>.png` with Graphviz. Returns the path
/// of the image.
pub fn save_diagram(automaton: &Automaton, dir: &Path, name: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;

    let dot_path = dir.join(format!("{}.dot", name));
    let png_path = dir.join(format!("{}.png", name));

    let mut dot_file = match File::create(&dot_path) {
        Ok(file) => file,
        Err(_) => return Err(Report::new(RenderError::WriteFailed(dot_path))),
    };

    if dot_file.write_all(to_dot(automaton).as_bytes()).is_err() {
        return Err(Report::new(RenderError::WriteFailed(dot_path)));
    }

    let output = Command::new("dot")
        .arg("-Tpng")
        .arg(&dot_path)
        .arg("-o")
        .arg(&png_path)
        .output();

    match output {
        Ok(output) if output.status.success() => {
            debug!("Diagram saved as {}", png_path.display());
            Ok(png_path)
        }
        Ok(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            Err(Report::new(RenderError::GraphvizFailed(stderr)))
        }
        Err(error) => Err(Report::new(RenderError::GraphvizFailed(error.to_string()))),
    }
}
