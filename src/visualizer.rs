use std::collections::HashMap;

use color_eyre::eyre::{eyre, Result};
use eframe::{run_native, App, CreationContext, NativeOptions};
use egui::Color32;
use egui_graphs::{
    DefaultGraphView, Graph, SettingsInteraction, SettingsNavigation, SettingsStyle,
};
use petgraph::{graph::EdgeIndex, graph::NodeIndex, prelude::StableGraph};

use crate::fa::FA;

struct Visualizer {
    graph: Graph,
}

impl Visualizer {
    fn new(_: &CreationContext<'_>, graph: Graph) -> Self {
        Visualizer { graph }
    }
}

impl App for Visualizer {
    fn update(&mut self, ctx: &egui::Context, _: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let navigation_settings = &SettingsNavigation::new()
                .with_zoom_and_pan_enabled(true)
                .with_fit_to_screen_enabled(true);
            let interactive_settings = &SettingsInteraction::new()
                .with_dragging_enabled(true)
                .with_node_clicking_enabled(true)
                .with_node_selection_enabled(true)
                .with_edge_clicking_enabled(true)
                .with_edge_selection_enabled(true);
            let style_settings = &SettingsStyle::default().with_labels_always(true);
            ui.add(
                &mut DefaultGraphView::new(&mut self.graph)
                    .with_styles(style_settings)
                    .with_interactions(interactive_settings)
                    .with_navigations(navigation_settings),
            );
        });
    }
}

fn generate_stable_graph<T: FA>(fa: &T) -> Graph {
    let mut stable_graph = StableGraph::new();

    let start_node_color = Color32::from_rgb(20, 67, 130);
    let accept_node_color = Color32::from_rgb(20, 130, 90);

    let states = fa.get_states();

    let mut edge_labels: HashMap<(NodeIndex, NodeIndex), Vec<String>> = HashMap::new();
    let mut edge_map: HashMap<(NodeIndex, NodeIndex), EdgeIndex> = HashMap::new();

    // Node i of the graph is the i-th declared state

    for _ in states {
        stable_graph.add_node(());
    }

    for (state_idx, state) in states.iter().enumerate() {
        let transition_list = match fa.get_state_transitions(state) {
            Some(transition_list) => transition_list,
            None => continue,
        };

        for (symbol, target) in transition_list {
            let target_idx = match states.get_index_of(target) {
                Some(target_idx) => target_idx,
                None => continue,
            };
            let key = (NodeIndex::new(state_idx), NodeIndex::new(target_idx));

            if !edge_map.contains_key(&key) {
                let edge_idx = stable_graph.add_edge(key.0, key.1, ());
                edge_map.insert(key, edge_idx);
            }
            edge_labels.entry(key).or_default().push(symbol.to_string());
        }
    }

    let mut graph = Graph::from(&stable_graph);

    for (state_idx, state) in states.iter().enumerate() {
        if let Some(node) = graph.node_mut(NodeIndex::new(state_idx)) {
            node.set_label(state.to_string());
        }
    }

    if let Some(start) = fa.get_start_state().and_then(|s| states.get_index_of(s)) {
        if let Some(node) = graph.node_mut(NodeIndex::new(start)) {
            node.set_color(start_node_color);
        }
    }

    for accept_state in fa.get_acceptor_states().iter_ones() {
        if let Some(node) = graph.node_mut(NodeIndex::new(accept_state)) {
            node.set_color(accept_node_color);
        }
    }

    for (key, edge_idx) in edge_map {
        if let (Some(edge), Some(labels)) = (graph.edge_mut(edge_idx), edge_labels.get(&key)) {
            edge.set_label(labels.join(", "));
        }
    }

    graph
}

/// Open an interactive window showing the automaton. Start state is drawn in blue and
/// accepting states in green.
pub fn visualize<T: FA>(fa: &T) -> Result<()> {
    let graph = generate_stable_graph(fa);
    run_native(
        "finite automaton visualizer",
        NativeOptions::default(),
        Box::new(|cc| Ok(Box::new(Visualizer::new(cc, graph)))),
    )
    .map_err(|error| eyre!("Error: Failed to open the visualizer window! {}", error))
}
