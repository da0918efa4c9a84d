use std::collections::HashMap;

use crate::fa::FA;
use petgraph::dot::Dot;
use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::prelude::StableGraph;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateSummary {
    pub id: usize,
    pub label: String,
    pub accepting: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransitionSummary {
    pub from: usize,
    /// The input character, or `ε` for epsilon moves
    pub symbol: String,
    pub to: usize,
}

/// A plain data snapshot of an automaton, ready to be serialized
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AutomatonSummary {
    pub states: Vec<StateSummary>,
    pub alphabet: Vec<char>,
    pub start_state: Option<usize>,
    pub accept_states: Vec<usize>,
    pub transitions: Vec<TransitionSummary>,
}

fn is_accepting<T: FA>(fa: &T, state_id: usize) -> bool {
    fa.get_acceptor_states()
        .get(state_id)
        .is_some_and(|bit| *bit)
}

pub fn summarize<T: FA>(fa: &T) -> AutomatonSummary {
    let num_states = fa.get_num_states();

    let states = (0..num_states)
        .map(|state_id| StateSummary {
            id: state_id,
            label: fa.get_state_label(state_id),
            accepting: is_accepting(fa, state_id),
        })
        .collect();

    let mut alphabet: Vec<char> = fa.get_alphabet().iter().copied().collect();
    alphabet.sort_unstable();

    let transitions = (0..num_states)
        .flat_map(|state_id| {
            fa.get_state_transitions(state_id)
                .into_iter()
                .map(move |(symbol, target)| TransitionSummary {
                    from: state_id,
                    symbol: symbol.to_string(),
                    to: target,
                })
        })
        .collect();

    AutomatonSummary {
        states,
        alphabet,
        start_state: fa.get_start_state(),
        accept_states: fa.get_acceptor_states().iter_ones().collect(),
        transitions,
    }
}

/// Render the automaton as Graphviz DOT. Parallel edges between two states are merged into
/// one edge whose label lists every symbol.
pub fn to_dot<T: FA>(fa: &T) -> String {
    let mut stable_graph = StableGraph::new();

    let num_states = fa.get_num_states();
    let start_state = fa.get_start_state();

    let mut edge_map: HashMap<(NodeIndex, NodeIndex), EdgeIndex> = HashMap::new();

    // Add all nodes

    for state_idx in 0..num_states {
        let mut node_label = fa.get_state_label(state_idx);

        if start_state == Some(state_idx) {
            node_label.push_str(" (start)");
        }
        if is_accepting(fa, state_idx) {
            node_label.push_str(" (accept)");
        }

        stable_graph.add_node(node_label);
    }

    // Add all edges, joining the labels of parallel ones

    for state_idx in 0..num_states {
        for (symbol, edge_target) in fa.get_state_transitions(state_idx) {
            let edge_label = symbol.to_string();

            let key = (NodeIndex::new(state_idx), NodeIndex::new(edge_target));

            match edge_map.get(&key) {
                Some(edge_idx) => {
                    let old_label = &stable_graph[*edge_idx];
                    let new_label = format!("{}, {}", old_label, edge_label);
                    stable_graph[*edge_idx] = new_label;
                }
                None => {
                    let edge_idx = stable_graph.add_edge(key.0, key.1, edge_label);
                    edge_map.insert(key, edge_idx);
                }
            }
        }
    }

    Dot::new(&stable_graph).to_string()
}
