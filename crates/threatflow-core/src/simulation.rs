//! # Simulated Run
//!
//! The editor's "Pretend run": orders the steps a real run would visit and
//! logs them. Nothing is executed.

use std::collections::{HashMap, HashSet};

use flow_canvas::model::{FlowGraph, StepKind};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Bfs;
use serde::{Deserialize, Serialize};

/// One visited step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunStep {
    pub node_id: String,
    pub title: String,
    pub kind: StepKind,
    /// Whether the step is reachable from a root.
    pub reached: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RunTrace {
    pub steps: Vec<RunStep>,
}

impl RunTrace {
    pub fn node_ids(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.node_id.as_str()).collect()
    }
}

/// Breadth-first from every root (a node whose only incoming edges are self-loops),
/// roots taken in insertion order. Steps not reached that way follow in insertion order.
#[tracing::instrument(skip(graph), fields(nodes = graph.nodes.len(), edges = graph.edges.len()))]
pub fn simulate_run(graph: &FlowGraph) -> RunTrace {
    let mut dag = DiGraph::<usize, ()>::new();
    let mut index_of: HashMap<&str, NodeIndex> = HashMap::new();

    for (position, node) in graph.nodes.iter().enumerate() {
        index_of.insert(node.id.as_str(), dag.add_node(position));
    }

    for edge in &graph.edges {
        if let (Some(&from), Some(&to)) = (index_of.get(edge.from.as_str()), index_of.get(edge.to.as_str())) {
            dag.add_edge(from, to, ());
        }
    }

    let is_root = |idx: NodeIndex| {
        dag.neighbors_directed(idx, petgraph::Direction::Incoming)
            .all(|source| source == idx)
    };

    let mut visited: HashSet<NodeIndex> = HashSet::new();
    let mut steps = Vec::with_capacity(graph.nodes.len());

    for root in dag.node_indices().filter(|&idx| is_root(idx)) {
        if visited.contains(&root) {
            continue;
        }
        let mut bfs = Bfs::new(&dag, root);
        while let Some(idx) = bfs.next(&dag) {
            if visited.insert(idx) {
                steps.push(step_for(graph, dag[idx], true));
            }
        }
    }

    for idx in dag.node_indices() {
        if !visited.contains(&idx) {
            tracing::debug!(node_id = %graph.nodes[dag[idx]].id, "step unreachable from any root");
            steps.push(step_for(graph, dag[idx], false));
        }
    }

    for (order, step) in steps.iter().enumerate() {
        tracing::info!(order, node_id = %step.node_id, title = %step.title, reached = step.reached, "pretend run step");
    }

    RunTrace { steps }
}

fn step_for(graph: &FlowGraph, position: usize, reached: bool) -> RunStep {
    let node = &graph.nodes[position];
    RunStep {
        node_id: node.id.clone(),
        title: node.title.clone(),
        kind: node.kind,
        reached,
    }
}
