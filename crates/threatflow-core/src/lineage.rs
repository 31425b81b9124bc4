//! # Field Lineage
//!
//! Computes which fields a step can reference: the selected output fields of
//! every ancestor reachable by walking edges backwards.
//!
//! The walk keeps a visited set so cycles terminate. Ancestors reached through
//! more than one path are reported once per path (diamonds yield duplicates).

use std::collections::HashSet;
use std::sync::LazyLock;

use flow_canvas::model::{DataField, Edge, FlowNode};
use serde::{Deserialize, Serialize};

static NON_ALPHANUMERIC: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"[^a-z0-9]+").expect("slug pattern is valid")
});

/// A field visible to a step, tagged with the ancestor that produces it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamField {
    #[serde(flatten)]
    pub field: DataField,
    pub source_node_id: String,
    pub source_node_title: String,
    /// `<slug(source title)>.<field path>`
    pub full_path: String,
}

/// Lowercases, collapses every non `[a-z0-9]` run into `_`, then trims `_` from both ends.
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    NON_ALPHANUMERIC
        .replace_all(&lowered, "_")
        .trim_matches('_')
        .to_string()
}

/// Ancestors of `node_id` in discovery order (depth-first along incoming edges).
pub fn find_upstream_nodes<'a>(node_id: &str, nodes: &'a [FlowNode], edges: &[Edge]) -> Vec<&'a FlowNode> {
    let mut visited = HashSet::new();
    let mut found = Vec::new();
    walk_upstream(node_id, nodes, edges, &mut visited, &mut found);
    found
}

fn walk_upstream<'a>(
    node_id: &str,
    nodes: &'a [FlowNode],
    edges: &[Edge],
    visited: &mut HashSet<String>,
    found: &mut Vec<&'a FlowNode>,
) {
    if !visited.insert(node_id.to_string()) {
        return;
    }

    for edge in edges.iter().filter(|e| e.to == node_id) {
        if let Some(source) = nodes.iter().find(|n| n.id == edge.from) {
            found.push(source);
            walk_upstream(&source.id, nodes, edges, visited, found);
        }
    }
}

/// Immediate predecessors of `node_id`, in edge order. Edges from unknown ids are skipped.
pub fn find_direct_upstream_nodes<'a>(
    node_id: &str,
    nodes: &'a [FlowNode],
    edges: &[Edge],
) -> Vec<&'a FlowNode> {
    edges
        .iter()
        .filter(|e| e.to == node_id)
        .filter_map(|e| nodes.iter().find(|n| n.id == e.from))
        .collect()
}

/// Every selected output field of every ancestor of `node_id`.
pub fn resolve_upstream_fields(node_id: &str, nodes: &[FlowNode], edges: &[Edge]) -> Vec<UpstreamField> {
    let mut fields = Vec::new();

    for node in find_upstream_nodes(node_id, nodes, edges) {
        let slug = slugify(&node.title);

        for field in node.output_fields().iter().filter(|f| f.is_selected()) {
            fields.push(UpstreamField {
                field: field.clone(),
                source_node_id: node.id.clone(),
                source_node_title: node.title.clone(),
                full_path: format!("{slug}.{}", field.path),
            });
        }
    }

    tracing::trace!(node_id, count = fields.len(), "resolved upstream fields");
    fields
}

/// Upstream fields of one source step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldGroup {
    pub node_id: String,
    pub node_title: String,
    pub fields: Vec<UpstreamField>,
}

/// Buckets fields by source step. Groups and their contents keep discovery order.
pub fn group_fields_by_node(fields: &[UpstreamField]) -> Vec<FieldGroup> {
    let mut groups: Vec<FieldGroup> = Vec::new();

    for field in fields {
        match groups.iter_mut().find(|g| g.node_id == field.source_node_id) {
            Some(group) => group.fields.push(field.clone()),
            None => groups.push(FieldGroup {
                node_id: field.source_node_id.clone(),
                node_title: field.source_node_title.clone(),
                fields: vec![field.clone()],
            }),
        }
    }

    groups
}
