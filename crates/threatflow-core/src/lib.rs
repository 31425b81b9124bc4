//! # threatflow_core
//!
//! Pure engines behind the threat-flow editor:
//! - **Inference (`src/inference.rs`)**: sample JSON -> typed fields.
//! - **Lineage (`src/lineage.rs`)**: which ancestor fields a step can see.
//! - **Template (`src/template.rs`)**: `{{path}}` placeholder handling.
//! - **Simulation (`src/simulation.rs`)**: the pretend run order.
//!
//! Nothing here holds state; every function takes the graph by reference.

pub mod error;
pub mod inference;
pub mod lineage;
pub mod simulation;
pub mod template;

pub use error::CoreError;
pub use inference::{FieldTreeNode, build_field_tree, extract_fields, parse_and_extract_fields};
pub use lineage::{
    FieldGroup, UpstreamField, find_direct_upstream_nodes, find_upstream_nodes, group_fields_by_node,
    resolve_upstream_fields, slugify,
};
pub use simulation::{RunStep, RunTrace, simulate_run};
pub use template::{
    Insertion, TemplateField, TemplateValidation, extract_template_placeholders, insert_field_at_cursor,
    render_template_preview, validate_template_placeholders,
};
