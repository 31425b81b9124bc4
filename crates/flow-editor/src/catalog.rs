//! Read-only catalog of flow templates and the metadata a mounted flow takes from it.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlowStatus {
    Live,
    Testing,
    #[default]
    Draft,
}

impl FlowStatus {
    fn rank(self) -> u8 {
        match self {
            FlowStatus::Live => 0,
            FlowStatus::Testing => 1,
            FlowStatus::Draft => 2,
        }
    }
}

impl fmt::Display for FlowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FlowStatus::Live => "Live",
            FlowStatus::Testing => "Testing",
            FlowStatus::Draft => "Draft",
        };
        f.write_str(s)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlowTemplate {
    pub id: String,
    pub name: String,
    pub owner: String,
    pub status: FlowStatus,
    pub signals: Vec<String>,
    #[serde(default)]
    pub installs: String,
    #[serde(default)]
    pub updated: String,
    pub severity: String,
    #[serde(default)]
    pub coverage: Option<f32>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CatalogSort {
    #[default]
    Name,
    Status,
    /// Highest coverage first.
    Coverage,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlowCatalog {
    pub flows: Vec<FlowTemplate>,
}

impl FlowCatalog {
    pub fn new(flows: Vec<FlowTemplate>) -> Self {
        Self { flows }
    }

    /// Parses a YAML list of templates.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    pub fn find(&self, id: &str) -> Option<&FlowTemplate> {
        self.flows.iter().find(|f| f.id == id)
    }

    /// Templates whose name, id or owner contain `query` (case-insensitive), sorted.
    pub fn search(&self, query: &str, sort: CatalogSort) -> Vec<&FlowTemplate> {
        let query = query.trim().to_lowercase();
        let mut found: Vec<&FlowTemplate> = self
            .flows
            .iter()
            .filter(|f| {
                query.is_empty() || format!("{} {} {}", f.name, f.id, f.owner).to_lowercase().contains(&query)
            })
            .collect();

        match sort {
            CatalogSort::Name => found.sort_by(|a, b| a.name.cmp(&b.name)),
            CatalogSort::Status => found.sort_by_key(|f| f.status.rank()),
            CatalogSort::Coverage => found.sort_by(|a, b| {
                b.coverage.unwrap_or(0.0).total_cmp(&a.coverage.unwrap_or(0.0))
            }),
        }
        found
    }
}

/// Header data of the flow being edited.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowMeta {
    pub name: String,
    pub owner: String,
    pub severity: String,
    pub status: FlowStatus,
    pub signals: Vec<String>,
}

impl Default for FlowMeta {
    fn default() -> Self {
        Self {
            name: "New threat flow".to_string(),
            owner: "Detection Engineer".to_string(),
            severity: "High".to_string(),
            status: FlowStatus::Draft,
            signals: vec!["EDR".to_string(), "IAM".to_string(), "Email".to_string()],
        }
    }
}

impl FlowMeta {
    /// Metadata of `template`, or `defaults` when there is none.
    pub fn resolve(template: Option<&FlowTemplate>, defaults: &FlowMeta) -> Self {
        match template {
            Some(t) => Self {
                name: t.name.clone(),
                owner: t.owner.clone(),
                severity: t.severity.clone(),
                status: t.status,
                signals: t.signals.clone(),
            },
            None => defaults.clone(),
        }
    }

    /// Signal a freshly inserted step is tagged with.
    pub fn primary_signal(&self) -> &str {
        self.signals.first().map(String::as_str).unwrap_or("Telemetry")
    }
}
