//! Demo graph a flow opens with, plus the default wording of new steps.

use flow_canvas::model::{Edge, FlowNode, PaletteIcon, StepKind, StepStatus};
use flow_canvas::notes::Annotation;
use glam::Vec2;

use crate::catalog::FlowMeta;

pub fn default_title(kind: StepKind, number: usize) -> String {
    let base = match kind {
        StepKind::Sensor => "Collect signals",
        StepKind::Enrich => "Enrich context",
        StepKind::Decision => "Decision gate",
        StepKind::Action => "Respond",
        StepKind::Notify => "Notify & log",
    };
    format!("{base} #{number}")
}

pub fn default_summary(kind: StepKind) -> &'static str {
    match kind {
        StepKind::Sensor => "Collect detections, normalize fields, and guard against noisy sources.",
        StepKind::Enrich => "Decorate events with user, asset, and geo context; score fidelity.",
        StepKind::Decision => "Apply thresholds, branch on confidence, and deduplicate related alerts.",
        StepKind::Action => "Run containment, ticket, and notify responders (simulated only).",
        StepKind::Notify => "Send updates, escalate if no acknowledgement, and log the story.",
    }
}

struct SeedStep {
    id: &'static str,
    title: &'static str,
    kind: StepKind,
    icon: PaletteIcon,
    summary: &'static str,
    signals: &'static [&'static str],
    status: StepStatus,
    at: (f32, f32),
}

const SEED_STEPS: [SeedStep; 7] = [
    SeedStep {
        id: "trigger",
        title: "Email Trigger",
        kind: StepKind::Sensor,
        icon: PaletteIcon::Collect,
        summary: "Entry point for inbound email JSON payloads.",
        signals: &[],
        status: StepStatus::Ready,
        at: (420.0, 80.0),
    },
    SeedStep {
        id: "if-real",
        title: "If real email",
        kind: StepKind::Decision,
        icon: PaletteIcon::If,
        summary: "Branch based on real vs. test run flag.",
        signals: &["Flag"],
        status: StepStatus::Ready,
        at: (420.0, 320.0),
    },
    SeedStep {
        id: "set-false",
        title: "Set Run Variable",
        kind: StepKind::Action,
        icon: PaletteIcon::Workflow,
        summary: "Set run type to Test. Keep scope limited.",
        signals: &["Context"],
        status: StepStatus::Ready,
        at: (240.0, 540.0),
    },
    SeedStep {
        id: "set-true",
        title: "Set Run Variable",
        kind: StepKind::Action,
        icon: PaletteIcon::Workflow,
        summary: "Set run type to Real. Allow full flow.",
        signals: &["Context"],
        status: StepStatus::Ready,
        at: (560.0, 540.0),
    },
    SeedStep {
        id: "arr",
        title: "Put User Email into Array",
        kind: StepKind::Action,
        icon: PaletteIcon::Transform,
        summary: "Prep recipients for downstream utilities.",
        signals: &["Email"],
        status: StepStatus::Draft,
        at: (240.0, 780.0),
    },
    SeedStep {
        id: "email",
        title: "Email Content",
        kind: StepKind::Notify,
        icon: PaletteIcon::Notify,
        summary: "Assemble email content and attachments.",
        signals: &["Email"],
        status: StepStatus::Draft,
        at: (560.0, 780.0),
    },
    SeedStep {
        id: "test-options",
        title: "Test Email Options",
        kind: StepKind::Notify,
        icon: PaletteIcon::Notify,
        summary: "Customize test email template and severity.",
        signals: &["Template"],
        status: StepStatus::Draft,
        at: (420.0, 1020.0),
    },
];

/// The seven demo steps. The entry step carries the flow's first two signals.
pub fn seed_nodes(meta: &FlowMeta) -> Vec<FlowNode> {
    SEED_STEPS
        .iter()
        .map(|step| {
            let mut node = FlowNode::with_id(step.id, step.kind, step.title, Vec2::new(step.at.0, step.at.1));
            node.icon = Some(step.icon);
            node.summary = step.summary.to_string();
            node.owner = meta.owner.clone();
            node.status = step.status;
            node.signals = if step.id == "trigger" {
                meta.signals.iter().take(2).cloned().collect()
            } else {
                step.signals.iter().map(|s| s.to_string()).collect()
            };
            node
        })
        .collect()
}

/// Demo edges, skipping any whose endpoints are missing from `nodes`.
pub fn seed_edges(nodes: &[FlowNode]) -> Vec<Edge> {
    let connections = [
        ("trigger", "if-real", None),
        ("if-real", "set-false", Some("FALSE")),
        ("if-real", "set-true", Some("TRUE")),
        ("set-false", "arr", None),
        ("set-true", "email", None),
        ("arr", "test-options", None),
        ("email", "test-options", None),
    ];

    let exists = |id: &str| nodes.iter().any(|n| n.id == id);
    connections
        .into_iter()
        .filter(|&(from, to, _)| exists(from) && exists(to))
        .map(|(from, to, label)| match label {
            Some(label) => Edge::labeled(from, to, label),
            None => Edge::new(from, to),
        })
        .collect()
}

/// Four info notes down the right-hand side and one sticky note below them.
pub fn seed_notes() -> Vec<Annotation> {
    vec![
        Annotation::info(
            "note-trigger",
            "Trigger mapping",
            "Match the trigger to an identifier in the incoming payload.",
            Vec2::new(900.0, 40.0),
        ),
        Annotation::info(
            "note-setup",
            "Integration setup",
            "Notify Slack if a new IOC is generated; keep mappings in sync.",
            Vec2::new(900.0, 170.0),
        ),
        Annotation::info(
            "note-detections",
            "Detection fetch",
            "Pull detections for the incident using a filter based on device id.",
            Vec2::new(900.0, 320.0),
        ),
        Annotation::info(
            "note-hashes",
            "Hash lookup",
            "If detections are found, inspect behaviors for SHA256 hashes.",
            Vec2::new(900.0, 500.0),
        ),
        Annotation::sticky(
            "sticky",
            "Metadata check",
            "Need to see if this is pulling the metadata yet. It was broken after the outage.",
            Vec2::new(900.0, 660.0),
        ),
    ]
}
