use flow_canvas::model::{PaletteIcon, StepKind};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PaletteItem {
    pub label: &'static str,
    pub kind: StepKind,
    pub icon: PaletteIcon,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PaletteGroup {
    pub label: &'static str,
    pub items: Vec<PaletteItem>,
}

const fn item(label: &'static str, kind: StepKind, icon: PaletteIcon) -> PaletteItem {
    PaletteItem { label, kind, icon }
}

static GROUPS: &[(&str, &[PaletteItem])] = &[
    (
        "Triggers",
        &[
            item("Threat Event Trigger", StepKind::Sensor, PaletteIcon::Trigger),
            item("Manual / Test Run Trigger", StepKind::Sensor, PaletteIcon::TestTrigger),
        ],
    ),
    (
        "Enrichment",
        &[
            item("Get Detection Details", StepKind::Enrich, PaletteIcon::GetDetection),
            item("Get User Details", StepKind::Enrich, PaletteIcon::GetUser),
        ],
    ),
    (
        "Logic",
        &[
            item("IF Condition", StepKind::Decision, PaletteIcon::LogicIf),
            item("Wait / Delay", StepKind::Notify, PaletteIcon::LogicWait),
        ],
    ),
    (
        "Transform",
        &[item("Extract Field", StepKind::Enrich, PaletteIcon::TransformExtract)],
    ),
    (
        "Actions",
        &[
            item("Update Ticket", StepKind::Action, PaletteIcon::ActionTicket),
            item("Send Webhook Event", StepKind::Notify, PaletteIcon::ActionWebhook),
            item("Add to Watchlist / IOC", StepKind::Action, PaletteIcon::ActionWatchlist),
        ],
    ),
    (
        "Notifications",
        &[item("Slack Notification", StepKind::Notify, PaletteIcon::NotifySlack)],
    ),
    (
        "Meta",
        &[item("Comment / Annotation", StepKind::Notify, PaletteIcon::MetaComment)],
    ),
    (
        "Operators",
        &[
            item("Collect", StepKind::Sensor, PaletteIcon::Collect),
            item("Workflow", StepKind::Action, PaletteIcon::Workflow),
            item("Wait", StepKind::Notify, PaletteIcon::Wait),
            item("Exit", StepKind::Action, PaletteIcon::Exit),
            item("Dedup", StepKind::Decision, PaletteIcon::Dedup),
            item("Interact", StepKind::Enrich, PaletteIcon::Interact),
            item("Transform", StepKind::Enrich, PaletteIcon::Transform),
            item("Loading", StepKind::Sensor, PaletteIcon::Loading),
        ],
    ),
];

/// Every insertable step, grouped for the sidebar.
pub fn palette() -> Vec<PaletteGroup> {
    GROUPS
        .iter()
        .map(|&(label, items)| PaletteGroup {
            label,
            items: items.to_vec(),
        })
        .collect()
}

/// Items whose label contains the trimmed query, case-insensitively.
/// Empty groups are dropped only while a query is active.
pub fn filter_palette(search: &str) -> Vec<PaletteGroup> {
    let query = search.trim().to_lowercase();
    palette()
        .into_iter()
        .map(|mut group| {
            group.items.retain(|i| i.label.to_lowercase().contains(&query));
            group
        })
        .filter(|group| !group.items.is_empty() || query.is_empty())
        .collect()
}
