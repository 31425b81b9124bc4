use flow_canvas::model::PaletteIcon;
use serde::Serialize;

/// How a configuration field is edited. The set is closed: every widget the
/// surface renders corresponds to exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Text,
    Textarea,
    Select,
    JsonEditor,
    TemplateEditor,
    ConditionBuilder,
    FieldPicker,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigField {
    pub key: &'static str,
    pub label: &'static str,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<&'static str>,
    #[serde(skip_serializing_if = "no_options")]
    pub options: &'static [SelectOption],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_text: Option<&'static str>,
}

fn no_options(options: &&'static [SelectOption]) -> bool {
    options.is_empty()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConfigSection {
    pub title: &'static str,
    pub fields: &'static [ConfigField],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigType {
    Trigger,
    Decision,
    Notify,
    Action,
    Enrich,
    Generic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeConfigSchema {
    pub config_type: ConfigType,
    pub sections: &'static [ConfigSection],
}

impl NodeConfigSchema {
    pub fn fields(&self) -> impl Iterator<Item = &'static ConfigField> + '_ {
        self.sections.iter().flat_map(|s| s.fields.iter())
    }

    pub fn field(&self, key: &str) -> Option<&'static ConfigField> {
        self.fields().find(|f| f.key == key)
    }
}

pub static CONNECTION_TYPE_OPTIONS: [SelectOption; 6] = [
    SelectOption { value: "email_inbox", label: "Email Inbox" },
    SelectOption { value: "webhook", label: "Webhook" },
    SelectOption { value: "schedule", label: "Scheduled" },
    SelectOption { value: "api", label: "API Event" },
    SelectOption { value: "siem", label: "SIEM Alert" },
    SelectOption { value: "edr", label: "EDR Detection" },
];

pub static ACTION_TYPE_OPTIONS: [SelectOption; 6] = [
    SelectOption { value: "create_ticket", label: "Create Ticket" },
    SelectOption { value: "update_ticket", label: "Update Ticket" },
    SelectOption { value: "send_webhook", label: "Send Webhook" },
    SelectOption { value: "update_watchlist", label: "Update Watchlist" },
    SelectOption { value: "isolate_host", label: "Isolate Host" },
    SelectOption { value: "disable_user", label: "Disable User" },
];

pub static LOOKUP_TYPE_OPTIONS: [SelectOption; 6] = [
    SelectOption { value: "user_lookup", label: "User Lookup" },
    SelectOption { value: "detection_lookup", label: "Detection Lookup" },
    SelectOption { value: "ip_reputation", label: "IP Reputation" },
    SelectOption { value: "domain_reputation", label: "Domain Reputation" },
    SelectOption { value: "file_hash", label: "File Hash Lookup" },
    SelectOption { value: "threat_intel", label: "Threat Intelligence" },
];

pub static CHANNEL_OPTIONS: [SelectOption; 4] = [
    SelectOption { value: "slack", label: "Slack" },
    SelectOption { value: "teams", label: "Microsoft Teams" },
    SelectOption { value: "email", label: "Email" },
    SelectOption { value: "pagerduty", label: "PagerDuty" },
];

pub static CONDITION_OPERATORS: [SelectOption; 10] = [
    SelectOption { value: "equals", label: "equals" },
    SelectOption { value: "not_equals", label: "does not equal" },
    SelectOption { value: "contains", label: "contains" },
    SelectOption { value: "not_contains", label: "does not contain" },
    SelectOption { value: "starts_with", label: "starts with" },
    SelectOption { value: "ends_with", label: "ends with" },
    SelectOption { value: "greater_than", label: "is greater than" },
    SelectOption { value: "less_than", label: "is less than" },
    SelectOption { value: "is_empty", label: "is empty" },
    SelectOption { value: "is_not_empty", label: "is not empty" },
];

const TITLE: ConfigField = ConfigField {
    key: "title",
    label: "Title",
    field_type: FieldType::Text,
    placeholder: Some("Node title"),
    options: &[],
    help_text: None,
};

const SUMMARY: ConfigField = ConfigField {
    key: "summary",
    label: "Summary",
    field_type: FieldType::Textarea,
    placeholder: Some("Description"),
    options: &[],
    help_text: None,
};

const OWNER: ConfigField = ConfigField {
    key: "owner",
    label: "Owner",
    field_type: FieldType::Text,
    placeholder: Some("Owner name"),
    options: &[],
    help_text: None,
};

const TEMPLATE_HELP: &str = "Use {{field.path}} to insert values from upstream nodes";

const BASIC: ConfigSection = ConfigSection {
    title: "Basic",
    fields: &[TITLE, SUMMARY],
};

pub static DEFAULT_SCHEMA: NodeConfigSchema = NodeConfigSchema {
    config_type: ConfigType::Generic,
    sections: &[ConfigSection {
        title: "Basic",
        fields: &[TITLE, SUMMARY, OWNER],
    }],
};

pub static TRIGGER_SCHEMA: NodeConfigSchema = NodeConfigSchema {
    config_type: ConfigType::Trigger,
    sections: &[
        BASIC,
        ConfigSection {
            title: "Connection",
            fields: &[ConfigField {
                key: "connectionType",
                label: "Connection Type",
                field_type: FieldType::Select,
                placeholder: None,
                options: &CONNECTION_TYPE_OPTIONS,
                help_text: None,
            }],
        },
        ConfigSection {
            title: "Test Data",
            fields: &[ConfigField {
                key: "testData",
                label: "Sample JSON",
                field_type: FieldType::JsonEditor,
                placeholder: Some("Paste sample JSON data..."),
                options: &[],
                help_text: Some("Paste sample data to extract available fields"),
            }],
        },
    ],
};

pub static DECISION_SCHEMA: NodeConfigSchema = NodeConfigSchema {
    config_type: ConfigType::Decision,
    sections: &[
        BASIC,
        ConfigSection {
            title: "Conditions",
            fields: &[ConfigField {
                key: "conditions",
                label: "When",
                field_type: FieldType::ConditionBuilder,
                placeholder: None,
                options: &[],
                help_text: Some("Define conditions using fields from upstream nodes"),
            }],
        },
    ],
};

pub static NOTIFY_SCHEMA: NodeConfigSchema = NodeConfigSchema {
    config_type: ConfigType::Notify,
    sections: &[
        BASIC,
        ConfigSection {
            title: "Notification",
            fields: &[
                ConfigField {
                    key: "channel",
                    label: "Channel",
                    field_type: FieldType::Select,
                    placeholder: None,
                    options: &CHANNEL_OPTIONS,
                    help_text: None,
                },
                ConfigField {
                    key: "template",
                    label: "Message Template",
                    field_type: FieldType::TemplateEditor,
                    placeholder: Some("Enter message with {{field}} placeholders..."),
                    options: &[],
                    help_text: Some(TEMPLATE_HELP),
                },
            ],
        },
    ],
};

pub static ACTION_SCHEMA: NodeConfigSchema = NodeConfigSchema {
    config_type: ConfigType::Action,
    sections: &[
        BASIC,
        ConfigSection {
            title: "Action",
            fields: &[
                ConfigField {
                    key: "actionType",
                    label: "Action Type",
                    field_type: FieldType::Select,
                    placeholder: None,
                    options: &ACTION_TYPE_OPTIONS,
                    help_text: None,
                },
                ConfigField {
                    key: "template",
                    label: "Configuration",
                    field_type: FieldType::TemplateEditor,
                    placeholder: Some("Configure action with {{field}} placeholders..."),
                    options: &[],
                    help_text: Some(TEMPLATE_HELP),
                },
            ],
        },
    ],
};

pub static ENRICH_SCHEMA: NodeConfigSchema = NodeConfigSchema {
    config_type: ConfigType::Enrich,
    sections: &[
        BASIC,
        ConfigSection {
            title: "Lookup",
            fields: &[
                ConfigField {
                    key: "lookupType",
                    label: "Lookup Type",
                    field_type: FieldType::Select,
                    placeholder: None,
                    options: &LOOKUP_TYPE_OPTIONS,
                    help_text: None,
                },
                ConfigField {
                    key: "sourceField",
                    label: "Source Field",
                    field_type: FieldType::FieldPicker,
                    placeholder: None,
                    options: &[],
                    help_text: Some("Select field to lookup"),
                },
            ],
        },
    ],
};

/// Which schema family a palette type is edited with.
pub fn config_type_for(icon: PaletteIcon) -> ConfigType {
    match icon {
        PaletteIcon::Trigger | PaletteIcon::TestTrigger | PaletteIcon::Collect | PaletteIcon::Webhook => {
            ConfigType::Trigger
        }
        PaletteIcon::If | PaletteIcon::LogicIf | PaletteIcon::Switch | PaletteIcon::Decision => {
            ConfigType::Decision
        }
        PaletteIcon::Notify | PaletteIcon::NotifySlack => ConfigType::Notify,
        PaletteIcon::Action
        | PaletteIcon::ActionTicket
        | PaletteIcon::ActionWebhook
        | PaletteIcon::ActionWatchlist => ConfigType::Action,
        PaletteIcon::Enrich | PaletteIcon::GetDetection | PaletteIcon::GetUser => ConfigType::Enrich,
        PaletteIcon::Loop
        | PaletteIcon::Break
        | PaletteIcon::Exit
        | PaletteIcon::Wait
        | PaletteIcon::LogicWait
        | PaletteIcon::Dedup
        | PaletteIcon::AiAgent
        | PaletteIcon::AiTask
        | PaletteIcon::Transform
        | PaletteIcon::TransformExtract
        | PaletteIcon::Workflow
        | PaletteIcon::Interact
        | PaletteIcon::Loading
        | PaletteIcon::MetaComment => ConfigType::Generic,
    }
}

impl ConfigType {
    pub fn schema(self) -> &'static NodeConfigSchema {
        match self {
            ConfigType::Trigger => &TRIGGER_SCHEMA,
            ConfigType::Decision => &DECISION_SCHEMA,
            ConfigType::Notify => &NOTIFY_SCHEMA,
            ConfigType::Action => &ACTION_SCHEMA,
            ConfigType::Enrich => &ENRICH_SCHEMA,
            ConfigType::Generic => &DEFAULT_SCHEMA,
        }
    }
}

/// Schema for a palette type; no type means the generic schema.
pub fn get_config_schema(icon: Option<PaletteIcon>) -> &'static NodeConfigSchema {
    match icon {
        Some(icon) => config_type_for(icon).schema(),
        None => &DEFAULT_SCHEMA,
    }
}
