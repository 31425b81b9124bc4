use flow_canvas::model::JsonType;
use serde_json::json;
use threatflow_core::{CoreError, extract_fields, parse_and_extract_fields};

#[test]
fn test_object_fields_are_pre_order() {
    let payload = json!({
        "email": {
            "from": "attacker@evil.test",
            "subject": "Invoice"
        },
        "score": 87,
        "flagged": true,
        "tags": ["phish", "urgent"],
        "reviewer": null
    });

    let fields = extract_fields(&payload, "");
    let paths: Vec<&str> = fields.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(
        paths,
        vec![
            "email",
            "email.from",
            "email.subject",
            "score",
            "flagged",
            "tags",
            "tags[0]",
            "reviewer",
        ]
    );

    let types: Vec<JsonType> = fields.iter().map(|f| f.field_type).collect();
    assert_eq!(
        types,
        vec![
            JsonType::Object,
            JsonType::String,
            JsonType::String,
            JsonType::Number,
            JsonType::Boolean,
            JsonType::Array,
            JsonType::String,
            JsonType::Null,
        ]
    );

    let samples: Vec<&str> = fields.iter().filter_map(|f| f.sample.as_deref()).collect();
    assert_eq!(
        samples,
        vec![
            "{...}",
            "attacker@evil.test",
            "Invoice",
            "87",
            "true",
            "[2 items]",
            "phish",
            "null",
        ]
    );
    assert!(fields.iter().all(|f| f.selected == Some(true)));
}

#[test]
fn test_array_uses_first_element_only() {
    let fields = extract_fields(&json!({"items": [{"a": 1}, {"a": 2, "b": 3}]}), "");
    let paths: Vec<&str> = fields.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(paths, vec!["items", "items[0].a"]);
}

#[test]
fn test_nested_arrays_and_root_arrays() {
    let fields = extract_fields(&json!([[{"id": 1}]]), "");
    let paths: Vec<&str> = fields.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(paths, vec!["[0][0].id"]);

    assert!(extract_fields(&json!([]), "").is_empty());
    assert!(extract_fields(&json!({"empty": []}), "").len() == 1);
}

#[test]
fn test_scalars_at_root_yield_nothing() {
    for value in [json!(null), json!(1), json!("text"), json!(false)] {
        assert!(extract_fields(&value, "").is_empty());
    }
}

#[test]
fn test_prefix_is_applied() {
    let fields = extract_fields(&json!({"a": {"b": 1}}), "payload");
    let paths: Vec<&str> = fields.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(paths, vec!["payload.a", "payload.a.b"]);
}

#[test]
fn test_inference_is_idempotent() {
    let text = r#"{"z": 1, "a": {"m": [1, 2], "b": "x"}}"#;
    let first = parse_and_extract_fields(text).expect("valid json");
    let second = parse_and_extract_fields(text).expect("valid json");
    assert_eq!(first, second);
    // Key order follows the document, not alphabetical order.
    assert_eq!(first[0].path, "z");
    assert_eq!(first[1].path, "a");
    assert_eq!(first[2].path, "a.m");
}

#[test]
fn test_invalid_json_is_reported() {
    let err = parse_and_extract_fields("{not json").unwrap_err();
    assert!(matches!(err, CoreError::InvalidJson(_)));
    assert!(err.to_string().starts_with("Invalid JSON: "));
}
