//! Layout compiler: canonical keys, ordering, determinism, consistency
//! failures, and the position-ordered export document.

use recmap_layout::{LAYOUT_SCHEMA, LayoutError, compile, layout_document};
use recmap_model::{FieldMappingConfig, FieldRule};

fn config() -> FieldMappingConfig {
    let mut config = FieldMappingConfig::new("CORE-BANKING", "eod-settlement", "TXN-900");
    config.fields = vec![
        // Declared out of position order on purpose.
        FieldRule::source("Account-ID", 4, 12, "acct"),
        FieldRule::constant("record-type", 1, 3, "200"),
        FieldRule::composite(
            "branch-key",
            16,
            10,
            vec!["branch".to_string(), "region".to_string()],
            "-",
        ),
    ];
    config
}

#[test]
fn keys_are_canonical_and_order_follows_position() {
    let layout = compile(&config()).expect("compile");
    assert_eq!(layout.len(), 3);
    assert!(layout.get("account_id").is_some());
    assert!(layout.get("record_type").is_some());

    let keys: Vec<&str> = layout.ordered().iter().map(|(key, _)| *key).collect();
    assert_eq!(keys, vec!["record_type", "account_id", "branch_key"]);
}

#[test]
fn rules_pass_through_unchanged() {
    let layout = compile(&config()).expect("compile");
    let rule = layout.get("branch_key").expect("branch-key entry");
    assert_eq!(rule.target_position, 16);
    assert_eq!(rule.length, 10);
    assert_eq!(rule.source_fields, vec!["branch", "region"]);
    assert_eq!(rule.delimiter.as_deref(), Some("-"));
}

#[test]
fn compile_is_deterministic() {
    let config = config();
    let first = compile(&config).expect("compile once");
    let second = compile(&config).expect("compile twice");
    assert_eq!(first, second);
    assert_eq!(
        first.ordered().iter().map(|(k, _)| *k).collect::<Vec<_>>(),
        second.ordered().iter().map(|(k, _)| *k).collect::<Vec<_>>(),
    );
}

#[test]
fn canonical_key_collision_is_fatal() {
    let mut config = config();
    // "Account-ID" and "account_id" normalize to the same key.
    config.fields.push(FieldRule::constant("account_id", 30, 2, "XX"));
    match compile(&config) {
        Err(LayoutError::DuplicateKey { key, field }) => {
            assert_eq!(key, "account_id");
            assert_eq!(field, "account_id");
        }
        other => panic!("expected duplicate-key failure, got {other:?}"),
    }
}

#[test]
fn missing_field_name_is_fatal() {
    let mut config = config();
    config.fields.push(FieldRule::default());
    match compile(&config) {
        Err(LayoutError::MissingFieldName { index }) => assert_eq!(index, 4),
        other => panic!("expected missing-field-name failure, got {other:?}"),
    }
}

#[test]
fn export_document_is_position_ordered() {
    let layout = compile(&config()).expect("compile");
    let json = serde_json::to_string(&layout_document(&layout)).expect("serialize");
    let record_type = json.find("\"record_type\"").expect("record_type present");
    let account_id = json.find("\"account_id\"").expect("account_id present");
    let branch_key = json.find("\"branch_key\"").expect("branch_key present");
    assert!(record_type < account_id && account_id < branch_key);

    let value: serde_json::Value = serde_json::from_str(&json).expect("parse back");
    assert_eq!(value["schema"], LAYOUT_SCHEMA);
    assert_eq!(value["fields"]["account_id"]["target_position"], 4);
    assert_eq!(value["fields"]["record_type"]["constant_value"], "200");
}
