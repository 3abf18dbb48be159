//! Integration tests for model and adapter codecs
//!
//! Exercises the codecs through the public facade the way a mapping layer
//! would: bind hook on write, result hook on read, for every dialect.

mod common;

use common::{user_settings, Dimensions, Flag, UserMeta, UserSettings};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use typecol::prelude::*;

const DIALECTS: [Dialect; 4] = [
    Dialect::Default,
    Dialect::Postgres,
    Dialect::MySql,
    Dialect::Sqlite,
];

#[test]
fn test_model_round_trip_through_hooks() {
    let codec = ModelCodec::<UserMeta>::new();
    let meta = UserMeta::new(1, &[("f1", true)]);

    for dialect in DIALECTS {
        let stored = codec.process_bind_param(Some(&meta), &dialect).unwrap();
        assert_eq!(
            stored,
            Some(json!({"login_count": 1, "flags": [{"name": "f1", "enabled": true}]}))
        );

        let loaded = codec.process_result_value(stored, &dialect).unwrap();
        assert_eq!(loaded, Some(meta.clone()));
    }
}

#[test]
fn test_derived_model_metadata() {
    assert_eq!(UserMeta::model_name(), "UserMeta");
    assert_eq!(UserMeta::field_names(), &["flags", "login_count"]);

    let codec = ModelCodec::<UserMeta>::new();
    assert_eq!(codec.model_name(), "UserMeta");
    assert_eq!(codec.schema_name(), "UserMeta");
    assert_eq!(codec.codec_name(), "ModelCodec");
}

#[test]
fn test_derived_check_runs_on_read() {
    let codec = ModelCodec::<UserMeta>::new();
    let err = codec
        .decode(
            Some(json!({"login_count": 1, "flags": [{"name": "", "enabled": true}]})),
            &Dialect::Default,
        )
        .unwrap_err();

    match err {
        ValidationError::Check { type_name, message } => {
            assert_eq!(type_name, "UserMeta");
            assert_eq!(message, "flag names cannot be empty");
        }
        other => panic!("expected a check failure, got {other:?}"),
    }
}

#[test]
fn test_schema_errors_propagate_unmodified() {
    let codec = ModelCodec::<UserMeta>::new();

    let err = codec
        .decode(Some(json!({"login_count": "many", "flags": []})), &Dialect::Postgres)
        .unwrap_err();
    assert!(err.is_schema());
    assert_eq!(err.type_name(), Some("UserMeta"));

    let err = codec
        .decode(Some(json!({"flags": []})), &Dialect::Postgres)
        .unwrap_err();
    assert!(err.is_schema());
}

#[test]
fn test_absent_values_never_build_validator() {
    let codec = ModelCodec::<UserMeta>::new();

    for dialect in DIALECTS {
        assert_eq!(codec.encode(None, &dialect).unwrap(), None);
        assert_eq!(codec.decode(None, &dialect).unwrap(), None);
    }
    assert!(!codec.validator_initialized());

    codec
        .decode(Some(json!({"login_count": 0, "flags": []})), &Dialect::Default)
        .unwrap();
    assert!(codec.validator_initialized());
}

#[test]
fn test_json_text_model_codec() {
    let codec = ModelCodec::<UserMeta>::json_text();
    let meta = UserMeta::new(4, &[("beta", false)]);

    assert_eq!(
        codec.resolve_storage_descriptor(&Dialect::Postgres).unwrap(),
        ColumnType::string()
    );

    let stored = codec.encode(Some(&meta), &Dialect::Postgres).unwrap().unwrap();
    let text = stored.as_str().unwrap();
    let reparsed: serde_json::Value = serde_json::from_str(text).unwrap();
    assert_eq!(reparsed["login_count"], json!(4));

    assert_eq!(
        codec.decode(Some(stored), &Dialect::Postgres).unwrap(),
        Some(meta)
    );
}

#[test]
fn test_custom_functions_replace_defaults() {
    let codec = ModelCodec::<UserMeta>::new()
        .with_serializer_fn(|meta: &UserMeta| Ok(json!(meta.login_count)))
        .with_deserializer_fn(|primitive: Primitive| {
            let login_count = primitive
                .as_u64()
                .ok_or_else(|| ValidationError::custom("expected a login count"))?;
            Ok(UserMeta {
                flags: vec![Flag {
                    name: "restored".to_string(),
                    enabled: true,
                }],
                login_count: login_count as u32,
            })
        });

    let stored = codec
        .encode(Some(&UserMeta::new(9, &[])), &Dialect::MySql)
        .unwrap();
    assert_eq!(stored, Some(json!(9)));

    let loaded = codec.decode(stored, &Dialect::MySql).unwrap().unwrap();
    assert_eq!(loaded.login_count, 9);
    assert_eq!(loaded.flags[0].name, "restored");
    assert!(!codec.validator_initialized());
}

#[test]
fn test_adapter_codec_dimensions() {
    let adapter = Arc::new(TypeAdapter::<Dimensions>::named("Dimensions"));
    let codec = AdapterCodec::new(adapter);

    let stored = json!({"width": 120.0, "height": 45.0, "depth": 60.0, "unit": "cm"});
    let dimensions = codec
        .decode(Some(stored.clone()), &Dialect::Sqlite)
        .unwrap()
        .unwrap();
    assert_eq!(dimensions.unit, "cm");
    assert_eq!(
        codec.encode(Some(&dimensions), &Dialect::Sqlite).unwrap(),
        Some(stored)
    );

    let err = codec
        .decode(
            Some(json!({"width": 120.0, "height": 45.0, "unit": "cm"})),
            &Dialect::Sqlite,
        )
        .unwrap_err();
    assert!(err.is_schema());

    let err = codec
        .decode(
            Some(json!({"width": "wide", "height": 45.0, "depth": 60.0, "unit": "cm"})),
            &Dialect::Sqlite,
        )
        .unwrap_err();
    assert!(err.is_schema());
}

#[test]
fn test_adapter_codec_nested_records() {
    let codec = AdapterCodec::new(Arc::new(TypeAdapter::<UserSettings>::new()));
    let settings = user_settings();

    let stored = codec.encode(Some(&settings), &Dialect::Postgres).unwrap();
    assert_eq!(
        stored,
        Some(json!({
            "permissions": [
                {"name": "read", "level": 1},
                {"name": "write", "level": 2}
            ],
            "theme": "dark"
        }))
    );
    assert_eq!(
        codec.decode(stored, &Dialect::Postgres).unwrap(),
        Some(settings)
    );
}

#[test]
fn test_adapter_codec_with_checks() {
    let adapter = TypeAdapter::<HashMap<String, i64>>::named("Quotas")
        .with_check(|quotas: &HashMap<String, i64>| {
            if quotas.values().any(|quota| *quota < 0) {
                return Err("quotas cannot be negative".to_string());
            }
            Ok(())
        });
    let codec = AdapterCodec::new(Arc::new(adapter));

    assert!(codec
        .decode(Some(json!({"storage": 10})), &Dialect::Default)
        .unwrap()
        .is_some());

    let err = codec
        .decode(Some(json!({"storage": -1})), &Dialect::Default)
        .unwrap_err();
    assert_eq!(err.type_name(), Some("Quotas"));
}

#[test]
fn test_erased_codecs_share_one_type() {
    let codecs: Vec<AdapterCodec<AnyValue>> = vec![
        AdapterCodec::<AnyValue>::erased(Arc::new(TypeAdapter::<Dimensions>::new())),
        AdapterCodec::<AnyValue>::erased(Arc::new(TypeAdapter::<UserSettings>::new())),
    ];

    let dimensions = codecs[0]
        .decode(
            Some(json!({"width": 80.0, "height": 180.0, "depth": 30.0, "unit": "cm"})),
            &Dialect::Default,
        )
        .unwrap()
        .unwrap();
    assert_eq!(
        dimensions.downcast_ref::<Dimensions>().map(|d| d.height),
        Some(180.0)
    );

    let settings: AnyValue = Box::new(user_settings());
    let err = codecs[0]
        .encode(Some(&settings), &Dialect::Default)
        .unwrap_err();
    assert!(matches!(err, ValidationError::TypeMismatch { .. }));
    assert!(codecs[1].encode(Some(&settings), &Dialect::Default).is_ok());
}

#[test]
fn test_validate_on_write_from_config() {
    let config = AppConfig::from_toml_str(
        r#"
        [storage]
        default_impl = "jsonb"

        [codec]
        validate_on_write = true
        "#,
    )
    .unwrap();

    let codec = ModelCodec::<UserMeta>::from_config(&config);
    assert_eq!(
        codec.resolve_storage_descriptor(&Dialect::Postgres).unwrap(),
        ColumnType::PgJsonb
    );

    let err = codec
        .encode(Some(&UserMeta::new(1, &[("", true)])), &Dialect::Postgres)
        .unwrap_err();
    assert!(matches!(err, ValidationError::Check { .. }));

    let unchecked = ModelCodec::<UserMeta>::new();
    assert!(unchecked
        .encode(Some(&UserMeta::new(1, &[("", true)])), &Dialect::Postgres)
        .is_ok());
}
