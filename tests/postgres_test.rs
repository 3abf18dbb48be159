//! Integration tests for the PostgreSQL binding
//!
//! These tests need a running database and are ignored by default. Run them
//! with `DATABASE_URL` set and `cargo test -- --ignored`. The encode and decode
//! steps they rely on are covered offline in `src/pg.rs`.

mod common;

use chrono::{DateTime, Utc};
use common::{user_settings, UserMeta, UserSettings};
use sqlx::PgPool;
use std::sync::Arc;
use typecol::prelude::*;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Model)]
struct AuditTrail {
    actor: String,
    at: DateTime<Utc>,
}

async fn setup_pool() -> PgPool {
    let database_url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set for integration tests");

    PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to database")
}

async fn create_table(pool: &PgPool, table: &str, registry: &CodecRegistry) {
    let _ = sqlx::query(&format!("DROP TABLE IF EXISTS {} CASCADE", table))
        .execute(pool)
        .await;

    let mut columns = vec!["id TEXT PRIMARY KEY".to_string()];
    columns.extend(registry.ddl_columns(&Dialect::Postgres).unwrap());
    let create_sql = format!("CREATE TABLE {} ({})", table, columns.join(", "));
    sqlx::query(&create_sql)
        .execute(pool)
        .await
        .expect("Failed to create table");
}

async fn drop_table(pool: &PgPool, table: &str) {
    let _ = sqlx::query(&format!("DROP TABLE IF EXISTS {} CASCADE", table))
        .execute(pool)
        .await;
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_model_codec_round_trip() {
    let pool = setup_pool().await;

    let mut registry = CodecRegistry::new();
    registry
        .register(
            "meta".to_string(),
            ModelCodec::<UserMeta>::new().with_impl(ColumnType::PgJsonb),
        )
        .unwrap();
    registry
        .register(
            "settings".to_string(),
            AdapterCodec::json_text(Arc::new(TypeAdapter::<UserSettings>::new())),
        )
        .unwrap();
    create_table(&pool, "typecol_users", &registry).await;

    let meta_codec = registry.get::<ModelCodec<UserMeta>>("meta").unwrap();
    let settings_codec = registry
        .get::<AdapterCodec<UserSettings>>("settings")
        .unwrap();
    let meta_column = PgColumn::new(meta_codec).unwrap();
    let settings_column = PgColumn::new(settings_codec).unwrap();
    assert_eq!(meta_column.column_type(), &ColumnType::PgJsonb);

    let id = Uuid::new_v4().to_string();
    let meta = UserMeta::new(1, &[("f1", true)]);
    let settings = user_settings();

    let query = sqlx::query("INSERT INTO typecol_users (id, meta, settings) VALUES ($1, $2, $3)")
        .bind(id.clone());
    let query = meta_column.bind(query, Some(&meta)).unwrap();
    let query = settings_column.bind(query, Some(&settings)).unwrap();
    query.execute(&pool).await.unwrap();

    let row = sqlx::query("SELECT meta, settings FROM typecol_users WHERE id = $1")
        .bind(id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(meta_column.read(&row, "meta").unwrap(), Some(meta));
    assert_eq!(settings_column.read(&row, "settings").unwrap(), Some(settings));

    drop_table(&pool, "typecol_users").await;
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_absent_values_stored_as_null() {
    let pool = setup_pool().await;

    let mut registry = CodecRegistry::new();
    registry
        .register(
            "audit".to_string(),
            ModelCodec::<AuditTrail>::new().with_impl(ColumnType::PgJsonb),
        )
        .unwrap();
    create_table(&pool, "typecol_audit", &registry).await;

    let codec = registry.get::<ModelCodec<AuditTrail>>("audit").unwrap();
    let column = PgColumn::new(codec).unwrap();

    let present = AuditTrail {
        actor: "admin".to_string(),
        at: Utc::now(),
    };
    for (id, value) in [("present", Some(&present)), ("absent", None)] {
        let query = sqlx::query("INSERT INTO typecol_audit (id, audit) VALUES ($1, $2)").bind(id);
        column.bind(query, value).unwrap().execute(&pool).await.unwrap();
    }

    let rows = sqlx::query("SELECT id, audit FROM typecol_audit ORDER BY id")
        .fetch_all(&pool)
        .await
        .unwrap();
    assert_eq!(column.read(&rows[0], "audit").unwrap(), None);
    assert_eq!(column.read(&rows[1], "audit").unwrap(), Some(present));

    let raw: Option<String> = sqlx::query_scalar("SELECT audit::text FROM typecol_audit WHERE id = 'absent'")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(raw, None);

    drop_table(&pool, "typecol_audit").await;
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_invalid_stored_document_is_rejected() {
    let pool = setup_pool().await;

    let mut registry = CodecRegistry::new();
    registry
        .register(
            "meta".to_string(),
            ModelCodec::<UserMeta>::new().with_impl(ColumnType::PgJsonb),
        )
        .unwrap();
    create_table(&pool, "typecol_invalid", &registry).await;

    sqlx::query(r#"INSERT INTO typecol_invalid (id, meta) VALUES ('bad', '{"login_count": "many"}')"#)
        .execute(&pool)
        .await
        .unwrap();

    let codec = registry.get::<ModelCodec<UserMeta>>("meta").unwrap();
    let column = PgColumn::new(codec).unwrap();
    let row = sqlx::query("SELECT meta FROM typecol_invalid")
        .fetch_one(&pool)
        .await
        .unwrap();

    let err = column.read(&row, "meta").unwrap_err();
    assert!(matches!(err, TypecolError::Validation(ref e) if e.is_schema()));

    drop_table(&pool, "typecol_invalid").await;
}
