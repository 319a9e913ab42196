//! Integration tests for the PostgreSQL infrastructure
//!
//! These tests need a reachable database (`DATABASE_URL`) and are ignored by
//! default. Run them with `cargo test -- --ignored`.

use common::database::{DatabaseConfig, apply_schema, health_check, init_pool};
use sqlx::Row;

/// Connects, bootstraps the schema twice and checks the tables exist
#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_schema_bootstrap_is_idempotent() -> Result<(), Box<dyn std::error::Error>> {
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    assert!(health_check(&pool).await?, "Database health check failed");

    apply_schema(&pool).await?;
    apply_schema(&pool).await?;

    let row = sqlx::query(
        r#"
        SELECT COUNT(*) AS tables
        FROM information_schema.tables
        WHERE table_name IN ('users', 'appointment_types', 'appointments')
        "#,
    )
    .fetch_one(&pool)
    .await?;

    let tables: i64 = row.get("tables");
    assert_eq!(tables, 3, "Expected all service tables to exist");

    Ok(())
}
