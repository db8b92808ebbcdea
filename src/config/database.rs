//! Database configuration module.
//!
//! Handles `SQLite` connection and table creation using `SeaORM`. Tables are
//! generated from the entity definitions via `Schema::create_table_from_entity`
//! so the schema always matches the Rust structs, and creation is idempotent
//! (`IF NOT EXISTS`) so initialization can run on every boot.

use crate::entities::{AbsenceRecord, Holiday, OvertimeRecord, TimeClockRecord, User};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use std::time::Duration;
use tracing::warn;

/// Gets the database URL from environment variable or returns default `SQLite` path.
///
/// This function looks for `DATABASE_URL` in the environment and falls back to
/// a default local `SQLite` file, created on first connect.
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://data/hourbank.sqlite?mode=rwc".to_string())
}

/// Establishes a connection to the `SQLite` database.
pub async fn create_connection() -> Result<DatabaseConnection> {
    Database::connect(get_database_url())
        .await
        .map_err(Into::into)
}

/// Creates all tables from the entity definitions, skipping ones that exist.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut statements = [
        schema.create_table_from_entity(User),
        schema.create_table_from_entity(Holiday),
        schema.create_table_from_entity(OvertimeRecord),
        schema.create_table_from_entity(TimeClockRecord),
        schema.create_table_from_entity(AbsenceRecord),
    ];

    for statement in &mut statements {
        statement.if_not_exists();
        db.execute(builder.build(statement)).await?;
    }

    Ok(())
}

/// Connects and initializes the schema, retrying once after a second.
///
/// Covers the transient failures seen right after the storage backing the
/// database file comes up; anything that fails twice propagates.
pub async fn init_db() -> Result<DatabaseConnection> {
    match connect_and_create().await {
        Ok(db) => Ok(db),
        Err(err) => {
            warn!(error = %err, "database initialization failed, retrying in 1s");
            tokio::time::sleep(Duration::from_secs(1)).await;
            connect_and_create().await
        }
    }
}

async fn connect_and_create() -> Result<DatabaseConnection> {
    let db = create_connection().await?;
    create_tables(&db).await?;
    Ok(db)
}
