//! Database configuration module for the job tracker.
//!
//! This module handles the `SQLite` connection and table creation using `SeaORM`.
//! Tables and their secondary indexes are generated from the entity definitions with
//! `Schema::create_table_from_entity` / `Schema::create_index_from_entity`, so the schema
//! always matches the Rust structs without hand-written SQL. Both statements are issued
//! with `IF NOT EXISTS` and can run on every startup.

use crate::entities::Application;
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Database used when neither `DATABASE_URL` nor the config file name one.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/job_tracker.sqlite?mode=rwc";

/// Resolves the database URL.
///
/// `DATABASE_URL` from the environment wins, then the value from `config.toml`,
/// then [`DEFAULT_DATABASE_URL`].
#[must_use]
pub fn get_database_url(configured: Option<&str>) -> String {
    std::env::var("DATABASE_URL")
        .ok()
        .or_else(|| configured.map(str::to_string))
        .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string())
}

/// Creates the directory holding a file-backed `SQLite` database.
///
/// `SQLite` creates the file itself (with `mode=rwc`) but not missing parent
/// directories. In-memory and non-`SQLite` URLs are left alone.
pub fn ensure_sqlite_parent_dir(database_url: &str) -> Result<()> {
    let Some(rest) = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))
    else {
        return Ok(());
    };

    let path = rest.split('?').next().unwrap_or(rest);
    if path.is_empty() || path.starts_with(":memory:") {
        return Ok(());
    }

    if let Some(parent) = Path::new(path)
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
    {
        debug!("Ensuring database directory exists: {}", parent.display());
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Opens the store handle.
///
/// The returned connection is the only handle the core uses; callers pass it by
/// reference to every operation and close it on shutdown.
#[instrument]
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    ensure_sqlite_parent_dir(database_url)?;
    let db = Database::connect(database_url).await?;
    info!("Connected to database");
    Ok(db)
}

/// Creates the `applications` table and its indexes if they do not exist yet.
#[instrument(skip(db))]
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut table = schema.create_table_from_entity(Application);
    table.if_not_exists();
    db.execute(builder.build(&table)).await?;

    for mut index in schema.create_index_from_entity(Application) {
        index.if_not_exists();
        db.execute(builder.build(&index)).await?;
    }

    info!("Applications table ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::ApplicationModel;
    use sea_orm::{DbBackend, EntityTrait, QuerySelect, Statement};

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Querying the table proves it exists with the expected columns
        let rows: Vec<ApplicationModel> = Application::find().limit(1).all(&db).await?;
        assert!(rows.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_idempotent() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_queried_columns_are_indexed() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        let row = db
            .query_one(Statement::from_string(
                DbBackend::Sqlite,
                "SELECT COUNT(*) AS n FROM sqlite_master \
                 WHERE type = 'index' AND tbl_name = 'applications' AND sql IS NOT NULL",
            ))
            .await?;
        let count: i64 = match row {
            Some(row) => row.try_get("", "n")?,
            None => 0,
        };
        // status, application_date, created_at
        assert_eq!(count, 3);
        Ok(())
    }

    #[test]
    fn test_get_database_url_prefers_configured_value_over_default() {
        if std::env::var("DATABASE_URL").is_ok() {
            return;
        }
        assert_eq!(
            get_database_url(Some("sqlite://elsewhere.sqlite")),
            "sqlite://elsewhere.sqlite"
        );
        assert_eq!(get_database_url(None), DEFAULT_DATABASE_URL);
    }

    #[test]
    fn test_ensure_sqlite_parent_dir_creates_missing_directory() -> Result<()> {
        let root = std::env::temp_dir().join(format!("job-tracker-test-{}", std::process::id()));
        let nested = root.join("nested");
        let url = format!("sqlite://{}?mode=rwc", nested.join("tracker.sqlite").display());

        ensure_sqlite_parent_dir(&url)?;
        assert!(nested.is_dir());

        std::fs::remove_dir_all(&root)?;
        Ok(())
    }

    #[test]
    fn test_ensure_sqlite_parent_dir_ignores_memory_databases() -> Result<()> {
        ensure_sqlite_parent_dir("sqlite::memory:")?;
        ensure_sqlite_parent_dir("postgres://localhost/db")?;
        Ok(())
    }
}
