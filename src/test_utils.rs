//! Shared test utilities for the job tracker.
//!
//! This module provides helpers for setting up test databases and creating
//! application records with sensible defaults.

use crate::{
    core::store::{self, NewApplication},
    entities::application,
    errors::Result,
};
use chrono::{Duration, NaiveDate};
use sea_orm::DatabaseConnection;
use tracing_subscriber::EnvFilter;

/// Installs a tracing subscriber that writes through the test harness.
/// Safe to call from every test; only the first call wins.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Builds a calendar date, panicking on an impossible one (test input only).
#[allow(clippy::expect_used)]
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

/// The date `days` before `today`.
pub fn days_before(today: NaiveDate, days: i64) -> NaiveDate {
    today - Duration::days(days)
}

/// Creation input with only the required fields filled in.
pub fn new_application(
    company_name: &str,
    position_title: &str,
    application_date: NaiveDate,
) -> NewApplication {
    NewApplication {
        company_name: company_name.to_string(),
        position_title: position_title.to_string(),
        application_date: Some(application_date),
        ..Default::default()
    }
}

/// Creates an application with the required fields and returns the stored record.
///
/// # Defaults
/// * `status`: Applied
/// * every optional field: None
pub async fn create_test_application(
    db: &DatabaseConnection,
    company_name: &str,
    position_title: &str,
    application_date: NaiveDate,
) -> Result<application::Model> {
    let id = store::create_application(
        db,
        new_application(company_name, position_title, application_date),
    )
    .await?;
    store::get_application(db, id).await
}

/// Creates an application with a specific status.
pub async fn create_application_with_status(
    db: &DatabaseConnection,
    company_name: &str,
    application_date: NaiveDate,
    status: application::ApplicationStatus,
) -> Result<application::Model> {
    let id = store::create_application(
        db,
        NewApplication {
            status: Some(status),
            ..new_application(company_name, "Software Engineer", application_date)
        },
    )
    .await?;
    store::get_application(db, id).await
}
