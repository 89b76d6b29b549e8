//! Record store - create, read, update, delete and list application records.
//!
//! Every function takes the store handle explicitly. Single-row writes rely on
//! `SQLite` statement atomicity; the read-modify-write of [`update_application`]
//! runs inside a transaction so a partial field write can never be observed.
//! Concurrent updates to the same id are last-write-wins.

use crate::{
    entities::{Application, ApplicationStatus, application},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info, instrument};

/// Fields accepted when creating an application.
///
/// Server-assigned keys (`id`, `created_at`, `updated_at`) are not part of this
/// type and are ignored when present in a deserialized body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewApplication {
    /// Required, must not be blank
    #[serde(default)]
    pub company_name: String,
    /// Required, must not be blank
    #[serde(default)]
    pub position_title: String,
    pub job_description: Option<String>,
    pub salary_range: Option<String>,
    pub location: Option<String>,
    /// Required
    pub application_date: Option<Date>,
    /// Defaults to [`ApplicationStatus::Applied`]
    pub status: Option<ApplicationStatus>,
    pub application_url: Option<String>,
    pub contact_person: Option<String>,
    pub contact_email: Option<String>,
    pub notes: Option<String>,
    pub interview_date: Option<Date>,
    pub follow_up_date: Option<Date>,
}

/// A partial update.
///
/// `None` leaves a field untouched. For optional fields `Some(None)` clears the
/// stored value; in JSON that is an explicit `null` as opposed to a missing key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ApplicationPatch {
    pub company_name: Option<String>,
    pub position_title: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub job_description: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub salary_range: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub location: Option<Option<String>>,
    pub application_date: Option<Date>,
    pub status: Option<ApplicationStatus>,
    #[serde(default, deserialize_with = "present")]
    pub application_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub contact_person: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub contact_email: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub notes: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub interview_date: Option<Option<Date>>,
    #[serde(default, deserialize_with = "present")]
    pub follow_up_date: Option<Option<Date>>,
}

// A key that is present (even as null) deserializes to Some.
fn present<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::validation(format!("{field} is required")));
    }
    Ok(())
}

impl NewApplication {
    fn validate(&self) -> Result<Date> {
        require_text("company_name", &self.company_name)?;
        require_text("position_title", &self.position_title)?;
        self.application_date
            .ok_or_else(|| Error::validation("application_date is required"))
    }
}

impl ApplicationPatch {
    fn validate(&self) -> Result<()> {
        if let Some(company_name) = &self.company_name {
            require_text("company_name", company_name)?;
        }
        if let Some(position_title) = &self.position_title {
            require_text("position_title", position_title)?;
        }
        Ok(())
    }

    fn apply(self, active: &mut application::ActiveModel) {
        if let Some(v) = self.company_name {
            active.company_name = Set(v);
        }
        if let Some(v) = self.position_title {
            active.position_title = Set(v);
        }
        if let Some(v) = self.job_description {
            active.job_description = Set(v);
        }
        if let Some(v) = self.salary_range {
            active.salary_range = Set(v);
        }
        if let Some(v) = self.location {
            active.location = Set(v);
        }
        if let Some(v) = self.application_date {
            active.application_date = Set(v);
        }
        if let Some(v) = self.status {
            active.status = Set(v);
        }
        if let Some(v) = self.application_url {
            active.application_url = Set(v);
        }
        if let Some(v) = self.contact_person {
            active.contact_person = Set(v);
        }
        if let Some(v) = self.contact_email {
            active.contact_email = Set(v);
        }
        if let Some(v) = self.notes {
            active.notes = Set(v);
        }
        if let Some(v) = self.interview_date {
            active.interview_date = Set(v);
        }
        if let Some(v) = self.follow_up_date {
            active.follow_up_date = Set(v);
        }
    }
}

/// Validates and persists a new application, returning its id.
///
/// `company_name`, `position_title` and `application_date` must be present and
/// non-blank, otherwise [`Error::Validation`] is returned and nothing is written.
/// Status defaults to `Applied`; `created_at` and `updated_at` receive the same instant.
#[instrument(skip(db, new), fields(company = %new.company_name))]
pub async fn create_application<C>(db: &C, new: NewApplication) -> Result<i64>
where
    C: ConnectionTrait,
{
    let application_date = new.validate()?;
    let now = Utc::now();

    let record = application::ActiveModel {
        company_name: Set(new.company_name),
        position_title: Set(new.position_title),
        job_description: Set(new.job_description),
        salary_range: Set(new.salary_range),
        location: Set(new.location),
        application_date: Set(application_date),
        status: Set(new.status.unwrap_or_default()),
        application_url: Set(new.application_url),
        contact_person: Set(new.contact_person),
        contact_email: Set(new.contact_email),
        notes: Set(new.notes),
        interview_date: Set(new.interview_date),
        follow_up_date: Set(new.follow_up_date),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let id = Application::insert(record).exec(db).await?.last_insert_id;
    info!("Created application {}", id);
    Ok(id)
}

/// Fetches one application or fails with [`Error::NotFound`].
pub async fn get_application<C>(db: &C, id: i64) -> Result<application::Model>
where
    C: ConnectionTrait,
{
    Application::find_by_id(id)
        .one(db)
        .await?
        .ok_or(Error::NotFound { id })
}

/// Returns every application, newest-created first.
///
/// Records created within the same clock tick fall back to id order, which
/// follows insertion order.
pub async fn list_applications<C>(db: &C) -> Result<Vec<application::Model>>
where
    C: ConnectionTrait,
{
    let records = Application::find()
        .order_by_desc(application::Column::CreatedAt)
        .order_by_desc(application::Column::Id)
        .all(db)
        .await?;
    debug!("Listed {} applications", records.len());
    Ok(records)
}

/// Applies a partial update and returns the stored result.
///
/// Only the fields present in `patch` change. `updated_at` is refreshed (and
/// never moves backwards); `created_at` is left alone.
#[instrument(skip(db, patch))]
pub async fn update_application(
    db: &DatabaseConnection,
    id: i64,
    patch: ApplicationPatch,
) -> Result<application::Model> {
    patch.validate()?;

    let txn = db.begin().await?;

    let existing = Application::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or(Error::NotFound { id })?;

    let now = Utc::now().max(existing.updated_at);
    let mut active: application::ActiveModel = existing.into();
    patch.apply(&mut active);
    active.updated_at = Set(now);

    let updated = active.update(&txn).await?;
    txn.commit().await?;

    info!("Updated application {}", id);
    Ok(updated)
}

/// Permanently removes an application.
///
/// Deleting an id that does not exist (including one deleted earlier) is
/// reported as [`Error::NotFound`].
#[instrument(skip(db))]
pub async fn delete_application<C>(db: &C, id: i64) -> Result<()>
where
    C: ConnectionTrait,
{
    let result = Application::delete_by_id(id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::NotFound { id });
    }
    info!("Deleted application {}", id);
    Ok(())
}
