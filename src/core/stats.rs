//! Statistics aggregation over the whole store.
//!
//! Query filters never apply here. The three reads behind [`get_statistics`] share
//! one transaction, so either all of them succeed or the whole call fails with
//! [`Error::StoreUnavailable`](crate::errors::Error::StoreUnavailable).

use crate::{
    entities::{Application, ApplicationStatus, application},
    errors::Result,
};
use chrono::{Duration, Local, NaiveDate};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, TransactionTrait,
};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Length of the recent-activity window, today included.
pub const RECENT_WINDOW_DAYS: i64 = 30;

/// Number of applications submitted on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    /// Calendar day (`YYYY-MM-DD`)
    pub date: NaiveDate,
    /// Applications with this `application_date`
    pub count: u64,
}

/// Aggregate view of the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    /// Number of records
    pub total: u64,
    /// Record count per status; statuses with no records are absent
    pub by_status: BTreeMap<ApplicationStatus, u64>,
    /// Per-day counts inside the recent window, oldest day first
    pub recent_applications: Vec<DailyCount>,
}

/// First day of the recent-activity window ending on `today`.
#[must_use]
pub fn window_start(today: NaiveDate) -> NaiveDate {
    today - Duration::days(RECENT_WINDOW_DAYS - 1)
}

/// Computes statistics with "today" taken from the local clock at call time.
pub async fn get_statistics(db: &DatabaseConnection) -> Result<Statistics> {
    get_statistics_as_of(db, Local::now().date_naive()).await
}

/// Computes statistics for a window ending on `today`.
#[instrument(skip(db))]
pub async fn get_statistics_as_of(db: &DatabaseConnection, today: NaiveDate) -> Result<Statistics> {
    let from = window_start(today);
    let txn = db.begin().await?;

    let total = Application::find().count(&txn).await?;

    let status_rows: Vec<(ApplicationStatus, i64)> = Application::find()
        .select_only()
        .column(application::Column::Status)
        .column_as(Expr::col(application::Column::Id).count(), "count")
        .group_by(application::Column::Status)
        .into_tuple()
        .all(&txn)
        .await?;

    let daily_rows: Vec<(NaiveDate, i64)> = Application::find()
        .select_only()
        .column(application::Column::ApplicationDate)
        .column_as(Expr::col(application::Column::Id).count(), "count")
        .filter(application::Column::ApplicationDate.between(from, today))
        .group_by(application::Column::ApplicationDate)
        .order_by_asc(application::Column::ApplicationDate)
        .into_tuple()
        .all(&txn)
        .await?;

    txn.commit().await?;

    let by_status = status_rows
        .into_iter()
        .map(|(status, count)| (status, count.unsigned_abs()))
        .collect();
    let recent_applications = daily_rows
        .into_iter()
        .map(|(date, count)| DailyCount {
            date,
            count: count.unsigned_abs(),
        })
        .collect();

    debug!(total, %from, %today, "Computed statistics");
    Ok(Statistics {
        total,
        by_status,
        recent_applications,
    })
}

/// Applications with an interview on or after `today`, soonest first.
pub async fn upcoming_interviews(
    db: &DatabaseConnection,
    today: NaiveDate,
    limit: u64,
) -> Result<Vec<application::Model>> {
    Application::find()
        .filter(application::Column::InterviewDate.gte(today))
        .order_by_asc(application::Column::InterviewDate)
        .order_by_asc(application::Column::Id)
        .limit(limit)
        .all(db)
        .await
        .map_err(Into::into)
}

/// The `limit` most recently created applications.
pub async fn recently_created(
    db: &DatabaseConnection,
    limit: u64,
) -> Result<Vec<application::Model>> {
    Application::find()
        .order_by_desc(application::Column::CreatedAt)
        .order_by_desc(application::Column::Id)
        .limit(limit)
        .all(db)
        .await
        .map_err(Into::into)
}
