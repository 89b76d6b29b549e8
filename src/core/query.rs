//! Query engine - filtered and sorted views over the record store.
//!
//! Filtering and sorting are pure functions over the snapshot returned by
//! [`store::list_applications`]; the engine keeps no state of its own.

use crate::{
    core::store,
    entities::{ApplicationStatus, application},
    errors::{Error, Result},
};
use sea_orm::ConnectionTrait;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

/// Sort key for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    /// Chronological by `application_date`
    Date,
    /// Lexicographic, case-sensitive, by `company_name`
    Company,
    /// Lexicographic, case-sensitive, by the status string
    Status,
}

impl FromStr for SortBy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "date" => Ok(Self::Date),
            "company" => Ok(Self::Company),
            "status" => Ok(Self::Status),
            other => Err(Error::validation(format!(
                "Unknown sort key '{other}' (expected date, company or status)"
            ))),
        }
    }
}

/// Sort direction. Descending unless asked otherwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Natural ascending order of the sort key
    Asc,
    /// Reverse of the natural order
    #[default]
    Desc,
}

impl FromStr for SortOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(Error::validation(format!(
                "Unknown sort order '{other}' (expected asc or desc)"
            ))),
        }
    }
}

/// Listing filters and ordering.
///
/// Filters combine with AND. A missing or empty filter matches everything.
/// Without `sort_by` the store's creation order is kept (newest first for `desc`,
/// oldest first for `asc`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationQuery {
    /// Exact status match
    pub status: Option<ApplicationStatus>,
    /// Case-insensitive substring of `company_name`
    pub company: Option<String>,
    /// Case-insensitive substring of company, position or description
    pub search: Option<String>,
    /// Sort key
    pub sort_by: Option<SortBy>,
    /// Sort direction, `desc` when absent
    pub sort_order: Option<SortOrder>,
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_lowercase)
}

fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

fn compare(sort_by: SortBy, a: &application::Model, b: &application::Model) -> Ordering {
    match sort_by {
        SortBy::Date => a.application_date.cmp(&b.application_date),
        SortBy::Company => a.company_name.cmp(&b.company_name),
        SortBy::Status => a.status.as_str().cmp(b.status.as_str()),
    }
}

impl ApplicationQuery {
    /// Whether a record passes every supplied filter.
    #[must_use]
    pub fn matches(&self, record: &application::Model) -> bool {
        if self.status.is_some_and(|status| record.status != status) {
            return false;
        }

        if let Some(company) = non_empty(self.company.as_deref()) {
            if !contains_ignore_case(&record.company_name, &company) {
                return false;
            }
        }

        if let Some(search) = non_empty(self.search.as_deref()) {
            let hit = contains_ignore_case(&record.company_name, &search)
                || contains_ignore_case(&record.position_title, &search)
                || record
                    .job_description
                    .as_deref()
                    .is_some_and(|description| contains_ignore_case(description, &search));
            if !hit {
                return false;
            }
        }

        true
    }

    /// Filters and orders a snapshot. The sort is stable, so records with equal
    /// keys keep their relative snapshot order.
    #[must_use]
    pub fn apply(&self, snapshot: Vec<application::Model>) -> Vec<application::Model> {
        let mut matched: Vec<application::Model> =
            snapshot.into_iter().filter(|r| self.matches(r)).collect();

        let order = self.sort_order.unwrap_or_default();
        match self.sort_by {
            Some(sort_by) => matched.sort_by(|a, b| {
                let natural = compare(sort_by, a, b);
                match order {
                    SortOrder::Asc => natural,
                    SortOrder::Desc => natural.reverse(),
                }
            }),
            None if order == SortOrder::Asc => matched.reverse(),
            None => {}
        }

        matched
    }
}

/// Lists applications matching `query`, in the requested order.
///
/// An empty result is not an error.
pub async fn find_applications<C>(
    db: &C,
    query: &ApplicationQuery,
) -> Result<Vec<application::Model>>
where
    C: ConnectionTrait,
{
    let snapshot = store::list_applications(db).await?;
    Ok(query.apply(snapshot))
}
