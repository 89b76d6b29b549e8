//! Application entity - one tracked job application and its metadata.
//!
//! The `status` column is a closed enum stored as its display string, so a value
//! outside the seven lifecycle stages can never be written or read back.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::Error;

/// Lifecycle stage of an application.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum ApplicationStatus {
    /// Submitted, no response yet (the default for new records)
    #[default]
    #[sea_orm(string_value = "Applied")]
    #[serde(rename = "Applied")]
    Applied,
    /// An interview has been booked
    #[sea_orm(string_value = "Interview Scheduled")]
    #[serde(rename = "Interview Scheduled")]
    InterviewScheduled,
    /// The interview took place
    #[sea_orm(string_value = "Interview Completed")]
    #[serde(rename = "Interview Completed")]
    InterviewCompleted,
    /// Waiting on the employer after some contact
    #[sea_orm(string_value = "Waiting for Response")]
    #[serde(rename = "Waiting for Response")]
    WaitingForResponse,
    /// An offer was made
    #[sea_orm(string_value = "Offer Received")]
    #[serde(rename = "Offer Received")]
    OfferReceived,
    /// The employer declined
    #[sea_orm(string_value = "Rejected")]
    #[serde(rename = "Rejected")]
    Rejected,
    /// The applicant pulled out
    #[sea_orm(string_value = "Withdrawn")]
    #[serde(rename = "Withdrawn")]
    Withdrawn,
}

impl ApplicationStatus {
    /// Every status in lifecycle order.
    pub const ALL: [Self; 7] = [
        Self::Applied,
        Self::InterviewScheduled,
        Self::InterviewCompleted,
        Self::WaitingForResponse,
        Self::OfferReceived,
        Self::Rejected,
        Self::Withdrawn,
    ];

    /// The canonical string form, identical to what is persisted.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Applied => "Applied",
            Self::InterviewScheduled => "Interview Scheduled",
            Self::InterviewCompleted => "Interview Completed",
            Self::WaitingForResponse => "Waiting for Response",
            Self::OfferReceived => "Offer Received",
            Self::Rejected => "Rejected",
            Self::Withdrawn => "Withdrawn",
        }
    }
}

impl FromStr for ApplicationStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| Error::validation(format!("Unknown application status: '{s}'")))
    }
}

/// Application database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "applications")]
pub struct Model {
    /// Store-assigned identifier, never reused
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Employer name (required, non-empty)
    pub company_name: String,
    /// Role applied for (required, non-empty)
    pub position_title: String,
    /// Free-text job description
    #[sea_orm(column_type = "Text", nullable)]
    pub job_description: Option<String>,
    /// Salary range as advertised, e.g. "$80,000 - $120,000"
    pub salary_range: Option<String>,
    /// Work location or "Remote"
    pub location: Option<String>,
    /// Day the application was submitted
    #[sea_orm(indexed)]
    pub application_date: Date,
    /// Current lifecycle stage
    #[sea_orm(indexed)]
    pub status: ApplicationStatus,
    /// Link to the posting
    pub application_url: Option<String>,
    /// Recruiter or hiring manager name
    pub contact_person: Option<String>,
    /// Recruiter or hiring manager email
    pub contact_email: Option<String>,
    /// Personal notes
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    /// Scheduled interview day
    pub interview_date: Option<Date>,
    /// Day to chase the employer
    pub follow_up_date: Option<Date>,
    /// Creation instant, immutable
    #[sea_orm(indexed)]
    pub created_at: DateTimeUtc,
    /// Last successful write
    pub updated_at: DateTimeUtc,
}

/// Applications stand alone; there are no related tables.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_through_its_string_form() {
        for status in ApplicationStatus::ALL {
            assert_eq!(status.as_str().parse::<ApplicationStatus>().ok(), Some(status));
        }
    }

    #[test]
    fn test_status_parse_is_exact() {
        assert!("rejected".parse::<ApplicationStatus>().is_err());
        assert!("Reject".parse::<ApplicationStatus>().is_err());
        assert!(" Applied".parse::<ApplicationStatus>().is_err());
        assert!(matches!(
            "Ghosted".parse::<ApplicationStatus>(),
            Err(Error::Validation { .. })
        ));
    }

    #[test]
    fn test_status_serde_uses_display_strings() -> Result<(), serde_json::Error> {
        let json = serde_json::to_string(&ApplicationStatus::WaitingForResponse)?;
        assert_eq!(json, "\"Waiting for Response\"");

        let parsed: ApplicationStatus = serde_json::from_str("\"Offer Received\"")?;
        assert_eq!(parsed, ApplicationStatus::OfferReceived);
        Ok(())
    }

    #[test]
    fn test_default_status_is_applied() {
        assert_eq!(ApplicationStatus::default(), ApplicationStatus::Applied);
    }
}
