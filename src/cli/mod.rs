//! Command-line front end.
//!
//! Each subcommand maps onto exactly one core operation; the CLI only turns
//! arguments into core inputs and results into JSON.

/// Execution of parsed subcommands against the store
pub mod commands;

use crate::{
    core::{
        query::{SortBy, SortOrder},
        store::{ApplicationPatch, NewApplication},
    },
    entities::ApplicationStatus,
    errors::{Error, Result},
};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

/// Parsed command line.
#[derive(Debug, Parser)]
#[command(name = "job-tracker")]
#[command(version, about = "Track job applications and see how the search is going")]
pub struct Cli {
    /// Operation to run
    #[command(subcommand)]
    pub command: Command,
}

/// One core operation per subcommand.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List applications
    List {
        /// Exact status, e.g. "Interview Scheduled"
        #[arg(short, long)]
        status: Option<ApplicationStatus>,

        /// Case-insensitive substring of the company name
        #[arg(short, long)]
        company: Option<String>,

        /// Case-insensitive substring of company, position or description
        #[arg(long)]
        search: Option<String>,

        /// Sort key (date, company, status)
        #[arg(long)]
        sort_by: Option<SortBy>,

        /// Sort direction (asc, desc)
        #[arg(long)]
        sort_order: Option<SortOrder>,
    },

    /// Show one application
    Show {
        /// Application ID
        id: i64,
    },

    /// Record a new application
    Add(ApplicationArgs),

    /// Change fields of an application
    Update {
        /// Application ID
        id: i64,

        #[command(flatten)]
        fields: ApplicationArgs,

        /// Clear an optional field (repeatable)
        #[arg(long, value_enum)]
        clear: Vec<OptionalField>,
    },

    /// Delete an application permanently
    Delete {
        /// Application ID
        id: i64,
    },

    /// Totals, status breakdown and the last 30 days of activity
    Stats {
        /// Compute as if today were this date (YYYY-MM-DD)
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },

    /// Interviews scheduled for today or later
    Upcoming {
        /// Number of interviews to show
        #[arg(short, long, default_value = "5")]
        limit: u64,
    },

    /// Most recently added applications
    Recent {
        /// Number of applications to show
        #[arg(short, long, default_value = "5")]
        limit: u64,
    },
}

/// Record fields shared by `add` and `update`.
#[derive(Debug, Clone, Default, Args)]
pub struct ApplicationArgs {
    /// Company name
    #[arg(long)]
    pub company: Option<String>,

    /// Position title
    #[arg(long)]
    pub position: Option<String>,

    /// Job description
    #[arg(long)]
    pub description: Option<String>,

    /// Salary range, free text
    #[arg(long)]
    pub salary: Option<String>,

    /// Location, e.g. "Remote"
    #[arg(long)]
    pub location: Option<String>,

    /// Application date (YYYY-MM-DD)
    #[arg(long = "date")]
    pub application_date: Option<NaiveDate>,

    /// Status, e.g. "Applied"
    #[arg(long)]
    pub status: Option<ApplicationStatus>,

    /// Link to the posting
    #[arg(long)]
    pub url: Option<String>,

    /// Contact person
    #[arg(long)]
    pub contact: Option<String>,

    /// Contact email
    #[arg(long)]
    pub email: Option<String>,

    /// Free-form notes
    #[arg(long)]
    pub notes: Option<String>,

    /// Interview date (YYYY-MM-DD)
    #[arg(long)]
    pub interview: Option<NaiveDate>,

    /// Follow-up date (YYYY-MM-DD)
    #[arg(long)]
    pub follow_up: Option<NaiveDate>,
}

/// Optional fields that `update --clear` can reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[allow(missing_docs)]
pub enum OptionalField {
    Description,
    Salary,
    Location,
    Url,
    Contact,
    Email,
    Notes,
    Interview,
    FollowUp,
}

fn set_or_clear<T>(
    value: Option<T>,
    field: OptionalField,
    clear: &[OptionalField],
) -> Result<Option<Option<T>>> {
    let cleared = clear.contains(&field);
    match (value, cleared) {
        (Some(_), true) => Err(Error::validation(format!(
            "Cannot both set and clear {field:?}"
        ))),
        (Some(v), false) => Ok(Some(Some(v))),
        (None, true) => Ok(Some(None)),
        (None, false) => Ok(None),
    }
}

impl ApplicationArgs {
    /// Creation input. Missing required fields surface as a validation error from the store.
    #[must_use]
    pub fn into_new_application(self) -> NewApplication {
        NewApplication {
            company_name: self.company.unwrap_or_default(),
            position_title: self.position.unwrap_or_default(),
            job_description: self.description,
            salary_range: self.salary,
            location: self.location,
            application_date: self.application_date,
            status: self.status,
            application_url: self.url,
            contact_person: self.contact,
            contact_email: self.email,
            notes: self.notes,
            interview_date: self.interview,
            follow_up_date: self.follow_up,
        }
    }

    /// Partial update touching only the supplied or cleared fields.
    pub fn into_patch(self, clear: &[OptionalField]) -> Result<ApplicationPatch> {
        use OptionalField as F;

        Ok(ApplicationPatch {
            company_name: self.company,
            position_title: self.position,
            job_description: set_or_clear(self.description, F::Description, clear)?,
            salary_range: set_or_clear(self.salary, F::Salary, clear)?,
            location: set_or_clear(self.location, F::Location, clear)?,
            application_date: self.application_date,
            status: self.status,
            application_url: set_or_clear(self.url, F::Url, clear)?,
            contact_person: set_or_clear(self.contact, F::Contact, clear)?,
            contact_email: set_or_clear(self.email, F::Email, clear)?,
            notes: set_or_clear(self.notes, F::Notes, clear)?,
            interview_date: set_or_clear(self.interview, F::Interview, clear)?,
            follow_up_date: set_or_clear(self.follow_up, F::FollowUp, clear)?,
        })
    }
}
