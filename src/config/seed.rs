//! First-run sample data.
//!
//! Seeding only ever touches an empty store, so enabling it on an existing
//! database is harmless.

use crate::{
    core::store::{self, NewApplication},
    entities::{Application, ApplicationStatus},
    errors::Result,
};
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, TransactionTrait};
use tracing::{debug, info, instrument};

/// The two sample applications shown on a fresh install.
#[must_use]
pub fn default_sample_applications() -> Vec<NewApplication> {
    vec![
        NewApplication {
            company_name: "TechCorp Inc.".to_string(),
            position_title: "Software Engineer".to_string(),
            job_description: Some(
                "Full-stack development role working with React and Node.js".to_string(),
            ),
            salary_range: Some("$80,000 - $120,000".to_string()),
            location: Some("San Francisco, CA".to_string()),
            application_date: "2024-01-15".parse().ok(),
            status: Some(ApplicationStatus::InterviewScheduled),
            application_url: Some("https://techcorp.com/careers/123".to_string()),
            contact_person: Some("Sarah Johnson".to_string()),
            contact_email: Some("sarah@techcorp.com".to_string()),
            notes: Some("Great company culture, very interested in this role".to_string()),
            interview_date: "2024-01-25".parse().ok(),
            follow_up_date: None,
        },
        NewApplication {
            company_name: "DataSoft Solutions".to_string(),
            position_title: "Frontend Developer".to_string(),
            job_description: Some("React specialist for e-commerce platform".to_string()),
            salary_range: Some("$70,000 - $95,000".to_string()),
            location: Some("Remote".to_string()),
            application_date: "2024-01-10".parse().ok(),
            status: Some(ApplicationStatus::Applied),
            application_url: Some("https://datasoft.com/jobs/456".to_string()),
            contact_person: None,
            contact_email: None,
            notes: Some("Applied through LinkedIn, waiting for response".to_string()),
            interview_date: None,
            follow_up_date: None,
        },
    ]
}

/// Inserts `samples` if the store holds no applications yet.
///
/// Returns the number of rows inserted. The emptiness check and the inserts
/// share one transaction; an invalid sample aborts the whole seed.
#[instrument(skip(db, samples), fields(samples = samples.len()))]
pub async fn seed_if_empty(db: &DatabaseConnection, samples: Vec<NewApplication>) -> Result<usize> {
    let txn = db.begin().await?;

    let existing = Application::find().count(&txn).await?;
    if existing > 0 {
        debug!("Store already holds {} applications, skipping seed", existing);
        return Ok(0);
    }

    let mut inserted = 0;
    for sample in samples {
        debug!("Seeding application for '{}'", sample.company_name);
        store::create_application(&txn, sample).await?;
        inserted += 1;
    }

    txn.commit().await?;
    info!("Seeded {} sample applications", inserted);
    Ok(inserted)
}
