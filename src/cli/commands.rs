//! Runs a parsed [`Command`] and renders its result as JSON.

use super::Command;
use crate::{
    core::{
        query::{self, ApplicationQuery},
        stats, store,
    },
    errors::Result,
};
use chrono::Local;
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};
use tracing::{debug, instrument};

/// Executes `command` against the store and returns the JSON response body.
#[instrument(skip(db))]
pub async fn execute(db: &DatabaseConnection, command: Command) -> Result<Value> {
    let body = match command {
        Command::List {
            status,
            company,
            search,
            sort_by,
            sort_order,
        } => {
            let query = ApplicationQuery {
                status,
                company,
                search,
                sort_by,
                sort_order,
            };
            serde_json::to_value(query::find_applications(db, &query).await?)?
        }
        Command::Show { id } => serde_json::to_value(store::get_application(db, id).await?)?,
        Command::Add(args) => {
            let id = store::create_application(db, args.into_new_application()).await?;
            json!({ "id": id, "message": "Application created successfully" })
        }
        Command::Update { id, fields, clear } => {
            let patch = fields.into_patch(&clear)?;
            store::update_application(db, id, patch).await?;
            json!({ "message": "Application updated successfully" })
        }
        Command::Delete { id } => {
            store::delete_application(db, id).await?;
            json!({ "message": "Application deleted successfully" })
        }
        Command::Stats { as_of } => {
            let today = as_of.unwrap_or_else(|| Local::now().date_naive());
            serde_json::to_value(stats::get_statistics_as_of(db, today).await?)?
        }
        Command::Upcoming { limit } => {
            let today = Local::now().date_naive();
            serde_json::to_value(stats::upcoming_interviews(db, today, limit).await?)?
        }
        Command::Recent { limit } => {
            serde_json::to_value(stats::recently_created(db, limit).await?)?
        }
    };
    Ok(body)
}

/// Executes `command` and prints the result to stdout.
pub async fn run(db: &DatabaseConnection, command: Command) -> Result<()> {
    let body = execute(db, command).await?;
    debug!("Command finished");
    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{ApplicationArgs, OptionalField};
    use crate::core::query::{SortBy, SortOrder};
    use crate::entities::ApplicationStatus;
    use crate::errors::Error;
    use crate::test_utils::*;

    fn add_args(company: &str, position: &str, date: chrono::NaiveDate) -> ApplicationArgs {
        ApplicationArgs {
            company: Some(company.to_string()),
            position: Some(position.to_string()),
            application_date: Some(date),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_add_returns_id_and_confirmation() -> Result<()> {
        init_test_tracing();
        let db = setup_test_db().await?;

        let body = execute(
            &db,
            Command::Add(add_args("TechCorp Inc.", "Software Engineer", date(2024, 1, 15))),
        )
        .await?;

        assert_eq!(body["message"], "Application created successfully");
        let id = body["id"].as_i64().unwrap_or_default();
        assert_eq!(store::get_application(&db, id).await?.company_name, "TechCorp Inc.");
        Ok(())
    }

    #[tokio::test]
    async fn test_add_without_company_is_a_client_error() -> Result<()> {
        let db = setup_test_db().await?;

        let args = ApplicationArgs {
            position: Some("Engineer".to_string()),
            application_date: Some(date(2024, 1, 1)),
            ..Default::default()
        };
        let err = execute(&db, Command::Add(args)).await.err();
        assert!(matches!(err, Some(Error::Validation { .. })));
        assert!(err.is_some_and(|e| e.is_client_error()));
        Ok(())
    }

    #[tokio::test]
    async fn test_show_renders_record_fields() -> Result<()> {
        let db = setup_test_db().await?;
        let record = create_test_application(&db, "Acme", "Engineer", date(2024, 2, 1)).await?;

        let body = execute(&db, Command::Show { id: record.id }).await?;
        assert_eq!(body["company_name"], "Acme");
        assert_eq!(body["application_date"], "2024-02-01");
        assert_eq!(body["status"], "Applied");
        assert_eq!(body["notes"], Value::Null);
        Ok(())
    }

    #[tokio::test]
    async fn test_list_applies_query() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_application(&db, "Globex", "Engineer", date(2024, 1, 1)).await?;
        create_test_application(&db, "Acme", "Engineer", date(2024, 1, 2)).await?;
        create_application_with_status(&db, "Initech", date(2024, 1, 3), ApplicationStatus::Rejected)
            .await?;

        let body = execute(
            &db,
            Command::List {
                status: Some(ApplicationStatus::Applied),
                company: None,
                search: None,
                sort_by: Some(SortBy::Company),
                sort_order: Some(SortOrder::Asc),
            },
        )
        .await?;

        let names: Vec<&str> = body
            .as_array()
            .map(|rows| rows.iter().filter_map(|r| r["company_name"].as_str()).collect())
            .unwrap_or_default();
        assert_eq!(names, vec!["Acme", "Globex"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_and_delete_confirmations() -> Result<()> {
        let db = setup_test_db().await?;
        let record = create_test_application(&db, "Acme", "Engineer", date(2024, 1, 1)).await?;

        let body = execute(
            &db,
            Command::Update {
                id: record.id,
                fields: ApplicationArgs {
                    status: Some(ApplicationStatus::OfferReceived),
                    ..Default::default()
                },
                clear: vec![OptionalField::Notes],
            },
        )
        .await?;
        assert_eq!(body["message"], "Application updated successfully");
        assert_eq!(
            store::get_application(&db, record.id).await?.status,
            ApplicationStatus::OfferReceived
        );

        let body = execute(&db, Command::Delete { id: record.id }).await?;
        assert_eq!(body["message"], "Application deleted successfully");

        let again = execute(&db, Command::Delete { id: record.id }).await;
        assert!(matches!(again, Err(Error::NotFound { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_stats_as_of_date() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_application(&db, "Acme", "Engineer", date(2024, 1, 20)).await?;

        let body = execute(
            &db,
            Command::Stats {
                as_of: Some(date(2024, 1, 20)),
            },
        )
        .await?;
        assert_eq!(body["total"], 1);
        assert_eq!(body["byStatus"]["Applied"], 1);
        assert_eq!(body["recentApplications"][0]["date"], "2024-01-20");
        Ok(())
    }

    #[tokio::test]
    async fn test_recent_is_capped() -> Result<()> {
        let db = setup_test_db().await?;
        for company in ["One", "Two", "Three"] {
            create_test_application(&db, company, "Engineer", date(2024, 1, 1)).await?;
        }

        let body = execute(&db, Command::Recent { limit: 2 }).await?;
        assert_eq!(body.as_array().map(Vec::len), Some(2));
        assert_eq!(body[0]["company_name"], "Three");
        Ok(())
    }
}
