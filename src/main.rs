use clap::Parser;
use job_tracker::{
    cli::{self, Cli},
    config::{database, seed, settings},
    errors::Result,
};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // 1. Load .env first so RUST_LOG and DATABASE_URL can come from it
    dotenvy::dotenv().ok();

    // 2. Logs go to stderr, command output to stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_client_error() => {
            error!("{}", e);
            ExitCode::from(2)
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    // 3. Settings (config.toml is optional)
    let app_config = settings::load_app_configuration()?;

    // 4. Open the store and make sure the schema exists
    let database_url = database::get_database_url(app_config.database_url.as_deref());
    let db = database::create_connection(&database_url)
        .await
        .inspect_err(|e| error!("Failed to open database: {}", e))?;
    database::create_tables(&db).await?;

    // 5. Sample data on first run, if asked for
    if app_config.seed.enabled {
        let inserted = seed::seed_if_empty(&db, app_config.seed.samples()).await?;
        if inserted > 0 {
            info!("Inserted {} sample applications", inserted);
        }
    }

    // 6. Run the command, then close the store whatever the outcome
    let outcome = cli::commands::run(&db, cli.command).await;
    db.close().await?;
    outcome
}
