use dotenvy::dotenv;
use hourbank::config::{database, seeds};
use hourbank::core::summary;
use hourbank::errors::Result;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (as early as possible)
    dotenv().ok(); // Make it non-fatal, env vars can be set externally
    info!("Attempted to load .env file.");

    // 3. Load the holiday seed configuration
    let config = seeds::load_default_config()
        .inspect_err(|e| error!("Failed to load config.toml: {e}"))?;

    // 4. Initialize database (URL comes from DATABASE_URL or the bundled default)
    std::fs::create_dir_all("data")?;
    let db = database::init_db()
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {e}"))?;

    // 5. Seed holidays on first run
    let inserted = seeds::seed_holidays(&db, &config)
        .await
        .inspect_err(|e| error!("Failed to seed holidays: {e}"))?;
    if inserted > 0 {
        info!("Seeded {inserted} holidays from config.toml.");
    }

    // 6. Report the state of the books and hand control back to the caller
    let summary = summary::system_summary(&db).await;
    info!(
        employees = summary.total_employees,
        holidays = summary.total_holidays,
        hours_registered = summary.total_hours_registered,
        completion_rate = summary.completion_rate,
        "system ready"
    );

    Ok(())
}
