//! One-shot migration of legacy plaintext credentials to the salted hash
//! format.
//!
//! Run once, during a maintenance window, and never concurrently with login
//! traffic or a second copy of itself. Re-running against fully migrated
//! data performs zero writes.

use account_service::config::Config;
use account_service::domain::user::migration::migrate_legacy_credentials;
use account_service::outbound::repositories::PostgresUserRepository;
use auth::PasswordHasher;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "account_service=info,migrate_credentials=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;

    let pg_pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&config.database.url)
        .await?;

    tracing::info!("Starting credential migration");

    let repository = PostgresUserRepository::new(pg_pool);
    let hasher = PasswordHasher::new();

    let report = migrate_legacy_credentials(&repository, &hasher).await?;

    tracing::info!(
        migrated = report.migrated,
        already_hashed = report.skipped,
        total = report.total(),
        "Credential migration completed"
    );

    Ok(())
}
