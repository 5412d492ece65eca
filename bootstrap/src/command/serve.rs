use crate::args::CommonArgs;
use crate::locator::ApplicationPortLocator;
use anyhow::anyhow;
use application::access::AccessService;
use application::scholarship_application::ScholarshipApplicationService;
use application::tracking_code::TrackingCodeService;
use clap::Args;
use domain::roles::RoleResolver;
use domain_shared::authentication::Email;
use infrastructure::scholarship_application::scholarship_application_repository::PostgresScholarshipApplicationRepository;
use infrastructure::tracking_code::counter_store::PostgresCounterStore;
use presentation::api::run_api;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument};

#[derive(Args)]
pub struct ServeArgs {
    /// The single account allowed into the admin area
    #[arg(long, env = "ADMIN_EMAIL")]
    pub admin_email: String,
    /// The port for the HTTP API
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,
    /// How many times a tracking code allocation is attempted before falling back
    #[arg(long, env = "ALLOCATION_MAX_ATTEMPTS", default_value_t = 3)]
    pub allocation_max_attempts: u32,
    /// Deadline of a single allocation attempt in milliseconds
    #[arg(long, env = "ALLOCATION_ATTEMPT_TIMEOUT_MS", default_value_t = 2000)]
    pub allocation_attempt_timeout_ms: u64,
    /// How many conflicting commits the counter store retries per attempt
    #[arg(long, env = "COUNTER_MAX_COMMIT_ATTEMPTS", default_value_t = 5)]
    pub counter_max_commit_attempts: u32,
}

#[instrument(level = "trace", skip(common_args, args))]
pub async fn run(common_args: CommonArgs, args: ServeArgs) -> anyhow::Result<()> {
    let CommonArgs { database_url, .. } = common_args;
    let ServeArgs {
        admin_email,
        port,
        allocation_max_attempts,
        allocation_attempt_timeout_ms,
        counter_max_commit_attempts,
    } = args;
    if admin_email.trim().is_empty() {
        return Err(anyhow!("ADMIN_EMAIL must not be empty"));
    }
    let role_resolver = RoleResolver::new(Email(admin_email));

    let database_connection = sqlx::PgPool::connect(&database_url).await?;

    let counter_store = Arc::new(PostgresCounterStore::new(
        database_connection.clone(),
        counter_max_commit_attempts,
    ));
    let scholarship_application_repository = Arc::new(
        PostgresScholarshipApplicationRepository::new(database_connection.clone()),
    );

    let tracking_code_adapter = Arc::new(TrackingCodeService::new(
        counter_store,
        allocation_max_attempts,
        Duration::from_millis(allocation_attempt_timeout_ms),
    ));
    let access_adapter = Arc::new(AccessService::new(role_resolver.clone()));
    let scholarship_application_adapter = Arc::new(ScholarshipApplicationService::new(
        role_resolver,
        tracking_code_adapter,
        scholarship_application_repository,
    ));

    let locator = ApplicationPortLocator::new(access_adapter, scholarship_application_adapter);

    info!(port, "Starting scholarship portal");
    let api = tokio::spawn(run_api(locator, port));

    api.await?.map_err(|e| anyhow!(e))?;

    Ok(())
}
