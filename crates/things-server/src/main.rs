//! Things API local server.
//!
//! Configuration is read from `things.toml` (optional), a `.env` file, the
//! database environment variables and `THINGS_*` overrides.

use anyhow::Context;
use std::sync::Arc;
use things_config::ConfigLoader;
use things_server::LocalServer;
use things_service::ThingsApi;
use things_store::{DatabaseTarget, HttpStatementExecutor};
use things_telemetry::init_logging;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ConfigLoader::new()
        .with_optional_file("things.toml")?
        .with_dotenv()?
        .with_database_env()
        .with_env_prefix("THINGS")
        .load()
        .context("failed to load configuration")?;

    init_logging(&config.logging.to_log_config())?;

    let database = config.require_database()?;
    let executor = Arc::new(HttpStatementExecutor::new(&database.endpoint));
    let target = DatabaseTarget::new(&database.cluster_arn, &database.secret_arn, &database.name);
    let actor = config.actor.actor_id();
    let addr = config.server.socket_addr().context("invalid server address")?;

    info!(database = %database.name, actor = %actor, "Starting things server");

    LocalServer::new(ThingsApi::new(executor, target, actor), addr)
        .with_shutdown_timeout(config.server.shutdown_timeout())
        .run()
        .await?;
    Ok(())
}
