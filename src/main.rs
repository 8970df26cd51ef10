use std::env;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use ga4_realtime_connector::credentials::AwsSecretStore;
use ga4_realtime_connector::handlers::{
    ConfigurationHandler, ConnectorRouter, MetadataHandler, RecordHandler,
};
use ga4_realtime_connector::rpc::{AnalyticsClientConfig, AnalyticsClientFactory};
use ga4_realtime_connector::transformations::SystemClock;
use ga4_realtime_connector::types::config::connector::ConnectorConfig;

const CONFIG_PATH_ENV_VAR: &str = "CONNECTOR_CONFIG_PATH";

fn load_config() -> anyhow::Result<ConnectorConfig> {
    match env::var(CONFIG_PATH_ENV_VAR) {
        Ok(path) => ConnectorConfig::load(Path::new(&path)),
        Err(_) => {
            tracing::debug!("{} not set, using default config", CONFIG_PATH_ENV_VAR);
            Ok(ConnectorConfig::default())
        }
    }
}

/// Invocation document from the first argument (a file path) or stdin.
fn read_invocation() -> anyhow::Result<String> {
    match env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read invocation document at {}", path)),
        None => {
            let mut document = String::new();
            std::io::stdin()
                .read_to_string(&mut document)
                .context("Failed to read invocation document from stdin")?;
            Ok(document)
        }
    }
}

fn build_router(config: ConnectorConfig, secrets: AwsSecretStore) -> ConnectorRouter {
    let secrets = Arc::new(secrets);
    let clients = Arc::new(AnalyticsClientFactory::new(AnalyticsClientConfig::from(&config)));
    let records = RecordHandler::new(
        secrets.clone(),
        clients.clone(),
        Arc::new(SystemClock),
        config.token_uri.clone(),
    );

    ConnectorRouter::new(
        Arc::new(ConfigurationHandler::new(config, secrets, clients)),
        Arc::new(MetadataHandler),
        Arc::new(records),
    )
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            return Err(e).context("Failed to load .env file");
        }
    }

    let config = load_config()?;
    tracing::info!(
        connector = config.connector_name.as_str(),
        version = config.connector_version.as_str(),
        "Loaded connector config"
    );

    let router = build_router(config, AwsSecretStore::from_env().await);

    let document = read_invocation()?;
    let response = router.handle_json(&document).await;
    if !response.is_success() {
        tracing::warn!("Invocation completed with a failure response");
    }

    let output = serde_json::to_string(&response).context("Failed to serialize response")?;
    println!("{}", output);
    Ok(())
}
