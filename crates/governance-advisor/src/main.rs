mod cache;
mod catalog;
mod config;
mod error;
mod extract;
mod matcher;
mod model;
mod prompt;
mod scorer;
mod server;
mod throttle;

use std::sync::Arc;

use rmcp::{ServiceExt, transport::stdio};
use tracing::info;
use tracing_subscriber::EnvFilter;

use gov_common::openai::{OpenAiClient, OpenAiClientConfig};
use gov_common::redis::RedisCache;
use gov_common::usage::UsageTracker;

use cache::AssessmentCache;
use config::Config;
use server::GovernanceAdvisorServer;
use throttle::UpstreamThrottle;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing to stderr (stdout is reserved for MCP JSON-RPC)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    info!("starting governance-advisor MCP server");

    let config = Config::from_env()?;
    info!(
        catalog_path = %config.catalog_path,
        default_model = %config.default_model,
        redis = config.redis_url.is_some(),
        "configuration loaded"
    );

    // Vendor catalog is loaded once and stays immutable for the process lifetime
    let vendors = catalog::load_catalog(&config.catalog_file_path())?;
    info!(vendors = vendors.len(), "vendor catalog loaded");

    let openai_config = OpenAiClientConfig::from_env();
    info!(
        base_url = %openai_config.base_url,
        credentials = openai_config.api_key.is_some(),
        timeout_ms = openai_config.default_timeout.as_millis(),
        max_retries = openai_config.max_retries,
        "openai client configured"
    );
    let openai = Arc::new(OpenAiClient::new(openai_config)?);
    if !openai.has_credentials() {
        info!("OPENAI_API_KEY not set, assessment calls will report unconfigured credentials");
    }

    let redis = Arc::new(RedisCache::new(config.redis_url.as_deref()));
    if redis.is_available().await {
        info!("redis connected");
    } else {
        info!("redis unavailable, running without cache or usage counters");
    }
    let cache = Arc::new(AssessmentCache::new(Arc::clone(&redis)));
    let usage = UsageTracker::new(Arc::clone(&redis));

    let throttle = UpstreamThrottle::from_env();
    if throttle.is_some() {
        info!("upstream throttle enabled");
    }

    let server = GovernanceAdvisorServer::new(
        vendors,
        openai,
        cache,
        usage,
        throttle,
        config.default_model.clone(),
    );

    info!("MCP server ready, serving on stdio");
    let service = server.serve(stdio()).await.inspect_err(|e| {
        tracing::error!(error = %e, "MCP server error");
    })?;

    service.waiting().await?;
    info!("MCP server shut down");
    Ok(())
}
