use std::sync::Arc;

use anyhow::Context;

use crmdash_infra::{AppConfig, HttpCrmClient};
use crmdash_observability::LogFormat;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    crmdash_observability::init(LogFormat::from_env()?);

    let config = AppConfig::from_env().context("invalid configuration")?;
    let client = HttpCrmClient::new(&config.crm).context("failed to build CRM client")?;
    tracing::info!(crm_api_url = %client.base_url(), "CRM client ready");

    let app = crmdash_api::app::build_app(Arc::new(client), config.dashboard);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
