use std::sync::Arc;

use anyhow::Context;

use cattery_api::app::{build_app, services, CatService};
use cattery_infra::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    cattery_observability::init();

    let config = AppConfig::from_env().context("invalid configuration")?;

    let gateway = services::build_gateway(&config.store)
        .await
        .context("failed to initialise cat store")?;
    let service = Arc::new(CatService::with_system_defaults(gateway));

    let app = build_app(service);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("server terminated")?;
    Ok(())
}
