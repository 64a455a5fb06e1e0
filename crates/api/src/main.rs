use anyhow::Context;

use shelfwise_api::config::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    shelfwise_observability::init();

    let config = ApiConfig::from_env().context("invalid API configuration")?;
    let app = shelfwise_api::app::build_app(&config).context("invalid route policy declarations")?;

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("server terminated")?;
    Ok(())
}
