use anyhow::Context;

use bloglist_infra::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    bloglist_observability::init();

    let config = AppConfig::from_env().context("invalid configuration")?;
    let services = bloglist_api::app::services::build_services(&config).await?;
    let app = bloglist_api::app::build_app(services);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port))
        .await
        .with_context(|| format!("failed to bind 0.0.0.0:{}", config.port))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
