use aula_api_mock::MockState;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aula_api_mock=info,tower_http=info".into()),
        )
        .init();

    let port: u16 = std::env::var("HTTP_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);

    let state = Arc::new(MockState::seeded());
    let app = aula_api_mock::router(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!(port, "aula-api-mock listening");
    axum::serve(listener, app).await?;
    Ok(())
}
