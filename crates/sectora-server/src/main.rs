use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sectora_server::config::AppConfig;
use sectora_server::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sectora_server=info,tower_http=info".into()),
        )
        .init();

    let config = AppConfig::from_env()?;
    let state = AppState::from_config(&config)?;
    let app = sectora_server::app_router(state);

    tracing::info!(
        model = %config.model.model,
        index = %config.search.index,
        "Sectora server listening on {}",
        config.addr
    );

    let listener = tokio::net::TcpListener::bind(&config.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
