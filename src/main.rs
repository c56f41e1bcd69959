//! ShoeStore - storefront backend binary

use anyhow::Result;
use shoestore::{routes, AppState, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "shoestore=info,tower_http=info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let nats = match &config.nats_url {
        Some(url) => match async_nats::connect(url.as_str()).await {
            Ok(client) => { tracing::info!(%url, "connected to NATS"); Some(client) }
            Err(e) => { tracing::warn!(%url, error = %e, "NATS unavailable, events will only be logged"); None }
        },
        None => None,
    };

    if !config.static_root.is_dir() {
        tracing::warn!(root = %config.static_root.display(), "static root missing, storefront pages will 404");
    }

    let addr = config.socket_addr();
    let app = routes::router(AppState::new(&config, nats));

    tracing::info!("🚀 ShoeStore listening on {}", addr);
    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;
    Ok(())
}
