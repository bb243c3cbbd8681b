use mimalloc::MiMalloc;
use std::net::SocketAddr;
use tokio::task;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use airline_ops::{app, config::Config, AppState};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.app.rust_log))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Airline Ops console ({})", config.app.environment);
    info!("Remote API at {}", config.api.base_url);

    let app_state = AppState::new(config.clone())
        .await
        .map_err(|e| anyhow::anyhow!("failed to initialise application state: {e}"))?;

    // --- Start background tasks ---

    // Drop idle booking sessions; sweep at a quarter of the TTL
    let purge_state = app_state.clone();
    task::spawn(async move {
        let ttl = purge_state.desk.ttl();
        let every = (ttl / 4).max(std::time::Duration::from_secs(1));
        loop {
            tokio::time::sleep(every).await;
            purge_state.desk.purge_stale(ttl).await;
        }
    });

    // --- Start the web server ---

    let app = app(app_state);

    let addr: SocketAddr = format!("{}:{}", config.app.host, config.app.port)
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid HOST/PORT: {e}"))?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app.into_make_service()).await {
        error!("Server error: {}", e);
        return Err(e.into());
    }
    Ok(())
}
