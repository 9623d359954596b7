use std::net::SocketAddr;
use std::time::Duration;

use hr_desk_portal::{
    build_router,
    config::{get_config, init_config},
    AppState,
};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

const PURGE_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("hr_desk_portal=info,tower_http=info")),
        )
        .init();

    init_config()?;
    let config = get_config();

    let app_state = AppState::new(config)?;

    {
        let state = app_state.clone();
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(PURGE_INTERVAL).await;
                state.draft_service.purge_stale().await;
                state.session_service.purge_expired().await;
            }
        });
    }

    let app = build_router(app_state, config);

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
