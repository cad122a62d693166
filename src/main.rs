mod aggregate;
mod config;
mod errors;
mod fixtures;
mod journal;
mod mentor;
mod server;
mod state;

use crate::state::AppState;

#[tokio::main]
async fn main() {
    // Structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("trade_journal starting");

    // Load config
    let cfg = match config::AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("config error: {e}");
            std::process::exit(1);
        }
    };

    // Load journal fixtures
    let journal = match fixtures::Journal::load(cfg.fixtures_path.as_deref(), &cfg.mentor_share_id) {
        Ok(j) => j,
        Err(e) => {
            tracing::error!("fixture load error: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!(
        user = %cfg.current_user,
        timezone = %cfg.timezone,
        share_id = %cfg.mentor_share_id,
        "journal ready"
    );

    let port = cfg.server_port;
    let app = server::router(AppState::new(cfg, journal));

    let addr = format!("0.0.0.0:{port}");
    tracing::info!("server listening on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("bind error: {e}");
            std::process::exit(1);
        });

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("server error: {e}");
    }
}
