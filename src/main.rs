use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;

use receipt_points::config::Config;
use receipt_points::server;
use receipt_points::services::points_service::STANDARD_ENGINE;
use receipt_points::state::AppState;
use receipt_points::telemetry;

#[tokio::main]
async fn main() {
    let config = Config::parse();

    if config.health_check {
        println!("Health check passed");
        return;
    }

    telemetry::init(config.log_level, config.log_format);

    let app_state = AppState::from_config(&config)
        .await
        .expect("Failed to create AppState");

    info!(
        rules = ?STANDARD_ENGINE.rule_names(),
        store = if config.redis_url.is_some() { "redis" } else { "memory" },
        "rule engine ready"
    );

    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("Failed to bind to {bind_addr}: {e}"));

    info!(addr = %bind_addr, "service starting");

    if let Err(e) = server::serve(
        listener,
        app_state,
        wait_for_shutdown_signal(),
        config.shutdown_grace(),
    )
    .await
    {
        panic!("Failed to start HTTP server: {e}");
    }

    info!("service exited");
}

/// Waits for SIGINT/SIGTERM.
async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate()).expect("register SIGTERM");
        let mut sigint = signal(SignalKind::interrupt()).expect("register SIGINT");
        tokio::select! {
            _ = sigterm.recv() => {}
            _ = sigint.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
