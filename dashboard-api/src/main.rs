mod auth;
mod config;
mod error;
mod routes;
mod state;

use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use config::ServerConfig;
use state::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,searchdash=debug")),
        )
        .init();

    let config = ServerConfig::from_env();
    let client = match config.build_client() {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "failed to build client");
            std::process::exit(1);
        }
    };
    info!(%client, "client ready");

    let app = routes::router(Arc::new(AppState { client }));

    let listener = match tokio::net::TcpListener::bind(&config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %config.bind_addr, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };
    info!("Listening on http://{}", config.bind_addr);
    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "server stopped");
        std::process::exit(1);
    }
}
