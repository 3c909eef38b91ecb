// Server module entry point
// Accept loop, connection handling and graceful shutdown for the demo binary

pub mod connection;
pub mod listener;

use crate::handler::AppState;
use reqkit::config::Config;
use reqkit::logger;
use std::sync::Arc;

pub use listener::create_reusable_listener;

/// Accept connections until Ctrl+C
pub async fn run(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let listener = create_reusable_listener(addr)?;
    logger::log_server_start(&addr, &cfg);

    let state = Arc::new(AppState::new(cfg));
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            accepted = listener.accept() => match accepted {
                Ok((stream, peer_addr)) => {
                    connection::handle_connection(stream, peer_addr, Arc::clone(&state));
                }
                Err(e) => logger::log_error(&format!("Failed to accept connection: {e}")),
            },
            _ = &mut shutdown => {
                logger::log_warning("Shutdown requested, no longer accepting connections");
                return Ok(());
            }
        }
    }
}
