//! Request handler module
//!
//! Demo routes that put every helper behind an HTTP endpoint.

pub mod router;

use reqkit::config::Config;
use reqkit::Renderer;

// Re-export main entry point
pub use router::handle_request;

/// Shared state for all connections
pub struct AppState {
    pub config: Config,
    pub renderer: Renderer,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let renderer = Renderer::from_config(&config.render);
        Self { config, renderer }
    }
}
