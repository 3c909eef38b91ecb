// Connection module
// Serves a single TCP connection with HTTP/1.1

use crate::handler::{self, AppState};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use reqkit::logger;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Handle a single connection in a spawned task.
///
/// The whole connection, keep-alive included, is bounded by
/// `server.read_timeout`.
pub fn handle_connection(
    stream: tokio::net::TcpStream,
    peer_addr: SocketAddr,
    state: Arc<AppState>,
) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);
        let timeout_duration = Duration::from_secs(state.config.server.read_timeout);

        let conn = http1::Builder::new()
            .keep_alive(true)
            .serve_connection(
                io,
                service_fn(move |req| handler::handle_request(req, Arc::clone(&state), peer_addr)),
            );

        match tokio::time::timeout(timeout_duration, conn).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => logger::log_connection_error(&err),
            Err(_) => logger::log_warning(&format!(
                "Connection from {peer_addr} timed out after {} seconds",
                timeout_duration.as_secs()
            )),
        }
    });
}
