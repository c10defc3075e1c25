// Connection handling module
// Accepts a single TCP connection and serves HTTP/1.1 on it

use std::net::SocketAddr;
use std::sync::Arc;

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::{TokioIo, TokioTimer};
use tokio::net::TcpStream;

use crate::config::AppState;
use crate::handler;
use crate::logger;

/// Accept a connection if the connection limit allows it, then serve it
/// on its own task.
pub fn accept_connection(stream: TcpStream, peer_addr: SocketAddr, state: &Arc<AppState>) {
    let Some(prev_count) = state.try_acquire_connection() else {
        logger::log_warning(&format!(
            "Max connections reached: {}/{}. Connection from {peer_addr} rejected.",
            state.connection_count(),
            state.config.performance.max_connections.unwrap_or_default()
        ));
        drop(stream);
        return;
    };

    logger::log_connection_accepted(&peer_addr);
    logger::log_debug(&format!("Active connections: {}", prev_count + 1));

    handle_connection(stream, peer_addr, Arc::clone(state));
}

/// Serve one connection.
///
/// Each request head must arrive within the header read timeout, which
/// doubles as the keep-alive idle timeout. Handlers bound their own reads.
/// The connection slot is released when the task ends.
fn handle_connection(stream: TcpStream, peer_addr: SocketAddr, state: Arc<AppState>) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);
        let header_read_timeout = state.config.header_read_timeout();

        let mut builder = http1::Builder::new();
        builder
            .timer(TokioTimer::new())
            .header_read_timeout(header_read_timeout)
            .keep_alive(state.config.performance.keep_alive_timeout > 0);

        let service_state = Arc::clone(&state);
        let conn = builder.serve_connection(
            io,
            service_fn(move |req| handler::handle_request(req, Arc::clone(&service_state), peer_addr)),
        );

        match conn.await {
            Ok(()) => {}
            Err(err) if err.is_timeout() => {
                logger::log_debug(&format!(
                    "Closed connection from {peer_addr}: no request within {} seconds",
                    header_read_timeout.as_secs()
                ));
            }
            Err(err) => logger::log_connection_error(&err),
        }

        state.release_connection();
    });
}
