// Server module entry
// Listener setup, accept loop, and graceful shutdown

pub mod connection;
pub mod signal;

use std::net::SocketAddr;
use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

use socket2::{Domain, Protocol, Socket, Type};
use tokio::net::TcpListener;

use crate::config::AppState;
use crate::logger;
use signal::SignalHandler;

/// Create a `TcpListener` with SO_REUSEPORT and SO_REUSEADDR enabled.
///
/// Allows rebinding the port immediately after a restart instead of waiting
/// out TIME_WAIT sockets.
pub fn bind(addr: SocketAddr) -> std::io::Result<TcpListener> {
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;
    socket.set_reuse_port(true)?;
    socket.set_reuse_address(true)?;
    socket.set_nonblocking(true)?;
    socket.bind(&addr.into())?;
    socket.listen(128)?;

    let std_listener: std::net::TcpListener = socket.into();
    TcpListener::from_std(std_listener)
}

/// Accept connections until a shutdown signal arrives.
///
/// In-flight connections finish in their own tasks after the loop exits.
pub async fn run(
    listener: TcpListener,
    state: Arc<AppState>,
    signals: Arc<SignalHandler>,
) -> Result<(), Box<dyn std::error::Error>> {
    let active_connections = Arc::new(AtomicUsize::new(0));

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        connection::accept_connection(
                            stream,
                            peer_addr,
                            &state,
                            &active_connections,
                        );
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = signals.shutdown.notified() => {
                logger::log_shutdown(
                    "Stopped accepting connections; in-flight requests will finish",
                );
                break;
            }
        }
    }

    Ok(())
}
