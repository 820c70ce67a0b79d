//! Mock HTTP server for the route-handler side of the dashboard case plus
//! the case catalog.

pub mod error;
pub mod router;
pub mod shutdown;

use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::Config;

pub use error::ServerError;
pub use router::{build_router, endpoint_path, AppState};
pub use shutdown::ShutdownManager;

/// How many ports past the configured one `try_bind` tries.
pub const PORT_SCAN_RANGE: u16 = 100;

pub struct MockServer {
    pub addr: SocketAddr,
    /// The bound listener, kept alive so nothing can claim the port between
    /// try_bind() and run().
    listener: Option<TcpListener>,
    state: AppState,
    shutdown: Arc<ShutdownManager>,
}

impl MockServer {
    pub fn new(state: AppState) -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            listener: None,
            state,
            shutdown: Arc::new(ShutdownManager::new()),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(AppState::from_config(config))
    }

    /// Bind `bind_addr`, falling back to the following ports if busy.
    /// Port 0 lets the OS pick. Returns the bound address and base URL.
    pub async fn try_bind(&mut self, bind_addr: &str) -> Result<(SocketAddr, String), ServerError> {
        let requested: SocketAddr =
            bind_addr
                .parse()
                .map_err(|source| ServerError::InvalidBindAddr {
                    addr: bind_addr.to_string(),
                    source,
                })?;

        let start_port = requested.port();
        let end_port = if start_port == 0 {
            0
        } else {
            start_port.saturating_add(PORT_SCAN_RANGE)
        };

        for port in start_port..=end_port {
            let try_addr = SocketAddr::new(requested.ip(), port);
            match TcpListener::bind(try_addr).await {
                Ok(listener) => {
                    let actual_addr = listener
                        .local_addr()
                        .map_err(|source| ServerError::Bind {
                            addr: try_addr,
                            source,
                        })?;
                    let base_url = format!("http://{actual_addr}");
                    self.addr = actual_addr;
                    self.listener = Some(listener);
                    tracing::info!("Mock server bound to {} (base_url: {})", actual_addr, base_url);
                    return Ok((actual_addr, base_url));
                }
                Err(e) => {
                    tracing::debug!("Port {} busy: {}", port, e);
                    continue;
                }
            }
        }

        Err(ServerError::NoAvailablePort {
            start: start_port,
            end: end_port,
        })
    }

    pub fn handle(&self) -> ServerHandle {
        ServerHandle {
            shutdown: self.shutdown.clone(),
        }
    }

    /// Serve until shutdown. Call try_bind() first.
    pub async fn run(self) -> Result<(), ServerError> {
        let listener = self.listener.ok_or(ServerError::NotBound)?;

        tracing::info!("Starting mock server on {}", self.addr);

        let app = build_router(self.state);
        let shutdown = self.shutdown.clone();
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                if let Err(e) = shutdown.wait_for_shutdown().await {
                    tracing::warn!("Shutdown signal handler failed: {}", e);
                }
            })
            .into_future()
            .await?;

        tracing::info!("Mock server stopped");
        Ok(())
    }
}

#[derive(Clone)]
pub struct ServerHandle {
    shutdown: Arc<ShutdownManager>,
}

impl ServerHandle {
    pub fn shutdown(&self) {
        self.shutdown.signal_shutdown();
    }
}
