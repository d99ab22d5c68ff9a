//! Relay server implementation.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::routes::create_router;
use crate::state::RelayState;

/// HTTP server accepting Splunk webhooks and relaying them to Alertmanager.
#[derive(Debug, Clone)]
pub struct RelayServer {
    state: Arc<RelayState>,
}

impl RelayServer {
    /// Create a new relay server.
    ///
    /// # Errors
    ///
    /// Returns `ServerError::InvalidConfig` if the configuration is unusable.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        config.validate()?;
        let state = Arc::new(RelayState::new(config)?);
        Ok(Self { state })
    }

    /// Get the relay state.
    #[must_use]
    pub fn state(&self) -> Arc<RelayState> {
        self.state.clone()
    }

    /// Bind the configured address.
    ///
    /// # Errors
    ///
    /// Returns `ServerError::BindFailed` if the address cannot be bound.
    pub async fn bind(&self) -> ServerResult<TcpListener> {
        let addr = &self.state.config().bind_addr;
        TcpListener::bind(addr.as_str())
            .await
            .map_err(|e| ServerError::BindFailed(addr.clone(), e))
    }

    /// Start the server on the configured address and run until a fatal error.
    ///
    /// # Errors
    ///
    /// Returns an error if binding to the address fails.
    pub async fn serve(&self) -> ServerResult<()> {
        self.serve_with_shutdown(std::future::pending()).await
    }

    /// Start the server on the configured address with graceful shutdown support.
    ///
    /// # Errors
    ///
    /// Returns an error if binding to the address fails.
    pub async fn serve_with_shutdown<F>(&self, shutdown: F) -> ServerResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = self.bind().await?;
        self.serve_on(listener, shutdown).await
    }

    /// Serve on an already bound listener until `shutdown` completes.
    ///
    /// # Errors
    ///
    /// Returns `ServerError::Internal` if the accept loop fails.
    pub async fn serve_on<F>(&self, listener: TcpListener, shutdown: F) -> ServerResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener
            .local_addr()
            .map_err(|e| ServerError::Internal(e.to_string()))?;

        info!(
            bind_address = %addr,
            alertmanager_url = %self.state.client().endpoint(),
            "relay server listening"
        );

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))?;

        info!("relay server shut down");
        Ok(())
    }

    /// Create the router without starting the server.
    pub fn router(&self) -> axum::Router {
        create_router(self.state.clone())
    }

    /// Local address helper for tests and embedding.
    ///
    /// # Errors
    ///
    /// Returns `ServerError::Internal` if the listener has no local address.
    pub fn local_addr(listener: &TcpListener) -> ServerResult<SocketAddr> {
        listener
            .local_addr()
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}

/// Resolves when the process receives Ctrl-C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("shutdown signal received");
}
