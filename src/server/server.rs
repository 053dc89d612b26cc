use std::sync::Arc;
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use log::{info, warn};
use tokio::net::TcpListener;
use tokio::sync::watch;
use crate::{Error, Result};
use crate::handshake::{validate_headers, HandshakeValidator, Outcome};
use crate::server::bind_server;
use crate::server::config::ServerConfig;

pub struct HandshakeServer {
    /// Server configuration
    config: Arc<ServerConfig>,

    /// Validator shared by every request task
    validator: Arc<HandshakeValidator>,

    /// Shutdown signal
    shutdown: watch::Sender<bool>,
}

impl HandshakeServer {
    /// Create new server
    pub fn new(config: ServerConfig) -> Self {
        let validator = Arc::new(HandshakeValidator::new(config.secrets.clone()));
        let (shutdown, _) = watch::channel(false);

        HandshakeServer {
            config: Arc::new(config),
            validator,
            shutdown,
        }
    }

    /// Get server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get the shared validator
    pub fn validator(&self) -> Arc<HandshakeValidator> {
        self.validator.clone()
    }

    /// Build the single-route router
    pub fn router(&self) -> Router {
        Router::new()
            .route("/", get(handshake))
            .with_state(self.validator.clone())
    }

    /// Bind and serve until shutdown
    pub async fn listen(&self) -> Result<()> {
        let listener = bind_server(&self.config).await?;
        self.serve(listener).await
    }

    /// Serve on an already bound listener until shutdown
    pub async fn serve(&self, listener: TcpListener) -> Result<()> {
        let addr = listener.local_addr()?;

        if self.config.secrets.is_default() {
            warn!("Using the built-in default handshake secrets; set PLAYFAIR_KEY and PLAYFAIR_HMAC_KEY");
        }

        info!("Handshake server listening on http://{}", addr);

        let mut shutdown = self.shutdown.subscribe();
        axum::serve(listener, self.router())
            .with_graceful_shutdown(async move {
                // Sender lives as long as the server, so Err only on drop
                let _ = shutdown.wait_for(|stop| *stop).await;
            })
            .await
            .map_err(|e| Error::io(format!("Server on {} failed: {}", addr, e)))?;

        info!("Server stopped");
        Ok(())
    }

    /// Shutdown server
    pub fn shutdown(&self) {
        info!("Shutting down server...");
        self.shutdown.send_replace(true);
    }
}

async fn handshake(State(validator): State<Arc<HandshakeValidator>>, headers: HeaderMap) -> Response {
    info!("GET /");

    match validate_headers(&validator, &headers) {
        Outcome::Accepted(body) => {
            info!("   -> 200");
            (StatusCode::OK, [(header::CONTENT_TYPE, "text/plain")], body).into_response()
        }
        Outcome::Rejected => {
            info!("   -> 400");
            StatusCode::BAD_REQUEST.into_response()
        }
    }
}
