//! HTTP Server
//!
//! Serves the admission endpoint over TCP and stops accepting connections
//! as soon as the shutdown token leaves `Running`.

use crate::error::ApiError;
use crate::handler::{AdmissionHandler, SharedHandler};
use crate::types::EnqueueQuery;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use jobgate_core::application::{AdmissionService, ShutdownToken};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;
use tracing::info;

const DEFAULT_HTTP_HOST: &str = "127.0.0.1";
const DEFAULT_HTTP_PORT: u16 = 8080;

/// HTTP Server Configuration
#[derive(Debug, Clone)]
pub struct HttpServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HTTP_HOST.to_string(),
            port: DEFAULT_HTTP_PORT,
        }
    }
}

async fn enqueue(
    State(handler): State<SharedHandler>,
    query: Result<Query<EnqueueQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(params) = query?;
    let response = handler.enqueue(params).await?;
    Ok((StatusCode::ACCEPTED, Json(response)))
}

/// Build the admission router
pub fn router(handler: SharedHandler) -> Router {
    Router::new()
        .route("/enqueue", get(enqueue).post(enqueue))
        .layer(TraceLayer::new_for_http())
        .with_state(handler)
}

/// HTTP Server
pub struct HttpServer {
    config: HttpServerConfig,
    handler: SharedHandler,
    shutdown: ShutdownToken,
}

impl HttpServer {
    pub fn new(
        config: HttpServerConfig,
        service: AdmissionService,
        shutdown: ShutdownToken,
    ) -> Self {
        Self {
            config,
            handler: Arc::new(AdmissionHandler::new(service, shutdown.clone())),
            shutdown,
        }
    }

    /// Bind the listener and start serving in the background
    ///
    /// Binding happens before this returns, so a bad address fails fast.
    pub async fn start(self) -> Result<HttpServerHandle, String> {
        let addr = format!("{}:{}", self.config.host, self.config.port);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| format!("Failed to bind HTTP server on {}: {}", addr, e))?;
        let local_addr = listener
            .local_addr()
            .map_err(|e| format!("Failed to read local address: {}", e))?;

        info!(addr = %local_addr, "HTTP admission endpoint listening");

        let app = router(self.handler);
        let mut shutdown = self.shutdown;
        let join = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown.wait().await;
                    info!("HTTP server no longer accepting connections");
                })
                .await
                .map_err(|e| format!("HTTP server error: {}", e))
        });

        Ok(HttpServerHandle { local_addr, join })
    }
}

/// Handle to a running HTTP server
pub struct HttpServerHandle {
    local_addr: SocketAddr,
    join: JoinHandle<Result<(), String>>,
}

impl HttpServerHandle {
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Wait for the server to finish in-flight requests and exit
    pub async fn stopped(self) -> Result<(), String> {
        self.join
            .await
            .map_err(|e| format!("HTTP server task failed: {}", e))?
    }
}
