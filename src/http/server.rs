//! HTTP server setup and the proxy pipeline.
//!
//! # Responsibilities
//! - Create the Axum Router with the single `POST /` handler
//! - Wire up middleware (tracing, request ID, timeout, body limit)
//! - Validate inbound JSON-RPC envelopes against the allow-list
//! - Forward permitted requests to the backend and relay the reply verbatim
//! - Map every per-request failure to a JSON-RPC error envelope; nothing
//!   escapes the handler

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{Body, Bytes},
    extract::{DefaultBodyLimit, State},
    http::{header, HeaderMap, Method, Request, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::allowlist::AllowList;
use crate::config::ProxyConfig;
use crate::http::request::{RequestIdLayer, X_REQUEST_ID};
use crate::observability::audit::{AuditSink, TracingAudit};
use crate::rpc::{validate, RpcErrorResponse, Validation};

/// Cap on a relayed backend response body.
const MAX_RELAY_BYTES: usize = 32 * 1024 * 1024;

/// Application state injected into the handler.
#[derive(Clone)]
pub struct AppState {
    pub allowlist: Arc<AllowList>,
    pub client: Client<HttpConnector, Body>,
    pub backend: Uri,
    pub backend_timeout: Duration,
    pub audit: Arc<dyn AuditSink>,
}

/// HTTP server for the filtering proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and allow-list.
    pub fn new(config: ProxyConfig, allowlist: AllowList) -> Self {
        Self::with_audit(config, allowlist, Arc::new(TracingAudit))
    }

    /// Create a server with a custom audit sink (used by tests to capture
    /// rejections).
    pub fn with_audit(
        config: ProxyConfig,
        allowlist: AllowList,
        audit: Arc<dyn AuditSink>,
    ) -> Self {
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());

        // The config is validated before the server is constructed, so the
        // backend URL is known to be a well-formed http endpoint.
        let backend: Uri = config
            .backend
            .url
            .as_str()
            .parse()
            .expect("validated backend URL converts to a URI");

        let state = AppState {
            allowlist: Arc::new(allowlist),
            client,
            backend,
            backend_timeout: Duration::from_secs(config.backend.timeout_secs),
            audit,
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ProxyConfig, state: AppState) -> Router {
        Router::new()
            .route("/", post(proxy_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.listener.request_timeout_secs,
            )))
            .layer(DefaultBodyLimit::max(config.listener.max_body_bytes))
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, backend = %self.config.backend.url, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                tokio::select! {
                    _ = shutdown_signal() => {}
                    _ = shutdown.recv() => {
                        tracing::info!("Shutdown trigger received");
                    }
                }
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }
}

/// Main proxy handler: validate the envelope, then forward or reject.
async fn proxy_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let request_id = headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    match validate(&body, &state.allowlist) {
        Validation::Forward(content) => forward(&state, request_id, content).await,
        Validation::InvalidJson => RpcErrorResponse::invalid_request().into_response(),
        // Notification semantics: a request without id/method gets an empty
        // 200 rather than an error.
        Validation::Notification => StatusCode::OK.into_response(),
        Validation::MethodNotAllowed { id, method } => {
            state
                .audit
                .record_rejection(&method, &String::from_utf8_lossy(&body));
            RpcErrorResponse::method_not_found(id).into_response()
        }
    }
}

#[derive(Debug, Error)]
enum ForwardError {
    #[error("failed to build backend request: {0}")]
    Request(#[from] axum::http::Error),

    #[error("transport error: {0}")]
    Transport(#[from] hyper_util::client::legacy::Error),

    #[error("failed to read backend response: {0}")]
    Body(#[from] axum::Error),

    #[error("backend did not respond within {0:?}")]
    Timeout(Duration),
}

/// Forward validated content to the backend and relay the reply.
///
/// One attempt, no retries: any failure maps to a JSON-RPC internal error
/// with the original request's `id`.
async fn forward(state: &AppState, request_id: &str, content: serde_json::Value) -> Response {
    let id = content
        .get("id")
        .cloned()
        .unwrap_or(serde_json::Value::Null);
    let payload = content.to_string();

    match relay(state, payload.clone()).await {
        Ok(reply) => {
            tracing::info!(
                request_id = %request_id,
                request = %payload,
                response = %String::from_utf8_lossy(&reply).trim(),
                "forwarded request"
            );
            ([(header::CONTENT_TYPE, "application/json")], reply).into_response()
        }
        Err(e) => {
            tracing::error!(
                request_id = %request_id,
                error = %e,
                "failed to receive a response from the backend"
            );
            RpcErrorResponse::internal_error(id).into_response()
        }
    }
}

/// Issue the single backend POST and collect the response body.
async fn relay(state: &AppState, payload: String) -> Result<Bytes, ForwardError> {
    let req = Request::builder()
        .method(Method::POST)
        .uri(state.backend.clone())
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload))?;

    tokio::time::timeout(state.backend_timeout, async {
        let response = state.client.request(req).await?;
        let body = axum::body::to_bytes(Body::new(response.into_body()), MAX_RELAY_BYTES).await?;
        Ok::<_, ForwardError>(body)
    })
    .await
    .map_err(|_| ForwardError::Timeout(state.backend_timeout))?
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
