// crates/access-gate-server/src/server.rs
// ============================================================================
// Module: HTTP Server
// Description: Axum wiring for the user-access resolution surface.
// Purpose: Expose resolution, health, and readiness over a bound listener.
// Dependencies: access-gate-directory, access-gate-config, axum, tokio
// ============================================================================

//! ## Overview
//! [`AccessGateServer`] builds the resolver from configuration and serves
//! three routes: `GET /api/user-access`, `GET /healthz`, and `GET /readyz`.
//! The resolver performs blocking store round-trips, so handlers shift onto
//! a blocking section when the runtime supports it.
//!
//! The email is taken from the `email` query parameter, falling back to the
//! gateway-injected `x-access-gate-email` header. The 500 body passes the
//! raw error message through verbatim; hardening that surface is a known
//! gap, preserved deliberately.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use access_gate_config::AccessGateConfig;
use access_gate_directory::DirectoryResolver;
use access_gate_directory::Resolution;
use access_gate_directory::ResolveError;
use access_gate_directory::StderrAuditSink;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::extract::Query;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::routing::get;
use serde::Deserialize;

use crate::response::UserAccessResponse;
use crate::telemetry::NoopMetrics;
use crate::telemetry::RequestMetricEvent;
use crate::telemetry::RequestMetrics;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Header carrying the gateway-injected principal email.
pub const EMAIL_HEADER: &str = "x-access-gate-email";

/// Route template for the resolution endpoint.
const USER_ACCESS_ROUTE: &str = "/api/user-access";

// ============================================================================
// SECTION: Server
// ============================================================================

/// Access Gate HTTP server instance.
pub struct AccessGateServer {
    /// Validated configuration.
    config: AccessGateConfig,
    /// Shared directory resolver.
    resolver: Arc<DirectoryResolver>,
    /// Metrics sink for request telemetry.
    metrics: Arc<dyn RequestMetrics>,
}

impl AccessGateServer {
    /// Builds a server from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] when the configuration is invalid or the
    /// stores cannot be constructed.
    pub fn from_config(config: AccessGateConfig) -> Result<Self, ServerError> {
        config.validate().map_err(|err| ServerError::Config(err.to_string()))?;
        let resolver = DirectoryResolver::from_config(&config, Arc::new(StderrAuditSink))
            .map_err(|err| ServerError::Init(err.to_string()))?;
        Ok(Self {
            config,
            resolver: Arc::new(resolver),
            metrics: Arc::new(NoopMetrics),
        })
    }

    /// Replaces the metrics sink.
    #[must_use]
    pub fn with_metrics(mut self, metrics: Arc<dyn RequestMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Serves requests on the configured bind address until failure.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] when binding or serving fails.
    pub async fn serve(self) -> Result<(), ServerError> {
        let addr: SocketAddr = self
            .config
            .server
            .bind
            .parse()
            .map_err(|_| ServerError::Config("invalid bind address".to_string()))?;
        let max_body_bytes = self.config.server.max_body_bytes;
        let state = Arc::new(ServerState {
            resolver: Arc::clone(&self.resolver),
            metrics: Arc::clone(&self.metrics),
        });
        let app = Router::new()
            .route(USER_ACCESS_ROUTE, get(handle_user_access))
            .route("/healthz", get(handle_healthz))
            .route("/readyz", get(handle_readyz))
            .layer(DefaultBodyLimit::max(max_body_bytes))
            .with_state(state);
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|_| ServerError::Transport("http bind failed".to_string()))?;
        axum::serve(listener, app)
            .await
            .map_err(|_| ServerError::Transport("http server failed".to_string()))
    }
}

/// Shared state for request handlers.
struct ServerState {
    /// Shared directory resolver.
    resolver: Arc<DirectoryResolver>,
    /// Metrics sink for request telemetry.
    metrics: Arc<dyn RequestMetrics>,
}

// ============================================================================
// SECTION: Handlers
// ============================================================================

/// Query parameters for the resolution endpoint.
#[derive(Debug, Deserialize)]
struct UserAccessParams {
    /// Principal email to resolve.
    email: Option<String>,
}

/// Handles `GET /api/user-access`.
async fn handle_user_access(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<UserAccessParams>,
    headers: HeaderMap,
) -> (StatusCode, axum::Json<UserAccessResponse>) {
    let started = Instant::now();
    let email = request_email(params.email.as_deref(), &headers);
    let result = resolve_with_blocking(&state.resolver, &email);
    let (status, envelope) = resolution_response(result);
    let event = RequestMetricEvent {
        route: USER_ACCESS_ROUTE,
        status: status.as_u16(),
    };
    state.metrics.record_request(event);
    state.metrics.record_latency(event, started.elapsed());
    (status, axum::Json(envelope))
}

/// Handles `GET /healthz`.
async fn handle_healthz() -> &'static str {
    "ok"
}

/// Handles `GET /readyz`.
async fn handle_readyz(State(state): State<Arc<ServerState>>) -> (StatusCode, String) {
    let result = match tokio::runtime::Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == tokio::runtime::RuntimeFlavor::MultiThread => {
            tokio::task::block_in_place(|| state.resolver.readiness())
        }
        _ => state.resolver.readiness(),
    };
    match result {
        Ok(()) => (StatusCode::OK, "ready".to_string()),
        Err(error) => (StatusCode::SERVICE_UNAVAILABLE, error.to_string()),
    }
}

// ============================================================================
// SECTION: Resolution Plumbing
// ============================================================================

/// Picks the request email: query parameter first, gateway header second.
fn request_email(param: Option<&str>, headers: &HeaderMap) -> String {
    if let Some(email) = param
        && !email.trim().is_empty()
    {
        return email.to_string();
    }
    headers
        .get(EMAIL_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .unwrap_or_default()
}

/// Runs a resolution, shifting to a blocking context when available.
fn resolve_with_blocking(
    resolver: &DirectoryResolver,
    email: &str,
) -> Result<Resolution, ResolveError> {
    match tokio::runtime::Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == tokio::runtime::RuntimeFlavor::MultiThread => {
            tokio::task::block_in_place(|| resolver.resolve(email))
        }
        _ => resolver.resolve(email),
    }
}

/// Maps a resolution result onto the stable status contract.
fn resolution_response(
    result: Result<Resolution, ResolveError>,
) -> (StatusCode, UserAccessResponse) {
    match result {
        Ok(resolution) if resolution.found() => {
            (StatusCode::OK, UserAccessResponse::found(resolution))
        }
        Ok(resolution) => (StatusCode::NOT_FOUND, UserAccessResponse::not_found(resolution)),
        Err(ResolveError::Validation(message)) => {
            (StatusCode::BAD_REQUEST, UserAccessResponse::failure(message))
        }
        Err(ResolveError::Unexpected(message)) => {
            (StatusCode::INTERNAL_SERVER_ERROR, UserAccessResponse::failure(message))
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// HTTP server errors.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration errors.
    #[error("config error: {0}")]
    Config(String),
    /// Initialization errors.
    #[error("init error: {0}")]
    Init(String),
    /// Transport errors.
    #[error("transport error: {0}")]
    Transport(String),
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test-only panic-based assertions."
    )]

    use access_gate_directory::Resolution;
    use access_gate_directory::ResolveError;
    use access_gate_directory::TierOutcome;
    use access_gate_directory::TierProbe;
    use axum::http::HeaderMap;
    use axum::http::StatusCode;

    use super::EMAIL_HEADER;
    use super::request_email;
    use super::resolution_response;

    /// Resolution fixture with no record and one probed tier.
    fn not_found() -> Resolution {
        Resolution {
            user: None,
            model_used: None,
            probes: vec![TierProbe {
                model: "structured:service".to_string(),
                outcome: TierOutcome::Miss,
            }],
        }
    }

    #[test]
    fn exhausted_chain_maps_to_404_with_probes() {
        let (status, envelope) = resolution_response(Ok(not_found()));
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(!envelope.ok);
        assert_eq!(envelope.probes.len(), 1);
    }

    #[test]
    fn validation_maps_to_400() {
        let (status, envelope) =
            resolution_response(Err(ResolveError::Validation("email is required".to_string())));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(envelope.error.as_deref(), Some("email is required"));
    }

    #[test]
    fn unexpected_maps_to_500_with_the_raw_message() {
        let (status, envelope) =
            resolution_response(Err(ResolveError::Unexpected("worker pool gone".to_string())));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(envelope.error.as_deref(), Some("worker pool gone"));
    }

    #[test]
    fn query_parameter_wins_over_the_gateway_header() {
        let mut headers = HeaderMap::new();
        headers.insert(EMAIL_HEADER, "header@acme.com".parse().expect("header value"));
        assert_eq!(request_email(Some("query@acme.com"), &headers), "query@acme.com");
        assert_eq!(request_email(Some("  "), &headers), "header@acme.com");
        assert_eq!(request_email(None, &headers), "header@acme.com");
        assert_eq!(request_email(None, &HeaderMap::new()), "");
    }
}
