//! HTTP API application wiring (Axum router + access policies).
//!
//! - `routes/`: HTTP routes + handlers (one file per area), each declaring its
//!   own access policy
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use shelfwise_auth::{AccessGuard, Hs256TokenVerifier, PolicyError, PolicyRegistry, TokenVerifier};

use crate::authz::Access;
use crate::config::ApiConfig;

pub mod errors;
pub mod routes;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(config: &ApiConfig) -> Result<Router, PolicyError> {
    let verifier = Arc::new(Hs256TokenVerifier::new(config.jwt_secret.as_bytes()));
    build_app_with_verifier(verifier)
}

/// Build the router around any token verifier.
///
/// Policies are declared first; the registry is then frozen inside the guard
/// and shared read-only by every route.
pub fn build_app_with_verifier(verifier: Arc<dyn TokenVerifier>) -> Result<Router, PolicyError> {
    let mut registry = PolicyRegistry::new();
    routes::declare(&mut registry)?;

    let access = Access::new(AccessGuard::new(registry), verifier);

    Ok(routes::router(&access).layer(ServiceBuilder::new().layer(TraceLayer::new_for_http())))
}
