use axum::{Router, http::StatusCode, routing::get};

use shelfwise_auth::{PolicyRegistry, RouteId};

use crate::authz::Access;

const GROUP: &str = "system";

pub fn declare(registry: &mut PolicyRegistry) {
    registry.mark_public(RouteId::handler(GROUP, "health"));
}

pub fn router(access: &Access) -> Router {
    Router::new().route("/health", access.protect(RouteId::handler(GROUP, "health"), get(health)))
}

pub async fn health() -> StatusCode {
    StatusCode::OK
}
