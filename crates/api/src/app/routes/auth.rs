//! Identity endpoints. Any authenticated caller may use them; no role is
//! declared for the group.

use axum::{Json, Router, response::IntoResponse, routing::get};
use serde_json::json;

use shelfwise_auth::RouteId;

use crate::authz::Access;
use crate::context::{CurrentClaims, CurrentRole};

const GROUP: &str = "auth";

pub fn router(access: &Access) -> Router {
    Router::new()
        .route("/profile", access.protect(RouteId::handler(GROUP, "profile"), get(profile)))
        .route("/role", access.protect(RouteId::handler(GROUP, "role"), get(role)))
}

/// GET /auth/profile - the caller's full claims
pub async fn profile(CurrentClaims(claims): CurrentClaims) -> impl IntoResponse {
    Json(claims)
}

/// GET /auth/role - the caller's role only
pub async fn role(CurrentRole(role): CurrentRole) -> impl IntoResponse {
    Json(json!({ "role": role }))
}
