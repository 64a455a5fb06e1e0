use axum::{Json, Router, response::IntoResponse, routing::get};
use serde_json::json;

use shelfwise_auth::{PolicyError, PolicyRegistry, Role, RouteId};

use crate::authz::Access;

const GROUP: &str = "admin";

pub fn declare(registry: &mut PolicyRegistry) -> Result<(), PolicyError> {
    registry.require_roles(RouteId::group(GROUP), [Role::Administrator])?;
    Ok(())
}

pub fn router(access: &Access) -> Router {
    Router::new().route("/roles", access.protect(RouteId::handler(GROUP, "list_roles"), get(list_roles)))
}

/// GET /admin/roles - List all roles and what they are for
pub async fn list_roles() -> impl IntoResponse {
    let roles: Vec<_> = Role::ALL
        .iter()
        .map(|role| json!({ "name": role, "description": role.description() }))
        .collect();

    Json(json!({ "roles": roles }))
}
