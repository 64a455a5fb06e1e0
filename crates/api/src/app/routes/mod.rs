use axum::Router;

use shelfwise_auth::{PolicyError, PolicyRegistry};

use crate::authz::Access;

pub mod admin;
pub mod auth;
pub mod loans;
pub mod system;

/// Record every route's access policy. Runs once, before the router is built.
pub fn declare(registry: &mut PolicyRegistry) -> Result<(), PolicyError> {
    system::declare(registry);
    loans::declare(registry)?;
    admin::declare(registry)?;
    Ok(())
}

pub fn router(access: &Access) -> Router {
    Router::new()
        .merge(system::router(access))
        .nest("/auth", auth::router(access))
        .nest("/loans", loans::router(access))
        .nest("/admin", admin::router(access))
}
