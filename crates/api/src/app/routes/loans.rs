//! Loan endpoints.
//!
//! Loan storage and business rules live outside this service; these handlers
//! only resolve who is acting.

use axum::{
    Json, Router,
    extract::Path,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;

use shelfwise_auth::{PolicyError, PolicyRegistry, Role, RouteId};

use crate::authz::Access;
use crate::context::CurrentSubject;

const GROUP: &str = "loans";

pub fn declare(registry: &mut PolicyRegistry) -> Result<(), PolicyError> {
    registry.require_roles(RouteId::group(GROUP), [Role::Administrator, Role::Librarian])?;
    // Overrides bypass loan limits, so librarians may not use them.
    registry.require_roles(RouteId::handler(GROUP, "override_loan"), [Role::Administrator])?;
    Ok(())
}

pub fn router(access: &Access) -> Router {
    Router::new()
        .route("/mine", access.protect(RouteId::handler(GROUP, "my_loans"), get(my_loans)))
        .route(
            "/:id/override",
            access.protect(RouteId::handler(GROUP, "override_loan"), post(override_loan)),
        )
}

/// GET /loans/mine - loans handled by the caller
pub async fn my_loans(CurrentSubject(subject): CurrentSubject) -> impl IntoResponse {
    Json(json!({ "subject_id": subject }))
}

/// POST /loans/:id/override - administrative override of a loan
pub async fn override_loan(
    Path(id): Path<String>,
    CurrentSubject(subject): CurrentSubject,
) -> impl IntoResponse {
    tracing::info!(loan_id = %id, overridden_by = ?subject, "loan override requested");
    Json(json!({ "loan_id": id, "overridden_by": subject }))
}
