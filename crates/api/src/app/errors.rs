use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use shelfwise_auth::AccessDenied;

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

pub fn unauthorized() -> axum::response::Response {
    json_error(
        StatusCode::UNAUTHORIZED,
        "unauthorized",
        "a valid bearer token is required",
    )
}

/// Both denial reasons share the 403 status; `reason` tells them apart.
pub fn forbidden(denied: &AccessDenied) -> axum::response::Response {
    (
        StatusCode::FORBIDDEN,
        axum::Json(json!({
            "error": "forbidden",
            "reason": denied.reason_code(),
            "message": denied.user_message(),
        })),
    )
        .into_response()
}
