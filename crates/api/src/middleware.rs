use std::sync::Arc;

use axum::{
    extract::State,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use thiserror::Error;

use shelfwise_auth::{AccessGuard, Claims, RouteId, TokenError, TokenVerifier};

use crate::app::errors;
use crate::context::RequestIdentity;

/// Everything the access middleware needs for one route.
#[derive(Clone)]
pub struct RouteAccess {
    pub route: RouteId,
    pub guard: AccessGuard,
    pub verifier: Arc<dyn TokenVerifier>,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing bearer token")]
    MissingToken,

    #[error(transparent)]
    Token(#[from] TokenError),
}

/// Verify the caller (unless the route is public), run the access guard, and
/// hand the resulting identity to the handler.
pub async fn enforce_access(
    State(access): State<RouteAccess>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let policy = access.guard.registry().resolve(&access.route);

    let claims = if policy.is_public {
        None
    } else {
        match authenticate(access.verifier.as_ref(), req.headers()) {
            Ok(claims) => Some(claims),
            Err(e) => {
                tracing::warn!(route = %access.route, error = %e, "authentication failed");
                return errors::unauthorized();
            }
        }
    };

    if let Err(denied) = access.guard.evaluate(&access.route, claims.as_ref()) {
        return errors::forbidden(&denied);
    }

    req.extensions_mut().insert(RequestIdentity::new(claims));
    next.run(req).await
}

fn authenticate(verifier: &dyn TokenVerifier, headers: &HeaderMap) -> Result<Claims, AuthError> {
    let token = extract_bearer(headers).ok_or(AuthError::MissingToken)?;
    Ok(verifier.verify(token, Utc::now())?)
}

fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(axum::http::header::AUTHORIZATION)?;
    let header = header.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        return None;
    }
    Some(token)
}
