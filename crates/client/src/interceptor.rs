//! Request/response hooks run by [`crate::ApiClient`] around every call.

use std::sync::Arc;

use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, HeaderValue};

use crate::{ApiError, Navigator, Notification, NotificationClass, Notifier, TokenCarrier};

/// Runs on every outbound request, in registration order.
pub trait RequestInterceptor: Send + Sync {
    fn on_request(&self, request: &mut reqwest::Request);
}

/// Runs on every failed call (non-2xx or no response), in registration
/// order. The failure is always returned to the caller afterwards.
pub trait ResponseInterceptor: Send + Sync {
    fn on_failure(&self, error: &ApiError);
}

/// Attaches `Authorization: Bearer <token>` when the carrier holds a token.
#[derive(Debug, Clone)]
pub struct BearerTokenInterceptor {
    carrier: TokenCarrier,
}

impl BearerTokenInterceptor {
    pub fn new(carrier: TokenCarrier) -> Self {
        Self { carrier }
    }
}

impl RequestInterceptor for BearerTokenInterceptor {
    fn on_request(&self, request: &mut reqwest::Request) {
        let Some(token) = self.carrier.token() else {
            return;
        };

        match HeaderValue::from_str(&format!("Bearer {token}")) {
            Ok(mut value) => {
                value.set_sensitive(true);
                request.headers_mut().insert(AUTHORIZATION, value);
            }
            Err(_) => tracing::warn!("stored token is not a valid header value; sending request without it"),
        }
    }
}

impl NotificationClass {
    /// Classify a failed call. `None` for errors that never reached the
    /// network (bad request construction, undecodable 2xx bodies, storage).
    pub fn classify(error: &ApiError) -> Option<Self> {
        let class = match error {
            ApiError::Status { status, .. } => match *status {
                StatusCode::UNAUTHORIZED => NotificationClass::SessionExpired,
                StatusCode::FORBIDDEN => NotificationClass::InsufficientPermissions,
                StatusCode::NOT_FOUND => NotificationClass::NotFound,
                StatusCode::BAD_REQUEST | StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => {
                    NotificationClass::Validation
                }
                StatusCode::INTERNAL_SERVER_ERROR => NotificationClass::ServerError,
                _ => NotificationClass::ConnectionError,
            },
            ApiError::Network(_) => NotificationClass::ConnectionError,
            ApiError::Request(_) | ApiError::Decode(_) | ApiError::Store(_) => return None,
        };
        Some(class)
    }
}

impl Notification {
    /// The user-facing notification for a failed call.
    pub fn for_failure(error: &ApiError) -> Option<Self> {
        let class = NotificationClass::classify(error)?;
        let message = match class {
            NotificationClass::SessionExpired => "Your session has expired. Please sign in again.".to_string(),
            NotificationClass::InsufficientPermissions => {
                "You do not have permission to perform this action.".to_string()
            }
            NotificationClass::NotFound => "The requested resource was not found.".to_string(),
            NotificationClass::Validation => match error {
                ApiError::Status { messages, .. } if !messages.is_empty() => messages.join(", "),
                _ => "The request could not be processed.".to_string(),
            },
            NotificationClass::ServerError => "Internal server error. Please try again later.".to_string(),
            NotificationClass::ConnectionError => {
                "Connection error. Please check your network and try again.".to_string()
            }
        };
        Some(Notification::new(class, message))
    }
}

/// Reacts to failed calls: an expired session clears the token and sends the
/// user to the login route; every classified failure produces one
/// notification.
#[derive(Clone)]
pub struct AuthFailureInterceptor {
    carrier: TokenCarrier,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
    login_route: String,
}

impl AuthFailureInterceptor {
    pub fn new(
        carrier: TokenCarrier,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
        login_route: impl Into<String>,
    ) -> Self {
        Self {
            carrier,
            navigator,
            notifier,
            login_route: login_route.into(),
        }
    }
}

impl ResponseInterceptor for AuthFailureInterceptor {
    fn on_failure(&self, error: &ApiError) {
        let Some(notification) = Notification::for_failure(error) else {
            return;
        };
        tracing::debug!(class = ?notification.class, error = %error, "classified failed call");

        if notification.class == NotificationClass::SessionExpired {
            if let Err(e) = self.carrier.clear() {
                tracing::warn!(error = %e, "failed to clear expired token");
            }
            self.navigator.navigate(&self.login_route);
        }

        self.notifier.notify(notification);
    }
}
