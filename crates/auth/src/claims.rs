use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Role;

/// Claims model (transport-agnostic).
///
/// This is the decoded payload of a token once it has been verified by
/// whatever transport/security layer is in use. Tokens in the wild name the
/// subject either `sub` or `id`, so both are optional here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject / user identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Mirrored user identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub email: String,

    pub role: Role,

    /// Issued-at, unix seconds.
    #[serde(default, rename = "iat", skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<i64>,

    /// Expiration, unix seconds.
    #[serde(default, rename = "exp", skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
}

impl Claims {
    pub fn issued_at_utc(&self) -> Option<DateTime<Utc>> {
        self.issued_at.and_then(|ts| DateTime::from_timestamp(ts, 0))
    }

    pub fn expires_at_utc(&self) -> Option<DateTime<Utc>> {
        self.expires_at.and_then(|ts| DateTime::from_timestamp(ts, 0))
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenValidationError {
    #[error("token has expired")]
    Expired,

    #[error("token not yet valid (issued_at is in the future)")]
    NotYetValid,

    #[error("invalid token time window (expires_at <= issued_at)")]
    InvalidTimeWindow,
}

/// Deterministically validate the time window of a claims set.
///
/// Missing timestamps are not an error: a token without `exp` never expires
/// at this layer. Signature verification happens before this is called.
pub fn validate_claims(claims: &Claims, now: DateTime<Utc>) -> Result<(), TokenValidationError> {
    let now = now.timestamp();

    if let (Some(iat), Some(exp)) = (claims.issued_at, claims.expires_at) {
        if exp <= iat {
            return Err(TokenValidationError::InvalidTimeWindow);
        }
    }
    if let Some(iat) = claims.issued_at {
        if now < iat {
            return Err(TokenValidationError::NotYetValid);
        }
    }
    if let Some(exp) = claims.expires_at {
        if now >= exp {
            return Err(TokenValidationError::Expired);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn claims_at(now: DateTime<Utc>, lifetime: Duration) -> Claims {
        Claims {
            sub: Some("42".to_string()),
            id: None,
            email: "reader@school.test".to_string(),
            role: Role::Librarian,
            issued_at: Some(now.timestamp()),
            expires_at: Some((now + lifetime).timestamp()),
        }
    }

    #[test]
    fn decodes_tokens_using_either_id_field() {
        let with_id: Claims = serde_json::from_value(serde_json::json!({
            "id": "7",
            "email": "a@b.test",
            "role": "administrator",
        }))
        .unwrap();
        assert_eq!(with_id.sub, None);
        assert_eq!(with_id.id.as_deref(), Some("7"));
        assert_eq!(with_id.role, Role::Administrator);
        assert_eq!(with_id.issued_at_utc(), None);
    }

    #[test]
    fn window_checks() {
        let now = Utc::now();
        let claims = claims_at(now, Duration::minutes(10));

        assert_eq!(validate_claims(&claims, now), Ok(()));
        assert_eq!(
            validate_claims(&claims, now - Duration::minutes(1)),
            Err(TokenValidationError::NotYetValid)
        );
        assert_eq!(
            validate_claims(&claims, now + Duration::minutes(10)),
            Err(TokenValidationError::Expired)
        );

        let inverted = claims_at(now, Duration::minutes(-1));
        assert_eq!(
            validate_claims(&inverted, now),
            Err(TokenValidationError::InvalidTimeWindow)
        );
    }

    #[test]
    fn claims_without_timestamps_are_accepted() {
        let mut claims = claims_at(Utc::now(), Duration::minutes(1));
        claims.issued_at = None;
        claims.expires_at = None;
        assert_eq!(validate_claims(&claims, Utc::now()), Ok(()));
    }
}
