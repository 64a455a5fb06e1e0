//! Read-only projections of a request's claims for route handlers.
//!
//! These never make authorization decisions. On public routes there may be
//! no claims at all, so every accessor returns an `Option`.

use crate::{Claims, Role};

pub fn claims(claims: Option<&Claims>) -> Option<&Claims> {
    claims
}

/// Subject id, taken from `sub` and falling back to the mirrored `id` field.
pub fn subject_id(claims: Option<&Claims>) -> Option<&str> {
    let claims = claims?;
    claims.sub.as_deref().or(claims.id.as_deref())
}

pub fn role(claims: Option<&Claims>) -> Option<Role> {
    claims.map(|c| c.role)
}
