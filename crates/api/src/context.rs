use std::convert::Infallible;
use std::sync::Arc;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use shelfwise_auth::{Claims, Role, identity};

/// Identity context for a request.
///
/// Inserted into request extensions by the access middleware once the route's
/// policy has been enforced. `claims` is `None` on public routes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestIdentity {
    claims: Option<Arc<Claims>>,
}

impl RequestIdentity {
    pub fn new(claims: Option<Claims>) -> Self {
        Self {
            claims: claims.map(Arc::new),
        }
    }

    pub fn claims(&self) -> Option<&Claims> {
        identity::claims(self.claims.as_deref())
    }

    pub fn subject_id(&self) -> Option<&str> {
        identity::subject_id(self.claims.as_deref())
    }

    pub fn role(&self) -> Option<Role> {
        identity::role(self.claims.as_deref())
    }
}

fn request_identity(parts: &Parts) -> Option<&RequestIdentity> {
    parts.extensions.get::<RequestIdentity>()
}

/// Full claims of the caller, if any.
#[derive(Debug, Clone)]
pub struct CurrentClaims(pub Option<Claims>);

/// Subject id of the caller, if any.
#[derive(Debug, Clone)]
pub struct CurrentSubject(pub Option<String>);

/// Role of the caller, if any.
#[derive(Debug, Clone, Copy)]
pub struct CurrentRole(pub Option<Role>);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentClaims
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(request_identity(parts).and_then(|i| i.claims().cloned())))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentSubject
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(
            request_identity(parts)
                .and_then(|i| i.subject_id())
                .map(str::to_string),
        ))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentRole
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(request_identity(parts).and_then(|i| i.role())))
    }
}
