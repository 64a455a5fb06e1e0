use std::sync::Arc;

use thiserror::Error;

use crate::{Claims, PolicyRegistry, Role, RoleSet, RouteId};

/// Why a request was refused.
///
/// Both variants are forbidden-class failures: the guard runs after token
/// verification, so a missing identity at this point is an authorization
/// problem, not an authentication one.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccessDenied {
    #[error("forbidden: authentication is required for this resource")]
    Unauthenticated,

    #[error("forbidden: role '{role}' is not one of [{required}]")]
    InsufficientRole { role: Role, required: RoleSet },
}

impl AccessDenied {
    /// Stable reason code used in logs and error bodies.
    pub fn reason_code(&self) -> &'static str {
        match self {
            AccessDenied::Unauthenticated => "unauthenticated",
            AccessDenied::InsufficientRole { .. } => "insufficient_role",
        }
    }

    /// Message safe to show to the end user.
    pub fn user_message(&self) -> &'static str {
        match self {
            AccessDenied::Unauthenticated => "You must be signed in to access this resource",
            AccessDenied::InsufficientRole { .. } => {
                "Your role does not have permission to access this resource"
            }
        }
    }
}

/// Per-request authorization decision point.
///
/// - No IO
/// - No panics
/// - No shared mutable state (the registry is read-only once built)
#[derive(Debug, Clone)]
pub struct AccessGuard {
    registry: Arc<PolicyRegistry>,
}

impl AccessGuard {
    pub fn new(registry: PolicyRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    pub fn registry(&self) -> &PolicyRegistry {
        &self.registry
    }

    /// Decide whether `claims` may reach `route`.
    pub fn evaluate(&self, route: &RouteId, claims: Option<&Claims>) -> Result<(), AccessDenied> {
        let policy = self.registry.resolve(route);

        let Some(required) = policy.required_roles else {
            return Ok(());
        };

        let decision = match claims {
            None => Err(AccessDenied::Unauthenticated),
            Some(claims) if required.contains(claims.role) => Ok(()),
            Some(claims) => Err(AccessDenied::InsufficientRole {
                role: claims.role,
                required: required.clone(),
            }),
        };

        if let Err(denied) = &decision {
            tracing::warn!(
                route = %route,
                reason = denied.reason_code(),
                required = %required,
                "access denied"
            );
        }

        decision
    }
}
