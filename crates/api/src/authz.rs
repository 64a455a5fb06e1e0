//! API-side wiring of the access guard onto individual handlers.
//!
//! Each handler is wrapped in its own middleware instance that knows the
//! handler's [`RouteId`], so policy lookup never has to reverse-engineer a
//! route from the request path.

use std::sync::Arc;

use axum::routing::MethodRouter;

use shelfwise_auth::{AccessGuard, RouteId, TokenVerifier};

use crate::middleware::{self, RouteAccess};

#[derive(Clone)]
pub struct Access {
    guard: AccessGuard,
    verifier: Arc<dyn TokenVerifier>,
}

impl Access {
    pub fn new(guard: AccessGuard, verifier: Arc<dyn TokenVerifier>) -> Self {
        Self { guard, verifier }
    }

    /// Put `handler` behind the access middleware for `route`.
    pub fn protect(&self, route: RouteId, handler: MethodRouter) -> MethodRouter {
        let state = RouteAccess {
            route,
            guard: self.guard.clone(),
            verifier: self.verifier.clone(),
        };
        handler.layer(axum::middleware::from_fn_with_state(
            state,
            middleware::enforce_access,
        ))
    }
}
