//! `shelfwise-auth` — pure authentication/authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage: it knows how
//! routes declare access, how a request's claims are checked against that
//! declaration, and how handlers read the resulting identity.

pub mod claims;
pub mod guard;
pub mod identity;
pub mod policy;
pub mod roles;
pub mod verify;

pub use claims::{Claims, TokenValidationError, validate_claims};
pub use guard::{AccessDenied, AccessGuard};
pub use policy::{PolicyError, PolicyMetadata, PolicyRegistry, ResolvedPolicy, RouteId};
pub use roles::{Role, RoleSet};
pub use verify::{Hs256TokenVerifier, TokenError, TokenVerifier};
