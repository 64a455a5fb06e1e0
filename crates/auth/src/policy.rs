//! Per-route access declarations.
//!
//! Routes are declared once, while the router is being assembled, and the
//! registry is then frozen behind an `Arc` and only read.

use std::borrow::Cow;
use std::collections::HashMap;

use thiserror::Error;

use crate::{Role, RoleSet};

/// Identity of a route for policy purposes.
///
/// A route is either a whole group (e.g. everything under `/loans`) or one
/// handler inside a group. Handler ids always know their group so lookups can
/// fall back without any path matching.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RouteId {
    Group(Cow<'static, str>),
    Handler {
        group: Cow<'static, str>,
        name: Cow<'static, str>,
    },
}

impl RouteId {
    pub fn group(name: impl Into<Cow<'static, str>>) -> Self {
        Self::Group(name.into())
    }

    pub fn handler(group: impl Into<Cow<'static, str>>, name: impl Into<Cow<'static, str>>) -> Self {
        Self::Handler {
            group: group.into(),
            name: name.into(),
        }
    }

    /// The group this route belongs to (a group is its own parent).
    pub fn parent(&self) -> RouteId {
        match self {
            RouteId::Group(g) => RouteId::Group(g.clone()),
            RouteId::Handler { group, .. } => RouteId::Group(group.clone()),
        }
    }
}

impl core::fmt::Display for RouteId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RouteId::Group(g) => write!(f, "{g}"),
            RouteId::Handler { group, name } => write!(f, "{group}::{name}"),
        }
    }
}

/// What has been declared for a single route id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyMetadata {
    pub is_public: bool,
    pub required_roles: Option<RoleSet>,
}

/// Effective policy for a route after handler/group resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedPolicy<'a> {
    pub is_public: bool,
    pub required_roles: Option<&'a RoleSet>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PolicyError {
    #[error("route '{0}' declared with an empty role set")]
    EmptyRoleSet(String),
}

#[derive(Debug, Default)]
pub struct PolicyRegistry {
    entries: HashMap<RouteId, PolicyMetadata>,
}

impl PolicyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a route (or a whole group) as public. Idempotent.
    pub fn mark_public(&mut self, route: RouteId) -> &mut Self {
        tracing::debug!(route = %route, "route marked public");
        self.entries.entry(route).or_default().is_public = true;
        self
    }

    /// Require one of `roles` for a route (or a whole group).
    ///
    /// Re-declaring the same route replaces its role set; declaring an empty
    /// set is rejected.
    pub fn require_roles(
        &mut self,
        route: RouteId,
        roles: impl IntoIterator<Item = Role>,
    ) -> Result<&mut Self, PolicyError> {
        let roles = RoleSet::new(roles).ok_or_else(|| PolicyError::EmptyRoleSet(route.to_string()))?;
        tracing::debug!(route = %route, roles = %roles, "route requires roles");
        self.entries.entry(route).or_default().required_roles = Some(roles);
        Ok(self)
    }

    /// Metadata declared directly on `route`, without fallback.
    pub fn declared(&self, route: &RouteId) -> Option<&PolicyMetadata> {
        self.entries.get(route)
    }

    /// Resolve the effective policy: each fact is taken from the handler if it
    /// declares it, otherwise from its group.
    pub fn resolve(&self, route: &RouteId) -> ResolvedPolicy<'_> {
        let own = self.entries.get(route);
        let group = match route {
            RouteId::Handler { .. } => self.entries.get(&route.parent()),
            RouteId::Group(_) => None,
        };

        let is_public = own.is_some_and(|m| m.is_public) || group.is_some_and(|m| m.is_public);
        let required_roles = own
            .and_then(|m| m.required_roles.as_ref())
            .or_else(|| group.and_then(|m| m.required_roles.as_ref()));

        ResolvedPolicy {
            is_public,
            required_roles,
        }
    }
}
