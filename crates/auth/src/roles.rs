use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Role carried by a token and checked by the access guard.
///
/// Roles form a closed set with no hierarchy: an administrator is not
/// implicitly a librarian, every check is exact membership.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Administrator,
    Librarian,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Administrator, Role::Librarian];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Administrator => "administrator",
            Role::Librarian => "librarian",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Role::Administrator => "Library administrator with access to user management and loan overrides",
            Role::Librarian => "Librarian managing day-to-day loans and requests",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "administrator" => Ok(Role::Administrator),
            "librarian" => Ok(Role::Librarian),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role '{0}'")]
pub struct UnknownRole(pub String);

/// A non-empty set of roles required by a route.
///
/// The only way to build one is [`RoleSet::new`], which rejects empty input,
/// so a registered requirement can never silently lock everyone out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RoleSet(BTreeSet<Role>);

impl RoleSet {
    pub fn new(roles: impl IntoIterator<Item = Role>) -> Option<Self> {
        let roles: BTreeSet<Role> = roles.into_iter().collect();
        if roles.is_empty() { None } else { Some(Self(roles)) }
    }

    pub fn contains(&self, role: Role) -> bool {
        self.0.contains(&role)
    }

    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        self.0.iter().copied()
    }
}

impl core::fmt::Display for RoleSet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let names: Vec<&str> = self.iter().map(|r| r.as_str()).collect();
        f.write_str(&names.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_serialize_in_lower_case() {
        let json = serde_json::to_string(&Role::Administrator).unwrap();
        assert_eq!(json, "\"administrator\"");

        let role: Role = serde_json::from_str("\"librarian\"").unwrap();
        assert_eq!(role, Role::Librarian);
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert!(serde_json::from_str::<Role>("\"student\"").is_err());
        assert_eq!(
            "student".parse::<Role>(),
            Err(UnknownRole("student".to_string()))
        );
    }

    #[test]
    fn empty_role_set_cannot_be_built() {
        assert!(RoleSet::new([]).is_none());

        let set = RoleSet::new([Role::Librarian, Role::Librarian]).unwrap();
        assert!(set.contains(Role::Librarian));
        assert!(!set.contains(Role::Administrator));
        assert_eq!(set.to_string(), "librarian");
    }
}
