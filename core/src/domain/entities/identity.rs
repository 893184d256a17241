//! Identity entity supplied by the user layer and embedded in every token.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Role of a user in the bug tracker
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Works on issues assigned to them
    #[default]
    Developer,
    /// Manages projects and assignments
    Manager,
    /// Full administrative access
    Admin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Developer, Role::Manager, Role::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Developer => "developer",
            Role::Manager => "manager",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "developer" => Ok(Role::Developer),
            "manager" => Ok(Role::Manager),
            "admin" => Ok(Role::Admin),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

/// Set of roles allowed through an authorization gate
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleSet(BTreeSet<Role>);

impl RoleSet {
    /// Creates a set from the given roles
    pub fn of<I: IntoIterator<Item = Role>>(roles: I) -> Self {
        Self(roles.into_iter().collect())
    }

    /// A set admitting every role
    pub fn all() -> Self {
        Self::of(Role::ALL)
    }

    pub fn contains(&self, role: Role) -> bool {
        self.0.contains(&role)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        Self::of(iter)
    }
}

/// Identity record of an authenticated user
///
/// Produced by the user layer after credential checks; treated as an
/// immutable value and never persisted here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Opaque unique subject identifier
    #[serde(rename = "sub")]
    pub subject_id: String,

    /// Display username
    pub username: String,

    /// Role used for authorization decisions
    pub role: Role,
}

impl Identity {
    pub fn new(subject_id: impl Into<String>, username: impl Into<String>, role: Role) -> Self {
        Self {
            subject_id: subject_id.into(),
            username: username.into(),
            role,
        }
    }
}
