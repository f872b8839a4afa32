//! Auth domain types - RoleId, UserCredential, LoginOutcome

use std::fmt;

/// Integer role code from the `RoleID` column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoleId(pub i64);

impl RoleId {
    /// Sentinel that selects the admin message
    pub const ADMIN: RoleId = RoleId(1);

    /// Role assumed when a user row has no `RoleID`
    pub const DEFAULT: RoleId = RoleId(2);

    pub fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One row of `users.csv`
///
/// `password_hash` holds the plaintext password despite its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCredential {
    pub username: String,
    pub password_hash: String,
    pub role_id: Option<RoleId>,
}

impl UserCredential {
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
            role_id: None,
        }
    }

    pub fn with_role(mut self, role: RoleId) -> Self {
        self.role_id = Some(role);
        self
    }

    /// Stored role, or [`RoleId::DEFAULT`] when absent
    pub fn effective_role(&self) -> RoleId {
        self.role_id.unwrap_or(RoleId::DEFAULT)
    }

    /// Exact, case-sensitive match on both fields
    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password_hash == password
    }
}

/// Result of a simulated login: success flag plus role on success
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoginOutcome {
    pub success: bool,
    pub role: Option<RoleId>,
}

impl LoginOutcome {
    pub fn granted(role: RoleId) -> Self {
        Self {
            success: true,
            role: Some(role),
        }
    }

    pub fn denied() -> Self {
        Self {
            success: false,
            role: None,
        }
    }

    /// Logged in and holding exactly `admin_role`
    pub fn is_admin(&self, admin_role: RoleId) -> bool {
        self.success && self.role == Some(admin_role)
    }

    pub fn into_parts(self) -> (bool, Option<RoleId>) {
        (self.success, self.role)
    }
}
