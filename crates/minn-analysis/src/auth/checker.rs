//! Simulated login - exact lookup of (Username, PasswordHash) in `users.csv`
//!
//! # Usage
//!
//! ```rust,no_run
//! use minn_analysis::auth::{simulate_login, RoleId};
//! use minn_analysis::AnalysisConfig;
//!
//! # fn main() -> minn_analysis::Result<()> {
//! let config = AnalysisConfig::default();
//! let outcome = simulate_login(&config, "alice", "pass1")?;
//! if outcome.is_admin(RoleId::ADMIN) {
//!     println!("admin");
//! }
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use polars::prelude::DataFrame;
use tracing::{debug, info, warn};

use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::loader;
use crate::model::{i64_values, str_values};
use crate::schema::{self, PASSWORD_HASH, ROLE_ID, USERNAME};

use super::types::*;

/// All user rows from the users table, in file order
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    users: Vec<UserCredential>,
}

impl UserDirectory {
    pub fn new(users: Vec<UserCredential>) -> Self {
        Self { users }
    }

    /// Read the users table; `None` when the file does not exist
    pub fn load(path: &Path) -> Result<Option<Self>> {
        match loader::read_optional_table(path, &schema::users_schema())? {
            Some(df) => Self::from_frame(&df).map(Some),
            None => Ok(None),
        }
    }

    /// Build from a coerced users frame
    ///
    /// A missing `RoleID` column or an empty cell leaves `role_id` unset.
    /// Rows with an empty username or password can never match and are
    /// dropped.
    pub fn from_frame(df: &DataFrame) -> Result<Self> {
        let usernames = str_values(df, USERNAME)?;
        let passwords = str_values(df, PASSWORD_HASH)?;
        let roles = if df.get_column_names().iter().any(|c| c.as_str() == ROLE_ID) {
            i64_values(df, ROLE_ID)?
        } else {
            vec![None; df.height()]
        };

        let users: Vec<UserCredential> = usernames
            .into_iter()
            .zip(passwords)
            .zip(roles)
            .filter_map(|((username, password_hash), role)| {
                Some(UserCredential {
                    username: username?,
                    password_hash: password_hash?,
                    role_id: role.map(RoleId),
                })
            })
            .collect();

        let skipped = df.height() - users.len();
        if skipped > 0 {
            debug!(skipped, "Dropped user rows with empty credentials");
        }

        Ok(Self { users })
    }

    /// First row matching both fields exactly
    pub fn find(&self, username: &str, password: &str) -> Option<&UserCredential> {
        self.users.iter().find(|u| u.matches(username, password))
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

/// Look up the credentials in the configured users table
///
/// Returns `granted(role)` on a match and `denied()` on no match or when
/// the users table does not exist. A malformed users table is an error.
pub fn simulate_login(config: &AnalysisConfig, username: &str, password: &str) -> Result<LoginOutcome> {
    let path = config.users_path();
    let outcome = match UserDirectory::load(&path)? {
        Some(directory) => directory
            .find(username, password)
            .map(|user| LoginOutcome::granted(user.effective_role())),
        None => {
            debug!(path = %path.display(), "Users table absent");
            None
        }
    }
    .unwrap_or_else(LoginOutcome::denied);

    match outcome.role {
        Some(role) => info!(username, role = %role, "Login success"),
        None => warn!(username, "Login failed (simulated)"),
    }

    Ok(outcome)
}
