//! Configuration for minn-analysis

use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use crate::auth::RoleId;
use crate::error::{AnalysisError, Result};
use crate::schema;

/// Default data directory, relative to the working directory
pub const DEFAULT_DATA_DIR: &str = "minn_data";

/// Analysis configuration
///
/// Passed explicitly into every component; nothing is read from globals.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Directory holding all CSV tables
    pub data_dir: PathBuf,

    /// Production records (generated when missing)
    pub production_file: String,

    /// Optional country lookup table
    pub countries_file: String,

    /// Optional mineral lookup table
    pub minerals_file: String,

    /// Optional users table for the simulated login
    pub users_file: String,

    /// Grid and seed used when synthesizing production data
    pub sample: SampleConfig,

    /// How many countries the report lists by export value
    pub top_exporters: usize,

    /// Rows shown per preview table in the report
    pub preview_rows: usize,

    /// Credentials the report driver tries
    pub login: LoginRequest,

    /// Role code that selects the admin message
    pub admin_role: RoleId,
}

impl AnalysisConfig {
    /// Create config with the standard file layout
    ///
    /// # Arguments
    /// * `data_dir` - Directory for all tables.
    ///   Structure used:
    ///   ```text
    ///   data_dir/
    ///   ├── production_stats.csv   (generated if absent)
    ///   ├── countries.csv          (optional)
    ///   ├── minerals.csv           (optional)
    ///   └── users.csv              (optional)
    ///   ```
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            production_file: schema::PRODUCTION_FILE.to_string(),
            countries_file: schema::COUNTRIES_FILE.to_string(),
            minerals_file: schema::MINERALS_FILE.to_string(),
            users_file: schema::USERS_FILE.to_string(),
            sample: SampleConfig::default(),
            top_exporters: 3,
            preview_rows: 5,
            login: LoginRequest::new("alice", "pass1"),
            admin_role: RoleId::ADMIN,
        }
    }

    /// Override the sample grid
    pub fn with_sample(mut self, sample: SampleConfig) -> Self {
        self.sample = sample;
        self
    }

    /// Override the number of top exporters
    pub fn with_top_exporters(mut self, k: usize) -> Self {
        self.top_exporters = k;
        self
    }

    /// Override preview size
    pub fn with_preview_rows(mut self, rows: usize) -> Self {
        self.preview_rows = rows;
        self
    }

    /// Override the credentials used by the report driver
    pub fn with_login(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.login = LoginRequest::new(username, password);
        self
    }

    pub fn with_admin_role(mut self, role: RoleId) -> Self {
        self.admin_role = role;
        self
    }

    pub fn production_path(&self) -> PathBuf {
        self.data_dir.join(&self.production_file)
    }

    pub fn countries_path(&self) -> PathBuf {
        self.data_dir.join(&self.countries_file)
    }

    pub fn minerals_path(&self) -> PathBuf {
        self.data_dir.join(&self.minerals_file)
    }

    pub fn users_path(&self) -> PathBuf {
        self.data_dir.join(&self.users_file)
    }

    /// Create the data directory (idempotent)
    pub fn ensure_data_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.data_dir)?;
        Ok(())
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_DIR)
    }
}

/// Username/password pair for the simulated login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Cartesian grid for synthetic production data
#[derive(Debug, Clone)]
pub struct SampleConfig {
    pub country_ids: Vec<i64>,
    pub mineral_ids: Vec<i64>,
    pub years: RangeInclusive<i64>,

    /// Fixed RNG seed; `None` draws from the OS
    pub seed: Option<u64>,
}

impl SampleConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_years(mut self, years: RangeInclusive<i64>) -> Self {
        self.years = years;
        self
    }

    pub fn with_countries(mut self, ids: Vec<i64>) -> Self {
        self.country_ids = ids;
        self
    }

    pub fn with_minerals(mut self, ids: Vec<i64>) -> Self {
        self.mineral_ids = ids;
        self
    }

    /// Number of rows the grid produces
    pub fn row_count(&self) -> usize {
        let years = self.years.clone().count();
        self.country_ids.len() * self.mineral_ids.len() * years
    }

    /// Reject grids that would yield an empty file
    pub fn validate(&self) -> Result<()> {
        if self.row_count() == 0 {
            return Err(AnalysisError::Config(format!(
                "sample grid is empty: {} countries x {} minerals x years {:?}",
                self.country_ids.len(),
                self.mineral_ids.len(),
                self.years
            )));
        }
        Ok(())
    }
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            country_ids: vec![1, 2, 3],
            mineral_ids: vec![1, 2],
            years: 2018..=2023,
            seed: None,
        }
    }
}
