//! # Minn Analysis
//!
//! Aggregate statistics over mineral production records, built on
//! [Polars](https://pola.rs) - annual totals, top (country, mineral) pairs,
//! and top exporters - plus a simulated credential check that selects which
//! closing message the report prints.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────┐
//! │               minn-analysis               │
//! ├───────────────────────────────────────────┤
//! │  report  (load → aggregate → login → fmt) │
//! ├──────────────┬──────────────┬─────────────┤
//! │  aggregate   │    auth      │   sample    │
//! │ (group, sort,│ (users.csv   │ (half-normal│
//! │  left joins) │  lookup)     │  grid)      │
//! ├──────────────┴──────────────┴─────────────┤
//! │        loader + schema (CSV → DataFrame)  │
//! └───────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use minn_analysis::{report, AnalysisConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AnalysisConfig::new("minn_data").with_top_exporters(3);
//!     let report = report::run_report(&config)?;
//!     print!("{report}");
//!     Ok(())
//! }
//! ```
//!
//! ## Data directory
//!
//! - `production_stats.csv` - generated on first run if missing
//! - `countries.csv`, `minerals.csv` - optional, built-in defaults otherwise
//! - `users.csv` - optional; without it every login fails
//!
//! The login check compares plaintext strings. It is a presentation switch,
//! not access control.

pub mod aggregate;
pub mod auth;
pub mod config;
pub mod error;
pub mod loader;
pub mod model;
pub mod report;
pub mod sample;
pub mod schema;

// Re-exports for convenience
pub use aggregate::{aggregate_production, top_countries_by_export, ProductionSummary};
pub use auth::{simulate_login, LoginOutcome, RoleId, UserCredential, UserDirectory};
pub use config::{AnalysisConfig, LoginRequest, SampleConfig};
pub use error::{AnalysisError, Result};
pub use loader::{load_data, Dataset};
pub use model::{CountryExportTotal, PairTotal, ProductionRecord, YearlyTotal};
pub use report::{run_report, AccessLevel, Report};
pub use sample::ensure_sample_production_data;
