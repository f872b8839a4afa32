//! Report driver - load, aggregate, check the login, render
//!
//! The admin/limited branch only selects which closing message is shown.
//! Every table is computed and rendered for every role; nothing is gated.

use std::fmt;

use polars::prelude::DataFrame;
use tracing::info;

use crate::aggregate;
use crate::auth::{simulate_login, LoginOutcome, RoleId};
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::loader;

pub const ADMIN_MESSAGE: &str = "[Analysis] Role 1 (admin) - can run full analysis.";
pub const LIMITED_MESSAGE: &str = "[Analysis] Non-admin or failed login - limited outputs.";

/// Which closing message the report prints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessLevel {
    Full,
    Limited,
}

impl AccessLevel {
    pub fn from_login(outcome: &LoginOutcome, admin_role: RoleId) -> Self {
        if outcome.is_admin(admin_role) {
            Self::Full
        } else {
            Self::Limited
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Full => ADMIN_MESSAGE,
            Self::Limited => LIMITED_MESSAGE,
        }
    }
}

/// Everything one run computes
#[derive(Debug, Clone)]
pub struct Report {
    /// Yearly totals with year-over-year change, ascending by year
    pub yearly: DataFrame,
    /// Pair totals with names, descending by tonnes
    pub pairs: DataFrame,
    /// Top exporters, descending by export value
    pub top_exporters: DataFrame,
    pub login: LoginOutcome,
    pub access: AccessLevel,
    preview_rows: usize,
}

/// Run the full pipeline against `config.data_dir`
pub fn run_report(config: &AnalysisConfig) -> Result<Report> {
    let data = loader::load_data(config)?;

    let summary = aggregate::aggregate_production(&data.production)?;
    let yearly = aggregate::yearly_change(&summary.yearly)?;
    let pairs = aggregate::name_pairs(&summary.pairs, &data.countries, &data.minerals)?;
    let top_exporters =
        aggregate::top_countries_by_export(&data.production, &data.countries, config.top_exporters)?;

    let login = simulate_login(config, &config.login.username, &config.login.password)?;
    let access = AccessLevel::from_login(&login, config.admin_role);

    info!(
        years = yearly.height(),
        pairs = pairs.height(),
        exporters = top_exporters.height(),
        access = ?access,
        "Analysis complete"
    );

    Ok(Report {
        yearly,
        pairs,
        top_exporters,
        login,
        access,
        preview_rows: config.preview_rows,
    })
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[Analysis] Annual production (sample):")?;
        writeln!(f, "{}", self.yearly.tail(Some(self.preview_rows)))?;

        writeln!(f)?;
        writeln!(f, "[Analysis] Top (CountryID, MineralID) production pairs (sample):")?;
        writeln!(f, "{}", self.pairs.head(Some(self.preview_rows)))?;

        writeln!(f)?;
        writeln!(f, "[Analysis] Top countries by export value (sample):")?;
        writeln!(f, "{}", self.top_exporters)?;

        writeln!(f, "{}", self.access.message())
    }
}
