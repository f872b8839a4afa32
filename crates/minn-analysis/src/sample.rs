//! Synthetic production data for standalone runs
//!
//! When `production_stats.csv` is missing, a country × mineral × year grid
//! is drawn from half-normal distributions and written in its place.
//!
//! # Example
//!
//! ```rust,no_run
//! use minn_analysis::{sample, AnalysisConfig};
//!
//! # fn main() -> minn_analysis::Result<()> {
//! let config = AnalysisConfig::new("/tmp/minn_data");
//! let written = sample::ensure_sample_production_data(&config)?;
//! println!("generated: {written}");
//! # Ok(())
//! # }
//! ```

use std::fs::File;

use polars::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use tracing::{debug, info};

use crate::config::{AnalysisConfig, SampleConfig};
use crate::error::{AnalysisError, Result};
use crate::model::ProductionRecord;

/// Mean tonnage per unit of `country_id * mineral_id`
const TONNES_SCALE: f64 = 50_000.0;
const TONNES_STD_DEV: f64 = 10_000.0;

/// Mean export value (billion USD) per unit of `country_id * mineral_id`
const EXPORT_SCALE: f64 = 1.0;
const EXPORT_STD_DEV: f64 = 0.2;

/// Write sample production data unless the file already exists
///
/// Returns `true` when a new file was written. An existing file is never
/// touched, so repeated calls are no-ops.
pub fn ensure_sample_production_data(config: &AnalysisConfig) -> Result<bool> {
    config.ensure_data_dir()?;

    let path = config.production_path();
    if path.is_file() {
        debug!(path = %path.display(), "Production data present");
        return Ok(false);
    }

    info!(path = %path.display(), "Production data missing, generating lightweight sample");

    let records = match config.sample.seed {
        Some(seed) => generate_sample_production(&config.sample, &mut StdRng::seed_from_u64(seed))?,
        None => generate_sample_production(&config.sample, &mut StdRng::from_os_rng())?,
    };

    let mut df = ProductionRecord::to_frame(&records)?;
    let mut file = File::create(&path)?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .with_float_precision(Some(2))
        .finish(&mut df)?;

    info!(path = %path.display(), rows = df.height(), "Sample production data written");
    Ok(true)
}

/// Draw one record per (country, mineral, year) in grid order
///
/// Tonnage is `trunc(|N(50000·c·m, 10000)|)`; export value is
/// `|N(1.0·c·m, 0.2)|` rounded to cents of a billion.
pub fn generate_sample_production<R: Rng + ?Sized>(
    sample: &SampleConfig,
    rng: &mut R,
) -> Result<Vec<ProductionRecord>> {
    sample.validate()?;

    let mut records = Vec::with_capacity(sample.row_count());
    for &country_id in &sample.country_ids {
        for &mineral_id in &sample.mineral_ids {
            let weight = (country_id * mineral_id) as f64;
            let tonnes = normal(TONNES_SCALE * weight, TONNES_STD_DEV)?;
            let export = normal(EXPORT_SCALE * weight, EXPORT_STD_DEV)?;

            for year in sample.years.clone() {
                records.push(ProductionRecord {
                    country_id,
                    mineral_id,
                    year,
                    production_tonnes: tonnes.sample(rng).abs() as i64,
                    export_value_billion_usd: round2(export.sample(rng).abs()),
                });
            }
        }
    }

    debug!(rows = records.len(), "Generated sample production records");
    Ok(records)
}

fn normal(mean: f64, std_dev: f64) -> Result<Normal<f64>> {
    Normal::new(mean, std_dev).map_err(|e| AnalysisError::Sampling(e.to_string()))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
