//! Data loading - production records plus country/mineral lookups
//!
//! Production data is generated on first run. Lookup tables fall back to
//! small built-in defaults when their files are absent. A file that exists
//! but is malformed is always an error.

use std::path::Path;
use std::sync::Arc;

use polars::prelude::*;
use tracing::{debug, info};

use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, Result};
use crate::sample;
use crate::schema::{self, TableSchema, COUNTRY_ID, COUNTRY_NAME, MINERAL_ID, MINERAL_NAME};

/// The three source tables for one run
#[derive(Debug, Clone)]
pub struct Dataset {
    pub production: DataFrame,
    pub countries: DataFrame,
    pub minerals: DataFrame,
}

/// Ensure production data exists, then read all three tables
pub fn load_data(config: &AnalysisConfig) -> Result<Dataset> {
    sample::ensure_sample_production_data(config)?;

    let production = read_table(&config.production_path(), &schema::production_schema())?;

    let countries = match read_optional_table(&config.countries_path(), &schema::countries_schema())? {
        Some(df) => df,
        None => {
            info!(path = %config.countries_path().display(), "Countries table absent, using defaults");
            default_countries()?
        }
    };

    let minerals = match read_optional_table(&config.minerals_path(), &schema::minerals_schema())? {
        Some(df) => df,
        None => {
            info!(path = %config.minerals_path().display(), "Minerals table absent, using defaults");
            default_minerals()?
        }
    };

    Ok(Dataset {
        production,
        countries,
        minerals,
    })
}

/// Read a CSV table, parsing each declared column as its declared type
///
/// Declared columns never go through type inference, so a late decimal in a
/// float column or a leading zero in a text column is read as written.
pub fn read_table(path: &Path, table: &TableSchema) -> Result<DataFrame> {
    let header = read_header(path)?;
    let declared: Schema = table
        .columns
        .iter()
        .filter(|column| header.iter().any(|name| name == column.name))
        .map(|column| (PlSmallStr::from(column.name), column.dtype.clone()))
        .collect();

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_schema_overwrite(Some(Arc::new(declared)))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    let df = coerce(df, table)?;
    debug!(table = table.name, rows = df.height(), path = %path.display(), "Read table");
    Ok(df)
}

/// Column names of a CSV file, read without inferring any types
fn read_header(path: &Path) -> Result<Vec<String>> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_n_rows(Some(1))
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;
    Ok(df
        .get_column_names()
        .iter()
        .map(|c| c.to_string())
        .collect())
}

/// Like [`read_table`], but `None` when the file does not exist
pub fn read_optional_table(path: &Path, table: &TableSchema) -> Result<Option<DataFrame>> {
    if !path.is_file() {
        return Ok(None);
    }
    read_table(path, table).map(Some)
}

/// Check required columns and strictly cast every known column
///
/// Unknown extra columns are kept as read. Optional columns are cast only
/// when present. Frames from [`read_table`] already carry the declared
/// types, so the casts only matter for frames built in memory.
pub fn coerce(df: DataFrame, table: &TableSchema) -> Result<DataFrame> {
    let present: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|c| c.to_string())
        .collect();

    let mut casts = Vec::with_capacity(table.columns.len());
    for column in &table.columns {
        if present.iter().any(|c| c == column.name) {
            casts.push(col(column.name).strict_cast(column.dtype.clone()));
        } else if column.required {
            return Err(AnalysisError::MissingColumn {
                table: table.name.to_string(),
                column: column.name.to_string(),
            });
        }
    }

    Ok(df.lazy().with_columns(casts).collect()?)
}

/// Built-in countries: IDs 1–3 named "C1".."C3"
pub fn default_countries() -> Result<DataFrame> {
    let df = DataFrame::new(vec![
        Series::new(COUNTRY_ID.into(), vec![1i64, 2, 3]).into(),
        Series::new(COUNTRY_NAME.into(), vec!["C1", "C2", "C3"]).into(),
    ])?;
    Ok(df)
}

/// Built-in minerals: IDs 1–2 named "M1", "M2"
pub fn default_minerals() -> Result<DataFrame> {
    let df = DataFrame::new(vec![
        Series::new(MINERAL_ID.into(), vec![1i64, 2]).into(),
        Series::new(MINERAL_NAME.into(), vec!["M1", "M2"]).into(),
    ])?;
    Ok(df)
}
