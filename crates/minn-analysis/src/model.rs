//! Typed rows over the Polars tables
//!
//! The aggregations run on `DataFrame`s; these structs are the typed view
//! used by the sample generator, the tests and anything that wants plain
//! values back out of a frame.

use polars::prelude::*;

use crate::error::{AnalysisError, Result};
use crate::schema::{COUNTRY_ID, COUNTRY_NAME, EXPORT_VALUE, MINERAL_ID, PRODUCTION_TONNES, YEAR};

/// One row of `production_stats.csv`
#[derive(Debug, Clone, PartialEq)]
pub struct ProductionRecord {
    pub country_id: i64,
    pub mineral_id: i64,
    pub year: i64,
    pub production_tonnes: i64,
    pub export_value_billion_usd: f64,
}

impl ProductionRecord {
    /// Build a production frame with the on-disk column names and order
    pub fn to_frame(records: &[ProductionRecord]) -> Result<DataFrame> {
        let df = DataFrame::new(vec![
            Series::new(COUNTRY_ID.into(), records.iter().map(|r| r.country_id).collect::<Vec<_>>()).into(),
            Series::new(MINERAL_ID.into(), records.iter().map(|r| r.mineral_id).collect::<Vec<_>>()).into(),
            Series::new(YEAR.into(), records.iter().map(|r| r.year).collect::<Vec<_>>()).into(),
            Series::new(
                PRODUCTION_TONNES.into(),
                records.iter().map(|r| r.production_tonnes).collect::<Vec<_>>(),
            )
            .into(),
            Series::new(
                EXPORT_VALUE.into(),
                records.iter().map(|r| r.export_value_billion_usd).collect::<Vec<_>>(),
            )
            .into(),
        ])?;
        Ok(df)
    }

    pub fn from_frame(df: &DataFrame) -> Result<Vec<Self>> {
        let country = required(COUNTRY_ID, i64_values(df, COUNTRY_ID)?)?;
        let mineral = required(MINERAL_ID, i64_values(df, MINERAL_ID)?)?;
        let year = required(YEAR, i64_values(df, YEAR)?)?;
        let tonnes = required(PRODUCTION_TONNES, i64_values(df, PRODUCTION_TONNES)?)?;
        let export = required(EXPORT_VALUE, f64_values(df, EXPORT_VALUE)?)?;

        Ok((0..df.height())
            .map(|i| Self {
                country_id: country[i],
                mineral_id: mineral[i],
                year: year[i],
                production_tonnes: tonnes[i],
                export_value_billion_usd: export[i],
            })
            .collect())
    }
}

/// Total production for one year
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearlyTotal {
    pub year: i64,
    pub production_tonnes: i64,
}

impl YearlyTotal {
    pub fn from_frame(df: &DataFrame) -> Result<Vec<Self>> {
        let year = required(YEAR, i64_values(df, YEAR)?)?;
        let tonnes = required(PRODUCTION_TONNES, i64_values(df, PRODUCTION_TONNES)?)?;

        Ok(year
            .into_iter()
            .zip(tonnes)
            .map(|(year, production_tonnes)| Self { year, production_tonnes })
            .collect())
    }
}

/// Total production for one (country, mineral) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairTotal {
    pub country_id: i64,
    pub mineral_id: i64,
    pub production_tonnes: i64,
}

impl PairTotal {
    pub fn from_frame(df: &DataFrame) -> Result<Vec<Self>> {
        let country = required(COUNTRY_ID, i64_values(df, COUNTRY_ID)?)?;
        let mineral = required(MINERAL_ID, i64_values(df, MINERAL_ID)?)?;
        let tonnes = required(PRODUCTION_TONNES, i64_values(df, PRODUCTION_TONNES)?)?;

        Ok((0..df.height())
            .map(|i| Self {
                country_id: country[i],
                mineral_id: mineral[i],
                production_tonnes: tonnes[i],
            })
            .collect())
    }
}

/// Summed export value for one country, with its name when known
#[derive(Debug, Clone, PartialEq)]
pub struct CountryExportTotal {
    pub country_id: i64,
    pub export_value_billion_usd: f64,
    pub country_name: Option<String>,
}

impl CountryExportTotal {
    pub fn from_frame(df: &DataFrame) -> Result<Vec<Self>> {
        let country = required(COUNTRY_ID, i64_values(df, COUNTRY_ID)?)?;
        let export = required(EXPORT_VALUE, f64_values(df, EXPORT_VALUE)?)?;
        let names = str_values(df, COUNTRY_NAME)?;

        Ok(country
            .into_iter()
            .zip(export)
            .zip(names)
            .map(|((country_id, export_value_billion_usd), country_name)| Self {
                country_id,
                export_value_billion_usd,
                country_name,
            })
            .collect())
    }
}

// ─── Column Extraction ───

pub(crate) fn i64_values(df: &DataFrame, name: &str) -> Result<Vec<Option<i64>>> {
    let series = df.column(name)?.as_materialized_series();
    Ok(series.i64()?.into_iter().collect())
}

pub(crate) fn f64_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let series = df.column(name)?.as_materialized_series();
    Ok(series.f64()?.into_iter().collect())
}

pub(crate) fn str_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let series = df.column(name)?.as_materialized_series();
    Ok(series
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect())
}

/// Reject nulls in a column that must be fully populated
pub(crate) fn required<T>(column: &str, values: Vec<Option<T>>) -> Result<Vec<T>> {
    values
        .into_iter()
        .enumerate()
        .map(|(row, v)| {
            v.ok_or_else(|| AnalysisError::NullValue {
                column: column.to_string(),
                row,
            })
        })
        .collect()
}
