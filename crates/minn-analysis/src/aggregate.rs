//! Production aggregates - yearly totals, pair totals, top exporters
//!
//! Every function here is pure: it reads the input frames and returns new
//! ones. Groups are formed in first-appearance order and all sorts keep
//! that order for equal keys, so ties break by original row order.
//!
//! # Example
//!
//! ```rust,no_run
//! use minn_analysis::{aggregate, loader, AnalysisConfig};
//!
//! # fn main() -> minn_analysis::Result<()> {
//! let data = loader::load_data(&AnalysisConfig::default())?;
//! let summary = aggregate::aggregate_production(&data.production)?;
//! let top = aggregate::top_countries_by_export(&data.production, &data.countries, 3)?;
//! println!("{}\n{}\n{}", summary.yearly, summary.pairs, top);
//! # Ok(())
//! # }
//! ```

use polars::prelude::*;

use crate::error::{AnalysisError, Result};
use crate::schema::{
    CHANGE_TONNES, COUNTRY_ID, COUNTRY_NAME, EXPORT_VALUE, MINERAL_ID, MINERAL_NAME,
    PRODUCTION_TONNES, YEAR,
};

/// Scratch column carrying pre-join row order
const ORDER_COLUMN: &str = "__order";

/// Output of [`aggregate_production`]
#[derive(Debug, Clone)]
pub struct ProductionSummary {
    /// `Year, Production_tonnes`, ascending by year
    pub yearly: DataFrame,
    /// `CountryID, MineralID, Production_tonnes`, descending by tonnes
    pub pairs: DataFrame,
}

/// Group-by-sum production per year and per (country, mineral) pair
pub fn aggregate_production(records: &DataFrame) -> Result<ProductionSummary> {
    let yearly = records
        .clone()
        .lazy()
        .group_by_stable([col(YEAR)])
        .agg([col(PRODUCTION_TONNES).sum()])
        .sort_by_exprs(
            [col(YEAR)],
            SortMultipleOptions::default().with_maintain_order(true),
        )
        .collect()?;

    let pairs = records
        .clone()
        .lazy()
        .group_by_stable([col(COUNTRY_ID), col(MINERAL_ID)])
        .agg([col(PRODUCTION_TONNES).sum()])
        .sort_by_exprs([col(PRODUCTION_TONNES)], descending_stable())
        .collect()?;

    Ok(ProductionSummary { yearly, pairs })
}

/// Top `k` countries by summed export value, names left-joined
///
/// Countries missing from `countries` keep their row with a null
/// `CountryName`. Asking for more countries than exist returns all of them.
pub fn top_countries_by_export(
    records: &DataFrame,
    countries: &DataFrame,
    k: usize,
) -> Result<DataFrame> {
    if k == 0 {
        return Err(AnalysisError::InvalidTopK(k));
    }

    let names = countries
        .clone()
        .lazy()
        .select([col(COUNTRY_ID), col(COUNTRY_NAME)]);

    let top = records
        .clone()
        .lazy()
        .group_by_stable([col(COUNTRY_ID)])
        .agg([col(EXPORT_VALUE).sum()])
        .with_row_index(ORDER_COLUMN, None)
        .join(
            names,
            [col(COUNTRY_ID)],
            [col(COUNTRY_ID)],
            JoinArgs::new(JoinType::Left),
        )
        .sort_by_exprs(
            [col(EXPORT_VALUE), col(ORDER_COLUMN)],
            SortMultipleOptions::default()
                .with_order_descending_multi([true, false])
                .with_maintain_order(true),
        )
        .limit(k as IdxSize)
        .select([col(COUNTRY_ID), col(EXPORT_VALUE), col(COUNTRY_NAME)])
        .collect()?;

    Ok(top)
}

/// Attach country and mineral names to pair totals, keeping pair order
pub fn name_pairs(pairs: &DataFrame, countries: &DataFrame, minerals: &DataFrame) -> Result<DataFrame> {
    let country_names = countries
        .clone()
        .lazy()
        .select([col(COUNTRY_ID), col(COUNTRY_NAME)]);
    let mineral_names = minerals
        .clone()
        .lazy()
        .select([col(MINERAL_ID), col(MINERAL_NAME)]);

    let named = pairs
        .clone()
        .lazy()
        .with_row_index(ORDER_COLUMN, None)
        .join(
            country_names,
            [col(COUNTRY_ID)],
            [col(COUNTRY_ID)],
            JoinArgs::new(JoinType::Left),
        )
        .join(
            mineral_names,
            [col(MINERAL_ID)],
            [col(MINERAL_ID)],
            JoinArgs::new(JoinType::Left),
        )
        .sort_by_exprs([col(ORDER_COLUMN)], SortMultipleOptions::default())
        .select([
            col(COUNTRY_ID),
            col(COUNTRY_NAME),
            col(MINERAL_ID),
            col(MINERAL_NAME),
            col(PRODUCTION_TONNES),
        ])
        .collect()?;

    Ok(named)
}

/// Year-over-year production change
///
/// Expects yearly totals ascending by year, as produced by
/// [`aggregate_production`]. The first year's change is null.
pub fn yearly_change(yearly: &DataFrame) -> Result<DataFrame> {
    let df = yearly
        .clone()
        .lazy()
        .with_columns([
            (col(PRODUCTION_TONNES) - col(PRODUCTION_TONNES).shift(lit(1))).alias(CHANGE_TONNES),
        ])
        .collect()?;
    Ok(df)
}

fn descending_stable() -> SortMultipleOptions {
    SortMultipleOptions::default()
        .with_order_descending(true)
        .with_maintain_order(true)
}
