//! Column schemas for all CSV tables
//!
//! Each table has:
//! - A file name under the data directory
//! - Column names with the Polars type they are coerced to on load
//! - A required/optional flag per column

use polars::prelude::DataType;

// ─── File Names (constants) ───

pub const PRODUCTION_FILE: &str = "production_stats.csv";
pub const COUNTRIES_FILE: &str = "countries.csv";
pub const MINERALS_FILE: &str = "minerals.csv";
pub const USERS_FILE: &str = "users.csv";

// ─── Column Names (constants) ───

pub const COUNTRY_ID: &str = "CountryID";
pub const MINERAL_ID: &str = "MineralID";
pub const YEAR: &str = "Year";
pub const PRODUCTION_TONNES: &str = "Production_tonnes";
pub const EXPORT_VALUE: &str = "ExportValue_BillionUSD";
pub const COUNTRY_NAME: &str = "CountryName";
pub const MINERAL_NAME: &str = "MineralName";
pub const USERNAME: &str = "Username";
pub const PASSWORD_HASH: &str = "PasswordHash";
pub const ROLE_ID: &str = "RoleID";

/// Derived column: year-over-year production delta
pub const CHANGE_TONNES: &str = "Change_tonnes";

/// A single column and the type it is coerced to
#[derive(Debug, Clone)]
pub struct ColumnDef {
    pub name: &'static str,
    pub dtype: DataType,
    pub required: bool,
}

impl ColumnDef {
    fn required(name: &'static str, dtype: DataType) -> Self {
        Self { name, dtype, required: true }
    }

    fn optional(name: &'static str, dtype: DataType) -> Self {
        Self { name, dtype, required: false }
    }
}

/// Table definition bundle for `loader::read_table`
#[derive(Debug, Clone)]
pub struct TableSchema {
    pub name: &'static str,
    pub columns: Vec<ColumnDef>,
}

impl TableSchema {
    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }
}

// ─── Production Table ───

pub fn production_schema() -> TableSchema {
    TableSchema {
        name: "production_stats",
        columns: vec![
            ColumnDef::required(COUNTRY_ID, DataType::Int64),
            ColumnDef::required(MINERAL_ID, DataType::Int64),
            ColumnDef::required(YEAR, DataType::Int64),
            ColumnDef::required(PRODUCTION_TONNES, DataType::Int64),
            ColumnDef::required(EXPORT_VALUE, DataType::Float64),
        ],
    }
}

// ─── Lookup Tables ───

pub fn countries_schema() -> TableSchema {
    TableSchema {
        name: "countries",
        columns: vec![
            ColumnDef::required(COUNTRY_ID, DataType::Int64),
            ColumnDef::required(COUNTRY_NAME, DataType::String),
        ],
    }
}

pub fn minerals_schema() -> TableSchema {
    TableSchema {
        name: "minerals",
        columns: vec![
            ColumnDef::required(MINERAL_ID, DataType::Int64),
            ColumnDef::required(MINERAL_NAME, DataType::String),
        ],
    }
}

// ─── Users Table ───

/// `RoleID` may be absent entirely; readers fall back to `RoleId::DEFAULT`
pub fn users_schema() -> TableSchema {
    TableSchema {
        name: "users",
        columns: vec![
            ColumnDef::required(USERNAME, DataType::String),
            ColumnDef::required(PASSWORD_HASH, DataType::String),
            ColumnDef::optional(ROLE_ID, DataType::Int64),
        ],
    }
}
