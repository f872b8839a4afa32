//! Generator, loader and report driver integration tests

use std::fs;

use tempfile::TempDir;

use minn_analysis::auth::RoleId;
use minn_analysis::config::{AnalysisConfig, SampleConfig};
use minn_analysis::error::AnalysisError;
use minn_analysis::loader::{self, load_data};
use minn_analysis::model::{PairTotal, ProductionRecord, YearlyTotal};
use minn_analysis::report::{run_report, AccessLevel, ADMIN_MESSAGE, LIMITED_MESSAGE};
use minn_analysis::sample::ensure_sample_production_data;
use minn_analysis::schema;

fn test_config(dir: &TempDir) -> AnalysisConfig {
    AnalysisConfig::new(dir.path().join("minn_data"))
        .with_sample(SampleConfig::default().with_seed(2024))
}

// ─── Sample Data Generator ───

#[test]
fn test_generator_writes_full_grid() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);

    assert!(!config.data_dir.exists());
    assert!(ensure_sample_production_data(&config).unwrap());
    assert!(config.production_path().is_file());

    let df = loader::read_table(&config.production_path(), &schema::production_schema()).unwrap();
    let records = ProductionRecord::from_frame(&df).unwrap();
    assert_eq!(records.len(), 36);

    for r in &records {
        assert!(r.production_tonnes >= 0);
        assert!(r.export_value_billion_usd >= 0.0);
        let cents = r.export_value_billion_usd * 100.0;
        assert!((cents - cents.round()).abs() < 1e-6, "not rounded: {}", r.export_value_billion_usd);
    }
}

#[test]
fn test_generator_writes_two_decimal_exports() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    ensure_sample_production_data(&config).unwrap();

    let text = fs::read_to_string(config.production_path()).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next().unwrap(),
        "CountryID,MineralID,Year,Production_tonnes,ExportValue_BillionUSD"
    );
    for line in lines {
        let export = line.rsplit(',').next().unwrap();
        let decimals = export.split('.').nth(1).unwrap();
        assert_eq!(decimals.len(), 2, "line: {line}");
    }
}

#[test]
fn test_generator_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);

    assert!(ensure_sample_production_data(&config).unwrap());
    let first = fs::read_to_string(config.production_path()).unwrap();

    // A different seed would produce different data if the file were rewritten
    let reseeded = config.clone().with_sample(SampleConfig::default().with_seed(7));
    assert!(!ensure_sample_production_data(&reseeded).unwrap());
    let second = fs::read_to_string(config.production_path()).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_generator_leaves_existing_file_alone() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    config.ensure_data_dir().unwrap();

    let custom = "CountryID,MineralID,Year,Production_tonnes,ExportValue_BillionUSD\n7,1,2000,5,0.50\n";
    fs::write(config.production_path(), custom).unwrap();

    assert!(!ensure_sample_production_data(&config).unwrap());
    assert_eq!(fs::read_to_string(config.production_path()).unwrap(), custom);
}

// ─── Data Loader ───

#[test]
fn test_load_uses_default_lookups() {
    let dir = TempDir::new().unwrap();
    let data = load_data(&test_config(&dir)).unwrap();

    assert_eq!(data.production.height(), 36);
    assert_eq!(data.countries.height(), 3);
    assert_eq!(data.minerals.height(), 2);
}

#[test]
fn test_load_reads_lookup_files() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    config.ensure_data_dir().unwrap();
    fs::write(
        config.countries_path(),
        "CountryID,CountryName\n1,Chile\n2,Peru\n3,Australia\n4,Congo\n",
    )
    .unwrap();
    fs::write(config.minerals_path(), "MineralID,MineralName\n1,Copper\n2,Lithium\n").unwrap();

    let data = load_data(&config).unwrap();
    assert_eq!(data.countries.height(), 4);
    assert_eq!(data.minerals.height(), 2);
}

#[test]
fn test_load_rejects_missing_column() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    config.ensure_data_dir().unwrap();
    fs::write(
        config.production_path(),
        "CountryID,MineralID,Year,Production_tonnes\n1,1,2020,100\n",
    )
    .unwrap();

    let err = load_data(&config).unwrap_err();
    match err {
        AnalysisError::MissingColumn { table, column } => {
            assert_eq!(table, "production_stats");
            assert_eq!(column, schema::EXPORT_VALUE);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_load_rejects_unparseable_values() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    config.ensure_data_dir().unwrap();
    fs::write(
        config.production_path(),
        "CountryID,MineralID,Year,Production_tonnes,ExportValue_BillionUSD\n1,1,twenty,100,1.00\n",
    )
    .unwrap();

    assert!(matches!(load_data(&config), Err(AnalysisError::Polars(_))));
}

#[test]
fn test_load_accepts_late_decimal_export_value() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    config.ensure_data_dir().unwrap();

    let mut csv = String::from("CountryID,MineralID,Year,Production_tonnes,ExportValue_BillionUSD\n");
    for i in 0..150 {
        csv.push_str(&format!("1,1,{},100,2\n", 2000 + i));
    }
    csv.push_str("2,1,2000,50,2.35\n");
    fs::write(config.production_path(), csv).unwrap();

    let data = load_data(&config).unwrap();
    let records = ProductionRecord::from_frame(&data.production).unwrap();
    assert_eq!(records.len(), 151);
    assert_eq!(records[0].export_value_billion_usd, 2.0);
    assert_eq!(records[150].export_value_billion_usd, 2.35);
}

// ─── Report Driver ───

#[test]
fn test_end_to_end_without_files() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);

    let report = run_report(&config).unwrap();

    let years: Vec<_> = YearlyTotal::from_frame(&report.yearly)
        .unwrap()
        .iter()
        .map(|y| y.year)
        .collect();
    assert_eq!(years, (2018..=2023).collect::<Vec<_>>());

    assert_eq!(PairTotal::from_frame(&report.pairs).unwrap().len(), 6);
    assert_eq!(report.top_exporters.height(), 3);
    assert!(!report.login.success);
    assert_eq!(report.access, AccessLevel::Limited);

    let rendered = report.to_string();
    assert!(rendered.contains("[Analysis] Annual production (sample):"));
    assert!(rendered.contains("[Analysis] Top countries by export value (sample):"));
    assert!(rendered.trim_end().ends_with(LIMITED_MESSAGE));
    assert!(!rendered.contains(ADMIN_MESSAGE));
}

#[test]
fn test_end_to_end_with_admin_user() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    config.ensure_data_dir().unwrap();
    fs::write(
        config.users_path(),
        "Username,PasswordHash,RoleID\nalice,pass1,1\nbob,pass2,2\n",
    )
    .unwrap();

    let report = run_report(&config).unwrap();
    assert_eq!(report.access, AccessLevel::Full);
    assert!(report.to_string().trim_end().ends_with(ADMIN_MESSAGE));
}

#[test]
fn test_end_to_end_non_admin_role_still_gets_tables() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir).with_login("bob", "pass2");
    config.ensure_data_dir().unwrap();
    fs::write(
        config.users_path(),
        "Username,PasswordHash,RoleID\nalice,pass1,1\nbob,pass2,2\n",
    )
    .unwrap();

    let report = run_report(&config).unwrap();
    assert!(report.login.success);
    assert_eq!(report.access, AccessLevel::Limited);
    assert_eq!(report.pairs.height(), 6);
    assert_eq!(report.top_exporters.height(), 3);
}

#[test]
fn test_end_to_end_custom_admin_role() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir)
        .with_login("carol", "pw3")
        .with_admin_role(RoleId(3));
    config.ensure_data_dir().unwrap();
    fs::write(
        config.users_path(),
        "Username,PasswordHash,RoleID\nalice,pass1,1\ncarol,pw3,3\n",
    )
    .unwrap();

    let report = run_report(&config).unwrap();
    assert_eq!(report.login.role.map(RoleId::value), Some(3));
    assert_eq!(report.access, AccessLevel::Full);
    assert!(report.to_string().trim_end().ends_with(ADMIN_MESSAGE));
}
