//! End-to-end tests: explore a data tree, generate loaders, profile tables

use afes::codegen::{CodeTarget, generate_code, write_loader_code};
use afes::config::ExplorerConfig;
use afes::explorer::explore_files;
use afes::profile::{ReportFormat, load_table, profile_files};
use afes::separator::{infer_file_separator, separator_char};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn config() -> ExplorerConfig {
    ExplorerConfig::default().with_workers(4).without_progress()
}

fn write_tree(root: &Path) -> PathBuf {
    let data = root.join("datasets");
    fs::create_dir_all(data.join("retail")).unwrap();
    fs::create_dir_all(data.join("weather").join("2024")).unwrap();

    fs::write(
        data.join("retail").join("sales.csv"),
        "date,store,amount\n2024-01-01,1,10.5\n2024-01-02,2,7.25\n2024-01-03,1,3\n",
    )
    .unwrap();
    fs::write(
        data.join("retail").join("stores.txt"),
        "id;city;open\n1;Lisbon;true\n2;Porto;false\n",
    )
    .unwrap();
    fs::write(
        data.join("weather").join("2024").join("readings.tab"),
        "station\ttemp\train\nA\t12.1\t0.0\nB\t9.8\t1.2\nC\t15.0\t0.4\n",
    )
    .unwrap();
    fs::write(
        data.join("weather").join("stations.dat"),
        "code|name\nA|North Hill\nB|Bay\n",
    )
    .unwrap();
    fs::write(data.join("weather").join("meta.xml"), "<meta/>").unwrap();
    fs::write(data.join("notes.pdf"), "%PDF-1.4").unwrap();

    data
}

#[tokio::test]
async fn test_explore_generate_profile_pipeline() {
    let temp_dir = TempDir::new().unwrap();
    let data = write_tree(temp_dir.path());

    let exploration = explore_files(&data, config()).await.unwrap();
    assert_eq!(exploration.stats.files_discovered, 6);
    assert_eq!(exploration.stats.files_described, 5);
    assert_eq!(exploration.stats.files_skipped, 1);
    assert_eq!(exploration.stats.separator_fallbacks, 0);

    let separators: Vec<(&str, Option<&str>)> = exploration
        .files
        .iter()
        .map(|f| (f.name.as_str(), f.separator.as_deref()))
        .collect();
    assert!(separators.contains(&("sales", Some("comma"))));
    assert!(separators.contains(&("stores", Some("semi_colon"))));
    assert!(separators.contains(&("readings", Some("tab"))));
    assert!(separators.contains(&("stations", Some("pipe"))));
    assert!(separators.contains(&("meta", None)));

    // Loader code
    let code_file = temp_dir.path().join("code.txt");
    let loaders =
        write_loader_code(&exploration.files, CodeTarget::Pandas, true, &code_file, false)
            .unwrap();
    assert_eq!(loaders, 4);

    let code = fs::read_to_string(&code_file).unwrap();
    assert!(code.starts_with("import pandas as pd"));
    assert!(code.contains("df_readings = pd.read_csv("));
    assert!(code.contains("sep=\"\\t\""));
    assert!(code.contains("sep=\"|\""));
    assert!(!code.contains("meta.xml"));

    // Profile reports
    let reports = temp_dir.path().join("reports");
    let summary = profile_files(&exploration.files, &reports, ReportFormat::Json, &config()).unwrap();
    assert_eq!(summary.reports.len(), 4);
    assert_eq!(summary.files_skipped, 1);
    assert_eq!(summary.files_failed, 0);

    let sales: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(reports.join("sales_profile.json")).unwrap())
            .unwrap();
    assert_eq!(sales["rows"], 3);
    assert_eq!(sales["columns"], 3);
    assert_eq!(sales["column_profiles"][2]["summary"]["max"], 10.5);
}

#[tokio::test]
async fn test_explore_single_file() {
    let temp_dir = TempDir::new().unwrap();
    let data = write_tree(temp_dir.path());
    let file = data.join("retail").join("stores.txt");

    let exploration = explore_files(&file, config()).await.unwrap();
    assert_eq!(exploration.files.len(), 1);
    assert_eq!(exploration.files[0].rows, Some(3));
    assert_eq!(exploration.files[0].separator.as_deref(), Some("semi_colon"));
}

#[test]
fn test_inferred_separator_matches_character() {
    let temp_dir = TempDir::new().unwrap();
    let data = write_tree(temp_dir.path());

    let name = infer_file_separator(&data.join("weather").join("stations.dat"), true).unwrap();
    assert_eq!(name, "pipe");
    assert_eq!(separator_char(name), '|');
}

#[tokio::test]
async fn test_polars_loader_code_for_headerless_files() {
    let temp_dir = TempDir::new().unwrap();
    let data = temp_dir.path().join("raw");
    fs::create_dir_all(&data).unwrap();
    fs::write(data.join("points.csv"), "1;2;3\n4;5;6\n7;8;9\n").unwrap();

    let exploration = explore_files(&data, config().with_header(false))
        .await
        .unwrap();
    assert_eq!(exploration.files[0].separator.as_deref(), Some("semi_colon"));

    let code_file = temp_dir.path().join("out").join("loaders.rs");
    write_loader_code(&exploration.files, CodeTarget::Polars, false, &code_file, false).unwrap();

    let code = fs::read_to_string(code_file).unwrap();
    assert!(code.starts_with("use polars::prelude::*;"));
    assert!(code.contains("let df_points = CsvReadOptions::default()"));
    assert!(code.contains(".with_has_header(false)"));
    assert!(code.contains("b';'"));

    // The loader and the profiler read the same number of rows
    let df = load_table(&exploration.files[0], &config().with_header(false)).unwrap();
    assert_eq!(df.height(), 3);

    let pandas = generate_code(&exploration.files[0], CodeTarget::Pandas, false);
    assert!(pandas.contains("header=None"));
}

#[tokio::test]
async fn test_empty_files_get_no_loader() {
    let temp_dir = TempDir::new().unwrap();
    let data = temp_dir.path().join("raw");
    fs::create_dir_all(&data).unwrap();
    fs::write(data.join("empty.csv"), "").unwrap();
    fs::write(data.join("full.csv"), "a,b\n1,2\n").unwrap();

    let exploration = explore_files(&data, config()).await.unwrap();
    let code_file = temp_dir.path().join("code.txt");
    let loaders =
        write_loader_code(&exploration.files, CodeTarget::Pandas, true, &code_file, false)
            .unwrap();

    assert_eq!(loaders, 1);
    let code = fs::read_to_string(code_file).unwrap();
    assert!(code.contains("df_full"));
    assert!(!code.contains("df_empty"));
}
