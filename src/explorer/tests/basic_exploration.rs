//! Basic exploration tests

use super::create_sample_tree;
use crate::config::ExplorerConfig;
use crate::explorer::{FileExplorer, FileOutcome, describe_file, explore_files};
use crate::models::FileDescription;
use crate::separator::InferenceError;
use std::fs;
use tempfile::TempDir;

fn quiet_config() -> ExplorerConfig {
    ExplorerConfig::default().with_workers(2).without_progress()
}

fn find<'a>(files: &'a [FileDescription], name: &str) -> &'a FileDescription {
    files
        .iter()
        .find(|f| f.name == name)
        .unwrap_or_else(|| panic!("{} not explored", name))
}

#[tokio::test]
async fn test_explore_sample_tree() {
    let temp_dir = TempDir::new().unwrap();
    let root = create_sample_tree(&temp_dir);

    let exploration = explore_files(&root, quiet_config()).await.unwrap();
    let stats = &exploration.stats;

    assert_eq!(stats.files_discovered, 8);
    assert_eq!(stats.files_described, 7);
    assert_eq!(stats.files_skipped, 1);
    assert_eq!(stats.files_failed, 0);
    assert_eq!(stats.separator_fallbacks, 1);
    assert_eq!(exploration.files.len(), 7);
    assert!(!exploration.files.iter().any(|f| f.name == "README"));
}

#[tokio::test]
async fn test_inferred_separators() {
    let temp_dir = TempDir::new().unwrap();
    let root = create_sample_tree(&temp_dir);

    let exploration = explore_files(&root, quiet_config()).await.unwrap();
    let files = &exploration.files;

    assert_eq!(find(files, "iris").separator.as_deref(), Some("comma"));
    assert_eq!(
        find(files, "wine_quality").separator.as_deref(),
        Some("semi_colon")
    );
    assert_eq!(find(files, "cars").separator.as_deref(), Some("tab"));
    assert_eq!(find(files, "orders").separator.as_deref(), Some("pipe"));
    assert_eq!(find(files, "header_only").separator.as_deref(), Some("comma"));
}

#[tokio::test]
async fn test_file_metadata() {
    let temp_dir = TempDir::new().unwrap();
    let root = create_sample_tree(&temp_dir);

    let exploration = explore_files(&root, quiet_config()).await.unwrap();
    let files = &exploration.files;

    let iris = find(files, "iris");
    assert_eq!(iris.extension, ".csv");
    assert_eq!(iris.rows, Some(4));
    assert_eq!(iris.size, fs::metadata(root.join("iris.csv")).unwrap().len());
    assert!(iris.human_readable.ends_with(" B"));

    let json = find(files, "config");
    assert_eq!(json.extension, ".json");
    assert_eq!(json.rows, None);
    assert_eq!(json.separator, None);

    let workbook = find(files, "workbook");
    assert_eq!(workbook.size, 4);
    assert_eq!(workbook.human_readable, "4.0 B");
    assert_eq!(workbook.rows, None);

    assert_eq!(exploration.plain_files().count(), 5);
}

#[tokio::test]
async fn test_exploration_order_matches_discovery() {
    let temp_dir = TempDir::new().unwrap();
    let root = create_sample_tree(&temp_dir);

    let single_worker = explore_files(&root, quiet_config().with_workers(1))
        .await
        .unwrap();
    let many_workers = explore_files(&root, quiet_config().with_workers(8))
        .await
        .unwrap();

    assert_eq!(single_worker.files, many_workers.files);
}

#[tokio::test]
async fn test_explore_single_file() {
    let temp_dir = TempDir::new().unwrap();
    let root = create_sample_tree(&temp_dir);

    let mut explorer = FileExplorer::new(root.join("cars.tab"))
        .unwrap()
        .with_config(quiet_config());
    let exploration = explorer.explore().await.unwrap();

    assert_eq!(exploration.files.len(), 1);
    assert_eq!(exploration.files[0].name, "cars");
    assert_eq!(exploration.files[0].rows, Some(3));
}

#[tokio::test]
async fn test_explore_without_header() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("single_row.csv");
    fs::write(&file, "1,2,3\n").unwrap();

    let with_header = explore_files(&file, quiet_config()).await.unwrap();
    assert_eq!(with_header.stats.separator_fallbacks, 1);

    let without_header = explore_files(&file, quiet_config().with_header(false))
        .await
        .unwrap();
    assert_eq!(without_header.stats.separator_fallbacks, 0);
    assert_eq!(without_header.files[0].separator.as_deref(), Some("comma"));
}

#[test]
fn test_describe_file_outcomes() {
    let temp_dir = TempDir::new().unwrap();
    let root = create_sample_tree(&temp_dir);

    assert_eq!(
        describe_file(&root.join("README.md"), true).unwrap(),
        FileOutcome::Skipped
    );

    match describe_file(&root.join("header_only.txt"), true).unwrap() {
        FileOutcome::Described {
            description,
            fallback,
        } => {
            assert_eq!(description.rows, Some(1));
            assert_eq!(description.separator.as_deref(), Some("comma"));
            assert_eq!(fallback, Some(InferenceError::EmptySample));
        }
        FileOutcome::Skipped => panic!("Expected header_only.txt to be described"),
    }
}

#[test]
fn test_describe_uppercase_extension() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("EXPORT.CSV");
    fs::write(&file, "a|b\n1|2\n").unwrap();

    match describe_file(&file, true).unwrap() {
        FileOutcome::Described { description, .. } => {
            assert_eq!(description.extension, ".csv");
            assert_eq!(description.separator.as_deref(), Some("pipe"));
        }
        FileOutcome::Skipped => panic!("Expected EXPORT.CSV to be described"),
    }
}
