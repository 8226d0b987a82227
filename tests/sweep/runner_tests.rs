// Tests for the end-to-end runner: list loading, config, both modes

use namesweep::sweep::{run, Config, MemoryReporter, SweepError, WalkMode};
use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::{asset_fixture, write_file};

fn config_for(dir: &Path, mode: WalkMode) -> Config {
    Config {
        list_file: dir.join("files_to_delete.txt"),
        root: dir.join("assets"),
        mode,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_run_async_from_list_file() {
    let dir = tempfile::tempdir().unwrap();
    asset_fixture(dir.path());
    write_file(dir.path(), "files_to_delete.txt", b"old-logo.png\r\n\r\nbanner.jpg\r\n");

    let reporter = Arc::new(MemoryReporter::new());
    let report = run(&config_for(dir.path(), WalkMode::Async), reporter.clone())
        .await
        .unwrap();

    assert_eq!(report.files_deleted(), 2);
    assert_eq!(reporter.deletion_lines().len(), 2);
    assert!(dir.path().join("assets/keep.png").exists());
}

#[tokio::test]
async fn test_run_threaded_from_list_file() {
    let dir = tempfile::tempdir().unwrap();
    asset_fixture(dir.path());
    write_file(dir.path(), "files_to_delete.txt", b"old-logo.png\nbanner.jpg\n");

    let reporter = Arc::new(MemoryReporter::new());
    let report = run(&config_for(dir.path(), WalkMode::Threaded), reporter.clone())
        .await
        .unwrap();

    assert_eq!(report.files_deleted(), 2);
    assert!(!dir.path().join("assets/old-logo.png").exists());
    assert!(dir.path().join("assets/keep.png").exists());
}

#[tokio::test]
async fn test_missing_list_file_deletes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    asset_fixture(dir.path());

    let reporter = Arc::new(MemoryReporter::new());
    let result = run(&config_for(dir.path(), WalkMode::Async), reporter.clone()).await;

    match result {
        Err(SweepError::ListFileNotFound { path }) => {
            assert!(path.ends_with("files_to_delete.txt"));
        }
        other => panic!("Expected ListFileNotFound, got {:?}", other.map(|r| r.files_deleted())),
    }
    assert!(reporter.lines().is_empty());
    assert!(dir.path().join("assets/old-logo.png").exists());
    assert!(dir.path().join("assets/sub/banner.jpg").exists());
}

#[tokio::test]
async fn test_invalid_config_rejected_before_walk() {
    let dir = tempfile::tempdir().unwrap();
    asset_fixture(dir.path());
    write_file(dir.path(), "files_to_delete.txt", b"keep.png\n");

    let config = Config {
        max_in_flight: 0,
        ..config_for(dir.path(), WalkMode::Async)
    };
    let result = run(&config, Arc::new(MemoryReporter::new())).await;

    assert!(matches!(result, Err(SweepError::InvalidConfig { .. })));
    assert!(dir.path().join("assets/keep.png").exists());
}

#[tokio::test]
async fn test_run_with_toml_config() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "site/public/image/a/stale.webp", b"stale");
    write_file(dir.path(), "site/public/image/fresh.webp", b"fresh");
    write_file(dir.path(), "site/list.txt", b"stale.webp\n");

    let config_path = dir.path().join("namesweep.toml");
    let toml = format!(
        "list_file = {:?}\nroot = {:?}\nmode = \"threaded\"\nquiet = true\n",
        dir.path().join("site/list.txt").to_string_lossy(),
        dir.path().join("site/public/image").to_string_lossy(),
    );
    fs::write(&config_path, toml).unwrap();

    let config = Config::load(Some(&config_path)).unwrap();
    assert_eq!(config.mode, WalkMode::Threaded);
    assert!(config.quiet);

    let report = run(&config, Arc::new(MemoryReporter::new())).await.unwrap();

    assert_eq!(report.files_deleted(), 1);
    assert!(!dir.path().join("site/public/image/a/stale.webp").exists());
    assert!(dir.path().join("site/public/image/fresh.webp").exists());
}
