use crate::analysis::discover::{discover, resolve_glob};
use crate::analysis::error::AnalyzeError;
use crate::analysis::reader::*;
use crate::analysis::types::RunStamp;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn stamp(raw: &str) -> RunStamp {
    RunStamp::parse(raw).unwrap()
}

#[test]
fn discover_returns_sorted_files_only() {
    // Arrange
    let dir = tempdir().unwrap();
    let root = dir.path();

    fs::write(root.join("client2-remote-20260215-112804.log"), "").unwrap();
    fs::write(root.join("client1-remote-20260215-112804.log"), "").unwrap();
    fs::write(root.join("client1-remote-20260101-000000.log"), "").unwrap();
    fs::create_dir(root.join("client9-remote-20260215-112804.log")).unwrap();

    // Act
    let result = discover(root, "client*-remote-20260215-112804.log").unwrap();

    // Assert
    assert_eq!(
        result,
        vec![
            root.join("client1-remote-20260215-112804.log"),
            root.join("client2-remote-20260215-112804.log"),
        ]
    );
}

#[test]
fn discover_returns_error_for_invalid_glob() {
    let dir = tempdir().unwrap();

    let err = discover(dir.path(), "[").unwrap_err();

    match err {
        AnalyzeError::Glob { pattern, .. } => assert!(pattern.ends_with('[')),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn resolve_glob_joins_root_and_pattern() {
    let resolved = resolve_glob(Path::new("/tmp/logs"), "client*-remote-x.log");

    assert_eq!(resolved, "/tmp/logs/client*-remote-x.log");
}

#[test]
fn resolve_glob_escapes_metacharacters_in_root() {
    let resolved = resolve_glob(Path::new("/tmp/run[1]"), "*.log");

    assert_eq!(resolved, "/tmp/run[[]1[]]/*.log");
}

#[test]
fn run_stamp_requires_date_and_time() {
    assert!(RunStamp::parse("20260215-112804").is_ok());

    for raw in ["2026-02-15", "20260215112804", "20260215-11280", "latest", ""] {
        assert!(
            matches!(RunStamp::parse(raw), Err(AnalyzeError::InvalidStamp { .. })),
            "stamp {raw:?}"
        );
    }
}

#[test]
fn list_stamps_reads_server_stdout_names_only() {
    // Arrange
    let dir = tempdir().unwrap();
    let root = dir.path();

    fs::write(root.join("server-20260215-112804.stdout.log"), "").unwrap();
    fs::write(root.join("server-20260101-090000.stdout.log"), "").unwrap();
    fs::write(root.join("server-remote-20270101-000000.log"), "").unwrap();
    fs::write(root.join("client1-remote-20280101-000000.log"), "").unwrap();
    fs::write(root.join("server-latest.stdout.log"), "").unwrap();

    // Act
    let stamps = list_stamps(root).unwrap();

    // Assert
    assert_eq!(
        stamps,
        vec![stamp("20260101-090000"), stamp("20260215-112804")]
    );
}

#[test]
fn latest_stamp_is_the_greatest() {
    let dir = tempdir().unwrap();
    let root = dir.path();

    fs::write(root.join("server-20251231-235959.stdout.log"), "").unwrap();
    fs::write(root.join("server-20260102-000001.stdout.log"), "").unwrap();
    fs::write(root.join("server-20260102-000000.stdout.log"), "").unwrap();

    assert_eq!(
        find_latest_stamp(root).unwrap(),
        Some(stamp("20260102-000001"))
    );
}

#[test]
fn resolve_run_without_stamp_uses_latest() {
    // Arrange
    let dir = tempdir().unwrap();
    let root = dir.path();

    fs::write(root.join("server-20260101-000000.stdout.log"), "").unwrap();
    fs::write(root.join("server-20260215-112804.stdout.log"), "").unwrap();
    fs::write(root.join("client1-remote-20260215-112804.log"), "").unwrap();
    fs::write(root.join("client1-remote-20260101-000000.log"), "").unwrap();

    // Act
    let files = resolve_run(root, None).unwrap();

    // Assert
    assert_eq!(
        files,
        RunFiles {
            stamp: stamp("20260215-112804"),
            server_stdout: root.join("server-20260215-112804.stdout.log"),
            server_remote: root.join("server-remote-20260215-112804.log"),
            client_remotes: vec![root.join("client1-remote-20260215-112804.log")],
        }
    );
}

#[test]
fn resolve_run_with_explicit_stamp_does_not_need_server_logs() {
    let dir = tempdir().unwrap();

    let files = resolve_run(dir.path(), Some(stamp("20260215-112804"))).unwrap();

    assert_eq!(files.stamp, stamp("20260215-112804"));
    assert!(files.client_remotes.is_empty());
}

#[test]
fn resolve_run_fails_for_missing_directory() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope");

    let err = resolve_run(&missing, None).unwrap_err();

    assert!(matches!(err, AnalyzeError::LogsDirNotFound { path } if path == missing));
}

#[test]
fn resolve_run_fails_without_any_stamp() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("client1-remote-20260215-112804.log"), "").unwrap();

    let err = resolve_run(dir.path(), None).unwrap_err();

    assert!(matches!(err, AnalyzeError::NoRunStamp { .. }));
}

#[test]
fn read_text_of_missing_file_is_empty() {
    let dir = tempdir().unwrap();

    assert_eq!(read_text(&dir.path().join("absent.log")), "");
}

#[test]
fn read_text_replaces_invalid_utf8() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("noisy.log");
    fs::write(&path, b"ok \xff\xfe line\n").unwrap();

    let text = read_text(&path);

    assert!(text.starts_with("ok "));
    assert!(text.ends_with(" line\n"));
}
