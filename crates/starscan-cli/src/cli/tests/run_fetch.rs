//! Tests for the run and fetch subcommands.

use super::parse;
use crate::cli::CliCommand;
use std::path::Path;

#[test]
fn cli_parse_run_defaults() {
    match parse(&["starscan", "run"]) {
        CliCommand::Run {
            count,
            download_dir,
            processed_dir,
            workers,
        } => {
            assert!(count.is_none());
            assert!(download_dir.is_none());
            assert!(processed_dir.is_none());
            assert!(workers.is_none());
        }
        _ => panic!("expected Run"),
    }
}

#[test]
fn cli_parse_run_overrides() {
    match parse(&[
        "starscan",
        "run",
        "--count",
        "3",
        "--download-dir",
        "/tmp/raw",
        "--processed-dir",
        "/tmp/out",
        "--workers",
        "2",
    ]) {
        CliCommand::Run {
            count,
            download_dir,
            processed_dir,
            workers,
        } => {
            assert_eq!(count, Some(3));
            assert_eq!(download_dir.as_deref(), Some(Path::new("/tmp/raw")));
            assert_eq!(processed_dir.as_deref(), Some(Path::new("/tmp/out")));
            assert_eq!(workers, Some(2));
        }
        _ => panic!("expected Run with overrides"),
    }
}

#[test]
fn cli_parse_fetch() {
    match parse(&["starscan", "fetch"]) {
        CliCommand::Fetch { count } => assert!(count.is_none()),
        _ => panic!("expected Fetch"),
    }
}

#[test]
fn cli_parse_fetch_count() {
    match parse(&["starscan", "fetch", "--count", "5"]) {
        CliCommand::Fetch { count } => assert_eq!(count, Some(5)),
        _ => panic!("expected Fetch with --count"),
    }
}
