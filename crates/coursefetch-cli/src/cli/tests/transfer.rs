//! Tests for prefetch and download.

use super::parse;
use crate::cli::CliCommand;
use std::path::Path;

#[test]
fn cli_parse_prefetch() {
    match parse(&["coursefetch", "prefetch", "m.json"]) {
        CliCommand::Prefetch { module, single } => {
            assert_eq!(module, Path::new("m.json"));
            assert!(!single);
        }
        _ => panic!("expected Prefetch"),
    }
}

#[test]
fn cli_parse_prefetch_single() {
    match parse(&["coursefetch", "prefetch", "m.json", "--single"]) {
        CliCommand::Prefetch { single, .. } => assert!(single),
        _ => panic!("expected Prefetch with --single"),
    }
}

#[test]
fn cli_parse_download_dir_path() {
    match parse(&["coursefetch", "download", "m.json", "--dir-path", "pkg/7"]) {
        CliCommand::Download { module, dir_path } => {
            assert_eq!(module, Path::new("m.json"));
            assert_eq!(dir_path.as_deref(), Some("pkg/7"));
        }
        _ => panic!("expected Download with --dir-path"),
    }
}

#[test]
fn cli_parse_download_without_dir_path() {
    match parse(&["coursefetch", "download", "m.json"]) {
        CliCommand::Download { dir_path, .. } => assert!(dir_path.is_none()),
        _ => panic!("expected Download"),
    }
}
