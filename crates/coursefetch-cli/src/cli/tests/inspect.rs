//! Tests for files, size, fingerprint, events and components.

use super::{parse, parse_cli, try_parse};
use crate::cli::CliCommand;
use std::path::Path;

#[test]
fn cli_parse_files() {
    match parse(&["coursefetch", "files", "module.json"]) {
        CliCommand::Files { module } => assert_eq!(module, Path::new("module.json")),
        _ => panic!("expected Files"),
    }
}

#[test]
fn cli_parse_size_with_global_options() {
    let cli = parse_cli(&[
        "coursefetch",
        "size",
        "m.json",
        "--course",
        "12",
        "--component",
        "mod_book",
    ]);
    assert_eq!(cli.course, 12);
    assert_eq!(cli.component.as_deref(), Some("mod_book"));
    match cli.command {
        CliCommand::Size { module } => assert_eq!(module, Path::new("m.json")),
        _ => panic!("expected Size"),
    }
}

#[test]
fn cli_defaults_course_and_component() {
    let cli = parse_cli(&["coursefetch", "fingerprint", "m.json"]);
    assert_eq!(cli.course, 0);
    assert!(cli.component.is_none());
    assert!(matches!(cli.command, CliCommand::Fingerprint { .. }));
}

#[test]
fn cli_parse_events() {
    match parse(&["coursefetch", "events", "/tmp/m.json"]) {
        CliCommand::Events { module } => assert_eq!(module, Path::new("/tmp/m.json")),
        _ => panic!("expected Events"),
    }
}

#[test]
fn cli_parse_components() {
    assert!(matches!(
        parse(&["coursefetch", "components"]),
        CliCommand::Components
    ));
}

#[test]
fn cli_rejects_missing_module_path() {
    assert!(try_parse(&["coursefetch", "files"]).is_err());
}
