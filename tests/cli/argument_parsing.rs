//! CLI argument parsing tests

use clap::Parser;
use scansync::app::cli::args::{Args, Command};
use std::path::PathBuf;

fn parse(args: &[&str]) -> Args {
    Args::try_parse_from(args).unwrap()
}

#[test]
fn test_upload_with_scan_files() {
    let args = parse(&["scansync", "upload", "scan1.json", "scan2.jsonld"]);

    let Command::Upload(upload) = args.command else {
        panic!("expected upload subcommand");
    };
    assert_eq!(
        upload.scan_files,
        vec![PathBuf::from("scan1.json"), PathBuf::from("scan2.jsonld")]
    );
    assert!(upload.custom_field_file.is_none());
    assert!(!upload.keep_temp_files);
}

#[test]
fn test_upload_requires_scan_files() {
    assert!(Args::try_parse_from(["scansync", "upload"]).is_err());
}

#[test]
fn test_upload_short_flags() {
    let args = parse(&[
        "scansync",
        "upload",
        "scan.json",
        "-c",
        "fields.json",
        "-p",
        "demo2",
        "-v",
        "2.0",
        "-k",
    ]);

    let Command::Upload(upload) = args.command else {
        panic!("expected upload subcommand");
    };
    assert_eq!(
        upload.custom_field_file,
        Some(PathBuf::from("fields.json"))
    );
    assert_eq!(upload.project.as_deref(), Some("demo2"));
    assert_eq!(upload.version.as_deref(), Some("2.0"));
    assert!(upload.keep_temp_files);

    let overrides = upload.identifier_override();
    assert!(!overrides.is_empty());
    assert_eq!(overrides.project.as_deref(), Some("demo2"));
}

#[test]
fn test_upload_without_overrides_has_empty_override() {
    let args = parse(&["scansync", "upload", "scan.json"]);

    let Command::Upload(upload) = args.command else {
        panic!("expected upload subcommand");
    };
    assert!(upload.identifier_override().is_empty());
}

#[test]
fn test_global_flags_before_subcommand() {
    let args = parse(&[
        "scansync",
        "--log-level",
        "debug",
        "--base-url",
        "https://hub.example.com",
        "--timeout",
        "15",
        "upload",
        "scan.json",
    ]);

    assert_eq!(args.log_level.as_deref(), Some("debug"));
    assert_eq!(args.base_url.as_deref(), Some("https://hub.example.com"));
    assert_eq!(args.timeout, Some(15));
}

#[test]
fn test_global_flags_after_subcommand() {
    let args = parse(&["scansync", "upload", "scan.json", "--log-level", "debug"]);
    assert_eq!(args.log_level.as_deref(), Some("debug"));
}

#[test]
fn test_log_level_values_are_constrained() {
    assert!(Args::try_parse_from(["scansync", "--log-level", "loud", "upload", "scan.json"])
        .is_err());
}

#[test]
fn test_color_flags_conflict() {
    assert!(
        Args::try_parse_from(["scansync", "--color", "--no-color", "upload", "scan.json"])
            .is_err()
    );
}

#[test]
fn test_retry_flags() {
    let args = parse(&[
        "scansync",
        "upload",
        "scan.json",
        "--retry-attempts",
        "8",
        "--retry-delay",
        "2",
    ]);

    let Command::Upload(upload) = args.command else {
        panic!("expected upload subcommand");
    };
    assert_eq!(upload.retry_attempts, Some(8));
    assert_eq!(upload.retry_delay, Some(2));
}

#[test]
fn test_retry_attempts_rejects_zero() {
    assert!(Args::try_parse_from([
        "scansync",
        "upload",
        "scan.json",
        "--retry-attempts",
        "0"
    ])
    .is_err());
}

#[test]
fn test_create_fields_subcommand() {
    let args = parse(&["scansync", "create-fields"]);
    let Command::CreateFields(create) = args.command else {
        panic!("expected create-fields subcommand");
    };
    assert!(create.definitions_file.is_none());

    let args = parse(&["scansync", "create-fields", "-d", "defs.json"]);
    let Command::CreateFields(create) = args.command else {
        panic!("expected create-fields subcommand");
    };
    assert_eq!(create.definitions_file, Some(PathBuf::from("defs.json")));
}

#[test]
fn test_subcommand_is_required() {
    assert!(Args::try_parse_from(["scansync"]).is_err());
}
