use std::path::PathBuf;

use proforma_cli::config::parse_config;

#[test]
fn pre_versioned_config_renames_template() {
    let config = parse_config(r#"{"instances_dir": "/data/instances", "template": "/t/report.txt"}"#)
        .unwrap();

    assert_eq!(config.config_version, 1);
    assert_eq!(config.instances_dir, PathBuf::from("/data/instances"));
    assert_eq!(config.report_template, Some(PathBuf::from("/t/report.txt")));
}

#[test]
fn current_config_parses_unchanged() {
    let config = parse_config(
        r#"{"config_version": 1, "instances_dir": "/x", "report_template": "/t/a.html"}"#,
    )
    .unwrap();

    assert_eq!(config.report_template, Some(PathBuf::from("/t/a.html")));
    assert_eq!(config.styles, Default::default());
}

#[test]
fn newer_config_is_rejected() {
    let err = parse_config(r#"{"config_version": 99, "instances_dir": "/x"}"#).unwrap_err();
    assert!(err.to_string().contains("newer than this build supports"));
}

#[test]
fn non_object_config_is_rejected() {
    assert!(parse_config("[1, 2]").is_err());
}

#[test]
fn oversized_or_non_numeric_versions_are_rejected() {
    let err = parse_config(r#"{"config_version": 4294967297, "instances_dir": "/x"}"#).unwrap_err();
    assert!(err.to_string().contains("newer than this build supports"));

    let err = parse_config(r#"{"config_version": "1", "instances_dir": "/x"}"#).unwrap_err();
    assert!(err.to_string().contains("non-negative integer"));
}
