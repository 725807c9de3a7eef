// tests/config.rs

//! Integration tests for engine configuration loading and installation.
//!
//! Installation freezes process-wide state, so exactly one test in this
//! binary installs a configuration and no other test reads the process
//! defaults.

mod common;

use common::write_config;
use rpmevr::config::{self, EngineConfig};
use rpmevr::namespace::{self, NamespaceKind};
use rpmevr::version::{evr, strategy, ComparatorKind, VersionSpec};
use rpmevr::Error;
use std::cmp::Ordering;

// =============================================================================
// Loading
// =============================================================================

#[test]
fn test_load_from_file() {
    let (_temp_dir, path) = write_config(
        r#"
comparator = "foreign"

[namespace]
extra_arches = ["loongarch64"]
"#,
    );

    let config = EngineConfig::load(&path).unwrap();
    assert_eq!(config.comparator, ComparatorKind::Foreign);
    assert_eq!(config.namespace.extra_arches, vec!["loongarch64".to_string()]);
    assert_eq!(config.native.not_alpha, ".:-");
}

#[test]
fn test_load_or_default_with_explicit_path() {
    let (_temp_dir, path) = write_config("[dependencies]\npromote_epoch = true\n");
    let config = EngineConfig::load_or_default(Some(&path)).unwrap();
    assert!(config.dependencies.promote_epoch);
}

#[test]
fn test_load_invalid_toml() {
    let (_temp_dir, path) = write_config("comparator = [");
    let err = EngineConfig::load(&path).unwrap_err();
    assert!(matches!(err, Error::ConfigParseError(_)));
}

#[test]
fn test_load_invalid_value() {
    let (_temp_dir, path) = write_config("[native]\nnot_alpha = \"0.\"\n");
    let err = EngineConfig::load(&path).unwrap_err();
    assert!(matches!(err, Error::InvalidConfig(_)));
}

#[test]
fn test_load_missing_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let err = EngineConfig::load(&temp_dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, Error::IoError(_)));
}

#[test]
fn test_comparator_from_config() {
    let config = EngineConfig::from_toml_str(
        "comparator = \"native\"\n[native]\ninvert_digit_priority = true\n",
    )
    .unwrap();
    let comparator = config.comparator();
    let a = VersionSpec::parse("1.a");
    let b = VersionSpec::parse("1.1");
    assert_eq!(evr::compare_with(&a, &b, &comparator), Ordering::Less);
}

// =============================================================================
// Installation (the only test touching process defaults)
// =============================================================================

#[test]
fn test_install_freezes_configuration() {
    let (_temp_dir, path) = write_config(
        r#"
comparator = "foreign"

[evr]
distance_tag = true
compare_distance = true

[namespace]
extra_arches = ["riscv64"]
"#,
    );

    let installed = config::install(EngineConfig::load(&path).unwrap()).unwrap();
    assert_eq!(installed.comparator, ComparatorKind::Foreign);
    assert_eq!(config::global(), installed);
    assert_eq!(strategy::default_comparator().kind(), ComparatorKind::Foreign);

    // Process-default comparison follows the installed strategy
    let rc = VersionSpec::parse("1.0~rc1");
    let release = VersionSpec::parse("1.0");
    assert_eq!(rc.compare(&release), Ordering::Less);

    // ...and the installed grammar
    assert_eq!(
        evr::compare_str("1.0-1:2024.1", "1.0-1:2023.4", strategy::default_comparator()),
        Ordering::Greater
    );

    // ...and the installed arch table
    assert_eq!(namespace::classify("zlib.riscv64").kind, NamespaceKind::Arch);

    // Frozen: a second install fails and changes nothing
    let err = config::install(EngineConfig::default()).unwrap_err();
    assert!(matches!(err, Error::AlreadyBound(_)));
    assert_eq!(config::global().comparator, ComparatorKind::Foreign);
}
