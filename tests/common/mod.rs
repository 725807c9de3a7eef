// tests/common/mod.rs

//! Shared test utilities and helpers for integration tests.

use rpmevr::version::{evr, Comparator, VersionSpec};
use std::cmp::Ordering;
use std::path::PathBuf;
use tempfile::TempDir;

/// Compare two version strings with the native comparator
pub fn native_cmp(a: &str, b: &str) -> Ordering {
    evr::compare_with(&VersionSpec::parse(a), &VersionSpec::parse(b), &Comparator::native())
}

/// Compare two version strings with the tilde-aware comparator
pub fn foreign_cmp(a: &str, b: &str) -> Ordering {
    evr::compare_with(&VersionSpec::parse(a), &VersionSpec::parse(b), &Comparator::foreign())
}

/// Write `content` to an engine configuration file in a fresh directory.
///
/// Returns (TempDir, path) - keep the TempDir alive to prevent cleanup.
pub fn write_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("engine.toml");
    std::fs::write(&path, content).unwrap();
    (temp_dir, path)
}

/// Versions in ascending native order, taken from real distribution packages
pub const ASCENDING_NATIVE: &[&str] = &[
    "0.9-1",
    "1.0-1",
    "1.0-1.el8",
    "1.0-2",
    "1.0.1-1",
    "1.2-1",
    "1.10-1",
    "2.0-1",
    "1:0.1-1",
    "1:0.1-1.fc40",
    "2:0.0.1-1",
];
