// src/config.rs

//! Engine configuration
//!
//! All tunables of the comparison and classification engine live in one
//! TOML document:
//!
//! ```toml
//! comparator = "native"          # or "foreign"
//!
//! [native]
//! not_alpha = ".:-"
//! invert_digit_priority = false
//! suffix_wildcard = true
//!
//! [evr]
//! distance_tag = false
//! compare_distance = false
//!
//! [namespace]
//! arch_separator = "."
//! extra_arches = ["riscv64", "loongarch64"]
//!
//! [dependencies]
//! promote_epoch = false
//! ```
//!
//! Every field is optional. A configuration is installed once per process
//! with [`install`], before comparisons start, and is immutable afterwards.

use crate::dependencies::OverlapOptions;
use crate::error::{Error, Result};
use crate::namespace::NamespaceConfig;
use crate::version::strategy::{Comparator, ComparatorKind};
use crate::version::{EvrOptions, NativeConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;
use tracing::info;

/// Default location of the engine configuration file
pub const DEFAULT_CONFIG_PATH: &str = "/etc/rpmevr/engine.toml";

/// Complete engine configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Segmented comparator used by the process default
    pub comparator: ComparatorKind,

    /// Native comparator tunables
    pub native: NativeConfig,

    /// Version grammar and cascade options
    pub evr: EvrOptions,

    /// Namespace classifier tables
    pub namespace: NamespaceConfig,

    /// Dependency overlap behaviour
    pub dependencies: OverlapOptions,
}

impl EngineConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load from `path`, or from [`DEFAULT_CONFIG_PATH`] when it exists,
    /// falling back to the defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_PATH);
                if default.exists() {
                    Self::load(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Check values serde cannot reject on its own
    pub fn validate(&self) -> Result<()> {
        if let Some(c) = self
            .native
            .not_alpha
            .chars()
            .find(|c| !c.is_ascii_punctuation())
        {
            return Err(Error::InvalidConfig(format!(
                "native.not_alpha may only hold ASCII punctuation, found '{}'",
                c
            )));
        }

        let sep = self.namespace.arch_separator;
        if sep.is_alphanumeric() || sep.is_whitespace() {
            return Err(Error::InvalidConfig(format!(
                "namespace.arch_separator must be punctuation, found '{}'",
                sep
            )));
        }

        for arch in &self.namespace.extra_arches {
            if arch.is_empty() || arch.contains(sep) || arch.chars().any(char::is_whitespace) {
                return Err(Error::InvalidConfig(format!(
                    "namespace.extra_arches holds an unusable entry '{}'",
                    arch
                )));
            }
        }

        if self.evr.compare_distance && !self.evr.distance_tag {
            return Err(Error::InvalidConfig(
                "evr.compare_distance requires evr.distance_tag".to_string(),
            ));
        }

        Ok(())
    }

    /// Build the comparator strategy this configuration selects
    pub fn comparator(&self) -> Comparator {
        Comparator::from_kind(self.comparator, &self.native)
    }

    /// Overlap options with the configured version grammar filled in
    pub fn overlap_options(&self) -> OverlapOptions {
        OverlapOptions {
            grammar: self.evr,
            ..self.dependencies
        }
    }
}

/// Configuration and comparator, frozen together
#[derive(Debug)]
pub(crate) struct ProcessState {
    pub(crate) config: EngineConfig,
    pub(crate) comparator: Comparator,
}

static PROCESS_STATE: OnceLock<ProcessState> = OnceLock::new();

/// Freeze `config` as the process configuration
///
/// Also binds the process default comparator from it. Configuration and
/// comparator are frozen in one step, so fails when either is already in
/// place, including defaults fixed by an earlier read of [`global`] or of
/// the default comparator.
pub fn install(config: EngineConfig) -> Result<&'static EngineConfig> {
    config.validate()?;
    let comparator = config.comparator();
    let state = freeze(ProcessState { config, comparator }, "engine configuration")?;

    info!(
        "Installed engine configuration (comparator: {}, extra arches: {})",
        state.config.comparator,
        state.config.namespace.extra_arches.len()
    );
    Ok(&state.config)
}

/// Freeze the default configuration around an explicitly chosen comparator
pub(crate) fn freeze_comparator(comparator: Comparator) -> Result<&'static ProcessState> {
    let mut config = EngineConfig {
        comparator: comparator.kind(),
        ..EngineConfig::default()
    };
    if let Comparator::Native(native) = &comparator {
        config.native = native.clone();
    }
    freeze(ProcessState { config, comparator }, "default comparator")
}

fn freeze(state: ProcessState, what: &'static str) -> Result<&'static ProcessState> {
    PROCESS_STATE
        .set(state)
        .map_err(|_| Error::AlreadyBound(what))?;
    Ok(process_state())
}

/// The frozen process state, fixing the defaults on first read
pub(crate) fn process_state() -> &'static ProcessState {
    PROCESS_STATE.get_or_init(|| {
        let config = EngineConfig::default();
        let comparator = config.comparator();
        ProcessState { config, comparator }
    })
}

/// The process configuration
///
/// When nothing was installed, the defaults are fixed on first read.
pub fn global() -> &'static EngineConfig {
    &process_state().config
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::strategy;

    #[test]
    fn test_empty_document_is_default() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.comparator, ComparatorKind::Native);
        assert_eq!(config.native.not_alpha, ".:-");
        assert_eq!(config.namespace.arch_separator, '.');
        assert!(!config.dependencies.promote_epoch);
    }

    #[test]
    fn test_parse_full_document() {
        let toml = r#"
            comparator = "foreign"

            [native]
            not_alpha = ".:-_+"
            invert_digit_priority = true
            suffix_wildcard = false

            [evr]
            distance_tag = true
            compare_distance = true

            [namespace]
            arch_separator = "."
            extra_arches = ["riscv64"]

            [dependencies]
            promote_epoch = true
        "#;
        let config = EngineConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.comparator, ComparatorKind::Foreign);
        assert_eq!(config.native.not_alpha, ".:-_+");
        assert!(config.native.invert_digit_priority);
        assert!(!config.native.suffix_wildcard);
        assert!(config.evr.distance_tag);
        assert_eq!(config.namespace.extra_arches, vec!["riscv64".to_string()]);
        assert!(config.dependencies.promote_epoch);
        assert_eq!(config.comparator().kind(), ComparatorKind::Foreign);

        let overlap = config.overlap_options();
        assert!(overlap.promote_epoch);
        assert!(overlap.grammar.distance_tag);
        assert!(overlap.grammar.compare_distance);
    }

    #[test]
    fn test_partial_tables_keep_defaults() {
        let config = EngineConfig::from_toml_str("[native]\ninvert_digit_priority = true\n").unwrap();
        assert_eq!(config.native.not_alpha, ".:-");
        assert!(config.native.invert_digit_priority);
        assert!(config.native.suffix_wildcard);
    }

    #[test]
    fn test_unknown_comparator_rejected() {
        let err = EngineConfig::from_toml_str("comparator = \"semver\"").unwrap_err();
        assert!(matches!(err, Error::ConfigParseError(_)));
    }

    #[test]
    fn test_validate_not_alpha() {
        let err = EngineConfig::from_toml_str("[native]\nnot_alpha = \".a\"\n").unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
        assert!(err.to_string().contains("not_alpha"));
    }

    #[test]
    fn test_validate_arch_separator() {
        let err = EngineConfig::from_toml_str("[namespace]\narch_separator = \"x\"\n").unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_validate_extra_arches() {
        let err =
            EngineConfig::from_toml_str("[namespace]\nextra_arches = [\"risc.v\"]\n").unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
        let err = EngineConfig::from_toml_str("[namespace]\nextra_arches = [\"\"]\n").unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_validate_distance_options() {
        let err = EngineConfig::from_toml_str("[evr]\ncompare_distance = true\n").unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_install_after_first_read_fails() {
        // Reading either default freezes configuration and comparator together
        assert_eq!(strategy::default_comparator().kind(), ComparatorKind::Native);
        let foreign = EngineConfig::from_toml_str("comparator = \"foreign\"").unwrap();
        assert!(matches!(install(foreign), Err(Error::AlreadyBound(_))));
        assert_eq!(global().comparator, ComparatorKind::Native);
        assert_eq!(strategy::default_comparator().kind(), global().comparator);
    }

    #[test]
    fn test_load_missing_file() {
        let err = EngineConfig::load(Path::new("/nonexistent/rpmevr.toml")).unwrap_err();
        assert!(matches!(err, Error::IoError(_)));
    }
}
