// src/version/strategy.rs

//! Segmented comparator strategies
//!
//! Every comparison entry point takes the comparator explicitly. For callers
//! that do not want to thread one through, a process default can be bound
//! once at start-up with [`bind_default`]; it cannot be replaced afterwards,
//! so concurrent comparisons always observe the same strategy.

use super::foreign;
use super::native::{self, NativeConfig};
use crate::config;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use tracing::debug;

/// Compares single version fragments (epoch, version or release text)
pub trait VersionComparator: Send + Sync {
    /// Compare two fragments, `Greater` meaning `a` is newer
    fn compare_segments(&self, a: &str, b: &str) -> Ordering;
}

impl<F> VersionComparator for F
where
    F: Fn(&str, &str) -> Ordering + Send + Sync,
{
    fn compare_segments(&self, a: &str, b: &str) -> Ordering {
        self(a, b)
    }
}

/// Which comparison grammar to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComparatorKind {
    /// Classic digit/alpha segment comparison
    #[default]
    Native,
    /// Tilde-aware comparison for the second ecosystem's grammar
    Foreign,
}

impl ComparatorKind {
    /// Get the configuration name for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Native => "native",
            Self::Foreign => "foreign",
        }
    }
}

impl fmt::Display for ComparatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A concrete comparator strategy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Comparator {
    Native(NativeConfig),
    Foreign,
}

impl Comparator {
    /// Native comparator with default tunables
    pub fn native() -> Self {
        Self::Native(NativeConfig::default())
    }

    /// Foreign (tilde-aware) comparator
    pub fn foreign() -> Self {
        Self::Foreign
    }

    /// Build a strategy from its kind, using `native` tunables when relevant
    pub fn from_kind(kind: ComparatorKind, native: &NativeConfig) -> Self {
        match kind {
            ComparatorKind::Native => Self::Native(native.clone()),
            ComparatorKind::Foreign => Self::Foreign,
        }
    }

    /// The kind of this strategy
    pub fn kind(&self) -> ComparatorKind {
        match self {
            Self::Native(_) => ComparatorKind::Native,
            Self::Foreign => ComparatorKind::Foreign,
        }
    }
}

impl Default for Comparator {
    fn default() -> Self {
        Self::native()
    }
}

impl VersionComparator for Comparator {
    fn compare_segments(&self, a: &str, b: &str) -> Ordering {
        match self {
            Self::Native(config) => native::compare_with(a, b, config),
            Self::Foreign => foreign::compare(a, b),
        }
    }
}

/// Bind the process-wide default comparator
///
/// Must happen before comparisons start. The default engine configuration
/// is frozen alongside, so this fails if a comparator or a configuration was
/// already bound, installed or observed through [`default_comparator`] or
/// [`config::global`](crate::config::global).
pub fn bind_default(comparator: Comparator) -> Result<()> {
    let state = config::freeze_comparator(comparator)?;
    debug!("Bound default version comparator: {}", state.comparator.kind());
    Ok(())
}

/// The process-wide default comparator
///
/// Returns the bound strategy. When nothing was bound yet, the comparator of
/// the default configuration (native) is bound on first read and stays in
/// place.
pub fn default_comparator() -> &'static Comparator {
    &config::process_state().comparator
}
