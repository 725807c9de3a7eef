// src/lib.rs

//! Version comparison and dependency classification for RPM-style packages
//!
//! Decides whether an installed or candidate package satisfies a
//! Provides/Requires constraint, and what kind of thing a dependency name
//! refers to.
//!
//! # Architecture
//!
//! - Versions: `[epoch:]version[-release]` parsed into byte ranges over one
//!   owned string, compared epoch first, then version, then release
//! - Comparators: two segmented grammars (native and tilde-aware foreign)
//!   behind one trait, passed explicitly or bound once per process
//! - Sense flags: relational operator and usage context in one bitset
//! - Namespaces: dependency names classified by shape into a closed set of
//!   kinds, with keyword, name and architecture extracted
//! - Dependencies: pairwise range overlap between a Provides and a Requires
//!
//! # Example
//!
//! ```
//! use rpmevr::version::{Comparator, VersionSpec};
//! use std::cmp::Ordering;
//!
//! let installed = VersionSpec::parse("1:2.0.1-3.el9");
//! let candidate = VersionSpec::parse("1:2.0.10-1.el9");
//! assert_eq!(candidate.compare_using(&installed, &Comparator::native()), Ordering::Greater);
//! ```

pub mod config;
pub mod dependencies;
mod error;
pub mod namespace;
pub mod sense;
pub mod version;

pub use config::{EngineConfig, DEFAULT_CONFIG_PATH};
pub use dependencies::{overlaps, Dependency, OverlapOptions};
pub use error::{Error, Result};
pub use namespace::{classify, Classifier, NamespaceConfig, NamespaceKind, NamespaceRecord};
pub use sense::{decode_operator, SenseFlags};
pub use version::{
    Comparator, ComparatorKind, EvrOptions, NativeConfig, VersionComparator, VersionSpec,
};
