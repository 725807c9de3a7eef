// src/version/evr.rs

//! Epoch → version → release comparison cascade
//!
//! Each stage uses the segmented comparator supplied by the caller; the first
//! stage that differs decides. Epochs compare numerically when both values
//! carry one. When only one side does, the epoch texts are compared
//! segment-wise with the absent side standing in as `"0"`. A missing release
//! compares as the empty string.

use super::strategy::{default_comparator, VersionComparator};
use super::{VersionSpec, DEFAULT_EPOCH};
use crate::config;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Grammar and cascade options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EvrOptions {
    /// Parse a trailing `:distance` segment after the release
    #[serde(default)]
    pub distance_tag: bool,

    /// Compare distance tags after the release when both sides have one
    #[serde(default)]
    pub compare_distance: bool,
}

/// Compare two parsed values with an explicit comparator
pub fn compare_with(a: &VersionSpec, b: &VersionSpec, comparator: &dyn VersionComparator) -> Ordering {
    compare_with_options(a, b, comparator, &EvrOptions::default())
}

/// Compare two parsed values with an explicit comparator and options
pub fn compare_with_options(
    a: &VersionSpec,
    b: &VersionSpec,
    comparator: &dyn VersionComparator,
    options: &EvrOptions,
) -> Ordering {
    compare_epochs(a, b, comparator)
        .then_with(|| comparator.compare_segments(a.version(), b.version()))
        .then_with(|| {
            comparator.compare_segments(a.release().unwrap_or(""), b.release().unwrap_or(""))
        })
        .then_with(|| {
            match (options.compare_distance, a.distance_tag(), b.distance_tag()) {
                (true, Some(da), Some(db)) => comparator.compare_segments(da, db),
                _ => Ordering::Equal,
            }
        })
}

fn compare_epochs(a: &VersionSpec, b: &VersionSpec, comparator: &dyn VersionComparator) -> Ordering {
    match (a.epoch(), b.epoch()) {
        (Some(ea), Some(eb)) => ea.cmp(&eb),
        (None, None) => Ordering::Equal,
        _ => comparator.compare_segments(
            a.epoch_str().unwrap_or(DEFAULT_EPOCH),
            b.epoch_str().unwrap_or(DEFAULT_EPOCH),
        ),
    }
}

/// Compare with the process default comparator and configured options
pub fn compare(a: &VersionSpec, b: &VersionSpec) -> Ordering {
    compare_with_options(a, b, default_comparator(), &config::global().evr)
}

/// Parse both strings permissively and compare them
pub fn compare_str(a: &str, b: &str, comparator: &dyn VersionComparator) -> Ordering {
    let options = config::global().evr;
    compare_with_options(
        &VersionSpec::parse_with(a, &options),
        &VersionSpec::parse_with(b, &options),
        comparator,
        &options,
    )
}

/// Map an ordering to the conventional -1 / 0 / 1
pub fn to_sign(ordering: Ordering) -> i32 {
    match ordering {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    }
}

/// EVR fields as stored in a package header
///
/// Unlike [`VersionSpec`], a header without an epoch tag means epoch zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PackageEvr<'a> {
    pub epoch: Option<u32>,
    pub version: &'a str,
    pub release: &'a str,
    pub distance: Option<&'a str>,
}

impl<'a> PackageEvr<'a> {
    /// Build from a parsed value, borrowing its fields
    ///
    /// Epochs above `u32::MAX` clamp, as the header field is 32 bits wide.
    pub fn from_spec(spec: &'a VersionSpec) -> Self {
        Self {
            epoch: spec.epoch().map(|e| u32::try_from(e).unwrap_or(u32::MAX)),
            version: spec.version(),
            release: spec.release().unwrap_or(""),
            distance: spec.distance_tag(),
        }
    }
}

/// Compare two installed or candidate packages by their header EVR
///
/// Epochs compare numerically with a missing epoch treated as zero. The
/// distance stage treats a missing tag as empty.
pub fn compare_packages(
    a: &PackageEvr<'_>,
    b: &PackageEvr<'_>,
    comparator: &dyn VersionComparator,
    options: &EvrOptions,
) -> Ordering {
    a.epoch
        .unwrap_or(0)
        .cmp(&b.epoch.unwrap_or(0))
        .then_with(|| comparator.compare_segments(a.version, b.version))
        .then_with(|| comparator.compare_segments(a.release, b.release))
        .then_with(|| {
            if options.compare_distance {
                comparator.compare_segments(a.distance.unwrap_or(""), b.distance.unwrap_or(""))
            } else {
                Ordering::Equal
            }
        })
}
