// src/version/mod.rs

//! Epoch:version-release values and their comparison
//!
//! This module provides the parsed version container, the two segmented
//! comparators, the strategy that selects between them, and the EVR cascade
//! built on top.
//!
//! Format: `[epoch:]version[-release]`, optionally followed by `:distance`
//! when the distance-tag grammar is enabled.
//! Examples:
//! - `"1.2.3"` → epoch absent, version `1.2.3`, release absent
//! - `"2:1.2.3"` → epoch 2, version `1.2.3`, release absent
//! - `"1.2.3-4.el8"` → epoch absent, version `1.2.3`, release `4.el8`
//! - `":1.0-1"` → epoch 0 (empty epoch text), version `1.0`, release `1`
//!
//! Parsing is permissive: every input produces a value. Use
//! [`VersionSpec::parse_strict`] to reject malformed text instead.

pub mod evr;
pub mod foreign;
pub mod native;
pub mod stats;
pub mod strategy;

pub use evr::{EvrOptions, PackageEvr};
pub use native::NativeConfig;
pub use stats::{EvrCollector, EvrDictionary, ParseStats, StatsFilter};
pub use strategy::{Comparator, ComparatorKind, VersionComparator};

use crate::error::{Error, Result};
use std::cmp::Ordering;
use std::fmt;
use std::ops::Range;
use std::str::FromStr;
use tracing::debug;

/// Epoch text used when the epoch is present but empty, and when comparing
/// against a value whose epoch is absent
pub const DEFAULT_EPOCH: &str = "0";

/// A parsed `[epoch:]version[-release]` value
///
/// The fields are byte ranges into one owned copy of the input; the input is
/// never rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionSpec {
    raw: String,
    epoch: Option<u64>,
    epoch_span: Option<Range<usize>>,
    version: Range<usize>,
    release: Option<Range<usize>>,
    distance: Option<Range<usize>>,
}

impl VersionSpec {
    /// Parse a version string; never fails
    pub fn parse(s: &str) -> Self {
        Self::parse_with(s, &EvrOptions::default())
    }

    /// Parse a version string with grammar options; never fails
    pub fn parse_with(s: &str, options: &EvrOptions) -> Self {
        let bytes = s.as_bytes();
        let digits = bytes.iter().take_while(|c| c.is_ascii_digit()).count();

        let (epoch, epoch_span, start) = if bytes.get(digits) == Some(&b':') {
            let span = (digits > 0).then_some(0..digits);
            (Some(parse_epoch(&s[..digits])), span, digits + 1)
        } else {
            (None, None, 0)
        };

        let mut end = s.len();
        let distance = if options.distance_tag {
            s[start..].rfind(':').map(|pos| {
                end = start + pos;
                end + 1..s.len()
            })
        } else {
            None
        };

        let (version, release) = match s[start..end].rfind('-') {
            Some(pos) => (start..start + pos, Some(start + pos + 1..end)),
            None => (start..end, None),
        };

        Self {
            raw: s.to_string(),
            epoch,
            epoch_span,
            version,
            release,
            distance,
        }
    }

    /// Parse a version string, rejecting malformed input
    ///
    /// Rejects empty input, whitespace, an empty epoch before `:`, an empty
    /// version, an empty release after `-`, and stray `:` characters.
    pub fn parse_strict(s: &str) -> Result<Self> {
        Self::parse_strict_with(s, &EvrOptions::default())
    }

    /// Strict parsing with grammar options
    pub fn parse_strict_with(s: &str, options: &EvrOptions) -> Result<Self> {
        let reject = |reason: &str| {
            debug!("Rejecting version '{}': {}", s, reason);
            Err(Error::MalformedVersion {
                input: s.to_string(),
                reason: reason.to_string(),
            })
        };

        if s.is_empty() {
            return reject("empty input");
        }
        if s.chars().any(char::is_whitespace) {
            return reject("contains whitespace");
        }

        let spec = Self::parse_with(s, options);

        if spec.epoch.is_some() && spec.epoch_span.is_none() {
            return reject("empty epoch before ':'");
        }
        if spec.version().is_empty() {
            return reject("empty version");
        }
        if spec.version().contains(':') || spec.release().is_some_and(|r| r.contains(':')) {
            return reject("unexpected ':' outside the epoch");
        }
        if spec.release() == Some("") {
            return reject("empty release after '-'");
        }
        if spec.distance_tag() == Some("") {
            return reject("empty distance tag after ':'");
        }

        Ok(spec)
    }

    /// The original, unmodified text
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Numeric epoch, `None` when the input had no epoch at all
    ///
    /// Epoch values saturate at `u64::MAX`.
    pub fn epoch(&self) -> Option<u64> {
        self.epoch
    }

    /// Epoch text, `"0"` for an empty epoch, `None` when absent
    pub fn epoch_str(&self) -> Option<&str> {
        self.epoch?;
        Some(match &self.epoch_span {
            Some(span) => &self.raw[span.clone()],
            None => DEFAULT_EPOCH,
        })
    }

    /// Version text
    pub fn version(&self) -> &str {
        &self.raw[self.version.clone()]
    }

    /// Release text, `None` when the input had no `-`
    pub fn release(&self) -> Option<&str> {
        self.release.clone().map(|span| &self.raw[span])
    }

    /// Distance tag, only populated with the distance-tag grammar
    pub fn distance_tag(&self) -> Option<&str> {
        self.distance.clone().map(|span| &self.raw[span])
    }

    /// Compare using the process default comparator and configuration
    pub fn compare(&self, other: &VersionSpec) -> Ordering {
        evr::compare(self, other)
    }

    /// Compare using an explicit comparator
    pub fn compare_using(&self, other: &VersionSpec, comparator: &dyn VersionComparator) -> Ordering {
        evr::compare_with(self, other, comparator)
    }

    /// Is this version strictly newer than `other` under the process default?
    pub fn is_newer_than(&self, other: &VersionSpec) -> bool {
        self.compare(other) == Ordering::Greater
    }
}

/// Parse leading epoch digits, saturating on overflow
fn parse_epoch(digits: &str) -> u64 {
    digits.bytes().fold(0u64, |acc, c| {
        acc.saturating_mul(10).saturating_add(u64::from(c - b'0'))
    })
}

impl From<&str> for VersionSpec {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl FromStr for VersionSpec {
    type Err = Error;

    /// Strict parsing; use [`VersionSpec::parse`] for the permissive form
    fn from_str(s: &str) -> Result<Self> {
        Self::parse_strict(s)
    }
}

impl fmt::Display for VersionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(epoch) = self.epoch_str() {
            write!(f, "{}:", epoch)?;
        }
        write!(f, "{}", self.version())?;
        if let Some(release) = self.release() {
            write!(f, "-{}", release)?;
        }
        if let Some(distance) = self.distance_tag() {
            write!(f, ":{}", distance)?;
        }
        Ok(())
    }
}
