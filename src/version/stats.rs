// src/version/stats.rs

//! Bulk parse statistics over version strings
//!
//! Feeds a corpus of `[E:]V[-R]` strings through the permissive parser,
//! counting how often fields are missing, and collects the distinct epoch,
//! version and release texts into a dictionary that can be listed in
//! comparator order. Useful for checking how a real repository's version
//! strings exercise the comparator.

use super::strategy::VersionComparator;
use super::{EvrOptions, VersionSpec, DEFAULT_EPOCH};
use std::collections::HashMap;
use std::fmt;

/// Which inputs to skip instead of parsing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsFilter {
    /// Skip absolute file paths
    pub skip_paths: bool,
    /// Skip 32/40 character hex strings (MD5/SHA1 digests)
    pub skip_kernel_digests: bool,
    /// Skip 27 character `hex:hex-hex` strings used by OCaml packaging
    pub skip_ocaml_digests: bool,
}

/// Counters collected while parsing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// Non-empty inputs seen, including skipped ones
    pub total: usize,
    pub paths: usize,
    pub kernel_digests: usize,
    pub ocaml_digests: usize,
    /// Parsed inputs without an epoch
    pub epoch_missing: usize,
    /// Parsed inputs without a release
    pub release_missing: usize,
    /// Bytes needed to store every input with a terminator
    pub input_bytes: usize,
}

impl ParseStats {
    /// Inputs that were actually parsed
    pub fn parsed(&self) -> usize {
        self.total - self.paths - self.kernel_digests - self.ocaml_digests
    }
}

impl fmt::Display for ParseStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "total:{} files:{} Kdigest:{} Odigest:{} Emiss:{} Rmiss:{} strnb:{}",
            self.total,
            self.paths,
            self.kernel_digests,
            self.ocaml_digests,
            self.epoch_missing,
            self.release_missing,
            self.input_bytes
        )
    }
}

/// Distinct E, V and R texts with their occurrence counts
#[derive(Debug, Clone, Default)]
pub struct EvrDictionary {
    counts: HashMap<String, u64>,
}

impl EvrDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one occurrence of `text`
    pub fn add(&mut self, text: &str) {
        match self.counts.get_mut(text) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(text.to_string(), 1);
            }
        }
    }

    /// Occurrences of `text`
    pub fn count(&self, text: &str) -> u64 {
        self.counts.get(text).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Bytes needed to store every distinct entry with a terminator
    pub fn byte_size(&self) -> usize {
        self.counts.keys().map(|k| k.len() + 1).sum()
    }

    /// Entries ordered by `comparator`, ties broken bytewise
    pub fn sorted(&self, comparator: &dyn VersionComparator) -> Vec<(&str, u64)> {
        let mut entries: Vec<(&str, u64)> =
            self.counts.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        entries.sort_by(|a, b| {
            comparator
                .compare_segments(a.0, b.0)
                .then_with(|| a.0.cmp(b.0))
        });
        entries
    }
}

/// Accumulates [`ParseStats`] and an [`EvrDictionary`] over many inputs
#[derive(Debug, Clone, Default)]
pub struct EvrCollector {
    filter: StatsFilter,
    options: EvrOptions,
    stats: ParseStats,
    dictionary: EvrDictionary,
}

impl EvrCollector {
    pub fn new(filter: StatsFilter) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    /// Use a specific parse grammar
    pub fn with_options(mut self, options: EvrOptions) -> Self {
        self.options = options;
        self
    }

    /// Feed one input; returns the parsed value unless it was skipped
    ///
    /// Empty inputs are ignored entirely.
    pub fn add(&mut self, input: &str) -> Option<VersionSpec> {
        if input.is_empty() {
            return None;
        }
        self.stats.total += 1;
        self.stats.input_bytes += input.len() + 1;

        if self.filter.skip_paths && input.starts_with('/') {
            self.stats.paths += 1;
            return None;
        }
        if self.filter.skip_kernel_digests && is_kernel_digest(input) {
            self.stats.kernel_digests += 1;
            return None;
        }
        if self.filter.skip_ocaml_digests && is_ocaml_digest(input) {
            self.stats.ocaml_digests += 1;
            return None;
        }

        let spec = VersionSpec::parse_with(input, &self.options);
        let epoch = match spec.epoch_str() {
            Some(epoch) => epoch,
            None => {
                self.stats.epoch_missing += 1;
                DEFAULT_EPOCH
            }
        };
        let release = match spec.release() {
            Some(release) => release,
            None => {
                self.stats.release_missing += 1;
                ""
            }
        };

        self.dictionary.add(epoch);
        self.dictionary.add(spec.version());
        self.dictionary.add(release);
        Some(spec)
    }

    /// Feed every input from an iterator
    pub fn extend<I, S>(&mut self, inputs: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for input in inputs {
            self.add(input.as_ref());
        }
    }

    pub fn stats(&self) -> &ParseStats {
        &self.stats
    }

    pub fn dictionary(&self) -> &EvrDictionary {
        &self.dictionary
    }

    pub fn finish(self) -> (ParseStats, EvrDictionary) {
        (self.stats, self.dictionary)
    }
}

/// 32 or 40 hex digits, either case
pub fn is_kernel_digest(s: &str) -> bool {
    matches!(s.len(), 32 | 40) && s.bytes().all(|c| c.is_ascii_hexdigit())
}

/// 27 bytes of lowercase hex with exactly one `:` and one `-`
pub fn is_ocaml_digest(s: &str) -> bool {
    if s.len() != 27 {
        return false;
    }
    let mut colons = 0;
    let mut dashes = 0;
    for c in s.bytes() {
        match c {
            b':' => colons += 1,
            b'-' => dashes += 1,
            b'0'..=b'9' | b'a'..=b'f' => {}
            _ => return false,
        }
    }
    colons == 1 && dashes == 1
}
