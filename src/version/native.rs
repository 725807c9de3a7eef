// src/version/native.rs

//! Native segmented version comparison
//!
//! Both strings are walked segment by segment. A segment is either a run of
//! ASCII digits or a run of "alpha" bytes, where alpha means an ASCII letter
//! or ASCII punctuation that is not in the configured separator set. Any
//! other byte only separates segments.
//!
//! - Numeric segments drop leading zeros (a lone `0` stays) and then
//!   compare length first, so `10` beats `9` and `007` equals `7`.
//! - A final `*` segment on either side matches the rest of the other
//!   string, so `1.*` equals `1.2.3`. [`NativeConfig::suffix_wildcard`]
//!   turns this off.
//! - Alpha segments compare bytewise over the longer run.
//! - When the segments agree, whichever string has bytes left is newer.
//!
//! Reading past the end of either string yields a NUL byte, which sorts
//! below every other byte.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Default set of punctuation bytes that act as plain separators
pub const DEFAULT_NOT_ALPHA: &str = ".:-";

/// Tunables for the native comparator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeConfig {
    /// Punctuation bytes excluded from alpha segments
    #[serde(default = "default_not_alpha")]
    pub not_alpha: String,

    /// Flip the digit-versus-non-digit verdict when one numeric run is empty
    #[serde(default)]
    pub invert_digit_priority: bool,

    /// Treat a final `*` segment as matching the rest of the other string
    #[serde(default = "default_suffix_wildcard")]
    pub suffix_wildcard: bool,
}

fn default_suffix_wildcard() -> bool {
    true
}

fn default_not_alpha() -> String {
    DEFAULT_NOT_ALPHA.to_string()
}

impl Default for NativeConfig {
    fn default() -> Self {
        Self {
            not_alpha: default_not_alpha(),
            invert_digit_priority: false,
            suffix_wildcard: default_suffix_wildcard(),
        }
    }
}

impl NativeConfig {
    /// Is this byte part of an alpha segment?
    fn is_alpha(&self, c: u8) -> bool {
        (c.is_ascii_alphabetic() || c.is_ascii_punctuation()) && !self.not_alpha.as_bytes().contains(&c)
    }

    /// Does this byte start or continue any segment?
    fn is_segment(&self, c: u8) -> bool {
        c.is_ascii_digit() || self.is_alpha(c)
    }

    fn digit_sign(&self) -> i32 {
        if self.invert_digit_priority { -1 } else { 1 }
    }
}

/// Byte at `pos`, or NUL once past the end
#[inline]
fn at(s: &[u8], pos: usize) -> u8 {
    s.get(pos).copied().unwrap_or(0)
}

/// `strncmp` over the tails starting at `a` and `b`
fn strncmp(a: &[u8], b: &[u8], n: usize) -> i32 {
    for k in 0..n {
        let (ca, cb) = (at(a, k), at(b, k));
        if ca != cb {
            return i32::from(ca) - i32::from(cb);
        }
        if ca == 0 {
            break;
        }
    }
    0
}

/// Compare two version fragments with the default configuration
pub fn compare(a: &str, b: &str) -> Ordering {
    compare_with(a, b, &NativeConfig::default())
}

/// Compare two version fragments
pub fn compare_with(a: &str, b: &str, config: &NativeConfig) -> Ordering {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let (mut i, mut j) = (0usize, 0usize);
    let mut rc: i32 = 0;

    while at(a, i) != 0 && at(b, j) != 0 && rc == 0 {
        while at(a, i) != 0 && !config.is_segment(at(a, i)) {
            i += 1;
        }
        while at(b, j) != 0 && !config.is_segment(at(b, j)) {
            j += 1;
        }

        let (ae, be);
        if config.suffix_wildcard && (is_wildcard(a, i) || is_wildcard(b, j)) {
            // A trailing `*` matches whatever the other side has left
            ae = a.len();
            be = b.len();
        } else if at(a, i).is_ascii_digit() || at(b, j).is_ascii_digit() {
            // Drop leading zeros, keeping the last digit of the run
            while at(a, i) == b'0' && at(a, i + 1).is_ascii_digit() {
                i += 1;
            }
            while at(b, j) == b'0' && at(b, j + 1).is_ascii_digit() {
                j += 1;
            }

            ae = digit_run_end(a, i);
            be = digit_run_end(b, j);

            rc = if i == ae && j == be {
                0
            } else if i == ae || j == be {
                (i32::from(at(a, i)) - i32::from(at(b, j))) * config.digit_sign()
            } else {
                match (ae - i).cmp(&(be - j)) {
                    Ordering::Greater => 1,
                    Ordering::Less => -1,
                    Ordering::Equal => strncmp(&a[i..], &b[j..], ae - i),
                }
            };
        } else {
            ae = alpha_run_end(a, i, config);
            be = alpha_run_end(b, j, config);
            rc = strncmp(&a[i.min(a.len())..], &b[j.min(b.len())..], (ae - i).max(be - j));
        }

        i = ae;
        j = be;
    }

    // Longer string wins
    if rc == 0 {
        rc = i32::from(at(a, i)) - i32::from(at(b, j));
    }

    rc.cmp(&0)
}

/// Is the rest of `s` from `pos` exactly `*`?
fn is_wildcard(s: &[u8], pos: usize) -> bool {
    at(s, pos) == b'*' && pos + 1 == s.len()
}

fn digit_run_end(s: &[u8], mut pos: usize) -> usize {
    while at(s, pos).is_ascii_digit() {
        pos += 1;
    }
    pos
}

fn alpha_run_end(s: &[u8], mut pos: usize, config: &NativeConfig) -> usize {
    while at(s, pos) != 0 && config.is_alpha(at(s, pos)) {
        pos += 1;
    }
    pos
}
