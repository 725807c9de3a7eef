// src/version/foreign.rs

//! Tilde-aware version comparison for Debian-style version grammars
//!
//! The strings are split into alternating non-digit and digit runs.
//!
//! Non-digit runs compare byte by byte using a sort class:
//! - `~` sorts before everything, even the end of the string
//! - the end of the string and digits sort next
//! - ASCII letters sort by their own value
//! - every other byte sorts after all letters
//!
//! Digit runs compare numerically: leading zeros are dropped, a longer run
//! wins, and equal-length runs are decided by their first differing digit.
//!
//! So `1.0~rc1` is older than `1.0`, and `1.0+b1` is newer than `1.0`.

use std::cmp::Ordering;

/// Sort class of the byte at `pos` inside a non-digit run
fn order(s: &[u8], pos: usize) -> i32 {
    match s.get(pos) {
        None => 0,
        Some(c) if c.is_ascii_digit() => 0,
        Some(c) if c.is_ascii_alphabetic() => i32::from(*c),
        Some(b'~') => -1,
        Some(c) => i32::from(*c) + 256,
    }
}

#[inline]
fn is_digit_at(s: &[u8], pos: usize) -> bool {
    s.get(pos).is_some_and(u8::is_ascii_digit)
}

#[inline]
fn is_non_digit_at(s: &[u8], pos: usize) -> bool {
    s.get(pos).is_some_and(|c| !c.is_ascii_digit())
}

/// Compare two version fragments
pub fn compare(a: &str, b: &str) -> Ordering {
    // Equality check first, it is the common case
    if a == b {
        return Ordering::Equal;
    }

    let (a, b) = (a.as_bytes(), b.as_bytes());
    let (mut i, mut j) = (0usize, 0usize);

    while i < a.len() || j < b.len() {
        while is_non_digit_at(a, i) || is_non_digit_at(b, j) {
            let (ac, bc) = (order(a, i), order(b, j));
            if ac != bc {
                return ac.cmp(&bc);
            }
            i += 1;
            j += 1;
        }

        while a.get(i) == Some(&b'0') {
            i += 1;
        }
        while b.get(j) == Some(&b'0') {
            j += 1;
        }

        let mut first_diff = Ordering::Equal;
        while is_digit_at(a, i) && is_digit_at(b, j) {
            if first_diff == Ordering::Equal {
                first_diff = a[i].cmp(&b[j]);
            }
            i += 1;
            j += 1;
        }

        if is_digit_at(a, i) {
            return Ordering::Greater;
        }
        if is_digit_at(b, j) {
            return Ordering::Less;
        }
        if first_diff != Ordering::Equal {
            return first_diff;
        }
    }

    Ordering::Equal
}
