// src/sense.rs

//! Dependency sense flags and relational operator decoding
//!
//! A sense value packs the relational operator of a dependency (`<`, `=`,
//! `>` and their combinations) together with usage-context bits that record
//! where the dependency came from (scriptlet phase, trigger, rpmlib feature).
//! Only the relational bits take part in comparison; the rest are carried
//! through untouched.
//!
//! Bit positions match the package header encoding so a value read from a
//! header can be wrapped with [`SenseFlags::from_bits_retain`].

use std::fmt;

bitflags::bitflags! {
    /// Relational operator plus usage context for a dependency
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SenseFlags: u32 {
        /// Obsolete serial comparison
        const SERIAL = 1 << 0;
        const LESS = 1 << 1;
        const GREATER = 1 << 2;
        const EQUAL = 1 << 3;
        /// Only used internally by builds
        const PROVIDES = 1 << 4;
        /// Only used internally by builds
        const CONFLICTS = 1 << 5;
        /// Obsolete prerequisite marker
        const PREREQ = 1 << 6;
        /// Only used internally by builds
        const OBSOLETES = 1 << 7;
        /// Interpreter used by a scriptlet
        const INTERP = 1 << 8;
        const SCRIPT_PRE = 1 << 9;
        const SCRIPT_POST = 1 << 10;
        const SCRIPT_PREUN = 1 << 11;
        const SCRIPT_POSTUN = 1 << 12;
        const SCRIPT_VERIFY = 1 << 13;
        const FIND_REQUIRES = 1 << 14;
        const FIND_PROVIDES = 1 << 15;
        const TRIGGERIN = 1 << 16;
        const TRIGGERUN = 1 << 17;
        const TRIGGERPOSTUN = 1 << 18;
        /// Suggests/enhances hint
        const MISSINGOK = 1 << 19;
        const SCRIPT_PREP = 1 << 20;
        const SCRIPT_BUILD = 1 << 21;
        const SCRIPT_INSTALL = 1 << 22;
        const SCRIPT_CLEAN = 1 << 23;
        /// rpmlib(feature) dependency
        const RPMLIB = 1 << 24;
        const TRIGGERPREIN = 1 << 25;
        const KEYRING = 1 << 26;
        const STRONG = 1 << 27;
        const CONFIG = 1 << 28;
        const PROBE = 1 << 29;
        const PACKAGE = 1 << 30;
        const SCRIPT_SANITYCHECK = 1 << 31;

        /// Mask selecting the relational bits
        const SENSEMASK = Self::LESS.bits() | Self::GREATER.bits() | Self::EQUAL.bits();
        const NOTEQUAL = Self::LESS.bits() | Self::GREATER.bits();
        const LESS_EQUAL = Self::LESS.bits() | Self::EQUAL.bits();
        const GREATER_EQUAL = Self::GREATER.bits() | Self::EQUAL.bits();

        const TRIGGER = Self::TRIGGERPREIN.bits()
            | Self::TRIGGERIN.bits()
            | Self::TRIGGERUN.bits()
            | Self::TRIGGERPOSTUN.bits();

        const ALL_REQUIRES = Self::INTERP.bits()
            | Self::SCRIPT_PRE.bits()
            | Self::SCRIPT_POST.bits()
            | Self::SCRIPT_PREUN.bits()
            | Self::SCRIPT_POSTUN.bits()
            | Self::SCRIPT_VERIFY.bits()
            | Self::FIND_REQUIRES.bits()
            | Self::MISSINGOK.bits()
            | Self::SCRIPT_PREP.bits()
            | Self::SCRIPT_BUILD.bits()
            | Self::SCRIPT_INSTALL.bits()
            | Self::SCRIPT_CLEAN.bits()
            | Self::RPMLIB.bits()
            | Self::KEYRING.bits()
            | Self::PACKAGE.bits();

        /// Requirements that only matter while installing
        const INSTALL_ONLY = Self::SCRIPT_PRE.bits()
            | Self::SCRIPT_POST.bits()
            | Self::RPMLIB.bits()
            | Self::KEYRING.bits();

        /// Requirements that only matter while erasing
        const ERASE_ONLY = Self::SCRIPT_PREUN.bits() | Self::SCRIPT_POSTUN.bits();
    }
}

impl SenseFlags {
    /// The relational subset of these flags
    pub fn sense(self) -> SenseFlags {
        self & SenseFlags::SENSEMASK
    }

    /// True when no relational bit is set ("name exists" dependency)
    pub fn is_existence_only(self) -> bool {
        self.sense().is_empty()
    }

    /// True when this requirement gates installation
    pub fn is_install_prereq(self) -> bool {
        self.intersects(SenseFlags::INSTALL_ONLY)
    }

    /// True when this requirement gates erasure
    pub fn is_erase_prereq(self) -> bool {
        self.intersects(SenseFlags::ERASE_ONLY)
    }

    /// Canonical operator token for the relational subset
    ///
    /// Returns an empty string for existence-only flags.
    pub fn operator(self) -> &'static str {
        let sense = self.sense();
        if sense == SenseFlags::LESS_EQUAL {
            "<="
        } else if sense == SenseFlags::GREATER_EQUAL {
            ">="
        } else if sense == SenseFlags::NOTEQUAL {
            "!="
        } else if sense == SenseFlags::LESS {
            "<"
        } else if sense == SenseFlags::GREATER {
            ">"
        } else if sense == SenseFlags::EQUAL {
            "="
        } else {
            // Empty, or all three bits set
            ""
        }
    }

    /// Whether a comparison verdict (`candidate` vs `required`) satisfies this sense
    ///
    /// Existence-only flags accept every verdict.
    pub fn accepts(self, verdict: std::cmp::Ordering) -> bool {
        use std::cmp::Ordering;

        let sense = self.sense();
        if sense.is_empty() {
            return true;
        }
        match verdict {
            Ordering::Less => sense.contains(SenseFlags::LESS),
            Ordering::Equal => sense.contains(SenseFlags::EQUAL),
            Ordering::Greater => sense.contains(SenseFlags::GREATER),
        }
    }
}

impl fmt::Display for SenseFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.operator())
    }
}

/// Operator table, tested in order
///
/// Two-character operators come before their one-character prefixes. The
/// order is part of the decoding contract: inputs with trailing garbage
/// decode differently under any other order.
const OPERATORS: &[(&str, SenseFlags)] = &[
    ("<=", SenseFlags::LESS_EQUAL),
    ("=<", SenseFlags::LESS_EQUAL),
    ("==", SenseFlags::EQUAL),
    ("!=", SenseFlags::NOTEQUAL),
    (">=", SenseFlags::GREATER_EQUAL),
    ("=>", SenseFlags::GREATER_EQUAL),
    ("<", SenseFlags::LESS),
    ("=", SenseFlags::EQUAL),
    (">", SenseFlags::GREATER),
];

/// Decode a relational operator token
///
/// Returns the relational flags and the number of bytes consumed from the
/// front of `op`. A missing or empty token decodes to `EQUAL` with nothing
/// consumed. A token that matches no operator decodes to empty flags with
/// nothing consumed.
///
/// Examples:
/// - `"<="` → (LESS | EQUAL, 2)
/// - `"<=foo"` → (LESS | EQUAL, 2)
/// - `"=<"` → (LESS | EQUAL, 2)
/// - `"~="` → (empty, 0)
pub fn decode_operator(op: Option<&str>) -> (SenseFlags, usize) {
    let op = match op {
        None | Some("") => return (SenseFlags::EQUAL, 0),
        Some(op) => op,
    };

    OPERATORS
        .iter()
        .find(|(token, _)| op.starts_with(token))
        .map(|(token, flags)| (*flags, token.len()))
        .unwrap_or((SenseFlags::empty(), 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cmp::Ordering;

    #[test]
    fn test_decode_empty_is_equal() {
        assert_eq!(decode_operator(None), (SenseFlags::EQUAL, 0));
        assert_eq!(decode_operator(Some("")), (SenseFlags::EQUAL, 0));
    }

    #[test]
    fn test_decode_two_char_before_prefix() {
        assert_eq!(decode_operator(Some("<=")), (SenseFlags::LESS_EQUAL, 2));
        assert_eq!(decode_operator(Some(">=")), (SenseFlags::GREATER_EQUAL, 2));
        assert_eq!(decode_operator(Some("==")), (SenseFlags::EQUAL, 2));
        assert_eq!(decode_operator(Some("!=")), (SenseFlags::NOTEQUAL, 2));
    }

    #[test]
    fn test_decode_reversed_spellings() {
        assert_eq!(decode_operator(Some("=<")), (SenseFlags::LESS_EQUAL, 2));
        assert_eq!(decode_operator(Some("=>")), (SenseFlags::GREATER_EQUAL, 2));
    }

    #[test]
    fn test_decode_single_char() {
        assert_eq!(decode_operator(Some("<")), (SenseFlags::LESS, 1));
        assert_eq!(decode_operator(Some("=")), (SenseFlags::EQUAL, 1));
        assert_eq!(decode_operator(Some(">")), (SenseFlags::GREATER, 1));
    }

    #[test]
    fn test_decode_trailing_garbage() {
        // "=<" wins over "=" followed by "<"
        assert_eq!(decode_operator(Some("=<1.0")), (SenseFlags::LESS_EQUAL, 2));
        // "<" then "<" is not a two-character operator
        assert_eq!(decode_operator(Some("<<")), (SenseFlags::LESS, 1));
        assert_eq!(decode_operator(Some("> 2")), (SenseFlags::GREATER, 1));
    }

    #[test]
    fn test_decode_unknown() {
        assert_eq!(decode_operator(Some("~=")), (SenseFlags::empty(), 0));
        assert_eq!(decode_operator(Some("!")), (SenseFlags::empty(), 0));
        assert_eq!(decode_operator(Some("abc")), (SenseFlags::empty(), 0));
    }

    #[test]
    fn test_operator_rendering() {
        assert_eq!(SenseFlags::LESS_EQUAL.operator(), "<=");
        assert_eq!(SenseFlags::NOTEQUAL.operator(), "!=");
        assert_eq!((SenseFlags::GREATER | SenseFlags::SCRIPT_PRE).operator(), ">");
        assert_eq!(SenseFlags::RPMLIB.operator(), "");
        assert_eq!(SenseFlags::EQUAL.to_string(), "=");
    }

    #[test]
    fn test_sense_masks_context_bits() {
        let flags = SenseFlags::GREATER_EQUAL | SenseFlags::SCRIPT_POST | SenseFlags::RPMLIB;
        assert_eq!(flags.sense(), SenseFlags::GREATER_EQUAL);
        assert!(!flags.is_existence_only());
        assert!(SenseFlags::SCRIPT_PRE.is_existence_only());
    }

    #[test]
    fn test_install_and_erase_prereq() {
        assert!(SenseFlags::SCRIPT_PRE.is_install_prereq());
        assert!(SenseFlags::RPMLIB.is_install_prereq());
        assert!(!SenseFlags::SCRIPT_PREUN.is_install_prereq());
        assert!(SenseFlags::SCRIPT_POSTUN.is_erase_prereq());
        assert!(!SenseFlags::PREREQ.is_erase_prereq());
    }

    #[test]
    fn test_header_bits_roundtrip() {
        // 0x0c is GREATER|EQUAL in the header encoding
        let flags = SenseFlags::from_bits_retain(0x0c);
        assert_eq!(flags, SenseFlags::GREATER_EQUAL);
        assert_eq!(SenseFlags::SCRIPT_SANITYCHECK.bits(), 0x8000_0000);
        assert_eq!(SenseFlags::SENSEMASK.bits(), 0x0e);
    }

    #[test]
    fn test_accepts_verdict() {
        assert!(SenseFlags::GREATER_EQUAL.accepts(Ordering::Greater));
        assert!(SenseFlags::GREATER_EQUAL.accepts(Ordering::Equal));
        assert!(!SenseFlags::GREATER_EQUAL.accepts(Ordering::Less));
        assert!(SenseFlags::NOTEQUAL.accepts(Ordering::Less));
        assert!(!SenseFlags::NOTEQUAL.accepts(Ordering::Equal));
        assert!(SenseFlags::empty().accepts(Ordering::Less));
    }
}
