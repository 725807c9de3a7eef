// src/dependencies/mod.rs

//! Pairwise dependency range checks
//!
//! A dependency is a name plus an optional relation to a version, such as
//! `glibc >= 2.34`. Two dependencies with the same name describe version
//! ranges; [`overlaps`] answers whether those ranges intersect, which is how
//! a Provides is matched against a Requires.
//!
//! # Example
//!
//! ```
//! use rpmevr::dependencies::{overlaps, Dependency, OverlapOptions};
//! use rpmevr::version::Comparator;
//!
//! let provides = Dependency::parse("glibc = 2.35-1").unwrap();
//! let requires = Dependency::parse("glibc >= 2.34").unwrap();
//! assert!(overlaps(&provides, &requires, &OverlapOptions::default(), &Comparator::native()));
//! ```

mod overlap;

pub use overlap::{overlaps, OverlapOptions};

use overlap::ranges_overlap;

use crate::error::{Error, Result};
use crate::namespace::NamespaceRecord;
use crate::sense::{decode_operator, SenseFlags};
use crate::version::{VersionComparator, VersionSpec};
use std::fmt;

/// A dependency name with an optional version relation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dependency<'a> {
    pub name: &'a str,
    /// Relational bits select the range; other bits are carried through
    pub flags: SenseFlags,
    pub evr: Option<&'a str>,
}

impl<'a> Dependency<'a> {
    pub fn new(name: &'a str, flags: SenseFlags, evr: Option<&'a str>) -> Self {
        Self { name, flags, evr }
    }

    /// A dependency satisfied by any version of `name`
    pub fn exists(name: &'a str) -> Self {
        Self::new(name, SenseFlags::empty(), None)
    }

    /// Parse `name`, `name <op> evr` or `name <op>evr`
    pub fn parse(input: &'a str) -> Result<Self> {
        let mut parts = input.split_whitespace();
        let name = parts
            .next()
            .ok_or_else(|| Error::ParseError("empty dependency".to_string()))?;

        let Some(op) = parts.next() else {
            return Ok(Self::exists(name));
        };

        let (flags, consumed) = decode_operator(Some(op));
        if flags.is_empty() {
            return Err(Error::ParseError(format!(
                "unknown operator '{}' in '{}'",
                op, input
            )));
        }

        let evr = if consumed < op.len() {
            &op[consumed..]
        } else {
            parts.next().ok_or_else(|| {
                Error::ParseError(format!("missing version after '{}' in '{}'", op, input))
            })?
        };

        if parts.next().is_some() {
            return Err(Error::ParseError(format!(
                "trailing text after version in '{}'",
                input
            )));
        }

        Ok(Self::new(name, flags, Some(evr)))
    }

    /// Is this an existence-only dependency?
    pub fn is_unversioned(&self) -> bool {
        self.flags.is_existence_only() || self.evr.is_none_or(str::is_empty)
    }

    /// Does `candidate` fall inside this dependency's range?
    ///
    /// The candidate acts as an exact `= version` provide, so a release is
    /// only compared when this dependency names one. The candidate is used
    /// as parsed; this dependency's version is parsed with
    /// `options.grammar`.
    pub fn satisfied_by(
        &self,
        candidate: &VersionSpec,
        options: &OverlapOptions,
        comparator: &dyn VersionComparator,
    ) -> bool {
        let Some(evr) = self.evr.filter(|_| !self.is_unversioned()) else {
            return true;
        };
        let provide = Dependency::new(self.name, SenseFlags::EQUAL, Some(candidate.raw()));
        let required = VersionSpec::parse_with(evr, &options.grammar);
        ranges_overlap(&provide, candidate, self, &required, options, comparator)
    }
}

impl<'a> From<NamespaceRecord<'a>> for Dependency<'a> {
    fn from(record: NamespaceRecord<'a>) -> Self {
        Self::new(record.full_name(), record.flags, record.evr)
    }
}

impl fmt::Display for Dependency<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(evr) = self.evr {
            if !self.flags.is_existence_only() {
                write!(f, " {} {}", self.flags, evr)?;
            }
        }
        Ok(())
    }
}
