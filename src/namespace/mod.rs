// src/namespace/mod.rs

//! Dependency name classification
//!
//! Sorts a raw dependency name into a [`NamespaceKind`] by its shape and
//! pulls out the structural parts: the namespace keyword of a
//! `keyword(argument)` form, the name itself, and an architecture suffix.
//! An embedded comparison (`name >= 1.0`) is split off first, then a
//! leading `!` marks a negated dependency.
//!
//! Shapes are tested in priority order:
//!
//! 1. `name.arch` where `arch` is a known architecture → [`NamespaceKind::Arch`]
//! 2. a fixed probe such as `rpmlib(...)` or `user(...)` → that probe's kind
//! 3. a leading `/` → [`NamespaceKind::Path`]
//! 4. `%{...}` → [`NamespaceKind::Function`]
//! 5. a shared object name (`libfoo.so`, `libc.so.6(GLIBC_2.34)`) → [`NamespaceKind::Dso`]
//! 6. any other `keyword(argument)` → [`NamespaceKind::Namespace`]
//! 7. a digit, `.`, digit sequence → [`NamespaceKind::Version`]
//! 8. any `.` → [`NamespaceKind::Compound`]
//! 9. anything else → [`NamespaceKind::String`]
//!
//! Parenthesized text that fits none of the `keyword(argument)` shapes is
//! classified as a plain string. Classification is total.

mod arch;
mod kind;

pub use arch::{is_known_arch, KNOWN_ARCHES};
pub use kind::NamespaceKind;

use crate::config;
use crate::sense::{decode_operator, SenseFlags};
use kind::PROBES;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Classifier tables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceConfig {
    /// Separator between a name and its architecture suffix
    #[serde(default = "default_arch_separator")]
    pub arch_separator: char,

    /// Architectures recognised in addition to [`KNOWN_ARCHES`]
    #[serde(default)]
    pub extra_arches: Vec<String>,
}

fn default_arch_separator() -> char {
    '.'
}

impl Default for NamespaceConfig {
    fn default() -> Self {
        Self {
            arch_separator: default_arch_separator(),
            extra_arches: Vec::new(),
        }
    }
}

/// A classified dependency name
///
/// Every text field borrows from the classified input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamespaceRecord<'a> {
    /// The input as given
    pub raw: &'a str,
    pub kind: NamespaceKind,
    /// Leading `!` was present
    pub negated: bool,
    /// `keyword` of a `keyword(argument)` form
    pub namespace_keyword: Option<&'a str>,
    /// The argument of a `keyword(argument)` form, the part before the
    /// architecture suffix, or the whole name
    pub name: &'a str,
    pub arch: Option<&'a str>,
    /// Relational flags of an embedded comparison, empty without one
    pub flags: SenseFlags,
    /// Version text of an embedded comparison
    pub evr: Option<&'a str>,
}

impl<'a> NamespaceRecord<'a> {
    /// The dependency name with negation and comparison removed
    pub fn full_name(&self) -> &'a str {
        let body = split_comparison(self.raw).0;
        body.strip_prefix('!').unwrap_or(body)
    }

    /// Does the record carry an embedded comparison?
    pub fn has_comparison(&self) -> bool {
        self.evr.is_some()
    }
}

/// Classifies dependency names against a set of tables
#[derive(Debug, Clone, Copy)]
pub struct Classifier<'c> {
    config: &'c NamespaceConfig,
}

impl<'c> Classifier<'c> {
    pub fn new(config: &'c NamespaceConfig) -> Self {
        Self { config }
    }

    /// Is `name` a recognised architecture for this classifier?
    pub fn is_arch(&self, name: &str) -> bool {
        is_known_arch(name, &self.config.extra_arches)
    }

    /// Classify one dependency name
    pub fn classify<'a>(&self, input: &'a str) -> NamespaceRecord<'a> {
        let (body, flags, evr) = split_comparison(input);
        let (negated, body) = match body.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, body),
        };

        let mut record = NamespaceRecord {
            raw: input,
            kind: NamespaceKind::String,
            negated,
            namespace_keyword: None,
            name: body,
            arch: None,
            flags,
            evr,
        };

        if let Some((name, arch)) = self.split_arch(body) {
            record.kind = NamespaceKind::Arch;
            record.name = name;
            record.arch = Some(arch);
            return record;
        }

        if let Some((kind, keyword, argument)) = probe(body) {
            if argument.is_empty() {
                trace!("Classified '{}' as string: empty probe argument", input);
                return record;
            }
            record.kind = kind;
            record.namespace_keyword = Some(keyword);
            record.name = argument;
            return record;
        }

        if body.starts_with('/') {
            record.kind = NamespaceKind::Path;
            return record;
        }

        if body.len() >= 3 && body.starts_with("%{") && body.ends_with('}') {
            record.kind = NamespaceKind::Function;
            return record;
        }

        if is_dso(body) {
            record.kind = NamespaceKind::Dso;
            return record;
        }

        if let Some((keyword, argument)) = generic_namespace(body) {
            record.kind = NamespaceKind::Namespace;
            record.namespace_keyword = Some(keyword);
            record.name = argument;
            return record;
        }

        if body.contains(['(', ')']) {
            trace!("Classified '{}' as string: malformed parenthesized form", input);
            return record;
        }

        record.kind = if has_dotted_digits(body) {
            NamespaceKind::Version
        } else if body.contains('.') {
            NamespaceKind::Compound
        } else {
            NamespaceKind::String
        };
        record
    }

    /// Split `name<sep>arch` when the suffix is a known architecture
    fn split_arch<'a>(&self, body: &'a str) -> Option<(&'a str, &'a str)> {
        let sep = self.config.arch_separator;
        let pos = body.rfind(sep)?;
        let (name, arch) = (&body[..pos], &body[pos + sep.len_utf8()..]);
        (!name.is_empty() && self.is_arch(arch)).then_some((name, arch))
    }
}

/// Classify with the process configuration
pub fn classify(input: &str) -> NamespaceRecord<'_> {
    Classifier::new(&config::global().namespace).classify(input)
}

/// Split `name <op> evr` (or `name <op>evr`) into its parts
///
/// Input without a recognisable comparison comes back whole, with empty
/// flags.
fn split_comparison(input: &str) -> (&str, SenseFlags, Option<&str>) {
    let unsplit = (input, SenseFlags::empty(), None);

    let mut parts = input.split_whitespace();
    let (Some(name), Some(op)) = (parts.next(), parts.next()) else {
        return unsplit;
    };
    let rest: Vec<&str> = parts.collect();

    let (flags, consumed) = decode_operator(Some(op));
    if flags.is_empty() {
        return unsplit;
    }

    let evr = match rest.as_slice() {
        [] if consumed < op.len() => &op[consumed..],
        [evr] if consumed == op.len() => *evr,
        _ => return unsplit,
    };
    (name, flags, Some(evr))
}

/// Match a fixed probe keyword: `keyword(argument)`, at least five bytes
fn probe(body: &str) -> Option<(NamespaceKind, &str, &str)> {
    if body.len() < 5 || !body.ends_with(')') {
        return None;
    }
    PROBES
        .iter()
        .find(|(keyword, _)| {
            body.len() > keyword.len()
                && body.as_bytes()[keyword.len()] == b'('
                && body.starts_with(keyword)
        })
        .map(|(keyword, kind)| {
            (*kind, &body[..keyword.len()], &body[keyword.len() + 1..body.len() - 1])
        })
}

/// `libfoo.so`, `libfoo.so.1`, `libc.so.6(GLIBC_2.34)(64bit)`
fn is_dso(body: &str) -> bool {
    let lead = body.split('(').next().unwrap_or(body);
    lead.ends_with(".so") || lead.contains(".so.")
}

/// Any `keyword(argument)` with a non-empty keyword and argument
fn generic_namespace(body: &str) -> Option<(&str, &str)> {
    if !body.ends_with(')') {
        return None;
    }
    let open = body.find('(')?;
    let keyword = &body[..open];
    let argument = &body[open + 1..body.len() - 1];
    let usable = !keyword.is_empty()
        && !argument.is_empty()
        && !keyword.contains(|c: char| c == '/' || c.is_whitespace());
    usable.then_some((keyword, argument))
}

fn has_dotted_digits(body: &str) -> bool {
    body.as_bytes()
        .windows(3)
        .any(|w| w[1] == b'.' && w[0].is_ascii_digit() && w[2].is_ascii_digit())
}
