// src/dependencies/overlap.rs

//! Range overlap between two dependencies of the same name

use super::Dependency;
use crate::sense::SenseFlags;
use crate::version::{EvrOptions, VersionComparator, VersionSpec};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::{trace, warn};

/// Overlap test behaviour
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlapOptions {
    /// When only `a` names a positive epoch, assume `b` shares it instead
    /// of treating `a` as newer
    #[serde(default)]
    pub promote_epoch: bool,

    /// Grammar both version texts are parsed with
    ///
    /// Not read from the `[dependencies]` table; `EngineConfig::overlap_options`
    /// fills it from `[evr]`.
    #[serde(skip)]
    pub grammar: EvrOptions,
}

/// Do the version ranges of `a` and `b` intersect?
///
/// - Different names never overlap.
/// - An existence-only dependency, or one without a version, overlaps
///   everything of the same name.
/// - Epochs compare when both sides name one. Otherwise a positive epoch on
///   one side makes that side newer, unless `promote_epoch` applies.
/// - Versions compare next; releases only when both sides name one, then
///   distance tags when the grammar compares them.
pub fn overlaps(
    a: &Dependency<'_>,
    b: &Dependency<'_>,
    options: &OverlapOptions,
    comparator: &dyn VersionComparator,
) -> bool {
    if a.name != b.name {
        return false;
    }
    if a.is_unversioned() || b.is_unversioned() {
        return true;
    }

    let (Some(a_evr), Some(b_evr)) = (a.evr, b.evr) else {
        return true;
    };
    let a_spec = VersionSpec::parse_with(a_evr, &options.grammar);
    let b_spec = VersionSpec::parse_with(b_evr, &options.grammar);
    ranges_overlap(a, &a_spec, b, &b_spec, options, comparator)
}

/// Overlap of two versioned dependencies whose texts are already parsed
pub(super) fn ranges_overlap(
    a: &Dependency<'_>,
    a_spec: &VersionSpec,
    b: &Dependency<'_>,
    b_spec: &VersionSpec,
    options: &OverlapOptions,
    comparator: &dyn VersionComparator,
) -> bool {
    let sense = compare_ranges(a, a_spec, b, b_spec, options, comparator);
    let (af, bf) = (a.flags, b.flags);

    let result = match sense {
        Ordering::Less => af.contains(SenseFlags::GREATER) || bf.contains(SenseFlags::LESS),
        Ordering::Greater => af.contains(SenseFlags::LESS) || bf.contains(SenseFlags::GREATER),
        Ordering::Equal => [SenseFlags::EQUAL, SenseFlags::LESS, SenseFlags::GREATER]
            .into_iter()
            .any(|bit| af.contains(bit) && bf.contains(bit)),
    };

    trace!("Overlap {}: A '{}' B '{}'", if result { "yes" } else { "no" }, a, b);
    result
}

fn compare_ranges(
    a: &Dependency<'_>,
    a_spec: &VersionSpec,
    b: &Dependency<'_>,
    b_spec: &VersionSpec,
    options: &OverlapOptions,
    comparator: &dyn VersionComparator,
) -> Ordering {
    let epoch_sense = match (a_spec.epoch_str(), b_spec.epoch_str()) {
        (Some(ae), Some(be)) => comparator.compare_segments(ae, be),
        (Some(_), None) if a_spec.epoch().is_some_and(|e| e > 0) => {
            if options.promote_epoch {
                warn!(
                    "Dependency '{}' needs an epoch, assuming the same epoch as '{}'",
                    b, a
                );
                Ordering::Equal
            } else {
                Ordering::Greater
            }
        }
        (None, Some(_)) if b_spec.epoch().is_some_and(|e| e > 0) => Ordering::Less,
        _ => Ordering::Equal,
    };

    epoch_sense
        .then_with(|| comparator.compare_segments(a_spec.version(), b_spec.version()))
        .then_with(|| match (a_spec.release(), b_spec.release()) {
            (Some(ar), Some(br)) if !ar.is_empty() && !br.is_empty() => {
                comparator.compare_segments(ar, br)
            }
            _ => Ordering::Equal,
        })
        .then_with(|| match (a_spec.distance_tag(), b_spec.distance_tag()) {
            (Some(ad), Some(bd)) if options.grammar.compare_distance => {
                comparator.compare_segments(ad, bd)
            }
            _ => Ordering::Equal,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::Comparator;

    fn check(a: &str, b: &str) -> bool {
        check_with(a, b, &OverlapOptions::default())
    }

    fn check_with(a: &str, b: &str, options: &OverlapOptions) -> bool {
        let a = Dependency::parse(a).unwrap();
        let b = Dependency::parse(b).unwrap();
        overlaps(&a, &b, options, &Comparator::native())
    }

    #[test]
    fn test_different_names() {
        assert!(!check("foo = 1.0", "bar = 1.0"));
        assert!(!check("foo", "bar"));
    }

    #[test]
    fn test_existence_overlaps_everything() {
        assert!(check("foo", "foo < 0.1"));
        assert!(check("foo >= 99", "foo"));
    }

    #[test]
    fn test_context_bits_alone_are_existence() {
        let a = Dependency::new("foo", SenseFlags::SCRIPT_PRE, Some("1.0"));
        let b = Dependency::parse("foo < 0.5").unwrap();
        assert!(overlaps(&a, &b, &OverlapOptions::default(), &Comparator::native()));
    }

    #[test]
    fn test_empty_evr_overlaps() {
        let a = Dependency::new("foo", SenseFlags::GREATER, Some(""));
        let b = Dependency::parse("foo < 0.5").unwrap();
        assert!(overlaps(&a, &b, &OverlapOptions::default(), &Comparator::native()));
    }

    #[test]
    fn test_ranges() {
        assert!(check("foo = 2.0", "foo >= 1.0"));
        assert!(check("foo >= 1.0", "foo = 2.0"));
        assert!(!check("foo < 1.0", "foo = 2.0"));
        assert!(check("foo < 2.0", "foo > 1.0"));
        assert!(!check("foo < 1.0", "foo > 2.0"));
        assert!(check("foo >= 1.0", "foo >= 3.0"));
        assert!(check("foo <= 1.0", "foo >= 1.0"));
        assert!(!check("foo < 1.0", "foo > 1.0"));
        assert!(check("foo != 1.0", "foo = 2.0"));
    }

    #[test]
    fn test_release_only_when_both_present() {
        assert!(check("foo = 1.0-1", "foo = 1.0"));
        assert!(!check("foo = 1.0-1", "foo = 1.0-2"));
        assert!(check("foo = 1.0-2", "foo > 1.0-1"));
    }

    #[test]
    fn test_both_epochs() {
        assert!(check("foo = 1:1.0", "foo = 01:1.0"));
        assert!(!check("foo = 2:1.0", "foo <= 1:9.0"));
    }

    #[test]
    fn test_epoch_only_on_a() {
        // A is newer by its epoch: B's "<= 2.0" cannot reach it
        assert!(!check("foo = 1:1.0", "foo <= 2.0"));
        assert!(check("foo = 1:1.0", "foo >= 2.0"));
    }

    #[test]
    fn test_epoch_promotion() {
        let promote = OverlapOptions {
            promote_epoch: true,
            ..OverlapOptions::default()
        };
        // Epochs assumed equal, so 1.0 <= 2.0 decides
        assert!(check_with("foo = 1:1.0", "foo <= 2.0", &promote));
        assert!(!check_with("foo = 1:1.0", "foo >= 2.0", &promote));
    }

    #[test]
    fn test_epoch_only_on_b() {
        assert!(!check("foo = 2.0", "foo = 1:1.0"));
        assert!(check("foo >= 2.0", "foo = 1:1.0"));
        // Promotion only applies to an epoch on A
        let promote = OverlapOptions {
            promote_epoch: true,
            ..OverlapOptions::default()
        };
        assert!(!check_with("foo = 2.0", "foo = 1:1.0", &promote));
    }

    #[test]
    fn test_distance_tag_grammar() {
        let plain = OverlapOptions::default();
        let tagged = OverlapOptions {
            grammar: EvrOptions {
                distance_tag: true,
                compare_distance: false,
            },
            ..OverlapOptions::default()
        };
        // Without the grammar ":2011" lands in the release and makes it newer
        assert!(!check_with("foo = 1.0-1:2011", "foo = 1.0-1", &plain));
        assert!(check_with("foo = 1.0-1:2011", "foo = 1.0-1", &tagged));

        let compared = OverlapOptions {
            grammar: EvrOptions {
                distance_tag: true,
                compare_distance: true,
            },
            ..OverlapOptions::default()
        };
        assert!(!check_with("foo = 1.0-1:2011", "foo = 1.0-1:2012", &compared));
        assert!(check_with("foo = 1.0-1:2011", "foo < 1.0-1:2012", &compared));
        assert!(check_with("foo = 1.0-1:2011", "foo = 1.0-1", &compared));
    }

    #[test]
    fn test_zero_epoch_on_one_side() {
        assert!(check("foo = 0:1.0", "foo = 1.0"));
        assert!(check("foo = 1.0", "foo = 0:1.0"));
    }
}
