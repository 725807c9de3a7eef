// tests/process_defaults.rs

//! Binding the default comparator freezes the process configuration with it.
//!
//! Kept in its own binary: the single test below owns the process defaults.

use rpmevr::config::{self, EngineConfig};
use rpmevr::version::{strategy, Comparator, ComparatorKind, NativeConfig};
use rpmevr::Error;

#[test]
fn test_bind_default_freezes_matching_configuration() {
    let native = NativeConfig {
        invert_digit_priority: true,
        ..NativeConfig::default()
    };
    strategy::bind_default(Comparator::Native(native.clone())).unwrap();

    assert_eq!(strategy::default_comparator(), &Comparator::Native(native.clone()));
    assert_eq!(config::global().comparator, ComparatorKind::Native);
    assert_eq!(config::global().native, native);
    assert_eq!(&config::global().comparator(), strategy::default_comparator());

    // Neither side can be replaced afterwards
    let err = config::install(EngineConfig::default()).unwrap_err();
    assert!(matches!(err, Error::AlreadyBound(_)));
    let err = strategy::bind_default(Comparator::foreign()).unwrap_err();
    assert!(matches!(err, Error::AlreadyBound(_)));
    assert_eq!(&config::global().comparator(), strategy::default_comparator());
}
