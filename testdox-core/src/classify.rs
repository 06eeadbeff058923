//! Lexical test classification
//!
//! Membership is decided purely from names, never from types, annotations,
//! or inheritance.

use crate::humanize::trim_package_prefix;

/// Suffix that marks a class as a test class
pub const CLASS_SUFFIX: &str = "Test";

/// Prefix that marks a method as a test method
pub const METHOD_PREFIX: &str = "test";

/// Check if a (possibly package-qualified) class name names a test class
///
/// The package qualifier is ignored; the simple name must end with `Test`
/// (case-sensitive). A class named exactly `Test` qualifies.
pub fn is_test_class(name: &str) -> bool {
    trim_package_prefix(name).ends_with(CLASS_SUFFIX)
}

/// Check if a method name names a test method
///
/// Plain prefix check, not word-boundary aware: `testing` qualifies.
pub fn is_test_method(name: &str) -> bool {
    name.starts_with(METHOD_PREFIX)
}
