//! Turns test identifiers into readable phrases
//!
//! `com.example.FooBarTest` becomes `Foo bar`, `testPlacesOrder` becomes
//! `Places order`. Every function here is total: a missing prefix, suffix,
//! or separator leaves the input untouched.

use crate::classify::{CLASS_SUFFIX, METHOD_PREFIX};

/// Humanize a test class name
///
/// Drops the package qualifier and a trailing `Test`, then splits camel case.
pub fn prettify_class_name(qualified_name: &str) -> String {
    let name = trim_package_prefix(qualified_name);
    let name = trim_test_suffix(name);
    expand_camel_case(name)
}

/// Humanize a test method name
///
/// Drops a leading `test`, then splits camel case.
pub fn prettify_method_name(name: &str) -> String {
    expand_camel_case(trim_test_prefix(name))
}

/// Keep only the part after the last `.`
pub fn trim_package_prefix(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) => &name[idx + 1..],
        None => name,
    }
}

/// Remove one trailing `Test`
pub fn trim_test_suffix(name: &str) -> &str {
    name.strip_suffix(CLASS_SUFFIX).unwrap_or(name)
}

/// Remove one leading `test`
pub fn trim_test_prefix(name: &str) -> &str {
    name.strip_prefix(METHOD_PREFIX).unwrap_or(name)
}

/// Split a camel-case identifier into lowercase words
///
/// Every uppercase character after the first position is preceded by a
/// single space and lowercased. The first character is never altered.
pub fn expand_camel_case(input: &str) -> String {
    let mut output = String::with_capacity(input.len() + input.len() / 4);
    for (idx, ch) in input.chars().enumerate() {
        if idx != 0 && ch.is_uppercase() {
            output.push(' ');
            output.extend(ch.to_lowercase());
        } else {
            output.push(ch);
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pretty_class_name_removes_test_suffix() {
        assert_eq!(prettify_class_name("BlahTest"), "Blah");
    }

    #[test]
    fn test_pretty_class_name_adds_spaces_for_camel_case() {
        assert_eq!(prettify_class_name("FooBarTest"), "Foo bar");
    }

    #[test]
    fn test_pretty_class_name_removes_package_prefix() {
        assert_eq!(prettify_class_name("com.mysite.FooTest"), "Foo");
    }

    #[test]
    fn test_pretty_class_name_without_suffix() {
        assert_eq!(prettify_class_name("com.example.OrderService"), "Order service");
    }

    #[test]
    fn test_pretty_class_name_exactly_suffix() {
        assert_eq!(prettify_class_name("Test"), "");
        assert_eq!(prettify_class_name("org.junit.Test"), "");
    }

    #[test]
    fn test_pretty_class_name_removes_only_last_suffix() {
        assert_eq!(prettify_class_name("TestTest"), "Test");
    }

    #[test]
    fn test_pretty_class_name_not_idempotent() {
        let once = prettify_class_name("TestTest");
        let twice = prettify_class_name(&once);
        assert_eq!(once, "Test");
        assert_eq!(twice, "");
    }

    #[test]
    fn test_pretty_method_name_removes_test_prefix() {
        assert_eq!(prettify_method_name("testFoo"), "Foo");
    }

    #[test]
    fn test_pretty_method_name_adds_spaces_for_camel_case() {
        assert_eq!(prettify_method_name("testFooBar"), "Foo bar");
    }

    #[test]
    fn test_pretty_method_name_without_prefix() {
        assert_eq!(prettify_method_name("helperMethod"), "helper method");
    }

    #[test]
    fn test_pretty_method_name_lexical_prefix() {
        assert_eq!(prettify_method_name("testingIsLexical"), "ing is lexical");
        assert_eq!(prettify_method_name("test"), "");
    }

    #[test]
    fn test_trim_package_prefix_identity_without_dot() {
        for name in ["", "Foo", "FooTest", "foo_bar", "Test"] {
            assert_eq!(trim_package_prefix(name), name);
        }
    }

    #[test]
    fn test_trim_package_prefix_trailing_dot() {
        assert_eq!(trim_package_prefix("com.example."), "");
    }

    #[test]
    fn test_trim_suffix_and_prefix_noop_when_absent() {
        assert_eq!(trim_test_suffix("Foo"), "Foo");
        assert_eq!(trim_test_suffix("TestFoo"), "TestFoo");
        assert_eq!(trim_test_prefix("fooTest"), "fooTest");
        assert_eq!(trim_test_prefix("TestFoo"), "TestFoo");
    }

    #[test]
    fn test_expand_camel_case_identity_without_inner_uppercase() {
        for input in ["", "foo", "Foo", "foo_bar", "F", "x1y2", "Éclair"] {
            assert_eq!(expand_camel_case(input), input);
        }
    }

    #[test]
    fn test_expand_camel_case_keeps_first_character() {
        assert_eq!(expand_camel_case("FooBar"), "Foo bar");
        assert_eq!(expand_camel_case("fooBar"), "foo bar");
    }

    #[test]
    fn test_expand_camel_case_acronyms_split_per_letter() {
        assert_eq!(expand_camel_case("ParsesXML"), "Parses x m l");
    }

    #[test]
    fn test_expand_camel_case_non_ascii_uppercase() {
        assert_eq!(expand_camel_case("großÄrger"), "groß ärger");
    }

    #[test]
    fn test_expand_camel_case_digits_and_underscores_untouched() {
        assert_eq!(expand_camel_case("Handles404_Error"), "Handles404_ error");
    }
}
