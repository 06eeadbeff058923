//! Report traversal
//!
//! Walks source units, keeps test classes and test methods, humanizes their
//! names, and drives a document sink.
//!
//! Global invariants enforced:
//! - Output order is the concatenation of each unit's declaration order
//! - No sorting, grouping, or deduplication across units
//! - One section per test class, one list item per test method

use crate::classify::{is_test_class, is_test_method};
use crate::humanize::{prettify_class_name, prettify_method_name};
use crate::model::{ClassDescriptor, MethodDescriptor, SourceUnit, TestClassEntry};
use crate::sink::DocumentSink;
use serde::{Deserialize, Serialize};

/// Default document title
pub const DEFAULT_TITLE: &str = "TestDox Report";

/// Options controlling report generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    /// Document title passed to `begin_document`
    pub title: String,
    /// Emit a section (with an empty list) for test classes without test methods
    pub emit_empty_sections: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        ReportOptions {
            title: DEFAULT_TITLE.to_string(),
            emit_empty_sections: true,
        }
    }
}

/// Counts of what a traversal emitted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub test_classes: usize,
    pub test_methods: usize,
}

/// Test classes of a unit, in declaration order
pub fn test_classes(unit: &SourceUnit) -> impl Iterator<Item = &ClassDescriptor> {
    unit.classes
        .iter()
        .filter(|class| is_test_class(&class.qualified_name))
}

/// Test methods of a class, in declaration order
pub fn test_methods(class: &ClassDescriptor) -> impl Iterator<Item = &MethodDescriptor> {
    class
        .methods
        .iter()
        .filter(|method| is_test_method(&method.name))
}

/// Humanize a test class and its test methods
pub fn build_entry(class: &ClassDescriptor) -> TestClassEntry {
    TestClassEntry {
        display_name: prettify_class_name(&class.qualified_name),
        method_entries: test_methods(class)
            .map(|method| prettify_method_name(&method.name))
            .collect(),
    }
}

/// Emit sections for every test class in `units`
///
/// Sections depend only on class classification: a test class with no test
/// methods still yields a section with an empty list unless
/// `options.emit_empty_sections` is off.
pub fn write_report<S>(units: &[SourceUnit], sink: &mut S, options: &ReportOptions) -> ReportSummary
where
    S: DocumentSink + ?Sized,
{
    let mut summary = ReportSummary::default();

    for unit in units {
        for class in test_classes(unit) {
            tracing::debug!(class = %class.qualified_name, file = %unit.path, "processing test class");

            let entry = build_entry(class);
            if entry.method_entries.is_empty() && !options.emit_empty_sections {
                tracing::debug!(class = %class.qualified_name, "skipping test class without test methods");
                continue;
            }

            emit_entry(&entry, sink);
            summary.test_classes += 1;
            summary.test_methods += entry.method_entries.len();
        }
    }

    summary
}

/// Emit a complete document: framing plus every test class section
pub fn render_document<S>(
    units: &[SourceUnit],
    sink: &mut S,
    options: &ReportOptions,
) -> ReportSummary
where
    S: DocumentSink + ?Sized,
{
    sink.begin_document(&options.title);
    let summary = write_report(units, sink, options);
    sink.end_document();
    summary
}

fn emit_entry<S: DocumentSink + ?Sized>(entry: &TestClassEntry, sink: &mut S) {
    sink.begin_section(&entry.display_name);
    sink.begin_list();
    for item in &entry.method_entries {
        sink.list_item(item);
    }
    sink.end_list();
    sink.end_section();
}
