//! testdox core library - readable specifications from JUnit-style test sources

#![deny(warnings)]

// Global invariants enforced in this crate:
// - Classification is purely lexical (names only)
// - No global mutable state
// - Traversal preserves declaration order; nothing is sorted after parsing
// - Identical input yields byte-for-byte identical output

pub mod classify;
pub mod config;
pub mod html;
pub mod humanize;
pub mod language;
pub mod model;
pub mod provider;
pub mod report;
pub mod sink;
pub mod traverse;

pub use classify::{is_test_class, is_test_method};
pub use config::ResolvedConfig;
pub use html::HtmlSink;
pub use humanize::{prettify_class_name, prettify_method_name};
pub use model::{ClassDescriptor, MethodDescriptor, SourceUnit, TestClassEntry};
pub use provider::{SourceModelProvider, SourceTree};
pub use report::{render_json, EntryCollector, MarkdownSink, TextSink};
pub use sink::{DocumentSink, EventLog, ReportEvent};
pub use traverse::{render_document, write_report, ReportOptions, ReportSummary};

use anyhow::Result;

/// Pull units from `provider` and render a complete document into `sink`
pub fn generate_report<P, S>(
    provider: &P,
    sink: &mut S,
    options: &ReportOptions,
) -> Result<ReportSummary>
where
    P: SourceModelProvider + ?Sized,
    S: DocumentSink + ?Sized,
{
    let units = provider.source_units()?;
    let summary = render_document(&units, sink, options);
    tracing::debug!(
        units = units.len(),
        test_classes = summary.test_classes,
        test_methods = summary.test_methods,
        "report generated"
    );
    Ok(summary)
}

/// Collect test class entries for every test source under `path`
pub fn collect_entries(
    path: &std::path::Path,
    config: &ResolvedConfig,
) -> Result<Vec<TestClassEntry>> {
    let tree = SourceTree::new(config.test_source_root(path)).with_config(config);
    let mut collector = EntryCollector::new();
    generate_report(&tree, &mut collector, &config.report_options())?;
    Ok(collector.into_entries())
}
