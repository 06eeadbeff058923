//! Text renderers: Markdown, plain text, and JSON entries
//!
//! Global invariants enforced:
//! - Sections and items appear exactly in event order
//! - Identical input yields byte-for-byte identical output

use crate::model::TestClassEntry;
use crate::sink::DocumentSink;

/// Renders a Markdown document
///
/// One blank line separates blocks; a section without items renders just
/// its heading.
#[derive(Debug, Default)]
pub struct MarkdownSink {
    output: String,
    list_pending: bool,
}

impl MarkdownSink {
    pub fn new() -> Self {
        MarkdownSink::default()
    }

    pub fn finish(self) -> String {
        self.output
    }
}

impl DocumentSink for MarkdownSink {
    fn begin_document(&mut self, title: &str) {
        self.output.push_str(&format!("# {}\n", escape_markdown(title)));
    }

    fn begin_section(&mut self, title: &str) {
        if !self.output.is_empty() {
            self.output.push('\n');
        }
        self.output
            .push_str(&format!("## {}\n", escape_markdown(title)));
    }

    fn end_section(&mut self) {}

    fn begin_list(&mut self) {
        self.list_pending = true;
    }

    fn list_item(&mut self, text: &str) {
        if self.list_pending {
            self.output.push('\n');
            self.list_pending = false;
        }
        self.output.push_str(&format!("- {}\n", escape_markdown(text)));
    }

    fn end_list(&mut self) {
        self.list_pending = false;
    }
}

/// Renders a plain listing for the terminal
///
/// ```text
/// Order service
///   - Places order
///   - Cancels order
/// ```
#[derive(Debug, Default)]
pub struct TextSink {
    output: String,
}

impl TextSink {
    pub fn new() -> Self {
        TextSink::default()
    }

    pub fn finish(self) -> String {
        self.output
    }
}

impl DocumentSink for TextSink {
    fn begin_section(&mut self, title: &str) {
        if !self.output.is_empty() {
            self.output.push('\n');
        }
        self.output.push_str(title);
        self.output.push('\n');
    }

    fn end_section(&mut self) {}

    fn begin_list(&mut self) {}

    fn list_item(&mut self, text: &str) {
        self.output.push_str(&format!("  - {}\n", text));
    }

    fn end_list(&mut self) {}
}

/// Collects sections back into entries (for JSON output)
#[derive(Debug, Default)]
pub struct EntryCollector {
    entries: Vec<TestClassEntry>,
}

impl EntryCollector {
    pub fn new() -> Self {
        EntryCollector::default()
    }

    pub fn into_entries(self) -> Vec<TestClassEntry> {
        self.entries
    }
}

impl DocumentSink for EntryCollector {
    fn begin_section(&mut self, title: &str) {
        self.entries.push(TestClassEntry {
            display_name: title.to_string(),
            method_entries: Vec::new(),
        });
    }

    fn end_section(&mut self) {}

    fn begin_list(&mut self) {}

    fn list_item(&mut self, text: &str) {
        if let Some(entry) = self.entries.last_mut() {
            entry.method_entries.push(text.to_string());
        }
    }

    fn end_list(&mut self) {}
}

/// Render entries as JSON output
pub fn render_json(entries: &[TestClassEntry]) -> String {
    serde_json::to_string_pretty(entries).unwrap_or_else(|_| "[]".to_string())
}

/// Backslash-escape characters Markdown would otherwise interpret
fn escape_markdown(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        if matches!(ch, '\\' | '`' | '*' | '_' | '[' | ']' | '<' | '>' | '#' | '|') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}
