//! Document sink interface
//!
//! The traversal never builds markup itself. It drives a sink with
//! structural events in strict nesting order:
//!
//! ```text
//! begin_document(title)
//!   begin_section(title)
//!     begin_list()
//!       list_item(text) ...
//!     end_list()
//!   end_section()
//!   ...
//! end_document()
//! ```

use serde::{Deserialize, Serialize};

/// Consumer of structural report events
///
/// Sinks buffer in memory and never fail; writing the rendered document to
/// disk is the caller's job.
pub trait DocumentSink {
    /// Start of the whole document. Default: ignored.
    fn begin_document(&mut self, _title: &str) {}

    /// End of the whole document. Default: ignored.
    fn end_document(&mut self) {}

    fn begin_section(&mut self, title: &str);

    fn end_section(&mut self);

    fn begin_list(&mut self);

    fn list_item(&mut self, text: &str);

    fn end_list(&mut self);
}

impl<S: DocumentSink + ?Sized> DocumentSink for &mut S {
    fn begin_document(&mut self, title: &str) {
        (**self).begin_document(title)
    }

    fn end_document(&mut self) {
        (**self).end_document()
    }

    fn begin_section(&mut self, title: &str) {
        (**self).begin_section(title)
    }

    fn end_section(&mut self) {
        (**self).end_section()
    }

    fn begin_list(&mut self) {
        (**self).begin_list()
    }

    fn list_item(&mut self, text: &str) {
        (**self).list_item(text)
    }

    fn end_list(&mut self) {
        (**self).end_list()
    }
}

/// One structural event, as seen by a sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "text", rename_all = "snake_case")]
pub enum ReportEvent {
    BeginDocument(String),
    EndDocument,
    BeginSection(String),
    EndSection,
    BeginList,
    ListItem(String),
    EndList,
}

/// Sink that records every event it receives
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    events: Vec<ReportEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        EventLog::default()
    }

    pub fn events(&self) -> &[ReportEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<ReportEvent> {
        self.events
    }
}

impl DocumentSink for EventLog {
    fn begin_document(&mut self, title: &str) {
        self.events.push(ReportEvent::BeginDocument(title.to_string()));
    }

    fn end_document(&mut self) {
        self.events.push(ReportEvent::EndDocument);
    }

    fn begin_section(&mut self, title: &str) {
        self.events.push(ReportEvent::BeginSection(title.to_string()));
    }

    fn end_section(&mut self) {
        self.events.push(ReportEvent::EndSection);
    }

    fn begin_list(&mut self) {
        self.events.push(ReportEvent::BeginList);
    }

    fn list_item(&mut self, text: &str) {
        self.events.push(ReportEvent::ListItem(text.to_string()));
    }

    fn end_list(&mut self) {
        self.events.push(ReportEvent::EndList);
    }
}
