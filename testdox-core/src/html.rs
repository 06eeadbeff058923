//! HTML report generation
//!
//! Generates a self-contained HTML page with embedded CSS. The page works
//! offline and needs no JavaScript.

use crate::sink::DocumentSink;

/// Renders a standalone HTML document
#[derive(Debug, Default)]
pub struct HtmlSink {
    body: String,
    title: Option<String>,
}

impl HtmlSink {
    pub fn new() -> Self {
        HtmlSink::default()
    }

    /// Assemble the final page
    ///
    /// Works whether or not the document framing events were sent; without
    /// them the default title is used.
    pub fn finish(self) -> String {
        let title = self
            .title
            .unwrap_or_else(|| crate::traverse::DEFAULT_TITLE.to_string());

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{css}</style>
</head>
<body>
    <div class="container">
        <header>
            <h1>{title}</h1>
        </header>
{body}        {footer}
    </div>
</body>
</html>
"#,
            title = html_escape(&title),
            css = inline_css(),
            body = self.body,
            footer = render_footer(),
        )
    }
}

impl DocumentSink for HtmlSink {
    fn begin_document(&mut self, title: &str) {
        self.title = Some(title.to_string());
    }

    fn begin_section(&mut self, title: &str) {
        self.body.push_str(&format!(
            "        <section class=\"test-class\">\n            <h2>{}</h2>\n",
            html_escape(title)
        ));
    }

    fn end_section(&mut self) {
        self.body.push_str("        </section>\n");
    }

    fn begin_list(&mut self) {
        self.body.push_str("            <ul>\n");
    }

    fn list_item(&mut self, text: &str) {
        self.body
            .push_str(&format!("                <li>{}</li>\n", html_escape(text)));
    }

    fn end_list(&mut self) {
        self.body.push_str("            </ul>\n");
    }
}

/// Inline CSS styles
fn inline_css() -> &'static str {
    r#"
* {
    box-sizing: border-box;
    margin: 0;
    padding: 0;
}

body {
    font-family: system-ui, -apple-system, 'Segoe UI', sans-serif;
    line-height: 1.6;
    color: #111827;
    background: #ffffff;
}

.container {
    max-width: 960px;
    margin: 0 auto;
    padding: 2rem;
}

header {
    margin-bottom: 2rem;
    padding-bottom: 1rem;
    border-bottom: 2px solid #e5e7eb;
}

header h1 {
    font-size: 2rem;
    font-weight: 700;
}

.test-class {
    margin-bottom: 1.5rem;
}

.test-class h2 {
    font-size: 1.25rem;
    font-weight: 600;
    margin-bottom: 0.5rem;
}

.test-class ul {
    padding-left: 1.5rem;
    color: #374151;
}

footer {
    margin-top: 3rem;
    padding-top: 1rem;
    border-top: 1px solid #e5e7eb;
    color: #6b7280;
    font-size: 0.875rem;
}
"#
}

/// Render footer
fn render_footer() -> String {
    r#"<footer>
            <p>Generated by testdox</p>
        </footer>"#
        .to_string()
}

/// Escape HTML special characters
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
