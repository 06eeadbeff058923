//! Java source model using tree-sitter

use crate::language::parser::LanguageParser;
use crate::model::{ClassDescriptor, MethodDescriptor, SourceUnit};
use anyhow::{Context, Result};
use tree_sitter::{Node, Parser};

/// Top-level declarations reported as classes
const TYPE_DECLARATION_KINDS: &[&str] = &[
    "class_declaration",
    "interface_declaration",
    "enum_declaration",
    "record_declaration",
];

/// Java parser using tree-sitter
pub struct JavaParser;

impl JavaParser {
    /// Create a new Java parser
    pub fn new() -> Result<Self> {
        // Just validate that the grammar loads
        new_parser()?;
        Ok(JavaParser)
    }
}

fn new_parser() -> Result<Parser> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_java::LANGUAGE.into())
        .context("Failed to set Java language for parser")?;
    Ok(parser)
}

impl LanguageParser for JavaParser {
    fn parse(&self, source: &str, filename: &str) -> Result<SourceUnit> {
        // tree-sitter parsers are stateful, so each call gets its own
        let mut parser = new_parser()?;
        let tree = parser
            .parse(source, None)
            .ok_or_else(|| anyhow::anyhow!("Failed to parse Java file: {}", filename))?;

        let root = tree.root_node();
        let package = extract_package(root, source);

        // Only top-level types, in source order
        let mut classes = Vec::new();
        let mut cursor = root.walk();
        for child in root.children(&mut cursor) {
            if TYPE_DECLARATION_KINDS.contains(&child.kind()) {
                if let Some(class) = extract_class(child, source, package.as_deref()) {
                    classes.push(class);
                }
            }
        }

        Ok(SourceUnit::new(filename, classes))
    }
}

/// Extract the dotted package name from the `package_declaration`, if any
fn extract_package(root: Node, source: &str) -> Option<String> {
    let declaration = find_child_by_kind(root, "package_declaration")?;
    let mut cursor = declaration.walk();
    let name = declaration
        .children(&mut cursor)
        .find(|child| matches!(child.kind(), "scoped_identifier" | "identifier"))?;

    // Rebuild from the identifier leaves so whitespace and comments drop out
    let mut segments = Vec::new();
    collect_identifiers(name, source, &mut segments);
    Some(segments.join("."))
}

fn collect_identifiers<'a>(node: Node, source: &'a str, segments: &mut Vec<&'a str>) {
    if node.kind() == "identifier" {
        if let Some(text) = node_text(node, source) {
            segments.push(text);
        }
        return;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_identifiers(child, source, segments);
    }
}

/// Build a descriptor from a type declaration
fn extract_class(node: Node, source: &str, package: Option<&str>) -> Option<ClassDescriptor> {
    let name = node_text(node.child_by_field_name("name")?, source)?;
    let qualified_name = match package {
        Some(package) if !package.is_empty() => format!("{}.{}", package, name),
        _ => name.to_string(),
    };

    let methods = node
        .child_by_field_name("body")
        .map(|body| extract_methods(body, source))
        .unwrap_or_default();

    Some(ClassDescriptor::new(qualified_name, methods))
}

/// Collect the methods declared directly in a type body, in source order
fn extract_methods(body: Node, source: &str) -> Vec<MethodDescriptor> {
    let mut methods = Vec::new();
    let mut cursor = body.walk();
    for member in body.children(&mut cursor) {
        match member.kind() {
            "method_declaration" => {
                if let Some(name) = member
                    .child_by_field_name("name")
                    .and_then(|n| node_text(n, source))
                {
                    methods.push(MethodDescriptor::new(name));
                }
            }
            // Enum members live one level down, after the constants
            "enum_body_declarations" => methods.extend(extract_methods(member, source)),
            _ => {}
        }
    }
    methods
}

fn node_text<'a>(node: Node, source: &'a str) -> Option<&'a str> {
    node.utf8_text(source.as_bytes()).ok()
}

/// Find a child node by kind
fn find_child_by_kind<'a>(node: Node<'a>, kind: &str) -> Option<Node<'a>> {
    let mut cursor = node.walk();
    let result = node.children(&mut cursor).find(|child| child.kind() == kind);
    result
}
