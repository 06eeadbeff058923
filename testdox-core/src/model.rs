//! In-memory descriptors of parsed test sources
//!
//! Global invariants enforced:
//! - Descriptors keep declaration order exactly as supplied
//! - Nothing is sorted, deduplicated, or mutated after construction

use serde::{Deserialize, Serialize};

/// One parsed compilation unit
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SourceUnit {
    /// File the unit was parsed from (empty for in-memory units)
    #[serde(default)]
    pub path: String,
    pub classes: Vec<ClassDescriptor>,
}

/// A class (or interface, enum, record) declared in a source unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDescriptor {
    /// Class name, optionally qualified with a `.`-separated package
    pub qualified_name: String,
    pub methods: Vec<MethodDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDescriptor {
    pub name: String,
}

/// A test class ready for rendering: humanized title plus humanized test methods
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestClassEntry {
    pub display_name: String,
    pub method_entries: Vec<String>,
}

impl SourceUnit {
    pub fn new(path: impl Into<String>, classes: Vec<ClassDescriptor>) -> Self {
        SourceUnit {
            path: path.into(),
            classes,
        }
    }

    /// Build a unit that did not come from a file
    pub fn in_memory(classes: Vec<ClassDescriptor>) -> Self {
        SourceUnit::new(String::new(), classes)
    }
}

impl ClassDescriptor {
    pub fn new(qualified_name: impl Into<String>, methods: Vec<MethodDescriptor>) -> Self {
        ClassDescriptor {
            qualified_name: qualified_name.into(),
            methods,
        }
    }

    /// Build a class from a list of method names
    pub fn with_method_names<I, S>(qualified_name: impl Into<String>, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ClassDescriptor::new(
            qualified_name,
            names.into_iter().map(MethodDescriptor::new).collect(),
        )
    }

    /// Class name without its package qualifier
    pub fn simple_name(&self) -> &str {
        crate::humanize::trim_package_prefix(&self.qualified_name)
    }
}

impl MethodDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        MethodDescriptor { name: name.into() }
    }
}
