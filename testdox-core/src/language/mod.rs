//! Source model providers
//!
//! Turns source text into `SourceUnit` descriptors. Only the parser lives
//! here; directory walking and configuration filters are in `provider`.

pub mod java;
pub mod parser;

pub use java::JavaParser;
pub use parser::LanguageParser;

/// File extension handled by the Java parser
pub const JAVA_EXTENSION: &str = "java";

/// Check if a file name is a supported test source file
pub fn is_supported_source_file(filename: &str) -> bool {
    std::path::Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ext == JAVA_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_source_files() {
        assert!(is_supported_source_file("FooTest.java"));
        assert!(is_supported_source_file("com/example/FooTest.java"));
        assert!(!is_supported_source_file("FooTest.class"));
        assert!(!is_supported_source_file("FooTest.kt"));
        assert!(!is_supported_source_file("java"));
        assert!(!is_supported_source_file("FooTest.JAVA"));
    }
}
