//! Configuration file support for testdox
//!
//! Loads project-specific configuration from JSON files.
//!
//! Search order:
//! 1. Explicit path (--config CLI flag)
//! 2. `.testdoxrc.json` in project root
//! 3. `testdox.config.json` in project root
//!
//! All fields are optional. CLI flags take precedence over config file values.

use crate::traverse::{ReportOptions, DEFAULT_TITLE};
use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Conventional location of test sources below the project root
pub const DEFAULT_TEST_SOURCE_DIR: &str = "src/test/java";

/// Default exclude patterns applied when no excludes are configured
const DEFAULT_EXCLUDES: &[&str] = &["**/target/**", "**/build/**"];

/// testdox configuration loaded from a JSON config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TestdoxConfig {
    /// Glob patterns for files to include (default: all `.java` files)
    #[serde(default)]
    pub include: Vec<String>,

    /// Glob patterns for files to exclude (default: build output directories)
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Report title (default: "TestDox Report")
    #[serde(default)]
    pub title: Option<String>,

    /// Test source directory relative to the project root (default: src/test/java)
    #[serde(default)]
    pub test_source_dir: Option<String>,

    /// Emit sections for test classes without test methods (default: true)
    #[serde(default)]
    pub empty_sections: Option<bool>,

    /// Output file for the rendered report
    #[serde(default)]
    pub output: Option<String>,
}

/// Resolved configuration with compiled glob patterns
#[derive(Debug)]
pub struct ResolvedConfig {
    /// Compiled include patterns (None means include all)
    pub include: Option<GlobSet>,
    /// Compiled exclude patterns
    pub exclude: GlobSet,
    pub title: String,
    pub test_source_dir: PathBuf,
    pub emit_empty_sections: bool,
    pub output: Option<PathBuf>,
    /// Path the config was loaded from (None if defaults)
    pub config_path: Option<PathBuf>,
}

impl TestdoxConfig {
    /// Validate the configuration for logical errors
    pub fn validate(&self) -> Result<()> {
        if let Some(ref title) = self.title {
            if title.trim().is_empty() {
                anyhow::bail!("title must not be empty");
            }
        }

        if let Some(ref dir) = self.test_source_dir {
            if dir.trim().is_empty() {
                anyhow::bail!("test_source_dir must not be empty");
            }
        }

        if let Some(ref output) = self.output {
            if output.trim().is_empty() {
                anyhow::bail!("output must not be empty");
            }
        }

        // Validate glob patterns compile
        for pattern in &self.include {
            Glob::new(pattern).with_context(|| format!("invalid include pattern: {}", pattern))?;
        }
        for pattern in &self.exclude {
            Glob::new(pattern).with_context(|| format!("invalid exclude pattern: {}", pattern))?;
        }

        Ok(())
    }

    /// Resolve config into compiled form ready for use
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        self.validate()?;

        let include = if self.include.is_empty() {
            None
        } else {
            let mut builder = GlobSetBuilder::new();
            for pattern in &self.include {
                builder.add(Glob::new(pattern)?);
            }
            Some(builder.build()?)
        };

        // User excludes replace the defaults
        let exclude = {
            let mut builder = GlobSetBuilder::new();
            if self.exclude.is_empty() {
                for pattern in DEFAULT_EXCLUDES {
                    builder.add(Glob::new(pattern)?);
                }
            } else {
                for pattern in &self.exclude {
                    builder.add(Glob::new(pattern)?);
                }
            }
            builder.build()?
        };

        Ok(ResolvedConfig {
            include,
            exclude,
            title: self
                .title
                .clone()
                .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            test_source_dir: PathBuf::from(
                self.test_source_dir
                    .as_deref()
                    .unwrap_or(DEFAULT_TEST_SOURCE_DIR),
            ),
            emit_empty_sections: self.empty_sections.unwrap_or(true),
            output: self.output.as_ref().map(PathBuf::from),
            config_path: None,
        })
    }
}

impl ResolvedConfig {
    /// Check if a file path should be included based on include/exclude patterns
    pub fn should_include(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();

        // Check exclude first
        if self.exclude.is_match(path_str.as_ref()) {
            return false;
        }

        // If include patterns exist, file must match at least one
        if let Some(ref include) = self.include {
            return include.is_match(path_str.as_ref());
        }

        true
    }

    /// Report options derived from this configuration
    pub fn report_options(&self) -> ReportOptions {
        ReportOptions {
            title: self.title.clone(),
            emit_empty_sections: self.emit_empty_sections,
        }
    }

    /// Directory to scan for a project
    ///
    /// The configured test source directory when it exists below
    /// `project_root`, otherwise `project_root` itself.
    pub fn test_source_root(&self, project_root: &Path) -> PathBuf {
        let candidate = project_root.join(&self.test_source_dir);
        if candidate.is_dir() {
            candidate
        } else {
            project_root.to_path_buf()
        }
    }

    /// Build a ResolvedConfig with all defaults (no config file)
    pub fn defaults() -> Result<Self> {
        TestdoxConfig::default().resolve()
    }
}

/// Discover and load a config file from the project root
///
/// Search order:
/// 1. `.testdoxrc.json`
/// 2. `testdox.config.json`
///
/// Returns `None` if no config file is found (use defaults).
pub fn discover_config(project_root: &Path) -> Result<Option<(TestdoxConfig, PathBuf)>> {
    for name in [".testdoxrc.json", "testdox.config.json"] {
        let path = project_root.join(name);
        if path.exists() {
            let config = load_config_file(&path)?;
            return Ok(Some((config, path)));
        }
    }

    Ok(None)
}

/// Load config from an explicit file path
pub fn load_config_file(path: &Path) -> Result<TestdoxConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;

    let config: TestdoxConfig = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse config file: {}", path.display()))?;

    config
        .validate()
        .with_context(|| format!("invalid config in: {}", path.display()))?;

    Ok(config)
}

/// Load and resolve config for a project
///
/// If `config_path` is provided, loads from that file.
/// Otherwise, discovers config from the project root.
/// Returns default config if nothing is found.
pub fn load_and_resolve(project_root: &Path, config_path: Option<&Path>) -> Result<ResolvedConfig> {
    let (config, source_path) = if let Some(path) = config_path {
        let config = load_config_file(path)?;
        (config, Some(path.to_path_buf()))
    } else {
        match discover_config(project_root)? {
            Some((config, path)) => (config, Some(path)),
            None => (TestdoxConfig::default(), None),
        }
    };

    let mut resolved = config.resolve()?;
    resolved.config_path = source_path;
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_default_config_is_valid() {
        let config = TestdoxConfig::default();
        config.validate().expect("default config should be valid");
        let resolved = config.resolve().expect("default config should resolve");
        assert!(resolved.include.is_none());
        assert_eq!(resolved.title, "TestDox Report");
        assert_eq!(resolved.test_source_dir, PathBuf::from("src/test/java"));
        assert!(resolved.emit_empty_sections);
        assert!(resolved.output.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: TestdoxConfig = serde_json::from_str("{}").unwrap();
        config.validate().unwrap();
    }

    #[test]
    fn test_parse_full_config() {
        let json = r#"{
            "include": ["**/*Test.java"],
            "exclude": ["**/generated/**"],
            "title": "Order Service Specs",
            "test_source_dir": "src/it/java",
            "empty_sections": false,
            "output": "docs/testdox.html"
        }"#;
        let config: TestdoxConfig = serde_json::from_str(json).unwrap();
        let resolved = config.resolve().unwrap();
        assert!(resolved.include.is_some());
        assert_eq!(resolved.title, "Order Service Specs");
        assert_eq!(resolved.test_source_dir, PathBuf::from("src/it/java"));
        assert!(!resolved.emit_empty_sections);
        assert_eq!(resolved.output, Some(PathBuf::from("docs/testdox.html")));
    }

    #[test]
    fn test_reject_unknown_fields() {
        let result: Result<TestdoxConfig, _> = serde_json::from_str(r#"{"suffix": "Spec"}"#);
        assert!(result.is_err(), "unknown fields should be rejected");
    }

    #[test]
    fn test_reject_blank_title() {
        let config: TestdoxConfig = serde_json::from_str(r#"{"title": "   "}"#).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_reject_blank_test_source_dir() {
        let config: TestdoxConfig = serde_json::from_str(r#"{"test_source_dir": ""}"#).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_reject_invalid_glob_pattern() {
        let config: TestdoxConfig = serde_json::from_str(r#"{"include": ["[invalid"]}"#).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_should_include_default_excludes() {
        let resolved = ResolvedConfig::defaults().unwrap();
        assert!(!resolved.should_include(Path::new("module/target/generated/FooTest.java")));
        assert!(!resolved.should_include(Path::new("app/build/tmp/BarTest.java")));
        assert!(resolved.should_include(Path::new("src/test/java/com/example/FooTest.java")));
    }

    #[test]
    fn test_should_include_custom_patterns() {
        let config: TestdoxConfig = serde_json::from_str(
            r#"{
            "include": ["**/*Test.java"],
            "exclude": ["**/legacy/**"]
        }"#,
        )
        .unwrap();
        let resolved = config.resolve().unwrap();
        assert!(resolved.should_include(Path::new("src/test/java/FooTest.java")));
        assert!(!resolved.should_include(Path::new("src/test/java/Fixtures.java")));
        assert!(!resolved.should_include(Path::new("src/test/java/legacy/OldTest.java")));
        // User excludes replace the defaults
        assert!(resolved.should_include(Path::new("target/FooTest.java")));
    }

    #[test]
    fn test_report_options_follow_config() {
        let config: TestdoxConfig =
            serde_json::from_str(r#"{"title": "Specs", "empty_sections": false}"#).unwrap();
        let options = config.resolve().unwrap().report_options();
        assert_eq!(options.title, "Specs");
        assert!(!options.emit_empty_sections);
    }

    #[test]
    fn test_test_source_root_prefers_convention() {
        let dir = tempfile::tempdir().unwrap();
        let resolved = ResolvedConfig::defaults().unwrap();
        assert_eq!(resolved.test_source_root(dir.path()), dir.path());

        let java_dir = dir.path().join("src").join("test").join("java");
        fs::create_dir_all(&java_dir).unwrap();
        assert_eq!(resolved.test_source_root(dir.path()), java_dir);
    }

    #[test]
    fn test_discover_testdoxrc() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join(".testdoxrc.json");
        fs::write(&config_path, r#"{"title": "From rc"}"#).unwrap();

        let (config, path) = discover_config(dir.path()).unwrap().unwrap();
        assert_eq!(config.title.as_deref(), Some("From rc"));
        assert_eq!(path, config_path);
    }

    #[test]
    fn test_discover_testdox_config_json() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("testdox.config.json"),
            r#"{"empty_sections": false}"#,
        )
        .unwrap();

        let (config, _) = discover_config(dir.path()).unwrap().unwrap();
        assert_eq!(config.empty_sections, Some(false));
    }

    #[test]
    fn test_discover_priority_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".testdoxrc.json"), r#"{"title": "rc"}"#).unwrap();
        fs::write(
            dir.path().join("testdox.config.json"),
            r#"{"title": "config"}"#,
        )
        .unwrap();

        let (config, _) = discover_config(dir.path()).unwrap().unwrap();
        assert_eq!(
            config.title.as_deref(),
            Some("rc"),
            ".testdoxrc.json should take priority"
        );
    }

    #[test]
    fn test_no_config_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discover_config(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_discover_reports_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".testdoxrc.json"), "{ not json").unwrap();
        assert!(discover_config(dir.path()).is_err());
    }

    #[test]
    fn test_load_and_resolve_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let resolved = load_and_resolve(dir.path(), None).unwrap();
        assert!(resolved.config_path.is_none());
        assert_eq!(resolved.title, "TestDox Report");
    }

    #[test]
    fn test_load_and_resolve_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("custom.json");
        fs::write(&config_path, r#"{"title": "Custom"}"#).unwrap();

        let resolved = load_and_resolve(dir.path(), Some(&config_path)).unwrap();
        assert_eq!(resolved.title, "Custom");
        assert_eq!(resolved.config_path, Some(config_path));
    }
}
