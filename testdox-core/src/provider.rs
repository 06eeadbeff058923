//! Source model providers
//!
//! A provider hands the traversal its source units. `SourceTree` reads and
//! parses a directory of Java test sources; slices and vectors of units act
//! as in-memory providers.
//!
//! Global invariants enforced:
//! - Files are visited in sorted path order
//! - Parallel parsing never changes the order of the resulting units

use crate::config::ResolvedConfig;
use crate::language::{is_supported_source_file, JavaParser, LanguageParser};
use crate::model::SourceUnit;
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Supplier of parsed source units, in a stable order
pub trait SourceModelProvider {
    fn source_units(&self) -> Result<Vec<SourceUnit>>;
}

impl SourceModelProvider for [SourceUnit] {
    fn source_units(&self) -> Result<Vec<SourceUnit>> {
        Ok(self.to_vec())
    }
}

impl SourceModelProvider for Vec<SourceUnit> {
    fn source_units(&self) -> Result<Vec<SourceUnit>> {
        Ok(self.clone())
    }
}

/// Callback invoked once per file after it has been parsed (or skipped)
pub type ProgressFn<'a> = &'a (dyn Fn(&Path) + Sync);

/// Java test sources below a file or directory
pub struct SourceTree<'a> {
    root: PathBuf,
    config: Option<&'a ResolvedConfig>,
    on_file: Option<ProgressFn<'a>>,
}

impl<'a> SourceTree<'a> {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        SourceTree {
            root: root.into(),
            config: None,
            on_file: None,
        }
    }

    /// Apply the configuration's include/exclude filters
    pub fn with_config(mut self, config: &'a ResolvedConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Report each processed file
    pub fn with_progress(mut self, on_file: ProgressFn<'a>) -> Self {
        self.on_file = Some(on_file);
        self
    }

    /// Source files that will be parsed, in order
    ///
    /// Include/exclude globs match paths relative to the root, so the
    /// location of the project itself never excludes it.
    pub fn files(&self) -> Result<Vec<PathBuf>> {
        let files = collect_source_files(&self.root)?;
        Ok(match self.config {
            Some(config) => files
                .into_iter()
                .filter(|path| config.should_include(self.relative(path)))
                .collect(),
            None => files,
        })
    }

    fn relative<'p>(&self, path: &'p Path) -> &'p Path {
        match path.strip_prefix(&self.root) {
            Ok(relative) if !relative.as_os_str().is_empty() => relative,
            // The root is the file itself
            _ => path.file_name().map(Path::new).unwrap_or(path),
        }
    }

    /// Parse an already collected file list, keeping its order
    pub fn parse_files(&self, files: Vec<PathBuf>) -> Result<Vec<SourceUnit>> {
        tracing::debug!(count = files.len(), root = %self.root.display(), "collected test sources");

        let parser = JavaParser::new()?;
        let on_file = self.on_file;
        let results: Vec<(PathBuf, Result<SourceUnit>)> = files
            .into_par_iter()
            .map(|path| {
                let result = parse_file(&parser, &path);
                if let Some(on_file) = on_file {
                    on_file(&path);
                }
                (path, result)
            })
            .collect();

        let mut units = Vec::with_capacity(results.len());
        let mut skipped_files: usize = 0;
        for (path, result) in results {
            match result {
                Ok(unit) => units.push(unit),
                Err(e) => {
                    tracing::warn!("skipping file {}: {:#}", path.display(), e);
                    skipped_files += 1;
                }
            }
        }
        if skipped_files > 0 {
            tracing::warn!("Skipped {} file(s) due to read or parse errors", skipped_files);
        }

        Ok(units)
    }
}

impl SourceModelProvider for SourceTree<'_> {
    fn source_units(&self) -> Result<Vec<SourceUnit>> {
        self.parse_files(self.files()?)
    }
}

fn parse_file(parser: &JavaParser, path: &Path) -> Result<SourceUnit> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read source file: {}", path.display()))?;
    parser.parse(&source, &path.to_string_lossy())
}

/// Collect all supported source files from a path (file or directory)
///
/// Returns paths sorted for deterministic order. A path that does not exist
/// is an error; an unsupported single file yields an empty list.
pub fn collect_source_files(path: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    if path.is_file() {
        if let Some(filename) = path.file_name().and_then(|n| n.to_str()) {
            if is_supported_source_file(filename) {
                files.push(path.to_path_buf());
            }
        }
    } else if path.is_dir() {
        collect_source_files_recursive(path, &mut files)?;
    } else {
        anyhow::bail!("Path does not exist: {}", path.display());
    }

    // Sort files for deterministic order
    files.sort();

    Ok(files)
}

/// Returns true for directory names that should not be traversed
///
/// Only hidden directories. Build output is left to the exclude globs, since
/// `build` or `out` can just as well be a package name.
fn is_skipped_dir(name: &str) -> bool {
    name.starts_with('.')
}

/// Process one directory entry, pushing source files or recursing into dirs
fn process_dir_entry(
    path: PathBuf,
    metadata: std::fs::Metadata,
    files: &mut Vec<PathBuf>,
) -> Result<()> {
    if metadata.is_symlink() {
        return Ok(());
    }

    let name = path.file_name().and_then(|n| n.to_str());
    if metadata.is_dir() {
        if name.is_some_and(is_skipped_dir) {
            return Ok(());
        }
        collect_source_files_recursive(&path, files)?;
    } else if metadata.is_file() && name.is_some_and(is_supported_source_file) {
        files.push(path);
    }

    Ok(())
}

/// Recursively collect supported source files from a directory
fn collect_source_files_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry_result in std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?
    {
        let entry = entry_result?;
        let path = entry.path();
        let metadata = std::fs::symlink_metadata(&path)
            .with_context(|| format!("Failed to read metadata: {}", path.display()))?;
        process_dir_entry(path, metadata, files)?;
    }

    Ok(())
}
