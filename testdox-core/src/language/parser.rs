//! Language-agnostic parser trait

use crate::model::SourceUnit;
use anyhow::Result;

/// Language-agnostic parser interface
///
/// Each supported language implements this trait to turn one source file
/// into a `SourceUnit`.
pub trait LanguageParser {
    /// Parse source code into a unit
    ///
    /// # Arguments
    ///
    /// * `source` - The source code to parse
    /// * `filename` - The name of the file being parsed (recorded on the unit
    ///   and used in error messages)
    ///
    /// # Returns
    ///
    /// The unit's classes and their methods in declaration order
    fn parse(&self, source: &str, filename: &str) -> Result<SourceUnit>;
}
