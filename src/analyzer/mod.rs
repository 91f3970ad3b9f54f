//! The import-ordering oracle.
//!
//! The engine does not know what a canonical import order looks like; it
//! delegates that judgement to an [`ImportAnalyzer`]. Implementations check
//! a file without modifying it and report both the original and the
//! canonicalized content so the engine can describe the difference.
//!
//! The built-in [`CommandAnalyzer`] binds the trait to an external sorter
//! command; tests supply their own scripted implementations.

mod command;

pub use command::CommandAnalyzer;

use std::io::Write;
use std::path::Path;

/// Per-file answer from an import analyzer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    /// True when the file's imports deviate from canonical order.
    pub incorrectly_sorted: bool,
    /// Zero-based index of the first import line, when one was found.
    pub import_index: Option<usize>,
    /// The file content as checked, split into lines.
    pub original: Vec<String>,
    /// The same content with imports in canonical order.
    pub sorted: Vec<String>,
}

/// Errors an analyzer can produce for a single file.
///
/// None of these abort a batch; the driver discards them per file.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to run {command}: {source}")]
    Invoke {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("analyzer produced non-UTF-8 output")]
    Encoding(#[from] std::string::FromUtf8Error),
    #[error("analyzer failed: {0}")]
    Analyzer(String),
}

/// Checks one file's import ordering without modifying it.
///
/// `console` receives any incidental text the analyzer wants to print; the
/// invoker routes it away from the protocol stream for the duration of the
/// call.
pub trait ImportAnalyzer: Send + Sync {
    /// Check a single file in non-mutating mode.
    fn check(&self, path: &Path, console: &mut dyn Write) -> Result<Verdict, AnalysisError>;
}
