//! sortcheck - import ordering gate for Python sources.
//!
//! sortcheck walks a source tree, identifies Python files by extension or
//! shebang, asks an external import sorter whether each file's imports are
//! canonically ordered, and streams Code Climate style diagnostics -
//! including a suggested-change diff - as NUL-delimited JSON records.
//!
//! # Architecture
//!
//! Data flows strictly downstream through small single-purpose modules:
//!
//! - `walk`: lazy traversal of candidate paths
//! - `classify`: Python file detection by suffix or shebang
//! - `analyzer`: the pluggable import-ordering oracle
//! - `check`: per-file analyzer invocation with output isolation
//! - `diff`: unified diff between current and canonical ordering
//! - `report`: diagnostic records and the output protocol
//! - `engine`: the batch driver tying the pipeline together
//!
//! The sorting algorithm itself lives behind the [`ImportAnalyzer`] trait;
//! the built-in [`CommandAnalyzer`] binds it to an external sorter command.

pub mod analyzer;
pub mod check;
pub mod classify;
pub mod cli;
pub mod config;
pub mod diff;
pub mod engine;
pub mod report;
pub mod sink;
pub mod walk;

pub use analyzer::{AnalysisError, CommandAnalyzer, ImportAnalyzer, Verdict};
pub use config::Config;
pub use engine::Engine;
pub use report::{Category, Diagnostic, Severity};
pub use sink::OutputSink;
pub use walk::Walker;
