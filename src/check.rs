//! Per-file check invocation.

use std::io::Write;
use std::path::Path;

use crate::analyzer::{AnalysisError, ImportAnalyzer, Verdict};
use crate::sink::OutputSink;

/// Run the analyzer on one file with the output sink suppressed.
///
/// The suppressor guard is held for the full duration of the analyzer call,
/// so nothing the analyzer prints can reach the protocol stream. Returns
/// `Ok(Some(verdict))` only when the file's imports are incorrectly sorted;
/// a clean file yields `Ok(None)`. Errors are the caller's to discard - one
/// file's failure must never abort a batch.
pub fn check_file<W: Write>(
    analyzer: &dyn ImportAnalyzer,
    path: &Path,
    sink: &mut OutputSink<W>,
) -> Result<Option<Verdict>, AnalysisError> {
    let verdict = {
        let mut console = sink.suppress();
        analyzer.check(path, &mut console)?
    };

    if verdict.incorrectly_sorted {
        Ok(Some(verdict))
    } else {
        Ok(None)
    }
}
