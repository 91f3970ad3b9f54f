//! Subprocess binding of the external import sorter.

use lazy_static::lazy_static;
use regex::Regex;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use super::{AnalysisError, ImportAnalyzer, Verdict};

lazy_static! {
    /// A Python import statement at the start of a line.
    static ref IMPORT_LINE_RE: Regex = Regex::new(r"^(?:import|from)\s").unwrap();
}

/// Drives an external sorter command in stdin-to-stdout mode.
///
/// The file content is piped to the command's stdin and whatever the command
/// writes to stdout is taken as the canonical ordering; the file on disk is
/// never modified. A file is incorrectly sorted exactly when the canonical
/// output differs from the original content.
pub struct CommandAnalyzer {
    program: String,
    args: Vec<String>,
}

impl CommandAnalyzer {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        CommandAnalyzer {
            program: program.into(),
            args,
        }
    }

    /// Split a space-separated command line into program and arguments.
    ///
    /// Returns `None` for an empty command line.
    pub fn from_command_line(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace();
        let program = parts.next()?.to_string();
        let args = parts.map(str::to_string).collect();
        Some(CommandAnalyzer { program, args })
    }
}

impl ImportAnalyzer for CommandAnalyzer {
    fn check(&self, path: &Path, console: &mut dyn Write) -> Result<Verdict, AnalysisError> {
        let content = std::fs::read_to_string(path).map_err(|source| AnalysisError::Read {
            path: path.display().to_string(),
            source,
        })?;

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| AnalysisError::Invoke {
                command: self.program.clone(),
                source,
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            // A dying child closes the pipe; the exit status below reports it.
            let _ = stdin.write_all(content.as_bytes());
        }

        let output = child
            .wait_with_output()
            .map_err(|source| AnalysisError::Invoke {
                command: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AnalysisError::Analyzer(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        // Sorter chatter on stderr goes to the (suppressed) console.
        let _ = console.write_all(&output.stderr);

        let canonical = String::from_utf8(output.stdout)?;
        let original: Vec<String> = content.lines().map(str::to_string).collect();
        let sorted: Vec<String> = canonical.lines().map(str::to_string).collect();

        Ok(Verdict {
            incorrectly_sorted: original != sorted,
            import_index: original.iter().position(|l| IMPORT_LINE_RE.is_match(l)),
            original,
            sorted,
        })
    }
}
