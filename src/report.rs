//! Diagnostic records and the output protocol.
//!
//! Issues follow the Code Climate issue schema and are streamed as compact
//! JSON records, each terminated by a single NUL byte and flushed
//! immediately so consumers can process them as they appear. A colored
//! pretty printer serves the interactive `check` command.

use colored::*;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;

use crate::analyzer::Verdict;
use crate::diff;
use crate::sink::OutputSink;

/// Every record this engine emits is an issue.
const ISSUE_TYPE: &str = "issue";
/// Name of the single check this engine performs.
pub const CHECK_NAME: &str = "Incorrectly Sorted Imports";
const DESCRIPTION: &str = "Imports are incorrectly sorted";
/// Fixed remediation cost for re-sorting an import block.
const REMEDIATION_POINTS: u64 = 50_000;

/// Code Climate issue severities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Minor,
    Major,
    Critical,
    Blocker,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Minor => write!(f, "minor"),
            Severity::Major => write!(f, "major"),
            Severity::Critical => write!(f, "critical"),
            Severity::Blocker => write!(f, "blocker"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "info" => Ok(Severity::Info),
            "minor" => Ok(Severity::Minor),
            "major" => Ok(Severity::Major),
            "critical" => Ok(Severity::Critical),
            "blocker" => Ok(Severity::Blocker),
            _ => Err(format!("unknown severity: {}", s)),
        }
    }
}

/// Code Climate issue categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Bug Risk")]
    BugRisk,
    Clarity,
    Compatibility,
    Complexity,
    Duplication,
    Performance,
    Security,
    Style,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::BugRisk => "Bug Risk",
            Category::Clarity => "Clarity",
            Category::Compatibility => "Compatibility",
            Category::Complexity => "Complexity",
            Category::Duplication => "Duplication",
            Category::Performance => "Performance",
            Category::Security => "Security",
            Category::Style => "Style",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One emitted issue.
///
/// Field order matters: serialization follows declaration order, and
/// consumers diff the byte stream across engine versions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    #[serde(rename = "type")]
    pub kind: String,
    pub check_name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
    pub categories: Vec<Category>,
    pub location: Location,
    pub remediation_points: u64,
    pub severity: Severity,
}

/// Markdown payload attached to an issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    pub body: String,
}

/// Where an issue lives, relative to the analysis root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub path: String,
    pub lines: Lines,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lines {
    pub begin: usize,
    pub end: usize,
}

impl Diagnostic {
    /// Build the record for a positive verdict.
    ///
    /// `path` is made relative to `root` so output is stable across
    /// environments; the suggested-change diff, when requested, is labeled
    /// with that relative path on both sides.
    pub fn from_verdict(root: &Path, path: &Path, verdict: &Verdict, include_diff: bool) -> Self {
        let rel = relative_path(path, root);
        let line = verdict.import_index.map(|i| i + 1).unwrap_or(1);

        let content = if include_diff {
            let patch = diff::unified_diff(&verdict.original, &verdict.sorted, &rel, &rel);
            Some(Content {
                body: format!("Suggested change:\n\n```diff\n{}\n```", patch),
            })
        } else {
            None
        };

        Diagnostic {
            kind: ISSUE_TYPE.to_string(),
            check_name: CHECK_NAME.to_string(),
            description: DESCRIPTION.to_string(),
            content,
            categories: vec![Category::Style],
            location: Location {
                path: rel,
                lines: Lines {
                    begin: line,
                    end: line,
                },
            },
            remediation_points: REMEDIATION_POINTS,
            severity: Severity::Minor,
        }
    }
}

/// Make a path relative to the analysis root, with forward slashes.
fn relative_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

/// Write one record to the sink: compact JSON, a NUL terminator, then an
/// eager flush so a consumer can stream results as they are produced.
pub fn emit<W: Write>(diagnostic: &Diagnostic, sink: &mut OutputSink<W>) -> anyhow::Result<()> {
    serde_json::to_writer(&mut *sink, diagnostic)?;
    sink.write_all(&[0u8])?;
    sink.flush()?;
    Ok(())
}

/// Print findings for humans (the `check` command).
pub fn write_pretty(diagnostics: &[Diagnostic]) {
    if diagnostics.is_empty() {
        println!("{}", "No import ordering issues found".green());
        return;
    }

    println!();
    println!(
        "  {} ({}):",
        "Import ordering issues".bold(),
        diagnostics.len()
    );
    println!();

    for d in diagnostics {
        print!("    {} ", "WARN ".yellow());
        print!("{}", d.location.path.blue());
        println!("{}", format!(":{}", d.location.lines.begin).dimmed());
        println!("            {}", d.description);

        if let Some(content) = &d.content {
            println!();
            for line in content.body.lines() {
                println!("      {}", line);
            }
        }
        println!();
    }
}
