//! Command-line interface for sortcheck.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::analyzer::CommandAnalyzer;
use crate::config::Config;
use crate::engine::Engine;
use crate::report;
use crate::sink::OutputSink;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Default location of the engine configuration document.
const DEFAULT_CONFIG_PATH: &str = "/config.json";
/// Default analysis root all reported paths are made relative to.
const DEFAULT_CODE_ROOT: &str = "/code";
/// Default external sorter invocation (reads stdin, writes stdout).
const DEFAULT_ANALYZER_COMMAND: &str = "isort -";

/// Import ordering gate - emits Code Climate style diagnostics.
///
/// sortcheck walks a source tree, finds Python files by extension or
/// shebang, asks an external import sorter whether each file's imports are
/// canonically ordered, and reports every deviation together with a
/// suggested-change diff.
#[derive(Parser)]
#[command(name = "sortcheck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run as an analysis engine: read the config document and stream
    /// NUL-delimited JSON issues to stdout
    Run(RunArgs),
    /// Check paths directly and print findings for humans
    Check(CheckArgs),
}

/// Arguments for the run command.
#[derive(Parser)]
pub struct RunArgs {
    /// Path to the configuration document
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Analysis root that include_paths resolve against
    #[arg(short, long, default_value = DEFAULT_CODE_ROOT)]
    pub root: PathBuf,

    /// External sorter command, fed each file on stdin
    #[arg(long, default_value = DEFAULT_ANALYZER_COMMAND)]
    pub analyzer: String,
}

/// Arguments for the check command.
#[derive(Parser)]
pub struct CheckArgs {
    /// Paths to check (files or directories)
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// External sorter command, fed each file on stdin
    #[arg(long, default_value = DEFAULT_ANALYZER_COMMAND)]
    pub analyzer: String,

    /// Skip the suggested-change diff
    #[arg(long)]
    pub no_diff: bool,
}

/// Run the engine protocol.
///
/// Configuration errors are fatal before any output is produced; issues
/// found versus none found is signaled only through the emitted records,
/// never the exit status.
pub fn run_engine(args: &RunArgs) -> anyhow::Result<i32> {
    let analyzer = match CommandAnalyzer::from_command_line(&args.analyzer) {
        Some(a) => a,
        None => {
            eprintln!("Error: empty analyzer command");
            return Ok(EXIT_ERROR);
        }
    };

    let config = Config::parse_file(&args.config)?;

    let engine = Engine::new(&args.root, &analyzer).include_diff(config.should_include_diff());
    let mut sink = OutputSink::new(std::io::stdout());
    engine.run(&config, &mut sink)?;

    Ok(EXIT_SUCCESS)
}

/// Run the interactive check command.
pub fn run_check(args: &CheckArgs) -> anyhow::Result<i32> {
    let analyzer = match CommandAnalyzer::from_command_line(&args.analyzer) {
        Some(a) => a,
        None => {
            eprintln!("Error: empty analyzer command");
            return Ok(EXIT_ERROR);
        }
    };

    // Paths in the report are relative to the invocation directory.
    let root = std::env::current_dir()?;
    let engine = Engine::new(&root, &analyzer).include_diff(!args.no_diff);
    let diagnostics = engine.check_paths(&args.paths);

    report::write_pretty(&diagnostics);

    if diagnostics.is_empty() {
        Ok(EXIT_SUCCESS)
    } else {
        Ok(EXIT_FAILED)
    }
}
