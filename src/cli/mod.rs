//! CLI for the minerva binary
//!
//! Argument parsing with clap and colored terminal output with owo-colors.
//! Flags override the environment-driven configuration.

pub mod output;

use clap::Parser;
use std::path::PathBuf;

/// Minerva - automated deep research
///
/// Plans a set of web searches for a query, runs them concurrently, and
/// synthesizes the findings into a markdown report.
#[derive(Parser, Debug)]
#[command(
    name = "minerva",
    author = "Dirmacs <build@dirmacs.com>",
    version,
    about = "Minerva - automated deep research agent",
    long_about = "Plans a set of web searches for a research query, executes them\n\
                  concurrently, synthesizes the summaries into a markdown report, and\n\
                  saves the report under the outputs directory.",
    after_help = "EXAMPLES:\n    \
                  minerva \"Latest AI agent frameworks in 2026\"\n    \
                  minerva --searches 3 \"History of the borrow checker\"\n    \
                  minerva --timeout-secs 60 --output-dir reports \"RISC-V adoption\"\n\n\
                  Requires OPENAI_API_KEY (or a .env file providing it)."
)]
pub struct Cli {
    /// The research query
    pub query: String,

    /// Number of searches to plan
    #[arg(short, long)]
    pub searches: Option<usize>,

    /// Directory to write the report into
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Per-search timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Chat model for planning and synthesis
    #[arg(long)]
    pub model: Option<String>,

    /// Search-preview model for web searches
    #[arg(long)]
    pub search_model: Option<String>,

    /// Abort instead of writing a report when every search fails
    #[arg(long)]
    pub abort_when_no_summaries: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}
