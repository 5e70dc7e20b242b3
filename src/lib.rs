//! # Minerva - automated deep research
//!
//! Minerva turns a free-text research query into a markdown report in
//! three model-backed stages: it plans a set of web searches, executes
//! them concurrently, and synthesizes the summaries into a structured
//! report that is persisted to disk.
//!
//! ## Overview
//!
//! Minerva can be used in two ways:
//!
//! 1. **As a CLI** - run the `minerva` binary with a research query
//! 2. **As a library** - drive [`research::ResearchCoordinator`] from your
//!    own code, optionally with your own [`llm::ModelClient`] and
//!    [`research::ReportStore`] implementations
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust,ignore
//! use minerva::llm::OpenAIClient;
//! use minerva::research::{FileReportStore, ResearchConfig, ResearchCoordinator};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Arc::new(OpenAIClient::new(
//!         std::env::var("OPENAI_API_KEY")?,
//!         "https://api.openai.com/v1".to_string(),
//!         "gpt-4o-mini".to_string(),
//!         Some("gpt-4o-mini-search-preview".to_string()),
//!     ));
//!     let store = Arc::new(FileReportStore::new("outputs"));
//!     let coordinator =
//!         ResearchCoordinator::new(client, store, ResearchConfig::default());
//!
//!     let record = coordinator
//!         .run_to_completion("Latest AI agent frameworks in 2026")
//!         .await?;
//!     println!("{}", record.report.markdown_report);
//!     Ok(())
//! }
//! ```
//!
//! ## Failure semantics
//!
//! Planning and synthesis failures abort a run. A failed search only
//! degrades the report: the coordinator joins on every launched search and
//! synthesizes from whatever summaries arrived. A failed report write is
//! reported but the in-memory report is still returned.
//!
//! ## Modules
//!
//! - [`research`] - the plan/search/write pipeline and its coordinator
//! - [`llm`] - model client abstraction and the OpenAI implementation
//! - [`types`] - data contracts, progress events, and error taxonomy
//! - [`cli`] - argument parsing and terminal output for the binary
//! - [`utils`] - environment-driven configuration

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

/// CLI argument parsing and terminal output.
pub mod cli;
/// Model provider clients and abstractions.
pub mod llm;
/// The research pipeline and its coordinator.
pub mod research;
/// Core types (data contracts, progress events, errors).
pub mod types;
/// Configuration utilities.
pub mod utils;

// Re-export commonly used types
pub use llm::{ModelClient, OpenAIClient, ResultShape};
pub use research::{
    FileReportStore, Planner, ReportStore, ResearchConfig, ResearchCoordinator, Searcher, Writer,
};
pub use types::{
    ProgressUpdate, ReportData, ResearchError, Result, RunRecord, SearchItem, SearchOutcome,
    SearchPlan, SearchRecord,
};
pub use utils::Config;
