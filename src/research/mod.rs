//! Deep research pipeline
//!
//! This module implements the full research workflow: plan a set of web
//! searches for a query, execute them concurrently, synthesize the
//! summaries into a markdown report, and persist the result.
//!
//! # Architecture
//!
//! The pipeline is three single-purpose stages glued by a coordinator:
//!
//! - [`Planner`] - turns a query into a [`crate::types::SearchPlan`]
//! - [`Searcher`] - turns one planned item into a summary (or a local
//!   failure that never aborts the run)
//! - [`Writer`] - turns the query plus all summaries into a
//!   [`crate::types::ReportData`]
//! - [`ResearchCoordinator`] - drives the stages in sequence, fans the
//!   searches out, joins on all of them, and hands the report to a
//!   [`ReportStore`]
//!
//! Data flows strictly one direction: query, then plan, then summaries,
//! then report, then stored artifact. No stage calls back into an earlier
//! one.
//!
//! # Usage
//!
//! ```ignore
//! use minerva::research::{ResearchCoordinator, FileReportStore};
//! use futures::StreamExt;
//!
//! let coordinator = ResearchCoordinator::new(client, store, config);
//! let mut updates = coordinator.run("What changed in Rust 2024?".to_string());
//! while let Some(update) = updates.next().await {
//!     println!("{}", update);
//! }
//! ```

/// Orchestration of the plan/search/write pipeline.
pub mod coordinator;
/// Search planning stage.
pub mod planner;
/// Web search stage.
pub mod searcher;
/// Report persistence.
pub mod store;
/// Report synthesis stage.
pub mod writer;

pub use coordinator::{ResearchConfig, ResearchCoordinator};
pub use planner::Planner;
pub use searcher::Searcher;
pub use store::{FileReportStore, ReportStore};
pub use writer::Writer;
