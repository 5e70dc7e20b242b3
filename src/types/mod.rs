//! Core types for the research pipeline: data contracts shared between the
//! planner, searcher and writer stages, progress events, and the error
//! taxonomy used across the crate.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

// ============= Plan Types =============

/// A single web search with the reasoning behind it.
///
/// Produced by the planner stage and consumed read-only by the searcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SearchItem {
    /// Why this search matters for answering the query.
    pub reason: String,
    /// The literal term to search the web for.
    pub query: String,
}

/// An ordered plan of web searches for one research query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SearchPlan {
    /// The searches to perform, in planning order.
    pub searches: Vec<SearchItem>,
}

impl SearchPlan {
    /// Number of planned searches.
    pub fn len(&self) -> usize {
        self.searches.len()
    }

    /// True when the plan contains no searches.
    pub fn is_empty(&self) -> bool {
        self.searches.is_empty()
    }
}

// ============= Search Types =============

/// Outcome of a single search task.
///
/// Failures here are always local: a failed search degrades the report but
/// never aborts the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SearchOutcome {
    /// The search produced a usable summary.
    Ok {
        /// Short prose summary of what the search found.
        summary: String,
    },
    /// The search failed; `reason` is diagnostic only.
    Failed {
        /// Human-readable cause of the failure.
        reason: String,
    },
}

impl SearchOutcome {
    /// The summary text, if the search succeeded.
    pub fn summary(&self) -> Option<&str> {
        match self {
            SearchOutcome::Ok { summary } => Some(summary),
            SearchOutcome::Failed { .. } => None,
        }
    }

    /// True when the search succeeded.
    pub fn is_ok(&self) -> bool {
        matches!(self, SearchOutcome::Ok { .. })
    }
}

/// One planned search item together with how it resolved.
///
/// Records are collected in completion order, not plan order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRecord {
    /// The item that was searched.
    pub item: SearchItem,
    /// How the search resolved.
    pub outcome: SearchOutcome,
}

// ============= Report Types =============

/// Structured report produced by the writer stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ReportData {
    /// A short 2-3 sentence summary of the findings.
    pub short_summary: String,
    /// The full report in markdown format.
    pub markdown_report: String,
    /// Suggested topics to research further.
    pub follow_up_questions: Vec<String>,
}

// ============= Run Types =============

/// Full trace of one research run.
///
/// The logical result of a run is the in-memory [`ReportData`]; `artifact`
/// is `None` when persistence failed (persistence is best-effort).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRecord {
    /// Unique id for correlating logs of this run.
    pub id: Uuid,
    /// The research query as supplied by the caller.
    pub query: String,
    /// The plan the searches were driven by.
    pub plan: SearchPlan,
    /// Per-search outcomes, in completion order.
    pub searches: Vec<SearchRecord>,
    /// The synthesized report.
    pub report: ReportData,
    /// Where the report was written, if persistence succeeded.
    pub artifact: Option<PathBuf>,
    /// When the run finished.
    pub finished_at: DateTime<Utc>,
}

impl RunRecord {
    /// Number of searches that produced a summary.
    pub fn successful_searches(&self) -> usize {
        self.searches.iter().filter(|r| r.outcome.is_ok()).count()
    }
}

// ============= Progress Types =============

/// Incremental status event emitted once per orchestrator transition.
///
/// The stream produced by [`crate::research::ResearchCoordinator::run`]
/// yields these as the run progresses and always ends with exactly one of
/// [`ProgressUpdate::Report`] or [`ProgressUpdate::Failed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressUpdate {
    /// The planner is generating the search plan.
    Planning,
    /// The plan is ready with this many searches.
    Planned {
        /// Number of planned searches.
        searches: usize,
    },
    /// All search tasks have been launched.
    Searching {
        /// Total number of searches in flight.
        total: usize,
    },
    /// One more search task has resolved (success or local failure).
    SearchCompleted {
        /// Searches resolved so far.
        done: usize,
        /// Total number of searches launched.
        total: usize,
    },
    /// The writer is synthesizing the report.
    Writing,
    /// The report was persisted to this location.
    Saved {
        /// Location of the written artifact.
        path: PathBuf,
    },
    /// Persisting the report failed; the in-memory report is still valid.
    SaveFailed {
        /// Cause of the store failure.
        reason: String,
    },
    /// Terminal: the run completed and this is the report body.
    Report {
        /// Final report in markdown format.
        markdown: String,
    },
    /// Terminal: the run aborted in the named stage.
    Failed {
        /// Message naming the failing stage and cause.
        message: String,
    },
}

impl ProgressUpdate {
    /// True for the two terminal events that close the stream.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ProgressUpdate::Report { .. } | ProgressUpdate::Failed { .. }
        )
    }
}

impl std::fmt::Display for ProgressUpdate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProgressUpdate::Planning => write!(f, "Planning searches..."),
            ProgressUpdate::Planned { searches } => {
                write!(f, "Planned {} searches", searches)
            }
            ProgressUpdate::Searching { total } => {
                write!(f, "Searching ({} queries)...", total)
            }
            ProgressUpdate::SearchCompleted { done, total } => {
                write!(f, "Finished search {}/{}", done, total)
            }
            ProgressUpdate::Writing => write!(f, "Writing report..."),
            ProgressUpdate::Saved { path } => {
                write!(f, "Saved report to {}", path.display())
            }
            ProgressUpdate::SaveFailed { reason } => {
                write!(f, "Saving report failed: {}", reason)
            }
            ProgressUpdate::Report { markdown } => write!(f, "{}", markdown),
            ProgressUpdate::Failed { message } => write!(f, "Research failed: {}", message),
        }
    }
}

// ============= Error Types =============

/// Error taxonomy for the research pipeline.
///
/// `Planning` and `Synthesis` are run-fatal. `Search` is always recovered
/// inside the search stage and only appears in diagnostics. `Store` is
/// non-fatal to the logical result of a run.
#[derive(Debug, thiserror::Error)]
pub enum ResearchError {
    /// The model provider call itself failed.
    #[error("Provider error: {0}")]
    Provider(String),

    /// The planner could not produce a usable search plan.
    #[error("Planning failed: {0}")]
    Planning(String),

    /// A single search failed. Never surfaced as a run-level error.
    #[error("Search failed: {0}")]
    Search(String),

    /// The writer could not produce a report.
    #[error("Synthesis failed: {0}")]
    Synthesis(String),

    /// Writing the report artifact failed.
    #[error("Store error: {0}")]
    Store(String),

    /// The crate is misconfigured (missing key, unusable model, ...).
    #[error("Configuration error: {0}")]
    Config(String),

    /// The caller supplied unusable input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, ResearchError>;
