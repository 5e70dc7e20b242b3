//! Research run orchestration
//!
//! Drives the three stages in sequence: plan, fan the searches out
//! concurrently, join on all of them, synthesize, persist. Planning and
//! synthesis failures abort the run; search failures are local to their
//! item; store failures leave the in-memory report intact.

use crate::llm::ModelClient;
use crate::research::planner::Planner;
use crate::research::searcher::Searcher;
use crate::research::store::{render_document, report_name_hint, ReportStore};
use crate::research::writer::Writer;
use crate::types::{
    ProgressUpdate, ResearchError, Result, RunRecord, SearchOutcome, SearchRecord,
};
use chrono::Utc;
use futures::Stream;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use uuid::Uuid;

/// Tuning knobs for a research run.
#[derive(Debug, Clone)]
pub struct ResearchConfig {
    /// How many searches the planner requests from the model.
    pub how_many_searches: usize,
    /// Optional per-search deadline; a timeout becomes a local failure
    /// without cancelling sibling searches.
    pub search_timeout: Option<Duration>,
    /// Abort the run instead of synthesizing when every search failed.
    pub abort_when_no_summaries: bool,
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self {
            how_many_searches: crate::research::planner::DEFAULT_SEARCHES,
            search_timeout: None,
            abort_when_no_summaries: false,
        }
    }
}

/// Progress sender that tolerates a departed consumer.
///
/// The run always finishes regardless of whether anyone is still reading
/// the stream, so send errors are deliberately ignored.
struct Progress {
    tx: Option<mpsc::UnboundedSender<ProgressUpdate>>,
}

impl Progress {
    fn send(&self, update: ProgressUpdate) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(update);
        }
    }
}

/// Orchestrates the deep research workflow across the three stages.
#[derive(Clone)]
pub struct ResearchCoordinator {
    client: Arc<dyn ModelClient>,
    store: Arc<dyn ReportStore>,
    config: ResearchConfig,
}

impl ResearchCoordinator {
    /// Create a coordinator over a model client and a report store.
    pub fn new(
        client: Arc<dyn ModelClient>,
        store: Arc<dyn ReportStore>,
        config: ResearchConfig,
    ) -> Self {
        Self {
            client,
            store,
            config,
        }
    }

    /// Execute the research workflow, streaming progress as it happens.
    ///
    /// The stream yields one [`ProgressUpdate`] per state transition and
    /// ends with exactly one terminal item: the final report or a failure
    /// message. Dropping the stream does not cancel the run.
    ///
    /// Must be called from within a tokio runtime.
    pub fn run(&self, query: impl Into<String>) -> impl Stream<Item = ProgressUpdate> {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let this = self.clone();
        let query = query.into();

        tokio::spawn(async move {
            let progress = Progress { tx: Some(tx) };
            match this.execute(&query, &progress).await {
                Ok(record) => progress.send(ProgressUpdate::Report {
                    markdown: record.report.markdown_report,
                }),
                Err(e) => progress.send(ProgressUpdate::Failed {
                    message: e.to_string(),
                }),
            }
        });

        async_stream::stream! {
            while let Some(update) = rx.recv().await {
                yield update;
            }
        }
    }

    /// Execute the research workflow to completion without streaming.
    pub async fn run_to_completion(&self, query: &str) -> Result<RunRecord> {
        self.execute(query, &Progress { tx: None }).await
    }

    async fn execute(&self, query: &str, progress: &Progress) -> Result<RunRecord> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ResearchError::InvalidInput(
                "Research query must not be empty".to_string(),
            ));
        }

        let run_id = Uuid::new_v4();
        tracing::info!(%run_id, query, "Starting research run");

        // Planning: a failure here aborts the run with nothing searched.
        progress.send(ProgressUpdate::Planning);
        let planner = Planner::new(self.client.clone(), self.config.how_many_searches);
        let plan = planner.plan(query).await?;
        progress.send(ProgressUpdate::Planned {
            searches: plan.len(),
        });

        // Searching: one task per item, all launched up front, full join.
        let total = plan.len();
        progress.send(ProgressUpdate::Searching { total });
        tracing::info!(%run_id, total, "Executing searches");

        let searcher = Arc::new(Searcher::new(self.client.clone()));
        let mut set = JoinSet::new();
        for item in plan.searches.iter().cloned() {
            let searcher = searcher.clone();
            let timeout = self.config.search_timeout;
            set.spawn(async move {
                match timeout {
                    Some(limit) => {
                        let result = tokio::time::timeout(limit, searcher.search(&item)).await;
                        match result {
                            Ok(record) => record,
                            Err(_) => SearchRecord {
                                item,
                                outcome: SearchOutcome::Failed {
                                    reason: format!("Timed out after {:?}", limit),
                                },
                            },
                        }
                    }
                    None => searcher.search(&item).await,
                }
            });
        }

        let mut records: Vec<SearchRecord> = Vec::with_capacity(total);
        let mut done = 0;
        while let Some(joined) = set.join_next().await {
            done += 1;
            match joined {
                Ok(record) => records.push(record),
                Err(e) => tracing::warn!(%run_id, error = %e, "Search task aborted"),
            }
            progress.send(ProgressUpdate::SearchCompleted { done, total });
        }

        let summaries: Vec<String> = records
            .iter()
            .filter_map(|r| r.outcome.summary().map(str::to_string))
            .collect();
        tracing::info!(
            %run_id,
            succeeded = summaries.len(),
            failed = total - summaries.len(),
            "Searches complete"
        );

        // Synthesizing: proceeds on whatever summaries are available,
        // unless the all-failed policy says otherwise.
        progress.send(ProgressUpdate::Writing);
        if summaries.is_empty() {
            tracing::warn!(%run_id, "No search produced a summary");
            if self.config.abort_when_no_summaries {
                return Err(ResearchError::Synthesis(
                    "Every search failed and no summaries are available".to_string(),
                ));
            }
        }
        let writer = Writer::new(self.client.clone());
        let report = writer.write(query, &summaries).await?;

        // Persisting: best-effort; the report stays valid either way.
        let body = render_document(query, &report);
        let artifact = match self.store.store(&report_name_hint(query), &body).await {
            Ok(path) => {
                progress.send(ProgressUpdate::Saved { path: path.clone() });
                Some(path)
            }
            Err(e) => {
                tracing::warn!(%run_id, error = %e, "Failed to persist report");
                progress.send(ProgressUpdate::SaveFailed {
                    reason: e.to_string(),
                });
                None
            }
        };

        tracing::info!(%run_id, "Research run complete");
        Ok(RunRecord {
            id: run_id,
            query: query.to_string(),
            plan,
            searches: records,
            report,
            artifact,
            finished_at: Utc::now(),
        })
    }
}
