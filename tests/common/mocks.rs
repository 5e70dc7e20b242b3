//! Mock implementations for testing.
//!
//! This module provides a scripted model client and report stores that can
//! be used across test files without duplication. The client dispatches
//! structured calls on the shape name, so one mock serves the planner and
//! the writer at the same time.

use async_trait::async_trait;
use minerva::llm::{ModelClient, ResultShape};
use minerva::research::ReportStore;
use minerva::types::{ReportData, ResearchError, Result, SearchItem, SearchPlan};
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Scripted model client.
///
/// Configure a plan, a report, and which search queries should fail or
/// hang; the client records every invocation for assertions.
pub struct MockModelClient {
    plan: Option<SearchPlan>,
    report: Option<ReportData>,
    failing_searches: HashSet<String>,
    slow_searches: HashSet<String>,
    /// Number of structured calls issued (planner + writer).
    pub structured_calls: AtomicUsize,
    /// Number of search calls issued.
    pub search_calls: AtomicUsize,
    /// Inputs the writer was invoked with.
    pub writer_inputs: Mutex<Vec<String>>,
}

impl MockModelClient {
    /// A client with no scripted responses; every call fails.
    pub fn new() -> Self {
        Self {
            plan: None,
            report: None,
            failing_searches: HashSet::new(),
            slow_searches: HashSet::new(),
            structured_calls: AtomicUsize::new(0),
            search_calls: AtomicUsize::new(0),
            writer_inputs: Mutex::new(Vec::new()),
        }
    }

    /// Script a plan with one item per query, each with a fixed reason.
    pub fn with_plan(mut self, queries: &[&str]) -> Self {
        self.plan = Some(SearchPlan {
            searches: queries
                .iter()
                .map(|q| SearchItem {
                    reason: format!("reason for {}", q),
                    query: q.to_string(),
                })
                .collect(),
        });
        self
    }

    /// Script the writer's report.
    pub fn with_report(mut self, report: ReportData) -> Self {
        self.report = Some(report);
        self
    }

    /// Make the search for `query` fail.
    pub fn failing_search(mut self, query: &str) -> Self {
        self.failing_searches.insert(query.to_string());
        self
    }

    /// Make the search for `query` hang for a long time.
    pub fn slow_search(mut self, query: &str) -> Self {
        self.slow_searches.insert(query.to_string());
        self
    }

    /// A fixed report used by most tests.
    pub fn canned_report() -> ReportData {
        ReportData {
            short_summary: "A fixed summary.".to_string(),
            markdown_report: "# Fixed Report\n\nBody text.".to_string(),
            follow_up_questions: vec!["what next?".to_string()],
        }
    }
}

impl Default for MockModelClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ModelClient for MockModelClient {
    async fn generate(&self, _instructions: &str, _input: &str) -> Result<String> {
        Err(ResearchError::Provider(
            "mock has no free-text script".to_string(),
        ))
    }

    async fn generate_structured(
        &self,
        _instructions: &str,
        input: &str,
        shape: &ResultShape,
    ) -> Result<String> {
        self.structured_calls.fetch_add(1, Ordering::SeqCst);
        match shape.name {
            "search_plan" => match &self.plan {
                Some(plan) => Ok(serde_json::to_string(plan).unwrap()),
                None => Err(ResearchError::Provider("mock planner failure".to_string())),
            },
            "report_data" => {
                self.writer_inputs.lock().unwrap().push(input.to_string());
                match &self.report {
                    Some(report) => Ok(serde_json::to_string(report).unwrap()),
                    None => Err(ResearchError::Provider("mock writer failure".to_string())),
                }
            }
            other => Err(ResearchError::Provider(format!(
                "mock does not know shape '{}'",
                other
            ))),
        }
    }

    async fn generate_with_search(&self, _instructions: &str, input: &str) -> Result<String> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        // The searcher formats its input as "Search term: <query>\n...".
        let query = input
            .lines()
            .next()
            .and_then(|line| line.strip_prefix("Search term: "))
            .unwrap_or(input)
            .to_string();

        if self.slow_searches.contains(&query) {
            tokio::time::sleep(Duration::from_secs(600)).await;
        }
        if self.failing_searches.contains(&query) {
            return Err(ResearchError::Provider(format!(
                "mock search failure for {}",
                query
            )));
        }
        Ok(format!("summary for {}", query))
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

/// Report store that records every write and returns a fake path.
pub struct RecordingStore {
    /// `(name_hint, body)` pairs, in write order.
    pub saved: Mutex<Vec<(String, String)>>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self {
            saved: Mutex::new(Vec::new()),
        }
    }
}

impl Default for RecordingStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReportStore for RecordingStore {
    async fn store(&self, name_hint: &str, body: &str) -> Result<PathBuf> {
        self.saved
            .lock()
            .unwrap()
            .push((name_hint.to_string(), body.to_string()));
        Ok(PathBuf::from(format!("/tmp/report_{}.md", name_hint)))
    }
}

/// Report store that always fails.
pub struct FailingStore;

#[async_trait]
impl ReportStore for FailingStore {
    async fn store(&self, _name_hint: &str, _body: &str) -> Result<PathBuf> {
        Err(ResearchError::Store("disk full".to_string()))
    }
}
