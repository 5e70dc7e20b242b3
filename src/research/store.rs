//! Report persistence
//!
//! Writes the final report to durable storage under a name derived from
//! the query and a timestamp. Persistence is best-effort from the
//! coordinator's point of view: a store failure is reported but the
//! in-memory report remains the logical result of the run.

use crate::types::{ReportData, ResearchError, Result};
use async_trait::async_trait;
use chrono::Local;
use std::path::{Path, PathBuf};

/// Maximum number of query characters used in a report file name.
const NAME_QUERY_CHARS: usize = 50;

/// Sink for finished reports.
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Write `body` under a name derived from `name_hint`, returning the
    /// location written.
    async fn store(&self, name_hint: &str, body: &str) -> Result<PathBuf>;
}

/// File-backed report store writing markdown files into one directory.
pub struct FileReportStore {
    dir: PathBuf,
}

impl FileReportStore {
    /// Create a store rooted at `dir`. The directory is created on first
    /// write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory reports are written into.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl ReportStore for FileReportStore {
    async fn store(&self, name_hint: &str, body: &str) -> Result<PathBuf> {
        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            ResearchError::Store(format!(
                "Failed to create {}: {}",
                self.dir.display(),
                e
            ))
        })?;

        let path = self.dir.join(format!("report_{}.md", name_hint));
        tokio::fs::write(&path, body).await.map_err(|e| {
            ResearchError::Store(format!("Failed to write {}: {}", path.display(), e))
        })?;

        tracing::info!(path = %path.display(), "Report persisted");
        Ok(path)
    }
}

/// Derive a storage name hint from the query and the current local time:
/// `<timestamp>_<sanitized query fragment>`.
pub fn report_name_hint(query: &str) -> String {
    let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
    format!("{}_{}", timestamp, sanitize_fragment(query))
}

/// Strip characters unsafe for file names from the first 50 characters of
/// the query, then replace spaces with underscores.
fn sanitize_fragment(query: &str) -> String {
    query
        .chars()
        .take(NAME_QUERY_CHARS)
        .filter(|c| c.is_alphanumeric() || *c == ' ' || *c == '-' || *c == '_')
        .collect::<String>()
        .trim()
        .replace(' ', "_")
}

/// Render the stored markdown document for a finished report.
pub fn render_document(query: &str, report: &ReportData) -> String {
    let generated = Local::now().format("%Y-%m-%d %H:%M:%S");
    let questions = report
        .follow_up_questions
        .iter()
        .map(|q| format!("- {}", q))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "# Research Report\n\n**Query:** {}\n\n**Generated:** {}\n\n---\n\n\
         ## Summary\n\n{}\n\n---\n\n{}\n\n---\n\n## Follow-up Questions\n\n{}\n",
        query, generated, report.short_summary, report.markdown_report, questions
    )
}
