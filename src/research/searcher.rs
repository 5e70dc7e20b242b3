//! Web search stage
//!
//! Executes one planned search through the provider's mandatory search
//! capability and summarizes the findings. This is the one stage that
//! recovers locally: any failure becomes a `Failed` outcome in the record
//! so a bad sub-query can never abort the run.

use crate::llm::ModelClient;
use crate::types::{SearchItem, SearchOutcome, SearchRecord};
use std::sync::Arc;

const INSTRUCTIONS: &str =
    "You are a research assistant. Given a search term, you search the web for that term and \
     produce a concise summary of the results. The summary must be 2-3 paragraphs and less than \
     300 words. Capture the main points. Write succinctly, no need to have complete sentences or \
     good grammar. This will be consumed by someone synthesizing a report, so it's vital you \
     capture the essence and ignore any fluff. Do not include any additional commentary other \
     than the summary itself.";

/// Search stage: one search-augmented model call per planned item.
pub struct Searcher {
    client: Arc<dyn ModelClient>,
}

impl Searcher {
    /// Create a searcher over the given client.
    pub fn new(client: Arc<dyn ModelClient>) -> Self {
        Self { client }
    }

    /// Execute a single planned search.
    ///
    /// Never fails: a provider error is caught here and reported as a
    /// [`SearchOutcome::Failed`] in the returned record.
    pub async fn search(&self, item: &SearchItem) -> SearchRecord {
        let input = format!(
            "Search term: {}\nReason for searching: {}",
            item.query, item.reason
        );

        let outcome = match self.client.generate_with_search(INSTRUCTIONS, &input).await {
            Ok(summary) => SearchOutcome::Ok { summary },
            Err(e) => {
                tracing::warn!(query = %item.query, error = %e, "Search failed");
                SearchOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        };

        SearchRecord {
            item: item.clone(),
            outcome,
        }
    }
}
