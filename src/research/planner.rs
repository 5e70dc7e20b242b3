//! Search planning stage
//!
//! Turns a research query into an ordered list of web searches with
//! rationale. Exactly one model invocation per plan; any provider error or
//! shape mismatch surfaces as a planning failure with no retry.

use crate::llm::{strip_code_fences, ModelClient, ResultShape};
use crate::types::{ResearchError, Result, SearchPlan};
use std::sync::Arc;

/// Default number of searches requested from the model.
pub const DEFAULT_SEARCHES: usize = 5;

fn instructions(how_many: usize) -> String {
    format!(
        "You are a helpful research assistant. Given a query, come up with a set of web \
         searches to perform to best answer the query. Output {} terms to query for.\n\
         \n\
         Think strategically:\n\
         - Cover different aspects of the topic\n\
         - Include specific and broad searches\n\
         - Consider recent developments vs. foundational information\n\
         - Look for data, opinions, and comparisons",
        how_many
    )
}

/// Planning stage: one structured model call per research query.
pub struct Planner {
    client: Arc<dyn ModelClient>,
    how_many: usize,
}

impl Planner {
    /// Create a planner that asks the model for `how_many` searches.
    pub fn new(client: Arc<dyn ModelClient>, how_many: usize) -> Self {
        Self { client, how_many }
    }

    /// Generate a search plan for the query.
    ///
    /// The model is asked for exactly `how_many` searches but a shortfall
    /// is accepted as a smaller plan; an excess is truncated. A plan with
    /// zero searches is a planning failure even when the response was
    /// validly shaped.
    pub async fn plan(&self, query: &str) -> Result<SearchPlan> {
        let shape = ResultShape::of::<SearchPlan>("search_plan");
        let input = format!("Query: {}", query);

        let response = self
            .client
            .generate_structured(&instructions(self.how_many), &input, &shape)
            .await
            .map_err(|e| ResearchError::Planning(e.to_string()))?;

        let mut plan: SearchPlan = serde_json::from_str(strip_code_fences(&response))
            .map_err(|e| ResearchError::Planning(format!("Malformed search plan: {}", e)))?;

        if plan.is_empty() {
            return Err(ResearchError::Planning(
                "Model returned an empty search plan".to_string(),
            ));
        }
        plan.searches.truncate(self.how_many);

        tracing::info!(searches = plan.len(), "Search plan ready");
        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SearchItem;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct ScriptedClient {
        response: Result<String>,
        seen_instructions: Mutex<Vec<String>>,
    }

    impl ScriptedClient {
        fn new(response: Result<String>) -> Self {
            Self {
                response,
                seen_instructions: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ModelClient for ScriptedClient {
        async fn generate(&self, _instructions: &str, _input: &str) -> Result<String> {
            unreachable!("planner only issues structured calls")
        }

        async fn generate_structured(
            &self,
            instructions: &str,
            _input: &str,
            _shape: &ResultShape,
        ) -> Result<String> {
            self.seen_instructions
                .lock()
                .unwrap()
                .push(instructions.to_string());
            match &self.response {
                Ok(text) => Ok(text.clone()),
                Err(e) => Err(ResearchError::Provider(e.to_string())),
            }
        }

        async fn generate_with_search(&self, _instructions: &str, _input: &str) -> Result<String> {
            unreachable!("planner only issues structured calls")
        }

        fn model_name(&self) -> &str {
            "scripted"
        }
    }

    fn plan_json(items: &[(&str, &str)]) -> String {
        let searches: Vec<SearchItem> = items
            .iter()
            .map(|(reason, query)| SearchItem {
                reason: reason.to_string(),
                query: query.to_string(),
            })
            .collect();
        serde_json::to_string(&SearchPlan { searches }).unwrap()
    }

    #[tokio::test]
    async fn plan_parses_valid_response() {
        let client = Arc::new(ScriptedClient::new(Ok(plan_json(&[
            ("background", "rust async history"),
            ("current state", "rust async 2026"),
        ]))));
        let planner = Planner::new(client.clone(), 5);

        let plan = planner.plan("rust async").await.unwrap();
        assert_eq!(plan.len(), 2);
        assert_eq!(plan.searches[0].query, "rust async history");

        let seen = client.seen_instructions.lock().unwrap();
        assert_eq!(seen.len(), 1, "exactly one provider invocation");
        assert!(seen[0].contains("Output 5 terms"));
    }

    #[tokio::test]
    async fn plan_accepts_fenced_json() {
        let fenced = format!("```json\n{}\n```", plan_json(&[("r", "q")]));
        let client = Arc::new(ScriptedClient::new(Ok(fenced)));
        let plan = Planner::new(client, 5).plan("q").await.unwrap();
        assert_eq!(plan.len(), 1);
    }

    #[tokio::test]
    async fn plan_truncates_excess_items() {
        let client = Arc::new(ScriptedClient::new(Ok(plan_json(&[
            ("a", "1"),
            ("b", "2"),
            ("c", "3"),
        ]))));
        let plan = Planner::new(client, 2).plan("q").await.unwrap();
        assert_eq!(plan.len(), 2);
    }

    #[tokio::test]
    async fn empty_plan_is_a_planning_failure() {
        let client = Arc::new(ScriptedClient::new(Ok(plan_json(&[]))));
        let err = Planner::new(client, 5).plan("q").await.unwrap_err();
        assert!(matches!(err, ResearchError::Planning(_)));
    }

    #[tokio::test]
    async fn malformed_shape_is_a_planning_failure() {
        let client = Arc::new(ScriptedClient::new(Ok("{\"searches\": 42}".to_string())));
        let err = Planner::new(client, 5).plan("q").await.unwrap_err();
        assert!(matches!(err, ResearchError::Planning(_)));
    }

    #[tokio::test]
    async fn provider_error_is_a_planning_failure() {
        let client = Arc::new(ScriptedClient::new(Err(ResearchError::Provider(
            "boom".to_string(),
        ))));
        let err = Planner::new(client, 5).plan("q").await.unwrap_err();
        assert!(matches!(err, ResearchError::Planning(_)));
    }
}
