//! Report synthesis stage
//!
//! Turns the original query plus the successful search summaries into a
//! structured report. One model invocation per report; provider errors and
//! shape mismatches surface as synthesis failures with no retry.

use crate::llm::{strip_code_fences, ModelClient, ResultShape};
use crate::types::{ReportData, ResearchError, Result};
use std::sync::Arc;

const INSTRUCTIONS: &str =
    "You are a senior researcher tasked with writing a cohesive report for a research query. \
     You will be provided with the original query, and some initial research done by a research \
     assistant.\n\
     You should first come up with an outline for the report that describes the structure and \
     flow of the report. Then, generate the report and return that as your final output.\n\
     The final output should be in markdown format, and it should be lengthy and detailed. Aim \
     for 5-10 pages of content, at least 1000 words. Use proper headings, subheadings, and \
     formatting.";

/// Synthesis stage: one structured model call per run.
pub struct Writer {
    client: Arc<dyn ModelClient>,
}

impl Writer {
    /// Create a writer over the given client.
    pub fn new(client: Arc<dyn ModelClient>) -> Self {
        Self { client }
    }

    /// Synthesize a report from the query and the available summaries.
    ///
    /// Failed searches contribute nothing here; their absence is silent at
    /// this layer. An empty summary slice is accepted and produces a
    /// best-effort report.
    pub async fn write(&self, query: &str, summaries: &[String]) -> Result<ReportData> {
        let shape = ResultShape::of::<ReportData>("report_data");
        let input = format!(
            "Original query: {}\n\nSummarized search results:\n{}",
            query,
            summaries.join("\n\n")
        );

        let response = self
            .client
            .generate_structured(INSTRUCTIONS, &input, &shape)
            .await
            .map_err(|e| ResearchError::Synthesis(e.to_string()))?;

        let report: ReportData = serde_json::from_str(strip_code_fences(&response))
            .map_err(|e| ResearchError::Synthesis(format!("Malformed report: {}", e)))?;

        tracing::info!(chars = report.markdown_report.len(), "Report synthesized");
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct ScriptedClient {
        response: String,
        inputs: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ModelClient for ScriptedClient {
        async fn generate(&self, _instructions: &str, _input: &str) -> Result<String> {
            unreachable!("writer only issues structured calls")
        }

        async fn generate_structured(
            &self,
            _instructions: &str,
            input: &str,
            _shape: &ResultShape,
        ) -> Result<String> {
            self.inputs.lock().unwrap().push(input.to_string());
            Ok(self.response.clone())
        }

        async fn generate_with_search(&self, _instructions: &str, _input: &str) -> Result<String> {
            unreachable!("writer only issues structured calls")
        }

        fn model_name(&self) -> &str {
            "scripted"
        }
    }

    fn report_json() -> String {
        serde_json::to_string(&ReportData {
            short_summary: "two sentences".to_string(),
            markdown_report: "# Report\n\nBody".to_string(),
            follow_up_questions: vec!["what next?".to_string()],
        })
        .unwrap()
    }

    #[tokio::test]
    async fn write_passes_query_and_summaries() {
        let client = Arc::new(ScriptedClient {
            response: report_json(),
            inputs: Mutex::new(Vec::new()),
        });
        let writer = Writer::new(client.clone());

        let summaries = vec!["first summary".to_string(), "second summary".to_string()];
        let report = writer.write("test topic", &summaries).await.unwrap();
        assert_eq!(report.short_summary, "two sentences");

        let inputs = client.inputs.lock().unwrap();
        assert_eq!(inputs.len(), 1, "exactly one provider invocation");
        assert!(inputs[0].contains("Original query: test topic"));
        assert!(inputs[0].contains("first summary"));
        assert!(inputs[0].contains("second summary"));
    }

    #[tokio::test]
    async fn write_accepts_zero_summaries() {
        let client = Arc::new(ScriptedClient {
            response: report_json(),
            inputs: Mutex::new(Vec::new()),
        });
        let report = Writer::new(client).write("topic", &[]).await.unwrap();
        assert!(!report.markdown_report.is_empty());
    }

    #[tokio::test]
    async fn malformed_report_is_a_synthesis_failure() {
        let client = Arc::new(ScriptedClient {
            response: "not json at all".to_string(),
            inputs: Mutex::new(Vec::new()),
        });
        let err = Writer::new(client).write("topic", &[]).await.unwrap_err();
        assert!(matches!(err, ResearchError::Synthesis(_)));
    }
}
