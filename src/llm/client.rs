//! Model client abstraction
//!
//! The research stages treat "call a model with instructions and get back
//! text or a typed object" as an opaque capability. This module defines
//! that capability as a trait so providers can be swapped (or faked in
//! tests) without touching the stages.

use crate::types::Result;
use async_trait::async_trait;
use schemars::JsonSchema;

/// A named JSON schema describing the shape a structured response must
/// conform to.
///
/// The schema is derived from a Rust type via schemars, so the stage that
/// declares the shape is also the stage that deserializes into it.
#[derive(Debug, Clone)]
pub struct ResultShape {
    /// Short identifier for the shape (used in prompts and logs).
    pub name: &'static str,
    /// JSON schema for the expected response.
    pub schema: serde_json::Value,
}

impl ResultShape {
    /// Build a shape from a schemars-deriving type.
    pub fn of<T: JsonSchema>(name: &'static str) -> Self {
        Self {
            name,
            schema: schemars::schema_for!(T).to_value(),
        }
    }
}

/// Generic model client trait for provider abstraction.
///
/// All providers implement this trait; the stages hold an
/// `Arc<dyn ModelClient>` and never see provider-specific types. Every
/// method represents exactly one provider invocation. None of the methods
/// retry.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Generate free text from role instructions and input text.
    async fn generate(&self, instructions: &str, input: &str) -> Result<String>;

    /// Generate a response constrained to `shape`, returned as raw JSON
    /// text. Callers deserialize and validate at their own boundary.
    async fn generate_structured(
        &self,
        instructions: &str,
        input: &str,
        shape: &ResultShape,
    ) -> Result<String>;

    /// Generate free text with a mandatory web-search capability.
    ///
    /// Providers that cannot search must fail with
    /// [`crate::types::ResearchError::Config`]; falling back to plain
    /// generation is not allowed.
    async fn generate_with_search(&self, instructions: &str, input: &str) -> Result<String>;

    /// The model name/identifier this client talks to.
    fn model_name(&self) -> &str;
}

/// Strip a markdown code fence from a model response, if present.
///
/// Models asked for JSON-only output still wrap it in ```json fences often
/// enough that stages run responses through this before deserializing.
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the language tag on the opening fence line.
    let rest = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => rest,
    };
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SearchPlan;

    #[test]
    fn shape_carries_schema_properties() {
        let shape = ResultShape::of::<SearchPlan>("search_plan");
        assert_eq!(shape.name, "search_plan");
        let props = shape
            .schema
            .get("properties")
            .expect("schema should have properties");
        assert!(props.get("searches").is_some());
    }

    #[test]
    fn strips_json_fence() {
        let fenced = "```json\n{\"a\": 1}\n```";
        assert_eq!(strip_code_fences(fenced), "{\"a\": 1}");
    }

    #[test]
    fn strips_bare_fence() {
        let fenced = "```\n{\"a\": 1}\n```";
        assert_eq!(strip_code_fences(fenced), "{\"a\": 1}");
    }

    #[test]
    fn leaves_plain_text_alone() {
        assert_eq!(strip_code_fences("  {\"a\": 1} \n"), "{\"a\": 1}");
    }
}
