//! Environment-driven configuration
//!
//! Everything is read from the process environment (with `.env` support
//! via dotenvy in the binary). The only required variable is
//! `OPENAI_API_KEY`; the rest have working defaults.

use crate::types::{ResearchError, Result};
use serde::Deserialize;
use std::env;
use std::time::Duration;

/// Default chat model.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
/// Default search-preview model for search-augmented generation.
pub const DEFAULT_SEARCH_MODEL: &str = "gpt-4o-mini-search-preview";
/// Default directory reports are written into.
pub const DEFAULT_OUTPUT_DIR: &str = "outputs";

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Model provider settings.
    pub model: ModelConfig,
    /// Research pipeline settings.
    pub research: ResearchSettings,
}

/// Model provider settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// OpenAI API key.
    pub api_key: String,
    /// API base URL (override for compatible endpoints).
    pub api_base: String,
    /// Chat model used for planning and synthesis.
    pub model: String,
    /// Search-preview model used for web searches. `None` disables the
    /// search capability, which makes every research run fail with a
    /// configuration error.
    pub search_model: Option<String>,
}

/// Research pipeline settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ResearchSettings {
    /// How many searches to plan per query.
    pub searches: usize,
    /// Optional per-search deadline in seconds.
    pub search_timeout_secs: Option<u64>,
    /// Abort instead of synthesizing when every search failed.
    pub abort_when_no_summaries: bool,
    /// Directory reports are written into.
    pub output_dir: String,
}

impl ResearchSettings {
    /// The per-search timeout as a `Duration`, if configured.
    pub fn search_timeout(&self) -> Option<Duration> {
        self.search_timeout_secs.map(Duration::from_secs)
    }
}

impl Config {
    /// Load configuration from the environment.
    pub fn from_env() -> Result<Self> {
        Ok(Config {
            model: ModelConfig {
                api_key: env::var("OPENAI_API_KEY").map_err(|_| {
                    ResearchError::Config("OPENAI_API_KEY is not set".to_string())
                })?,
                api_base: env::var("OPENAI_API_BASE")
                    .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
                model: env::var("MINERVA_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
                // Unset falls back to the default; explicitly empty
                // disables the search capability.
                search_model: match env::var("MINERVA_SEARCH_MODEL") {
                    Ok(value) if value.trim().is_empty() => None,
                    Ok(value) => Some(value),
                    Err(_) => Some(DEFAULT_SEARCH_MODEL.to_string()),
                },
            },
            research: ResearchSettings {
                searches: parse_var("MINERVA_SEARCHES")?
                    .unwrap_or(crate::research::planner::DEFAULT_SEARCHES),
                search_timeout_secs: parse_var("MINERVA_SEARCH_TIMEOUT_SECS")?,
                abort_when_no_summaries: parse_var("MINERVA_ABORT_WHEN_NO_SUMMARIES")?
                    .unwrap_or(false),
                output_dir: env::var("MINERVA_OUTPUT_DIR")
                    .unwrap_or_else(|_| DEFAULT_OUTPUT_DIR.to_string()),
            },
        })
    }
}

/// Read a variable, treating unset and empty as absent.
fn optional_var(name: &str) -> Option<String> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        _ => None,
    }
}

/// Parse a variable as `T`, treating unset and empty as absent.
fn parse_var<T: std::str::FromStr>(name: &str) -> Result<Option<T>> {
    match optional_var(name) {
        Some(value) => value.trim().parse::<T>().map(Some).map_err(|_| {
            ResearchError::Config(format!("Invalid value for {}: {}", name, value))
        }),
        None => Ok(None),
    }
}
