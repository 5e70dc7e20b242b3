//! Model Provider Clients and Abstractions
//!
//! This module provides the one seam the research stages depend on: a
//! [`ModelClient`] that turns role instructions plus input text into either
//! free text, a JSON value conforming to a declared shape, or a
//! search-augmented summary.
//!
//! # Architecture
//!
//! - [`ModelClient`] - The core trait the planner, searcher and writer call
//! - [`ResultShape`] - A named JSON schema that constrains structured output
//! - [`OpenAIClient`] - The OpenAI-backed implementation
//!
//! Stages never trust provider output as-is: structured responses are
//! deserialized and validated at the stage boundary, and any mismatch
//! surfaces as that stage's typed failure.

/// Core model client trait and result shapes.
pub mod client;
/// OpenAI chat-completions implementation.
pub mod openai;

pub use client::{strip_code_fences, ModelClient, ResultShape};
pub use openai::OpenAIClient;
