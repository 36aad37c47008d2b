//! Client for the external text-generation API.
//!
//! Generates daily coding challenges and per-task learning resources from a
//! structured prompt. Every generation path has a deterministic fallback:
//! an unreachable API or a malformed reply degrades to template content,
//! never to a failed request.

mod client;
mod fallback;

pub use client::{AiClient, AiConfig, AiError, GeneratedChallenge, LearningResources};
pub use fallback::{detect_technology, fallback_challenge, fallback_resources};
