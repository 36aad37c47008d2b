//! HTTP client for the chat-completions endpoint.

use serde::{Deserialize, Serialize};

use crate::fallback;

/// Configuration for the text-generation API, loaded from the environment.
#[derive(Debug, Clone)]
pub struct AiConfig {
    /// Base URL of the chat-completions API.
    pub api_url: String,
    /// Bearer token. When absent, all generation calls short-circuit to the
    /// deterministic fallbacks.
    pub api_key: Option<String>,
    /// Model identifier sent with every request.
    pub model: String,
}

impl AiConfig {
    /// Load AI client configuration from environment variables.
    ///
    /// | Env Var       | Default                |
    /// |---------------|------------------------|
    /// | `AI_API_URL`  | `https://api.x.ai/v1`  |
    /// | `AI_API_KEY`  | (unset: fallback mode) |
    /// | `AI_MODEL`    | `grok`                 |
    pub fn from_env() -> Self {
        let api_url =
            std::env::var("AI_API_URL").unwrap_or_else(|_| "https://api.x.ai/v1".into());
        let api_key = std::env::var("AI_API_KEY").ok().filter(|k| !k.is_empty());
        let model = std::env::var("AI_MODEL").unwrap_or_else(|_| "grok".into());

        Self {
            api_url,
            api_key,
            model,
        }
    }
}

/// Errors from the text-generation API layer.
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    /// No API key configured; generation is unavailable.
    #[error("AI API key is not configured")]
    NotConfigured,

    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("AI API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// The reply could not be parsed into the expected structure.
    #[error("Malformed AI response: {0}")]
    Malformed(String),
}

// ---------------------------------------------------------------------------
// Generated payloads
// ---------------------------------------------------------------------------

/// A generated daily challenge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedChallenge {
    pub title: String,
    pub description: String,
    #[serde(rename = "xpBonus")]
    pub xp_bonus: i32,
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
}

fn default_kind() -> String {
    "daily_code".to_string()
}

/// Structured learning resources for a task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningResources {
    pub explanation: String,
    pub solution: String,
    pub concept: String,
    #[serde(default)]
    pub tutorials: Vec<String>,
    #[serde(default)]
    pub videos: Vec<String>,
    #[serde(default)]
    pub documentation: Vec<String>,
    #[serde(default)]
    pub exercises: Vec<String>,
    #[serde(default)]
    pub tips: Vec<String>,
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// HTTP client for the text-generation API.
pub struct AiClient {
    client: reqwest::Client,
    config: AiConfig,
}

impl AiClient {
    /// Create a client from configuration.
    pub fn new(config: AiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Generate a daily challenge for a user profile, substituting the
    /// deterministic fallback on any failure.
    pub async fn generate_challenge(
        &self,
        tech_stack: &[String],
        learning_goals: &[String],
    ) -> GeneratedChallenge {
        match self.try_generate_challenge(tech_stack, learning_goals).await {
            Ok(challenge) => challenge,
            Err(e) => {
                tracing::warn!(error = %e, "Challenge generation failed, using fallback");
                fallback::fallback_challenge(tech_stack)
            }
        }
    }

    /// Generate learning resources for a task, substituting the
    /// deterministic fallback on any failure.
    pub async fn generate_resources(
        &self,
        task_name: &str,
        task_description: Option<&str>,
    ) -> LearningResources {
        let tech = fallback::detect_technology(&format!(
            "{task_name} {}",
            task_description.unwrap_or("")
        ));
        match self
            .try_generate_resources(task_name, task_description, tech)
            .await
        {
            Ok(resources) => resources,
            Err(e) => {
                tracing::warn!(error = %e, "Resource generation failed, using fallback");
                fallback::fallback_resources(task_name, tech)
            }
        }
    }

    async fn try_generate_challenge(
        &self,
        tech_stack: &[String],
        learning_goals: &[String],
    ) -> Result<GeneratedChallenge, AiError> {
        let stack = if tech_stack.is_empty() {
            "General".to_string()
        } else {
            tech_stack.join(", ")
        };
        let goals = if learning_goals.is_empty() {
            "Learn to code".to_string()
        } else {
            learning_goals.join(", ")
        };

        let prompt = format!(
            "Create a coding challenge for a developer with the following profile:\n\
             - Tech Stack: {stack}\n\
             - Learning Goals: {goals}\n\
             The challenge should be:\n\
             - Suitable for a daily task (30-60 minutes)\n\
             - Focused on coding or learning a specific skill\n\
             - Include a title (short, catchy), description (clear, 1-2 sentences), \
               and XP bonus (50-100 based on difficulty)\n\
             Return the response in JSON format:\n\
             {{\"title\": \"Challenge Title\", \"description\": \"Challenge description\", \
             \"xpBonus\": 50, \"type\": \"daily_code\"}}"
        );

        let content = self.chat(&prompt, 200).await?;
        let challenge: GeneratedChallenge = parse_reply(&content)?;

        if challenge.title.is_empty() || challenge.description.is_empty() {
            return Err(AiError::Malformed(
                "challenge is missing a title or description".into(),
            ));
        }
        Ok(challenge)
    }

    async fn try_generate_resources(
        &self,
        task_name: &str,
        task_description: Option<&str>,
        tech: &str,
    ) -> Result<LearningResources, AiError> {
        let prompt = format!(
            "You are an expert coding instructor. For the following programming task, provide:\n\
             1. A detailed explanation (2-3 paragraphs) of the task, its purpose, and key \
                concepts, written for beginners.\n\
             2. A sample solution or suggested approach (include code if applicable, or a \
                step-by-step plan for non-coding tasks).\n\
             3. Structured learning resources suitable for beginners.\n\
             Task Name: \"{task_name}\"\n\
             Description: \"{}\"\n\
             Technology Focus: {tech}\n\
             Return the response in JSON format with the following structure:\n\
             {{\"explanation\": \"...\", \"solution\": \"...\", \"concept\": \"...\", \
             \"tutorials\": [], \"videos\": [], \"documentation\": [], \
             \"exercises\": [], \"tips\": []}}",
            task_description.unwrap_or("No description provided"),
        );

        let content = self.chat(&prompt, 1500).await?;
        let resources: LearningResources = parse_reply(&content)?;

        if resources.explanation.is_empty()
            || resources.solution.is_empty()
            || resources.concept.is_empty()
        {
            return Err(AiError::Malformed(
                "resources are missing required fields".into(),
            ));
        }
        Ok(resources)
    }

    /// Send a single-turn chat-completions request and return the reply text.
    async fn chat(&self, prompt: &str, max_tokens: u32) -> Result<String, AiError> {
        let api_key = self.config.api_key.as_ref().ok_or(AiError::NotConfigured)?;

        let body = serde_json::json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": "You are a helpful coding instructor." },
                { "role": "user", "content": prompt },
            ],
            "max_tokens": max_tokens,
        });

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.api_url))
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AiError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| AiError::Malformed("reply contained no choices".into()))
    }
}

/// Parse a model reply into `T`, tolerating prose or code fences around the
/// JSON object.
fn parse_reply<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, AiError> {
    let json = extract_json_object(content)
        .ok_or_else(|| AiError::Malformed("no JSON object in reply".into()))?;
    serde_json::from_str(json).map_err(|e| AiError::Malformed(e.to_string()))
}

/// Slice out the outermost `{ ... }` object from a reply.
fn extract_json_object(content: &str) -> Option<&str> {
    let start = content.find('{')?;
    let end = content.rfind('}')?;
    if end <= start {
        return None;
    }
    Some(&content[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_reply_plain_json() {
        let reply = r#"{"title": "Build a CLI", "description": "Write a small CLI tool.", "xpBonus": 75, "type": "daily_code"}"#;
        let c: GeneratedChallenge = parse_reply(reply).unwrap();
        assert_eq!(c.title, "Build a CLI");
        assert_eq!(c.xp_bonus, 75);
        assert_eq!(c.kind, "daily_code");
    }

    #[test]
    fn parse_reply_with_code_fences_and_prose() {
        let reply = "Sure! Here is your challenge:\n```json\n{\"title\": \"T\", \"description\": \"D\", \"xpBonus\": 50}\n```\nGood luck!";
        let c: GeneratedChallenge = parse_reply(reply).unwrap();
        assert_eq!(c.title, "T");
        // "type" was absent: the default kind applies.
        assert_eq!(c.kind, "daily_code");
    }

    #[test]
    fn parse_reply_without_json_fails() {
        let result: Result<GeneratedChallenge, _> = parse_reply("no json here");
        assert!(matches!(result, Err(AiError::Malformed(_))));
    }

    #[test]
    fn resources_optional_lists_default_empty() {
        let reply = r#"{"explanation": "E", "solution": "S", "concept": "C"}"#;
        let r: LearningResources = parse_reply(reply).unwrap();
        assert!(r.tutorials.is_empty());
        assert!(r.tips.is_empty());
    }
}
