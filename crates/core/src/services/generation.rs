//! Content generation client.
//!
//! Wraps the external text-generation endpoint. The client fails soft:
//! any transport error, non-2xx status, or malformed response body yields
//! the fixed [`GENERATION_FAILED`] sentinel, which callers persist as if
//! it were real content.

use draftsmith_common::{AppError, AppResult, Config};
use serde_json::{Value, json};

/// Sentinel persisted in place of content when the upstream call fails.
pub const GENERATION_FAILED: &str = "AI generation failed.";

const SYSTEM_INSTRUCTIONS: &str = "\
You are an expert academic & professional writing assistant.

Write content that is:
- clear, structured, and well-organized
- suitable for students and professionals
- formal and polished
- includes examples and strong explanations
- avoids repetition and filler";

/// Client for the external generation endpoint.
#[derive(Clone)]
pub struct GenerationClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl GenerationClient {
    /// Create a new generation client from the process configuration.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: config.llm.api_url.clone(),
            api_key: config.llm.api_key.clone(),
        }
    }

    /// Generate initial content for a section from its title and the
    /// project topic.
    pub async fn generate(&self, section_title: &str, topic: &str) -> String {
        self.call(&build_generation_prompt(section_title, topic))
            .await
    }

    /// Rewrite existing content according to an improvement instruction.
    pub async fn refine(&self, current_content: &str, instruction: &str) -> String {
        self.call(&build_refinement_prompt(current_content, instruction))
            .await
    }

    /// Submit one single-turn request and return cleaned text, or the
    /// sentinel on any failure.
    async fn call(&self, prompt: &str) -> String {
        match self.request(prompt).await {
            Ok(text) => clean_output(&text),
            Err(err) => {
                tracing::warn!(error = %err, "Generation request failed");
                GENERATION_FAILED.to_string()
            }
        }
    }

    async fn request(&self, prompt: &str) -> AppResult<String> {
        let url = format!("{}?key={}", self.api_url, self.api_key);

        let payload = json!({
            "contents": [
                {
                    "role": "user",
                    "parts": [{ "text": format!("{SYSTEM_INSTRUCTIONS}\n\nUSER REQUEST:\n{prompt}") }]
                }
            ]
        });

        let response = self
            .http
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::ExternalService(e.to_string()))?
            .error_for_status()
            .map_err(|e| AppError::ExternalService(e.to_string()))?;

        let body: Value = response
            .json()
            .await
            .map_err(|e| AppError::ExternalService(e.to_string()))?;

        body.pointer("/candidates/0/content/parts/0/text")
            .and_then(Value::as_str)
            .map(ToString::to_string)
            .ok_or_else(|| {
                AppError::ExternalService("Response missing generated text".to_string())
            })
    }
}

/// Task prompt for initial section generation.
fn build_generation_prompt(section_title: &str, topic: &str) -> String {
    format!(
        "Write a detailed, structured section titled '{section_title}' \
         based on this topic: {topic}. \
         Make it clear, formal, and highly readable."
    )
}

/// Task prompt for refining existing content.
fn build_refinement_prompt(current_content: &str, instruction: &str) -> String {
    format!("Improve the following content.\n\nINSTRUCTION: {instruction}\n\nCONTENT:\n{current_content}")
}

/// Strip markdown residue the upstream model tends to emit.
///
/// Removes every literal `*`, `#`, and `_` (heading markers included),
/// then trims surrounding whitespace.
#[must_use]
pub fn clean_output(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, '*' | '#' | '_'))
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_output_strips_markdown_characters() {
        assert_eq!(
            clean_output("## Heading\n**bold** and _italic_"),
            "Heading\nbold and italic"
        );
    }

    #[test]
    fn test_clean_output_trims_whitespace() {
        assert_eq!(clean_output("  plain text \n"), "plain text");
    }

    #[test]
    fn test_clean_output_keeps_interior_whitespace() {
        assert_eq!(clean_output("a  b\n\nc"), "a  b\n\nc");
    }

    #[test]
    fn test_clean_output_on_clean_text_is_identity() {
        assert_eq!(clean_output("Already clean."), "Already clean.");
    }

    #[test]
    fn test_generation_prompt_embeds_title_and_topic() {
        let prompt = build_generation_prompt("Intro", "Oceans");
        assert!(prompt.contains("'Intro'"));
        assert!(prompt.contains("Oceans"));
    }

    #[test]
    fn test_refinement_prompt_embeds_instruction_and_content() {
        let prompt = build_refinement_prompt("current text", "make it shorter");
        assert!(prompt.contains("INSTRUCTION: make it shorter"));
        assert!(prompt.contains("CONTENT:\ncurrent text"));
    }
}
