use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;

pub mod openai;

pub use openai::OpenAiClient;

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("language model request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("language model returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("language model returned an empty completion")]
    Empty,
}

/// One system+user turn sent to a chat completion model.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub system: String,
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f64,
}

#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Returns the trimmed text of the first completion choice.
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError>;
}

/// Removes an optional ```` ```json ```` opener and closing fence around a
/// model reply. Either fence may be missing, e.g. when the reply was cut off.
pub fn strip_code_fences(raw: &str) -> &str {
    lazy_static! {
        static ref FENCE_OPEN: Regex = Regex::new(r"^```[A-Za-z]*").unwrap();
    }
    let mut s = raw.trim();
    if let Some(m) = FENCE_OPEN.find(s) {
        s = &s[m.end()..];
    }
    if let Some(inner) = s.strip_suffix("```") {
        s = inner;
    }
    s.trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_json_fence() {
        let raw = "```json\n[{\"food\": \"rice\", \"quantity\": 120}]\n```";
        let inner = strip_code_fences(raw);
        let parsed: serde_json::Value = serde_json::from_str(inner).unwrap();
        assert_eq!(parsed[0]["food"], "rice");
    }

    #[test]
    fn strips_bare_fence_and_whitespace() {
        assert_eq!(strip_code_fences("  ```\n{\"a\": 1}\n```  "), "{\"a\": 1}");
    }

    #[test]
    fn leaves_unfenced_text_alone() {
        assert_eq!(strip_code_fences("[1, 2]"), "[1, 2]");
    }

    #[test]
    fn handles_missing_closing_fence() {
        assert_eq!(strip_code_fences("```json\n[]"), "[]");
    }

    #[test]
    fn handles_missing_opening_fence() {
        assert_eq!(strip_code_fences("[]\n```"), "[]");
    }

    #[test]
    fn fenced_garbage_still_fails_to_parse() {
        let inner = strip_code_fences("```json\nnot json\n```");
        assert!(serde_json::from_str::<serde_json::Value>(inner).is_err());
    }
}
