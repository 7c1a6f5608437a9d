use serde::Serialize;

use crate::config::SamplingParams;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

/// Wire body for one non-streamed completion.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub stream: bool,
    pub temperature: f64,
    pub max_tokens: u32,
    pub top_p: f64,
}

impl CompletionRequest {
    pub fn user_prompt(model: &str, prompt: &str, sampling: &SamplingParams) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![ChatMessage {
                role: "user",
                content: prompt.to_string(),
            }],
            stream: false,
            temperature: sampling.temperature,
            max_tokens: sampling.max_tokens,
            top_p: sampling.top_p,
        }
    }
}
