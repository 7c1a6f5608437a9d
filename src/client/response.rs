//! 响应解析：依次尝试顶层 content 与 choices[0].message.content 两种形态。
//!
//! Completion response parsing.

use serde::Deserialize;

use super::error_classification::FailureKind;

/// Primary shape: `{ "content": "..." }`.
#[derive(Debug, Deserialize)]
struct FlatBody {
    content: Option<String>,
}

/// Secondary shape: `{ "choices": [ { "message": { "content": "..." } } ] }`.
#[derive(Debug, Deserialize)]
struct ChoicesBody {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Which schema produced the content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionBody {
    Flat(String),
    Choices(String),
}

impl CompletionBody {
    /// Trimmed content regardless of shape.
    pub fn into_content(self) -> String {
        match self {
            CompletionBody::Flat(s) | CompletionBody::Choices(s) => s,
        }
    }
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Parse a 2xx body. Primary schema first, then the secondary one, then a typed error.
pub fn parse_completion(body: &str) -> Result<CompletionBody, FailureKind> {
    if let Ok(flat) = serde_json::from_str::<FlatBody>(body) {
        if let Some(content) = non_empty(flat.content) {
            return Ok(CompletionBody::Flat(content));
        }
    }

    if let Ok(nested) = serde_json::from_str::<ChoicesBody>(body) {
        let content = nested
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| non_empty(m.content));
        if let Some(content) = content {
            return Ok(CompletionBody::Choices(content));
        }
    }

    if serde_json::from_str::<serde_json::Value>(body).is_err() {
        return Err(FailureKind::MalformedResponse(
            "response body is not valid JSON".to_string(),
        ));
    }
    Err(FailureKind::MalformedResponse(
        "no content received".to_string(),
    ))
}
