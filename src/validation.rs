//! 提交校验：评分范围、姓名长度、评论截断。
//!
//! Submission boundary validation.

use serde::{Deserialize, Serialize};

use crate::types::{Rating, ReviewSubmission, DEFAULT_REVIEWER_NAME};
use crate::{Error, ErrorContext, Result};

pub const MAX_NAME_CHARS: usize = 100;
pub const MAX_REVIEW_CHARS: usize = 2000;
const TRUNCATION_MARKER: &str = "...";

/// Submission as received from a client, before any checks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSubmission {
    #[serde(default)]
    pub name: Option<String>,
    /// Kept untyped so that `4.5` or `"4"` are reported as validation errors rather than
    /// failing deserialization of the whole body.
    #[serde(default)]
    pub rating: Option<serde_json::Value>,
    #[serde(default)]
    pub review_text: Option<String>,
}

impl RawSubmission {
    pub fn new(rating: i64) -> Self {
        Self {
            rating: Some(serde_json::Value::from(rating)),
            ..Self::default()
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn review_text(mut self, text: impl Into<String>) -> Self {
        self.review_text = Some(text.into());
        self
    }
}

/// Validate and normalise a raw submission.
///
/// All problems are collected into one `Validation` error.
pub fn validate(raw: RawSubmission) -> Result<ReviewSubmission> {
    let mut problems: Vec<String> = Vec::new();
    let mut fields: Vec<&'static str> = Vec::new();

    let rating = match raw.rating.as_ref() {
        None | Some(serde_json::Value::Null) => {
            problems.push("rating is required".to_string());
            fields.push("rating");
            None
        }
        Some(value) => match whole_number(value).map(Rating::try_from) {
            Some(Ok(rating)) => Some(rating),
            Some(Err(msg)) => {
                problems.push(msg);
                fields.push("rating");
                None
            }
            None => {
                problems.push(format!("rating must be an integer, got {}", value));
                fields.push("rating");
                None
            }
        },
    };

    let name = match raw.name.map(|n| n.trim().to_string()) {
        Some(n) if n.chars().count() > MAX_NAME_CHARS => {
            problems.push(format!("name must be at most {} characters", MAX_NAME_CHARS));
            fields.push("name");
            String::new()
        }
        Some(n) if !n.is_empty() => n,
        _ => DEFAULT_REVIEWER_NAME.to_string(),
    };

    let review_text = truncate_review(raw.review_text.unwrap_or_default());

    match rating {
        Some(rating) if problems.is_empty() => Ok(ReviewSubmission {
            name,
            rating,
            review_text,
        }),
        _ => Err(Error::validation_with_context(
            format!("Invalid input: {}", problems.join(", ")),
            ErrorContext::new()
                .with_field_path(fields.join(","))
                .with_source("submission_validator"),
        )),
    }
}

/// Integers, or floats with no fractional part such as `5.0`. Huge floats saturate and
/// fail the range check afterwards.
fn whole_number(value: &serde_json::Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.is_finite() && f.fract() == 0.0)
            .map(|f| f as i64)
    })
}

/// Cap review text at [`MAX_REVIEW_CHARS`], ending with `...` when cut.
pub fn truncate_review(text: String) -> String {
    if text.chars().count() <= MAX_REVIEW_CHARS {
        return text;
    }
    let keep = MAX_REVIEW_CHARS - TRUNCATION_MARKER.len();
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(TRUNCATION_MARKER);
    out
}
