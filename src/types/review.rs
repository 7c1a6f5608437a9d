use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_REVIEWER_NAME: &str = "Anonymous User";

/// Star rating, always within 1..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// All valid ratings in ascending order.
    pub fn all() -> impl Iterator<Item = Rating> {
        (Self::MIN..=Self::MAX).map(Rating)
    }
}

impl TryFrom<i64> for Rating {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .and_then(Rating::new)
            .ok_or_else(|| format!("rating must be between 1 and 5, got {}", value))
    }
}

impl From<Rating> for u8 {
    fn from(r: Rating) -> Self {
        r.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated submission, ready for enrichment.
///
/// An empty `review_text` means the reviewer left no comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSubmission {
    pub name: String,
    pub rating: Rating,
    pub review_text: String,
}

impl ReviewSubmission {
    pub fn new(rating: Rating, review_text: impl Into<String>) -> Self {
        Self {
            name: DEFAULT_REVIEWER_NAME.to_string(),
            rating,
            review_text: review_text.into(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// The three generated artifacts plus timing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichmentResult {
    pub user_response: String,
    pub admin_summary: String,
    pub recommended_actions: String,
    pub processing_time_ms: u64,
    pub model_identifier: String,
}

/// Metadata persisted with each review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewMetadata {
    pub review_length: usize,
    pub processing_time_ms: u64,
    pub model: String,
}

/// A persisted review. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredReview {
    pub id: Uuid,
    pub name: String,
    pub rating: Rating,
    pub review_text: String,
    pub user_response: String,
    pub admin_summary: String,
    pub recommended_actions: String,
    pub created_at: DateTime<Utc>,
    pub metadata: ReviewMetadata,
}

impl StoredReview {
    /// Assemble a record from a submission and its fully resolved enrichment.
    pub fn assemble(submission: ReviewSubmission, enrichment: EnrichmentResult) -> Self {
        let review_length = submission.review_text.chars().count();
        Self {
            id: Uuid::new_v4(),
            name: submission.name,
            rating: submission.rating,
            review_text: submission.review_text,
            user_response: enrichment.user_response,
            admin_summary: enrichment.admin_summary,
            recommended_actions: enrichment.recommended_actions,
            created_at: Utc::now(),
            metadata: ReviewMetadata {
                review_length,
                processing_time_ms: enrichment.processing_time_ms,
                model: enrichment.model_identifier,
            },
        }
    }
}
