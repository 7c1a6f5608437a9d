//! Core type definitions for submissions, enrichment output and stored reviews.

pub mod review;

pub use review::{
    EnrichmentResult, Rating, ReviewMetadata, ReviewSubmission, StoredReview,
    DEFAULT_REVIEWER_NAME,
};
