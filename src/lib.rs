//! # review-enrich
//!
//! 评论增强管线：为每条评分与评论生成用户回复、管理摘要和改进建议，AI 不可用时确定性兜底。
//!
//! Review enrichment pipeline: takes a star rating and free-text feedback, asks a
//! text-generation backend for a customer reply, a one-line admin summary and an
//! improvement-action list, and falls back to deterministic content whenever the backend
//! is unconfigured or misbehaves.
//!
//! ## Core Philosophy
//!
//! - **Never fail a submission on AI trouble**: each field degrades to fallback on its own
//! - **Bounded**: every backend attempt has a deadline, every retry loop a budget
//! - **Explicit configuration**: one immutable [`config::GeneratorConfig`], no globals
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use review_enrich::{
//!     config::GeneratorConfig, Enricher, MemoryReviewStore, RawSubmission, ReviewService,
//!     TextGenClientBuilder,
//! };
//!
//! #[tokio::main]
//! async fn main() -> review_enrich::Result<()> {
//!     let client = TextGenClientBuilder::from_config(GeneratorConfig::from_env()?).build()?;
//!     let service = ReviewService::new(
//!         Enricher::new(Arc::new(client)),
//!         Arc::new(MemoryReviewStore::new()),
//!     );
//!
//!     let receipt = service
//!         .submit(RawSubmission::new(2).review_text("The order arrived two days late."))
//!         .await?;
//!     println!("{}", receipt.user_response);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Text-generation client, retry policy, failure classification |
//! | [`transport`] | Pooled HTTP transport |
//! | [`enrich`] | Orchestrator, prompts and fallback content |
//! | [`analytics`] | Count / mean / histogram over stored reviews |
//! | [`store`] | Storage collaborator contract and in-memory backend |
//! | [`validation`] | Submission boundary checks |
//! | [`service`] | Facade producing the presentation shapes |
//! | [`config`] | Environment-driven configuration |
//! | [`types`] | Submission, enrichment and stored-review types |

pub mod analytics;
pub mod client;
pub mod config;
pub mod enrich;
pub mod service;
pub mod store;
pub mod transport;
pub mod types;
pub mod validation;

// Re-export main types for convenience
pub use analytics::{aggregate, AnalyticsSnapshot};
pub use client::{GenerateOptions, TextGenClient, TextGenClientBuilder, TextGenerator};
pub use enrich::Enricher;
pub use service::{ListQuery, ReviewListing, ReviewService, SubmissionReceipt};
pub use store::{MemoryReviewStore, ReviewFilter, ReviewStore};
pub use types::{EnrichmentResult, Rating, ReviewSubmission, StoredReview};
pub use validation::RawSubmission;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
