//! 评论存储协作方：接口定义与内存实现。
//!
//! # Review storage
//!
//! The enrichment core never talks to a database directly; it consumes the
//! [`ReviewStore`] contract. A record is only handed to [`ReviewStore::create`] once every
//! enrichment field is resolved, and implementations must make a created record visible
//! in full or not at all.
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`ReviewStore`] | Trait for storage backends |
//! | [`MemoryReviewStore`] | Lock-guarded in-process implementation |
//! | [`ReviewFilter`] | Optional rating filter and result limit |

mod memory;

pub use memory::MemoryReviewStore;

use async_trait::async_trait;
use uuid::Uuid;

use crate::types::{Rating, StoredReview};
use crate::Result;

/// Query parameters for [`ReviewStore::find_all`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReviewFilter {
    pub rating: Option<Rating>,
    pub limit: Option<usize>,
}

impl ReviewFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_rating(mut self, rating: Rating) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn matches(&self, review: &StoredReview) -> bool {
        self.rating.map_or(true, |r| review.rating == r)
    }
}

#[async_trait]
pub trait ReviewStore: Send + Sync {
    /// Persist a fully formed review. Creating an id that already exists is an error.
    async fn create(&self, review: StoredReview) -> Result<Uuid>;
    /// Matching reviews, newest first.
    async fn find_all(&self, filter: ReviewFilter) -> Result<Vec<StoredReview>>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<StoredReview>>;
    /// Returns whether a review was removed.
    async fn delete_by_id(&self, id: Uuid) -> Result<bool>;
    fn name(&self) -> &'static str;
}
