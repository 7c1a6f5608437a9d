use super::{ReviewFilter, ReviewStore};
use crate::types::StoredReview;
use crate::{Error, ErrorContext, Result};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
struct Inner {
    /// Insertion order; newest last.
    reviews: Vec<StoredReview>,
    /// Every id ever created, including deleted ones.
    issued: HashSet<Uuid>,
}

/// In-memory review store.
///
/// Records are inserted whole under a write lock, so concurrent creates never
/// interleave fields. Ids are never reused, even after deletion.
#[derive(Default)]
pub struct MemoryReviewStore {
    inner: RwLock<Inner>,
}

impl MemoryReviewStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned() -> Error {
        Error::storage_with_context(
            "review store lock poisoned",
            ErrorContext::new().with_source("memory_store"),
        )
    }
}

#[async_trait]
impl ReviewStore for MemoryReviewStore {
    async fn create(&self, review: StoredReview) -> Result<Uuid> {
        let mut inner = self.inner.write().map_err(|_| Self::poisoned())?;
        let id = review.id;
        if !inner.issued.insert(id) {
            return Err(Error::storage_with_context(
                "review id already issued",
                ErrorContext::new()
                    .with_field_path("review.id")
                    .with_details(id.to_string())
                    .with_source("memory_store"),
            ));
        }
        inner.reviews.push(review);
        Ok(id)
    }

    async fn find_all(&self, filter: ReviewFilter) -> Result<Vec<StoredReview>> {
        let inner = self.inner.read().map_err(|_| Self::poisoned())?;
        let mut out: Vec<StoredReview> = inner
            .reviews
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        // Stable sort keeps insertion order for equal timestamps; reverse gives newest first.
        out.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        out.reverse();
        if let Some(limit) = filter.limit {
            out.truncate(limit);
        }
        Ok(out)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<StoredReview>> {
        let inner = self.inner.read().map_err(|_| Self::poisoned())?;
        Ok(inner.reviews.iter().find(|r| r.id == id).cloned())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool> {
        let mut inner = self.inner.write().map_err(|_| Self::poisoned())?;
        let before = inner.reviews.len();
        inner.reviews.retain(|r| r.id != id);
        Ok(inner.reviews.len() != before)
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
