//! 评论服务门面：校验 → 增强 → 持久化，以及列表与统计读取。
//!
//! Review service facade.
//!
//! Wires the validator, the [`Enricher`] and a [`ReviewStore`] together and produces the
//! shapes consumed by the submission form and the admin view. Only `Validation` and
//! `Storage` errors leave this layer; AI failures were already absorbed by the enricher.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::analytics::{aggregate, AnalyticsSnapshot};
use crate::enrich::Enricher;
use crate::store::{ReviewFilter, ReviewStore};
use crate::types::{Rating, StoredReview};
use crate::validation::{validate, RawSubmission};
use crate::Result;

pub const DEFAULT_LIST_LIMIT: usize = 50;

/// Write-path response: what the submitter sees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub review_id: Uuid,
    pub user_response: String,
    pub timestamp: DateTime<Utc>,
}

/// Read-path response for the admin view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewListing {
    /// Filtered, limited page, newest first.
    pub reviews: Vec<StoredReview>,
    /// Length of `reviews`.
    pub total: usize,
    /// Computed over the whole collection, ignoring the filter.
    pub analytics: AnalyticsSnapshot,
}

/// Listing query. `limit` defaults to [`DEFAULT_LIST_LIMIT`]; `Some(0)` means no limit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub rating: Option<Rating>,
    pub limit: Option<usize>,
}

#[derive(Clone)]
pub struct ReviewService {
    enricher: Enricher,
    store: Arc<dyn ReviewStore>,
}

impl ReviewService {
    pub fn new(enricher: Enricher, store: Arc<dyn ReviewStore>) -> Self {
        Self { enricher, store }
    }

    pub fn store(&self) -> &Arc<dyn ReviewStore> {
        &self.store
    }

    /// Validate, enrich and persist one submission.
    pub async fn submit(&self, raw: RawSubmission) -> Result<SubmissionReceipt> {
        let submission = validate(raw)?;
        let enrichment = self.enricher.enrich(&submission).await;
        let review = StoredReview::assemble(submission, enrichment);
        let receipt = SubmissionReceipt {
            review_id: review.id,
            user_response: review.user_response.clone(),
            timestamp: review.created_at,
        };

        let rating = review.rating.get();
        let processing_time_ms = review.metadata.processing_time_ms;
        self.store.create(review).await.map_err(|e| {
            warn!(error = %e, store = self.store.name(), "failed to persist review");
            e
        })?;

        info!(
            review_id = %receipt.review_id,
            rating,
            processing_time_ms,
            "review submitted"
        );
        Ok(receipt)
    }

    /// List reviews and compute analytics over the full collection.
    pub async fn list(&self, query: ListQuery) -> Result<ReviewListing> {
        let filter = ReviewFilter {
            rating: query.rating,
            limit: match query.limit {
                None => Some(DEFAULT_LIST_LIMIT),
                Some(0) => None,
                Some(n) => Some(n),
            },
        };
        let reviews = self.store.find_all(filter).await?;
        let everything = self.store.find_all(ReviewFilter::all()).await?;
        let analytics = aggregate(&everything);

        Ok(ReviewListing {
            total: reviews.len(),
            reviews,
            analytics,
        })
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<StoredReview>> {
        self.store.find_by_id(id).await
    }

    /// Delete a review. `Ok(false)` when no such review exists.
    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let deleted = self.store.delete_by_id(id).await?;
        if deleted {
            info!(review_id = %id, "review deleted");
        }
        Ok(deleted)
    }
}
