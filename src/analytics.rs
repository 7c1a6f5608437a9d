//! 评分统计：总数、平均分（两位小数）与 1-5 星分布。
//!
//! Analytics aggregation over the stored review collection.
//!
//! [`aggregate`] rescans the whole collection on every call. At larger volumes the natural
//! optimisation is to maintain the counters on create/delete instead.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{Rating, StoredReview};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSnapshot {
    pub total_reviews: usize,
    pub average_rating: f64,
    /// Keys 1..=5, always all present.
    pub rating_distribution: BTreeMap<u8, usize>,
}

impl AnalyticsSnapshot {
    pub fn empty() -> Self {
        Self {
            total_reviews: 0,
            average_rating: 0.0,
            rating_distribution: Rating::all().map(|r| (r.get(), 0)).collect(),
        }
    }

    pub fn count_for(&self, rating: Rating) -> usize {
        self.rating_distribution
            .get(&rating.get())
            .copied()
            .unwrap_or(0)
    }
}

/// Aggregate any sequence of ratings. Pure and total.
pub fn aggregate_ratings<I>(ratings: I) -> AnalyticsSnapshot
where
    I: IntoIterator<Item = Rating>,
{
    let mut snapshot = AnalyticsSnapshot::empty();
    let mut sum: u64 = 0;

    for rating in ratings {
        snapshot.total_reviews += 1;
        sum += u64::from(rating.get());
        *snapshot.rating_distribution.entry(rating.get()).or_insert(0) += 1;
    }

    if snapshot.total_reviews > 0 {
        snapshot.average_rating = round2(sum as f64 / snapshot.total_reviews as f64);
    }
    snapshot
}

pub fn aggregate(reviews: &[StoredReview]) -> AnalyticsSnapshot {
    aggregate_ratings(reviews.iter().map(|r| r.rating))
}

/// Round to two decimals, half away from zero.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
