//! 评论增强编排：并发生成用户回复、管理摘要与改进建议，逐项兜底。
//!
//! # Enrichment Orchestrator
//!
//! [`Enricher::enrich`] turns one validated submission into an [`EnrichmentResult`]. The
//! three fields are produced by independent tasks:
//!
//! | Field | AI prompt | Fallback |
//! |-------|-----------|----------|
//! | `user_response` | [`prompts::user_response_prompt`] | [`fallback::fallback_user_response`] |
//! | `admin_summary` | [`prompts::admin_summary_prompt`] | [`fallback::fallback_admin_summary`] |
//! | `recommended_actions` | [`prompts::recommended_actions_prompt`] | [`fallback::fallback_recommended_actions`] |
//!
//! A task that fails falls back on its own; the others are unaffected. `enrich` has no
//! error path.
//!
//! A five-star submission with less than ten characters of text skips generation for the
//! summary and the actions and uses [`NOTHING_TO_SUMMARIZE`] and [`CELEBRATE_ACTIONS`].

pub mod fallback;
pub mod prompts;

use std::sync::Arc;
use std::time::Instant;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::client::TextGenerator;
use crate::types::{EnrichmentResult, Rating, ReviewSubmission};

pub use fallback::{
    fallback_admin_summary, fallback_recommended_actions, fallback_user_response, Sentiment,
};

pub const NOTHING_TO_SUMMARIZE: &str = "No significant review text to summarize.";
pub const CELEBRATE_ACTIONS: &str =
    "✅ Celebrate this win with the team!\n💡 Ask customer for testimonial or case study.";

const MIN_SUMMARIZABLE_CHARS: usize = 10;

/// Where a field's content came from. Logged, never returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSource {
    Ai,
    Fallback,
    Skipped,
}

impl FieldSource {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldSource::Ai => "ai",
            FieldSource::Fallback => "fallback",
            FieldSource::Skipped => "skipped",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Task {
    UserResponse,
    AdminSummary,
    RecommendedActions,
}

impl Task {
    fn name(self) -> &'static str {
        match self {
            Task::UserResponse => "user_response",
            Task::AdminSummary => "admin_summary",
            Task::RecommendedActions => "recommended_actions",
        }
    }

    fn prompt(self, rating: Rating, text: &str) -> String {
        match self {
            Task::UserResponse => prompts::user_response_prompt(rating, text),
            Task::AdminSummary => prompts::admin_summary_prompt(rating, text),
            Task::RecommendedActions => prompts::recommended_actions_prompt(rating, text),
        }
    }

    fn fallback(self, rating: Rating, text: &str) -> String {
        match self {
            Task::UserResponse => fallback_user_response(rating),
            Task::AdminSummary => fallback_admin_summary(rating, text),
            Task::RecommendedActions => fallback_recommended_actions(rating, text),
        }
    }
}

/// Whether a submission is trivially positive with nothing worth analysing.
pub fn is_contentless_five_star(rating: Rating, review_text: &str) -> bool {
    rating.get() == Rating::MAX && review_text.chars().count() < MIN_SUMMARIZABLE_CHARS
}

/// Runs the three generation tasks for a submission.
#[derive(Clone)]
pub struct Enricher {
    generator: Arc<dyn TextGenerator>,
}

impl Enricher {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    pub fn model(&self) -> &str {
        self.generator.model()
    }

    /// Enrich one submission. Never fails; failed tasks degrade to fallback content.
    ///
    /// The tasks are spawned onto the runtime, so once started they finish even if the
    /// returned future is dropped.
    pub async fn enrich(&self, submission: &ReviewSubmission) -> EnrichmentResult {
        let rating = submission.rating;
        let text: Arc<str> = Arc::from(submission.review_text.as_str());
        let skip_analysis = is_contentless_five_star(rating, &text);

        let started = Instant::now();

        let user = self.spawn_task(Task::UserResponse, rating, text.clone());
        let (summary, actions) = if skip_analysis {
            (None, None)
        } else {
            (
                Some(self.spawn_task(Task::AdminSummary, rating, text.clone())),
                Some(self.spawn_task(Task::RecommendedActions, rating, text.clone())),
            )
        };

        let (user, summary, actions) = futures::join!(
            join_task(Task::UserResponse, rating, &text, Some(user)),
            join_task(Task::AdminSummary, rating, &text, summary),
            join_task(Task::RecommendedActions, rating, &text, actions),
        );

        let processing_time_ms = started.elapsed().as_millis() as u64;

        debug!(
            rating = rating.get(),
            user_response = user.1.as_str(),
            admin_summary = summary.1.as_str(),
            recommended_actions = actions.1.as_str(),
            processing_time_ms,
            "enrichment complete"
        );

        EnrichmentResult {
            user_response: user.0,
            admin_summary: summary.0,
            recommended_actions: actions.0,
            processing_time_ms,
            model_identifier: self.generator.model().to_string(),
        }
    }

    fn spawn_task(&self, task: Task, rating: Rating, text: Arc<str>) -> JoinHandle<Option<String>> {
        let generator = Arc::clone(&self.generator);
        tokio::spawn(async move {
            let prompt = task.prompt(rating, &text);
            match generator.generate(&prompt).await {
                Ok(content) => {
                    let trimmed = content.trim();
                    if trimmed.is_empty() {
                        warn!(task = task.name(), "generator returned blank text, using fallback");
                        None
                    } else {
                        Some(trimmed.to_string())
                    }
                }
                Err(e) => {
                    warn!(task = task.name(), error = %e, "AI generation failed, using fallback");
                    None
                }
            }
        })
    }
}

/// Resolve one task into its final text and source.
async fn join_task(
    task: Task,
    rating: Rating,
    text: &str,
    handle: Option<JoinHandle<Option<String>>>,
) -> (String, FieldSource) {
    let Some(handle) = handle else {
        let fixed = match task {
            Task::AdminSummary => NOTHING_TO_SUMMARIZE,
            Task::RecommendedActions => CELEBRATE_ACTIONS,
            Task::UserResponse => return (task.fallback(rating, text), FieldSource::Fallback),
        };
        return (fixed.to_string(), FieldSource::Skipped);
    };

    match handle.await {
        Ok(Some(content)) => (content, FieldSource::Ai),
        Ok(None) => (task.fallback(rating, text), FieldSource::Fallback),
        Err(e) => {
            warn!(task = task.name(), error = %e, "generation task aborted, using fallback");
            (task.fallback(rating, text), FieldSource::Fallback)
        }
    }
}
