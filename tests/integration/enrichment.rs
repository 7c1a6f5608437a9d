//! Integration tests for the enrichment orchestrator.

use crate::integration::generators::{always_unavailable, echo, task_of, ScriptedGenerator};
use review_enrich::enrich::{
    fallback_admin_summary, fallback_recommended_actions, fallback_user_response,
    CELEBRATE_ACTIONS, NOTHING_TO_SUMMARIZE,
};
use review_enrich::{Enricher, Error, Rating, ReviewSubmission};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::{Duration, Instant};

fn rating(v: u8) -> Rating {
    Rating::new(v).unwrap()
}

#[tokio::test]
async fn test_contentless_five_star_skips_summary_and_actions() {
    for text in ["", "great!"] {
        let generator = Arc::new(echo());
        let enricher = Enricher::new(generator.clone());

        let result = enricher
            .enrich(&ReviewSubmission::new(rating(5), text))
            .await;

        assert_eq!(generator.tasks_called(), vec!["reply"]);
        assert_eq!(result.admin_summary, NOTHING_TO_SUMMARIZE);
        assert_eq!(result.recommended_actions, CELEBRATE_ACTIONS);
        assert!(result.user_response.starts_with("reply:"));
    }
}

#[tokio::test]
async fn test_five_star_skip_threshold_is_ten_chars() {
    let nine = "great!!!!";
    let ten = "excellent!";
    assert_eq!(nine.chars().count(), 9);
    assert_eq!(ten.chars().count(), 10);

    let generator = Arc::new(echo());
    let result = Enricher::new(generator.clone())
        .enrich(&ReviewSubmission::new(rating(5), nine))
        .await;
    assert_eq!(generator.tasks_called(), vec!["reply"]);
    assert_eq!(result.admin_summary, NOTHING_TO_SUMMARIZE);

    let generator = Arc::new(echo());
    let result = Enricher::new(generator.clone())
        .enrich(&ReviewSubmission::new(rating(5), ten))
        .await;
    assert_eq!(generator.tasks_called(), vec!["actions", "reply", "summary"]);
    assert_eq!(result.admin_summary, format!("summary:{}", ten));
    assert_eq!(result.recommended_actions, format!("actions:{}", ten));
}

#[tokio::test]
async fn test_low_rating_short_text_still_calls_all_three() {
    let generator = Arc::new(echo());
    let enricher = Enricher::new(generator.clone());

    enricher
        .enrich(&ReviewSubmission::new(rating(4), "ok"))
        .await;

    assert_eq!(generator.tasks_called(), vec!["actions", "reply", "summary"]);
}

#[tokio::test]
async fn test_total_outage_yields_fallback_for_every_field() {
    let enricher = Enricher::new(Arc::new(always_unavailable()));

    let result = enricher
        .enrich(&ReviewSubmission::new(rating(1), "terrible"))
        .await;

    assert_eq!(result.user_response, fallback_user_response(rating(1)));
    assert_eq!(
        result.admin_summary,
        fallback_admin_summary(rating(1), "terrible")
    );
    assert_eq!(
        result.recommended_actions,
        fallback_recommended_actions(rating(1), "terrible")
    );
    assert_eq!(result.model_identifier, "scripted/model");
}

#[tokio::test]
async fn test_partial_fallback_is_per_field() {
    let generator = Arc::new(ScriptedGenerator::new(|p: &str| {
        if task_of(p) == "summary" {
            Err(Error::ai_unavailable("summary backend down"))
        } else {
            Ok(format!("ai {}", task_of(p)))
        }
    }));
    let enricher = Enricher::new(generator);

    let text = "The staff were friendly but the room was dirty";
    let result = enricher
        .enrich(&ReviewSubmission::new(rating(3), text))
        .await;

    assert_eq!(result.user_response, "ai reply");
    assert_eq!(result.admin_summary, fallback_admin_summary(rating(3), text));
    assert_eq!(result.recommended_actions, "ai actions");
}

#[tokio::test]
async fn test_ai_text_is_trimmed_and_blank_falls_back() {
    let generator = Arc::new(ScriptedGenerator::new(|p: &str| match task_of(p) {
        "reply" => Ok("\n  Thank you!  \t".to_string()),
        _ => Ok("   ".to_string()),
    }));
    let enricher = Enricher::new(generator);

    let text = "Decent place overall, a bit noisy";
    let result = enricher
        .enrich(&ReviewSubmission::new(rating(2), text))
        .await;

    assert_eq!(result.user_response, "Thank you!");
    assert_eq!(result.admin_summary, fallback_admin_summary(rating(2), text));
    assert_eq!(
        result.recommended_actions,
        fallback_recommended_actions(rating(2), text)
    );
}

#[tokio::test]
async fn test_panicking_task_falls_back() {
    let generator = Arc::new(ScriptedGenerator::new(|p: &str| {
        if task_of(p) == "actions" {
            panic!("generator bug");
        }
        Ok("fine".to_string())
    }));
    let enricher = Enricher::new(generator);

    let text = "Long enough text to analyse";
    let result = enricher
        .enrich(&ReviewSubmission::new(rating(4), text))
        .await;

    assert_eq!(result.user_response, "fine");
    assert_eq!(
        result.recommended_actions,
        fallback_recommended_actions(rating(4), text)
    );
}

#[tokio::test]
async fn test_tasks_run_concurrently_and_time_is_measured() {
    let generator = Arc::new(echo().with_latency(150, 150));
    let enricher = Enricher::new(generator);

    let start = Instant::now();
    let result = enricher
        .enrich(&ReviewSubmission::new(rating(2), "slow kitchen and cold food"))
        .await;
    let elapsed = start.elapsed();

    assert!(result.processing_time_ms >= 150);
    // Three sequential calls would need 450ms.
    assert!(
        elapsed < Duration::from_millis(400),
        "tasks did not overlap: {:?}",
        elapsed
    );
}

#[tokio::test]
async fn test_concurrent_enrichments_do_not_cross_contaminate() {
    let generator = Arc::new(echo().with_latency(5, 80));
    let enricher = Enricher::new(generator);

    let texts = [
        "alpha: the pasta was overcooked",
        "bravo: delivery took two hours",
        "charlie: loved the new checkout",
    ];
    let submissions: Vec<ReviewSubmission> = texts
        .iter()
        .zip([1u8, 3, 4])
        .map(|(t, r)| ReviewSubmission::new(rating(r), *t))
        .collect();

    let results = futures::future::join_all(submissions.iter().map(|s| enricher.enrich(s))).await;

    for (text, result) in texts.iter().zip(results) {
        assert_eq!(result.user_response, format!("reply:{}", text));
        assert_eq!(result.admin_summary, format!("summary:{}", text));
        assert_eq!(result.recommended_actions, format!("actions:{}", text));
    }
}

#[tokio::test]
async fn test_tasks_finish_after_caller_gives_up() {
    let generator = Arc::new(echo().with_latency(100, 100));
    let enricher = Enricher::new(generator.clone());

    let submission = ReviewSubmission::new(rating(2), "abandoned request with details");
    let outcome =
        tokio::time::timeout(Duration::from_millis(20), enricher.enrich(&submission)).await;
    assert!(outcome.is_err(), "caller should have timed out first");

    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(generator.completed.load(Ordering::SeqCst), 3);
}
