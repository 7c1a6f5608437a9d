//! 确定性兜底文本：AI 不可用时仅由 (评分, 评论) 生成回复、摘要与改进建议。
//!
//! Deterministic fallback content.
//!
//! Every function here is pure and total: the output depends only on the rating and the
//! review text, so the same input always yields byte-identical output.

use crate::types::Rating;

const SNIPPET_CHARS: usize = 50;
const DETAILED_TEXT_CHARS: usize = 10;

/// Sentiment band derived from the star rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    pub fn of(rating: Rating) -> Self {
        match rating.get() {
            4..=5 => Sentiment::Positive,
            3 => Sentiment::Neutral,
            _ => Sentiment::Negative,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Neutral => "Neutral",
            Sentiment::Negative => "Negative",
        }
    }
}

pub fn fallback_user_response(rating: Rating) -> String {
    match Sentiment::of(rating) {
        Sentiment::Positive => "Thank you so much for your positive feedback! We're glad to hear you had a great experience.",
        Sentiment::Neutral => "Thank you for your feedback. We appreciate your input and will use it to improve our services.",
        Sentiment::Negative => "We apologize that your experience did not meet expectations. We are committed to doing better in the future.",
    }
    .to_string()
}

pub fn fallback_admin_summary(rating: Rating, review_text: &str) -> String {
    let snippet = if review_text.is_empty() {
        "No comments".to_string()
    } else {
        let mut s: String = review_text.chars().take(SNIPPET_CHARS).collect();
        if review_text.chars().count() > SNIPPET_CHARS {
            s.push_str("...");
        }
        s
    };
    format!("{} review: {}", Sentiment::of(rating).label(), snippet)
}

pub fn fallback_recommended_actions(rating: Rating, review_text: &str) -> String {
    let (improve, fix): ([&str; 2], [&str; 2]) = match Sentiment::of(rating) {
        Sentiment::Positive => (
            [
                "Continue current excellent service",
                "Identify what made this experience great",
            ],
            [
                "Document successful practices",
                "Share with team for replication",
            ],
        ),
        Sentiment::Neutral => (
            [
                "Identify specific pain points",
                "Understand mixed feedback root cause",
            ],
            [
                "Follow up with customer for details",
                "Implement targeted improvements",
            ],
        ),
        Sentiment::Negative => {
            let second = if review_text.chars().count() > DETAILED_TEXT_CHARS {
                "Fix issues mentioned in review"
            } else {
                "Investigate service quality gaps"
            };
            (
                ["Address customer dissatisfaction immediately", second],
                [
                    "Contact customer for service recovery",
                    "Implement corrective action plan",
                ],
            )
        }
    };

    format!(
        "🔍 WHAT TO IMPROVE:\n- {}\n- {}\n\n🛠️ HOW TO FIX:\n- {}\n- {}",
        improve[0], improve[1], fix[0], fix[1]
    )
}
