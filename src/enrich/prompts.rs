//! Prompt templates for the three generation tasks.

use crate::types::Rating;

pub fn user_response_prompt(rating: Rating, review_text: &str) -> String {
    let review = if review_text.is_empty() {
        "No specific comments provided."
    } else {
        review_text
    };
    format!(
        "You are a customer service representative for a company.
Write a short, warm, and professional response to a customer review.

Rating: {rating}/5 stars
Review: \"{review}\"

Guidelines:
- Maximum 2-3 sentences.
- Be empathetic and appreciative.
- If rating is low (1-3), apologize and offer support.
- If rating is high (4-5), thank them enthusiastically.
- Do not include placeholders like \"[Your Name]\".
- Return ONLY the response text."
    )
}

pub fn admin_summary_prompt(rating: Rating, review_text: &str) -> String {
    format!(
        "As an expert analyst, summarize this review in one powerful sentence. Focus directly on the **root cause** of the rating (why they are happy or unhappy) so the admin knows exactly what to fix or celebrate.

Rating: {rating}/5
Review: \"{review_text}\"

Return only the summary."
    )
}

pub fn recommended_actions_prompt(rating: Rating, review_text: &str) -> String {
    let review = if review_text.is_empty() {
        "No specific feedback provided"
    } else {
        review_text
    };
    format!(
        "You are a business improvement consultant analyzing customer feedback. Based on this review, provide:

1. **What to Improve**: Identify 1-2 specific areas that need improvement
2. **How to Fix**: Provide actionable solutions for each issue

Rating: {rating}/5
Review: \"{review}\"

Format your response as:
🔍 WHAT TO IMPROVE:
- [Specific issue 1]
- [Specific issue 2 if applicable]

🛠️ HOW TO FIX:
- [Actionable solution 1]
- [Actionable solution 2 if applicable]

Keep each point concise (max 10 words). Focus on practical, implementable actions."
    )
}
