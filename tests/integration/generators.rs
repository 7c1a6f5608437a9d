//! Scripted [`TextGenerator`] implementations for orchestrator tests.

use async_trait::async_trait;
use rand::Rng;
use review_enrich::{Error, Result, TextGenerator};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Which generation task a prompt belongs to, recovered from its wording.
pub fn task_of(prompt: &str) -> &'static str {
    if prompt.contains("customer service representative") {
        "reply"
    } else if prompt.contains("summarize this review") {
        "summary"
    } else if prompt.contains("business improvement consultant") {
        "actions"
    } else {
        "unknown"
    }
}

/// The quoted review text inside a prompt.
pub fn review_of(prompt: &str) -> String {
    let start = prompt.find("Review: \"").map(|i| i + "Review: \"".len());
    match start {
        Some(s) => prompt[s..].split('"').next().unwrap_or_default().to_string(),
        None => String::new(),
    }
}

/// Generator driven by a closure, recording every prompt it receives.
pub struct ScriptedGenerator<F>
where
    F: Fn(&str) -> Result<String> + Send + Sync,
{
    respond: F,
    delay: Option<(u64, u64)>,
    pub prompts: Mutex<Vec<String>>,
    pub completed: AtomicUsize,
}

impl<F> ScriptedGenerator<F>
where
    F: Fn(&str) -> Result<String> + Send + Sync,
{
    pub fn new(respond: F) -> Self {
        Self {
            respond,
            delay: None,
            prompts: Mutex::new(Vec::new()),
            completed: AtomicUsize::new(0),
        }
    }

    /// Sleep a random duration in `[min_ms, max_ms]` before answering.
    pub fn with_latency(mut self, min_ms: u64, max_ms: u64) -> Self {
        self.delay = Some((min_ms, max_ms));
        self
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn tasks_called(&self) -> Vec<&'static str> {
        let mut tasks: Vec<&'static str> = self
            .prompts
            .lock()
            .unwrap()
            .iter()
            .map(|p| task_of(p))
            .collect();
        tasks.sort();
        tasks
    }
}

#[async_trait]
impl<F> TextGenerator for ScriptedGenerator<F>
where
    F: Fn(&str) -> Result<String> + Send + Sync,
{
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        if let Some((min, max)) = self.delay {
            let ms = rand::thread_rng().gen_range(min..=max);
            tokio::time::sleep(Duration::from_millis(ms)).await;
        }
        let out = (self.respond)(prompt);
        self.completed.fetch_add(1, Ordering::SeqCst);
        out
    }

    fn model(&self) -> &str {
        "scripted/model"
    }
}

pub fn always_unavailable() -> ScriptedGenerator<impl Fn(&str) -> Result<String> + Send + Sync> {
    ScriptedGenerator::new(|_: &str| Err(Error::ai_unavailable("scripted outage")))
}

/// Echoes `"<task>:<review text>"` so results can be traced back to their submission.
pub fn echo() -> ScriptedGenerator<impl Fn(&str) -> Result<String> + Send + Sync> {
    ScriptedGenerator::new(|p: &str| Ok(format!("{}:{}", task_of(p), review_of(p))))
}
