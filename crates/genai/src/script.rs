use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tripsmith_core::SamplingParams;

use crate::outcome::GenerationOutcome;
use crate::TextGenerator;

/// Maps prompts to canned outcomes by substring match. First match wins.
#[derive(Debug, Clone)]
pub struct ScriptRule {
    pub prompt_contains: String,
    pub outcome: GenerationOutcome,
}

impl ScriptRule {
    pub fn new(prompt_contains: impl Into<String>, outcome: GenerationOutcome) -> Self {
        Self {
            prompt_contains: prompt_contains.into(),
            outcome,
        }
    }
}

/// Deterministic stand-in for the backend client, for tests and offline
/// runs. Unmatched prompts are echoed back, so assertions can inspect what
/// would have been sent. Clones share the call counter.
#[derive(Debug, Clone)]
pub struct ScriptedGenerator {
    configured: bool,
    rules: Arc<Vec<ScriptRule>>,
    calls: Arc<AtomicU64>,
}

impl ScriptedGenerator {
    /// Configured generator that echoes every prompt.
    pub fn echo() -> Self {
        Self::with_rules(Vec::new())
    }

    pub fn with_rules(rules: Vec<ScriptRule>) -> Self {
        Self {
            configured: true,
            rules: Arc::new(rules),
            calls: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Generator behaving like a process whose credential never loaded.
    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            rules: Arc::new(Vec::new()),
            calls: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Number of generation calls issued against this script.
    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }
}

impl TextGenerator for ScriptedGenerator {
    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn generate(&self, prompt: &str, _params: SamplingParams) -> GenerationOutcome {
        self.calls.fetch_add(1, Ordering::Relaxed);

        if !self.configured {
            return GenerationOutcome::NotConfigured;
        }

        for rule in self.rules.iter() {
            if prompt.contains(&rule.prompt_contains) {
                return rule.outcome.clone();
            }
        }

        GenerationOutcome::Text(format!("echo:\n{prompt}"))
    }
}

#[cfg(test)]
mod tests {
    use tripsmith_core::GenerationTask;

    use super::*;

    fn sampling() -> SamplingParams {
        GenerationTask::Flights.sampling()
    }

    #[tokio::test]
    async fn echoes_unmatched_prompts_and_counts_calls() {
        let script = ScriptedGenerator::echo();

        let outcome = script.generate("plan a trip to Paris", sampling()).await;

        assert_eq!(
            outcome,
            GenerationOutcome::Text("echo:\nplan a trip to Paris".to_string())
        );
        assert_eq!(script.calls(), 1);
    }

    #[tokio::test]
    async fn first_matching_rule_wins() {
        let script = ScriptedGenerator::with_rules(vec![
            ScriptRule::new("Paris", GenerationOutcome::Fault("boom".to_string())),
            ScriptRule::new("Paris", GenerationOutcome::Text("never".to_string())),
        ]);

        let outcome = script.generate("a trip to Paris", sampling()).await;

        assert_eq!(outcome, GenerationOutcome::Fault("boom".to_string()));
    }

    #[tokio::test]
    async fn unconfigured_script_reports_it_without_matching_rules() {
        let script = ScriptedGenerator::unconfigured();

        let outcome = script.generate("anything", sampling()).await;

        assert_eq!(outcome, GenerationOutcome::NotConfigured);
        assert_eq!(script.calls(), 1);
    }

    #[tokio::test]
    async fn clones_share_the_call_counter() {
        let script = ScriptedGenerator::echo();
        let clone = script.clone();

        clone.generate("one", sampling()).await;
        clone.generate("two", sampling()).await;

        assert_eq!(script.calls(), 2);
    }
}
