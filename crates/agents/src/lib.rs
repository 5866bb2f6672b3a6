use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;
use tracing::{info, instrument};
use tripsmith_core::{BudgetTier, GenerationTask, TripPlanResponse, TripRequest};
use tripsmith_genai::{GenerationOutcome, TextGenerator};
use tripsmith_observability::AppMetrics;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("generation backend is not configured")]
    NotConfigured,
}

/// Orchestrates one plan: resolves the budget tier once, builds the four
/// prompts, fans the generation calls out concurrently, and renders each
/// outcome into its section. A failed task only ever affects its own
/// section.
#[derive(Clone)]
pub struct TripPlanner<G: TextGenerator> {
    generator: Arc<G>,
    metrics: Arc<AppMetrics>,
}

impl<G: TextGenerator> TripPlanner<G> {
    pub fn new(generator: Arc<G>, metrics: Arc<AppMetrics>) -> Self {
        Self { generator, metrics }
    }

    #[instrument(skip(self, request), fields(destination = %request.destination))]
    pub async fn plan(&self, request: TripRequest) -> Result<TripPlanResponse, PlanError> {
        // Checked once up front; the whole request is refused rather than
        // producing four "not configured" sections.
        if !self.generator.is_configured() {
            return Err(PlanError::NotConfigured);
        }

        let started = Instant::now();
        self.metrics.inc_plan_request();

        let tier = BudgetTier::from_level(request.budget_level);
        info!(
            source = %request.source,
            destination = %request.destination,
            budget = tier.descriptor(),
            "planning trip"
        );

        let (flight_suggestions, itinerary, recommendations, weather_forecast) = tokio::join!(
            self.run_task(GenerationTask::Flights, &request, tier),
            self.run_task(GenerationTask::Itinerary, &request, tier),
            self.run_task(GenerationTask::Recommendations, &request, tier),
            self.run_task(GenerationTask::Weather, &request, tier),
        );

        self.metrics.observe_plan_latency(started.elapsed());

        Ok(TripPlanResponse {
            flight_suggestions,
            itinerary,
            recommendations,
            weather_forecast,
        })
    }

    async fn run_task(
        &self,
        task: GenerationTask,
        request: &TripRequest,
        tier: BudgetTier,
    ) -> String {
        let prompt = task.prompt(request, tier);
        self.metrics.inc_generation_call();

        let outcome = self.generator.generate(&prompt, task.sampling()).await;
        match &outcome {
            GenerationOutcome::Text(_) => {}
            GenerationOutcome::Empty { .. } => self.metrics.inc_generation_empty(),
            GenerationOutcome::Fault(_) | GenerationOutcome::NotConfigured => {
                self.metrics.inc_generation_fault()
            }
        }

        outcome.into_section_text(task)
    }
}
