pub mod budget;
pub mod extract;
pub mod models;
pub mod prompts;

pub use budget::BudgetTier;
pub use extract::{structured_tables, ExtractedTable};
pub use models::{trip_duration_days, TripPlanResponse, TripRequest};
pub use prompts::{GenerationTask, SamplingParams};
