use crate::budget::BudgetTier;
use crate::models::{trip_duration_days, TripRequest};

/// The four generation tasks issued for every plan, with their fixed
/// sampling parameters and diagnostic wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationTask {
    Flights,
    Itinerary,
    Recommendations,
    Weather,
}

/// Sampling knobs sent with a generation call. Fixed per task, never
/// tunable by the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingParams {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl GenerationTask {
    pub const ALL: [GenerationTask; 4] = [
        GenerationTask::Flights,
        GenerationTask::Itinerary,
        GenerationTask::Recommendations,
        GenerationTask::Weather,
    ];

    pub fn sampling(self) -> SamplingParams {
        match self {
            Self::Flights => SamplingParams {
                temperature: 0.6,
                max_output_tokens: 700,
            },
            Self::Itinerary => SamplingParams {
                temperature: 0.7,
                max_output_tokens: 2048,
            },
            Self::Recommendations => SamplingParams {
                temperature: 0.7,
                max_output_tokens: 2048,
            },
            Self::Weather => SamplingParams {
                temperature: 0.4,
                max_output_tokens: 1500,
            },
        }
    }

    /// Verb phrase used in the "Could not" / "Cannot" diagnostics.
    pub fn verb_phrase(self) -> &'static str {
        match self {
            Self::Flights => "generate flight suggestions",
            Self::Itinerary => "generate itinerary",
            Self::Recommendations => "generate recommendations",
            Self::Weather => "get weather forecast and clothing suggestions",
        }
    }

    /// Phrase used in the "An error occurred during" diagnostics.
    pub fn fault_phrase(self) -> &'static str {
        match self {
            Self::Flights => "flight suggestion generation",
            Self::Itinerary => "itinerary generation",
            Self::Recommendations => "recommendation generation",
            Self::Weather => "weather forecasting and clothing suggestions",
        }
    }

    /// Build the natural-language instruction for this task. Deterministic
    /// given the request and tier; no I/O.
    pub fn prompt(self, request: &TripRequest, tier: BudgetTier) -> String {
        let budget = tier.descriptor();
        let start = request.start_date.format("%Y-%m-%d");
        let end = request.end_date.format("%Y-%m-%d");

        match self {
            Self::Flights => format!(
                "As a travel planning assistant, suggest potential flight options for a trip \
                 from {source} to {destination}.\n\
                 The desired departure date is {start} and the return date is {end}.\n\
                 Please provide suggestions that align with a **{budget} budget**.\n\
                 \n\
                 Suggest a few possible airlines, potential layover cities (if applicable), and \
                 a general idea of expected flight duration or typical costs for this route and \
                 budget.\n\
                 Emphasize that these are *suggestions based on general knowledge* and that \
                 travelers should run a real-time flight search for accurate prices and \
                 availability.\n\
                 \n\
                 Present the response clearly using Markdown.",
                source = request.source,
                destination = request.destination,
            ),
            Self::Itinerary => {
                let duration = trip_duration_days(request.start_date, request.end_date);
                format!(
                    "Create a detailed travel itinerary for a trip to {destination}.\n\
                     The trip starts on {start} and ends on {end}, lasting for {duration} days.\n\
                     Please plan the trip with a **{budget} budget** in mind.\n\
                     \n\
                     Provide a day-by-day plan including:\n\
                     - Suggested activities for morning, afternoon, and evening (suitable for a \
                     {budget} budget).\n\
                     - Recommendations for places to visit (landmarks, museums, parks) with cost \
                     implications where relevant to the budget.\n\
                     - Suggestions for local food or restaurants that fit a {budget} budget.\n\
                     - Basic budget-conscious tips for getting around (public transport, \
                     walking).\n\
                     \n\
                     Format the output clearly using Markdown with a heading for each day.\n\
                     Be creative and provide practical suggestions for a memorable trip.",
                    destination = request.destination,
                )
            }
            Self::Recommendations => format!(
                "You are an expert restaurant and hotel planner.\n\
                 Your job is to provide restaurant and hotel recommendations for \
                 {destination}.\n\
                 Please provide recommendations specifically for a **{budget} budget**.\n\
                 \n\
                 - For restaurants: provide the top 5 restaurants that fit a {budget} budget, \
                 with address, cuisine type or average cost, and a rating if available or \
                 inferable.\n\
                 - For hotels: provide the top 5 hotels that fit a {budget} budget, with \
                 address, average cost per night or star rating, and a rating if available or \
                 inferable.\n\
                 \n\
                 Return the response using Markdown for clear formatting.",
                destination = request.destination,
            ),
            Self::Weather => format!(
                "You are an expert weather forecaster and travel advisor. Your job is to \
                 provide a detailed weather forecast and suggest appropriate clothing to pack \
                 for a trip to {destination}.\n\
                 Provide the forecast for the next 7 days, starting from today's date.\n\
                 Include details such as:\n\
                 - Daily temperature range (high/low)\n\
                 - Precipitation (chance of rain or snow)\n\
                 - Humidity\n\
                 - Wind conditions\n\
                 - Air quality (if available or inferable)\n\
                 - Cloud cover\n\
                 \n\
                 Based on this 7-day forecast, provide a clear and concise suggestion for the \
                 clothing and gear to pack for {destination} during this period. Consider \
                 layering if temperatures vary.\n\
                 \n\
                 Present the response clearly using Markdown, with a section for the daily \
                 forecast and a separate section for clothing suggestions.",
                destination = request.destination,
            ),
        }
    }
}
