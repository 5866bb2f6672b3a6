use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One incoming trip-planning request. Dates travel as `YYYY-MM-DD`.
///
/// `end_date >= start_date` is expected but not enforced here; the caller
/// owns that check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripRequest {
    pub source: String,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub budget_level: i64,
}

/// The assembled plan. Every field is always populated: real content on
/// success, readable diagnostic text otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripPlanResponse {
    pub flight_suggestions: String,
    pub itinerary: String,
    pub recommendations: String,
    pub weather_forecast: String,
}

/// Inclusive trip length. A same-day trip counts as one day.
pub fn trip_duration_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}
