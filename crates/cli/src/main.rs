use std::time::Duration;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tripsmith_core::{structured_tables, TripPlanResponse, TripRequest};
use tripsmith_observability::init_tracing;

// Generating four sections takes several model round trips.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(180);

#[derive(Debug, Parser)]
#[command(name = "tripsmith")]
#[command(about = "Trip planner client")]
struct Cli {
    /// Base URL of the trip planner API.
    #[arg(long, env = "TRIPSMITH_API_URL", default_value = "http://127.0.0.1:8000")]
    api_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Request a full trip plan and render the four sections.
    Plan {
        /// Departure city.
        #[arg(long)]
        from: String,
        /// Destination city.
        #[arg(long)]
        to: String,
        /// Start date (YYYY-MM-DD).
        #[arg(long)]
        start: NaiveDate,
        /// End date (YYYY-MM-DD).
        #[arg(long)]
        end: NaiveDate,
        /// Budget level: 1 budget-friendly, 2 mid-range, 3 luxury.
        #[arg(long, default_value_t = 2)]
        budget: i64,
    },
    /// Check that the API is up.
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("tripsmith_cli");
    let cli = Cli::parse();

    let http = reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .context("failed to build HTTP client")?;

    match cli.command {
        Command::Plan {
            from,
            to,
            start,
            end,
            budget,
        } => {
            let request = TripRequest {
                source: from,
                destination: to,
                start_date: start,
                end_date: end,
                budget_level: budget,
            };

            let response = http
                .post(plan_trip_url(&cli.api_url))
                .json(&request)
                .send()
                .await
                .context("trip planner API is unreachable")?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                anyhow::bail!(
                    "trip planner API returned status {}: {}",
                    status.as_u16(),
                    body
                );
            }

            let plan: TripPlanResponse = response
                .json()
                .await
                .context("failed decoding trip plan response")?;

            render_plan(&plan);
        }
        Command::Health => {
            let url = format!("{}/", cli.api_url.trim_end_matches('/'));
            let body: serde_json::Value = http
                .get(&url)
                .send()
                .await
                .context("trip planner API is unreachable")?
                .json()
                .await
                .context("failed decoding health response")?;

            println!("{}", serde_json::to_string_pretty(&body)?);
        }
    }

    Ok(())
}

/// Normalize the configured base URL and append the fixed plan path.
fn plan_trip_url(base: &str) -> String {
    format!("{}/plan_trip/", base.trim_end_matches('/'))
}

fn render_plan(plan: &TripPlanResponse) {
    print_section("Flight Suggestions", &plan.flight_suggestions, false);
    print_section("Trip Itinerary", &plan.itinerary, false);
    print_section("Recommendations", &plan.recommendations, true);
    print_section("Weather Forecast", &plan.weather_forecast, true);
}

/// Print one section; optionally append tables recovered from fenced
/// structured blocks. Extraction is decoration, never required.
fn print_section(title: &str, text: &str, extract: bool) {
    println!("\n## {title}\n");
    println!("{text}");

    if extract {
        for table in structured_tables(text) {
            println!("\n### {}\n", table.title);
            println!("{}", table.rendered);
        }
    }
}
