use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use tripsmith_core::SamplingParams;

use crate::outcome::GenerationOutcome;
use crate::{GenAiConfig, TextGenerator};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(6);
// The only time bound on a generation call; the planner itself imposes none.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Client for the `generateContent` REST surface of the generation
/// backend. Every failure mode collapses into a [`GenerationOutcome`]; the
/// caller never sees a transport error.
#[derive(Clone)]
pub struct GenAiClient {
    http: Client,
    config: Option<GenAiConfig>,
}

impl GenAiClient {
    pub fn new(config: Option<GenAiConfig>) -> Result<Self> {
        let http = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self { http, config })
    }
}

impl TextGenerator for GenAiClient {
    fn is_configured(&self) -> bool {
        self.config.is_some()
    }

    async fn generate(&self, prompt: &str, params: SamplingParams) -> GenerationOutcome {
        let Some(config) = self.config.as_ref() else {
            warn!("generation requested but no backend credential is configured");
            return GenerationOutcome::NotConfigured;
        };

        info!(
            model = %config.model,
            temperature = params.temperature,
            max_output_tokens = params.max_output_tokens,
            prompt_chars = prompt.len(),
            "sending generation request"
        );

        let url = format!(
            "{}/models/{}:generateContent",
            config.base_url, config.model
        );
        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: params.temperature,
                max_output_tokens: params.max_output_tokens,
            },
        };

        let response = match self
            .http
            .post(&url)
            .query(&[("key", config.api_key.as_str())])
            .json(&request)
            .send()
            .await
        {
            Ok(response) => response,
            Err(error) => {
                error!(%error, "generation request failed");
                return GenerationOutcome::Fault(error.to_string());
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), "generation backend returned an error status");
            return GenerationOutcome::Fault(format!(
                "backend returned status {}: {}",
                status.as_u16(),
                body
            ));
        }

        let body: GenerateContentResponse = match response.json().await {
            Ok(body) => body,
            Err(error) => {
                error!(%error, "failed decoding generation response");
                return GenerationOutcome::Fault(format!(
                    "failed decoding backend response: {error}"
                ));
            }
        };

        let outcome = body.into_outcome();
        match &outcome {
            GenerationOutcome::Text(text) => {
                info!(response_chars = text.len(), "generation succeeded");
            }
            GenerationOutcome::Empty { feedback } => {
                warn!(feedback = feedback.as_deref(), "generation response was empty or blocked");
            }
            GenerationOutcome::Fault(_) | GenerationOutcome::NotConfigured => {}
        }
        outcome
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(rename = "promptFeedback")]
    prompt_feedback: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, or an empty/blocked marker carrying
    /// the prompt feedback the backend attached.
    fn into_outcome(self) -> GenerationOutcome {
        let feedback = self.prompt_feedback.as_ref().map(ToString::to_string);

        let texts: Vec<String> = self
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .filter(|text| !text.trim().is_empty())
                    .collect()
            })
            .unwrap_or_default();

        if texts.is_empty() {
            GenerationOutcome::Empty { feedback }
        } else {
            GenerationOutcome::Text(texts.join("\n"))
        }
    }
}
