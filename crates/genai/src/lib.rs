pub mod client;
pub mod outcome;
pub mod script;

use std::env;

use tripsmith_core::SamplingParams;

pub use client::GenAiClient;
pub use outcome::GenerationOutcome;
pub use script::{ScriptRule, ScriptedGenerator};

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Immutable generation-backend configuration, resolved once at process
/// start and handed to the client by value. A missing credential means no
/// configuration, which disables generation for the process lifetime.
#[derive(Debug, Clone)]
pub struct GenAiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

impl GenAiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn from_env() -> Option<Self> {
        let api_key = env::var("TRIPSMITH_GENAI_API_KEY")
            .or_else(|_| env::var("GOOGLE_API_KEY"))
            .ok()
            .filter(|value| !value.trim().is_empty())?;

        let model = env::var("TRIPSMITH_GENAI_MODEL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let base_url = env::var("TRIPSMITH_GENAI_BASE_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Some(Self {
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

/// The generation boundary. Implementations never raise: every call
/// resolves to a [`GenerationOutcome`], with failures carried as data.
pub trait TextGenerator: Send + Sync {
    fn is_configured(&self) -> bool;
    async fn generate(&self, prompt: &str, params: SamplingParams) -> GenerationOutcome;
}

/// Dispatch over the real backend client and the scripted stand-in.
#[derive(Clone)]
pub enum Generator {
    GenAi(GenAiClient),
    Scripted(ScriptedGenerator),
}

impl Generator {
    pub fn gen_ai(client: GenAiClient) -> Self {
        Self::GenAi(client)
    }

    pub fn scripted(script: ScriptedGenerator) -> Self {
        Self::Scripted(script)
    }
}

impl TextGenerator for Generator {
    fn is_configured(&self) -> bool {
        match self {
            Generator::GenAi(client) => client.is_configured(),
            Generator::Scripted(script) => script.is_configured(),
        }
    }

    async fn generate(&self, prompt: &str, params: SamplingParams) -> GenerationOutcome {
        match self {
            Generator::GenAi(client) => client.generate(prompt, params).await,
            Generator::Scripted(script) => script.generate(prompt, params).await,
        }
    }
}
