use tripsmith_core::GenerationTask;

/// What a single generation call resolved to. Failures are values here;
/// they only become display text at the section boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// The backend produced usable text.
    Text(String),
    /// The backend answered but supplied no content parts, e.g. safety
    /// filtering. Carries whatever feedback metadata the backend attached.
    Empty { feedback: Option<String> },
    /// Transport or backend failure, already reduced to a message.
    Fault(String),
    /// No credential was configured; no call was attempted.
    NotConfigured,
}

impl GenerationOutcome {
    /// Reduce to the single string a plan section carries: generated text
    /// on success, readable in-band diagnostics otherwise.
    pub fn into_section_text(self, task: GenerationTask) -> String {
        match self {
            Self::Text(text) => text,
            Self::Empty { feedback: Some(feedback) } => format!(
                "Could not {}. The response was empty or blocked. (Feedback: {})",
                task.verb_phrase(),
                feedback
            ),
            Self::Empty { feedback: None } => format!(
                "Could not {}. The response was empty or blocked.",
                task.verb_phrase()
            ),
            Self::Fault(message) => format!(
                "An error occurred during {}: {}",
                task.fault_phrase(),
                message
            ),
            Self::NotConfigured => format!(
                "Generation backend is not configured. Cannot {}.",
                task.verb_phrase()
            ),
        }
    }
}
