use serde::{Deserialize, Serialize};

/// Free-text description of the desired image.
///
/// Valid when it has at least one non-whitespace character. The text is kept
/// exactly as entered; trimming only applies to the validity check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PromptText(String);

impl PromptText {
    /// Returns `None` for empty or whitespace-only input.
    pub fn parse(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            None
        } else {
            Some(Self(text))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerationRequest {
    pub prompt: PromptText,
}

impl GenerationRequest {
    pub fn new(prompt: PromptText) -> Self {
        Self { prompt }
    }
}

/// Success body of the generation endpoint. Only `image_url` is required;
/// the service also echoes `status` and the prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResponse {
    pub image_url: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub prompt: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub image_url: String,
}

impl From<GenerationResponse> for GenerationResult {
    fn from(response: GenerationResponse) -> Self {
        Self {
            image_url: response.image_url,
        }
    }
}

// Error body produced by the service when generation throws.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub detail: String,
}
