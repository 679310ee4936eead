use thiserror::Error;

/// Failures the transport and configuration layers can report.
///
/// These keep enough detail to be logged. Callers of the submitter never see
/// them directly; they are collapsed into [`SubmissionError::RequestFailed`].
#[derive(Debug, Error)]
pub enum PixiError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Request error: {0}")]
    Request(String),
    #[error("Endpoint returned HTTP {status}: {detail}")]
    Status { status: u16, detail: String },
    #[error("Response error: {0}")]
    Response(String),
}

impl From<reqwest::Error> for PixiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            PixiError::Response(err.to_string())
        } else {
            PixiError::Request(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, PixiError>;

/// What a single prompt submission can fail with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmissionError {
    /// The prompt was empty or whitespace only. Nothing was sent.
    #[error("Please enter a description.")]
    EmptyPrompt,
    /// Network, HTTP status, or response shape failure.
    #[error("Failed to generate image. Please try again.")]
    RequestFailed,
}

impl From<PixiError> for SubmissionError {
    fn from(_: PixiError) -> Self {
        SubmissionError::RequestFailed
    }
}
