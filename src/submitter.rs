use crate::{
    client::{GenerationTransport, HttpClient},
    config::Config,
    error::{Result, SubmissionError},
    models::{GenerationRequest, GenerationResult, HealthStatus, PromptText},
    state::{InFlightGuard, RequestState},
};
use tokio::sync::watch;

/// Owns the request lifecycle for one prompt box.
///
/// Every call to [`submit`](Self::submit) makes at most one attempt: no retry,
/// no timeout. The state lives in a `watch` channel so a presentation layer
/// can read it, or [`subscribe`](Self::subscribe) to it, while a request is
/// pending. Overlapping submissions are not blocked here; callers gate on
/// [`is_in_flight`](Self::is_in_flight).
pub struct PromptSubmitter<T = HttpClient> {
    transport: T,
    state: watch::Sender<RequestState>,
}

impl PromptSubmitter<HttpClient> {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(HttpClient::new(config)?))
    }
}

impl<T: GenerationTransport> PromptSubmitter<T> {
    pub fn new(transport: T) -> Self {
        let (state, _) = watch::channel(RequestState::Idle);
        Self { transport, state }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> RequestState {
        self.state.borrow().clone()
    }

    /// Read-only view that is notified on every transition.
    pub fn subscribe(&self) -> watch::Receiver<RequestState> {
        self.state.subscribe()
    }

    pub fn is_in_flight(&self) -> bool {
        self.state.borrow().is_in_flight()
    }

    pub fn image_url(&self) -> Option<String> {
        self.state.borrow().image_url().map(String::from)
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Dropping the returned future before it resolves cancels the HTTP call
    /// and resets the state to `Idle`.
    pub async fn submit(
        &self,
        prompt: &str,
    ) -> std::result::Result<GenerationResult, SubmissionError> {
        let prompt = PromptText::parse(prompt).ok_or_else(|| {
            log::warn!("Rejected empty prompt");
            SubmissionError::EmptyPrompt
        })?;

        let request = GenerationRequest::new(prompt);
        let guard = InFlightGuard::begin(&self.state);
        let _timer = crate::logger::timer("image generation");

        match self.transport.generate(&request).await {
            Ok(response) if !response.image_url.trim().is_empty() => {
                let result = GenerationResult::from(response);
                log::info!("Image generated: {}", result.image_url);
                guard.finish(RequestState::Succeeded(result.clone()));
                Ok(result)
            }
            Ok(_) => {
                log::error!("Generation response carried an empty image_url");
                guard.finish(RequestState::Failed);
                Err(SubmissionError::RequestFailed)
            }
            Err(e) => {
                log::debug!("Submission failed: {}", e);
                guard.finish(RequestState::Failed);
                Err(e.into())
            }
        }
    }

    pub async fn health_check(&self) -> Result<HealthStatus> {
        self.transport.health_check().await
    }
}
