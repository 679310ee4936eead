use crate::models::GenerationResult;
use serde::Serialize;
use tokio::sync::watch;

/// Lifecycle of the most recent submission.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RequestState {
    #[default]
    Idle,
    InFlight,
    Succeeded(GenerationResult),
    Failed,
}

impl RequestState {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, RequestState::InFlight)
    }

    pub fn image_url(&self) -> Option<&str> {
        match self {
            RequestState::Succeeded(result) => Some(&result.image_url),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestState::Idle => "idle",
            RequestState::InFlight => "in_flight",
            RequestState::Succeeded(_) => "succeeded",
            RequestState::Failed => "failed",
        }
    }
}

/// Marks a submission in flight for as long as it lives.
///
/// If dropped before `finish` (the submit future was abandoned), the state
/// falls back to `Idle` so the indicator never stays raised.
pub(crate) struct InFlightGuard<'a> {
    state: &'a watch::Sender<RequestState>,
    finished: bool,
}

impl<'a> InFlightGuard<'a> {
    pub(crate) fn begin(state: &'a watch::Sender<RequestState>) -> Self {
        state.send_replace(RequestState::InFlight);
        Self {
            state,
            finished: false,
        }
    }

    pub(crate) fn finish(mut self, outcome: RequestState) {
        self.state.send_replace(outcome);
        self.finished = true;
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        self.state.send_if_modified(|state| {
            if state.is_in_flight() {
                log::warn!("Submission abandoned while in flight");
                *state = RequestState::Idle;
                true
            } else {
                false
            }
        });
    }
}
