//! Prompt-to-image client.
//!
//! [`PromptSubmitter`] validates a prompt, sends it once to the configured
//! generation endpoint and tracks the outcome as a [`RequestState`].

pub mod client;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod state;
pub mod submitter;

pub use client::{GenerationTransport, HttpClient};
pub use config::Config;
pub use error::{PixiError, Result, SubmissionError};
pub use models::{GenerationRequest, GenerationResponse, GenerationResult, HealthStatus, PromptText};
pub use state::RequestState;
pub use submitter::PromptSubmitter;
