pub mod http_client;

use crate::{
    error::Result,
    models::{GenerationRequest, GenerationResponse, HealthStatus},
};
use async_trait::async_trait;

pub use http_client::HttpClient;

/// Wire seam between the submitter and the remote generation service.
#[async_trait]
pub trait GenerationTransport: Send + Sync {
    /// Sends exactly one generation request. Implementations must not retry.
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse>;

    async fn health_check(&self) -> Result<HealthStatus>;
}
