use crate::{
    client::GenerationTransport,
    config::Config,
    error::{PixiError, Result},
    models::{ErrorBody, GenerationRequest, GenerationResponse, HealthStatus},
};
use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client, Response, Url};

/// `reqwest`-backed transport. No timeout is configured: a request runs until
/// the service answers or the connection fails.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    endpoint: Url,
    health: Url,
}

impl HttpClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| PixiError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Self::with_client(client, config)
    }

    pub fn with_client(client: Client, config: &Config) -> Result<Self> {
        Ok(Self {
            client,
            endpoint: config.endpoint_url()?,
            health: config.health_url()?,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn error_for_status(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ErrorBody>(&body)
            .map(|e| e.detail)
            .unwrap_or(body);

        Err(PixiError::Status {
            status: status.as_u16(),
            detail,
        })
    }
}

#[async_trait]
impl GenerationTransport for HttpClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse> {
        let body = serde_json::to_vec(request)
            .map_err(|e| PixiError::Request(format!("Cannot encode request: {}", e)))?;

        log::info!("Requesting image generation from {}", self.endpoint);
        log::debug!("Generation request payload: {}", String::from_utf8_lossy(&body));

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| {
                log::error!("Generation request failed: {}", e);
                PixiError::from(e)
            })?;

        let response = Self::error_for_status(response).await.map_err(|e| {
            log::error!("{}", e);
            e
        })?;

        let bytes = response.bytes().await?;
        serde_json::from_slice::<GenerationResponse>(&bytes).map_err(|e| {
            log::error!(
                "Unexpected generation response ({}): {}",
                e,
                String::from_utf8_lossy(&bytes)
            );
            PixiError::Response(e.to_string())
        })
    }

    async fn health_check(&self) -> Result<HealthStatus> {
        log::debug!("Probing {}", self.health);

        let response = self.client.get(self.health.clone()).send().await?;
        let response = Self::error_for_status(response).await?;

        response
            .json::<HealthStatus>()
            .await
            .map_err(|e| PixiError::Response(e.to_string()))
    }
}
