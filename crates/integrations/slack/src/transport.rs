use reqwest::Client;
use reqwest::header::CONTENT_TYPE;

use crate::config::SlackConfig;
use crate::error::SlackError;

/// Status and body of one HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    /// Response body; only read for non-success statuses.
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The HTTP exchange underneath [`SlackWebhookClient`](crate::SlackWebhookClient).
///
/// Split out so the client's own logic (destination checks, status mapping)
/// can be exercised without a network.
pub trait HttpTransport: Send + Sync {
    /// POST `body` to `url` with `Content-Type: application/json`.
    fn post_json(
        &self,
        url: &str,
        body: Vec<u8>,
    ) -> impl std::future::Future<Output = Result<TransportResponse, SlackError>> + Send;
}

/// [`HttpTransport`] backed by a pooled `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Build a transport whose requests are bounded by `config.timeout`.
    pub fn new(config: &SlackConfig) -> Result<Self, SlackError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client })
    }

    /// Wrap an existing client, e.g. to share a connection pool.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl HttpTransport for ReqwestTransport {
    async fn post_json(&self, url: &str, body: Vec<u8>) -> Result<TransportResponse, SlackError> {
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let body = if status.is_success() {
            String::new()
        } else {
            response.text().await.unwrap_or_default()
        };

        Ok(TransportResponse {
            status: status.as_u16(),
            body,
        })
    }
}
