use std::future::Future;

use reqwest::{StatusCode, Url};
use tracing::debug;

use crate::{
    config::BackendConfig,
    error::{ConfigError, SummarizeError},
    types::{ErrorBody, SummaryRequest, SummaryResult},
};

/// The external service that turns a video URL into a comment summary.
pub trait SummaryBackend: Clone + Send + Sync + 'static {
    fn summarize(
        &self,
        request: &SummaryRequest,
    ) -> impl Future<Output = Result<SummaryResult, SummarizeError>> + Send;
}

/// `POST /summarize` over HTTP with a JSON body.
#[derive(Clone, Debug)]
pub struct HttpBackend {
    client: reqwest::Client,
    summarize_url: Url,
    probe_url: Url,
}

impl HttpBackend {
    pub fn new(config: &BackendConfig) -> Result<Self, ConfigError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            summarize_url: config.summarize_url(),
            probe_url: config.probe_url(),
        })
    }

    pub fn summarize_url(&self) -> &Url {
        &self.summarize_url
    }

    pub fn probe_url(&self) -> &Url {
        &self.probe_url
    }

    /// `GET /` on the backend; any success status means it is up.
    pub async fn probe(&self) -> Result<(), SummarizeError> {
        let response = self.client.get(self.probe_url.clone()).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.bytes().await?;
        Err(server_error(status, &body))
    }
}

impl SummaryBackend for HttpBackend {
    async fn summarize(&self, request: &SummaryRequest) -> Result<SummaryResult, SummarizeError> {
        debug!(url = %self.summarize_url, video_url = %request.video_url, "sending summarize request");

        let response = self
            .client
            .post(self.summarize_url.clone())
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        debug!(%status, bytes = body.len(), "summarize response received");

        if !status.is_success() {
            return Err(server_error(status, &body));
        }

        Ok(serde_json::from_slice::<SummaryResult>(&body)?)
    }
}

/// Prefers the body's `detail`; bodies that are not JSON objects fall back to the generic message.
fn server_error(status: StatusCode, body: &[u8]) -> SummarizeError {
    let detail = ErrorBody::parse(body).and_then(|b| b.message());
    SummarizeError::Server {
        status: status.as_u16(),
        detail,
    }
}
