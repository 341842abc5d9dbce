//! REST implementation of the execution backend.

use crate::BackendConfig;
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use sequin_core::{Block, BlockRun, Sequence, SequenceRunResult, VariableCatalog};
use sequin_error::{BackendError, HttpError, JsonError, SequinResult};
use sequin_interface::{
    BlockRunRequest, EditOutputRequest, ExecutionBackend, RerunRequest, RunSequenceRequest,
};
use serde::de::DeserializeOwned;
use tracing::{debug, error, instrument};

/// Execution backend reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    config: BackendConfig,
}

impl HttpBackend {
    /// Creates a client for the configured backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    #[instrument(skip(config), fields(base_url = %config.base_url()))]
    pub fn new(config: BackendConfig) -> SequinResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .gzip(true)
            .build()
            .map_err(|e| HttpError::new(format!("Failed to build HTTP client: {}", e)))?;
        debug!("Created backend client");
        Ok(Self { client, config })
    }

    /// Connection settings.
    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// Absolute URL for an API path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url().trim_end_matches('/'), path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, self.url(path));
        match self.config.api_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder, endpoint: &str) -> SequinResult<String> {
        let response = builder.send().await.map_err(|e| {
            error!(endpoint, error = ?e, "HTTP request failed");
            HttpError::for_endpoint(endpoint, format!("Request failed: {}", e))
                .with_timeout(e.is_timeout())
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!(endpoint, error = ?e, "Failed to read response body");
            HttpError::for_endpoint(endpoint, format!("Failed to read response: {}", e))
                .with_timeout(e.is_timeout())
        })?;

        if !status.is_success() {
            error!(endpoint, status = %status, error = %body, "Backend error");
            return Err(BackendError::with_status(status.as_u16(), body).into());
        }
        Ok(body)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        endpoint: &str,
    ) -> SequinResult<T> {
        let body = self.send(builder, endpoint).await?;
        serde_json::from_str(&body).map_err(|e| {
            error!(endpoint, error = ?e, "Failed to parse response");
            JsonError::new(format!("Failed to parse response from {}: {}", endpoint, e)).into()
        })
    }
}

#[async_trait]
impl ExecutionBackend for HttpBackend {
    #[instrument(skip(self))]
    async fn get_sequence(&self, sequence_id: i64) -> SequinResult<Sequence> {
        let path = format!("/sequences/{}", sequence_id);
        self.send_json(self.request(Method::GET, &path), &path).await
    }

    #[instrument(skip(self))]
    async fn list_blocks(&self, sequence_id: i64) -> SequinResult<Vec<Block>> {
        let path = format!("/blocks/by_sequence/{}", sequence_id);
        let blocks: Vec<Block> = self
            .send_json(self.request(Method::GET, &path), &path)
            .await?;
        debug!(count = blocks.len(), "Fetched blocks");
        Ok(blocks)
    }

    #[instrument(skip(self))]
    async fn available_variables(&self, sequence_id: i64) -> SequinResult<VariableCatalog> {
        let path = format!("/variables/available_for_sequence/{}", sequence_id);
        self.send_json(self.request(Method::GET, &path), &path).await
    }

    #[instrument(skip(self, request), fields(sequence_id = request.sequence_id))]
    async fn run_sequence(&self, request: &RunSequenceRequest) -> SequinResult<SequenceRunResult> {
        let path = "/runs/";
        self.send_json(self.request(Method::POST, path).json(request), path).await
    }

    #[instrument(skip(self, request))]
    async fn run_block(&self, block_id: i64, request: &BlockRunRequest) -> SequinResult<BlockRun> {
        let path = format!("/blocks/{}/run", block_id);
        self.send_json(self.request(Method::POST, &path).json(request), &path).await
    }

    #[instrument(skip(self, request))]
    async fn rerun_from_block(
        &self,
        run_id: i64,
        block_id: i64,
        request: &RerunRequest,
    ) -> SequinResult<SequenceRunResult> {
        let path = format!("/runs/{}/rerun_from_block/{}", run_id, block_id);
        self.send_json(self.request(Method::POST, &path).json(request), &path).await
    }

    #[instrument(
        skip(self, request),
        fields(run_id = request.run_id, block_run_id = request.block_run_id)
    )]
    async fn edit_block_output(&self, request: &EditOutputRequest) -> SequinResult<()> {
        let path = format!(
            "/runs/{}/block_runs/{}/output",
            request.run_id, request.block_run_id
        );
        let payload = request.edit.to_payload();
        self.send(self.request(Method::PUT, &path).json(&payload), &path)
            .await
            .map(|_| ())
    }

    #[instrument(skip(self))]
    async fn get_run(&self, run_id: i64) -> SequinResult<SequenceRunResult> {
        let path = format!("/runs/{}", run_id);
        self.send_json(self.request(Method::GET, &path), &path).await
    }
}
