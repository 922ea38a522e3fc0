use super::validate_job_id;
use crate::config::PipelineConfig;
use dashgate_core::status::JobEnvelope;
use dashgate_core::{Error, JobRequest, PipelineJob, Result};
use reqwest::Client;
use std::time::Duration;

/// API version segment of the pipeline's REST paths
const API_VERSION: &str = "2012-09-25";

/// Interface to the external transcoding pipeline
#[async_trait::async_trait]
pub trait TranscodePipeline: Send + Sync {
    /// Create a job and return the identifier the pipeline assigned to it
    async fn submit(&self, job: &JobRequest) -> Result<String>;

    /// Fetch the raw record of an existing job
    async fn read_job(&self, job_id: &str) -> Result<PipelineJob>;
}

/// Pipeline client speaking JSON over HTTP
pub struct HttpPipelineClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpPipelineClient {
    pub fn new(config: &PipelineConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to build HTTP client with timeout: {}", e);
                Client::new()
            });

        Self {
            client,
            base_url: config.endpoint.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}{}", self.base_url, API_VERSION, path)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }

    /// Send a request and decode the `{"Job": {...}}` envelope of the reply
    async fn send(&self, request: reqwest::RequestBuilder, context_msg: &str) -> Result<PipelineJob> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| Error::submission(format!("{}: {}", context_msg, e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::submission(format!(
                "{}: pipeline returned {}: {}",
                context_msg, status, body
            )));
        }

        let envelope: JobEnvelope = response
            .json()
            .await
            .map_err(|e| Error::submission(format!("{}: invalid response: {}", context_msg, e)))?;

        envelope
            .job
            .ok_or_else(|| Error::submission(format!("{}: response has no Job", context_msg)))
    }
}

#[async_trait::async_trait]
impl TranscodePipeline for HttpPipelineClient {
    async fn submit(&self, job: &JobRequest) -> Result<String> {
        let request = self.client.post(self.url("/jobs")).json(job);
        let created = self.send(request, "Failed to create transcoding job").await?;

        let job_id = created
            .id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| Error::submission("Failed to create transcoding job: job ID undefined"))?;

        tracing::info!(
            job_id = %job_id,
            input = %job.input.key,
            outputs = job.outputs.len(),
            "Submitted transcoding job"
        );
        Ok(job_id)
    }

    async fn read_job(&self, job_id: &str) -> Result<PipelineJob> {
        validate_job_id(job_id)?;

        let request = self.client.get(self.url(&format!("/jobs/{}", job_id)));
        let job = self.send(request, "Failed to read transcoding job").await?;

        tracing::debug!(job_id = %job_id, status = ?job.status, "Read transcoding job");
        Ok(job)
    }
}
