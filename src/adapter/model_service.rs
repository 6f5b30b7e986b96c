//! HTTP client for the claim verification model service.
//!
//! The service loads a serialized model archive on request and answers
//! with its label vocabulary, which is cached here so `label_name` never
//! needs a round trip.

use crate::domain::{Claim, EvidenceItem, LabelDistribution};
use crate::error::{InferenceError, ServiceError};
use crate::port::LabelInference;
use super::service_base_url;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use tracing::{debug, info};

/// Connection and archive parameters for the model service.
#[derive(Debug, Clone)]
pub struct ModelServiceConfig {
    pub base_url: String,
    /// Location of the serialized model archive.
    pub archive: String,
    /// Compute device; `-1` selects the CPU.
    pub cuda_device: i32,
    /// Document database the model's dataset reader should read from.
    pub database: String,
    pub timeout: Duration,
}

#[derive(Debug, Serialize)]
struct LoadRequest<'a> {
    archive: &'a str,
    cuda_device: i32,
    predictor: &'static str,
    overrides: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct LoadResponse {
    labels: Vec<String>,
}

#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    claim: &'a Claim,
    predicted_sentences: &'a [EvidenceItem],
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    label_logits: LabelDistribution,
}

/// `LabelInference` backed by a remote model server.
#[derive(Debug, Clone)]
pub struct ModelServiceClient {
    client: Client,
    predict_url: Url,
    labels: Vec<String>,
}

impl ModelServiceClient {
    /// Build the client, load the archive on the service and cache its label vocabulary.
    ///
    /// # Errors
    /// Returns [`ServiceError::Load`] when the URL is invalid, the service is
    /// unreachable, the archive cannot be loaded, or the vocabulary is empty.
    pub async fn connect(config: ModelServiceConfig) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| load_error(format!("failed to build HTTP client: {e}")))?;

        let base_url = service_base_url(&config.base_url)
            .map_err(|e| load_error(format!("invalid inference_url {}: {e}", config.base_url)))?;
        let load_url = base_url
            .join("v1/load")
            .map_err(|e| load_error(e.to_string()))?;
        let predict_url = base_url
            .join("v1/predict")
            .map_err(|e| load_error(e.to_string()))?;

        // Dataset reader must read from this deployment's database, not the training one.
        let body = LoadRequest {
            archive: &config.archive,
            cuda_device: config.cuda_device,
            predictor: "fever",
            overrides: serde_json::json!({
                "dataset_reader": { "database": config.database }
            }),
        };
        let response = client
            .post(load_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| load_error(format!("model service unreachable: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(load_error(format!(
                "model service could not load {} with status {status}: {error_body}",
                config.archive
            )));
        }

        let loaded: LoadResponse = response
            .json()
            .await
            .map_err(|e| load_error(format!("invalid load response: {e}")))?;
        if loaded.labels.is_empty() {
            return Err(load_error(format!(
                "archive {} has an empty label vocabulary",
                config.archive
            )));
        }
        info!(labels = ?loaded.labels, "model vocabulary loaded");

        Ok(Self {
            client,
            predict_url,
            labels: loaded.labels,
        })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    async fn request_logits(
        &self,
        claim: &Claim,
        evidence: &[EvidenceItem],
    ) -> Result<LabelDistribution, InferenceError> {
        let body = PredictRequest {
            claim,
            predicted_sentences: evidence,
        };
        let response = self
            .client
            .post(self.predict_url.clone())
            .json(&body)
            .send()
            .await
            .map_err(|e| InferenceError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(InferenceError::Backend {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: PredictResponse = response
            .json()
            .await
            .map_err(|e| InferenceError::InvalidResponse(e.to_string()))?;
        debug!(logits = ?parsed.label_logits.logits(), "model service answered");
        Ok(parsed.label_logits)
    }
}

impl LabelInference for ModelServiceClient {
    fn infer<'a>(
        &'a self,
        claim: &'a Claim,
        evidence: &'a [EvidenceItem],
    ) -> Pin<Box<dyn Future<Output = Result<LabelDistribution, InferenceError>> + Send + 'a>> {
        Box::pin(self.request_logits(claim, evidence))
    }

    fn label_name(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }
}

fn load_error(message: String) -> ServiceError {
    ServiceError::Load {
        component: "model archive",
        message,
    }
}
