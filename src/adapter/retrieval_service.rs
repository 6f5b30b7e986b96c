//! HTTP client for the sentence retrieval service.
//!
//! The service owns the document database and the retrieval index. At
//! startup it is told which database/index pair to open and how many
//! documents and sentences to select; afterwards each claim is a single
//! `POST /v1/evidence` round trip.

use crate::domain::{Claim, EvidenceSet};
use crate::error::{RetrievalError, ServiceError};
use crate::port::EvidenceRetriever;
use super::service_base_url;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use tracing::debug;

/// Connection and retrieval parameters for the retrieval service.
#[derive(Debug, Clone)]
pub struct RetrievalServiceConfig {
    pub base_url: String,
    pub database: String,
    pub index: String,
    pub n_docs: usize,
    pub n_sents: usize,
    pub timeout: Duration,
}

#[derive(Debug, Serialize)]
struct LoadRequest<'a> {
    method: &'static str,
    database: &'a str,
    index: &'a str,
    n_docs: usize,
    n_sents: usize,
}

#[derive(Debug, Serialize)]
struct EvidenceRequest<'a> {
    claim: &'a Claim,
    n_docs: usize,
    n_sents: usize,
}

#[derive(Debug, Deserialize)]
struct EvidenceResponse {
    predicted_sentences: EvidenceSet,
}

/// `EvidenceRetriever` backed by the remote top-docs/top-sentences service.
#[derive(Debug, Clone)]
pub struct RetrievalServiceClient {
    client: Client,
    evidence_url: Url,
    n_docs: usize,
    n_sents: usize,
}

impl RetrievalServiceClient {
    /// Build the client and ask the service to open the configured database and index.
    ///
    /// # Errors
    /// Returns [`ServiceError::Load`] when the URL is invalid, the service is
    /// unreachable, or it refuses to open the database/index.
    pub async fn connect(config: RetrievalServiceConfig) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| load_error(format!("failed to build HTTP client: {e}")))?;

        let base_url = service_base_url(&config.base_url)
            .map_err(|e| load_error(format!("invalid retrieval_url {}: {e}", config.base_url)))?;
        let load_url = base_url
            .join("v1/load")
            .map_err(|e| load_error(e.to_string()))?;
        let evidence_url = base_url
            .join("v1/evidence")
            .map_err(|e| load_error(e.to_string()))?;

        let body = LoadRequest {
            method: "top_docs",
            database: &config.database,
            index: &config.index,
            n_docs: config.n_docs,
            n_sents: config.n_sents,
        };
        let response = client
            .post(load_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| load_error(format!("retrieval service unreachable: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(load_error(format!(
                "retrieval service refused database {} / index {} with status {status}: {error_body}",
                config.database, config.index
            )));
        }

        Ok(Self {
            client,
            evidence_url,
            n_docs: config.n_docs,
            n_sents: config.n_sents,
        })
    }

    async fn request_evidence(&self, claim: &Claim) -> Result<EvidenceSet, RetrievalError> {
        let body = EvidenceRequest {
            claim,
            n_docs: self.n_docs,
            n_sents: self.n_sents,
        };
        let response = self
            .client
            .post(self.evidence_url.clone())
            .json(&body)
            .send()
            .await
            .map_err(|e| RetrievalError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RetrievalError::Backend {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: EvidenceResponse = response
            .json()
            .await
            .map_err(|e| RetrievalError::InvalidResponse(e.to_string()))?;
        debug!(
            sentences = parsed.predicted_sentences.len(),
            "retrieval service answered"
        );
        Ok(parsed.predicted_sentences)
    }
}

impl EvidenceRetriever for RetrievalServiceClient {
    fn fetch_evidence<'a>(
        &'a self,
        claim: &'a Claim,
    ) -> Pin<Box<dyn Future<Output = Result<EvidenceSet, RetrievalError>> + Send + 'a>> {
        Box::pin(self.request_evidence(claim))
    }
}

fn load_error(message: String) -> ServiceError {
    ServiceError::Load {
        component: "retrieval index",
        message,
    }
}
