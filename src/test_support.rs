//! Shared test support utilities
//!
//! Provides in-memory `FakeRetriever` and `FakeModel` collaborators that
//! return canned responses and record what the pipeline handed them.

use crate::domain::{Claim, EvidenceItem, EvidenceSet, LabelDistribution};
use crate::error::{InferenceError, RetrievalError};
use crate::port::{EvidenceRetriever, LabelInference};
use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// FEVER verdict vocabulary in the order the scenarios use it.
pub const FEVER_LABELS: [&str; 3] = ["REFUTES", "SUPPORTS", "NOT ENOUGH INFO"];

/// Retriever that answers every claim with the same canned result.
pub struct FakeRetriever {
    response: Result<EvidenceSet, RetrievalError>,
    calls: AtomicUsize,
    seen_claims: Mutex<Vec<String>>,
}

impl FakeRetriever {
    pub fn returning(evidence: EvidenceSet) -> Self {
        Self::with_response(Ok(evidence))
    }

    pub fn failing(error: RetrievalError) -> Self {
        Self::with_response(Err(error))
    }

    fn with_response(response: Result<EvidenceSet, RetrievalError>) -> Self {
        Self {
            response,
            calls: AtomicUsize::new(0),
            seen_claims: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen_claims(&self) -> Vec<String> {
        self.seen_claims.lock().unwrap().clone()
    }
}

impl EvidenceRetriever for FakeRetriever {
    fn fetch_evidence<'a>(
        &'a self,
        claim: &'a Claim,
    ) -> Pin<Box<dyn Future<Output = Result<EvidenceSet, RetrievalError>> + Send + 'a>> {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen_claims
                .lock()
                .unwrap()
                .push(claim.as_str().to_string());
            self.response.clone()
        })
    }
}

/// Retriever that echoes the claim text back as a single evidence page,
/// so batch tests can tell results apart.
pub struct EchoRetriever;

impl EvidenceRetriever for EchoRetriever {
    fn fetch_evidence<'a>(
        &'a self,
        claim: &'a Claim,
    ) -> Pin<Box<dyn Future<Output = Result<EvidenceSet, RetrievalError>> + Send + 'a>> {
        Box::pin(async move {
            if claim.as_str().contains("missing") {
                return Err(RetrievalError::Backend {
                    status: 404,
                    body: format!("no documents for {}", claim.as_str()),
                });
            }
            Ok(vec![EvidenceItem::new(claim.as_str(), 0)])
        })
    }
}

/// Model that returns canned logits and records the evidence it was given.
pub struct FakeModel {
    response: Result<LabelDistribution, InferenceError>,
    labels: Vec<String>,
    seen_evidence: Mutex<Vec<EvidenceSet>>,
}

impl FakeModel {
    pub fn returning(logits: Vec<f64>) -> Self {
        Self::with_response(Ok(LabelDistribution::new(logits)))
    }

    pub fn failing(error: InferenceError) -> Self {
        Self::with_response(Err(error))
    }

    fn with_response(response: Result<LabelDistribution, InferenceError>) -> Self {
        Self {
            response,
            labels: FEVER_LABELS.iter().map(|l| (*l).to_string()).collect(),
            seen_evidence: Mutex::new(Vec::new()),
        }
    }

    pub fn with_labels(mut self, labels: &[&str]) -> Self {
        self.labels = labels.iter().map(|l| (*l).to_string()).collect();
        self
    }

    pub fn seen_evidence(&self) -> Vec<EvidenceSet> {
        self.seen_evidence.lock().unwrap().clone()
    }
}

impl LabelInference for FakeModel {
    fn infer<'a>(
        &'a self,
        _claim: &'a Claim,
        evidence: &'a [EvidenceItem],
    ) -> Pin<Box<dyn Future<Output = Result<LabelDistribution, InferenceError>> + Send + 'a>> {
        Box::pin(async move {
            self.seen_evidence.lock().unwrap().push(evidence.to_vec());
            self.response.clone()
        })
    }

    fn label_name(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }
}
