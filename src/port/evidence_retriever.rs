//! EvidenceRetriever trait for sentence retrieval backends.
//!
//! The prediction pipeline depends only on this trait, so tests can swap
//! the retrieval service client for an in-memory fake.

use crate::domain::{Claim, EvidenceSet};
use crate::error::RetrievalError;
use std::future::Future;
use std::pin::Pin;

/// Retrieves the evidence sentences for a claim.
///
/// This trait is dyn-compatible by using boxed futures.
pub trait EvidenceRetriever: Send + Sync {
    /// Return evidence for `claim`, most relevant first as ranked by the
    /// backend. Callers must not reorder or filter the result.
    fn fetch_evidence<'a>(
        &'a self,
        claim: &'a Claim,
    ) -> Pin<Box<dyn Future<Output = Result<EvidenceSet, RetrievalError>> + Send + 'a>>;
}
