//! LabelInference trait for claim verification models.

use crate::domain::{Claim, EvidenceItem, LabelDistribution};
use crate::error::InferenceError;
use std::future::Future;
use std::pin::Pin;

/// Scores a (claim, evidence) pair and names the resulting labels.
///
/// This trait is dyn-compatible by using boxed futures.
pub trait LabelInference: Send + Sync {
    /// Run the model on one claim and its evidence, returning one logit per label.
    fn infer<'a>(
        &'a self,
        claim: &'a Claim,
        evidence: &'a [EvidenceItem],
    ) -> Pin<Box<dyn Future<Output = Result<LabelDistribution, InferenceError>> + Send + 'a>>;

    /// Name of the label at `index` in the model vocabulary.
    fn label_name(&self, index: usize) -> Option<&str>;
}
