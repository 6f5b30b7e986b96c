use crate::error::InferenceError;
use serde::{Deserialize, Serialize};

/// Unnormalized per-label scores produced by the model collaborator.
///
/// Position `i` scores the label the model vocabulary maps to index `i`.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(transparent)]
pub struct LabelDistribution(Vec<f64>);

impl LabelDistribution {
    pub fn new(logits: Vec<f64>) -> Self {
        Self(logits)
    }

    pub fn logits(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Index of the highest logit. Ties go to the lowest index.
    ///
    /// `Iterator::max_by` keeps the *last* of several equal maxima, so the
    /// scan is written out with a strict comparison instead. Infinities are
    /// ordinary values here; only NaN leaves the maximum undefined.
    pub fn argmax(&self) -> Result<usize, InferenceError> {
        let (first, rest) = self
            .0
            .split_first()
            .ok_or(InferenceError::EmptyDistribution)?;
        if first.is_nan() {
            return Err(InferenceError::NanLogit { index: 0 });
        }

        let mut best = 0;
        let mut best_value = *first;
        for (offset, &value) in rest.iter().enumerate() {
            let index = offset + 1;
            if value.is_nan() {
                return Err(InferenceError::NanLogit { index });
            }
            if value > best_value {
                best = index;
                best_value = value;
            }
        }
        Ok(best)
    }
}

impl From<Vec<f64>> for LabelDistribution {
    fn from(logits: Vec<f64>) -> Self {
        Self(logits)
    }
}
