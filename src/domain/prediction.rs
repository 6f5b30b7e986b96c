use super::evidence::EvidenceSet;
use serde::Serialize;

/// Verdict for one claim together with the evidence it was computed from.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Prediction {
    #[serde(rename = "predicted_label")]
    pub label: String,
    #[serde(rename = "predicted_evidence")]
    pub evidence: EvidenceSet,
}
