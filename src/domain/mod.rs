mod claim;
mod evidence;
mod label;
mod prediction;

pub use claim::Claim;
pub use evidence::{EvidenceItem, EvidenceSet};
pub use label::LabelDistribution;
pub use prediction::Prediction;
