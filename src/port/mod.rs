pub mod evidence_retriever;
pub mod label_inference;

pub use evidence_retriever::EvidenceRetriever;
pub use label_inference::LabelInference;
