use serde::{Deserialize, Serialize};

/// Reference to one sentence of the document collection.
///
/// Serialized the way the FEVER tooling exchanges evidence: a two-element
/// array `["page", line]`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(from = "(String, usize)", into = "(String, usize)")]
pub struct EvidenceItem {
    pub page: String,
    pub line: usize,
}

impl EvidenceItem {
    pub fn new(page: impl Into<String>, line: usize) -> Self {
        Self {
            page: page.into(),
            line,
        }
    }
}

impl From<(String, usize)> for EvidenceItem {
    fn from((page, line): (String, usize)) -> Self {
        Self { page, line }
    }
}

impl From<EvidenceItem> for (String, usize) {
    fn from(item: EvidenceItem) -> Self {
        (item.page, item.line)
    }
}

/// Evidence for one claim, in the order the retrieval collaborator ranked it.
pub type EvidenceSet = Vec<EvidenceItem>;
