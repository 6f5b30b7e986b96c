use crate::error::PredictionError;
use serde::Serialize;

/// A natural-language statement submitted for verification.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(transparent)]
pub struct Claim(String);

impl Claim {
    /// Wraps claim text, rejecting empty or whitespace-only input.
    pub fn new(text: impl Into<String>) -> Result<Self, PredictionError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(PredictionError::EmptyClaim);
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Claim {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_keeps_text_verbatim() {
        let claim = Claim::new("  The sky is blue. ").unwrap();
        assert_eq!(claim.as_str(), "  The sky is blue. ");
    }

    #[test]
    fn test_empty_claim_fails() {
        assert_eq!(Claim::new(""), Err(PredictionError::EmptyClaim));
    }

    #[test]
    fn test_whitespace_claim_fails() {
        assert_eq!(Claim::new(" \t\n"), Err(PredictionError::EmptyClaim));
    }

    #[test]
    fn test_claim_serializes_as_plain_string() {
        let claim = Claim::new("Paris is in France.").unwrap();
        assert_eq!(
            serde_json::to_string(&claim).unwrap(),
            r#""Paris is in France.""#
        );
    }
}
