use thiserror::Error;

/// Errors raised while starting or running the service binary.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Failed to load configuration: {0}")]
    Config(String),

    #[error("Failed to load {component}: {message}")]
    Load {
        component: &'static str,
        message: String,
    },

    #[error("Failed to bind to address {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),
}

/// Failure reported by an evidence retrieval collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RetrievalError {
    #[error("retrieval service unavailable: {0}")]
    Unavailable(String),

    #[error("retrieval service returned status {status}: {body}")]
    Backend { status: u16, body: String },

    #[error("invalid retrieval response: {0}")]
    InvalidResponse(String),
}

/// Failure reported by a label inference collaborator, or a label
/// distribution that cannot be decoded into a verdict.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InferenceError {
    #[error("label distribution is empty")]
    EmptyDistribution,

    #[error("label distribution has a NaN logit at index {index}")]
    NanLogit { index: usize },

    #[error("no label in the vocabulary for index {index}")]
    UnknownLabel { index: usize },

    #[error("model service unavailable: {0}")]
    Unavailable(String),

    #[error("model service returned status {status}: {body}")]
    Backend { status: u16, body: String },

    #[error("invalid model response: {0}")]
    InvalidResponse(String),
}

impl InferenceError {
    /// True when the model answered but its output cannot be turned into a label.
    #[must_use]
    pub fn is_precondition_violation(&self) -> bool {
        matches!(
            self,
            Self::EmptyDistribution | Self::NanLogit { .. } | Self::UnknownLabel { .. }
        )
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictionError {
    #[error("claim text is empty")]
    EmptyClaim,

    #[error(transparent)]
    Retrieval(#[from] RetrievalError),

    #[error(transparent)]
    Inference(#[from] InferenceError),
}
