use crate::adapter::{ModelServiceClient, RetrievalServiceClient};
use crate::config::Settings;
use crate::error::ServiceError;
use crate::pipeline::Predictor;
use crate::port::{EvidenceRetriever, LabelInference};
use std::sync::Arc;
use tracing::info;

/// Shared application state: the predictor and how wide a batch may fan out.
#[derive(Clone)]
pub struct AppState {
    pub predictor: Arc<Predictor>,
    pub batch_concurrency: usize,
}

impl AppState {
    pub fn new(predictor: Predictor, batch_concurrency: usize) -> Self {
        Self {
            predictor: Arc::new(predictor),
            batch_concurrency,
        }
    }

    /// Create `AppState` from configuration settings.
    ///
    /// Connects the retrieval and model collaborators once; a failure to
    /// open the database, index or model archive aborts startup.
    pub async fn from_settings(settings: &Settings) -> Result<Self, ServiceError> {
        info!("Load FEVER Document database from {}", settings.database);
        info!("Load document retrieval index from {}", settings.index);
        let retriever: Arc<dyn EvidenceRetriever> =
            Arc::new(RetrievalServiceClient::connect(settings.retrieval_service()).await?);

        info!("Load Model from {}", settings.model);
        let model: Arc<dyn LabelInference> =
            Arc::new(ModelServiceClient::connect(settings.model_service()).await?);

        Ok(Self::new(
            Predictor::new(retriever, model),
            settings.batch_concurrency,
        ))
    }
}
