use crate::domain::{Claim, Prediction};
use crate::error::{InferenceError, PredictionError};
use crate::port::{EvidenceRetriever, LabelInference};
use futures::{StreamExt, TryStreamExt, stream};
use std::sync::Arc;
use tracing::{debug, info};

/// Turns a claim into a verdict using an injected retriever and model.
///
/// Holds no mutable state; one instance is shared by every request.
#[derive(Clone)]
pub struct Predictor {
    retriever: Arc<dyn EvidenceRetriever>,
    model: Arc<dyn LabelInference>,
}

impl Predictor {
    pub fn new(retriever: Arc<dyn EvidenceRetriever>, model: Arc<dyn LabelInference>) -> Self {
        Self { retriever, model }
    }

    /// Retrieve evidence for `claim`, score it with the model and name the
    /// highest-scoring label.
    ///
    /// The returned evidence is the exact set the model saw.
    ///
    /// # Errors
    /// Retrieval failures are returned unchanged as [`PredictionError::Retrieval`].
    /// An empty distribution, a NaN logit, or an argmax outside the model
    /// vocabulary, is returned as [`PredictionError::Inference`].
    pub async fn predict(&self, claim: &Claim) -> Result<Prediction, PredictionError> {
        let evidence = self.retriever.fetch_evidence(claim).await?;
        debug!(evidence = evidence.len(), "retrieved evidence");

        let distribution = self.model.infer(claim, &evidence).await?;
        let index = distribution.argmax()?;
        let label = self
            .model
            .label_name(index)
            .ok_or(InferenceError::UnknownLabel { index })?
            .to_string();

        info!(label = %label, evidence = evidence.len(), "predicted label");
        Ok(Prediction { label, evidence })
    }

    /// Predict every claim, keeping at most `concurrency` predictions in flight.
    ///
    /// Results come back in input order. The first failure aborts the batch.
    pub async fn predict_batch(
        &self,
        claims: &[Claim],
        concurrency: usize,
    ) -> Result<Vec<Prediction>, PredictionError> {
        let pending: Vec<_> = claims.iter().map(|claim| self.predict(claim)).collect();
        stream::iter(pending)
            .buffered(concurrency.max(1))
            .try_collect()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EvidenceItem;
    use crate::error::RetrievalError;
    use crate::test_support::{EchoRetriever, FakeModel, FakeRetriever};
    use tracing_test::traced_test;

    fn claim(text: &str) -> Claim {
        Claim::new(text).unwrap()
    }

    fn predictor(retriever: FakeRetriever, model: FakeModel) -> Predictor {
        Predictor::new(Arc::new(retriever), Arc::new(model))
    }

    #[tokio::test]
    async fn test_predict_names_argmax_label() {
        let p = predictor(
            FakeRetriever::returning(vec![EvidenceItem::new("doc1", 3)]),
            FakeModel::returning(vec![0.1, 0.2, 0.9]),
        );
        let prediction = p.predict(&claim("The moon is cheese.")).await.unwrap();
        assert_eq!(prediction.label, "NOT ENOUGH INFO");
    }

    #[tokio::test]
    async fn test_unknown_label_index_fails() {
        let p = predictor(
            FakeRetriever::returning(vec![]),
            FakeModel::returning(vec![0.0, 0.0, 0.0, 5.0]),
        );
        let err = p.predict(&claim("c")).await.unwrap_err();
        assert_eq!(
            err,
            PredictionError::Inference(InferenceError::UnknownLabel { index: 3 })
        );
    }

    #[tokio::test]
    async fn test_model_failure_propagates() {
        let p = predictor(
            FakeRetriever::returning(vec![]),
            FakeModel::failing(InferenceError::Unavailable("connection refused".into())),
        );
        let err = p.predict(&claim("c")).await.unwrap_err();
        assert_eq!(
            err,
            PredictionError::Inference(InferenceError::Unavailable("connection refused".into()))
        );
    }

    #[tokio::test]
    async fn test_batch_keeps_input_order() {
        let p = Predictor::new(
            Arc::new(EchoRetriever),
            Arc::new(FakeModel::returning(vec![1.0, 0.0, 0.0])),
        );
        let claims: Vec<Claim> = ["first", "second", "third", "fourth"]
            .into_iter()
            .map(claim)
            .collect();
        let predictions = p.predict_batch(&claims, 3).await.unwrap();

        let pages: Vec<&str> = predictions
            .iter()
            .map(|p| p.evidence[0].page.as_str())
            .collect();
        assert_eq!(pages, ["first", "second", "third", "fourth"]);
        assert!(predictions.iter().all(|p| p.label == "REFUTES"));
    }

    #[tokio::test]
    async fn test_batch_fails_whole_on_any_error() {
        let p = Predictor::new(
            Arc::new(EchoRetriever),
            Arc::new(FakeModel::returning(vec![1.0, 0.0, 0.0])),
        );
        let claims = vec![claim("fine"), claim("missing page"), claim("also fine")];
        let err = p.predict_batch(&claims, 1).await.unwrap_err();
        assert!(matches!(
            err,
            PredictionError::Retrieval(RetrievalError::Backend { status: 404, .. })
        ));
    }

    #[tokio::test]
    async fn test_batch_zero_concurrency_still_runs() {
        let p = Predictor::new(
            Arc::new(EchoRetriever),
            Arc::new(FakeModel::returning(vec![0.0, 1.0])),
        );
        let predictions = p.predict_batch(&[claim("only")], 0).await.unwrap();
        assert_eq!(predictions.len(), 1);
        assert_eq!(predictions[0].label, "SUPPORTS");
    }

    #[tokio::test]
    async fn test_empty_batch_returns_nothing() {
        let retriever = Arc::new(FakeRetriever::returning(vec![]));
        let p = Predictor::new(
            retriever.clone(),
            Arc::new(FakeModel::returning(vec![1.0])),
        );
        let predictions = p.predict_batch(&[], 4).await.unwrap();
        assert!(predictions.is_empty());
        assert_eq!(retriever.calls(), 0);
    }

    #[tokio::test]
    async fn test_batch_future_is_send_for_spawned_tasks() {
        let p = Arc::new(Predictor::new(
            Arc::new(EchoRetriever),
            Arc::new(FakeModel::returning(vec![0.0, 1.0])),
        ));
        let claims = vec![claim("one"), claim("two")];

        let handle = tokio::spawn(async move { p.predict_batch(&claims, 2).await });
        let predictions = handle.await.unwrap().unwrap();

        assert_eq!(predictions.len(), 2);
        assert_eq!(predictions[1].evidence[0].page, "two");
    }

    #[tokio::test]
    #[traced_test]
    async fn test_prediction_is_logged() {
        let p = predictor(
            FakeRetriever::returning(vec![EvidenceItem::new("doc1", 3)]),
            FakeModel::returning(vec![0.2, 0.7, 0.1]),
        );
        p.predict(&claim("The sky is blue.")).await.unwrap();
        assert!(logs_contain("predicted label"));
        assert!(logs_contain("SUPPORTS"));
    }
}
