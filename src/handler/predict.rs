use crate::app::AppState;
use crate::domain::{Claim, Prediction};
use crate::error::PredictionError;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

/// One request instance. Fields other than `claim` are accepted and ignored.
#[derive(Deserialize, Debug)]
pub struct PredictInstance {
    pub claim: String,
}

#[derive(Deserialize, Debug)]
pub struct PredictRequest {
    pub instances: Vec<PredictInstance>,
}

#[derive(Serialize, Debug)]
pub struct PredictResponse {
    pub data: PredictionData,
}

#[derive(Serialize, Debug)]
pub struct PredictionData {
    pub predictions: Vec<Prediction>,
}

#[derive(Serialize, Debug)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for PredictionError {
    fn into_response(self) -> Response {
        let status = match &self {
            PredictionError::EmptyClaim => StatusCode::BAD_REQUEST,
            PredictionError::Retrieval(_) => StatusCode::BAD_GATEWAY,
            PredictionError::Inference(e) if e.is_precondition_violation() => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            PredictionError::Inference(_) => StatusCode::BAD_GATEWAY,
        };
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Handler for POST /predict (FEVER 2.0 batch prediction).
///
/// Either every instance gets a prediction or the whole request fails.
pub async fn predict_handler(
    State(state): State<AppState>,
    Json(request): Json<PredictRequest>,
) -> Result<Json<PredictResponse>, PredictionError> {
    info!(
        "Received predict request with {} instances",
        request.instances.len()
    );

    let claims = request
        .instances
        .into_iter()
        .map(|instance| Claim::new(instance.claim))
        .collect::<Result<Vec<_>, _>>()
        .inspect_err(|e| warn!("Rejected predict request: {e}"))?;

    let predictions = state
        .predictor
        .predict_batch(&claims, state.batch_concurrency)
        .await
        .inspect_err(|e| error!("Prediction failed: {e}"))?;

    info!("Returning {} predictions", predictions.len());
    Ok(Json(PredictResponse {
        data: PredictionData { predictions },
    }))
}
