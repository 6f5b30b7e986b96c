use super::state::AppState;
use crate::handler::health::health_handler;
use crate::handler::predict::predict_handler;
use axum::Router;
use axum::routing::{get, post};

/// Build the HTTP router (health + FEVER predict).
pub fn main_router(state: AppState) -> Router {
    let v1_health_router = Router::new().route("/v1/health", get(health_handler));

    let predict_router = Router::new()
        .route("/predict", post(predict_handler))
        .with_state(state);

    Router::new().merge(v1_health_router).merge(predict_router)
}
