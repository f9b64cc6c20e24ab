use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use pneuscope_probe::Prediction;
use tracing::{Level, info, instrument};

use crate::{
    AppState,
    errors::AppError,
    models::{BatchRequest, BatchResponse, HealthResponse, PredictRequest, RootResponse},
};

pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "PneuScope ML Service",
        status: "healthy",
    })
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        service: "ml-service",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[instrument(level = Level::DEBUG, skip_all)]
pub async fn predict(
    State(state): State<AppState>,
    body: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<Prediction>, AppError> {
    let Json(request) = body?;
    let samples = request.audio.len();

    let prediction = state.assessor.assess_async(request.into()).await?;

    info!(
        samples,
        risk_score = prediction.risk_score,
        confidence = prediction.confidence,
        category = %prediction.analysis.risk_category,
        "prediction served"
    );

    Ok(Json(prediction))
}

#[instrument(level = Level::DEBUG, skip_all)]
pub async fn predict_batch(
    State(state): State<AppState>,
    body: Result<Json<BatchRequest>, JsonRejection>,
) -> Result<Json<BatchResponse>, AppError> {
    let Json(batch) = body?;

    let entries = state
        .assessor
        .assess_batch(batch.items.into_iter().map(Into::into).collect())
        .await;
    let response = BatchResponse::from(entries);

    info!(
        succeeded = response.succeeded,
        failed = response.failed,
        "batch prediction served"
    );

    Ok(Json(response))
}
