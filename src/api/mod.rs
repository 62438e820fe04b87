//! REST API endpoints.
//!
//! Axum-based HTTP API for browsing the competition programme,
//! per-workout leaderboards, and the overall board, plus score
//! submission and withdrawal.

use axum::routing::{delete, get, put};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json, Router,
};
use serde::Serialize;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::service::ServiceError;

pub mod routes;
pub mod state;

use state::AppState;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::UnknownWorkout(_) | ServiceError::SubmissionNotFound(_, _) => {
                ApiError::NotFound(err.to_string())
            }
            // A ranking failure here means bad data already in the store
            ServiceError::Rank(_) => ApiError::Internal(err.to_string()),
            ServiceError::Storage(_) => ApiError::Internal(err.to_string()),
        }
    }
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/workouts", get(routes::workouts::list_workouts))
        .route(
            "/api/workouts/:id/leaderboard",
            get(routes::workouts::workout_leaderboard),
        )
        .route("/api/workouts/:id/scores", put(routes::scores::submit_score))
        .route(
            "/api/workouts/:id/scores/:participant_id",
            delete(routes::scores::withdraw_score),
        )
        .route("/api/leaderboard", get(routes::leaderboard::overall_leaderboard))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
