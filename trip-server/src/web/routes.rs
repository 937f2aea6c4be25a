//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::planner::PlanError;
use crate::service::{TripError, TripRecord};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/trips", post(plan_trip))
        .route("/trips/:id", get(get_trip))
        .route("/trips/:id/request", put(request_trip))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Plan the cheapest round trip through a set of locations.
async fn plan_trip(State(state): State<AppState>, body: Bytes) -> Result<Response, AppError> {
    // Parse JSON manually so we can log the body on failure
    let req: PlanTripRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(&body), "invalid plan request body");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    let plan = state
        .trips
        .plan_trip(&req.starting_from_location_id, &req.location_ids)
        .await?;

    Ok((StatusCode::CREATED, Json(PlanResponse::from(&plan))).into_response())
}

/// Fetch a trip: its progress once requested, otherwise its plan.
async fn get_trip(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let response = match state.trips.get_trip(&id).await? {
        TripRecord::Planned(plan) => Json(PlanResponse::from(&plan)).into_response(),
        TripRecord::InProgress(progress) => {
            Json(ProgressResponse::from(&progress)).into_response()
        }
    };
    Ok(response)
}

/// Start the trip, or move it on by one leg.
async fn request_trip(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProgressResponse>, AppError> {
    let progress = state.trips.request_trip(&id).await?;
    Ok(Json(ProgressResponse::from(&progress)))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Conflict { message: String },
    BadGateway { message: String },
    Internal { message: String },
}

impl From<TripError> for AppError {
    fn from(e: TripError) -> Self {
        let message = e.to_string();
        match e {
            TripError::InvalidIdentifier(_) | TripError::Plan(PlanError::InvalidInput(_)) => {
                AppError::BadRequest { message }
            }
            TripError::RecordNotFound(_) | TripError::Plan(PlanError::LocationNotFound(_)) => {
                AppError::NotFound { message }
            }
            TripError::Plan(PlanError::InvalidProgressionState(_)) => AppError::Conflict { message },
            TripError::Plan(PlanError::ExternalService { .. }) => AppError::BadGateway { message },
            TripError::Store(_) => AppError::Internal { message },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Conflict { message } => (StatusCode::CONFLICT, message),
            AppError::BadGateway { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
