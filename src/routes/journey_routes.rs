use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::journey_controller::JourneyController;
use crate::dto::journey_dto::{JourneyEventRequest, JourneyResponse};
use crate::middleware::auth::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_journey_router() -> Router<AppState> {
    Router::new()
        .route("/event", post(record_event))
        .route("/today/:bus_id", get(get_today))
}

async fn record_event(
    State(state): State<AppState>,
    AuthenticatedUser(caller): AuthenticatedUser,
    Json(request): Json<JourneyEventRequest>,
) -> Result<Json<JourneyResponse>, AppError> {
    let controller = JourneyController::new(&state);
    let response = controller.record_event(&caller, request).await?;
    Ok(Json(response))
}

async fn get_today(
    State(state): State<AppState>,
    AuthenticatedUser(caller): AuthenticatedUser,
    Path(bus_id): Path<Uuid>,
) -> Result<Json<JourneyResponse>, AppError> {
    let controller = JourneyController::new(&state);
    let response = controller.get_today(&caller, bus_id).await?;
    Ok(Json(response))
}
