use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::stop_controller::StopController;
use crate::dto::api::ApiResponse;
use crate::dto::stop_dto::{
    DepartStopRequest, MarkStopRequest, ResetStopsResponse, StopCompletionResponse,
    StopsAwayResponse,
};
use crate::middleware::auth::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_stop_router() -> Router<AppState> {
    Router::new()
        .route("/complete", post(mark_completed))
        .route("/depart", post(mark_departed))
        .route("/reset/:route_id", post(reset_route))
        .route("/completed/:route_id", get(completed_today))
        .route("/stops-away/:student_id", get(stops_away))
}

async fn mark_completed(
    State(state): State<AppState>,
    AuthenticatedUser(caller): AuthenticatedUser,
    Json(request): Json<MarkStopRequest>,
) -> Result<Json<ApiResponse<StopCompletionResponse>>, AppError> {
    let controller = StopController::new(&state);
    let response = controller.mark_completed(&caller, request).await?;
    Ok(Json(response))
}

async fn mark_departed(
    State(state): State<AppState>,
    AuthenticatedUser(caller): AuthenticatedUser,
    Json(request): Json<DepartStopRequest>,
) -> Result<Json<ApiResponse<StopCompletionResponse>>, AppError> {
    let controller = StopController::new(&state);
    let response = controller.mark_departed(&caller, request).await?;
    Ok(Json(response))
}

async fn reset_route(
    State(state): State<AppState>,
    AuthenticatedUser(caller): AuthenticatedUser,
    Path(route_id): Path<Uuid>,
) -> Result<Json<ResetStopsResponse>, AppError> {
    let controller = StopController::new(&state);
    let response = controller.reset_route(&caller, route_id).await?;
    Ok(Json(response))
}

async fn completed_today(
    State(state): State<AppState>,
    AuthenticatedUser(caller): AuthenticatedUser,
    Path(route_id): Path<Uuid>,
) -> Result<Json<Vec<StopCompletionResponse>>, AppError> {
    let controller = StopController::new(&state);
    let response = controller.completed_today(&caller, route_id).await?;
    Ok(Json(response))
}

async fn stops_away(
    State(state): State<AppState>,
    AuthenticatedUser(caller): AuthenticatedUser,
    Path(student_id): Path<Uuid>,
) -> Result<Json<StopsAwayResponse>, AppError> {
    let controller = StopController::new(&state);
    let response = controller.stops_away(&caller, student_id).await?;
    Ok(Json(response))
}
