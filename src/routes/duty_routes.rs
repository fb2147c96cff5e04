use axum::{
    extract::State,
    routing::post,
    Json, Router,
};

use crate::controllers::duty_controller::DutyController;
use crate::dto::api::ApiResponse;
use crate::dto::duty_dto::{
    BusStateResponse, CheckInRequest, DutyOutcomeResponse, DutyStatusRequest, RouteToggleRequest,
};
use crate::middleware::auth::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_duty_router() -> Router<AppState> {
    Router::new()
        .route("/check-in", post(check_in))
        .route("/status", post(set_duty_status))
        .route("/route/activate", post(activate_route))
        .route("/route/deactivate", post(deactivate_route))
}

async fn check_in(
    State(state): State<AppState>,
    AuthenticatedUser(caller): AuthenticatedUser,
    Json(request): Json<CheckInRequest>,
) -> Result<Json<ApiResponse<DutyOutcomeResponse>>, AppError> {
    let controller = DutyController::new(&state);
    let response = controller.check_in(&caller, request).await?;
    Ok(Json(response))
}

async fn set_duty_status(
    State(state): State<AppState>,
    AuthenticatedUser(caller): AuthenticatedUser,
    Json(request): Json<DutyStatusRequest>,
) -> Result<Json<ApiResponse<DutyOutcomeResponse>>, AppError> {
    let controller = DutyController::new(&state);
    let response = controller.set_duty_status(&caller, request).await?;
    Ok(Json(response))
}

async fn activate_route(
    State(state): State<AppState>,
    AuthenticatedUser(caller): AuthenticatedUser,
    Json(request): Json<RouteToggleRequest>,
) -> Result<Json<ApiResponse<BusStateResponse>>, AppError> {
    let controller = DutyController::new(&state);
    let response = controller.activate_route(&caller, request).await?;
    Ok(Json(response))
}

async fn deactivate_route(
    State(state): State<AppState>,
    AuthenticatedUser(caller): AuthenticatedUser,
    Json(request): Json<RouteToggleRequest>,
) -> Result<Json<ApiResponse<BusStateResponse>>, AppError> {
    let controller = DutyController::new(&state);
    let response = controller.deactivate_route(&caller, request).await?;
    Ok(Json(response))
}
