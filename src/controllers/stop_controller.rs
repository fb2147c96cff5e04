use uuid::Uuid;
use validator::Validate;

use crate::dto::api::ApiResponse;
use crate::dto::stop_dto::{
    DepartStopRequest, MarkStopRequest, ResetStopsResponse, StopCompletionResponse,
    StopsAwayResponse,
};
use crate::models::auth::UserInfo;
use crate::services::authorization_service::{AuthorizationService, DutyCommand};
use crate::services::stop_progress_service::StopProgressService;
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub struct StopController {
    service: StopProgressService,
    authz: AuthorizationService,
}

impl StopController {
    pub fn new(state: &AppState) -> Self {
        Self {
            service: state.stops.clone(),
            authz: AuthorizationService::new(),
        }
    }

    pub async fn mark_completed(
        &self,
        caller: &UserInfo,
        request: MarkStopRequest,
    ) -> AppResult<ApiResponse<StopCompletionResponse>> {
        request.validate()?;
        self.authz.authorize(caller, DutyCommand::MarkStopCompleted)?;

        let completion = self
            .service
            .mark_stop_completed(
                caller,
                request.route_stop_id,
                request.route_id,
                request.driver_id,
                request.bus_id,
                request.stop_sequence,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            completion.into(),
            "Parada marcada como completada".to_string(),
        ))
    }

    pub async fn mark_departed(
        &self,
        caller: &UserInfo,
        request: DepartStopRequest,
    ) -> AppResult<ApiResponse<StopCompletionResponse>> {
        self.authz.authorize(caller, DutyCommand::MarkStopCompleted)?;

        let completion = self
            .service
            .mark_stop_departed(request.route_stop_id, request.route_id, caller.company_id)
            .await?;

        Ok(ApiResponse::success(completion.into()))
    }

    pub async fn reset_route(
        &self,
        caller: &UserInfo,
        route_id: Uuid,
    ) -> AppResult<ResetStopsResponse> {
        self.authz.authorize(caller, DutyCommand::ResetRouteStops)?;

        let deleted = self.service.reset_route_stops(route_id, caller.company_id).await?;
        Ok(ResetStopsResponse { deleted })
    }

    pub async fn completed_today(
        &self,
        caller: &UserInfo,
        route_id: Uuid,
    ) -> AppResult<Vec<StopCompletionResponse>> {
        // consulta de solo lectura: cualquier rol autenticado de la empresa
        let completions = self.service.today_completed_stops(route_id, caller.company_id).await?;
        Ok(completions.into_iter().map(Into::into).collect())
    }

    pub async fn stops_away(
        &self,
        caller: &UserInfo,
        student_id: Uuid,
    ) -> AppResult<StopsAwayResponse> {
        self.authz.authorize(caller, DutyCommand::StopsAway)?;

        let away = self.service.compute_stops_away(student_id, caller.company_id).await?;
        Ok(StopsAwayResponse::new(student_id, away))
    }
}
