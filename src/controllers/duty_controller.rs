use validator::Validate;

use crate::dto::api::ApiResponse;
use crate::dto::duty_dto::{
    BusStateResponse, CheckInRequest, DutyOutcomeResponse, DutyStatusRequest, RouteToggleRequest,
};
use crate::models::auth::UserInfo;
use crate::services::authorization_service::{AuthorizationService, DutyCommand};
use crate::services::duty_service::{CheckInParams, DutyService};
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::validate_fuel_level;

pub struct DutyController {
    service: DutyService,
    authz: AuthorizationService,
}

impl DutyController {
    pub fn new(state: &AppState) -> Self {
        Self {
            service: state.duty.clone(),
            authz: AuthorizationService::new(),
        }
    }

    pub async fn check_in(
        &self,
        caller: &UserInfo,
        request: CheckInRequest,
    ) -> AppResult<ApiResponse<DutyOutcomeResponse>> {
        request.validate()?;
        self.authz.authorize(caller, DutyCommand::CheckIn)?;

        tracing::info!(
            "check-in solicitado por {} para el driver {}",
            caller.user_id,
            request.driver_id
        );

        let fuel_level = validate_fuel_level(&request.fuel_level).map_err(|e| {
            let mut errors = validator::ValidationErrors::new();
            errors.add("fuel_level", e);
            AppError::Validation(errors)
        })?;

        let params = CheckInParams {
            driver_id: request.driver_id,
            bus_id: request.bus_id,
            route_id: request.route_id,
            fuel_level,
            interior_clean: request.interior_clean,
            exterior_clean: request.exterior_clean,
        };
        let outcome = self.service.check_in(caller, params).await?;

        Ok(ApiResponse::success_with_message(
            outcome.into(),
            "Check-in realizado exitosamente".to_string(),
        ))
    }

    pub async fn set_duty_status(
        &self,
        caller: &UserInfo,
        request: DutyStatusRequest,
    ) -> AppResult<ApiResponse<DutyOutcomeResponse>> {
        self.authz.authorize(caller, DutyCommand::SetDutyStatus)?;

        let outcome = self
            .service
            .set_duty_status(caller, request.driver_id, request.is_on_duty)
            .await?;

        let message = if request.is_on_duty {
            "Turno iniciado exitosamente"
        } else {
            "Turno cerrado exitosamente"
        };
        Ok(ApiResponse::success_with_message(outcome.into(), message.to_string()))
    }

    pub async fn activate_route(
        &self,
        caller: &UserInfo,
        request: RouteToggleRequest,
    ) -> AppResult<ApiResponse<BusStateResponse>> {
        self.authz.authorize(caller, DutyCommand::ActivateRoute)?;

        let bus = self.service.activate_route(caller, request.driver_id).await?;
        Ok(ApiResponse::success_with_message(
            bus.into(),
            "Ruta activada exitosamente".to_string(),
        ))
    }

    pub async fn deactivate_route(
        &self,
        caller: &UserInfo,
        request: RouteToggleRequest,
    ) -> AppResult<ApiResponse<BusStateResponse>> {
        self.authz.authorize(caller, DutyCommand::DeactivateRoute)?;

        let bus = self.service.deactivate_route(caller, request.driver_id).await?;
        Ok(ApiResponse::success_with_message(
            bus.into(),
            "Ruta desactivada exitosamente".to_string(),
        ))
    }
}
