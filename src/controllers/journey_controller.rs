use uuid::Uuid;

use crate::dto::journey_dto::{JourneyEventRequest, JourneyResponse};
use crate::models::auth::UserInfo;
use crate::services::authorization_service::{AuthorizationService, DutyCommand};
use crate::services::journey_service::JourneyService;
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};

pub struct JourneyController {
    service: JourneyService,
    authz: AuthorizationService,
}

impl JourneyController {
    pub fn new(state: &AppState) -> Self {
        Self {
            service: state.journeys.clone(),
            authz: AuthorizationService::new(),
        }
    }

    pub async fn record_event(
        &self,
        caller: &UserInfo,
        request: JourneyEventRequest,
    ) -> AppResult<JourneyResponse> {
        self.authz.authorize(caller, DutyCommand::RecordJourneyEvent)?;

        let journey = self
            .service
            .record_event(request.bus_id, caller.company_id, request.event_type, request.school_id)
            .await?;

        Ok(journey.into())
    }

    pub async fn get_today(&self, caller: &UserInfo, bus_id: Uuid) -> AppResult<JourneyResponse> {
        // consulta de solo lectura: cualquier rol autenticado de la empresa
        let journey = self
            .service
            .today_journey(bus_id, caller.company_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound("No journey has been started today for this bus".to_string())
            })?;

        Ok(journey.into())
    }
}
