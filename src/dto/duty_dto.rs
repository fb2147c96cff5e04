use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::bus::{Bus, BusStatus, FuelLevel};
use crate::models::user::User;
use crate::services::duty_service::DutyOutcome;

/// Request de check-in con inspección. El driver_id puede ser distinto
/// del caller autenticado (kioskos compartidos en el depósito).
#[derive(Debug, Deserialize, Validate)]
pub struct CheckInRequest {
    pub driver_id: Uuid,
    pub bus_id: Uuid,
    pub route_id: Uuid,

    #[validate(length(min = 1, max = 20))]
    pub fuel_level: String,

    pub interior_clean: bool,
    pub exterior_clean: bool,
}

/// Request para cambiar el estado de turno
#[derive(Debug, Deserialize)]
pub struct DutyStatusRequest {
    pub driver_id: Uuid,
    pub is_on_duty: bool,
}

/// Request para activar/desactivar la ruta de un driver
#[derive(Debug, Deserialize)]
pub struct RouteToggleRequest {
    pub driver_id: Uuid,
}

/// Response del estado de turno de un driver
#[derive(Debug, Serialize)]
pub struct DriverDutyResponse {
    pub id: Uuid,
    pub full_name: String,
    pub is_on_duty: bool,
    pub duty_start_time: Option<DateTime<Utc>>,
    pub assigned_route_id: Option<Uuid>,
    pub check_in_time: Option<DateTime<Utc>>,
    pub fuel_level: Option<FuelLevel>,
}

impl From<User> for DriverDutyResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name,
            is_on_duty: user.is_on_duty,
            duty_start_time: user.duty_start_time,
            assigned_route_id: user.assigned_route_id,
            check_in_time: user.check_in_time,
            fuel_level: user.fuel_level,
        }
    }
}

/// Resultado de un paso secundario de la cadena de check-in/out
#[derive(Debug, Serialize)]
pub struct StepOutcomeResponse {
    pub step: String,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Outcome estructurado: efecto primario + detalle de pasos secundarios
#[derive(Debug, Serialize)]
pub struct DutyOutcomeResponse {
    pub driver: DriverDutyResponse,
    pub steps: Vec<StepOutcomeResponse>,
}

impl From<DutyOutcome> for DutyOutcomeResponse {
    fn from(outcome: DutyOutcome) -> Self {
        Self {
            driver: outcome.driver.into(),
            steps: outcome
                .steps
                .into_iter()
                .map(|s| StepOutcomeResponse {
                    step: s.step.to_string(),
                    ok: s.ok,
                    error: s.error,
                })
                .collect(),
        }
    }
}

/// Response del estado operativo de un bus
#[derive(Debug, Serialize)]
pub struct BusStateResponse {
    pub id: Uuid,
    pub bus_number: String,
    pub status: BusStatus,
    pub driver_id: Option<Uuid>,
    pub current_route_id: Option<Uuid>,
}

impl From<Bus> for BusStateResponse {
    fn from(bus: Bus) -> Self {
        Self {
            id: bus.id,
            bus_number: bus.bus_number,
            status: bus.status,
            driver_id: bus.driver_id,
            current_route_id: bus.current_route_id,
        }
    }
}
