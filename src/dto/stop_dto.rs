use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::stop_completion::StopCompletion;
use crate::services::stop_progress_service::StopsAway;

/// Request para marcar la llegada a una parada
#[derive(Debug, Deserialize, Validate)]
pub struct MarkStopRequest {
    pub route_stop_id: Uuid,
    pub route_id: Uuid,
    pub driver_id: Uuid,
    pub bus_id: Uuid,

    #[validate(range(min = 1))]
    pub stop_sequence: i32,
}

/// Request para estampar la salida de una parada
#[derive(Debug, Deserialize)]
pub struct DepartStopRequest {
    pub route_stop_id: Uuid,
    pub route_id: Uuid,
}

/// Response de una completion para la API
#[derive(Debug, Serialize)]
pub struct StopCompletionResponse {
    pub id: Uuid,
    pub route_id: Uuid,
    pub route_stop_id: Uuid,
    pub driver_id: Uuid,
    pub bus_id: Uuid,
    pub stop_sequence: i32,
    pub completion_date: NaiveDate,
    pub arrived_at: DateTime<Utc>,
    pub departed_at: Option<DateTime<Utc>>,
}

impl From<StopCompletion> for StopCompletionResponse {
    fn from(completion: StopCompletion) -> Self {
        Self {
            id: completion.id,
            route_id: completion.route_id,
            route_stop_id: completion.route_stop_id,
            driver_id: completion.driver_id,
            bus_id: completion.bus_id,
            stop_sequence: completion.stop_sequence,
            completion_date: completion.completion_date,
            arrived_at: completion.arrived_at,
            departed_at: completion.departed_at,
        }
    }
}

/// Response de "¿a cuántas paradas viene el bus?"
#[derive(Debug, Serialize)]
pub struct StopsAwayResponse {
    pub student_id: Uuid,
    pub stops_away: i32,
    pub has_arrived: bool,
}

impl StopsAwayResponse {
    pub fn new(student_id: Uuid, away: StopsAway) -> Self {
        Self {
            student_id,
            stops_away: away.stops_away,
            has_arrived: away.has_arrived,
        }
    }
}

/// Response del reset diario de paradas
#[derive(Debug, Serialize)]
pub struct ResetStopsResponse {
    pub deleted: u64,
}
