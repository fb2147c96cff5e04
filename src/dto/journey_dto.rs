use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::journey::{Journey, JourneyEvent};

/// Request para registrar un evento de journey
#[derive(Debug, Deserialize)]
pub struct JourneyEventRequest {
    pub bus_id: Uuid,
    pub event_type: JourneyEvent,
    pub school_id: Option<Uuid>,
}

/// Response de journey para la API
#[derive(Debug, Serialize)]
pub struct JourneyResponse {
    pub id: Uuid,
    pub bus_id: Uuid,
    pub driver_id: Uuid,
    pub route_id: Uuid,
    pub school_id: Option<Uuid>,
    pub journey_date: NaiveDate,
    pub depart_homebase_at: Option<DateTime<Utc>>,
    pub arrive_school_at: Option<DateTime<Utc>>,
    pub depart_school_at: Option<DateTime<Utc>>,
    pub arrive_homebase_at: Option<DateTime<Utc>>,
    pub total_duration_minutes: Option<i32>,
}

impl From<Journey> for JourneyResponse {
    fn from(journey: Journey) -> Self {
        Self {
            id: journey.id,
            bus_id: journey.bus_id,
            driver_id: journey.driver_id,
            route_id: journey.route_id,
            school_id: journey.school_id,
            journey_date: journey.journey_date,
            depart_homebase_at: journey.depart_homebase_at,
            arrive_school_at: journey.arrive_school_at,
            depart_school_at: journey.depart_school_at,
            arrive_homebase_at: journey.arrive_homebase_at,
            total_duration_minutes: journey.total_duration_minutes,
        }
    }
}
