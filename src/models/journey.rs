//! Modelo de Journey
//!
//! Un journey es el registro por (bus, día) de los cuatro checkpoints
//! homebase/escuela. La creación es idempotente: a lo sumo un journey
//! por bus por día calendario.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Tipo de evento de journey
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JourneyEvent {
    DepartHomebase,
    ArriveSchool,
    DepartSchool,
    ArriveHomebase,
}

/// Journey - mapea exactamente a la tabla bus_journeys
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Journey {
    pub id: Uuid,
    pub company_id: Uuid,
    pub bus_id: Uuid,
    pub driver_id: Uuid,
    pub route_id: Uuid,
    pub school_id: Option<Uuid>,
    pub journey_date: NaiveDate,
    pub homebase_address: Option<String>,

    // Checkpoints: eventos, no una máquina de orden estricto.
    // Cualquier evento puede llegar en cualquier orden (hay días sin escuela).
    pub depart_homebase_at: Option<DateTime<Utc>>,
    pub arrive_school_at: Option<DateTime<Utc>>,
    pub depart_school_at: Option<DateTime<Utc>>,
    pub arrive_homebase_at: Option<DateTime<Utc>>,

    /// Derivado al registrar arrive_homebase, si hubo depart_homebase
    pub total_duration_minutes: Option<i32>,

    pub created_at: DateTime<Utc>,
}

impl Journey {
    pub fn is_closed(&self) -> bool {
        self.arrive_homebase_at.is_some()
    }
}
