//! Modelo de StopCompletion
//!
//! Una fila por (parada, día) cuando el bus llega físicamente a la parada.
//! Unicidad sobre (route_stop_id, completion_date); solo se borra con el
//! reset diario de la ruta.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// StopCompletion - mapea exactamente a la tabla stop_completions
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StopCompletion {
    pub id: Uuid,
    pub company_id: Uuid,
    pub route_id: Uuid,
    pub route_stop_id: Uuid,
    pub driver_id: Uuid,
    pub bus_id: Uuid,
    pub stop_sequence: i32,
    pub completion_date: NaiveDate,
    pub arrived_at: DateTime<Utc>,
    pub departed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
