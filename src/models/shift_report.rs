//! Modelo de ShiftReport
//!
//! Reporte inmutable sintetizado en el check-out. Se crea exactamente una
//! vez por transición de salida de turno y nunca se muta después.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::bus::FuelLevel;

/// ShiftReport - mapea exactamente a la tabla driver_shift_reports
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ShiftReport {
    pub id: Uuid,
    pub company_id: Uuid,
    pub driver_id: Uuid,
    pub bus_id: Option<Uuid>,
    pub route_id: Option<Uuid>,
    pub duty_start: DateTime<Utc>,
    pub duty_end: DateTime<Utc>,
    pub total_duration_minutes: i32,
    pub starting_fuel: Option<FuelLevel>,
    pub ending_fuel: Option<FuelLevel>,
    pub schools_visited: i32,
    pub students_present: i32,
    pub students_dropped_off: i32,
    pub stops_completed: i32,
    pub summary: String,
    pub created_at: DateTime<Utc>,
}
