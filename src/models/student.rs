//! Modelo de Student y asistencia
//!
//! Un student (rider) está asignado a una ruta y a una parada concreta.
//! Sus tutores se vinculan por la tabla student_guardians. La asistencia
//! la escribe un flujo externo; este core solo la cuenta para los reportes.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Student - mapea exactamente a la tabla students
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Student {
    pub id: Uuid,
    pub company_id: Uuid,
    pub full_name: String,
    pub route_id: Option<Uuid>,
    pub route_stop_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Estado de asistencia - mapea al ENUM attendance_status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "attendance_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Present,
    DroppedOff,
    Absent,
}

/// Registro de asistencia - mapea exactamente a la tabla attendance
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Attendance {
    pub id: Uuid,
    pub company_id: Uuid,
    pub student_id: Uuid,
    pub route_id: Option<Uuid>,
    pub status: AttendanceStatus,
    pub attendance_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Conteos de asistencia del día para una ruta
#[derive(Debug, Clone, Copy, Default)]
pub struct AttendanceCounts {
    pub present: i64,
    pub dropped_off: i64,
}
