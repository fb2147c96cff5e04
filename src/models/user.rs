//! Modelo de User
//!
//! Este módulo contiene el struct User para todas las personas del sistema
//! (admins, conductores, tutores). Los campos de turno solo aplican al rol
//! driver y los mutan únicamente el ciclo de duty y el assignment manager.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::auth::UserRole;
use crate::models::bus::FuelLevel;

/// User - mapea exactamente a la tabla users
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub company_id: Uuid,
    pub full_name: String,
    pub email: Option<String>,
    pub role: UserRole,

    // Estado de turno (solo rol driver)
    pub is_on_duty: bool,
    pub duty_start_time: Option<DateTime<Utc>>,
    pub assigned_route_id: Option<Uuid>,

    // Snapshot de inspección capturado en el check-in
    pub fuel_level: Option<FuelLevel>,
    pub interior_clean: Option<bool>,
    pub exterior_clean: Option<bool>,
    pub check_in_time: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn is_driver(&self) -> bool {
        self.role == UserRole::Driver
    }

    /// Limpiar el snapshot de inspección al cerrar el turno
    pub fn clear_check_in_snapshot(&mut self) {
        self.fuel_level = None;
        self.interior_clean = None;
        self.exterior_clean = None;
        self.check_in_time = None;
        self.assigned_route_id = None;
    }
}
