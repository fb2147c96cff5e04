//! Modelo de Notification
//!
//! Registro persistido del fan-out. El transporte de entrega (push, email)
//! queda fuera de este servicio; aquí solo se decide cuándo y con qué
//! contenido se crea cada fila.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Notification - mapea exactamente a la tabla notifications
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notification {
    pub id: Uuid,
    pub company_id: Uuid,
    pub sender_id: Uuid,
    pub sender_role: String,
    pub recipient_role: String,
    pub recipient_id: Option<Uuid>,
    pub route_id: Option<Uuid>,
    pub title: String,
    pub message: String,
    pub notification_type: String,
    pub created_at: DateTime<Utc>,
}
