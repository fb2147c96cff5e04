//! Modelo de Route y RouteStop
//!
//! Una ruta pertenece a una empresa, tiene a lo sumo un driver activo
//! y una lista ordenada de paradas (stop_order es 1-based).

use chrono::{DateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Route - mapea exactamente a la tabla routes
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Route {
    pub id: Uuid,
    pub company_id: Uuid,
    pub name: String,
    /// A lo sumo un driver activo por ruta
    pub driver_id: Option<Uuid>,
    pub school_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Parada de una ruta - mapea exactamente a la tabla route_stops
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RouteStop {
    pub id: Uuid,
    pub route_id: Uuid,
    pub address: String,
    pub latitude: Option<Decimal>,
    pub longitude: Option<Decimal>,
    /// Orden dentro de la ruta, 1-based
    pub stop_order: i32,
    pub scheduled_time: Option<NaiveTime>,
    pub created_at: DateTime<Utc>,
}
