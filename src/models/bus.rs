//! Modelo de Bus
//!
//! Este módulo contiene el struct Bus y los enums de estado y combustible.
//! Mapea exactamente a la tabla buses del schema.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;
use uuid::Uuid;

/// Estado del bus - mapea al ENUM bus_status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "bus_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BusStatus {
    Idle,
    OnRoute,
    Maintenance,
    Emergency,
    Inactive,
}

impl BusStatus {
    /// Un bus en mantenimiento o inactivo no se puede asignar
    pub fn is_assignable(&self) -> bool {
        !matches!(self, BusStatus::Maintenance | BusStatus::Inactive)
    }
}

impl std::fmt::Display for BusStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BusStatus::Idle => write!(f, "idle"),
            BusStatus::OnRoute => write!(f, "on_route"),
            BusStatus::Maintenance => write!(f, "in maintenance"),
            BusStatus::Emergency => write!(f, "in emergency"),
            BusStatus::Inactive => write!(f, "inactive"),
        }
    }
}

/// Nivel de combustible reportado en la inspección - mapea al ENUM fuel_level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "fuel_level", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum FuelLevel {
    Full,
    ThreeQuarters,
    Half,
    Quarter,
    Empty,
}

impl FromStr for FuelLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "full" => Ok(FuelLevel::Full),
            "three_quarters" | "3/4" => Ok(FuelLevel::ThreeQuarters),
            "half" | "1/2" => Ok(FuelLevel::Half),
            "quarter" | "1/4" => Ok(FuelLevel::Quarter),
            "empty" => Ok(FuelLevel::Empty),
            other => Err(format!("nivel de combustible desconocido: '{}'", other)),
        }
    }
}

/// Bus principal - mapea exactamente a la tabla buses
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Bus {
    pub id: Uuid,
    pub company_id: Uuid,
    pub bus_number: String,
    /// Back-reference exclusiva: a lo sumo un driver por bus en todo momento
    pub driver_id: Option<Uuid>,
    pub status: BusStatus,
    pub current_route_id: Option<Uuid>,
    pub latitude: Option<Decimal>,
    pub longitude: Option<Decimal>,
    pub speed: Option<Decimal>,
    pub fuel_level: Option<FuelLevel>,
    pub created_at: DateTime<Utc>,
}
