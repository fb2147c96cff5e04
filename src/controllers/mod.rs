//! Controllers del boundary HTTP
//!
//! Validan el request, despachan la verificación de capacidad una sola
//! vez y traducen entre DTOs y servicios del dominio.

pub mod duty_controller;
pub mod journey_controller;
pub mod stop_controller;
