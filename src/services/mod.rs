//! Servicios del dominio
//!
//! Aquí vive la lógica de orquestación: asignación exclusiva
//! driver↔bus↔route, ciclo de turno, journeys por día, progreso de
//! paradas y fan-out de notificaciones.

pub mod assignment_service;
pub mod authorization_service;
pub mod duty_service;
pub mod journey_service;
pub mod notification_service;
pub mod stop_progress_service;

#[cfg(test)]
pub mod test_support;
