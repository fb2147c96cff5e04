//! Repositorios de acceso a datos
//!
//! Un repositorio por entidad sobre PostgreSQL, más el contrato
//! ResourceStore que consumen los servicios del core.

pub mod bus_repository;
pub mod journey_repository;
pub mod notification_repository;
pub mod report_repository;
pub mod route_repository;
pub mod school_repository;
pub mod stop_repository;
pub mod store;
pub mod student_repository;
pub mod user_repository;

#[cfg(test)]
pub mod memory_store;
