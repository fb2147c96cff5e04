//! Modelos del dominio
//!
//! Cada módulo mapea exactamente a su tabla PostgreSQL con primary key 'id'.
//! Todas las tablas están scoped por company_id (multi-tenant).

pub mod auth;
pub mod bus;
pub mod journey;
pub mod notification;
pub mod route;
pub mod school;
pub mod shift_report;
pub mod stop_completion;
pub mod student;
pub mod user;
