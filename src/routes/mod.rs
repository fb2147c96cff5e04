//! Routers de la API

pub mod duty_routes;
pub mod journey_routes;
pub mod stop_routes;
