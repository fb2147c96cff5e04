//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. Los servicios se construyen una sola vez
//! aquí: el assignment service guarda los locks por driver, así que debe
//! vivir todo el proceso, no por request.

use sqlx::PgPool;
use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::repositories::store::{PgStore, ResourceStore};
use crate::services::assignment_service::AssignmentService;
use crate::services::duty_service::DutyService;
use crate::services::journey_service::JourneyService;
use crate::services::stop_progress_service::StopProgressService;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    pub journeys: JourneyService,
    pub duty: DutyService,
    pub stops: StopProgressService,
}

impl AppState {
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> Self {
        let store: Arc<dyn ResourceStore> = Arc::new(PgStore::new(pool.clone()));
        let assignments = AssignmentService::new(store.clone());
        let journeys = JourneyService::new(store.clone());
        let duty = DutyService::new(store.clone(), assignments, journeys.clone());
        let stops = StopProgressService::new(store);

        log::info!("🧩 Servicios de dominio inicializados");

        Self {
            pool,
            config,
            journeys,
            duty,
            stops,
        }
    }
}
