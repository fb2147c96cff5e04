//! Journey Tracker
//!
//! Máquina de eventos por (bus, día): NotStarted -> Departed -> AtSchool ->
//! DepartedSchool -> Closed. Los cuatro eventos se aceptan en cualquier
//! orden y solo estampan su checkpoint (hay días en que el driver se salta
//! la escuela). Solo arrive_homebase tiene efecto derivado: la duración
//! total del recorrido.

use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::models::journey::{Journey, JourneyEvent};
use crate::repositories::store::ResourceStore;
use crate::utils::errors::{not_found_error, AppError, AppResult};

#[derive(Clone)]
pub struct JourneyService {
    store: Arc<dyn ResourceStore>,
}

impl JourneyService {
    pub fn new(store: Arc<dyn ResourceStore>) -> Self {
        Self { store }
    }

    /// Abrir el journey del día para un bus. Idempotente: si ya existe uno
    /// para (bus, hoy) se devuelve sin tocar.
    pub async fn start_journey(
        &self,
        bus_id: Uuid,
        driver_id: Uuid,
        route_id: Uuid,
        company_id: Uuid,
        homebase_address: Option<String>,
    ) -> AppResult<Journey> {
        if let Some(existing) = self.store.get_today_journey(bus_id, company_id).await? {
            return Ok(existing);
        }

        let now = Utc::now();
        let journey = Journey {
            id: Uuid::new_v4(),
            company_id,
            bus_id,
            driver_id,
            route_id,
            school_id: None,
            journey_date: now.date_naive(),
            homebase_address,
            depart_homebase_at: Some(now),
            arrive_school_at: None,
            depart_school_at: None,
            arrive_homebase_at: None,
            total_duration_minutes: None,
            created_at: now,
        };
        self.store.create_journey(&journey).await?;

        Ok(journey)
    }

    /// Estampar un evento sobre el journey del día. Falla con NotFound si
    /// nadie llamó start_journey todavía.
    pub async fn record_event(
        &self,
        bus_id: Uuid,
        company_id: Uuid,
        event: JourneyEvent,
        school_id: Option<Uuid>,
    ) -> AppResult<Journey> {
        let mut journey = self
            .store
            .get_today_journey(bus_id, company_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound("No journey has been started today for this bus".to_string())
            })?;

        let now = Utc::now();
        match event {
            JourneyEvent::DepartHomebase => journey.depart_homebase_at = Some(now),
            JourneyEvent::ArriveSchool => {
                journey.arrive_school_at = Some(now);
                if let Some(school_id) = school_id {
                    self.store
                        .get_school(school_id, company_id)
                        .await?
                        .ok_or_else(|| not_found_error("School", &school_id.to_string()))?;
                    journey.school_id = Some(school_id);
                }
            }
            JourneyEvent::DepartSchool => journey.depart_school_at = Some(now),
            JourneyEvent::ArriveHomebase => {
                journey.arrive_homebase_at = Some(now);
                if let Some(departed) = journey.depart_homebase_at {
                    let minutes = ((now - departed).num_seconds() as f64 / 60.0).round() as i32;
                    journey.total_duration_minutes = Some(minutes);
                }
            }
        }

        self.store.save_journey(&journey).await?;
        Ok(journey)
    }

    /// Journey del día para un bus, si existe
    pub async fn today_journey(&self, bus_id: Uuid, company_id: Uuid) -> AppResult<Option<Journey>> {
        self.store.get_today_journey(bus_id, company_id).await
    }

    /// Cerrar el journey del día si existe y sigue abierto. Usado por el
    /// check-out; no falla si el bus no salió hoy.
    pub async fn close_today_journey(
        &self,
        bus_id: Uuid,
        company_id: Uuid,
    ) -> AppResult<Option<Journey>> {
        match self.store.get_today_journey(bus_id, company_id).await? {
            Some(journey) if !journey.is_closed() => self
                .record_event(bus_id, company_id, JourneyEvent::ArriveHomebase, None)
                .await
                .map(Some),
            other => Ok(other),
        }
    }
}
