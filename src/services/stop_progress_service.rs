//! Stop Progress Tracker
//!
//! Registra la llegada del bus a cada parada (una vez por parada por día)
//! y hace fan-out de una notificación por cada (estudiante, tutor) de la
//! parada. El reenvío del mismo stop devuelve la fila existente sin
//! repetir el fan-out. También calcula cuántas paradas faltan para un
//! estudiante, como función pura sobre (paradas ordenadas, completions
//! del día).

use chrono::Utc;
use futures::future::join_all;
use std::sync::Arc;
use uuid::Uuid;

use crate::models::auth::{UserInfo, UserRole};
use crate::models::stop_completion::StopCompletion;
use crate::repositories::store::ResourceStore;
use crate::services::notification_service::NotificationService;
use crate::utils::errors::{not_found_error, AppError, AppResult};

/// Resultado de la consulta "¿a cuántas paradas viene el bus?"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StopsAway {
    pub stops_away: i32,
    pub has_arrived: bool,
}

#[derive(Clone)]
pub struct StopProgressService {
    store: Arc<dyn ResourceStore>,
    notifications: NotificationService,
}

impl StopProgressService {
    pub fn new(store: Arc<dyn ResourceStore>) -> Self {
        let notifications = NotificationService::new(store.clone());
        Self { store, notifications }
    }

    /// Marcar la llegada a una parada. Idempotente sobre (parada, día):
    /// un reenvío devuelve la fila original y no vuelve a notificar.
    pub async fn mark_stop_completed(
        &self,
        caller: &UserInfo,
        route_stop_id: Uuid,
        route_id: Uuid,
        driver_id: Uuid,
        bus_id: Uuid,
        stop_sequence: i32,
    ) -> AppResult<StopCompletion> {
        let company_id = caller.company_id;

        let stops = self.store.get_stops_by_route(route_id, company_id).await?;
        let stop = stops
            .iter()
            .find(|s| s.id == route_stop_id)
            .ok_or_else(|| {
                AppError::NotFound("Stop does not belong to this route".to_string())
            })?;

        let today = self.store.get_today_completed_stops(route_id, company_id).await?;
        if let Some(existing) = today.into_iter().find(|c| c.route_stop_id == route_stop_id) {
            return Ok(existing);
        }

        let now = Utc::now();
        let completion = StopCompletion {
            id: Uuid::new_v4(),
            company_id,
            route_id,
            route_stop_id,
            driver_id,
            bus_id,
            stop_sequence,
            completion_date: now.date_naive(),
            arrived_at: now,
            departed_at: None,
            created_at: now,
        };
        self.store.insert_stop_completion(&completion).await?;

        // El fan-out es secundario: si falla, la completion ya quedó
        if let Err(e) = self
            .notify_stop_arrival(company_id, driver_id, route_id, route_stop_id, &stop.address)
            .await
        {
            tracing::warn!(
                "fan-out de notificaciones falló para la parada {}: {}",
                route_stop_id,
                e
            );
        }

        Ok(completion)
    }

    /// Una notificación por cada (estudiante de la parada, tutor del estudiante)
    async fn notify_stop_arrival(
        &self,
        company_id: Uuid,
        driver_id: Uuid,
        route_id: Uuid,
        route_stop_id: Uuid,
        stop_address: &str,
    ) -> AppResult<()> {
        let students = self.store.get_students_by_stop(route_stop_id, company_id).await?;

        for student in students {
            let guardians = self
                .store
                .get_guardians_of_student(student.id, company_id)
                .await?;

            let message = format!(
                "El bus ha llegado a la parada {}. Estudiante: {}",
                stop_address, student.full_name
            );
            let sends = guardians.iter().map(|guardian| {
                self.notifications.create_system_notification(
                    company_id,
                    driver_id,
                    UserRole::Driver,
                    UserRole::Guardian,
                    Some(guardian.id),
                    Some(route_id),
                    "El bus llegó a la parada",
                    &message,
                    "stop_arrival",
                )
            });

            for result in join_all(sends).await {
                if let Err(e) = result {
                    tracing::warn!("no se pudo crear la notificación de llegada: {}", e);
                }
            }
        }

        Ok(())
    }

    /// Estampar la salida de una parada ya completada hoy
    pub async fn mark_stop_departed(
        &self,
        route_stop_id: Uuid,
        route_id: Uuid,
        company_id: Uuid,
    ) -> AppResult<StopCompletion> {
        let today = self.store.get_today_completed_stops(route_id, company_id).await?;
        let mut completion = today
            .into_iter()
            .find(|c| c.route_stop_id == route_stop_id)
            .ok_or_else(|| {
                AppError::NotFound("Stop has not been completed today".to_string())
            })?;

        completion.departed_at = Some(Utc::now());
        self.store.save_stop_completion(&completion).await?;

        Ok(completion)
    }

    /// Completions del día para una ruta, ordenadas por secuencia
    pub async fn today_completed_stops(
        &self,
        route_id: Uuid,
        company_id: Uuid,
    ) -> AppResult<Vec<StopCompletion>> {
        self.store.get_today_completed_stops(route_id, company_id).await
    }

    /// Borrar las completions del día para una ruta. Usado cuando el driver
    /// reinicia el recorrido (turno de mañana y de tarde el mismo día).
    pub async fn reset_route_stops(&self, route_id: Uuid, company_id: Uuid) -> AppResult<u64> {
        self.store
            .get_route(route_id, company_id)
            .await?
            .ok_or_else(|| not_found_error("Route", &route_id.to_string()))?;

        self.store.delete_today_completions(route_id, company_id).await
    }

    /// Paradas que faltan para que el bus llegue a la parada del estudiante
    pub async fn compute_stops_away(&self, student_id: Uuid, company_id: Uuid) -> AppResult<StopsAway> {
        let student = self
            .store
            .get_student(student_id, company_id)
            .await?
            .ok_or_else(|| not_found_error("Student", &student_id.to_string()))?;

        let route_id = student.route_id.ok_or_else(|| {
            AppError::NotFound("Student has no route assigned".to_string())
        })?;
        let stop_id = student.route_stop_id.ok_or_else(|| {
            AppError::NotFound("Student has no stop assigned".to_string())
        })?;

        let stops = self.store.get_stops_by_route(route_id, company_id).await?;
        let student_stop = stops.iter().find(|s| s.id == stop_id).ok_or_else(|| {
            AppError::NotFound("Student stop is not part of the route".to_string())
        })?;

        let completions = self.store.get_today_completed_stops(route_id, company_id).await?;
        if completions.iter().any(|c| c.route_stop_id == stop_id) {
            return Ok(StopsAway { stops_away: 0, has_arrived: true });
        }

        let last_completed = completions.iter().map(|c| c.stop_sequence).max().unwrap_or(0);
        let stops_away = (student_stop.stop_order - last_completed - 1).max(0);

        Ok(StopsAway { stops_away, has_arrived: false })
    }
}
