//! Store en memoria para tests
//!
//! Implementa ResourceStore sobre HashMaps protegidos por RwLock, con la
//! misma semántica company-scoped y day-scoped que PgStore. Solo se
//! compila en tests.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::bus::Bus;
use crate::models::journey::Journey;
use crate::models::notification::Notification;
use crate::models::route::{Route, RouteStop};
use crate::models::school::School;
use crate::models::shift_report::ShiftReport;
use crate::models::stop_completion::StopCompletion;
use crate::models::student::{Attendance, AttendanceCounts, AttendanceStatus, Student};
use crate::models::user::User;
use crate::utils::errors::AppResult;

use super::store::ResourceStore;

#[derive(Default)]
pub struct MemoryStore {
    pub users: RwLock<HashMap<Uuid, User>>,
    pub buses: RwLock<HashMap<Uuid, Bus>>,
    pub routes: RwLock<HashMap<Uuid, Route>>,
    pub route_stops: RwLock<Vec<RouteStop>>,
    pub schools: RwLock<HashMap<Uuid, School>>,
    pub journeys: RwLock<Vec<Journey>>,
    pub completions: RwLock<Vec<StopCompletion>>,
    pub students: RwLock<HashMap<Uuid, Student>>,
    /// student_id -> guardian_ids
    pub student_guardians: RwLock<HashMap<Uuid, Vec<Uuid>>>,
    pub attendance: RwLock<Vec<Attendance>>,
    pub shift_reports: RwLock<Vec<ShiftReport>>,
    pub notifications: RwLock<Vec<Notification>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResourceStore for MemoryStore {
    async fn get_user(&self, id: Uuid, company_id: Uuid) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).filter(|u| u.company_id == company_id).cloned())
    }

    async fn save_user(&self, user: &User) -> AppResult<()> {
        self.users.write().await.insert(user.id, user.clone());
        Ok(())
    }

    async fn get_bus(&self, id: Uuid, company_id: Uuid) -> AppResult<Option<Bus>> {
        let buses = self.buses.read().await;
        Ok(buses.get(&id).filter(|b| b.company_id == company_id).cloned())
    }

    async fn find_bus_by_driver(&self, driver_id: Uuid, company_id: Uuid) -> AppResult<Option<Bus>> {
        let buses = self.buses.read().await;
        Ok(buses
            .values()
            .find(|b| b.driver_id == Some(driver_id) && b.company_id == company_id)
            .cloned())
    }

    async fn save_bus(&self, bus: &Bus) -> AppResult<()> {
        self.buses.write().await.insert(bus.id, bus.clone());
        Ok(())
    }

    async fn get_route(&self, id: Uuid, company_id: Uuid) -> AppResult<Option<Route>> {
        let routes = self.routes.read().await;
        Ok(routes.get(&id).filter(|r| r.company_id == company_id).cloned())
    }

    async fn find_route_by_driver(&self, driver_id: Uuid, company_id: Uuid) -> AppResult<Option<Route>> {
        let routes = self.routes.read().await;
        Ok(routes
            .values()
            .find(|r| r.driver_id == Some(driver_id) && r.company_id == company_id)
            .cloned())
    }

    async fn save_route(&self, route: &Route) -> AppResult<()> {
        self.routes.write().await.insert(route.id, route.clone());
        Ok(())
    }

    async fn get_stops_by_route(&self, route_id: Uuid, _company_id: Uuid) -> AppResult<Vec<RouteStop>> {
        let stops = self.route_stops.read().await;
        let mut result: Vec<RouteStop> = stops
            .iter()
            .filter(|s| s.route_id == route_id)
            .cloned()
            .collect();
        result.sort_by_key(|s| s.stop_order);
        Ok(result)
    }

    async fn get_school(&self, id: Uuid, company_id: Uuid) -> AppResult<Option<School>> {
        let schools = self.schools.read().await;
        Ok(schools.get(&id).filter(|s| s.company_id == company_id).cloned())
    }

    async fn get_today_journey(&self, bus_id: Uuid, company_id: Uuid) -> AppResult<Option<Journey>> {
        let today = Utc::now().date_naive();
        let journeys = self.journeys.read().await;
        Ok(journeys
            .iter()
            .find(|j| j.bus_id == bus_id && j.company_id == company_id && j.journey_date == today)
            .cloned())
    }

    async fn create_journey(&self, journey: &Journey) -> AppResult<()> {
        self.journeys.write().await.push(journey.clone());
        Ok(())
    }

    async fn save_journey(&self, journey: &Journey) -> AppResult<()> {
        let mut journeys = self.journeys.write().await;
        if let Some(existing) = journeys.iter_mut().find(|j| j.id == journey.id) {
            *existing = journey.clone();
        }
        Ok(())
    }

    async fn get_today_completed_stops(&self, route_id: Uuid, company_id: Uuid) -> AppResult<Vec<StopCompletion>> {
        let today = Utc::now().date_naive();
        let completions = self.completions.read().await;
        let mut result: Vec<StopCompletion> = completions
            .iter()
            .filter(|c| c.route_id == route_id && c.company_id == company_id && c.completion_date == today)
            .cloned()
            .collect();
        result.sort_by_key(|c| c.stop_sequence);
        Ok(result)
    }

    async fn insert_stop_completion(&self, completion: &StopCompletion) -> AppResult<()> {
        self.completions.write().await.push(completion.clone());
        Ok(())
    }

    async fn save_stop_completion(&self, completion: &StopCompletion) -> AppResult<()> {
        let mut completions = self.completions.write().await;
        if let Some(existing) = completions.iter_mut().find(|c| c.id == completion.id) {
            *existing = completion.clone();
        }
        Ok(())
    }

    async fn delete_today_completions(&self, route_id: Uuid, company_id: Uuid) -> AppResult<u64> {
        let today = Utc::now().date_naive();
        let mut completions = self.completions.write().await;
        let before = completions.len();
        completions.retain(|c| {
            !(c.route_id == route_id && c.company_id == company_id && c.completion_date == today)
        });
        Ok((before - completions.len()) as u64)
    }

    async fn get_student(&self, id: Uuid, company_id: Uuid) -> AppResult<Option<Student>> {
        let students = self.students.read().await;
        Ok(students.get(&id).filter(|s| s.company_id == company_id).cloned())
    }

    async fn get_students_by_stop(&self, route_stop_id: Uuid, company_id: Uuid) -> AppResult<Vec<Student>> {
        let students = self.students.read().await;
        Ok(students
            .values()
            .filter(|s| s.route_stop_id == Some(route_stop_id) && s.company_id == company_id)
            .cloned()
            .collect())
    }

    async fn get_guardians_of_student(&self, student_id: Uuid, company_id: Uuid) -> AppResult<Vec<User>> {
        let links = self.student_guardians.read().await;
        let users = self.users.read().await;
        let guardian_ids = links.get(&student_id).cloned().unwrap_or_default();
        Ok(guardian_ids
            .iter()
            .filter_map(|id| users.get(id))
            .filter(|u| u.company_id == company_id)
            .cloned()
            .collect())
    }

    async fn count_today_attendance(&self, route_id: Uuid, company_id: Uuid) -> AppResult<AttendanceCounts> {
        let today = Utc::now().date_naive();
        let attendance = self.attendance.read().await;
        let mut counts = AttendanceCounts::default();
        for record in attendance.iter() {
            if record.route_id == Some(route_id)
                && record.company_id == company_id
                && record.attendance_date == today
            {
                match record.status {
                    AttendanceStatus::Present => counts.present += 1,
                    AttendanceStatus::DroppedOff => counts.dropped_off += 1,
                    AttendanceStatus::Absent => {}
                }
            }
        }
        Ok(counts)
    }

    async fn create_shift_report(&self, report: &ShiftReport) -> AppResult<()> {
        self.shift_reports.write().await.push(report.clone());
        Ok(())
    }

    async fn create_notification(&self, notification: &Notification) -> AppResult<()> {
        self.notifications.write().await.push(notification.clone());
        Ok(())
    }
}
