//! Contrato de acceso a datos
//!
//! Los servicios del core no conocen sqlx: hablan con el trait
//! ResourceStore. `PgStore` es la implementación de producción y compone
//! los repositorios por entidad; los tests usan una implementación en
//! memoria.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::bus::Bus;
use crate::models::journey::Journey;
use crate::models::notification::Notification;
use crate::models::route::{Route, RouteStop};
use crate::models::school::School;
use crate::models::shift_report::ShiftReport;
use crate::models::stop_completion::StopCompletion;
use crate::models::student::{AttendanceCounts, Student};
use crate::models::user::User;
use crate::utils::errors::AppResult;

use super::bus_repository::BusRepository;
use super::journey_repository::JourneyRepository;
use super::notification_repository::NotificationRepository;
use super::report_repository::ReportRepository;
use super::route_repository::RouteRepository;
use super::school_repository::SchoolRepository;
use super::stop_repository::StopRepository;
use super::student_repository::StudentRepository;
use super::user_repository::UserRepository;

/// Accesores company-scoped sobre las entidades del dominio.
/// Todas las consultas "today" usan el día calendario UTC.
#[async_trait]
pub trait ResourceStore: Send + Sync {
    // Users
    async fn get_user(&self, id: Uuid, company_id: Uuid) -> AppResult<Option<User>>;
    async fn save_user(&self, user: &User) -> AppResult<()>;

    // Buses
    async fn get_bus(&self, id: Uuid, company_id: Uuid) -> AppResult<Option<Bus>>;
    async fn find_bus_by_driver(&self, driver_id: Uuid, company_id: Uuid) -> AppResult<Option<Bus>>;
    async fn save_bus(&self, bus: &Bus) -> AppResult<()>;

    // Routes
    async fn get_route(&self, id: Uuid, company_id: Uuid) -> AppResult<Option<Route>>;
    async fn find_route_by_driver(&self, driver_id: Uuid, company_id: Uuid) -> AppResult<Option<Route>>;
    async fn save_route(&self, route: &Route) -> AppResult<()>;
    async fn get_stops_by_route(&self, route_id: Uuid, company_id: Uuid) -> AppResult<Vec<RouteStop>>;

    // Schools
    async fn get_school(&self, id: Uuid, company_id: Uuid) -> AppResult<Option<School>>;

    // Journeys
    async fn get_today_journey(&self, bus_id: Uuid, company_id: Uuid) -> AppResult<Option<Journey>>;
    async fn create_journey(&self, journey: &Journey) -> AppResult<()>;
    async fn save_journey(&self, journey: &Journey) -> AppResult<()>;

    // Stop completions
    async fn get_today_completed_stops(&self, route_id: Uuid, company_id: Uuid) -> AppResult<Vec<StopCompletion>>;
    async fn insert_stop_completion(&self, completion: &StopCompletion) -> AppResult<()>;
    async fn save_stop_completion(&self, completion: &StopCompletion) -> AppResult<()>;
    async fn delete_today_completions(&self, route_id: Uuid, company_id: Uuid) -> AppResult<u64>;

    // Riders
    async fn get_student(&self, id: Uuid, company_id: Uuid) -> AppResult<Option<Student>>;
    async fn get_students_by_stop(&self, route_stop_id: Uuid, company_id: Uuid) -> AppResult<Vec<Student>>;
    async fn get_guardians_of_student(&self, student_id: Uuid, company_id: Uuid) -> AppResult<Vec<User>>;
    async fn count_today_attendance(&self, route_id: Uuid, company_id: Uuid) -> AppResult<AttendanceCounts>;

    // Reports y notificaciones
    async fn create_shift_report(&self, report: &ShiftReport) -> AppResult<()>;
    async fn create_notification(&self, notification: &Notification) -> AppResult<()>;
}

/// Implementación PostgreSQL del store
pub struct PgStore {
    users: UserRepository,
    buses: BusRepository,
    routes: RouteRepository,
    schools: SchoolRepository,
    journeys: JourneyRepository,
    stops: StopRepository,
    students: StudentRepository,
    reports: ReportRepository,
    notifications: NotificationRepository,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            buses: BusRepository::new(pool.clone()),
            routes: RouteRepository::new(pool.clone()),
            schools: SchoolRepository::new(pool.clone()),
            journeys: JourneyRepository::new(pool.clone()),
            stops: StopRepository::new(pool.clone()),
            students: StudentRepository::new(pool.clone()),
            reports: ReportRepository::new(pool.clone()),
            notifications: NotificationRepository::new(pool),
        }
    }
}

#[async_trait]
impl ResourceStore for PgStore {
    async fn get_user(&self, id: Uuid, company_id: Uuid) -> AppResult<Option<User>> {
        self.users.find_by_id(id, company_id).await
    }

    async fn save_user(&self, user: &User) -> AppResult<()> {
        self.users.update_duty_fields(user).await
    }

    async fn get_bus(&self, id: Uuid, company_id: Uuid) -> AppResult<Option<Bus>> {
        self.buses.find_by_id(id, company_id).await
    }

    async fn find_bus_by_driver(&self, driver_id: Uuid, company_id: Uuid) -> AppResult<Option<Bus>> {
        self.buses.find_by_driver(driver_id, company_id).await
    }

    async fn save_bus(&self, bus: &Bus) -> AppResult<()> {
        self.buses.update_assignment_fields(bus).await
    }

    async fn get_route(&self, id: Uuid, company_id: Uuid) -> AppResult<Option<Route>> {
        self.routes.find_by_id(id, company_id).await
    }

    async fn find_route_by_driver(&self, driver_id: Uuid, company_id: Uuid) -> AppResult<Option<Route>> {
        self.routes.find_by_driver(driver_id, company_id).await
    }

    async fn save_route(&self, route: &Route) -> AppResult<()> {
        self.routes.update_driver(route).await
    }

    async fn get_stops_by_route(&self, route_id: Uuid, company_id: Uuid) -> AppResult<Vec<RouteStop>> {
        self.routes.stops_by_route(route_id, company_id).await
    }

    async fn get_school(&self, id: Uuid, company_id: Uuid) -> AppResult<Option<School>> {
        self.schools.find_by_id(id, company_id).await
    }

    async fn get_today_journey(&self, bus_id: Uuid, company_id: Uuid) -> AppResult<Option<Journey>> {
        self.journeys.find_today_by_bus(bus_id, company_id).await
    }

    async fn create_journey(&self, journey: &Journey) -> AppResult<()> {
        self.journeys.insert(journey).await
    }

    async fn save_journey(&self, journey: &Journey) -> AppResult<()> {
        self.journeys.update_checkpoints(journey).await
    }

    async fn get_today_completed_stops(&self, route_id: Uuid, company_id: Uuid) -> AppResult<Vec<StopCompletion>> {
        self.stops.find_today_by_route(route_id, company_id).await
    }

    async fn insert_stop_completion(&self, completion: &StopCompletion) -> AppResult<()> {
        self.stops.insert(completion).await
    }

    async fn save_stop_completion(&self, completion: &StopCompletion) -> AppResult<()> {
        self.stops.update_departed(completion).await
    }

    async fn delete_today_completions(&self, route_id: Uuid, company_id: Uuid) -> AppResult<u64> {
        self.stops.delete_today_by_route(route_id, company_id).await
    }

    async fn get_student(&self, id: Uuid, company_id: Uuid) -> AppResult<Option<Student>> {
        self.students.find_by_id(id, company_id).await
    }

    async fn get_students_by_stop(&self, route_stop_id: Uuid, company_id: Uuid) -> AppResult<Vec<Student>> {
        self.students.find_by_stop(route_stop_id, company_id).await
    }

    async fn get_guardians_of_student(&self, student_id: Uuid, company_id: Uuid) -> AppResult<Vec<User>> {
        self.students.guardians_of(student_id, company_id).await
    }

    async fn count_today_attendance(&self, route_id: Uuid, company_id: Uuid) -> AppResult<AttendanceCounts> {
        self.students.count_today_attendance(route_id, company_id).await
    }

    async fn create_shift_report(&self, report: &ShiftReport) -> AppResult<()> {
        self.reports.insert(report).await
    }

    async fn create_notification(&self, notification: &Notification) -> AppResult<()> {
        self.notifications.insert(notification).await
    }
}
