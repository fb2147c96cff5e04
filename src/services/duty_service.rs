//! Duty Lifecycle Controller
//!
//! Máquina de estados OffDuty -> OnDuty -> OffDuty. El check-in y el
//! check-out son una cadena de pasos en orden fijo sin rollback: el flip
//! de duty es el efecto primario y aborta la operación si falla; los
//! pasos secundarios (bindings, estado del bus, journey, reporte) son
//! best-effort y sus fallos se registran en el outcome en vez de
//! tragarse solo en logs. Un driver nunca se queda atascado en turno por
//! un fallo de reporte: disponibilidad antes que consistencia estricta.

use chrono::Utc;
use std::future::Future;
use std::sync::Arc;
use uuid::Uuid;

use crate::models::auth::UserInfo;
use crate::models::bus::{Bus, BusStatus, FuelLevel};
use crate::models::shift_report::ShiftReport;
use crate::models::student::AttendanceCounts;
use crate::models::user::User;
use crate::repositories::store::ResourceStore;
use crate::services::assignment_service::AssignmentService;
use crate::services::journey_service::JourneyService;
use crate::utils::errors::{not_found_error, validation_error, AppError, AppResult};

/// Parámetros del check-in ya validados por el boundary
#[derive(Debug, Clone)]
pub struct CheckInParams {
    pub driver_id: Uuid,
    pub bus_id: Uuid,
    pub route_id: Uuid,
    pub fuel_level: FuelLevel,
    pub interior_clean: bool,
    pub exterior_clean: bool,
}

/// Resultado de un paso secundario de la cadena
#[derive(Debug, Clone)]
pub struct StepOutcome {
    pub step: &'static str,
    pub ok: bool,
    pub error: Option<String>,
}

/// Resultado estructurado de check-in / check-out: el efecto primario más
/// el detalle de cada paso secundario, observable por callers y tests.
#[derive(Debug, Clone)]
pub struct DutyOutcome {
    pub driver: User,
    pub steps: Vec<StepOutcome>,
}

/// Ejecutar un paso secundario: el fallo se loggea y se registra, nunca
/// aborta la operación.
async fn run_step<T, F>(steps: &mut Vec<StepOutcome>, name: &'static str, fut: F)
where
    F: Future<Output = AppResult<T>>,
{
    match fut.await {
        Ok(_) => steps.push(StepOutcome { step: name, ok: true, error: None }),
        Err(e) => {
            tracing::warn!("paso secundario '{}' falló: {}", name, e);
            steps.push(StepOutcome {
                step: name,
                ok: false,
                error: Some(e.to_string()),
            });
        }
    }
}

#[derive(Clone)]
pub struct DutyService {
    store: Arc<dyn ResourceStore>,
    assignments: AssignmentService,
    journeys: JourneyService,
}

impl DutyService {
    pub fn new(
        store: Arc<dyn ResourceStore>,
        assignments: AssignmentService,
        journeys: JourneyService,
    ) -> Self {
        Self { store, assignments, journeys }
    }

    /// Check-in completo con inspección. El caller puede activar un perfil
    /// de driver distinto del suyo (kioskos compartidos); lo que se valida
    /// es que el destino sea un driver de la misma empresa.
    pub async fn check_in(&self, caller: &UserInfo, params: CheckInParams) -> AppResult<DutyOutcome> {
        let company_id = caller.company_id;

        // Primario: resolver y validar el driver destino
        let mut driver = self
            .store
            .get_user(params.driver_id, company_id)
            .await?
            .ok_or_else(|| not_found_error("Driver", &params.driver_id.to_string()))?;
        if !driver.is_driver() {
            return Err(validation_error("driver_id", "target user is not a driver"));
        }

        // Primario: snapshot de inspección + flip de duty
        let now = Utc::now();
        driver.fuel_level = Some(params.fuel_level);
        driver.interior_clean = Some(params.interior_clean);
        driver.exterior_clean = Some(params.exterior_clean);
        driver.check_in_time = Some(now);
        driver.is_on_duty = true;
        driver.duty_start_time = Some(now);
        driver.assigned_route_id = Some(params.route_id);
        self.store.save_user(&driver).await?;

        // Secundarios best-effort, en orden fijo
        let mut steps = Vec::new();
        run_step(
            &mut steps,
            "bind_route",
            self.bind_route_releasing_idle_holder(driver.id, params.route_id, company_id),
        )
        .await;
        run_step(
            &mut steps,
            "bind_bus",
            self.bind_bus_releasing_idle_holder(driver.id, params.bus_id, company_id),
        )
        .await;
        run_step(
            &mut steps,
            "bus_state",
            self.apply_bus_check_in_state(params.bus_id, params.route_id, params.fuel_level, company_id),
        )
        .await;
        run_step(
            &mut steps,
            "start_journey",
            self.journeys
                .start_journey(params.bus_id, driver.id, params.route_id, company_id, None),
        )
        .await;

        tracing::info!("driver {} inició turno", driver.id);
        Ok(DutyOutcome { driver, steps })
    }

    /// Un bus retenido por un driver fuera de turno es elegible: se libera
    /// al holder antes del bind. El assignment manager no conoce el estado
    /// de turno, así que la decisión vive aquí.
    async fn bind_bus_releasing_idle_holder(
        &self,
        driver_id: Uuid,
        bus_id: Uuid,
        company_id: Uuid,
    ) -> AppResult<Bus> {
        let bus = self
            .store
            .get_bus(bus_id, company_id)
            .await?
            .ok_or_else(|| not_found_error("Bus", &bus_id.to_string()))?;

        if let Some(holder_id) = bus.driver_id {
            if holder_id != driver_id {
                let holder = self.store.get_user(holder_id, company_id).await?;
                if matches!(holder, Some(h) if !h.is_on_duty) {
                    self.assignments.unbind_driver_from_bus(holder_id, company_id).await?;
                }
            }
        }

        self.assignments.bind_driver_to_bus(driver_id, bus_id, company_id).await
    }

    /// Mismo criterio que con los buses: una ruta retenida por un driver
    /// fuera de turno se libera antes del bind.
    async fn bind_route_releasing_idle_holder(
        &self,
        driver_id: Uuid,
        route_id: Uuid,
        company_id: Uuid,
    ) -> AppResult<()> {
        let route = self
            .store
            .get_route(route_id, company_id)
            .await?
            .ok_or_else(|| not_found_error("Route", &route_id.to_string()))?;

        if let Some(holder_id) = route.driver_id {
            if holder_id != driver_id {
                let holder = self.store.get_user(holder_id, company_id).await?;
                if matches!(holder, Some(h) if !h.is_on_duty) {
                    self.assignments.unbind_driver_from_route(holder_id, company_id).await?;
                }
            }
        }

        self.assignments.bind_driver_to_route(driver_id, route_id, company_id).await?;
        Ok(())
    }

    async fn apply_bus_check_in_state(
        &self,
        bus_id: Uuid,
        route_id: Uuid,
        fuel_level: FuelLevel,
        company_id: Uuid,
    ) -> AppResult<()> {
        let mut bus = self
            .store
            .get_bus(bus_id, company_id)
            .await?
            .ok_or_else(|| not_found_error("Bus", &bus_id.to_string()))?;

        bus.fuel_level = Some(fuel_level);
        bus.status = BusStatus::OnRoute;
        bus.current_route_id = Some(route_id);
        self.store.save_bus(&bus).await
    }

    /// Cambiar el estado de turno. Con on_duty=false corre la cadena de
    /// check-out; el flip final siempre se ejecuta aunque fallen los
    /// pasos secundarios.
    pub async fn set_duty_status(
        &self,
        caller: &UserInfo,
        driver_id: Uuid,
        on_duty: bool,
    ) -> AppResult<DutyOutcome> {
        let company_id = caller.company_id;

        let mut driver = self
            .store
            .get_user(driver_id, company_id)
            .await?
            .ok_or_else(|| not_found_error("Driver", &driver_id.to_string()))?;
        if !driver.is_driver() {
            return Err(validation_error("driver_id", "target user is not a driver"));
        }

        let mut steps = Vec::new();

        if on_duty {
            // Flip mínimo sin inspección (el check-in completo es la otra ruta)
            driver.is_on_duty = true;
            if driver.duty_start_time.is_none() {
                driver.duty_start_time = Some(Utc::now());
            }
            self.store.save_user(&driver).await?;
            return Ok(DutyOutcome { driver, steps });
        }

        // El reporte se sintetiza solo si el turno estaba abierto; una
        // segunda llamada encuentra is_on_duty=false y no duplica nada.
        let had_open_shift = driver.is_on_duty && driver.duty_start_time.is_some();
        if had_open_shift {
            run_step(&mut steps, "shift_report", self.synthesize_shift_report(&driver)).await;
        }

        // Cerrar el journey del día antes de soltar el bus
        match self.store.find_bus_by_driver(driver.id, company_id).await {
            Ok(Some(bus)) => {
                run_step(&mut steps, "close_journey", self.journeys.close_today_journey(bus.id, company_id)).await;
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!("no se pudo resolver el bus del driver {}: {}", driver.id, e);
                steps.push(StepOutcome {
                    step: "close_journey",
                    ok: false,
                    error: Some(e.to_string()),
                });
            }
        }

        run_step(&mut steps, "unbind_bus", self.assignments.unbind_driver_from_bus(driver.id, company_id)).await;
        run_step(&mut steps, "unbind_route", self.assignments.unbind_driver_from_route(driver.id, company_id)).await;

        // Primario: el flip de salida siempre se ejecuta
        driver.clear_check_in_snapshot();
        driver.is_on_duty = false;
        driver.duty_start_time = None;
        self.store.save_user(&driver).await?;

        tracing::info!("driver {} cerró turno", driver.id);
        Ok(DutyOutcome { driver, steps })
    }

    /// Sintetizar el reporte inmutable de fin de turno
    async fn synthesize_shift_report(&self, driver: &User) -> AppResult<ShiftReport> {
        let company_id = driver.company_id;
        let now = Utc::now();
        let duty_start = driver
            .duty_start_time
            .ok_or_else(|| AppError::Internal("driver has no duty_start_time".to_string()))?;
        let duration = ((now - duty_start).num_seconds() as f64 / 60.0).round() as i32;

        let bus = self.store.find_bus_by_driver(driver.id, company_id).await?;
        let route_id = driver.assigned_route_id;

        let mut schools_visited = 0;
        if let Some(bus) = &bus {
            if let Some(journey) = self.store.get_today_journey(bus.id, company_id).await? {
                if journey.arrive_school_at.is_some() {
                    schools_visited = 1;
                }
            }
        }

        let mut stops_completed = 0;
        let mut counts = AttendanceCounts::default();
        if let Some(route_id) = route_id {
            stops_completed = self
                .store
                .get_today_completed_stops(route_id, company_id)
                .await?
                .len() as i32;
            counts = self.store.count_today_attendance(route_id, company_id).await?;
        }

        let report = ShiftReport {
            id: Uuid::new_v4(),
            company_id,
            driver_id: driver.id,
            bus_id: bus.as_ref().map(|b| b.id),
            route_id,
            duty_start,
            duty_end: now,
            total_duration_minutes: duration,
            starting_fuel: driver.fuel_level,
            ending_fuel: bus.as_ref().and_then(|b| b.fuel_level),
            schools_visited,
            students_present: counts.present as i32,
            students_dropped_off: counts.dropped_off as i32,
            stops_completed,
            summary: format!(
                "Turno de {}: {} min, {} paradas completadas, {} presentes, {} entregados",
                driver.full_name, duration, stops_completed, counts.present, counts.dropped_off
            ),
            created_at: now,
        };
        self.store.create_shift_report(&report).await?;

        Ok(report)
    }

    /// Reanudar la ruta sin re-inspección: solo toca el estado del bus
    pub async fn activate_route(&self, caller: &UserInfo, driver_id: Uuid) -> AppResult<Bus> {
        self.toggle_bus_status(caller, driver_id, BusStatus::OnRoute).await
    }

    /// Pausar la ruta sin cerrar el turno: solo toca el estado del bus
    pub async fn deactivate_route(&self, caller: &UserInfo, driver_id: Uuid) -> AppResult<Bus> {
        self.toggle_bus_status(caller, driver_id, BusStatus::Idle).await
    }

    async fn toggle_bus_status(
        &self,
        caller: &UserInfo,
        driver_id: Uuid,
        status: BusStatus,
    ) -> AppResult<Bus> {
        let mut bus = self
            .store
            .find_bus_by_driver(driver_id, caller.company_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Driver has no bus assigned".to_string()))?;

        bus.status = status;
        self.store.save_bus(&bus).await?;
        Ok(bus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::journey::JourneyEvent;
    use crate::repositories::memory_store::MemoryStore;
    use crate::services::test_support::{caller_of, make_bus, make_driver, make_route, make_user};
    use crate::models::auth::UserRole;

    struct Fixture {
        store: Arc<MemoryStore>,
        service: DutyService,
        journeys: JourneyService,
        caller: UserInfo,
        driver: User,
        bus: Bus,
        route: crate::models::route::Route,
    }

    async fn fixture() -> Fixture {
        let store = Arc::new(MemoryStore::new());
        let assignments = AssignmentService::new(store.clone());
        let journeys = JourneyService::new(store.clone());
        let service = DutyService::new(store.clone(), assignments, journeys.clone());

        let company_id = Uuid::new_v4();
        let driver = make_driver(company_id, "Marta Ruiz");
        let bus = make_bus(company_id, "12");
        let route = make_route(company_id, "Ruta Norte");

        store.users.write().await.insert(driver.id, driver.clone());
        store.buses.write().await.insert(bus.id, bus.clone());
        store.routes.write().await.insert(route.id, route.clone());

        Fixture {
            store,
            service,
            journeys,
            caller: caller_of(&driver),
            driver,
            bus,
            route,
        }
    }

    fn check_in_params(f: &Fixture) -> CheckInParams {
        CheckInParams {
            driver_id: f.driver.id,
            bus_id: f.bus.id,
            route_id: f.route.id,
            fuel_level: FuelLevel::Full,
            interior_clean: true,
            exterior_clean: true,
        }
    }

    #[tokio::test]
    async fn test_check_in_happy_path() {
        let f = fixture().await;

        let outcome = f.service.check_in(&f.caller, check_in_params(&f)).await.unwrap();

        assert!(outcome.driver.is_on_duty);
        assert!(outcome.driver.duty_start_time.is_some());
        assert_eq!(outcome.driver.fuel_level, Some(FuelLevel::Full));
        assert!(outcome.steps.iter().all(|s| s.ok), "steps: {:?}", outcome.steps);

        let buses = f.store.buses.read().await;
        let bus = buses.get(&f.bus.id).unwrap();
        assert_eq!(bus.status, BusStatus::OnRoute);
        assert_eq!(bus.driver_id, Some(f.driver.id));
        assert_eq!(bus.current_route_id, Some(f.route.id));
        assert_eq!(bus.fuel_level, Some(FuelLevel::Full));
        drop(buses);

        let journey = f
            .store
            .get_today_journey(f.bus.id, f.caller.company_id)
            .await
            .unwrap()
            .expect("el check-in abre el journey del día");
        assert!(journey.depart_homebase_at.is_some());

        let routes = f.store.routes.read().await;
        assert_eq!(routes.get(&f.route.id).unwrap().driver_id, Some(f.driver.id));
    }

    #[tokio::test]
    async fn test_check_in_survives_bus_conflict() {
        let f = fixture().await;

        // otro driver en turno retiene el bus
        let mut other = make_driver(f.caller.company_id, "Luis Vega");
        other.is_on_duty = true;
        other.duty_start_time = Some(Utc::now());
        f.store.users.write().await.insert(other.id, other.clone());
        {
            let mut buses = f.store.buses.write().await;
            let bus = buses.get_mut(&f.bus.id).unwrap();
            bus.driver_id = Some(other.id);
        }

        let outcome = f.service.check_in(&f.caller, check_in_params(&f)).await.unwrap();

        // el flip primario ocurrió igual, el paso bind_bus quedó marcado
        assert!(outcome.driver.is_on_duty);
        let bind_bus = outcome.steps.iter().find(|s| s.step == "bind_bus").unwrap();
        assert!(!bind_bus.ok);
        assert!(bind_bus.error.as_ref().unwrap().contains("12"));

        // el bus sigue con su holder en turno
        let buses = f.store.buses.read().await;
        assert_eq!(buses.get(&f.bus.id).unwrap().driver_id, Some(other.id));
    }

    #[tokio::test]
    async fn test_check_in_releases_off_duty_holder() {
        let f = fixture().await;

        let other = make_driver(f.caller.company_id, "Luis Vega"); // fuera de turno
        f.store.users.write().await.insert(other.id, other.clone());
        {
            let mut buses = f.store.buses.write().await;
            buses.get_mut(&f.bus.id).unwrap().driver_id = Some(other.id);
        }

        let outcome = f.service.check_in(&f.caller, check_in_params(&f)).await.unwrap();

        assert!(outcome.steps.iter().all(|s| s.ok), "steps: {:?}", outcome.steps);
        let buses = f.store.buses.read().await;
        assert_eq!(buses.get(&f.bus.id).unwrap().driver_id, Some(f.driver.id));
    }

    #[tokio::test]
    async fn test_check_in_rejects_non_driver_target() {
        let f = fixture().await;
        let guardian = make_user(f.caller.company_id, UserRole::Guardian, "Tutor Uno");
        f.store.users.write().await.insert(guardian.id, guardian.clone());

        let mut params = check_in_params(&f);
        params.driver_id = guardian.id;

        assert!(matches!(
            f.service.check_in(&f.caller, params).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_check_out_synthesizes_report_and_releases_resources() {
        let f = fixture().await;

        f.service.check_in(&f.caller, check_in_params(&f)).await.unwrap();
        // el bus pasó por la escuela durante el turno
        f.journeys
            .record_event(f.bus.id, f.caller.company_id, JourneyEvent::ArriveSchool, None)
            .await
            .unwrap();

        let outcome = f
            .service
            .set_duty_status(&f.caller, f.driver.id, false)
            .await
            .unwrap();

        assert!(!outcome.driver.is_on_duty);
        assert!(outcome.driver.duty_start_time.is_none());
        assert!(outcome.driver.check_in_time.is_none());
        assert!(outcome.driver.assigned_route_id.is_none());
        assert!(outcome.steps.iter().all(|s| s.ok), "steps: {:?}", outcome.steps);

        let reports = f.store.shift_reports.read().await;
        assert_eq!(reports.len(), 1);
        let report = &reports[0];
        assert_eq!(report.driver_id, f.driver.id);
        assert_eq!(report.starting_fuel, Some(FuelLevel::Full));
        assert_eq!(report.schools_visited, 1);
        // el turno duró segundos: tolerancia de ±1 minuto
        assert!(report.total_duration_minutes <= 1);
        drop(reports);

        let buses = f.store.buses.read().await;
        let bus = buses.get(&f.bus.id).unwrap();
        assert_eq!(bus.driver_id, None);
        assert_eq!(bus.status, BusStatus::Idle);
        drop(buses);

        let journey = f
            .store
            .get_today_journey(f.bus.id, f.caller.company_id)
            .await
            .unwrap()
            .unwrap();
        assert!(journey.arrive_homebase_at.is_some());

        let routes = f.store.routes.read().await;
        assert_eq!(routes.get(&f.route.id).unwrap().driver_id, None);
    }

    #[tokio::test]
    async fn test_check_out_when_off_duty_inserts_no_report() {
        let f = fixture().await;

        let outcome = f
            .service
            .set_duty_status(&f.caller, f.driver.id, false)
            .await
            .unwrap();

        assert!(!outcome.driver.is_on_duty);
        assert!(f.store.shift_reports.read().await.is_empty());
        assert!(!outcome.steps.iter().any(|s| s.step == "shift_report"));
    }

    #[tokio::test]
    async fn test_double_check_out_does_not_double_report() {
        let f = fixture().await;

        f.service.check_in(&f.caller, check_in_params(&f)).await.unwrap();
        f.service.set_duty_status(&f.caller, f.driver.id, false).await.unwrap();
        f.service.set_duty_status(&f.caller, f.driver.id, false).await.unwrap();

        assert_eq!(f.store.shift_reports.read().await.len(), 1);
    }

    #[tokio::test]
    async fn test_set_duty_status_on_is_minimal_flip() {
        let f = fixture().await;

        let outcome = f
            .service
            .set_duty_status(&f.caller, f.driver.id, true)
            .await
            .unwrap();

        assert!(outcome.driver.is_on_duty);
        assert!(outcome.driver.duty_start_time.is_some());
        assert!(outcome.driver.check_in_time.is_none());
        assert!(outcome.steps.is_empty());
    }

    #[tokio::test]
    async fn test_activate_and_deactivate_route_toggle_bus_only() {
        let f = fixture().await;

        f.service.check_in(&f.caller, check_in_params(&f)).await.unwrap();

        let bus = f.service.deactivate_route(&f.caller, f.driver.id).await.unwrap();
        assert_eq!(bus.status, BusStatus::Idle);

        let bus = f.service.activate_route(&f.caller, f.driver.id).await.unwrap();
        assert_eq!(bus.status, BusStatus::OnRoute);

        // el snapshot del driver queda intacto
        let users = f.store.users.read().await;
        let driver = users.get(&f.driver.id).unwrap();
        assert!(driver.is_on_duty);
        assert!(driver.check_in_time.is_some());
    }

    #[tokio::test]
    async fn test_toggle_route_without_bus_is_not_found() {
        let f = fixture().await;

        assert!(matches!(
            f.service.activate_route(&f.caller, f.driver.id).await,
            Err(AppError::NotFound(_))
        ));
    }
}
