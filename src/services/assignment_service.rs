//! Assignment Manager
//!
//! Este servicio garantiza la exclusividad driver↔bus y driver↔route,
//! independiente del estado de turno. El patrón es unbind-then-bind
//! incondicional: ligar un driver a un bus nuevo primero libera su bus
//! anterior, así el invariante "un bus por driver" no necesita un check
//! de unicidad aparte. Cada operación corre bajo el lock del driver para
//! que el unbind-then-bind sea atómico frente a llamadas concurrentes
//! sobre el mismo driver.
//!
//! Este servicio no sabe nada del estado de turno: un bus retenido por un
//! driver fuera de turno también se rechaza aquí; liberar ese holder es
//! responsabilidad del duty lifecycle antes de llamar.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::models::bus::{Bus, BusStatus};
use crate::models::route::Route;
use crate::repositories::store::ResourceStore;
use crate::utils::errors::{not_found_error, AppError, AppResult};

#[derive(Clone)]
pub struct AssignmentService {
    store: Arc<dyn ResourceStore>,
    locks: Arc<RwLock<HashMap<Uuid, Arc<Mutex<()>>>>>,
}

impl AssignmentService {
    pub fn new(store: Arc<dyn ResourceStore>) -> Self {
        Self {
            store,
            locks: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Obtener el lock de asignación de un driver
    async fn lock_for_driver(&self, driver_id: Uuid) -> Arc<Mutex<()>> {
        let mut locks = self.locks.write().await;
        locks
            .entry(driver_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Ligar un driver a un bus. Libera el bus anterior del driver y deja
    /// el status del bus nuevo intacto (la transición de estado es del
    /// duty lifecycle).
    pub async fn bind_driver_to_bus(
        &self,
        driver_id: Uuid,
        bus_id: Uuid,
        company_id: Uuid,
    ) -> AppResult<Bus> {
        let lock = self.lock_for_driver(driver_id).await;
        let _guard = lock.lock().await;

        let bus = self
            .store
            .get_bus(bus_id, company_id)
            .await?
            .ok_or_else(|| not_found_error("Bus", &bus_id.to_string()))?;

        if !bus.status.is_assignable() {
            return Err(AppError::Conflict(format!(
                "Bus #{} is not assignable while {}",
                bus.bus_number, bus.status
            )));
        }

        match bus.driver_id {
            Some(current) if current != driver_id => {
                return Err(AppError::Conflict(format!(
                    "Bus #{} is already assigned to another driver",
                    bus.bus_number
                )));
            }
            // Rebind del mismo driver: no-op idempotente
            Some(_) => return Ok(bus),
            None => {}
        }

        // Liberar el bus anterior del driver
        if let Some(mut previous) = self.store.find_bus_by_driver(driver_id, company_id).await? {
            if previous.id != bus.id {
                previous.driver_id = None;
                previous.status = BusStatus::Idle;
                self.store.save_bus(&previous).await?;
            }
        }

        let mut bus = bus;
        bus.driver_id = Some(driver_id);
        self.store.save_bus(&bus).await?;

        Ok(bus)
    }

    /// Soltar el bus del driver. No-op exitoso si no tiene bus (idempotente).
    pub async fn unbind_driver_from_bus(&self, driver_id: Uuid, company_id: Uuid) -> AppResult<()> {
        let lock = self.lock_for_driver(driver_id).await;
        let _guard = lock.lock().await;

        if let Some(mut bus) = self.store.find_bus_by_driver(driver_id, company_id).await? {
            bus.driver_id = None;
            bus.status = BusStatus::Idle;
            self.store.save_bus(&bus).await?;
        }

        Ok(())
    }

    /// Ligar un driver a una ruta. Mismo patrón unbind-then-bind, sin
    /// efectos sobre el estado del bus. También refleja la asignación en
    /// el campo assigned_route_id del user.
    pub async fn bind_driver_to_route(
        &self,
        driver_id: Uuid,
        route_id: Uuid,
        company_id: Uuid,
    ) -> AppResult<Route> {
        let lock = self.lock_for_driver(driver_id).await;
        let _guard = lock.lock().await;

        let route = self
            .store
            .get_route(route_id, company_id)
            .await?
            .ok_or_else(|| not_found_error("Route", &route_id.to_string()))?;

        match route.driver_id {
            Some(current) if current != driver_id => {
                return Err(AppError::Conflict(format!(
                    "Route '{}' is already assigned to another driver",
                    route.name
                )));
            }
            Some(_) => return Ok(route),
            None => {}
        }

        if let Some(mut previous) = self.store.find_route_by_driver(driver_id, company_id).await? {
            if previous.id != route.id {
                previous.driver_id = None;
                self.store.save_route(&previous).await?;
            }
        }

        let mut route = route;
        route.driver_id = Some(driver_id);
        self.store.save_route(&route).await?;

        if let Some(mut user) = self.store.get_user(driver_id, company_id).await? {
            user.assigned_route_id = Some(route.id);
            self.store.save_user(&user).await?;
        }

        Ok(route)
    }

    /// Soltar la ruta del driver. Idempotente.
    pub async fn unbind_driver_from_route(&self, driver_id: Uuid, company_id: Uuid) -> AppResult<()> {
        let lock = self.lock_for_driver(driver_id).await;
        let _guard = lock.lock().await;

        if let Some(mut route) = self.store.find_route_by_driver(driver_id, company_id).await? {
            route.driver_id = None;
            self.store.save_route(&route).await?;
        }

        if let Some(mut user) = self.store.get_user(driver_id, company_id).await? {
            if user.assigned_route_id.is_some() {
                user.assigned_route_id = None;
                self.store.save_user(&user).await?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::memory_store::MemoryStore;
    use crate::services::test_support::{make_bus, make_driver, make_route};

    async fn setup() -> (Arc<MemoryStore>, AssignmentService, Uuid) {
        let store = Arc::new(MemoryStore::new());
        let service = AssignmentService::new(store.clone());
        let company_id = Uuid::new_v4();
        (store, service, company_id)
    }

    #[tokio::test]
    async fn test_bind_clears_previous_bus() {
        let (store, service, company_id) = setup().await;
        let driver = make_driver(company_id, "Marta Ruiz");
        let bus1 = make_bus(company_id, "12");
        let bus2 = make_bus(company_id, "14");
        store.users.write().await.insert(driver.id, driver.clone());
        store.buses.write().await.insert(bus1.id, bus1.clone());
        store.buses.write().await.insert(bus2.id, bus2.clone());

        service.bind_driver_to_bus(driver.id, bus1.id, company_id).await.unwrap();
        service.bind_driver_to_bus(driver.id, bus2.id, company_id).await.unwrap();

        let buses = store.buses.read().await;
        let b1 = buses.get(&bus1.id).unwrap();
        let b2 = buses.get(&bus2.id).unwrap();
        assert_eq!(b1.driver_id, None);
        assert_eq!(b1.status, BusStatus::Idle);
        assert_eq!(b2.driver_id, Some(driver.id));
    }

    #[tokio::test]
    async fn test_bind_rejects_foreign_held_bus() {
        let (store, service, company_id) = setup().await;
        let driver = make_driver(company_id, "Marta Ruiz");
        let other = make_driver(company_id, "Luis Vega");
        let mut bus = make_bus(company_id, "42");
        bus.driver_id = Some(other.id);
        store.users.write().await.insert(driver.id, driver.clone());
        store.users.write().await.insert(other.id, other.clone());
        store.buses.write().await.insert(bus.id, bus.clone());

        let result = service.bind_driver_to_bus(driver.id, bus.id, company_id).await;
        match result {
            Err(AppError::Conflict(msg)) => assert!(msg.contains("42")),
            res => panic!("se esperaba Conflict, llegó {:?}", res.map(|b| b.bus_number)),
        }
    }

    #[tokio::test]
    async fn test_bind_rejects_bus_in_maintenance() {
        let (store, service, company_id) = setup().await;
        let driver = make_driver(company_id, "Marta Ruiz");
        let mut bus = make_bus(company_id, "7");
        bus.status = BusStatus::Maintenance;
        store.users.write().await.insert(driver.id, driver.clone());
        store.buses.write().await.insert(bus.id, bus.clone());

        assert!(matches!(
            service.bind_driver_to_bus(driver.id, bus.id, company_id).await,
            Err(AppError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn test_rebind_same_bus_is_idempotent() {
        let (store, service, company_id) = setup().await;
        let driver = make_driver(company_id, "Marta Ruiz");
        let bus = make_bus(company_id, "12");
        store.users.write().await.insert(driver.id, driver.clone());
        store.buses.write().await.insert(bus.id, bus.clone());

        service.bind_driver_to_bus(driver.id, bus.id, company_id).await.unwrap();
        service.bind_driver_to_bus(driver.id, bus.id, company_id).await.unwrap();

        let buses = store.buses.read().await;
        assert_eq!(buses.get(&bus.id).unwrap().driver_id, Some(driver.id));
    }

    #[tokio::test]
    async fn test_unbind_without_bus_is_noop_success() {
        let (_store, service, company_id) = setup().await;
        let driver_id = Uuid::new_v4();
        assert!(service.unbind_driver_from_bus(driver_id, company_id).await.is_ok());
    }

    #[tokio::test]
    async fn test_unbind_returns_bus_to_idle() {
        let (store, service, company_id) = setup().await;
        let driver = make_driver(company_id, "Marta Ruiz");
        let mut bus = make_bus(company_id, "12");
        bus.driver_id = Some(driver.id);
        bus.status = BusStatus::OnRoute;
        store.users.write().await.insert(driver.id, driver.clone());
        store.buses.write().await.insert(bus.id, bus.clone());

        service.unbind_driver_from_bus(driver.id, company_id).await.unwrap();

        let buses = store.buses.read().await;
        let b = buses.get(&bus.id).unwrap();
        assert_eq!(b.driver_id, None);
        assert_eq!(b.status, BusStatus::Idle);
    }

    #[tokio::test]
    async fn test_bind_route_clears_previous_and_mirrors_user() {
        let (store, service, company_id) = setup().await;
        let driver = make_driver(company_id, "Marta Ruiz");
        let route1 = make_route(company_id, "Ruta Norte");
        let route2 = make_route(company_id, "Ruta Sur");
        store.users.write().await.insert(driver.id, driver.clone());
        store.routes.write().await.insert(route1.id, route1.clone());
        store.routes.write().await.insert(route2.id, route2.clone());

        service.bind_driver_to_route(driver.id, route1.id, company_id).await.unwrap();
        service.bind_driver_to_route(driver.id, route2.id, company_id).await.unwrap();

        let routes = store.routes.read().await;
        assert_eq!(routes.get(&route1.id).unwrap().driver_id, None);
        assert_eq!(routes.get(&route2.id).unwrap().driver_id, Some(driver.id));

        let users = store.users.read().await;
        assert_eq!(users.get(&driver.id).unwrap().assigned_route_id, Some(route2.id));
    }

    #[tokio::test]
    async fn test_bus_outside_company_is_not_found() {
        let (store, service, company_id) = setup().await;
        let driver = make_driver(company_id, "Marta Ruiz");
        let bus = make_bus(Uuid::new_v4(), "99"); // otra empresa
        store.users.write().await.insert(driver.id, driver.clone());
        store.buses.write().await.insert(bus.id, bus.clone());

        assert!(matches!(
            service.bind_driver_to_bus(driver.id, bus.id, company_id).await,
            Err(AppError::NotFound(_))
        ));
    }
}
