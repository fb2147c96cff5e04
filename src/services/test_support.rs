//! Fixtures compartidas para los tests de servicios

use chrono::Utc;
use uuid::Uuid;

use crate::models::auth::{UserInfo, UserRole};
use crate::models::bus::{Bus, BusStatus};
use crate::models::route::{Route, RouteStop};
use crate::models::school::School;
use crate::models::student::Student;
use crate::models::user::User;

pub fn make_user(company_id: Uuid, role: UserRole, name: &str) -> User {
    User {
        id: Uuid::new_v4(),
        company_id,
        full_name: name.to_string(),
        email: None,
        role,
        is_on_duty: false,
        duty_start_time: None,
        assigned_route_id: None,
        fuel_level: None,
        interior_clean: None,
        exterior_clean: None,
        check_in_time: None,
        created_at: Utc::now(),
    }
}

pub fn make_driver(company_id: Uuid, name: &str) -> User {
    make_user(company_id, UserRole::Driver, name)
}

pub fn make_bus(company_id: Uuid, number: &str) -> Bus {
    Bus {
        id: Uuid::new_v4(),
        company_id,
        bus_number: number.to_string(),
        driver_id: None,
        status: BusStatus::Idle,
        current_route_id: None,
        latitude: None,
        longitude: None,
        speed: None,
        fuel_level: None,
        created_at: Utc::now(),
    }
}

pub fn make_route(company_id: Uuid, name: &str) -> Route {
    Route {
        id: Uuid::new_v4(),
        company_id,
        name: name.to_string(),
        driver_id: None,
        school_ids: vec![],
        created_at: Utc::now(),
    }
}

pub fn make_stop(route_id: Uuid, order: i32, address: &str) -> RouteStop {
    RouteStop {
        id: Uuid::new_v4(),
        route_id,
        address: address.to_string(),
        latitude: None,
        longitude: None,
        stop_order: order,
        scheduled_time: None,
        created_at: Utc::now(),
    }
}

pub fn make_school(company_id: Uuid, name: &str) -> School {
    School {
        id: Uuid::new_v4(),
        company_id,
        name: name.to_string(),
        address: "Calle Escuela 10".to_string(),
        created_at: Utc::now(),
    }
}

pub fn make_student(company_id: Uuid, route_id: Uuid, stop_id: Uuid, name: &str) -> Student {
    Student {
        id: Uuid::new_v4(),
        company_id,
        full_name: name.to_string(),
        route_id: Some(route_id),
        route_stop_id: Some(stop_id),
        created_at: Utc::now(),
    }
}

pub fn caller_of(user: &User) -> UserInfo {
    UserInfo {
        user_id: user.id,
        company_id: user.company_id,
        role: user.role,
    }
}
