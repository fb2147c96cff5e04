//! Roles e identidad autenticada
//!
//! Este módulo define los roles de usuario y la identidad que el
//! middleware de auth inyecta en cada request. El login vive fuera
//! de este servicio; aquí solo se consume la identidad ya validada.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Rol de usuario - mapea al ENUM user_role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Driver,
    Guardian,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRole::Admin => write!(f, "admin"),
            UserRole::Driver => write!(f, "driver"),
            UserRole::Guardian => write!(f, "guardian"),
        }
    }
}

/// Identidad del caller autenticado, extraída del JWT
#[derive(Debug, Clone)]
pub struct UserInfo {
    pub user_id: Uuid,
    pub company_id: Uuid,
    pub role: UserRole,
}
