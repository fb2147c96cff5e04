//! Middleware de autenticación
//!
//! Extractor de axum que valida el Bearer token y produce la identidad
//! tipada del caller. El login y la emisión de tokens viven en el
//! servicio de sesión, fuera de este core.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::models::auth::UserInfo;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::{extract_token_from_header, verify_token, JwtConfig};

/// Identidad autenticada extraída del header Authorization
pub struct AuthenticatedUser(pub UserInfo);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("Falta el header Authorization".to_string()))?;

        let token = extract_token_from_header(auth_header)?;
        let claims = verify_token(token, &JwtConfig::from(&state.config))?;

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::Jwt("El claim 'sub' no es un UUID válido".to_string()))?;
        let company_id = Uuid::parse_str(&claims.company_id)
            .map_err(|_| AppError::Jwt("El claim 'company_id' no es un UUID válido".to_string()))?;

        Ok(AuthenticatedUser(UserInfo {
            user_id,
            company_id,
            role: claims.role,
        }))
    }
}
