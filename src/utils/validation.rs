//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! del formulario de check-in.

use validator::ValidationError;

use crate::models::bus::FuelLevel;

/// Validar y convertir string a nivel de combustible
pub fn validate_fuel_level(value: &str) -> Result<FuelLevel, ValidationError> {
    value.parse::<FuelLevel>().map_err(|_| {
        let mut error = ValidationError::new("fuel_level");
        error.add_param("value".into(), &value.to_string());
        error.add_param(
            "expected".into(),
            &"full | three_quarters | half | quarter | empty".to_string(),
        );
        error
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_fuel_level() {
        assert_eq!(validate_fuel_level("Full").unwrap(), FuelLevel::Full);
        assert_eq!(validate_fuel_level("three_quarters").unwrap(), FuelLevel::ThreeQuarters);
        assert_eq!(validate_fuel_level("3/4").unwrap(), FuelLevel::ThreeQuarters);
        assert!(validate_fuel_level("lleno").is_err());
        assert!(validate_fuel_level("").is_err());
    }
}
