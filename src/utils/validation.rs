//! Utilidades de validación
//!
//! Validaciones que no se expresan con los atributos de `validator` en los
//! DTOs: importes positivos y etiquetas de estado libres.

use serde::Serialize;
use validator::{ValidationError, ValidationErrors};

use crate::utils::errors::AppError;

/// Largo máximo de una etiqueta de estado
pub const MAX_STATUS_LENGTH: usize = 50;

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar longitud mínima y máxima
pub fn validate_length(value: &str, min: usize, max: usize) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len < min || len > max {
        let mut error = ValidationError::new("length");
        error.add_param("min".into(), &min);
        error.add_param("max".into(), &max);
        error.add_param("actual".into(), &len);
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor sea positivo
pub fn validate_positive<T: PartialOrd + std::fmt::Display + num_traits::Zero + Serialize>(
    value: T,
) -> Result<(), ValidationError> {
    if value <= T::zero() {
        let mut error = ValidationError::new("positive");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor no supere un máximo
pub fn validate_max<T: PartialOrd + Serialize>(value: T, max: T) -> Result<(), ValidationError> {
    if value > max {
        let mut error = ValidationError::new("range");
        error.add_param("max".into(), &max);
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Etiqueta de estado: cualquier texto no vacío de largo razonable
pub fn validate_status_label(value: &str) -> Result<(), ValidationError> {
    validate_not_empty(value)?;
    validate_length(value.trim(), 1, MAX_STATUS_LENGTH)
}

/// Envuelve un error de campo en `AppError::Validation`
pub fn field_error(field: &'static str, error: ValidationError) -> AppError {
    let mut errors = ValidationErrors::new();
    errors.add(field, error);
    AppError::Validation(errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_validate_positive_decimal() {
        assert!(validate_positive(Decimal::new(103725, 2)).is_ok());
        assert!(validate_positive(Decimal::ZERO).is_err());
        assert!(validate_positive(Decimal::from(-5)).is_err());
    }

    #[test]
    fn test_validate_max() {
        assert!(validate_max(Decimal::from(10), Decimal::from(10)).is_ok());
        assert!(validate_max(Decimal::from(11), Decimal::from(10)).is_err());
    }

    #[test]
    fn test_validate_status_label() {
        assert!(validate_status_label("in_production").is_ok());
        assert!(validate_status_label("on hold (waiting parts)").is_ok());
        assert!(validate_status_label("   ").is_err());
        assert!(validate_status_label(&"x".repeat(MAX_STATUS_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_field_error_maps_to_validation() {
        let err = field_error("status", ValidationError::new("not_empty"));
        assert!(matches!(err, AppError::Validation(_)));
    }
}
