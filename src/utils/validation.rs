//! Utilidades de validación
//!
//! Funciones helper de validación compartidas por los controllers.
//! Los montos llegan tipados como `Decimal` vía serde, por lo que un valor
//! no numérico se rechaza en la deserialización y nunca se coacciona a cero.

use rust_decimal::Decimal;
use validator::ValidationError;

/// Validar que un monto no sea negativo
pub fn validate_non_negative(value: Decimal) -> Result<(), ValidationError> {
    if value < Decimal::ZERO {
        let mut error = ValidationError::new("non_negative");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar porcentaje de comisión (0 a 100)
pub fn validate_percentage(value: Decimal) -> Result<(), ValidationError> {
    if value < Decimal::ZERO || value > Decimal::from(100) {
        let mut error = ValidationError::new("percentage");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative(Decimal::ZERO).is_ok());
        assert!(validate_non_negative(Decimal::from(100)).is_ok());
        assert!(validate_non_negative(Decimal::from_str("-0.01").unwrap()).is_err());
    }

    #[test]
    fn test_validate_percentage() {
        assert!(validate_percentage(Decimal::from(5)).is_ok());
        assert!(validate_percentage(Decimal::from(100)).is_ok());
        assert!(validate_percentage(Decimal::from(101)).is_err());
        assert!(validate_percentage(Decimal::from(-1)).is_err());
    }
}
