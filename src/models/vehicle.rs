//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle y los enums de estado/moneda.
//! Mapea exactamente al schema PostgreSQL con primary key 'id'.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Estado del vehículo - mapea al ENUM estado_auto
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "estado_auto", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EstadoAuto {
    Disponible,
    Reservado,
    Vendido,
    Reparacion,
    Baja,
}

/// Moneda soportada - mapea al ENUM moneda
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "moneda", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Moneda {
    Ars,
    Usd,
}

/// Vehicle principal - mapea exactamente a la tabla vehicles
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub marca: String,
    pub modelo: String,
    pub anio: i32,
    pub precio: Decimal,
    /// Precio de compra - visible solo para administradores
    pub precio_compra: Decimal,
    pub moneda: Moneda,
    pub descripcion: Option<String>,
    pub color: Option<String>,
    pub kilometraje: Option<i32>,
    pub estado: EstadoAuto,
    pub url_compartir: Option<String>,
    pub fecha_publicacion: DateTime<Utc>,
}

impl Vehicle {
    /// Un vehículo solo admite una venta nueva si está disponible
    pub fn esta_disponible(&self) -> bool {
        self.estado == EstadoAuto::Disponible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disponibilidad() {
        let mut v = Vehicle {
            id: Uuid::new_v4(),
            marca: "Toyota".to_string(),
            modelo: "Corolla".to_string(),
            anio: 2022,
            precio: Decimal::from(35000),
            precio_compra: Decimal::from(30000),
            moneda: Moneda::Ars,
            descripcion: None,
            color: None,
            kilometraje: Some(15000),
            estado: EstadoAuto::Disponible,
            url_compartir: None,
            fecha_publicacion: Utc::now(),
        };
        assert!(v.esta_disponible());

        v.estado = EstadoAuto::Reservado;
        assert!(!v.esta_disponible());

        v.estado = EstadoAuto::Vendido;
        assert!(!v.esta_disponible());
    }
}
