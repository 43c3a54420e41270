//! Modelo de Sale
//!
//! Este módulo contiene el struct Sale, el enum de estado de pago y la
//! máquina de estados del ciclo de vida de una venta, junto con los
//! cálculos financieros (ganancia, comisión, saldo restante).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

use crate::models::vehicle::Moneda;

/// Estado de pago de una venta - mapea al ENUM estado_pago
///
/// Transiciones legales: pendiente → señado → pagado, con cancelado
/// alcanzable solo desde pendiente o señado. Pagado y cancelado son
/// estados terminales.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "estado_pago", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EstadoPago {
    Pendiente,
    Senado,
    Pagado,
    Cancelado,
}

impl EstadoPago {
    /// Pagado y cancelado no admiten ninguna transición de salida
    pub fn es_terminal(&self) -> bool {
        matches!(self, EstadoPago::Pagado | EstadoPago::Cancelado)
    }

    /// Verificar si la transición hacia `destino` es legal
    pub fn puede_transicionar(&self, destino: EstadoPago) -> bool {
        if self.es_terminal() {
            return false;
        }
        match (self, destino) {
            (EstadoPago::Pendiente, EstadoPago::Senado) => true,
            (EstadoPago::Pendiente, EstadoPago::Pagado) => true,
            (EstadoPago::Senado, EstadoPago::Pagado) => true,
            (EstadoPago::Pendiente, EstadoPago::Cancelado) => true,
            (EstadoPago::Senado, EstadoPago::Cancelado) => true,
            _ => false,
        }
    }
}

/// Derivar el estado de pago a partir de la seña acumulada y el precio
pub fn derivar_estado_pago(monto_sena: Decimal, precio_venta: Decimal) -> EstadoPago {
    if monto_sena <= Decimal::ZERO {
        EstadoPago::Pendiente
    } else if monto_sena < precio_venta {
        EstadoPago::Senado
    } else {
        EstadoPago::Pagado
    }
}

/// Ganancia de la venta: precio de venta menos el costo de adquisición
pub fn calcular_ganancia(precio_venta: Decimal, precio_compra: Decimal) -> Decimal {
    precio_venta - precio_compra
}

/// Comisión del vendedor sobre la ganancia; 0 si no hay vendedor asignado
pub fn calcular_comision(ganancia: Decimal, porcentaje_comision: Option<Decimal>) -> Decimal {
    match porcentaje_comision {
        Some(pct) => ganancia * pct / Decimal::from(100),
        None => Decimal::ZERO,
    }
}

/// Saldo restante, nunca negativo
pub fn calcular_saldo(precio_venta: Decimal, monto_sena: Decimal) -> Decimal {
    (precio_venta - monto_sena).max(Decimal::ZERO)
}

/// Sale principal - mapea exactamente a la tabla sales
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Sale {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub vendedor_id: Option<Uuid>,

    // Datos del cliente
    pub cliente_nombre: String,
    pub cliente_apellido: String,
    pub cliente_telefono: Option<String>,
    pub cliente_email: Option<String>,
    pub cliente_dni: Option<String>,

    // Datos financieros
    /// Snapshot del costo de adquisición al momento de crear la venta;
    /// no se recalcula si después cambia el precio de compra del vehículo
    pub precio_compra: Decimal,
    pub precio_venta: Decimal,
    pub moneda: Moneda,
    pub monto_sena: Decimal,
    pub saldo_restante: Decimal,
    pub estado_pago: EstadoPago,

    // Datos de comisión
    pub ganancia: Decimal,
    pub monto_comision: Decimal,
    pub comision_pagada: bool,

    pub observaciones: Option<String>,
    pub fecha_sena: DateTime<Utc>,
    pub fecha_venta: Option<DateTime<Utc>>,
}

impl Sale {
    /// Fecha de imputación para reportes: la fecha de venta definitiva
    /// tiene precedencia sobre la fecha de seña cuando ambas existen
    pub fn fecha_imputacion(&self) -> DateTime<Utc> {
        self.fecha_venta.unwrap_or(self.fecha_sena)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derivar_estado_pago() {
        let precio = Decimal::from(35000);
        assert_eq!(derivar_estado_pago(Decimal::ZERO, precio), EstadoPago::Pendiente);
        assert_eq!(derivar_estado_pago(Decimal::from(10000), precio), EstadoPago::Senado);
        assert_eq!(derivar_estado_pago(Decimal::from(35000), precio), EstadoPago::Pagado);
        assert_eq!(derivar_estado_pago(Decimal::from(40000), precio), EstadoPago::Pagado);
    }

    #[test]
    fn test_calculos_financieros() {
        let ganancia = calcular_ganancia(Decimal::from(35000), Decimal::from(30000));
        assert_eq!(ganancia, Decimal::from(5000));

        // 5% de comisión sobre 5000 = 250
        let comision = calcular_comision(ganancia, Some(Decimal::from(5)));
        assert_eq!(comision, Decimal::from(250));

        // Sin vendedor asignado no hay comisión
        assert_eq!(calcular_comision(ganancia, None), Decimal::ZERO);

        assert_eq!(calcular_saldo(Decimal::from(35000), Decimal::from(10000)), Decimal::from(25000));
        // El saldo nunca queda negativo si se paga de más
        assert_eq!(calcular_saldo(Decimal::from(35000), Decimal::from(40000)), Decimal::ZERO);
    }

    #[test]
    fn test_transiciones_legales() {
        assert!(EstadoPago::Pendiente.puede_transicionar(EstadoPago::Senado));
        assert!(EstadoPago::Pendiente.puede_transicionar(EstadoPago::Pagado));
        assert!(EstadoPago::Pendiente.puede_transicionar(EstadoPago::Cancelado));
        assert!(EstadoPago::Senado.puede_transicionar(EstadoPago::Pagado));
        assert!(EstadoPago::Senado.puede_transicionar(EstadoPago::Cancelado));
    }

    #[test]
    fn test_estados_terminales_no_transicionan() {
        for destino in [
            EstadoPago::Pendiente,
            EstadoPago::Senado,
            EstadoPago::Pagado,
            EstadoPago::Cancelado,
        ] {
            assert!(!EstadoPago::Pagado.puede_transicionar(destino));
            assert!(!EstadoPago::Cancelado.puede_transicionar(destino));
        }
    }

    #[test]
    fn test_no_retroceso_de_senado() {
        assert!(!EstadoPago::Senado.puede_transicionar(EstadoPago::Pendiente));
    }

    #[test]
    fn test_fecha_imputacion() {
        use chrono::TimeZone;
        let sena = Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap();
        let venta = Utc.with_ymd_and_hms(2026, 4, 2, 12, 0, 0).unwrap();

        let mut sale = sale_de_prueba();
        sale.fecha_sena = sena;
        sale.fecha_venta = None;
        assert_eq!(sale.fecha_imputacion(), sena);

        // Con ambas fechas, la fecha de venta tiene precedencia
        sale.fecha_venta = Some(venta);
        assert_eq!(sale.fecha_imputacion(), venta);
    }

    fn sale_de_prueba() -> Sale {
        Sale {
            id: Uuid::new_v4(),
            vehicle_id: Uuid::new_v4(),
            vendedor_id: None,
            cliente_nombre: "Juan".to_string(),
            cliente_apellido: "Pérez".to_string(),
            cliente_telefono: None,
            cliente_email: None,
            cliente_dni: None,
            precio_compra: Decimal::from(30000),
            precio_venta: Decimal::from(35000),
            moneda: Moneda::Ars,
            monto_sena: Decimal::ZERO,
            saldo_restante: Decimal::from(35000),
            estado_pago: EstadoPago::Pendiente,
            ganancia: Decimal::from(5000),
            monto_comision: Decimal::ZERO,
            comision_pagada: false,
            observaciones: None,
            fecha_sena: Utc::now(),
            fecha_venta: None,
        }
    }
}
