//! DTOs de ventas y pagos

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::payment::Payment;
use crate::models::sale::{EstadoPago, Sale};

/// Request para registrar una venta sobre un vehículo disponible
#[derive(Debug, Deserialize, Validate)]
pub struct CreateSaleRequest {
    pub vehicle_id: Uuid,

    /// Fecha de la seña; por defecto, hoy
    pub fecha_sena: Option<NaiveDate>,

    #[validate(length(min = 1, max = 100))]
    pub cliente_nombre: String,

    #[validate(length(min = 1, max = 100))]
    pub cliente_apellido: String,

    #[validate(length(max = 20))]
    pub cliente_telefono: Option<String>,

    #[validate(email)]
    pub cliente_email: Option<String>,

    #[validate(length(max = 20))]
    pub cliente_dni: Option<String>,

    pub precio_venta: Decimal,

    pub monto_sena: Option<Decimal>,

    /// Vendedor asignado; un vendedor solo puede asignarse a sí mismo
    pub vendedor_id: Option<Uuid>,

    pub observaciones: Option<String>,
}

/// Request para registrar un pago parcial
#[derive(Debug, Deserialize, Validate)]
pub struct RecordPaymentRequest {
    pub monto: Decimal,

    #[validate(length(max = 50))]
    pub metodo_pago: Option<String>,

    #[validate(length(max = 255))]
    pub comprobante: Option<String>,
}

/// Request para editar datos de una venta no terminal
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateSaleRequest {
    #[validate(length(min = 1, max = 100))]
    pub cliente_nombre: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub cliente_apellido: Option<String>,

    #[validate(length(max = 20))]
    pub cliente_telefono: Option<String>,

    #[validate(email)]
    pub cliente_email: Option<String>,

    #[validate(length(max = 20))]
    pub cliente_dni: Option<String>,

    pub precio_venta: Option<Decimal>,

    pub monto_sena: Option<Decimal>,

    pub observaciones: Option<String>,
}

/// Filtros del listado de ventas
#[derive(Debug, Default, Deserialize)]
pub struct SaleFilters {
    pub mes: Option<u32>,
    pub anio: Option<i32>,
    pub estado: Option<EstadoPago>,
    pub vendedor_id: Option<Uuid>,
}

/// Response de venta con su libro de pagos
#[derive(Debug, Serialize)]
pub struct SaleResponse {
    #[serde(flatten)]
    pub venta: Sale,
    pub pagos: Vec<Payment>,
}
