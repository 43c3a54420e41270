//! Modelo de Payment
//!
//! Registro de pagos parciales de una venta (libro de pagos).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Pago parcial - mapea a la tabla payments
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Payment {
    pub id: Uuid,
    pub sale_id: Uuid,
    pub fecha: DateTime<Utc>,
    pub monto: Decimal,
    pub metodo_pago: Option<String>,
    pub comprobante: Option<String>,
}
