//! Modelo de VehiclePhoto
//!
//! Las fotos guardan únicamente la referencia al archivo; los bytes
//! viven en el storage externo.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Foto de un vehículo - mapea a la tabla vehicle_photos
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct VehiclePhoto {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub ruta_archivo: String,
    /// A lo sumo una foto principal por vehículo (se garantiza en la transacción)
    pub es_principal: bool,
    pub orden: i32,
    pub fecha_subida: DateTime<Utc>,
}
