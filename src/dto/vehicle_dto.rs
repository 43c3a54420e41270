//! DTOs de vehículos

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::photo::VehiclePhoto;
use crate::models::vehicle::{EstadoAuto, Moneda, Vehicle};

/// Request para dar de alta un vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(length(min = 1, max = 50))]
    pub marca: String,

    #[validate(length(min = 1, max = 50))]
    pub modelo: String,

    #[validate(range(min = 1900, max = 2100))]
    pub anio: i32,

    pub precio: Decimal,

    /// Costo de adquisición; solo lo cargan administradores
    pub precio_compra: Option<Decimal>,

    pub moneda: Option<Moneda>,

    pub descripcion: Option<String>,

    #[validate(length(max = 50))]
    pub color: Option<String>,

    pub kilometraje: Option<i32>,

    pub url_compartir: Option<String>,
}

/// Request para actualizar un vehículo existente
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateVehicleRequest {
    #[validate(length(min = 1, max = 50))]
    pub marca: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub modelo: Option<String>,

    #[validate(range(min = 1900, max = 2100))]
    pub anio: Option<i32>,

    pub precio: Option<Decimal>,

    pub precio_compra: Option<Decimal>,

    pub moneda: Option<Moneda>,

    pub descripcion: Option<String>,

    #[validate(length(max = 50))]
    pub color: Option<String>,

    pub kilometraje: Option<i32>,

    pub estado: Option<EstadoAuto>,

    pub url_compartir: Option<String>,
}

/// Filtros del listado de vehículos: la ausencia de un parámetro
/// significa "sin restricción"
#[derive(Debug, Default, Deserialize)]
pub struct VehicleFilters {
    pub marca: Option<String>,
    pub modelo: Option<String>,
    pub anio: Option<i32>,
    pub precio_min: Option<Decimal>,
    pub precio_max: Option<Decimal>,
    pub moneda: Option<Moneda>,
    pub solo_disponibles: Option<bool>,
}

/// Request para registrar una foto (referencia al archivo, no bytes)
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePhotoRequest {
    #[validate(length(min = 1, max = 255))]
    pub ruta_archivo: String,

    pub es_principal: Option<bool>,

    pub orden: Option<i32>,
}

/// Response de vehículo; el precio de compra se omite para quien no es
/// administrador
#[derive(Debug, Serialize)]
pub struct VehicleResponse {
    pub id: Uuid,
    pub marca: String,
    pub modelo: String,
    pub anio: i32,
    pub precio: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precio_compra: Option<Decimal>,
    pub moneda: Moneda,
    pub descripcion: Option<String>,
    pub color: Option<String>,
    pub kilometraje: Option<i32>,
    pub estado: EstadoAuto,
    pub url_compartir: Option<String>,
    pub fecha_publicacion: DateTime<Utc>,
    pub fotos: Vec<VehiclePhoto>,
}

impl VehicleResponse {
    pub fn from_vehicle(vehicle: Vehicle, fotos: Vec<VehiclePhoto>, incluir_costo: bool) -> Self {
        Self {
            id: vehicle.id,
            marca: vehicle.marca,
            modelo: vehicle.modelo,
            anio: vehicle.anio,
            precio: vehicle.precio,
            precio_compra: incluir_costo.then_some(vehicle.precio_compra),
            moneda: vehicle.moneda,
            descripcion: vehicle.descripcion,
            color: vehicle.color,
            kilometraje: vehicle.kilometraje,
            estado: vehicle.estado,
            url_compartir: vehicle.url_compartir,
            fecha_publicacion: vehicle.fecha_publicacion,
            fotos,
        }
    }
}
