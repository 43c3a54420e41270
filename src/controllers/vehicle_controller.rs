//! Controller de vehículos y fotos
//!
//! El catálogo es público: los visitantes solo ven unidades disponibles
//! y nunca el costo de adquisición. La gestión del inventario requiere
//! una cuenta habilitada; el costo y la baja son de administradores.

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::vehicle_dto::{
    CreatePhotoRequest, CreateVehicleRequest, UpdateVehicleRequest, VehicleFilters,
    VehicleResponse,
};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::user::{Rol, User};
use crate::repositories::photo_repository::PhotoRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::{validation_error, AppError};
use crate::utils::validation::validate_non_negative;

pub struct VehicleController {
    repository: VehicleRepository,
    photos: PhotoRepository,
}

fn es_admin(viewer: Option<&User>) -> bool {
    viewer.map(|u| u.rol.cubre(Rol::Administrador)).unwrap_or(false)
}

impl VehicleController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: VehicleRepository::new(pool.clone()),
            photos: PhotoRepository::new(pool),
        }
    }

    pub async fn list(
        &self,
        filters: VehicleFilters,
        viewer: Option<&User>,
    ) -> Result<Vec<VehicleResponse>, AppError> {
        // Sin sesión solo se listan unidades disponibles, ignore lo que
        // pidan los filtros
        let forzar_disponibles = viewer.map(|u| !u.rol.puede_operar()).unwrap_or(true);
        let incluir_costo = es_admin(viewer);

        let vehicles = self.repository.list(&filters, forzar_disponibles).await?;

        let mut responses = Vec::with_capacity(vehicles.len());
        for vehicle in vehicles {
            let fotos = self.photos.list_by_vehicle(vehicle.id).await?;
            responses.push(VehicleResponse::from_vehicle(vehicle, fotos, incluir_costo));
        }

        Ok(responses)
    }

    pub async fn get_by_id(
        &self,
        id: Uuid,
        viewer: Option<&User>,
    ) -> Result<VehicleResponse, AppError> {
        let vehicle = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        let fotos = self.photos.list_by_vehicle(vehicle.id).await?;

        Ok(VehicleResponse::from_vehicle(vehicle, fotos, es_admin(viewer)))
    }

    pub async fn distinct_marcas(&self) -> Result<Vec<String>, AppError> {
        self.repository.distinct_marcas().await
    }

    pub async fn create(
        &self,
        actor: &AuthenticatedUser,
        request: CreateVehicleRequest,
    ) -> Result<VehicleResponse, AppError> {
        actor.requiere(Rol::Vendedor)?;
        request.validate()?;

        validar_precios(Some(request.precio), request.precio_compra)?;

        // El costo de adquisición solo lo cargan administradores
        if request.precio_compra.is_some() && !actor.es_admin() {
            return Err(AppError::Forbidden(
                "Solo un administrador puede cargar el precio de compra".to_string(),
            ));
        }

        let vehicle = self.repository.create(request).await?;

        tracing::info!("Vehículo {} {} dado de alta", vehicle.marca, vehicle.modelo);

        Ok(VehicleResponse::from_vehicle(vehicle, Vec::new(), actor.es_admin()))
    }

    pub async fn update(
        &self,
        actor: &AuthenticatedUser,
        id: Uuid,
        request: UpdateVehicleRequest,
    ) -> Result<VehicleResponse, AppError> {
        actor.requiere(Rol::Vendedor)?;
        request.validate()?;

        validar_precios(request.precio, request.precio_compra)?;

        if request.precio_compra.is_some() && !actor.es_admin() {
            return Err(AppError::Forbidden(
                "Solo un administrador puede modificar el precio de compra".to_string(),
            ));
        }

        // El estado normalmente lo mueve el ciclo de venta; forzarlo a
        // mano es un override administrativo
        if request.estado.is_some() && !actor.es_admin() {
            return Err(AppError::Forbidden(
                "Solo un administrador puede cambiar el estado del vehículo".to_string(),
            ));
        }

        let vehicle = self.repository.update(id, request).await?;
        let fotos = self.photos.list_by_vehicle(vehicle.id).await?;

        Ok(VehicleResponse::from_vehicle(vehicle, fotos, actor.es_admin()))
    }

    /// La baja física solo procede sin ventas asociadas; el historial de
    /// ventas manda
    pub async fn delete(&self, actor: &AuthenticatedUser, id: Uuid) -> Result<(), AppError> {
        actor.requiere(Rol::Administrador)?;

        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        if self.repository.has_sales(id).await? {
            return Err(AppError::Conflict(
                "El vehículo tiene ventas asociadas y no puede eliminarse".to_string(),
            ));
        }

        self.repository.delete(id).await?;

        Ok(())
    }

    pub async fn add_photo(
        &self,
        actor: &AuthenticatedUser,
        vehicle_id: Uuid,
        request: CreatePhotoRequest,
    ) -> Result<crate::models::photo::VehiclePhoto, AppError> {
        actor.requiere(Rol::Vendedor)?;
        request.validate()?;

        self.repository
            .find_by_id(vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        let existentes = self.photos.list_by_vehicle(vehicle_id).await?;
        // La primera foto de un vehículo queda como principal
        let es_principal = request.es_principal.unwrap_or(existentes.is_empty());
        let orden = request.orden.unwrap_or(existentes.len() as i32);

        self.photos
            .create(vehicle_id, request.ruta_archivo, es_principal, orden)
            .await
    }

    pub async fn set_photo_principal(
        &self,
        actor: &AuthenticatedUser,
        photo_id: Uuid,
    ) -> Result<(), AppError> {
        actor.requiere(Rol::Vendedor)?;

        let photo = self
            .photos
            .find_by_id(photo_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Foto no encontrada".to_string()))?;

        self.photos.set_principal(photo.id, photo.vehicle_id).await
    }

    pub async fn delete_photo(
        &self,
        actor: &AuthenticatedUser,
        photo_id: Uuid,
    ) -> Result<(), AppError> {
        actor.requiere(Rol::Vendedor)?;

        self.photos.delete(photo_id).await
    }
}

fn validar_precios(precio: Option<Decimal>, precio_compra: Option<Decimal>) -> Result<(), AppError> {
    if let Some(precio) = precio {
        if precio <= Decimal::ZERO {
            return Err(validation_error("precio", "El precio debe ser mayor a cero"));
        }
    }
    if let Some(costo) = precio_compra {
        validate_non_negative(costo)
            .map_err(|_| validation_error("precio_compra", "El costo no puede ser negativo"))?;
    }
    Ok(())
}
