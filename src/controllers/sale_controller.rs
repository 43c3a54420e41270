//! Controller de ventas
//!
//! Orquesta el ciclo de vida de la venta: alta con seña, pagos parciales,
//! cancelación y overrides administrativos. Las transiciones en sí viven
//! en el repositorio, dentro de transacciones.

use chrono::{NaiveTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::sale_dto::{
    CreateSaleRequest, RecordPaymentRequest, SaleFilters, SaleResponse, UpdateSaleRequest,
};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::sale::Sale;
use crate::models::user::Rol;
use crate::repositories::sale_repository::{NewSale, SaleRepository};
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::{validation_error, AppError};

pub struct SaleController {
    repository: SaleRepository,
    users: UserRepository,
}

impl SaleController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: SaleRepository::new(pool.clone()),
            users: UserRepository::new(pool),
        }
    }

    pub async fn list(
        &self,
        actor: &AuthenticatedUser,
        filters: SaleFilters,
    ) -> Result<Vec<Sale>, AppError> {
        actor.requiere(Rol::Vendedor)?;

        self.repository.list(&filters).await
    }

    pub async fn get_by_id(
        &self,
        actor: &AuthenticatedUser,
        id: Uuid,
    ) -> Result<SaleResponse, AppError> {
        actor.requiere(Rol::Vendedor)?;

        let venta = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Venta no encontrada".to_string()))?;

        let pagos = self.repository.payments_for_sale(venta.id).await?;

        Ok(SaleResponse { venta, pagos })
    }

    pub async fn create(
        &self,
        actor: &AuthenticatedUser,
        request: CreateSaleRequest,
    ) -> Result<SaleResponse, AppError> {
        actor.requiere(Rol::Vendedor)?;
        request.validate()?;

        if request.precio_venta <= Decimal::ZERO {
            return Err(validation_error("precio_venta", "El precio debe ser mayor a cero"));
        }
        let monto_sena = request.monto_sena.unwrap_or(Decimal::ZERO);
        if monto_sena < Decimal::ZERO {
            return Err(validation_error("monto_sena", "La seña no puede ser negativa"));
        }

        // Un vendedor solo puede asignarse la venta a sí mismo; asignar a
        // terceros es de administradores
        if let Some(vendedor_id) = request.vendedor_id {
            if !actor.es_admin() && vendedor_id != actor.id() {
                return Err(AppError::Forbidden(
                    "Solo un administrador puede asignar la venta a otro vendedor".to_string(),
                ));
            }
        }

        let porcentaje_comision = self.resolver_comision(request.vendedor_id).await?;

        let fecha_sena = match request.fecha_sena {
            Some(fecha) => fecha.and_time(NaiveTime::MIN).and_utc(),
            None => Utc::now(),
        };

        let venta = self
            .repository
            .create(NewSale {
                vehicle_id: request.vehicle_id,
                vendedor_id: request.vendedor_id,
                porcentaje_comision,
                cliente_nombre: request.cliente_nombre,
                cliente_apellido: request.cliente_apellido,
                cliente_telefono: request.cliente_telefono,
                cliente_email: request.cliente_email,
                cliente_dni: request.cliente_dni,
                precio_venta: request.precio_venta,
                monto_sena,
                observaciones: request.observaciones,
                fecha_sena,
            })
            .await?;

        tracing::info!(
            "Venta {} registrada sobre vehículo {} ({:?})",
            venta.id,
            venta.vehicle_id,
            venta.estado_pago
        );

        Ok(SaleResponse { pagos: Vec::new(), venta })
    }

    pub async fn record_payment(
        &self,
        actor: &AuthenticatedUser,
        id: Uuid,
        request: RecordPaymentRequest,
    ) -> Result<SaleResponse, AppError> {
        actor.requiere(Rol::Vendedor)?;
        request.validate()?;

        if request.monto <= Decimal::ZERO {
            return Err(validation_error("monto", "El pago debe ser mayor a cero"));
        }

        let venta = self
            .repository
            .record_payment(id, request.monto, request.metodo_pago, request.comprobante)
            .await?;

        let pagos = self.repository.payments_for_sale(venta.id).await?;

        Ok(SaleResponse { venta, pagos })
    }

    pub async fn cancel(&self, actor: &AuthenticatedUser, id: Uuid) -> Result<Sale, AppError> {
        actor.requiere(Rol::Administrador)?;

        let venta = self.repository.cancel(id).await?;

        tracing::info!("Venta {} cancelada por {}", venta.id, actor.0.username);

        Ok(venta)
    }

    pub async fn mark_paid(&self, actor: &AuthenticatedUser, id: Uuid) -> Result<Sale, AppError> {
        actor.requiere(Rol::Administrador)?;

        self.repository.mark_paid(id).await
    }

    pub async fn update(
        &self,
        actor: &AuthenticatedUser,
        id: Uuid,
        request: UpdateSaleRequest,
    ) -> Result<Sale, AppError> {
        actor.requiere(Rol::Administrador)?;
        request.validate()?;

        if let Some(precio) = request.precio_venta {
            if precio <= Decimal::ZERO {
                return Err(validation_error("precio_venta", "El precio debe ser mayor a cero"));
            }
        }
        if let Some(sena) = request.monto_sena {
            if sena < Decimal::ZERO {
                return Err(validation_error("monto_sena", "La seña no puede ser negativa"));
            }
        }

        let actual = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Venta no encontrada".to_string()))?;

        // La comisión se recalcula con el porcentaje vigente del vendedor
        let porcentaje_comision = self.resolver_comision(actual.vendedor_id).await?;

        self.repository
            .update(
                id,
                request.cliente_nombre,
                request.cliente_apellido,
                request.cliente_telefono,
                request.cliente_email,
                request.cliente_dni,
                request.precio_venta,
                request.monto_sena,
                request.observaciones,
                porcentaje_comision,
            )
            .await
    }

    pub async fn mark_commission_paid(
        &self,
        actor: &AuthenticatedUser,
        id: Uuid,
        pagada: bool,
    ) -> Result<Sale, AppError> {
        actor.requiere(Rol::Administrador)?;

        self.repository.set_comision_pagada(id, pagada).await
    }

    async fn resolver_comision(&self, vendedor_id: Option<Uuid>) -> Result<Option<Decimal>, AppError> {
        let Some(vendedor_id) = vendedor_id else {
            return Ok(None);
        };

        let vendedor = self
            .users
            .find_by_id(vendedor_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vendedor no encontrado".to_string()))?;

        if !vendedor.rol.puede_operar() {
            return Err(AppError::BadRequest(
                "El vendedor asignado no está habilitado".to_string(),
            ));
        }

        Ok(Some(vendedor.porcentaje_comision))
    }
}
