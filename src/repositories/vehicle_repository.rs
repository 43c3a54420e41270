//! Repositorio de vehículos

use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest, VehicleFilters};
use crate::models::vehicle::{EstadoAuto, Moneda, Vehicle};
use crate::utils::errors::AppError;
use chrono::Utc;
use rust_decimal::Decimal;

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, request: CreateVehicleRequest) -> Result<Vehicle, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (
                id, marca, modelo, anio, precio, precio_compra, moneda,
                descripcion, color, kilometraje, estado, url_compartir, fecha_publicacion
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.marca)
        .bind(request.modelo)
        .bind(request.anio)
        .bind(request.precio)
        .bind(request.precio_compra.unwrap_or(Decimal::ZERO))
        .bind(request.moneda.unwrap_or(Moneda::Ars))
        .bind(request.descripcion)
        .bind(request.color)
        .bind(request.kilometraje)
        .bind(EstadoAuto::Disponible)
        .bind(request.url_compartir)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    /// Listar vehículos aplicando la conjunción de los filtros presentes.
    /// `forzar_disponibles` restringe a estado disponible sin importar el
    /// resto de los filtros (callers no autenticados).
    pub async fn list(
        &self,
        filters: &VehicleFilters,
        forzar_disponibles: bool,
    ) -> Result<Vec<Vehicle>, AppError> {
        let mut query: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT * FROM vehicles WHERE 1 = 1");

        if forzar_disponibles || filters.solo_disponibles.unwrap_or(false) {
            query.push(" AND estado = ");
            query.push_bind(EstadoAuto::Disponible);
        }
        if let Some(marca) = &filters.marca {
            query.push(" AND marca ILIKE ");
            query.push_bind(format!("%{}%", marca));
        }
        if let Some(modelo) = &filters.modelo {
            query.push(" AND modelo ILIKE ");
            query.push_bind(format!("%{}%", modelo));
        }
        if let Some(anio) = filters.anio {
            query.push(" AND anio = ");
            query.push_bind(anio);
        }
        if let Some(precio_min) = filters.precio_min {
            query.push(" AND precio >= ");
            query.push_bind(precio_min);
        }
        if let Some(precio_max) = filters.precio_max {
            query.push(" AND precio <= ");
            query.push_bind(precio_max);
        }
        if let Some(moneda) = filters.moneda {
            query.push(" AND moneda = ");
            query.push_bind(moneda);
        }

        query.push(" ORDER BY fecha_publicacion DESC");

        let vehicles = query.build_query_as::<Vehicle>().fetch_all(&self.pool).await?;

        Ok(vehicles)
    }

    /// Marcas distintas del inventario, para armar los filtros
    pub async fn distinct_marcas(&self) -> Result<Vec<String>, AppError> {
        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT DISTINCT marca FROM vehicles ORDER BY marca")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(|(marca,)| marca).collect())
    }

    pub async fn update(&self, id: Uuid, request: UpdateVehicleRequest) -> Result<Vehicle, AppError> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET marca = $2, modelo = $3, anio = $4, precio = $5, precio_compra = $6,
                moneda = $7, descripcion = $8, color = $9, kilometraje = $10,
                estado = $11, url_compartir = $12
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.marca.unwrap_or(current.marca))
        .bind(request.modelo.unwrap_or(current.modelo))
        .bind(request.anio.unwrap_or(current.anio))
        .bind(request.precio.unwrap_or(current.precio))
        .bind(request.precio_compra.unwrap_or(current.precio_compra))
        .bind(request.moneda.unwrap_or(current.moneda))
        .bind(request.descripcion.or(current.descripcion))
        .bind(request.color.or(current.color))
        .bind(request.kilometraje.or(current.kilometraje))
        .bind(request.estado.unwrap_or(current.estado))
        .bind(request.url_compartir.or(current.url_compartir))
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    /// Un vehículo con ventas asociadas no puede eliminarse
    pub async fn has_sales(&self, id: Uuid) -> Result<bool, AppError> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM sales WHERE vehicle_id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0)
    }

    /// Eliminar el vehículo; las fotos caen en cascada
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
