//! Repositorio de fotos de vehículos
//!
//! Las operaciones que tocan la marca "principal" corren dentro de una
//! transacción para garantizar a lo sumo una foto principal por vehículo.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::photo::VehiclePhoto;
use crate::utils::errors::AppError;

pub struct PhotoRepository {
    pool: PgPool,
}

impl PhotoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_by_vehicle(&self, vehicle_id: Uuid) -> Result<Vec<VehiclePhoto>, AppError> {
        let photos = sqlx::query_as::<_, VehiclePhoto>(
            "SELECT * FROM vehicle_photos WHERE vehicle_id = $1 ORDER BY orden, fecha_subida",
        )
        .bind(vehicle_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(photos)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<VehiclePhoto>, AppError> {
        let photo = sqlx::query_as::<_, VehiclePhoto>("SELECT * FROM vehicle_photos WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(photo)
    }

    pub async fn create(
        &self,
        vehicle_id: Uuid,
        ruta_archivo: String,
        es_principal: bool,
        orden: i32,
    ) -> Result<VehiclePhoto, AppError> {
        let mut tx = self.pool.begin().await?;

        if es_principal {
            sqlx::query("UPDATE vehicle_photos SET es_principal = FALSE WHERE vehicle_id = $1")
                .bind(vehicle_id)
                .execute(&mut *tx)
                .await?;
        }

        let photo = sqlx::query_as::<_, VehiclePhoto>(
            r#"
            INSERT INTO vehicle_photos (id, vehicle_id, ruta_archivo, es_principal, orden, fecha_subida)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(vehicle_id)
        .bind(ruta_archivo)
        .bind(es_principal)
        .bind(orden)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(photo)
    }

    /// Marcar una foto como principal, desmarcando la anterior en la
    /// misma transacción
    pub async fn set_principal(&self, photo_id: Uuid, vehicle_id: Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE vehicle_photos SET es_principal = FALSE WHERE vehicle_id = $1")
            .bind(vehicle_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("UPDATE vehicle_photos SET es_principal = TRUE WHERE id = $1")
            .bind(photo_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }

    /// Eliminar la foto; si era la principal, promover la primera restante
    pub async fn delete(&self, photo_id: Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let photo = sqlx::query_as::<_, VehiclePhoto>(
            "SELECT * FROM vehicle_photos WHERE id = $1 FOR UPDATE",
        )
        .bind(photo_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Foto no encontrada".to_string()))?;

        sqlx::query("DELETE FROM vehicle_photos WHERE id = $1")
            .bind(photo_id)
            .execute(&mut *tx)
            .await?;

        if photo.es_principal {
            sqlx::query(
                r#"
                UPDATE vehicle_photos SET es_principal = TRUE
                WHERE id = (
                    SELECT id FROM vehicle_photos
                    WHERE vehicle_id = $1
                    ORDER BY orden, fecha_subida
                    LIMIT 1
                )
                "#,
            )
            .bind(photo.vehicle_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(())
    }
}
