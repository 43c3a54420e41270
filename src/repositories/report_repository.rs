//! Repositorio de reportes
//!
//! Las filas crudas del año se agregan en memoria con las funciones del
//! modelo de reporting; los rollups por vendedor y por marca se resuelven
//! con GROUP BY en la base.

use sqlx::PgPool;

use crate::models::report::{ResumenVendedor, SaleReportRow, VentasPorMarca};
use crate::utils::errors::AppError;

pub struct ReportRepository {
    pool: PgPool,
}

impl ReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Filas de venta imputadas al año dado, excluyendo canceladas.
    /// La imputación usa la fecha de venta definitiva cuando existe y la
    /// fecha de seña en caso contrario.
    pub async fn fetch_year_rows(&self, anio: i32) -> Result<Vec<SaleReportRow>, AppError> {
        let rows = sqlx::query_as::<_, SaleReportRow>(
            r#"
            SELECT precio_venta, precio_compra, moneda, fecha_sena, fecha_venta
            FROM sales
            WHERE estado_pago != 'cancelado'
              AND EXTRACT(YEAR FROM COALESCE(fecha_venta, fecha_sena)) = $1
            "#,
        )
        .bind(anio)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Rollup de comisiones por vendedor para un año y, opcionalmente,
    /// un mes puntual
    pub async fn resumen_vendedores(
        &self,
        anio: i32,
        mes: Option<u32>,
    ) -> Result<Vec<ResumenVendedor>, AppError> {
        let vendedores = sqlx::query_as::<_, ResumenVendedor>(
            r#"
            SELECT u.id AS vendedor_id, u.nombre, u.apellido, u.porcentaje_comision,
                   COUNT(s.id) AS cantidad_ventas,
                   COALESCE(SUM(s.precio_venta), 0) AS ingresos,
                   COALESCE(SUM(s.monto_comision), 0) AS total_comision
            FROM users u
            JOIN sales s ON s.vendedor_id = u.id
            WHERE s.estado_pago != 'cancelado'
              AND EXTRACT(YEAR FROM COALESCE(s.fecha_venta, s.fecha_sena)) = $1
              AND ($2::int IS NULL OR EXTRACT(MONTH FROM COALESCE(s.fecha_venta, s.fecha_sena)) = $2)
            GROUP BY u.id, u.nombre, u.apellido, u.porcentaje_comision
            ORDER BY total_comision DESC
            "#,
        )
        .bind(anio)
        .bind(mes.map(|m| m as i32))
        .fetch_all(&self.pool)
        .await?;

        Ok(vendedores)
    }

    /// Marcas ordenadas por cantidad de ventas no canceladas
    pub async fn ventas_por_marca(&self) -> Result<Vec<VentasPorMarca>, AppError> {
        let marcas = sqlx::query_as::<_, VentasPorMarca>(
            r#"
            SELECT v.marca, COUNT(s.id) AS cantidad
            FROM sales s
            JOIN vehicles v ON v.id = s.vehicle_id
            WHERE s.estado_pago != 'cancelado'
            GROUP BY v.marca
            ORDER BY cantidad DESC, v.marca
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(marcas)
    }

    pub async fn count_vehicles(&self) -> Result<(i64, i64), AppError> {
        let result: (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*), COUNT(*) FILTER (WHERE estado = 'disponible') FROM vehicles",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(result)
    }

    pub async fn count_sales(&self) -> Result<i64, AppError> {
        let result: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM sales WHERE estado_pago != 'cancelado'")
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0)
    }

    /// Ventas imputadas al mes calendario dado
    pub async fn count_sales_in_month(&self, anio: i32, mes: u32) -> Result<i64, AppError> {
        let result: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*)
            FROM sales
            WHERE estado_pago != 'cancelado'
              AND EXTRACT(YEAR FROM COALESCE(fecha_venta, fecha_sena)) = $1
              AND EXTRACT(MONTH FROM COALESCE(fecha_venta, fecha_sena)) = $2
            "#,
        )
        .bind(anio)
        .bind(mes as i32)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    /// Todas las filas no canceladas, para los totales históricos del
    /// resumen general
    pub async fn fetch_all_rows(&self) -> Result<Vec<SaleReportRow>, AppError> {
        let rows = sqlx::query_as::<_, SaleReportRow>(
            r#"
            SELECT precio_venta, precio_compra, moneda, fecha_sena, fecha_venta
            FROM sales
            WHERE estado_pago != 'cancelado'
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
