//! Controller de reportes
//!
//! Desglose mensual por año, resumen general del negocio, comisiones por
//! vendedor y ranking de marcas. Las ventas canceladas no cuentan.

use chrono::{Datelike, Utc};
use sqlx::PgPool;

use crate::dto::report_dto::{
    ComisionesResponse, MarcasResponse, PeriodoParams, ReporteMensualResponse,
    ResumenGeneralResponse,
};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::report::{desglose_mensual, MontoPorMoneda};
use crate::models::user::Rol;
use crate::repositories::report_repository::ReportRepository;
use crate::utils::errors::{validation_error, AppError};

pub struct ReportController {
    repository: ReportRepository,
}

impl ReportController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ReportRepository::new(pool),
        }
    }

    /// Desglose mensual de un año: siempre doce buckets, con ceros para
    /// los meses sin ventas
    pub async fn mensual(
        &self,
        actor: &AuthenticatedUser,
        params: PeriodoParams,
    ) -> Result<ReporteMensualResponse, AppError> {
        actor.requiere(Rol::Vendedor)?;

        let anio = params.anio.unwrap_or_else(|| Utc::now().year());
        let rows = self.repository.fetch_year_rows(anio).await?;

        Ok(ReporteMensualResponse {
            anio,
            meses: desglose_mensual(&rows, anio),
        })
    }

    pub async fn resumen_general(
        &self,
        actor: &AuthenticatedUser,
    ) -> Result<ResumenGeneralResponse, AppError> {
        actor.requiere(Rol::Vendedor)?;

        let (total_autos, autos_disponibles) = self.repository.count_vehicles().await?;
        let total_ventas = self.repository.count_sales().await?;

        let hoy = Utc::now();
        let ventas_mes_actual = self
            .repository
            .count_sales_in_month(hoy.year(), hoy.month())
            .await?;

        let mut ingresos_totales = MontoPorMoneda::default();
        let mut ganancia_total = MontoPorMoneda::default();
        for row in self.repository.fetch_all_rows().await? {
            ingresos_totales.sumar(row.moneda, row.precio_venta);
            ganancia_total.sumar(row.moneda, row.precio_venta - row.precio_compra);
        }

        Ok(ResumenGeneralResponse {
            total_autos,
            autos_disponibles,
            total_ventas,
            ventas_mes_actual,
            ingresos_totales,
            ganancia_total,
        })
    }

    /// Comisiones por vendedor; reservado a administradores
    pub async fn comisiones(
        &self,
        actor: &AuthenticatedUser,
        params: PeriodoParams,
    ) -> Result<ComisionesResponse, AppError> {
        actor.requiere(Rol::Administrador)?;

        if let Some(mes) = params.mes {
            if !(1..=12).contains(&mes) {
                return Err(validation_error("mes", "El mes debe estar entre 1 y 12"));
            }
        }

        let anio = params.anio.unwrap_or_else(|| Utc::now().year());
        let vendedores = self.repository.resumen_vendedores(anio, params.mes).await?;

        Ok(ComisionesResponse {
            anio,
            mes: params.mes,
            vendedores,
        })
    }

    pub async fn marcas(&self, actor: &AuthenticatedUser) -> Result<MarcasResponse, AppError> {
        actor.requiere(Rol::Vendedor)?;

        let marcas = self.repository.ventas_por_marca().await?;

        Ok(MarcasResponse { marcas })
    }
}
