//! DTOs de reporting

use serde::{Deserialize, Serialize};

use crate::models::report::{BucketMensual, MontoPorMoneda, ResumenVendedor, VentasPorMarca};

/// Parámetros de período: año obligatorio para el desglose, mes opcional
#[derive(Debug, Default, Deserialize)]
pub struct PeriodoParams {
    pub anio: Option<i32>,
    pub mes: Option<u32>,
}

/// Desglose mensual de un año (siempre doce buckets)
#[derive(Debug, Serialize)]
pub struct ReporteMensualResponse {
    pub anio: i32,
    pub meses: Vec<BucketMensual>,
}

/// Resumen general del negocio
#[derive(Debug, Serialize)]
pub struct ResumenGeneralResponse {
    pub total_autos: i64,
    pub autos_disponibles: i64,
    pub total_ventas: i64,
    pub ventas_mes_actual: i64,
    pub ingresos_totales: MontoPorMoneda,
    pub ganancia_total: MontoPorMoneda,
}

/// Comisiones por vendedor para un período
#[derive(Debug, Serialize)]
pub struct ComisionesResponse {
    pub anio: i32,
    pub mes: Option<u32>,
    pub vendedores: Vec<ResumenVendedor>,
}

/// Marcas más vendidas
#[derive(Debug, Serialize)]
pub struct MarcasResponse {
    pub marcas: Vec<VentasPorMarca>,
}
