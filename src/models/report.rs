//! Modelos de reporting
//!
//! Agregaciones mensuales/anuales de ventas particionadas por moneda.
//! La imputación de cada venta a un período usa la fecha de venta
//! definitiva cuando existe, y la fecha de seña en caso contrario, para
//! no contar dos veces ni adelantar ventas todavía señadas.

use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::vehicle::Moneda;

/// Fila mínima de venta que alimenta los reportes (ventas canceladas
/// se excluyen en la consulta)
#[derive(Debug, Clone, FromRow)]
pub struct SaleReportRow {
    pub precio_venta: Decimal,
    pub precio_compra: Decimal,
    pub moneda: Moneda,
    pub fecha_sena: DateTime<Utc>,
    pub fecha_venta: Option<DateTime<Utc>>,
}

impl SaleReportRow {
    /// La fecha de venta tiene precedencia sobre la fecha de seña
    pub fn fecha_imputacion(&self) -> DateTime<Utc> {
        self.fecha_venta.unwrap_or(self.fecha_sena)
    }
}

/// Montos acumulados particionados por moneda
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct MontoPorMoneda {
    pub ars: Decimal,
    pub usd: Decimal,
}

impl MontoPorMoneda {
    pub fn sumar(&mut self, moneda: Moneda, monto: Decimal) {
        match moneda {
            Moneda::Ars => self.ars += monto,
            Moneda::Usd => self.usd += monto,
        }
    }
}

/// Bucket mensual (mes 1-12) de un año de ventas
#[derive(Debug, Clone, Serialize)]
pub struct BucketMensual {
    pub mes: u32,
    pub cantidad: u32,
    pub ingresos: MontoPorMoneda,
    pub costos: MontoPorMoneda,
    pub ganancia: MontoPorMoneda,
}

impl BucketMensual {
    fn vacio(mes: u32) -> Self {
        Self {
            mes,
            cantidad: 0,
            ingresos: MontoPorMoneda::default(),
            costos: MontoPorMoneda::default(),
            ganancia: MontoPorMoneda::default(),
        }
    }
}

/// Desglose mensual de un año: siempre doce buckets (1-12), con ceros
/// para los meses sin ventas
pub fn desglose_mensual(ventas: &[SaleReportRow], anio: i32) -> Vec<BucketMensual> {
    let mut buckets: Vec<BucketMensual> = (1..=12).map(BucketMensual::vacio).collect();

    for venta in ventas {
        let fecha = venta.fecha_imputacion();
        if fecha.year() != anio {
            continue;
        }
        let bucket = &mut buckets[fecha.month() as usize - 1];
        bucket.cantidad += 1;
        bucket.ingresos.sumar(venta.moneda, venta.precio_venta);
        bucket.costos.sumar(venta.moneda, venta.precio_compra);
        bucket
            .ganancia
            .sumar(venta.moneda, venta.precio_venta - venta.precio_compra);
    }

    buckets
}

/// Rollup por vendedor para un período
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ResumenVendedor {
    pub vendedor_id: Uuid,
    pub nombre: String,
    pub apellido: String,
    pub porcentaje_comision: Decimal,
    pub cantidad_ventas: i64,
    pub ingresos: Decimal,
    pub total_comision: Decimal,
}

/// Marcas más vendidas por cantidad de ventas
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct VentasPorMarca {
    pub marca: String,
    pub cantidad: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn venta(
        precio_venta: i64,
        precio_compra: i64,
        moneda: Moneda,
        fecha_sena: DateTime<Utc>,
        fecha_venta: Option<DateTime<Utc>>,
    ) -> SaleReportRow {
        SaleReportRow {
            precio_venta: Decimal::from(precio_venta),
            precio_compra: Decimal::from(precio_compra),
            moneda,
            fecha_sena,
            fecha_venta,
        }
    }

    fn dia(anio: i32, mes: u32, dia: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(anio, mes, dia, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_anio_sin_ventas_devuelve_doce_buckets_en_cero() {
        let buckets = desglose_mensual(&[], 2026);
        assert_eq!(buckets.len(), 12);
        for (i, bucket) in buckets.iter().enumerate() {
            assert_eq!(bucket.mes as usize, i + 1);
            assert_eq!(bucket.cantidad, 0);
            assert_eq!(bucket.ingresos, MontoPorMoneda::default());
            assert_eq!(bucket.ganancia, MontoPorMoneda::default());
        }
    }

    #[test]
    fn test_fecha_venta_tiene_precedencia_sobre_fecha_sena() {
        // Señada en marzo, finalizada en abril: cuenta en abril
        let ventas = vec![venta(
            1000,
            600,
            Moneda::Ars,
            dia(2026, 3, 10),
            Some(dia(2026, 4, 2)),
        )];

        let buckets = desglose_mensual(&ventas, 2026);
        assert_eq!(buckets[2].cantidad, 0); // marzo
        assert_eq!(buckets[3].cantidad, 1); // abril
        assert_eq!(buckets[3].ganancia.ars, Decimal::from(400));
    }

    #[test]
    fn test_venta_senada_sin_finalizar_cuenta_por_fecha_sena() {
        let ventas = vec![venta(5000, 4000, Moneda::Usd, dia(2026, 1, 15), None)];

        let buckets = desglose_mensual(&ventas, 2026);
        assert_eq!(buckets[0].cantidad, 1);
        assert_eq!(buckets[0].ingresos.usd, Decimal::from(5000));
        assert_eq!(buckets[0].ingresos.ars, Decimal::ZERO);
    }

    #[test]
    fn test_particion_por_moneda() {
        let ventas = vec![
            venta(1000, 600, Moneda::Ars, dia(2026, 2, 5), Some(dia(2026, 2, 20))),
            venta(200, 150, Moneda::Usd, dia(2026, 2, 7), None),
        ];

        let buckets = desglose_mensual(&ventas, 2026);
        let feb = &buckets[1];
        assert_eq!(feb.cantidad, 2);
        assert_eq!(feb.ingresos.ars, Decimal::from(1000));
        assert_eq!(feb.ingresos.usd, Decimal::from(200));
        assert_eq!(feb.costos.ars, Decimal::from(600));
        assert_eq!(feb.ganancia.usd, Decimal::from(50));
    }

    #[test]
    fn test_venta_imputada_fuera_del_anio_se_ignora() {
        // Señada en diciembre 2025 pero finalizada en enero 2026:
        // se imputa a 2026 y no aparece en el desglose de 2025
        let ventas = vec![venta(
            1000,
            600,
            Moneda::Ars,
            dia(2025, 12, 28),
            Some(dia(2026, 1, 3)),
        )];

        let buckets_2025 = desglose_mensual(&ventas, 2025);
        assert!(buckets_2025.iter().all(|b| b.cantidad == 0));

        let buckets_2026 = desglose_mensual(&ventas, 2026);
        assert_eq!(buckets_2026[0].cantidad, 1);
    }
}
