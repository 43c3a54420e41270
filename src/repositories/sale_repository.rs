//! Repositorio de ventas y pagos
//!
//! Toda transición que toca más de una fila (venta + vehículo, o pago +
//! venta + vehículo) corre dentro de una única transacción: un corte a
//! mitad de camino nunca deja un auto vendido que figure disponible ni
//! al revés.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};
use uuid::Uuid;

use crate::dto::sale_dto::SaleFilters;
use crate::models::payment::Payment;
use crate::models::sale::{
    calcular_comision, calcular_ganancia, calcular_saldo, derivar_estado_pago, EstadoPago, Sale,
};
use crate::models::vehicle::{EstadoAuto, Vehicle};
use crate::utils::errors::AppError;

/// Datos ya validados para crear una venta
pub struct NewSale {
    pub vehicle_id: Uuid,
    pub vendedor_id: Option<Uuid>,
    pub porcentaje_comision: Option<Decimal>,
    pub cliente_nombre: String,
    pub cliente_apellido: String,
    pub cliente_telefono: Option<String>,
    pub cliente_email: Option<String>,
    pub cliente_dni: Option<String>,
    pub precio_venta: Decimal,
    pub monto_sena: Decimal,
    pub observaciones: Option<String>,
    pub fecha_sena: DateTime<Utc>,
}

pub struct SaleRepository {
    pool: PgPool,
}

impl SaleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Registrar una venta: verifica disponibilidad bajo lock, toma el
    /// snapshot del costo, deriva el estado de pago y deja el vehículo
    /// en reservado (seña parcial o pendiente) o vendido (pago completo)
    pub async fn create(&self, new_sale: NewSale) -> Result<Sale, AppError> {
        let mut tx = self.pool.begin().await?;

        // Lock del vehículo para que dos ventas concurrentes no pasen la
        // verificación de disponibilidad a la vez
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1 FOR UPDATE")
            .bind(new_sale.vehicle_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        if !vehicle.esta_disponible() {
            return Err(AppError::BadRequest(
                "El vehículo no está disponible para la venta".to_string(),
            ));
        }

        let precio_compra = vehicle.precio_compra;
        let ganancia = calcular_ganancia(new_sale.precio_venta, precio_compra);
        let monto_comision = calcular_comision(ganancia, new_sale.porcentaje_comision);
        let saldo_restante = calcular_saldo(new_sale.precio_venta, new_sale.monto_sena);
        let estado_pago = derivar_estado_pago(new_sale.monto_sena, new_sale.precio_venta);

        let (estado_auto, fecha_venta) = match estado_pago {
            EstadoPago::Pagado => (EstadoAuto::Vendido, Some(new_sale.fecha_sena)),
            _ => (EstadoAuto::Reservado, None),
        };

        let sale = sqlx::query_as::<_, Sale>(
            r#"
            INSERT INTO sales (
                id, vehicle_id, vendedor_id,
                cliente_nombre, cliente_apellido, cliente_telefono, cliente_email, cliente_dni,
                precio_compra, precio_venta, moneda, monto_sena, saldo_restante, estado_pago,
                ganancia, monto_comision, comision_pagada, observaciones, fecha_sena, fecha_venta
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, FALSE, $17, $18, $19)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new_sale.vehicle_id)
        .bind(new_sale.vendedor_id)
        .bind(new_sale.cliente_nombre)
        .bind(new_sale.cliente_apellido)
        .bind(new_sale.cliente_telefono)
        .bind(new_sale.cliente_email)
        .bind(new_sale.cliente_dni)
        .bind(precio_compra)
        .bind(new_sale.precio_venta)
        .bind(vehicle.moneda)
        .bind(new_sale.monto_sena)
        .bind(saldo_restante)
        .bind(estado_pago)
        .bind(ganancia)
        .bind(monto_comision)
        .bind(new_sale.observaciones)
        .bind(new_sale.fecha_sena)
        .bind(fecha_venta)
        .fetch_one(&mut *tx)
        .await?;

        set_vehicle_estado(&mut tx, new_sale.vehicle_id, estado_auto).await?;

        tx.commit().await?;

        Ok(sale)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Sale>, AppError> {
        let sale = sqlx::query_as::<_, Sale>("SELECT * FROM sales WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(sale)
    }

    pub async fn list(&self, filters: &SaleFilters) -> Result<Vec<Sale>, AppError> {
        let mut query: QueryBuilder<Postgres> = QueryBuilder::new("SELECT * FROM sales WHERE 1 = 1");

        if let Some(anio) = filters.anio {
            query.push(" AND EXTRACT(YEAR FROM COALESCE(fecha_venta, fecha_sena)) = ");
            query.push_bind(anio);
        }
        if let Some(mes) = filters.mes {
            query.push(" AND EXTRACT(MONTH FROM COALESCE(fecha_venta, fecha_sena)) = ");
            query.push_bind(mes as i32);
        }
        if let Some(estado) = filters.estado {
            query.push(" AND estado_pago = ");
            query.push_bind(estado);
        }
        if let Some(vendedor_id) = filters.vendedor_id {
            query.push(" AND vendedor_id = ");
            query.push_bind(vendedor_id);
        }

        query.push(" ORDER BY fecha_sena DESC");

        let sales = query.build_query_as::<Sale>().fetch_all(&self.pool).await?;

        Ok(sales)
    }

    pub async fn payments_for_sale(&self, sale_id: Uuid) -> Result<Vec<Payment>, AppError> {
        let payments =
            sqlx::query_as::<_, Payment>("SELECT * FROM payments WHERE sale_id = $1 ORDER BY fecha")
                .bind(sale_id)
                .fetch_all(&self.pool)
                .await?;

        Ok(payments)
    }

    /// Registrar un pago parcial: agrega la fila al libro de pagos,
    /// acumula la seña y recalcula el saldo; si queda en cero la venta
    /// pasa a pagado, se estampa la fecha y el vehículo queda vendido
    pub async fn record_payment(
        &self,
        sale_id: Uuid,
        monto: Decimal,
        metodo_pago: Option<String>,
        comprobante: Option<String>,
    ) -> Result<Sale, AppError> {
        let mut tx = self.pool.begin().await?;

        let sale = lock_sale(&mut tx, sale_id).await?;

        if sale.estado_pago.es_terminal() {
            return Err(AppError::BadRequest(
                "La venta ya está pagada o cancelada; no admite más pagos".to_string(),
            ));
        }

        sqlx::query(
            r#"
            INSERT INTO payments (id, sale_id, fecha, monto, metodo_pago, comprobante)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(sale_id)
        .bind(Utc::now())
        .bind(monto)
        .bind(metodo_pago)
        .bind(comprobante)
        .execute(&mut *tx)
        .await?;

        let monto_sena = sale.monto_sena + monto;
        let saldo_restante = calcular_saldo(sale.precio_venta, monto_sena);
        let pagado = saldo_restante == Decimal::ZERO;

        let estado_pago = if pagado {
            EstadoPago::Pagado
        } else {
            derivar_estado_pago(monto_sena, sale.precio_venta)
        };
        let fecha_venta = if pagado { Some(Utc::now()) } else { sale.fecha_venta };

        let updated = sqlx::query_as::<_, Sale>(
            r#"
            UPDATE sales
            SET monto_sena = $2, saldo_restante = $3, estado_pago = $4, fecha_venta = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(sale_id)
        .bind(monto_sena)
        .bind(saldo_restante)
        .bind(estado_pago)
        .bind(fecha_venta)
        .fetch_one(&mut *tx)
        .await?;

        if pagado {
            set_vehicle_estado(&mut tx, sale.vehicle_id, EstadoAuto::Vendido).await?;
        }

        tx.commit().await?;

        Ok(updated)
    }

    /// Cancelar una venta no pagada y devolver el vehículo a disponible
    pub async fn cancel(&self, sale_id: Uuid) -> Result<Sale, AppError> {
        let mut tx = self.pool.begin().await?;

        let sale = lock_sale(&mut tx, sale_id).await?;

        if !sale.estado_pago.puede_transicionar(EstadoPago::Cancelado) {
            return Err(AppError::BadRequest(
                "No se puede cancelar una venta pagada o ya cancelada".to_string(),
            ));
        }

        let updated = sqlx::query_as::<_, Sale>(
            "UPDATE sales SET estado_pago = $2 WHERE id = $1 RETURNING *",
        )
        .bind(sale_id)
        .bind(EstadoPago::Cancelado)
        .fetch_one(&mut *tx)
        .await?;

        set_vehicle_estado(&mut tx, sale.vehicle_id, EstadoAuto::Disponible).await?;

        tx.commit().await?;

        Ok(updated)
    }

    /// Override administrativo: forzar el pago completo sin importar el
    /// saldo (conciliación manual)
    pub async fn mark_paid(&self, sale_id: Uuid) -> Result<Sale, AppError> {
        let mut tx = self.pool.begin().await?;

        let sale = lock_sale(&mut tx, sale_id).await?;

        if sale.estado_pago == EstadoPago::Cancelado {
            return Err(AppError::BadRequest(
                "Una venta cancelada no puede marcarse como pagada".to_string(),
            ));
        }
        if sale.estado_pago == EstadoPago::Pagado {
            return Err(AppError::BadRequest("La venta ya está pagada".to_string()));
        }

        let updated = sqlx::query_as::<_, Sale>(
            r#"
            UPDATE sales
            SET estado_pago = $2, saldo_restante = 0, monto_sena = precio_venta, fecha_venta = $3
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(sale_id)
        .bind(EstadoPago::Pagado)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        set_vehicle_estado(&mut tx, sale.vehicle_id, EstadoAuto::Vendido).await?;

        tx.commit().await?;

        Ok(updated)
    }

    /// Editar una venta no terminal recalculando ganancia, comisión y
    /// saldo desde el snapshot de costo almacenado
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        sale_id: Uuid,
        cliente_nombre: Option<String>,
        cliente_apellido: Option<String>,
        cliente_telefono: Option<String>,
        cliente_email: Option<String>,
        cliente_dni: Option<String>,
        precio_venta: Option<Decimal>,
        monto_sena: Option<Decimal>,
        observaciones: Option<String>,
        porcentaje_comision: Option<Decimal>,
    ) -> Result<Sale, AppError> {
        let mut tx = self.pool.begin().await?;

        let sale = lock_sale(&mut tx, sale_id).await?;

        if sale.estado_pago.es_terminal() {
            return Err(AppError::BadRequest(
                "Una venta pagada o cancelada no puede editarse".to_string(),
            ));
        }

        let precio_venta = precio_venta.unwrap_or(sale.precio_venta);
        let monto_sena = monto_sena.unwrap_or(sale.monto_sena);

        let ganancia = calcular_ganancia(precio_venta, sale.precio_compra);
        let monto_comision = calcular_comision(ganancia, porcentaje_comision);
        let saldo_restante = calcular_saldo(precio_venta, monto_sena);

        // Solo se avanza de estado si la transición es legal; nunca se
        // retrocede de señado a pendiente por una edición
        let derivado = derivar_estado_pago(monto_sena, precio_venta);
        let (estado_pago, fecha_venta) = if derivado != sale.estado_pago
            && sale.estado_pago.puede_transicionar(derivado)
        {
            match derivado {
                EstadoPago::Pagado => (derivado, Some(Utc::now())),
                _ => (derivado, sale.fecha_venta),
            }
        } else {
            (sale.estado_pago, sale.fecha_venta)
        };

        let updated = sqlx::query_as::<_, Sale>(
            r#"
            UPDATE sales
            SET cliente_nombre = $2, cliente_apellido = $3, cliente_telefono = $4,
                cliente_email = $5, cliente_dni = $6, precio_venta = $7, monto_sena = $8,
                saldo_restante = $9, estado_pago = $10, ganancia = $11, monto_comision = $12,
                observaciones = $13, fecha_venta = $14
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(sale_id)
        .bind(cliente_nombre.unwrap_or(sale.cliente_nombre))
        .bind(cliente_apellido.unwrap_or(sale.cliente_apellido))
        .bind(cliente_telefono.or(sale.cliente_telefono))
        .bind(cliente_email.or(sale.cliente_email))
        .bind(cliente_dni.or(sale.cliente_dni))
        .bind(precio_venta)
        .bind(monto_sena)
        .bind(saldo_restante)
        .bind(estado_pago)
        .bind(ganancia)
        .bind(monto_comision)
        .bind(observaciones.or(sale.observaciones))
        .bind(fecha_venta)
        .fetch_one(&mut *tx)
        .await?;

        if estado_pago == EstadoPago::Pagado && sale.estado_pago != EstadoPago::Pagado {
            set_vehicle_estado(&mut tx, sale.vehicle_id, EstadoAuto::Vendido).await?;
        }

        tx.commit().await?;

        Ok(updated)
    }

    pub async fn set_comision_pagada(&self, sale_id: Uuid, pagada: bool) -> Result<Sale, AppError> {
        let sale = sqlx::query_as::<_, Sale>(
            "UPDATE sales SET comision_pagada = $2 WHERE id = $1 RETURNING *",
        )
        .bind(sale_id)
        .bind(pagada)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Venta no encontrada".to_string()))?;

        Ok(sale)
    }
}

async fn lock_sale(tx: &mut Transaction<'_, Postgres>, sale_id: Uuid) -> Result<Sale, AppError> {
    sqlx::query_as::<_, Sale>("SELECT * FROM sales WHERE id = $1 FOR UPDATE")
        .bind(sale_id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Venta no encontrada".to_string()))
}

async fn set_vehicle_estado(
    tx: &mut Transaction<'_, Postgres>,
    vehicle_id: Uuid,
    estado: EstadoAuto,
) -> Result<(), AppError> {
    sqlx::query("UPDATE vehicles SET estado = $2 WHERE id = $1")
        .bind(vehicle_id)
        .bind(estado)
        .execute(&mut **tx)
        .await?;

    Ok(())
}
