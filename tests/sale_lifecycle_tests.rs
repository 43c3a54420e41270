//! Tests del ciclo de vida de ventas contra PostgreSQL
//!
//! Cada test corre sobre una base limpia con el schema de migrations/
//! aplicado. Verifican que las transiciones rechazadas no dejen rastro:
//! ni venta fantasma ni vehículo en un estado que no corresponde.

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use concesionaria_backend::dto::vehicle_dto::CreateVehicleRequest;
use concesionaria_backend::models::sale::EstadoPago;
use concesionaria_backend::models::vehicle::{EstadoAuto, Moneda, Vehicle};
use concesionaria_backend::repositories::sale_repository::{NewSale, SaleRepository};
use concesionaria_backend::repositories::vehicle_repository::VehicleRepository;

async fn alta_vehiculo(pool: &PgPool) -> Vehicle {
    VehicleRepository::new(pool.clone())
        .create(CreateVehicleRequest {
            marca: "Toyota".to_string(),
            modelo: "Corolla".to_string(),
            anio: 2022,
            precio: Decimal::from(35000),
            precio_compra: Some(Decimal::from(30000)),
            moneda: Some(Moneda::Ars),
            descripcion: None,
            color: None,
            kilometraje: Some(15000),
            url_compartir: None,
        })
        .await
        .expect("alta de vehículo")
}

fn nueva_venta(vehicle_id: Uuid, monto_sena: Decimal) -> NewSale {
    NewSale {
        vehicle_id,
        vendedor_id: None,
        porcentaje_comision: None,
        cliente_nombre: "Juan".to_string(),
        cliente_apellido: "Pérez".to_string(),
        cliente_telefono: None,
        cliente_email: None,
        cliente_dni: None,
        precio_venta: Decimal::from(35000),
        monto_sena,
        observaciones: None,
        fecha_sena: Utc::now(),
    }
}

async fn estado_vehiculo(pool: &PgPool, id: Uuid) -> EstadoAuto {
    VehicleRepository::new(pool.clone())
        .find_by_id(id)
        .await
        .expect("consulta")
        .expect("vehículo existente")
        .estado
}

async fn cantidad_ventas(pool: &PgPool) -> i64 {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM sales")
        .fetch_one(pool)
        .await
        .expect("count");
    count
}

#[sqlx::test]
async fn venta_sobre_vehiculo_no_disponible_rechazada_sin_rastro(pool: PgPool) {
    let vehiculo = alta_vehiculo(&pool).await;
    sqlx::query("UPDATE vehicles SET estado = 'reparacion' WHERE id = $1")
        .bind(vehiculo.id)
        .execute(&pool)
        .await
        .expect("set estado");

    let repo = SaleRepository::new(pool.clone());
    let resultado = repo.create(nueva_venta(vehiculo.id, Decimal::from(10000))).await;

    assert!(resultado.is_err());
    // Ni venta fantasma ni cambio de estado del vehículo
    assert_eq!(cantidad_ventas(&pool).await, 0);
    assert_eq!(estado_vehiculo(&pool, vehiculo.id).await, EstadoAuto::Reparacion);
}

#[sqlx::test]
async fn venta_con_sena_parcial_reserva_el_vehiculo(pool: PgPool) {
    let vehiculo = alta_vehiculo(&pool).await;

    let repo = SaleRepository::new(pool.clone());
    let venta = repo
        .create(nueva_venta(vehiculo.id, Decimal::from(10000)))
        .await
        .expect("venta señada");

    assert_eq!(venta.estado_pago, EstadoPago::Senado);
    assert_eq!(venta.saldo_restante, Decimal::from(25000));
    assert!(venta.fecha_venta.is_none());
    assert_eq!(estado_vehiculo(&pool, vehiculo.id).await, EstadoAuto::Reservado);
}

#[sqlx::test]
async fn venta_pagada_completa_marca_vendido(pool: PgPool) {
    let vehiculo = alta_vehiculo(&pool).await;

    let repo = SaleRepository::new(pool.clone());
    let venta = repo
        .create(nueva_venta(vehiculo.id, Decimal::from(35000)))
        .await
        .expect("venta pagada");

    assert_eq!(venta.estado_pago, EstadoPago::Pagado);
    assert_eq!(venta.saldo_restante, Decimal::ZERO);
    assert!(venta.fecha_venta.is_some());
    assert_eq!(estado_vehiculo(&pool, vehiculo.id).await, EstadoAuto::Vendido);
}

#[sqlx::test]
async fn pago_que_cancela_el_saldo_completa_la_venta(pool: PgPool) {
    let vehiculo = alta_vehiculo(&pool).await;

    let repo = SaleRepository::new(pool.clone());
    let venta = repo
        .create(nueva_venta(vehiculo.id, Decimal::from(10000)))
        .await
        .expect("venta señada");

    let actualizada = repo
        .record_payment(venta.id, Decimal::from(25000), Some("efectivo".to_string()), None)
        .await
        .expect("pago final");

    assert_eq!(actualizada.estado_pago, EstadoPago::Pagado);
    assert_eq!(actualizada.saldo_restante, Decimal::ZERO);
    assert!(actualizada.fecha_venta.is_some());
    assert_eq!(estado_vehiculo(&pool, vehiculo.id).await, EstadoAuto::Vendido);

    let pagos = repo.payments_for_sale(venta.id).await.expect("pagos");
    assert_eq!(pagos.len(), 1);
    assert_eq!(pagos[0].monto, Decimal::from(25000));
}

#[sqlx::test]
async fn cancelar_venta_senada_libera_el_vehiculo(pool: PgPool) {
    let vehiculo = alta_vehiculo(&pool).await;

    let repo = SaleRepository::new(pool.clone());
    let venta = repo
        .create(nueva_venta(vehiculo.id, Decimal::from(10000)))
        .await
        .expect("venta señada");

    let cancelada = repo.cancel(venta.id).await.expect("cancelación");

    assert_eq!(cancelada.estado_pago, EstadoPago::Cancelado);
    assert_eq!(estado_vehiculo(&pool, vehiculo.id).await, EstadoAuto::Disponible);
}

#[sqlx::test]
async fn cancelar_venta_pagada_rechazada_sin_cambios(pool: PgPool) {
    let vehiculo = alta_vehiculo(&pool).await;

    let repo = SaleRepository::new(pool.clone());
    let venta = repo
        .create(nueva_venta(vehiculo.id, Decimal::from(35000)))
        .await
        .expect("venta pagada");

    let resultado = repo.cancel(venta.id).await;
    assert!(resultado.is_err());

    // La venta sigue pagada y el vehículo sigue vendido
    let releida = repo
        .find_by_id(venta.id)
        .await
        .expect("consulta")
        .expect("venta existente");
    assert_eq!(releida.estado_pago, EstadoPago::Pagado);
    assert_eq!(estado_vehiculo(&pool, vehiculo.id).await, EstadoAuto::Vendido);
}

#[sqlx::test]
async fn pago_sobre_venta_cancelada_rechazado_sin_rastro(pool: PgPool) {
    let vehiculo = alta_vehiculo(&pool).await;

    let repo = SaleRepository::new(pool.clone());
    let venta = repo
        .create(nueva_venta(vehiculo.id, Decimal::from(10000)))
        .await
        .expect("venta señada");
    repo.cancel(venta.id).await.expect("cancelación");

    let resultado = repo
        .record_payment(venta.id, Decimal::from(5000), None, None)
        .await;
    assert!(resultado.is_err());

    // El libro de pagos queda vacío y la seña acumulada no se movió
    let pagos = repo.payments_for_sale(venta.id).await.expect("pagos");
    assert!(pagos.is_empty());

    let releida = repo
        .find_by_id(venta.id)
        .await
        .expect("consulta")
        .expect("venta existente");
    assert_eq!(releida.monto_sena, Decimal::from(10000));
    assert_eq!(releida.estado_pago, EstadoPago::Cancelado);
}

#[sqlx::test]
async fn mark_paid_sobre_venta_cancelada_rechazado(pool: PgPool) {
    let vehiculo = alta_vehiculo(&pool).await;

    let repo = SaleRepository::new(pool.clone());
    let venta = repo
        .create(nueva_venta(vehiculo.id, Decimal::from(10000)))
        .await
        .expect("venta señada");
    repo.cancel(venta.id).await.expect("cancelación");

    let resultado = repo.mark_paid(venta.id).await;
    assert!(resultado.is_err());

    // El vehículo quedó disponible por la cancelación y así se queda
    assert_eq!(estado_vehiculo(&pool, vehiculo.id).await, EstadoAuto::Disponible);
}
