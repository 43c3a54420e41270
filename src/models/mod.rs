//! Modelos de dominio
//!
//! Structs que mapean a las tablas PostgreSQL y la lógica pura del
//! negocio (máquina de estados de ventas, cálculos, agregaciones).

pub mod payment;
pub mod photo;
pub mod report;
pub mod sale;
pub mod user;
pub mod vehicle;
