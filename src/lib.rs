//! Backend de gestión de concesionaria
//!
//! API JSON sobre PostgreSQL: inventario de vehículos con fotos, ventas
//! con seña y pagos parciales, usuarios con roles y reportes de ventas.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod utils;
