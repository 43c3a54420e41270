//! Capa de reglas de negocio
//!
//! Los controllers validan requests, aplican permisos por rol y delegan
//! el acceso a datos en los repositorios.

pub mod auth_controller;
pub mod report_controller;
pub mod sale_controller;
pub mod user_controller;
pub mod vehicle_controller;
