//! Capa de acceso a datos
//!
//! Cada repositorio encapsula las consultas SQL de su agregado. Las
//! transiciones que tocan varias filas se resuelven acá, dentro de
//! transacciones, para que los controllers solo orquesten.

pub mod photo_repository;
pub mod report_repository;
pub mod sale_repository;
pub mod user_repository;
pub mod vehicle_repository;

pub use photo_repository::PhotoRepository;
pub use report_repository::ReportRepository;
pub use sale_repository::SaleRepository;
pub use user_repository::UserRepository;
pub use vehicle_repository::VehicleRepository;
