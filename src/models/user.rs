//! Modelo de User
//!
//! Este módulo contiene el struct User y el enum de roles con su
//! relación de contención estricta de capacidades.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Rol del usuario - mapea al ENUM rol_usuario
///
/// El orden de las variantes define la contención de capacidades:
/// administrador_jefe ⊇ administrador ⊇ vendedor. `Pendiente` no puede
/// operar hasta ser aprobado.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, PartialOrd, Ord)]
#[sqlx(type_name = "rol_usuario", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Rol {
    Pendiente,
    Vendedor,
    Administrador,
    AdministradorJefe,
}

impl Rol {
    /// Verificar contención de capacidades contra el rol mínimo requerido
    pub fn cubre(&self, requerido: Rol) -> bool {
        *self != Rol::Pendiente && *self >= requerido
    }

    pub fn puede_operar(&self) -> bool {
        *self != Rol::Pendiente
    }

    /// Nombre del rol tal como viaja en el claim del token
    pub fn as_str(&self) -> &'static str {
        match self {
            Rol::Pendiente => "pendiente",
            Rol::Vendedor => "vendedor",
            Rol::Administrador => "administrador",
            Rol::AdministradorJefe => "administrador_jefe",
        }
    }
}

/// User principal - mapea exactamente a la tabla users
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub nombre: String,
    pub apellido: String,
    pub email: String,
    pub rol: Rol,
    pub porcentaje_comision: Decimal,
    pub activo: bool,
    pub fecha_registro: DateTime<Utc>,
}

impl User {
    pub fn nombre_completo(&self) -> String {
        format!("{} {}", self.nombre, self.apellido)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contencion_de_roles() {
        assert!(Rol::AdministradorJefe.cubre(Rol::Administrador));
        assert!(Rol::AdministradorJefe.cubre(Rol::Vendedor));
        assert!(Rol::Administrador.cubre(Rol::Vendedor));
        assert!(Rol::Vendedor.cubre(Rol::Vendedor));

        assert!(!Rol::Administrador.cubre(Rol::AdministradorJefe));
        assert!(!Rol::Vendedor.cubre(Rol::Administrador));
    }

    #[test]
    fn test_pendiente_no_opera() {
        assert!(!Rol::Pendiente.puede_operar());
        // Pendiente no cubre ningún nivel, ni siquiera el propio
        assert!(!Rol::Pendiente.cubre(Rol::Pendiente));
        assert!(!Rol::Pendiente.cubre(Rol::Vendedor));
    }
}
