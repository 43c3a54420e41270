//! DTOs de usuarios (administración de cuentas)

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::user::{Rol, User};

/// Request para que un administrador cree un usuario ya aprobado
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 3, max = 50))]
    pub username: String,

    #[validate(length(min = 6, max = 100))]
    pub password: String,

    #[validate(length(min = 1, max = 100))]
    pub nombre: String,

    #[validate(length(min = 1, max = 100))]
    pub apellido: String,

    #[validate(email)]
    pub email: String,

    pub rol: Rol,

    pub porcentaje_comision: Option<Decimal>,
}

/// Request para editar un usuario existente
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 100))]
    pub nombre: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub apellido: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    pub rol: Option<Rol>,

    pub porcentaje_comision: Option<Decimal>,

    pub activo: Option<bool>,
}

/// Response de usuario (sin credenciales)
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub nombre: String,
    pub apellido: String,
    pub email: String,
    pub rol: Rol,
    pub porcentaje_comision: Decimal,
    pub activo: bool,
    pub fecha_registro: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            nombre: user.nombre,
            apellido: user.apellido,
            email: user.email,
            rol: user.rol,
            porcentaje_comision: user.porcentaje_comision,
            activo: user.activo,
            fecha_registro: user.fecha_registro,
        }
    }
}

/// Response al restablecer una contraseña
#[derive(Debug, Serialize)]
pub struct ResetPasswordResponse {
    pub password_temporal: String,
}
