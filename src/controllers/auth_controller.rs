//! Controller de autenticación
//!
//! Registro, login y cambio de contraseña. El primer usuario registrado
//! queda como administrador jefe; los siguientes entran como pendientes
//! hasta que un administrador los apruebe.

use rust_decimal::Decimal;
use sqlx::PgPool;
use validator::Validate;

use crate::config::environment::EnvironmentConfig;
use crate::dto::auth_dto::{ChangePasswordRequest, LoginRequest, LoginResponse, RegisterRequest};
use crate::dto::user_dto::UserResponse;
use crate::models::user::{Rol, User};
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::{conflict_error, AppError};
use crate::utils::jwt::generate_token;

/// Porcentaje de comisión por defecto para cuentas nuevas
const COMISION_DEFAULT: u32 = 5;

pub struct AuthController {
    repository: UserRepository,
    config: EnvironmentConfig,
}

impl AuthController {
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> Self {
        Self {
            repository: UserRepository::new(pool),
            config,
        }
    }

    pub async fn register(&self, request: RegisterRequest) -> Result<UserResponse, AppError> {
        request.validate()?;

        if self.repository.username_exists(&request.username).await? {
            return Err(conflict_error("Usuario", "username", &request.username));
        }
        if self.repository.email_exists(&request.email, None).await? {
            return Err(conflict_error("Usuario", "email", &request.email));
        }

        // El primer registro arranca la concesionaria y queda como jefe
        let rol = if self.repository.count().await? == 0 {
            Rol::AdministradorJefe
        } else {
            Rol::Pendiente
        };

        let password_hash = hash_password(&request.password)?;

        let user = self
            .repository
            .create(
                request.username,
                password_hash,
                request.nombre,
                request.apellido,
                request.email,
                rol,
                Decimal::from(COMISION_DEFAULT),
                true,
            )
            .await?;

        tracing::info!("Usuario registrado: {} ({})", user.username, user.rol.as_str());

        Ok(user.into())
    }

    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AppError> {
        request.validate()?;

        let user = self
            .repository
            .find_by_username(&request.username)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Usuario o contraseña incorrectos".to_string()))?;

        let valid = bcrypt::verify(&request.password, &user.password_hash)
            .map_err(|e| AppError::Hash(e.to_string()))?;
        if !valid {
            return Err(AppError::Unauthorized("Usuario o contraseña incorrectos".to_string()));
        }

        if !user.activo {
            return Err(AppError::Unauthorized("La cuenta está desactivada".to_string()));
        }
        if user.rol == Rol::Pendiente {
            return Err(AppError::Unauthorized(
                "La cuenta está pendiente de aprobación por un administrador".to_string(),
            ));
        }

        let token = generate_token(user.id, user.rol.as_str(), &self.config)?;

        tracing::info!("Login de {} ({})", user.username, user.nombre_completo());

        Ok(LoginResponse {
            token,
            user: user.into(),
        })
    }

    pub async fn change_password(
        &self,
        user: &User,
        request: ChangePasswordRequest,
    ) -> Result<(), AppError> {
        request.validate()?;

        let valid = bcrypt::verify(&request.password_actual, &user.password_hash)
            .map_err(|e| AppError::Hash(e.to_string()))?;
        if !valid {
            return Err(AppError::Unauthorized("La contraseña actual es incorrecta".to_string()));
        }

        let password_hash = hash_password(&request.password_nuevo)?;
        self.repository.update_password(user.id, password_hash).await?;

        Ok(())
    }
}

pub fn hash_password(password: &str) -> Result<String, AppError> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST).map_err(|e| AppError::Hash(e.to_string()))
}
