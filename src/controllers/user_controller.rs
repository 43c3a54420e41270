//! Controller de administración de usuarios
//!
//! Listado, aprobación, edición y baja de cuentas. Crear administradores
//! y eliminar usuarios son privilegios exclusivos del administrador jefe.

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::controllers::auth_controller::hash_password;
use crate::dto::user_dto::{
    CreateUserRequest, ResetPasswordResponse, UpdateUserRequest, UserResponse,
};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::user::Rol;
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::{conflict_error, validation_error, AppError};
use crate::utils::validation::validate_percentage;

pub struct UserController {
    repository: UserRepository,
}

impl UserController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: UserRepository::new(pool),
        }
    }

    pub async fn list(&self, actor: &AuthenticatedUser) -> Result<Vec<UserResponse>, AppError> {
        actor.requiere(Rol::Administrador)?;

        let users = self.repository.list().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    /// Vendedores activos, para el selector del formulario de ventas
    pub async fn list_vendedores(
        &self,
        actor: &AuthenticatedUser,
    ) -> Result<Vec<UserResponse>, AppError> {
        actor.requiere(Rol::Vendedor)?;

        let users = self.repository.list_vendedores_activos().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    pub async fn create(
        &self,
        actor: &AuthenticatedUser,
        request: CreateUserRequest,
    ) -> Result<UserResponse, AppError> {
        actor.requiere(Rol::Administrador)?;
        request.validate()?;

        // Otorgar roles de administrador es exclusivo del jefe
        if request.rol.cubre(Rol::Administrador) {
            actor.requiere(Rol::AdministradorJefe)?;
        }

        if self.repository.username_exists(&request.username).await? {
            return Err(conflict_error("Usuario", "username", &request.username));
        }
        if self.repository.email_exists(&request.email, None).await? {
            return Err(conflict_error("Usuario", "email", &request.email));
        }

        let porcentaje = request.porcentaje_comision.unwrap_or_else(|| 5.into());
        validate_percentage(porcentaje)
            .map_err(|_| validation_error("porcentaje_comision", "Debe estar entre 0 y 100"))?;

        let password_hash = hash_password(&request.password)?;

        let user = self
            .repository
            .create(
                request.username,
                password_hash,
                request.nombre,
                request.apellido,
                request.email,
                request.rol,
                porcentaje,
                true,
            )
            .await?;

        tracing::info!("Usuario {} creado por {}", user.username, actor.0.username);

        Ok(user.into())
    }

    pub async fn update(
        &self,
        actor: &AuthenticatedUser,
        id: Uuid,
        request: UpdateUserRequest,
    ) -> Result<UserResponse, AppError> {
        actor.requiere(Rol::Administrador)?;
        request.validate()?;

        let current = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuario no encontrado".to_string()))?;

        let rol = request.rol.unwrap_or(current.rol);
        if rol.cubre(Rol::Administrador) && rol != current.rol {
            actor.requiere(Rol::AdministradorJefe)?;
        }

        if let Some(email) = &request.email {
            if self.repository.email_exists(email, Some(id)).await? {
                return Err(conflict_error("Usuario", "email", email));
            }
        }

        let porcentaje = request
            .porcentaje_comision
            .unwrap_or(current.porcentaje_comision);
        validate_percentage(porcentaje)
            .map_err(|_| validation_error("porcentaje_comision", "Debe estar entre 0 y 100"))?;

        let user = self
            .repository
            .update(
                id,
                request.nombre.unwrap_or(current.nombre),
                request.apellido.unwrap_or(current.apellido),
                request.email.unwrap_or(current.email),
                rol,
                porcentaje,
                request.activo.unwrap_or(current.activo),
            )
            .await?;

        Ok(user.into())
    }

    pub async fn delete(&self, actor: &AuthenticatedUser, id: Uuid) -> Result<(), AppError> {
        actor.requiere(Rol::AdministradorJefe)?;

        if id == actor.id() {
            return Err(AppError::BadRequest(
                "No podés eliminar tu propia cuenta".to_string(),
            ));
        }

        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuario no encontrado".to_string()))?;

        self.repository.delete(id).await?;

        tracing::info!("Usuario {} eliminado por {}", id, actor.0.username);

        Ok(())
    }

    /// Restablecer la contraseña a un valor temporal que el administrador
    /// le comunica al usuario por otro canal
    pub async fn reset_password(
        &self,
        actor: &AuthenticatedUser,
        id: Uuid,
    ) -> Result<ResetPasswordResponse, AppError> {
        actor.requiere(Rol::Administrador)?;

        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuario no encontrado".to_string()))?;

        let password_temporal = Uuid::new_v4().simple().to_string()[..12].to_string();
        let password_hash = hash_password(&password_temporal)?;

        self.repository.update_password(id, password_hash).await?;

        Ok(ResetPasswordResponse { password_temporal })
    }
}
