//! Autenticación por extractor
//!
//! `AuthenticatedUser` valida el token Bearer, carga el usuario desde la
//! base y rechaza cuentas inactivas o todavía pendientes de aprobación.
//! Los handlers declaran el extractor en su firma y reciben el usuario
//! ya verificado.

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use uuid::Uuid;

use crate::models::user::{Rol, User};
use crate::repositories::user_repository::UserRepository;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::{extract_token_from_header, verify_token};

/// Usuario autenticado y habilitado para operar
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

impl AuthenticatedUser {
    pub fn id(&self) -> Uuid {
        self.0.id
    }

    pub fn rol(&self) -> Rol {
        self.0.rol
    }

    pub fn es_admin(&self) -> bool {
        self.0.rol.cubre(Rol::Administrador)
    }

    /// Verificar el rol mínimo requerido para la operación
    pub fn requiere(&self, rol: Rol) -> Result<(), AppError> {
        if self.0.rol.cubre(rol) {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "No tenés permisos para esta operación".to_string(),
            ))
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = resolver_usuario(parts, state).await?;

        if !user.rol.puede_operar() {
            return Err(AppError::Forbidden(
                "La cuenta está pendiente de aprobación".to_string(),
            ));
        }

        Ok(AuthenticatedUser(user))
    }
}

/// Variante opcional para endpoints públicos que muestran más datos a
/// usuarios autenticados (catálogo de vehículos)
#[derive(Debug, Clone)]
pub struct OptionalUser(pub Option<User>);

#[async_trait]
impl FromRequestParts<AppState> for OptionalUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if parts.headers.get(header::AUTHORIZATION).is_none() {
            return Ok(OptionalUser(None));
        }

        // Con header presente, un token inválido se rechaza en lugar de
        // degradar silenciosamente a anónimo
        let user = resolver_usuario(parts, state).await?;
        Ok(OptionalUser(Some(user)))
    }
}

async fn resolver_usuario(parts: &Parts, state: &AppState) -> Result<User, AppError> {
    let auth_header = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Falta el header Authorization".to_string()))?;

    let token = extract_token_from_header(auth_header)?;
    let claims = verify_token(token, &state.config)?;

    let user_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::Unauthorized("Token con subject inválido".to_string()))?;

    // El rol se relee de la base: una degradación o desactivación aplica
    // de inmediato aunque el token siga vigente
    let repository = UserRepository::new(state.pool.clone());
    let user = repository
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Usuario inexistente".to_string()))?;

    if !user.activo {
        return Err(AppError::Unauthorized("La cuenta está desactivada".to_string()));
    }

    Ok(user)
}
