//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use studio_core::error::CoreError;
use studio_core::roles::Actor;
use studio_core::types::DbId;

use crate::error::AppError;
use crate::state::AppState;

/// Caller extracted from a JWT Bearer token in the `Authorization` header.
///
/// A missing, malformed or expired token is rejected with `NOT_AUTHENTICATED`.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Client or instructor id, from `claims.sub`.
    pub user_id: DbId,
    pub role: String,
}

impl AuthUser {
    /// The caller as a booking actor. Unknown roles are forbidden.
    pub fn actor(&self) -> Result<Actor, AppError> {
        Ok(Actor::from_role(&self.role, self.user_id)?)
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::NotAuthenticated(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::NotAuthenticated(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = state.config.jwt.verify(token).map_err(|_| {
            AppError::Core(CoreError::NotAuthenticated(
                "Invalid or expired token".into(),
            ))
        })?;

        Ok(AuthUser {
            user_id: claims.sub,
            role: claims.role,
        })
    }
}
