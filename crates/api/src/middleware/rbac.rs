//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role does not
//! match. Finer checks (ownership of a booking or session) happen in the
//! engine via [`Actor`].

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use studio_core::error::CoreError;
use studio_core::roles::{Actor, ROLE_ADMIN, ROLE_CLIENT, ROLE_INSTRUCTOR};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `client` role. Rejects with 403 Forbidden otherwise.
pub struct RequireClient(pub AuthUser);

impl FromRequestParts<AppState> for RequireClient {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_CLIENT {
            return Err(AppError::Core(CoreError::Forbidden(
                "Client role required".into(),
            )));
        }
        Ok(RequireClient(user))
    }
}

/// Requires the `instructor` role.
pub struct RequireInstructor(pub AuthUser);

impl FromRequestParts<AppState> for RequireInstructor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_INSTRUCTOR {
            return Err(AppError::Core(CoreError::Forbidden(
                "Instructor role required".into(),
            )));
        }
        Ok(RequireInstructor(user))
    }
}

/// Requires the `admin` role.
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_ADMIN {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}

/// Requires an authenticated caller with a known role, resolved to an [`Actor`].
pub struct RequireAuth(pub Actor);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        Ok(RequireAuth(user.actor()?))
    }
}
