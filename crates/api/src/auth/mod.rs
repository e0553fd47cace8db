//! Authentication: token validation and the admin-role request extractor.
//!
//! The identity provider is an external collaborator; this service never
//! issues credentials in production, it only validates Bearer tokens and
//! checks the admin role.

pub mod jwt;

use atelier_core::error::CoreError;
use atelier_core::types::DbId;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// An authenticated admin, extracted from a JWT Bearer token in the
/// `Authorization` header. Rejects non-admin roles with 403.
///
/// ```ignore
/// async fn my_handler(admin: AdminUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = admin.user_id, "handling admin request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AdminUser {
    /// The user's id at the identity provider (from `claims.sub`).
    pub user_id: DbId,
}

impl FromRequestParts<AppState> for AdminUser {
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
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        if claims.role != "admin" {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }

        Ok(AdminUser {
            user_id: claims.sub,
        })
    }
}
