// handlers/protected/auth.rs - GET /api/auth/me

use axum::Extension;

use crate::middleware::{ApiResponse, ApiResult, AuthUser};

/// Identity carried by the caller's bearer token.
pub async fn me(Extension(user): Extension<AuthUser>) -> ApiResult<AuthUser> {
    Ok(ApiResponse::success(user))
}
