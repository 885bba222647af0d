// handlers/public/auth.rs - POST /api/auth/register and POST /api/auth/login

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::auth::{hash_password, verify_password, IssuedToken};
use crate::error::ApiError;
use crate::handlers::utils::{object_body, typed};
use crate::middleware::{ApiResponse, ApiResult};
use crate::models::{Credential, Entity};
use crate::state::AppState;
use crate::validation::{LOGIN, REGISTER};

#[derive(Debug, Deserialize)]
struct CredentialsInput {
    username: String,
    password: String,
}

/// Registration receipt. The password hash never leaves the server.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredUser {
    pub username: String,
    pub created_at: DateTime<Utc>,
}

const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// POST /api/auth/register - create an account
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<RegisteredUser> {
    let body = object_body(payload)?;
    let fields = REGISTER.validate(&body).map_err(ApiError::validation)?;
    let input: CredentialsInput = typed(fields)?;

    // Checked before hashing; the store still rejects a racing duplicate.
    if state.credentials.find_by_key(&input.username).await?.is_some() {
        return Err(ApiError::conflict(Credential::COLLECTION.key_conflict_message()));
    }

    let cost = state.config.security.bcrypt_cost;
    let password = input.password;
    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password, cost))
        .await
        .map_err(|e| {
            tracing::error!("Password hashing task failed: {}", e);
            ApiError::internal_server_error("Failed to register user")
        })?
        .map_err(|e| {
            tracing::error!("Password hashing failed: {}", e);
            ApiError::internal_server_error("Failed to register user")
        })?;

    let credential = Credential {
        username: input.username,
        password_hash,
    };
    let record = state.credentials.create(&credential).await?;
    tracing::info!("Registered user {}", record.entity.username);

    Ok(ApiResponse::created(RegisteredUser {
        username: record.entity.username,
        created_at: record.created_at,
    }))
}

/// POST /api/auth/login - exchange username and password for a bearer token
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<IssuedToken> {
    let body = object_body(payload)?;
    let fields = LOGIN.validate(&body).map_err(ApiError::validation)?;
    let input: CredentialsInput = typed(fields)?;

    let Some(stored) = state.credentials.find_by_key(&input.username).await? else {
        tracing::info!("Login rejected for unknown user {}", input.username);
        return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
    };

    let password = input.password;
    let hash = stored.entity.password_hash;
    let matches = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| {
            tracing::error!("Password verification task failed: {}", e);
            ApiError::internal_server_error("Failed to log in")
        })?
        // A malformed stored hash can never match.
        .unwrap_or(false);

    if !matches {
        tracing::info!("Login rejected for user {}", input.username);
        return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
    }

    let issued = state.jwt.issue(&input.username).map_err(|e| {
        tracing::error!("Token issue failed: {}", e);
        ApiError::internal_server_error("Failed to issue token")
    })?;
    tracing::info!("User {} logged in", input.username);

    Ok(ApiResponse::success(issued))
}
