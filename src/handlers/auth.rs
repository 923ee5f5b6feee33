use axum::{extract::State, http::HeaderMap, response::Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::{self, password, Claims};
use crate::database::models::User;
use crate::error::ApiError;
use crate::middleware::auth::bearer_token;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct AuthRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
}

/// POST /api/auth/register - create a user with a salted one-way hash
/// of the password. Duplicate usernames fail with 400.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<AuthRequest>,
) -> Result<&'static str, ApiError> {
    if req.username.is_empty() || req.password.is_empty() {
        return Err(ApiError::bad_request("username and password are required"));
    }

    if state
        .stores
        .users
        .find_by_username(&req.username)
        .await?
        .is_some()
    {
        return Err(ApiError::conflict("Username already exists!"));
    }

    let password_hash = password::hash_password(&req.password).map_err(|err| {
        tracing::error!(error = %err, "password hashing failed");
        ApiError::internal_server_error("An error occurred while processing your request")
    })?;

    let user = User {
        id: Uuid::new_v4(),
        username: req.username,
        password_hash,
        created_at: Utc::now(),
    };

    tracing::info!(username = %user.username, "registering user");
    state.stores.users.insert(user).await?;

    Ok("User registered successfully!")
}

/// POST /api/auth/login - verify credentials and issue a signed token.
/// Unknown user and wrong password are indistinguishable to the caller.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<AuthRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let user = state
        .stores
        .users
        .find_by_username(&req.username)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid credentials"))?;

    if !password::verify_password(&req.password, &user.password_hash) {
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    let claims = Claims::new(&user.username, state.config.security.jwt_expiry_hours);
    let token =
        auth::generate_token(&claims, &state.config.security.jwt_secret).map_err(|err| {
            tracing::error!(error = %err, "token generation failed");
            ApiError::internal_server_error("An error occurred while processing your request")
        })?;

    tracing::info!(username = %user.username, "user logged in");
    Ok(Json(AuthResponse { token }))
}

/// GET /api/auth/protected - diagnostic endpoint that validates the
/// bearer token itself, independently of the gateway layer in front.
pub async fn protected(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    let token = bearer_token(&headers)
        .ok_or_else(|| ApiError::unauthorized("Invalid or missing token"))?;

    if !auth::validate_token(&token, &state.config.security.jwt_secret) {
        return Err(ApiError::unauthorized("Invalid or expired token"));
    }

    Ok(Json(json!({ "message": "Access granted!" })))
}
