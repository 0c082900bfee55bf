//! Authentication routes: register, login, logout, me.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use studynote_store::NewUser;

use crate::auth::{self, AuthenticatedUser};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Minimum accepted password length.
const MIN_PASSWORD_CHARS: usize = 8;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Returned from both register and login.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub user_id: Uuid,
    pub email: String,
    pub expires_in_hours: u64,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user_id: Uuid,
    pub email: String,
    pub display_name: Option<String>,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST /api/auth/register
async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<SessionResponse>)> {
    let email = request.email.trim().to_lowercase();
    if !email.contains('@') {
        return Err(ApiError::BadRequest("Invalid email address".to_string()));
    }
    if request.password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(ApiError::BadRequest(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_CHARS
        )));
    }

    let password_hash = auth::hash_password(&request.password)?;
    let new_user = NewUser {
        email,
        password_hash,
        display_name: request.display_name,
    };

    // DuplicateEmail surfaces as 409 via the StoreError mapping
    let user = state.notes().store().insert_user(&new_user).await?;

    let config = state.config();
    let token = auth::create_token(user.id, &user.email, &config.jwt_secret, config.jwt_expiry_hours)?;

    tracing::info!(user_id = %user.id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            token,
            user_id: user.id,
            email: user.email,
            expires_in_hours: config.jwt_expiry_hours,
        }),
    ))
}

/// POST /api/auth/login
async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<SessionResponse>> {
    let email = request.email.trim().to_lowercase();

    let user = state
        .notes()
        .store()
        .get_user_by_email(&email)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid email or password".to_string()))?;

    let valid = auth::verify_password(&request.password, &user.password_hash)?;
    if !valid {
        return Err(ApiError::Unauthorized(
            "Invalid email or password".to_string(),
        ));
    }

    let config = state.config();
    let token = auth::create_token(user.id, &user.email, &config.jwt_secret, config.jwt_expiry_hours)?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(SessionResponse {
        token,
        user_id: user.id,
        email: user.email,
        expires_in_hours: config.jwt_expiry_hours,
    }))
}

/// POST /api/auth/logout — informational (client discards token).
async fn logout(user: AuthenticatedUser) -> ApiResult<StatusCode> {
    tracing::info!(user_id = %user.user_id, "User logged out");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/auth/me — current user info.
async fn me(State(state): State<AppState>, user: AuthenticatedUser) -> ApiResult<Json<MeResponse>> {
    let user_row = state
        .notes()
        .store()
        .get_user_by_id(*user.user_id.as_uuid())
        .await?;

    Ok(Json(MeResponse {
        user_id: user_row.id,
        email: user_row.email,
        display_name: user_row.display_name,
    }))
}

/// Build auth routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/me", get(me))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_deserialize() {
        let json = r#"{"email": "ada@example.com", "password": "longenough"}"#;
        let request: RegisterRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.email, "ada@example.com");
        assert!(request.display_name.is_none());
    }

    #[test]
    fn test_login_request_deserialize() {
        let json = r#"{"email": "ada@example.com", "password": "secret123"}"#;
        let request: LoginRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.email, "ada@example.com");
        assert_eq!(request.password, "secret123");
    }

    #[test]
    fn test_session_response_serialize() {
        let response = SessionResponse {
            token: "jwt.token.here".to_string(),
            user_id: Uuid::nil(),
            email: "ada@example.com".to_string(),
            expires_in_hours: 24,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("token"));
        assert!(json.contains("user_id"));
    }
}
