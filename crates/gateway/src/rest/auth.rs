//! Authentication REST endpoints (mocked: email-only, no credentials)

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::{GatewayError, GatewayResult};
use crate::middleware::{bearer_token, AuthUserId};
use crate::state::GatewayState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    pub token: String,
    pub expires_at: String,
    pub user: UserResponse,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub gender: String,
    pub has_completed_onboarding: bool,
    pub created_at: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl From<companion_users::User> for UserResponse {
    fn from(user: companion_users::User) -> Self {
        Self {
            id: user.public_id,
            email: user.email,
            display_name: user.display_name,
            gender: String::from(user.gender),
            has_completed_onboarding: user.has_completed_onboarding,
            created_at: user.created_at,
        }
    }
}

impl SessionResponse {
    fn new(session: companion_users::AuthSession, user: companion_users::User) -> Self {
        Self {
            token: session.token,
            expires_at: session.expires_at,
            user: user.into(),
        }
    }
}

/// Create the auth routes that work without a session
pub fn create_public_auth_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .route("/api/auth/login", axum::routing::post(login))
        .route("/api/auth/register", axum::routing::post(register))
}

/// Create the auth routes that require a session
pub fn create_protected_auth_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .route("/api/auth/logout", axum::routing::post(logout))
        .route("/api/auth/me", axum::routing::get(me))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in; unknown emails get a fresh account", body = SessionResponse),
        (status = 400, description = "Invalid email", body = ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<Arc<GatewayState>>,
    Json(payload): Json<LoginRequest>,
) -> GatewayResult<Json<SessionResponse>> {
    let (session, user) = state.auth_service.login(&payload.email).await?;

    Ok(Json(SessionResponse::new(session, user)))
}

#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 201, description = "Account created", body = SessionResponse),
        (status = 400, description = "Invalid email", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    )
)]
pub async fn register(
    State(state): State<Arc<GatewayState>>,
    Json(payload): Json<LoginRequest>,
) -> GatewayResult<impl IntoResponse> {
    let (session, user) = state.auth_service.register(&payload.email).await?;

    Ok((StatusCode::CREATED, Json(SessionResponse::new(session, user))))
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "Auth",
    security(("bearer_token" = [])),
    responses(
        (status = 204, description = "Session invalidated"),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    )
)]
pub async fn logout(
    State(state): State<Arc<GatewayState>>,
    headers: HeaderMap,
) -> GatewayResult<impl IntoResponse> {
    let token = bearer_token(&headers).ok_or_else(|| {
        GatewayError::AuthenticationFailed("Missing authentication token".to_string())
    })?;

    state.auth_service.logout(&token).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "Auth",
    security(("bearer_token" = [])),
    responses(
        (status = 200, description = "The authenticated user", body = UserResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    )
)]
pub async fn me(
    State(state): State<Arc<GatewayState>>,
    Extension(AuthUserId(user_id)): Extension<AuthUserId>,
) -> GatewayResult<Json<UserResponse>> {
    let user = state.user_service.get_user(user_id).await?;

    Ok(Json(UserResponse::from(user)))
}
