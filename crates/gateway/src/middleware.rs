//! Middleware for authentication and other cross-cutting concerns

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::error::{GatewayError, GatewayResult};
use crate::state::GatewayState;

/// The authenticated user's database ID, stashed in request extensions by
/// [`auth_middleware`].
#[derive(Debug, Clone, Copy)]
pub struct AuthUserId(pub i64);

/// Authentication middleware that validates bearer session tokens
pub async fn auth_middleware(
    State(state): State<Arc<GatewayState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, GatewayError> {
    let token = bearer_token(request.headers()).ok_or_else(|| {
        GatewayError::AuthenticationFailed("Missing authentication token".to_string())
    })?;

    let session = state.auth_service.validate_session(&token).await?;

    request.extensions_mut().insert(AuthUserId(session.user_id));

    Ok(next.run(request).await)
}

/// Extract the bearer token from the Authorization header
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.to_string())
}

/// Logging middleware for request/response logging
pub async fn logging_middleware(request: Request, next: Next) -> GatewayResult<impl IntoResponse> {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let start = std::time::Instant::now();
    let response = next.run(request).await;
    let duration = start.elapsed();

    tracing::info!(
        method = %method,
        uri = %uri,
        status = %response.status(),
        duration_ms = duration.as_millis(),
        "request completed"
    );

    Ok(response)
}
