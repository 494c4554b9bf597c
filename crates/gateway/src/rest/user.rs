//! User preference REST endpoints

use axum::{extract::State, Extension, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use companion_users::Gender;

use crate::error::{GatewayError, GatewayResult};
use crate::middleware::AuthUserId;
use crate::state::GatewayState;

#[derive(Debug, Serialize, ToSchema)]
pub struct PreferencesResponse {
    pub display_name: String,
    pub gender: String,
    pub has_completed_onboarding: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdatePreferencesRequest {
    pub display_name: Option<String>,
    /// "male", "female", "other" or "unspecified"
    pub gender: Option<String>,
    pub has_completed_onboarding: Option<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl From<companion_users::User> for PreferencesResponse {
    fn from(user: companion_users::User) -> Self {
        Self {
            display_name: user.display_name,
            gender: String::from(user.gender),
            has_completed_onboarding: user.has_completed_onboarding,
        }
    }
}

fn parse_gender(gender: &str) -> GatewayResult<Gender> {
    match gender {
        "male" => Ok(Gender::Male),
        "female" => Ok(Gender::Female),
        "other" => Ok(Gender::Other),
        "unspecified" => Ok(Gender::Unspecified),
        other => Err(GatewayError::InvalidRequest(format!(
            "Invalid gender: {other}"
        ))),
    }
}

/// Create user preference routes
pub fn create_user_routes() -> Router<Arc<GatewayState>> {
    Router::new().route(
        "/api/user/preferences",
        axum::routing::get(get_preferences).put(update_preferences),
    )
}

#[utoipa::path(
    get,
    path = "/api/user/preferences",
    tag = "User",
    security(("bearer_token" = [])),
    responses(
        (status = 200, description = "The caller's preferences", body = PreferencesResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    )
)]
pub async fn get_preferences(
    State(state): State<Arc<GatewayState>>,
    Extension(AuthUserId(user_id)): Extension<AuthUserId>,
) -> GatewayResult<Json<PreferencesResponse>> {
    let user = state.user_service.get_user(user_id).await?;

    Ok(Json(PreferencesResponse::from(user)))
}

#[utoipa::path(
    put,
    path = "/api/user/preferences",
    tag = "User",
    security(("bearer_token" = [])),
    request_body = UpdatePreferencesRequest,
    responses(
        (status = 200, description = "Preferences updated; onboarding flag set on first save", body = PreferencesResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    )
)]
pub async fn update_preferences(
    State(state): State<Arc<GatewayState>>,
    Extension(AuthUserId(user_id)): Extension<AuthUserId>,
    Json(payload): Json<UpdatePreferencesRequest>,
) -> GatewayResult<Json<PreferencesResponse>> {
    let gender = payload.gender.as_deref().map(parse_gender).transpose()?;

    let request = companion_users::UpdatePreferencesRequest {
        display_name: payload.display_name,
        gender,
        has_completed_onboarding: payload.has_completed_onboarding,
    };

    let user = state
        .user_service
        .update_preferences(user_id, &request)
        .await?;

    Ok(Json(PreferencesResponse::from(user)))
}
