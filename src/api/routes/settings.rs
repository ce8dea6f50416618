//! Settings Routes
//!
//! Messaging API credentials and notification preferences.
//!
//! - GET /api/v1/settings - Current settings, secrets masked
//! - PUT /api/v1/settings - Save credentials
//! - DELETE /api/v1/settings - Disconnect and clear credentials
//! - POST /api/v1/settings/test - Verify credentials, then save them
//! - PUT /api/v1/settings/notifications - Toggle a notification

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::{NotificationUpdateRequest, SettingsResponse};
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::settings::{verify_credentials, ApiCredentials, SettingsError, SettingsManager};

fn settings_response(manager: &SettingsManager) -> SettingsResponse {
    SettingsResponse {
        status: manager.status(),
        credentials: manager.credentials().map(ApiCredentials::masked),
        notifications: manager.preferences(),
    }
}

/// GET /api/v1/settings
pub async fn get_settings(State(state): State<Arc<AppState>>) -> Json<SettingsResponse> {
    let manager = state.settings.read().await;
    Json(settings_response(&manager))
}

/// PUT /api/v1/settings
///
/// Rejected with 409 while a connection is active.
pub async fn save_settings(
    State(state): State<Arc<AppState>>,
    Json(credentials): Json<ApiCredentials>,
) -> ApiResult<Json<SettingsResponse>> {
    let mut manager = state.settings.write().await;
    manager.save(credentials)?;
    Ok(Json(settings_response(&manager)))
}

/// POST /api/v1/settings/test
///
/// Runs the connection probe without holding the settings lock, so reads
/// are served while the test is in flight. Server shutdown cancels it.
pub async fn test_connection(
    State(state): State<Arc<AppState>>,
    Json(credentials): Json<ApiCredentials>,
) -> ApiResult<Json<SettingsResponse>> {
    let probe = {
        let manager = state.settings.read().await;
        if manager.status().is_connected() {
            return Err(SettingsError::AlreadyConnected.into());
        }
        manager.probe()
    };

    verify_credentials(probe.as_ref(), &credentials, &state.shutdown).await?;

    let mut manager = state.settings.write().await;
    manager.mark_verified(credentials)?;
    Ok(Json(settings_response(&manager)))
}

/// DELETE /api/v1/settings
pub async fn disconnect(State(state): State<Arc<AppState>>) -> ApiResult<StatusCode> {
    state.settings.write().await.disconnect()?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/settings/notifications
pub async fn update_notification(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NotificationUpdateRequest>,
) -> ApiResult<Json<SettingsResponse>> {
    let mut manager = state.settings.write().await;
    manager.set_notification(req.kind, req.enabled)?;
    Ok(Json(settings_response(&manager)))
}
