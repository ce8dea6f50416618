//! Dashboard Routes
//!
//! - GET /api/v1/dashboard - Statistics, weekly activity and recent sends

use axum::Json;
use chrono::Utc;

use crate::dashboard::Dashboard;

/// GET /api/v1/dashboard
pub async fn get_dashboard() -> Json<Dashboard> {
    Json(Dashboard::mock(Utc::now()))
}
