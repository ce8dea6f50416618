//! Template Routes
//!
//! CRUD and preview endpoints for message templates.
//!
//! - GET /api/v1/templates - List all templates
//! - POST /api/v1/templates - Create a new template
//! - GET /api/v1/templates/:id - Get a specific template
//! - DELETE /api/v1/templates/:id - Delete a template
//! - POST /api/v1/templates/:id/preview - Render a template with values
//! - POST /api/v1/templates/extract - List placeholders in a message
//! - POST /api/v1/render - Render an unsaved message

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::api::dto::{
    CreateTemplateRequest, ExtractRequest, ExtractResponse, PreviewRequest, RenderRequest,
    RenderResponse, TemplateListResponse,
};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::template::{self, Preview, Template};

/// GET /api/v1/templates
pub async fn list_templates(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<TemplateListResponse>> {
    let store = state.templates.read().await;
    let templates = store.list().to_vec();

    Ok(Json(TemplateListResponse {
        total: templates.len(),
        templates,
    }))
}

/// GET /api/v1/templates/:id
pub async fn get_template(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Template>> {
    let store = state.templates.read().await;

    let template = store
        .get(&id)
        .cloned()
        .ok_or_else(|| ApiError::NotFound(format!("Template {}", id)))?;

    Ok(Json(template))
}

/// POST /api/v1/templates
///
/// Variables are derived from the message; any supplied by the client are ignored.
pub async fn create_template(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateTemplateRequest>,
) -> ApiResult<(StatusCode, Json<Template>)> {
    let template = state.templates.write().await.create(req.title, req.message)?;
    Ok((StatusCode::CREATED, Json(template)))
}

/// DELETE /api/v1/templates/:id
pub async fn delete_template(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.templates.write().await.delete(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/templates/:id/preview
///
/// Placeholders without a non-empty value stay verbatim in the output.
pub async fn preview_template(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Option<Json<PreviewRequest>>,
) -> ApiResult<Json<Preview>> {
    let values = body.map(|Json(req)| req.values).unwrap_or_default();
    let preview = state.templates.read().await.preview(&id, &values)?;
    Ok(Json(preview))
}

/// POST /api/v1/templates/extract
pub async fn extract(Json(req): Json<ExtractRequest>) -> Json<ExtractResponse> {
    Json(ExtractResponse {
        variables: template::extract_variables(&req.message),
        distinct: template::distinct_variables(&req.message),
    })
}

/// POST /api/v1/render
pub async fn render(Json(req): Json<RenderRequest>) -> Json<RenderResponse> {
    Json(RenderResponse {
        rendered: template::render(&req.message, &req.values),
        unresolved: template::unresolved_variables(&req.message, &req.values),
    })
}
