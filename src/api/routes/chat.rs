//! Chat Routes
//!
//! Contact list and conversation endpoints.
//!
//! - GET /api/v1/chat/contacts?search= - List contacts, optionally filtered by name
//! - POST /api/v1/chat/contacts/:id/select - Make a contact active, clearing its unread count
//! - GET /api/v1/chat/contacts/:id/messages - Transcript for a contact
//! - POST /api/v1/chat/contacts/:id/messages - Send a message

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use std::sync::Arc;

use crate::api::dto::{
    ContactListResponse, ContactQuery, ContactView, MessageListResponse, SendMessageRequest,
    SendMessageResponse,
};
use crate::api::error::ApiResult;
use crate::api::state::AppState;

/// GET /api/v1/chat/contacts
///
/// Search matches a case-insensitive substring of the contact name.
pub async fn list_contacts(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ContactQuery>,
) -> Json<ContactListResponse> {
    let session = state.chat.read().await;
    let now = Utc::now();

    let contacts: Vec<ContactView> = session
        .search(query.search.as_deref().unwrap_or(""))
        .into_iter()
        .map(|c| ContactView::new(c, now))
        .collect();

    Json(ContactListResponse {
        total: contacts.len(),
        contacts,
        selected: session.selected().map(|c| c.id.clone()),
    })
}

/// POST /api/v1/chat/contacts/:id/select
pub async fn select_contact(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<ContactView>> {
    let mut session = state.chat.write().await;
    let contact = session.select(&id)?;
    Ok(Json(ContactView::new(contact, Utc::now())))
}

/// GET /api/v1/chat/contacts/:id/messages
pub async fn list_messages(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageListResponse>> {
    let session = state.chat.read().await;
    let messages = session.messages(&id)?.to_vec();

    Ok(Json(MessageListResponse {
        contact_id: id,
        messages,
    }))
}

/// POST /api/v1/chat/contacts/:id/messages
///
/// Blank messages are rejected. When auto-replies are enabled, a customer
/// reply is posted to the same contact after the configured delay.
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<SendMessageRequest>,
) -> ApiResult<(StatusCode, Json<SendMessageResponse>)> {
    let message = state.chat.write().await.send(&id, &req.text)?;

    let auto_reply_scheduled = match &state.responder {
        Some(responder) => {
            // Reply tasks run detached; server shutdown cancels pending ones
            let _ = responder.schedule(Arc::clone(&state.chat), id.as_str());
            true
        }
        None => false,
    };

    tracing::debug!(contact_id = %id, auto_reply_scheduled, "Message sent");

    Ok((
        StatusCode::CREATED,
        Json(SendMessageResponse {
            message,
            auto_reply_scheduled,
        }),
    ))
}
