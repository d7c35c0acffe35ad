/**
 * Chat History Handler
 *
 * Implements GET /api/chat/{user_id}: the full conversation between
 * the authenticated caller and the target user, oldest first. Live
 * delivery happens over the websocket; this endpoint only serves the
 * persisted backlog a client loads when opening a conversation.
 */

use axum::{
    extract::{Path, State},
    response::Json,
};
use uuid::Uuid;

use crate::backend::error::{BackendError, StorageError};
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::shared::ChatMessage;

/// GET /api/chat/{user_id} - conversation history with the target user
///
/// # Errors
///
/// * `401 Unauthorized` - If the caller is not authenticated
/// * `503 Service Unavailable` - If the message store is not configured
/// * `500 Internal Server Error` - If the query fails
pub async fn get_conversation(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(other_id): Path<Uuid>,
) -> Result<Json<Vec<ChatMessage>>, BackendError> {
    let store = state.messages.as_ref().ok_or_else(|| {
        tracing::error!("Message store not configured");
        BackendError::Storage(StorageError::Unavailable)
    })?;

    let messages = store
        .query_conversation(user.user_id, other_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load conversation: {:?}", e);
            BackendError::from(e)
        })?;

    tracing::debug!(
        "Loaded {} messages for conversation {} <-> {}",
        messages.len(), user.user_id, other_id
    );
    Ok(Json(messages))
}
