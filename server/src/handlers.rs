//! One async handler per route. Each parses its inputs, takes the store lock
//! for the duration of a single store call and answers with JSON.

use axum::{
    body::Bytes,
    extract::{Query, State},
    Json,
};
use todo_core::Todo;

use crate::error::{ApiError, TodoId};
use crate::payload::{Decoded, ListQuery, Message, TodoPayload};
use crate::SharedStore;

/// Decode a mutation body, falling back to the empty payload when it is not
/// valid JSON.
fn lenient_payload(body: &Bytes) -> TodoPayload {
    let decoded = Decoded::<TodoPayload>::from_slice(body);
    match &decoded {
        Decoded::Parsed(_) => {}
        Decoded::Empty => tracing::debug!("Empty todo payload"),
        Decoded::Malformed(err) => tracing::warn!("Ignoring malformed todo payload: {}", err),
    }
    decoded.unwrap_or_default()
}

#[tracing::instrument]
pub async fn root() -> Json<Message> {
    Json(Message::new("Hello World!"))
}

#[tracing::instrument(skip(store))]
pub async fn list_todos(
    State(store): State<SharedStore>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Json<Vec<Todo>> {
    let query = ListQuery::from_pairs(pairs);
    let store = store.read().await;
    let todos = match query.status() {
        Some(completed) => store.by_status(completed),
        None => store.all(),
    };
    Json(todos)
}

#[tracing::instrument(skip(store))]
pub async fn todo_detail(
    State(store): State<SharedStore>,
    TodoId(id): TodoId,
) -> Result<Json<Todo>, ApiError> {
    let todo = store.read().await.detail(id).map_err(ApiError::detail)?;
    Ok(Json(todo))
}

#[tracing::instrument(skip(store, body))]
pub async fn add_todo(State(store): State<SharedStore>, body: Bytes) -> Json<Message> {
    let payload = lenient_payload(&body);
    let todo = store.write().await.add(payload.description);
    tracing::info!("Added todo {}", todo.id);
    Json(Message::new("Successfully added"))
}

#[tracing::instrument(skip(store, body))]
pub async fn update_todo(
    State(store): State<SharedStore>,
    TodoId(id): TodoId,
    body: Bytes,
) -> Result<Json<Message>, ApiError> {
    let payload = lenient_payload(&body);
    store
        .write()
        .await
        .update(id, payload.description)
        .map_err(ApiError::mutation)?;
    Ok(Json(Message::new("Successfully updated")))
}

#[tracing::instrument(skip(store))]
pub async fn mark_completed(
    State(store): State<SharedStore>,
    TodoId(id): TodoId,
) -> Result<Json<Message>, ApiError> {
    set_completed(&store, id, true).await?;
    Ok(Json(Message::new("Successfully marked completed")))
}

#[tracing::instrument(skip(store))]
pub async fn mark_incomplete(
    State(store): State<SharedStore>,
    TodoId(id): TodoId,
) -> Result<Json<Message>, ApiError> {
    set_completed(&store, id, false).await?;
    Ok(Json(Message::new("Successfully marked incomplete")))
}

async fn set_completed(store: &SharedStore, id: i64, completed: bool) -> Result<(), ApiError> {
    store
        .write()
        .await
        .set_completed(id, completed)
        .map_err(ApiError::mutation)
}

#[tracing::instrument(skip(store))]
pub async fn delete_todo(
    State(store): State<SharedStore>,
    TodoId(id): TodoId,
) -> Result<Json<Message>, ApiError> {
    store.write().await.delete(id).map_err(ApiError::mutation)?;
    tracing::info!("Deleted todo {}", id);
    Ok(Json(Message::new("Successfully deleted")))
}
