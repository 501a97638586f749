//! HTTP surface of the todo service.
//!
//! Wires the routing table to `handlers` and serves it over a `TcpListener`.
//! The single `TodoStore` is created here, wrapped in a lock and handed to
//! every handler through axum state.

use std::{future::Future, sync::Arc};

use axum::{
    routing::{get, put},
    Router,
};
use tokio::{net::TcpListener, sync::RwLock};
use todo_core::TodoStore;
use tower_http::trace::TraceLayer;

pub mod config;
pub mod error;
pub mod handlers;
pub mod payload;

pub use error::ApiError;
pub use payload::{Decoded, ListQuery, Message, TodoPayload};
pub use todo_core::Todo;

pub type SharedStore = Arc<RwLock<TodoStore>>;

pub fn shared_store(store: TodoStore) -> SharedStore {
    Arc::new(RwLock::new(store))
}

/// Router over a fresh seeded store.
pub fn app() -> Router {
    router(shared_store(TodoStore::seeded()))
}

pub fn router(store: SharedStore) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route(
            "/api/todos",
            get(handlers::list_todos).post(handlers::add_todo),
        )
        .route(
            "/api/todos/{id}",
            get(handlers::todo_detail)
                .put(handlers::update_todo)
                .delete(handlers::delete_todo),
        )
        .route(
            "/api/todos/{id}/mark_completed",
            put(handlers::mark_completed),
        )
        .route(
            "/api/todos/{id}/mark_incomplete",
            put(handlers::mark_incomplete),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Serve the seeded app until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app())
        .with_graceful_shutdown(shutdown)
        .await
}

pub async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(err) => tracing::error!("Failed to listen for shutdown signal: {}", err),
    }
}
