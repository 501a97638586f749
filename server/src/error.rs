use axum::{
    extract::{FromRequestParts, Path},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use todo_core::StoreError;

use crate::payload::Message;

/// Errors a handler reports to the client as `{"message": ...}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The `{id}` path segment is not an integer.
    #[error("Invalid Id")]
    InvalidId(String),

    /// The id parsed but no todo carries it. The detail endpoint answers 400
    /// here while mutations answer 404, so the status travels with the error.
    #[error("{source}")]
    NotFound {
        status: StatusCode,
        #[source]
        source: StoreError,
    },
}

impl ApiError {
    /// Lookup miss on `GET /api/todos/{id}`.
    pub fn detail(source: StoreError) -> Self {
        ApiError::NotFound {
            status: StatusCode::BAD_REQUEST,
            source,
        }
    }

    /// Miss on update, status change or delete.
    pub fn mutation(source: StoreError) -> Self {
        ApiError::NotFound {
            status: StatusCode::NOT_FOUND,
            source,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidId(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound { status, .. } => *status,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::InvalidId(raw) => tracing::debug!("Rejected id {:?}", raw),
            ApiError::NotFound { source, .. } => tracing::debug!("No todo with id {}", source.id()),
        }
        (self.status(), Json(Message::new(self.to_string()))).into_response()
    }
}

/// Parse the `{id}` path segment.
pub fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::InvalidId(raw.to_string()))
}

/// The `{id}` path segment as an integer. Any failure, including a segment
/// that does not percent-decode to UTF-8, is rejected as `InvalidId`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TodoId(pub i64);

impl<S> FromRequestParts<S> for TodoId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<String>::from_request_parts(parts, state).await {
            Ok(Path(raw)) => parse_id(&raw).map(TodoId),
            Err(rejection) => Err(ApiError::InvalidId(rejection.body_text())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_message(response: Response) -> Message {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[test]
    fn parse_id_accepts_signed_integers() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert_eq!(parse_id("+7").unwrap(), 7);
        assert_eq!(parse_id("-3").unwrap(), -3);
    }

    #[test]
    fn parse_id_rejects_non_integers() {
        for raw in ["abc", "", "1.5", "12a", " 1"] {
            assert!(matches!(parse_id(raw), Err(ApiError::InvalidId(_))), "{raw:?}");
        }
    }

    #[tokio::test]
    async fn invalid_id_is_bad_request() {
        let response = ApiError::InvalidId("abc".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_message(response).await, Message::new("Invalid Id"));
    }

    #[tokio::test]
    async fn not_found_status_depends_on_endpoint() {
        let detail = ApiError::detail(StoreError::NotFound(9)).into_response();
        assert_eq!(detail.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_message(detail).await, Message::new("Todo not found"));

        let mutation = ApiError::mutation(StoreError::NotFound(9)).into_response();
        assert_eq!(mutation.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_message(mutation).await, Message::new("Todo not found"));
    }
}
