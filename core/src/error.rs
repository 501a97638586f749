//! Error type for store operations.

/// Errors returned by `TodoStore` lookups and mutations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// No live todo carries the requested id.
    #[error("Todo not found")]
    NotFound(i64),
}

impl StoreError {
    /// The id the failed operation referenced.
    pub fn id(&self) -> i64 {
        match self {
            StoreError::NotFound(id) => *id,
        }
    }
}
