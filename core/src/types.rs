//! The todo record as stored and as serialized on the wire.

use serde::{Deserialize, Serialize};

/// A single todo item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: i64,
    pub description: String,
    pub completed: bool,
}

impl Todo {
    pub fn new(id: i64, description: impl Into<String>, completed: bool) -> Self {
        Self {
            id,
            description: description.into(),
            completed,
        }
    }
}
