//! In-memory data layer for the todo service.
//!
//! # Overview
//! Owns the todo collection and exposes lookup, filter-by-status, insert,
//! update and delete operations. Nothing here touches the network or an async
//! runtime; the server crate wraps a `TodoStore` in a lock and injects it into
//! its handlers.
//!
//! # Design
//! - `TodoStore` keys records by id in a `BTreeMap`. New ids are always
//!   `max + 1`, so ascending id order is also insertion order.
//! - Every mutation affects at most one record and either succeeds or fails
//!   with `StoreError::NotFound`.

pub mod error;
pub mod store;
pub mod types;

pub use error::StoreError;
pub use store::TodoStore;
pub use types::Todo;
