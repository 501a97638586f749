//! The todo collection and its CRUD operations.
//!
//! # Design
//! Records live in a `BTreeMap<i64, Todo>`. Because `add` always assigns
//! `max + 1`, iterating the map in key order yields insertion order, so
//! listings need no separate ordering vector.

use std::collections::BTreeMap;

use crate::error::StoreError;
use crate::types::Todo;

/// Owns every live todo. The server holds exactly one instance.
#[derive(Debug, Clone, Default)]
pub struct TodoStore {
    todos: BTreeMap<i64, Todo>,
}

impl TodoStore {
    /// An empty store. The first `add` receives id 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// The two records every process starts with.
    pub fn seeded() -> Self {
        Self::from_todos([
            Todo::new(1, "Read a book", false),
            Todo::new(2, "Exercise", true),
        ])
    }

    /// Build a store from existing records. A later record with a duplicate
    /// id replaces the earlier one.
    pub fn from_todos(todos: impl IntoIterator<Item = Todo>) -> Self {
        Self {
            todos: todos.into_iter().map(|todo| (todo.id, todo)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    /// Id the next `add` will assign.
    pub fn next_id(&self) -> i64 {
        self.todos.keys().next_back().map_or(1, |max| max + 1)
    }

    pub fn all(&self) -> Vec<Todo> {
        self.todos.values().cloned().collect()
    }

    pub fn by_status(&self, completed: bool) -> Vec<Todo> {
        self.todos
            .values()
            .filter(|todo| todo.completed == completed)
            .cloned()
            .collect()
    }

    pub fn detail(&self, id: i64) -> Result<Todo, StoreError> {
        self.todos.get(&id).cloned().ok_or(StoreError::NotFound(id))
    }

    /// Insert a new incomplete todo. The description is stored as given,
    /// empty strings included.
    pub fn add(&mut self, description: impl Into<String>) -> Todo {
        let todo = Todo::new(self.next_id(), description, false);
        self.todos.insert(todo.id, todo.clone());
        todo
    }

    /// Replace the description, leaving id and completion untouched.
    pub fn update(&mut self, id: i64, description: impl Into<String>) -> Result<(), StoreError> {
        let todo = self.todos.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        todo.description = description.into();
        Ok(())
    }

    pub fn set_completed(&mut self, id: i64, completed: bool) -> Result<(), StoreError> {
        let todo = self.todos.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        todo.completed = completed;
        Ok(())
    }

    pub fn delete(&mut self, id: i64) -> Result<(), StoreError> {
        self.todos
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }
}
