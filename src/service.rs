use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::info;

use crate::db::TodoStore;
use crate::error::AppError;
use crate::merge::merge;
use crate::models::{NewTodo, Todo};
use crate::url::TodoUrls;

/// The todo resource. Holds no state of its own beyond the store handle.
///
/// `update` is a read followed by a write with no lock in between, so two
/// concurrent updates to the same todo are last-writer-wins.
#[derive(Clone)]
pub struct TodoService {
    store: Arc<dyn TodoStore>,
    urls: TodoUrls,
}

impl TodoService {
    pub fn new(store: Arc<dyn TodoStore>, urls: TodoUrls) -> Self {
        Self { store, urls }
    }

    pub fn urls(&self) -> &TodoUrls {
        &self.urls
    }

    pub fn create(&self, input: &NewTodo) -> Result<Todo, AppError> {
        let todo = self.urls.attach(self.store.insert(input)?);
        info!(id = todo.id, title = %todo.title, "Created todo");
        Ok(todo)
    }

    pub fn show(&self, id: i64) -> Result<Todo, AppError> {
        match self.store.find_by_id(id)? {
            Some(record) => Ok(self.urls.attach(record)),
            None => Err(AppError::NotFound),
        }
    }

    pub fn list(&self) -> Result<Vec<Todo>, AppError> {
        let todos: Vec<Todo> = self
            .store
            .find_all()?
            .into_iter()
            .map(|record| self.urls.attach(record))
            .collect();
        info!(count = todos.len(), "Listed todos");
        Ok(todos)
    }

    pub fn update(&self, id: i64, patch: &Map<String, Value>) -> Result<Todo, AppError> {
        let existing = self.store.find_by_id(id)?.ok_or(AppError::NotFound)?;
        let merged = merge(existing, patch);

        if !self.store.save(&merged)? {
            // deleted between the read and the write
            return Err(AppError::NotFound);
        }

        let todo = self
            .store
            .find_by_id(id)?
            .map(|record| self.urls.attach(record))
            .ok_or(AppError::NotFound)?;
        info!(id = todo.id, completed = todo.completed, "Updated todo");
        Ok(todo)
    }

    /// Succeeds whether or not the todo existed.
    pub fn delete(&self, id: i64) -> Result<(), AppError> {
        let existed = self.store.delete_by_id(id)?;
        info!(id, existed, "Deleted todo");
        Ok(())
    }

    pub fn delete_all(&self) -> Result<(), AppError> {
        let count = self.store.delete_all()?;
        info!(count, "Deleted all todos");
        Ok(())
    }
}
