use serde::Serialize;

/// A todo as it is persisted. Carries no `url`; see [`Todo`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoRecord {
    pub id: i64,
    pub title: String,
    pub completed: bool,
    pub order: Option<i64>,
}

/// A todo as it is returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    pub url: String,
}

/// Fields of a todo about to be inserted.
#[derive(Debug, Clone, Default)]
pub struct NewTodo {
    pub title: String,
    pub completed: bool,
    pub order: Option<i64>,
}
