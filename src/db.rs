use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{Connection, OptionalExtension, Row};

use crate::error::AppError;
use crate::models::{NewTodo, TodoRecord};

pub type DbPool = Arc<Mutex<Connection>>;

/// Persistence for todos. Each call is atomic on its own; callers composing
/// a read and a write get no isolation between them.
pub trait TodoStore: Send + Sync {
    fn insert(&self, todo: &NewTodo) -> Result<TodoRecord, AppError>;
    fn find_by_id(&self, id: i64) -> Result<Option<TodoRecord>, AppError>;
    fn find_all(&self) -> Result<Vec<TodoRecord>, AppError>;
    /// Writes an existing record back. Returns `false` if the row is gone.
    fn save(&self, todo: &TodoRecord) -> Result<bool, AppError>;
    fn delete_by_id(&self, id: i64) -> Result<bool, AppError>;
    fn delete_all(&self) -> Result<usize, AppError>;
}

pub fn init_db(path: impl AsRef<Path>) -> rusqlite::Result<DbPool> {
    let conn = Connection::open(path)?;
    init_schema(&conn)?;
    Ok(Arc::new(Mutex::new(conn)))
}

pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    // AUTOINCREMENT keeps ids from being reissued after deletes
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS todos (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            completed INTEGER NOT NULL DEFAULT 0,
            position INTEGER
        );
        ",
    )
}

#[derive(Clone)]
pub struct SqliteStore {
    pool: DbPool,
}

impl SqliteStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn open(path: impl AsRef<Path>) -> rusqlite::Result<Self> {
        Ok(Self::new(init_db(path)?))
    }

    pub fn open_in_memory() -> rusqlite::Result<Self> {
        let conn = Connection::open_in_memory()?;
        init_schema(&conn)?;
        Ok(Self::new(Arc::new(Mutex::new(conn))))
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, AppError> {
        self.pool
            .lock()
            .map_err(|_| {
                tracing::error!("Store failure: database lock poisoned");
                AppError::Database("database lock poisoned".to_string())
            })
    }
}

fn todo_from_row(row: &Row<'_>) -> rusqlite::Result<TodoRecord> {
    Ok(TodoRecord {
        id: row.get(0)?,
        title: row.get(1)?,
        completed: row.get::<_, i32>(2)? != 0,
        order: row.get(3)?,
    })
}

fn get_todo_internal(conn: &Connection, id: i64) -> Result<Option<TodoRecord>, AppError> {
    let todo = conn
        .query_row(
            "SELECT id, title, completed, position FROM todos WHERE id = ?1",
            [id],
            todo_from_row,
        )
        .optional()?;
    Ok(todo)
}

impl TodoStore for SqliteStore {
    fn insert(&self, todo: &NewTodo) -> Result<TodoRecord, AppError> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO todos (title, completed, position) VALUES (?1, ?2, ?3)",
            (&todo.title, todo.completed as i32, todo.order),
        )?;
        let id = conn.last_insert_rowid();

        get_todo_internal(&conn, id)?
            .ok_or_else(|| {
                tracing::error!(id, "Store failure: inserted todo not readable");
                AppError::Database(format!("inserted todo {id} not readable"))
            })
    }

    fn find_by_id(&self, id: i64) -> Result<Option<TodoRecord>, AppError> {
        let conn = self.conn()?;
        get_todo_internal(&conn, id)
    }

    fn find_all(&self) -> Result<Vec<TodoRecord>, AppError> {
        let conn = self.conn()?;
        let mut stmt =
            conn.prepare("SELECT id, title, completed, position FROM todos ORDER BY id ASC")?;
        let todos = stmt
            .query_map([], todo_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(todos)
    }

    fn save(&self, todo: &TodoRecord) -> Result<bool, AppError> {
        let conn = self.conn()?;
        let rows = conn.execute(
            "UPDATE todos SET title = ?1, completed = ?2, position = ?3 WHERE id = ?4",
            (&todo.title, todo.completed as i32, todo.order, todo.id),
        )?;
        Ok(rows > 0)
    }

    fn delete_by_id(&self, id: i64) -> Result<bool, AppError> {
        let conn = self.conn()?;
        let rows = conn.execute("DELETE FROM todos WHERE id = ?1", [id])?;
        Ok(rows > 0)
    }

    fn delete_all(&self) -> Result<usize, AppError> {
        let conn = self.conn()?;
        let rows = conn.execute("DELETE FROM todos", [])?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_todo(title: &str) -> NewTodo {
        NewTodo {
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn insert_assigns_increasing_ids() {
        let store = SqliteStore::open_in_memory().unwrap();
        let a = store.insert(&new_todo("a")).unwrap();
        let b = store.insert(&new_todo("b")).unwrap();
        assert!(b.id > a.id);
        assert!(!a.completed);
        assert_eq!(a.order, None);
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let store = SqliteStore::open_in_memory().unwrap();
        let first = store.insert(&new_todo("a")).unwrap();
        assert!(store.delete_by_id(first.id).unwrap());
        store.delete_all().unwrap();

        let second = store.insert(&new_todo("b")).unwrap();
        assert!(second.id > first.id);
    }

    #[test]
    fn save_reports_missing_rows() {
        let store = SqliteStore::open_in_memory().unwrap();
        let mut todo = store.insert(&new_todo("a")).unwrap();
        todo.completed = true;
        todo.order = Some(3);
        assert!(store.save(&todo).unwrap());
        assert_eq!(store.find_by_id(todo.id).unwrap(), Some(todo.clone()));

        store.delete_by_id(todo.id).unwrap();
        assert!(!store.save(&todo).unwrap());
        assert_eq!(store.find_by_id(todo.id).unwrap(), None);
    }

    #[test]
    fn find_all_is_in_insertion_order() {
        let store = SqliteStore::open_in_memory().unwrap();
        for title in ["one", "two", "three"] {
            store.insert(&new_todo(title)).unwrap();
        }
        let titles: Vec<_> = store
            .find_all()
            .unwrap()
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, ["one", "two", "three"]);

        assert_eq!(store.delete_all().unwrap(), 3);
        assert!(store.find_all().unwrap().is_empty());
        assert_eq!(store.delete_all().unwrap(), 0);
    }
}
