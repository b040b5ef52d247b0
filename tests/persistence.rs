use todo_backend::db::{SqliteStore, TodoStore};
use todo_backend::models::NewTodo;

fn new_todo(title: &str) -> NewTodo {
    NewTodo {
        title: title.to_string(),
        ..Default::default()
    }
}

#[test]
fn test_ids_stay_unique_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todos.db");

    let first = {
        let store = SqliteStore::open(&path).unwrap();
        let todo = store.insert(&new_todo("first")).unwrap();
        store.delete_all().unwrap();
        todo
    };

    let store = SqliteStore::open(&path).unwrap();
    assert!(store.find_all().unwrap().is_empty());
    let second = store.insert(&new_todo("second")).unwrap();
    assert!(second.id > first.id);
}

#[test]
fn test_records_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todos.db");

    let saved = {
        let store = SqliteStore::open(&path).unwrap();
        let mut todo = store.insert(&new_todo("keep me")).unwrap();
        todo.completed = true;
        todo.order = Some(9);
        assert!(store.save(&todo).unwrap());
        todo
    };

    let store = SqliteStore::open(&path).unwrap();
    assert_eq!(store.find_by_id(saved.id).unwrap(), Some(saved));
}
