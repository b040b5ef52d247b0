use crate::models::{Todo, TodoRecord};

/// Derives the canonical address of a todo from its id.
#[derive(Debug, Clone)]
pub struct TodoUrls {
    base: String,
}

impl TodoUrls {
    /// `base` is the absolute address the `/todo` routes are mounted under,
    /// e.g. `http://localhost:8080` or `https://example.com/api`.
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn url_for(&self, id: i64) -> String {
        format!("{}/todo/{}", self.base, id)
    }

    /// Turns a record that crossed the store boundary into its client view.
    pub fn attach(&self, record: TodoRecord) -> Todo {
        let url = self.url_for(record.id);
        Todo {
            id: record.id,
            title: record.title,
            completed: record.completed,
            order: record.order,
            url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_is_base_todo_id() {
        let urls = TodoUrls::new("http://localhost:8080/");
        assert_eq!(urls.url_for(3), "http://localhost:8080/todo/3");
    }

    #[test]
    fn attach_keeps_fields_and_derives_url() {
        let urls = TodoUrls::new("https://example.com/api");
        let todo = urls.attach(TodoRecord {
            id: 12,
            title: "Walk dog".to_string(),
            completed: true,
            order: Some(2),
        });
        assert_eq!(todo.id, 12);
        assert_eq!(todo.title, "Walk dog");
        assert!(todo.completed);
        assert_eq!(todo.order, Some(2));
        assert_eq!(todo.url, "https://example.com/api/todo/12");
    }
}
