//! Merge-patch for todos, also used to read create bodies.
//!
//! Only `title`, `completed` and `order` can be written. Everything else in
//! the patch, `id` and `url` included, is dropped without error, as is a
//! recognised field whose value cannot be coerced to the field's type.

use serde_json::{Map, Value};

use crate::models::{NewTodo, TodoRecord};

/// Applies `patch` onto `todo` and returns the result. The id is never touched.
pub fn merge(mut todo: TodoRecord, patch: &Map<String, Value>) -> TodoRecord {
    apply(&mut todo.title, &mut todo.completed, &mut todo.order, patch);
    todo
}

/// Builds a create request from a client body, starting from the defaults.
pub fn new_todo(fields: &Map<String, Value>) -> NewTodo {
    let mut todo = NewTodo::default();
    apply(&mut todo.title, &mut todo.completed, &mut todo.order, fields);
    todo
}

fn apply(
    title: &mut String,
    completed: &mut bool,
    order: &mut Option<i64>,
    patch: &Map<String, Value>,
) {
    for (key, value) in patch {
        match key.as_str() {
            "title" => {
                if let Some(v) = coerce_string(value) {
                    *title = v;
                }
            }
            "completed" => {
                if let Some(v) = coerce_bool(value) {
                    *completed = v;
                }
            }
            "order" => {
                if let Some(v) = coerce_order(value) {
                    *order = v;
                }
            }
            _ => {}
        }
    }
}

fn coerce_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn coerce_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) if s.eq_ignore_ascii_case("true") => Some(true),
        Value::String(s) if s.eq_ignore_ascii_case("false") => Some(false),
        Value::Number(n) => n.as_f64().map(|n| n != 0.0),
        _ => None,
    }
}

// Outer None: leave as is. Some(None): clear.
fn coerce_order(value: &Value) -> Option<Option<i64>> {
    match value {
        Value::Null => Some(None),
        Value::Number(n) => match n.as_i64() {
            Some(n) => Some(Some(n)),
            None => n
                .as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                .map(|f| Some(f as i64)),
        },
        Value::String(s) => s.trim().parse().ok().map(Some),
        _ => None,
    }
}
