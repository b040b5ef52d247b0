use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{Map, Value};

use crate::error::AppError;
use crate::merge::new_todo;
use crate::models::Todo;
use crate::AppState;

type JsonBody = Result<Json<Value>, JsonRejection>;
type IdPath = Result<Path<i64>, PathRejection>;

fn object(body: JsonBody) -> Result<Map<String, Value>, AppError> {
    match body? {
        Json(Value::Object(map)) => Ok(map),
        _ => Err(AppError::BadRequest(
            "Request body must be a JSON object".to_string(),
        )),
    }
}

pub async fn list_all_todos(State(state): State<AppState>) -> Result<Json<Vec<Todo>>, AppError> {
    Ok(Json(state.todos.list()?))
}

pub async fn create_new_todo(
    State(state): State<AppState>,
    body: JsonBody,
) -> Result<Json<Todo>, AppError> {
    let fields = object(body)?;
    Ok(Json(state.todos.create(&new_todo(&fields))?))
}

pub async fn get_single_todo(
    State(state): State<AppState>,
    id: IdPath,
) -> Result<Json<Todo>, AppError> {
    let Path(id) = id?;
    Ok(Json(state.todos.show(id)?))
}

pub async fn patch_existing_todo(
    State(state): State<AppState>,
    id: IdPath,
    body: JsonBody,
) -> Result<Json<Todo>, AppError> {
    let Path(id) = id?;
    let patch = object(body)?;
    Ok(Json(state.todos.update(id, &patch)?))
}

pub async fn delete_existing_todo(
    State(state): State<AppState>,
    id: IdPath,
) -> Result<impl IntoResponse, AppError> {
    let Path(id) = id?;
    state.todos.delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_all_todos(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    state.todos.delete_all()?;
    Ok(StatusCode::NO_CONTENT)
}
