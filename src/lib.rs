pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod merge;
pub mod models;
pub mod service;
pub mod url;

use std::sync::Arc;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use service::TodoService;

#[derive(Clone)]
pub struct AppState {
    pub todos: TodoService,
    pub base_path: Arc<String>,
}

pub fn create_app(state: AppState) -> Router {
    let base_path = state.base_path.clone();
    let url_base = state.todos.urls().base().to_string();

    let app_routes = Router::new()
        .route("/todo", get(handlers::todo::list_all_todos))
        .route("/todo", post(handlers::todo::create_new_todo))
        .route("/todo", delete(handlers::todo::delete_all_todos))
        .route("/todo/{id}", get(handlers::todo::get_single_todo))
        .route("/todo/{id}", patch(handlers::todo::patch_existing_todo))
        .route("/todo/{id}", delete(handlers::todo::delete_existing_todo))
        .layer(
            tower::ServiceBuilder::new()
                .layer(tower_http::trace::TraceLayer::new_for_http())
                .layer(tower_http::cors::CorsLayer::permissive())
                .layer(tower_http::compression::CompressionLayer::new()),
        )
        .with_state(state);

    tracing::info!("base_path: {base_path:?}, urls under {url_base}");

    if base_path.is_empty() {
        app_routes
    } else {
        Router::new().nest(&*base_path, app_routes)
    }
}
