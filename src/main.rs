use std::{net::Ipv4Addr, sync::Arc};

use tracing::info;

use todo_backend::config::Config;
use todo_backend::db::SqliteStore;
use todo_backend::service::TodoService;
use todo_backend::url::TodoUrls;
use todo_backend::{create_app, logging, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let config = Config::from_env()?;

    let store = SqliteStore::open(&config.db_path)?;
    info!(path = %config.db_path.display(), "opened database");

    let state = AppState {
        todos: TodoService::new(Arc::new(store), TodoUrls::new(config.url_base())),
        base_path: Arc::new(config.base_path.clone()),
    };
    let app = create_app(state);
    let addr = (Ipv4Addr::UNSPECIFIED, config.port);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("running on {addr:?}");

    axum::serve(listener, app).await?;
    Ok(())
}
