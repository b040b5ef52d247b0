use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub db_path: PathBuf,
    pub base_path: String,
    pub public_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        let port: u16 = match env::var("TODO_PORT") {
            Ok(port) => port.parse()?,
            Err(_) => 8080,
        };

        let db_path = env::var("TODO_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("todos.db"));

        let base_path = env::var("TODO_BASE_PATH")
            .map(|path| normalize_base_path(&path))
            .unwrap_or_default();

        let public_url = env::var("TODO_PUBLIC_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| format!("http://localhost:{port}"));

        Ok(Config {
            port,
            db_path,
            base_path,
            public_url,
        })
    }

    /// Absolute address the `/todo` routes are reachable under.
    pub fn url_base(&self) -> String {
        format!("{}{}", self.public_url, self.base_path)
    }
}

/// `todos/`, `/todos` and `/todos/` all become `/todos`; `/` becomes empty.
pub fn normalize_base_path(path: &str) -> String {
    let path = path.trim().trim_end_matches('/');
    if path.is_empty() || path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_path_is_normalized() {
        assert_eq!(normalize_base_path(""), "");
        assert_eq!(normalize_base_path("/"), "");
        assert_eq!(normalize_base_path("api"), "/api");
        assert_eq!(normalize_base_path("/api/"), "/api");
        assert_eq!(normalize_base_path("/v1/api"), "/v1/api");
    }

    #[test]
    fn url_base_joins_public_url_and_base_path() {
        let config = Config {
            port: 8080,
            db_path: PathBuf::from("todos.db"),
            base_path: "/api".to_string(),
            public_url: "https://todo.example.com".to_string(),
        };
        assert_eq!(config.url_base(), "https://todo.example.com/api");
    }
}
