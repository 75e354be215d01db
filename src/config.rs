//! Environment-driven configuration.

use std::path::PathBuf;

use axum::http::HeaderValue;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::db::Database;

/// Default port for `serve`.
pub const DEFAULT_PORT: u16 = 5000;

/// Default API base URL used by the CLI client.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000/api";

/// Server configuration loaded from environment variables.
#[derive(Clone, Debug, Default)]
pub struct ServerConfig {
    /// Database file (from ROOMMATE_LEDGER_DB). Platform data dir when unset.
    pub db_path: Option<PathBuf>,
    /// Allowed CORS origins (from ROOMMATE_LEDGER_CORS_ORIGINS, comma-separated).
    /// Unset means permissive.
    pub cors_origins: Option<Vec<String>>,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let db_path = lookup("ROOMMATE_LEDGER_DB")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        let cors_origins = lookup("ROOMMATE_LEDGER_CORS_ORIGINS").map(|s| {
            s.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        });

        Self {
            db_path,
            cors_origins,
        }
    }

    /// Open (but do not migrate) the configured database.
    pub fn open_database(&self) -> anyhow::Result<Database> {
        match &self.db_path {
            Some(path) => Database::open(path.clone()),
            None => Database::open_default(),
        }
    }

    pub fn cors_layer(&self) -> CorsLayer {
        let Some(origins) = &self.cors_origins else {
            return CorsLayer::permissive();
        };

        let allowed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                    None
                }
            })
            .collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(allowed))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[]));
        assert!(config.db_path.is_none());
        assert!(config.cors_origins.is_none());
    }

    #[test]
    fn reads_db_path_and_origins() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("ROOMMATE_LEDGER_DB", "/tmp/ledger/test.db"),
            (
                "ROOMMATE_LEDGER_CORS_ORIGINS",
                "http://localhost:3000, https://house.example ,",
            ),
        ]));

        assert_eq!(config.db_path, Some(PathBuf::from("/tmp/ledger/test.db")));
        assert_eq!(
            config.cors_origins,
            Some(vec![
                "http://localhost:3000".to_string(),
                "https://house.example".to_string()
            ])
        );
    }

    #[test]
    fn blank_db_path_is_ignored() {
        let config = ServerConfig::from_lookup(lookup(&[("ROOMMATE_LEDGER_DB", "  ")]));
        assert!(config.db_path.is_none());
    }

    #[test]
    fn opens_configured_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("ledger.db");
        let config = ServerConfig {
            db_path: Some(path.clone()),
            cors_origins: None,
        };

        let db = config.open_database().unwrap();
        db.migrate().unwrap();
        assert!(path.exists());
    }
}
