use std::path::PathBuf;

use axum::http::HeaderValue;
use labsite_db::research_store::ResearchBackend;

/// A configuration value that could not be used.
#[derive(Debug, thiserror::Error)]
#[error("Invalid value '{value}' for {var}: {reason}")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
    pub reason: String,
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<HeaderValue>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// SQLite database URL (default: `sqlite://data/app.db`).
    pub database_url: String,
    /// Directory holding the JSON research documents (default: `data`).
    pub data_dir: PathBuf,
    /// Directory listed by `/api/background-images`.
    pub background_image_dir: PathBuf,
    /// Backend for research areas, directions and features.
    pub research_backend: ResearchBackend,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                     |
    /// |------------------------|-----------------------------|
    /// | `HOST`                 | `0.0.0.0`                   |
    /// | `PORT`                 | `3000`                      |
    /// | `CORS_ORIGINS`         | `http://localhost:3000`     |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                        |
    /// | `DATABASE_URL`         | `sqlite://data/app.db`      |
    /// | `DATA_DIR`             | `data`                      |
    /// | `BACKGROUND_IMAGE_DIR` | `public/upload/background`  |
    /// | `RESEARCH_STORE`       | `document`                  |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        let port_raw = var("PORT", "3000");
        let port: u16 = port_raw.trim().parse().map_err(|err| ConfigError {
            var: "PORT",
            value: port_raw.clone(),
            reason: format!("{err}"),
        })?;

        let timeout_raw = var("REQUEST_TIMEOUT_SECS", "30");
        let request_timeout_secs: u64 = timeout_raw.trim().parse().map_err(|err| ConfigError {
            var: "REQUEST_TIMEOUT_SECS",
            value: timeout_raw.clone(),
            reason: format!("{err}"),
        })?;

        let cors_origins = var("CORS_ORIGINS", "http://localhost:3000")
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(|origin| {
                HeaderValue::from_str(origin).map_err(|err| ConfigError {
                    var: "CORS_ORIGINS",
                    value: origin.to_string(),
                    reason: err.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let backend_raw = var("RESEARCH_STORE", "document");
        let research_backend = backend_raw.parse().map_err(|err| ConfigError {
            var: "RESEARCH_STORE",
            value: backend_raw.clone(),
            reason: format!("{err}"),
        })?;

        Ok(Self {
            host: var("HOST", "0.0.0.0"),
            port,
            cors_origins,
            request_timeout_secs,
            database_url: var("DATABASE_URL", "sqlite://data/app.db"),
            data_dir: PathBuf::from(var("DATA_DIR", "data")),
            background_image_dir: PathBuf::from(var(
                "BACKGROUND_IMAGE_DIR",
                "public/upload/background",
            )),
            research_backend,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|name| vars.get(name).cloned())
    }

    fn origins(config: &ServerConfig) -> Vec<&str> {
        config
            .cors_origins
            .iter()
            .map(|origin| origin.to_str().unwrap())
            .collect()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(origins(&config), ["http://localhost:3000"]);
        assert_eq!(config.database_url, "sqlite://data/app.db");
        assert_eq!(config.research_backend, ResearchBackend::Document);
    }

    #[test]
    fn origins_are_split_and_trimmed() {
        let config =
            config_from(&[("CORS_ORIGINS", "http://a.test, http://b.test,,")]).unwrap();
        assert_eq!(origins(&config), ["http://a.test", "http://b.test"]);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = config_from(&[("PORT", "eighty")]).unwrap_err();
        assert_eq!(err.var, "PORT");

        let err = config_from(&[("RESEARCH_STORE", "redis")]).unwrap_err();
        assert_eq!(err.var, "RESEARCH_STORE");
    }

    #[test]
    fn sqlite_backend_is_selectable() {
        let config = config_from(&[("RESEARCH_STORE", "sqlite")]).unwrap();
        assert_eq!(config.research_backend, ResearchBackend::Sqlite);
    }
}
