use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

use axum::http::HeaderValue;

use crate::schemas::ClientConfig;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_DATABASE: &str = "todos.db";
const DEFAULT_CORS_ORIGINS: [&str; 4] = [
    "http://localhost:3000",
    "http://127.0.0.1:3000",
    "http://localhost:8080",
    "http://127.0.0.1:8080",
];

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("TODO_API_HOST is not a valid IP address: {0:?}")]
    InvalidHost(String),
    #[error("TODO_API_PORT is not a valid port: {0:?}")]
    InvalidPort(String),
    #[error("CORS_ORIGINS contains an invalid origin: {0:?}")]
    InvalidOrigin(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub database: PathBuf,
    pub cors_origins: Vec<HeaderValue>,
    pub backend_protocol: String,
    pub backend_host: String,
    pub backend_port: String,
    pub environment: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            database: PathBuf::from(DEFAULT_DATABASE),
            cors_origins: DEFAULT_CORS_ORIGINS
                .into_iter()
                .map(HeaderValue::from_static)
                .collect(),
            backend_protocol: "http".to_string(),
            backend_host: "localhost".to_string(),
            backend_port: DEFAULT_PORT.to_string(),
            environment: "development".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from `lookup`, falling back to defaults for
    /// unset or empty variables.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Config::default();

        if let Some(host) = var("TODO_API_HOST") {
            config.host = host
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidHost(host))?;
        }
        if let Some(port) = var("TODO_API_PORT") {
            config.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(port))?;
        }
        if let Some(path) = var("TODO_API_DATABASE") {
            config.database = PathBuf::from(path);
        }
        if let Some(origins) = var("CORS_ORIGINS") {
            config.cors_origins = parse_origins(&origins)?;
        }
        if let Some(protocol) = var("BACKEND_PROTOCOL") {
            config.backend_protocol = protocol;
        }
        if let Some(host) = var("BACKEND_HOST") {
            config.backend_host = host;
        }
        if let Some(port) = var("BACKEND_PORT") {
            config.backend_port = port;
        }
        if let Some(environment) = var("ENVIRONMENT") {
            config.environment = environment;
        }

        Ok(config)
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            api_base_url: format!(
                "{}://{}:{}",
                self.backend_protocol, self.backend_host, self.backend_port
            ),
            environment: self.environment.clone(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

fn parse_origins(raw: &str) -> Result<Vec<HeaderValue>, ConfigError> {
    let origins = raw
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            // Credentials are allowed, which rules out a wildcard origin.
            if origin == "*" {
                return Err(ConfigError::InvalidOrigin(origin.to_string()));
            }
            HeaderValue::from_str(origin)
                .map_err(|_| ConfigError::InvalidOrigin(origin.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if origins.is_empty() {
        return Ok(Config::default().cors_origins);
    }
    Ok(origins)
}
