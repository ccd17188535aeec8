//! Configuration module for the recipe backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Deployment environment. Controls API-key strictness and how much error
/// detail is exposed in response bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Environment::Production,
            _ => Environment::Development,
        }
    }

    pub fn is_production(self) -> bool {
        self == Environment::Production
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }
}

/// Which recipe backend serves /api/recipes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeBackend {
    /// Flat JSON file on local disk, full CRUD.
    File,
    /// External TheMealDB-style provider, read-only.
    MealDb,
}

impl RecipeBackend {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "mealdb" | "external" => RecipeBackend::MealDb,
            _ => RecipeBackend::File,
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Shared secret for protected routes (unset: policy depends on environment)
    pub api_key: Option<String>,
    /// Deployment environment
    pub environment: Environment,
    /// Recipe backend selection
    pub backend: RecipeBackend,
    /// Path to the JSON recipe file (file backend)
    pub data_path: PathBuf,
    /// Base URL of the external recipe provider (mealdb backend)
    pub mealdb_url: String,
    /// Timeout for outbound provider requests
    pub upstream_timeout: Duration,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let api_key = env::var("RECIPE_API_KEY").ok().filter(|k| !k.is_empty());

        let environment = env::var("RECIPE_ENV")
            .map(|v| Environment::parse(&v))
            .unwrap_or(Environment::Development);

        let backend = env::var("RECIPE_BACKEND")
            .map(|v| RecipeBackend::parse(&v))
            .unwrap_or(RecipeBackend::File);

        let data_path = env::var("RECIPE_DATA_PATH")
            .unwrap_or_else(|_| "./data/recipes.json".to_string())
            .into();

        let mealdb_url = env::var("RECIPE_MEALDB_URL")
            .unwrap_or_else(|_| "https://www.themealdb.com/api/json/v1/1".to_string());

        let upstream_timeout = env::var("RECIPE_UPSTREAM_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(5));

        let bind_addr = env::var("RECIPE_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
            .parse()
            .expect("Invalid RECIPE_BIND_ADDR format");

        let log_level = env::var("RECIPE_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Self {
            api_key,
            environment,
            backend,
            data_path,
            mealdb_url,
            upstream_timeout,
            bind_addr,
            log_level,
        }
    }
}
