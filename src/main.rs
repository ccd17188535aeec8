//! Recipe Catalog Backend
//!
//! A REST backend serving a recipe catalog from a local JSON file or an
//! external read-only recipe provider, with API-key protected user management.

mod api;
mod auth;
mod config;
mod errors;
mod models;
mod store;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{Method, StatusCode, Uri},
    middleware,
    response::{Html, IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::{Config, RecipeBackend};
use store::{FileRecipeStore, MealDbGateway, RecipeStore, UserStore};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub recipes: Arc<dyn RecipeStore>,
    pub users: Arc<UserStore>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    errors::set_expose_error_detail(!config.environment.is_production());

    tracing::info!("Starting Recipe Catalog Backend");
    tracing::info!("Environment: {}", config.environment.as_str());
    tracing::info!("Bind address: {}", config.bind_addr);

    // Warn if the API key is not configured
    if config.api_key.is_none() {
        if config.environment.is_production() {
            tracing::warn!(
                "No API key configured (RECIPE_API_KEY). Protected routes will reject all requests!"
            );
        } else {
            tracing::warn!("No API key configured (RECIPE_API_KEY). Authentication is disabled!");
        }
    }

    // Select the recipe backend
    let recipes: Arc<dyn RecipeStore> = match config.backend {
        RecipeBackend::File => {
            tracing::info!("Recipe backend: file ({})", config.data_path.display());
            Arc::new(FileRecipeStore::new(config.data_path.clone()))
        }
        RecipeBackend::MealDb => {
            tracing::info!("Recipe backend: external provider ({})", config.mealdb_url);
            Arc::new(MealDbGateway::new(
                config.mealdb_url.clone(),
                config.upstream_timeout,
            )?)
        }
    };

    // Create application state
    let state = AppState {
        recipes,
        users: Arc::new(UserStore::new()),
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Clone key and environment for the auth layer
    let api_key = state.config.api_key.clone();
    let environment = state.config.environment;

    // Public recipe routes
    let recipe_routes = Router::new()
        .route("/recipes", get(api::list_recipes))
        .route("/recipes", post(api::create_recipe))
        .route("/recipes/random", get(api::random_recipe))
        .route("/recipes/{id}", get(api::get_recipe))
        .route("/recipes/{id}", put(api::update_recipe))
        .route("/recipes/{id}", delete(api::delete_recipe));

    // User routes sit behind the API-key gate
    let user_routes = Router::new()
        .route("/users", get(api::list_users))
        .route("/users", post(api::create_user))
        .route("/users/{id}", get(api::get_user))
        .route("/users/{id}", put(api::update_user))
        .route("/users/{id}", delete(api::delete_user))
        .layer(middleware::from_fn(move |req, next| {
            auth::api_key_layer(api_key.clone(), environment, req, next)
        }));

    let api_routes = Router::new()
        .route("/", get(api_info))
        .merge(recipe_routes)
        .merge(user_routes);

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(health_check))
        .fallback(fallback_handler)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "OK",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "environment": state.config.environment.as_str(),
    }))
}

/// API info endpoint.
async fn api_info() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Welcome to the Recipe Catalog API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "users": "/api/users",
            "recipes": "/api/recipes",
            "randomRecipe": "/api/recipes/random",
            "searchRecipes": "/api/recipes?search=pasta",
        },
    }))
}

/// Fallback document served outside the API namespace.
const FALLBACK_PAGE: &str = r#"<!DOCTYPE html>
<html>
  <head><title>Recipe Catalog</title></head>
  <body>
    <h1>Recipe Catalog</h1>
    <p>The API lives under <a href="/api">/api</a>.</p>
  </body>
</html>
"#;

/// Catch-all for unmatched routes: structured JSON under the API namespace,
/// the fallback document elsewhere.
async fn fallback_handler(method: Method, uri: Uri) -> Response {
    if uri.path().starts_with("/api/") {
        let body = serde_json::json!({
            "error": "Not Found",
            "message": format!("Route {} {} not found", method, uri.path()),
        });
        (StatusCode::NOT_FOUND, Json(body)).into_response()
    } else {
        Html(FALLBACK_PAGE).into_response()
    }
}
