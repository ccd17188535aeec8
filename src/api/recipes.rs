//! Recipe API endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::{CreateRecipeRequest, Recipe, UpdateRecipeRequest};
use crate::AppState;

/// Query parameters for the recipe collection.
#[derive(Debug, Deserialize)]
pub struct ListRecipesQuery {
    pub search: Option<String>,
    pub category: Option<String>,
}

fn recipe_not_found() -> AppError {
    AppError::NotFound("Recipe not found".to_string())
}

/// GET /api/recipes - List recipes, optionally filtered.
pub async fn list_recipes(
    State(state): State<AppState>,
    Query(params): Query<ListRecipesQuery>,
) -> Result<Json<Vec<Recipe>>, AppError> {
    // search takes precedence over category
    let recipes = if let Some(search) = params.search.as_deref() {
        state.recipes.search(search).await?
    } else if let Some(category) = params.category.as_deref() {
        state.recipes.list_by_category(category).await?
    } else {
        state.recipes.list().await?
    };

    Ok(Json(recipes))
}

/// GET /api/recipes/random - One random recipe.
pub async fn random_recipe(State(state): State<AppState>) -> Result<Json<Recipe>, AppError> {
    state
        .recipes
        .random()
        .await?
        .map(Json)
        .ok_or_else(recipe_not_found)
}

/// GET /api/recipes/:id - Get a single recipe.
pub async fn get_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Recipe>, AppError> {
    state
        .recipes
        .get(&id)
        .await?
        .map(Json)
        .ok_or_else(recipe_not_found)
}

/// POST /api/recipes - Create a new recipe.
pub async fn create_recipe(
    State(state): State<AppState>,
    Json(request): Json<CreateRecipeRequest>,
) -> Result<(StatusCode, Json<Recipe>), AppError> {
    // Validate required fields
    if request.name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".to_string()));
    }

    let recipe = state.recipes.create(request).await?;
    Ok((StatusCode::CREATED, Json(recipe)))
}

/// PUT /api/recipes/:id - Update a recipe.
pub async fn update_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateRecipeRequest>,
) -> Result<Json<Recipe>, AppError> {
    state
        .recipes
        .update(&id, request)
        .await?
        .map(Json)
        .ok_or_else(recipe_not_found)
}

/// DELETE /api/recipes/:id - Delete a recipe.
pub async fn delete_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if state.recipes.delete(&id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(recipe_not_found())
    }
}
