//! Recipe store backends.
//!
//! Two interchangeable backends implement the same contract: a file-backed
//! store with full CRUD and a read-only gateway to an external provider. The
//! backend is selected once at startup from configuration.

mod file;
mod mealdb;
mod users;

pub use file::FileRecipeStore;
pub use mealdb::MealDbGateway;
pub use users::UserStore;

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::{CreateRecipeRequest, Recipe, UpdateRecipeRequest};

/// Common contract for recipe backends.
///
/// "Not found" is normal control flow (`None` / `false`), never an error;
/// errors are reserved for storage faults, upstream failures, and mutations
/// against a read-only backend.
#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// All recipes.
    async fn list(&self) -> Result<Vec<Recipe>, AppError>;

    /// One recipe by id, or `None` if absent.
    async fn get(&self, id: &str) -> Result<Option<Recipe>, AppError>;

    /// Recipes matching a name query.
    async fn search(&self, query: &str) -> Result<Vec<Recipe>, AppError>;

    /// Recipes in a category.
    async fn list_by_category(&self, category: &str) -> Result<Vec<Recipe>, AppError>;

    /// One random recipe, or `None` if the catalog is empty.
    async fn random(&self) -> Result<Option<Recipe>, AppError>;

    /// Create a recipe and return it with its assigned id.
    async fn create(&self, request: CreateRecipeRequest) -> Result<Recipe, AppError>;

    /// Shallow-merge a partial update onto an existing recipe; `None` if absent.
    async fn update(
        &self,
        id: &str,
        request: UpdateRecipeRequest,
    ) -> Result<Option<Recipe>, AppError>;

    /// Delete a recipe; `false` if nothing matched.
    async fn delete(&self, id: &str) -> Result<bool, AppError>;
}
