//! File-backed recipe store.
//!
//! The backing file holds a single JSON array of recipe records. Every
//! operation rereads the whole file; every mutation rewrites it. A missing
//! file reads as an empty catalog.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use rand::seq::SliceRandom;
use tokio::sync::Mutex;

use super::RecipeStore;
use crate::errors::AppError;
use crate::models::{CreateRecipeRequest, Recipe, UpdateRecipeRequest};

/// Recipe store backed by a flat JSON file.
pub struct FileRecipeStore {
    path: PathBuf,
    /// Serializes read-modify-write sequences so concurrent mutations cannot
    /// clobber each other or hand out duplicate ids.
    write_lock: Mutex<()>,
}

impl FileRecipeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    async fn load(&self) -> Result<Vec<Recipe>, AppError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(err) => Err(err.into()),
        }
    }

    async fn save(&self, recipes: &[Recipe]) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await.ok();
        }
        let bytes = serde_json::to_vec_pretty(recipes)?;
        tokio::fs::write(&self.path, bytes).await?;
        Ok(())
    }

    /// Locate a record by the numeric coercion of a route id. A non-numeric
    /// id matches nothing.
    fn find_index(recipes: &[Recipe], id: &str) -> Option<usize> {
        let id: i64 = id.parse().ok()?;
        recipes.iter().position(|r| r.id.as_i64() == Some(id))
    }
}

#[async_trait]
impl RecipeStore for FileRecipeStore {
    async fn list(&self) -> Result<Vec<Recipe>, AppError> {
        self.load().await
    }

    async fn get(&self, id: &str) -> Result<Option<Recipe>, AppError> {
        let recipes = self.load().await?;
        Ok(Self::find_index(&recipes, id).map(|i| recipes[i].clone()))
    }

    async fn search(&self, query: &str) -> Result<Vec<Recipe>, AppError> {
        let needle = query.to_lowercase();
        let recipes = self.load().await?;
        Ok(recipes
            .into_iter()
            .filter(|r| r.name.to_lowercase().contains(&needle))
            .collect())
    }

    async fn list_by_category(&self, category: &str) -> Result<Vec<Recipe>, AppError> {
        let recipes = self.load().await?;
        Ok(recipes
            .into_iter()
            .filter(|r| {
                r.category
                    .as_deref()
                    .is_some_and(|c| c.eq_ignore_ascii_case(category))
            })
            .collect())
    }

    async fn random(&self) -> Result<Option<Recipe>, AppError> {
        let recipes = self.load().await?;
        Ok(recipes.choose(&mut rand::thread_rng()).cloned())
    }

    async fn create(&self, request: CreateRecipeRequest) -> Result<Recipe, AppError> {
        let _guard = self.write_lock.lock().await;

        let mut recipes = self.load().await?;
        let next_id = recipes
            .last()
            .and_then(|r| r.id.as_i64())
            .map_or(1, |id| id + 1);

        let recipe = request.into_recipe(next_id);
        recipes.push(recipe.clone());
        self.save(&recipes).await?;

        Ok(recipe)
    }

    async fn update(
        &self,
        id: &str,
        request: UpdateRecipeRequest,
    ) -> Result<Option<Recipe>, AppError> {
        let _guard = self.write_lock.lock().await;

        let mut recipes = self.load().await?;
        let Some(index) = Self::find_index(&recipes, id) else {
            return Ok(None);
        };

        request.apply(&mut recipes[index]);
        let updated = recipes[index].clone();
        self.save(&recipes).await?;

        Ok(Some(updated))
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let _guard = self.write_lock.lock().await;

        let mut recipes = self.load().await?;
        let Some(index) = Self::find_index(&recipes, id) else {
            return Ok(false);
        };

        recipes.remove(index);
        self.save(&recipes).await?;

        Ok(true)
    }
}
