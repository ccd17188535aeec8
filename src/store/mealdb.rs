//! Gateway to an external TheMealDB-compatible recipe provider.
//!
//! Read operations proxy to the provider and normalize its flat per-recipe
//! schema into the `Recipe` model; mutations fail unconditionally because the
//! provider is read-only. The raw provider shape stays private to this module.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::RecipeStore;
use crate::errors::AppError;
use crate::models::{CreateRecipeRequest, Ingredient, Recipe, RecipeId, UpdateRecipeRequest};

/// Highest `strIngredientN` / `strMeasureN` index the provider uses.
const MAX_INGREDIENT_INDEX: usize = 20;

/// Provider response envelope. An absent-data response carries `meals: null`.
#[derive(Debug, Deserialize)]
struct ProviderResponse {
    meals: Option<Vec<ProviderMeal>>,
}

/// Raw provider record.
#[derive(Debug, Deserialize)]
struct ProviderMeal {
    #[serde(rename = "idMeal")]
    id: String,
    #[serde(rename = "strMeal")]
    name: String,
    #[serde(rename = "strCategory")]
    category: Option<String>,
    #[serde(rename = "strArea")]
    area: Option<String>,
    #[serde(rename = "strInstructions")]
    instructions: Option<String>,
    #[serde(rename = "strMealThumb")]
    image: Option<String>,
    #[serde(rename = "strTags")]
    tags: Option<String>,
    #[serde(rename = "strYoutube")]
    youtube: Option<String>,
    /// The indexed strIngredientN / strMeasureN pairs land here.
    #[serde(flatten)]
    indexed: HashMap<String, Option<String>>,
}

impl ProviderMeal {
    fn indexed_field(&self, prefix: &str, index: usize) -> &str {
        self.indexed
            .get(&format!("{}{}", prefix, index))
            .and_then(|v| v.as_deref())
            .unwrap_or("")
    }

    /// Scan the indexed ingredient/measure pairs, keeping only pairs whose
    /// ingredient is non-blank after trimming. Index order is preserved.
    fn ingredients(&self) -> Vec<Ingredient> {
        let mut ingredients = Vec::new();
        for i in 1..=MAX_INGREDIENT_INDEX {
            let ingredient = self.indexed_field("strIngredient", i).trim();
            if ingredient.is_empty() {
                continue;
            }
            let measure = self.indexed_field("strMeasure", i).trim();
            ingredients.push(Ingredient {
                ingredient: ingredient.to_string(),
                measure: measure.to_string(),
            });
        }
        ingredients
    }

    fn into_recipe(self) -> Recipe {
        let ingredients = self.ingredients();
        let tags = split_tags(self.tags.as_deref());
        Recipe {
            id: RecipeId::Text(self.id),
            name: self.name,
            category: self.category,
            area: self.area,
            instructions: self.instructions,
            image: self.image,
            tags,
            youtube: self.youtube,
            ingredients,
        }
    }
}

/// Split the provider's comma-joined tags field. Segments are trimmed and
/// empty segments are dropped, so a trailing comma yields no empty tag.
fn split_tags(raw: Option<&str>) -> Vec<String> {
    raw.map(|tags| {
        tags.split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(String::from)
            .collect()
    })
    .unwrap_or_default()
}

/// Recipe store proxying a TheMealDB-compatible provider.
pub struct MealDbGateway {
    client: Client,
    base_url: String,
}

impl MealDbGateway {
    /// Build a gateway against the given provider base URL. Every outbound
    /// request carries the timeout; expiry surfaces as an upstream failure.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| AppError::Internal(format!("Failed to build HTTP client: {}", err)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Issue one provider call and unwrap the `meals` envelope. `meals: null`
    /// is an empty collection, not an error.
    async fn fetch_meals(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
        context: &str,
    ) -> Result<Vec<ProviderMeal>, AppError> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|err| AppError::Upstream(format!("{}: {}", context, err)))?;

        if !response.status().is_success() {
            return Err(AppError::Upstream(format!(
                "{}: provider returned HTTP {}",
                context,
                response.status()
            )));
        }

        let body: ProviderResponse = response
            .json()
            .await
            .map_err(|err| AppError::Upstream(format!("{}: {}", context, err)))?;

        Ok(body.meals.unwrap_or_default())
    }
}

#[async_trait]
impl RecipeStore for MealDbGateway {
    async fn list(&self) -> Result<Vec<Recipe>, AppError> {
        let meals = self
            .fetch_meals(
                "search.php",
                &[("s", "")],
                "Failed to fetch recipes from TheMealDB",
            )
            .await?;
        Ok(meals.into_iter().map(ProviderMeal::into_recipe).collect())
    }

    async fn get(&self, id: &str) -> Result<Option<Recipe>, AppError> {
        let meals = self
            .fetch_meals(
                "lookup.php",
                &[("i", id)],
                "Failed to fetch recipe from TheMealDB",
            )
            .await?;
        Ok(meals.into_iter().next().map(ProviderMeal::into_recipe))
    }

    async fn search(&self, query: &str) -> Result<Vec<Recipe>, AppError> {
        let meals = self
            .fetch_meals("search.php", &[("s", query)], "Failed to search recipes")
            .await?;
        Ok(meals.into_iter().map(ProviderMeal::into_recipe).collect())
    }

    async fn list_by_category(&self, category: &str) -> Result<Vec<Recipe>, AppError> {
        let meals = self
            .fetch_meals(
                "filter.php",
                &[("c", category)],
                "Failed to fetch recipes by category",
            )
            .await?;
        Ok(meals.into_iter().map(ProviderMeal::into_recipe).collect())
    }

    async fn random(&self) -> Result<Option<Recipe>, AppError> {
        let meals = self
            .fetch_meals("random.php", &[], "Failed to fetch random recipe")
            .await?;
        Ok(meals.into_iter().next().map(ProviderMeal::into_recipe))
    }

    async fn create(&self, _request: CreateRecipeRequest) -> Result<Recipe, AppError> {
        Err(AppError::Unsupported(
            "TheMealDB API is read-only. Cannot create recipes.".to_string(),
        ))
    }

    async fn update(
        &self,
        _id: &str,
        _request: UpdateRecipeRequest,
    ) -> Result<Option<Recipe>, AppError> {
        Err(AppError::Unsupported(
            "TheMealDB API is read-only. Cannot update recipes.".to_string(),
        ))
    }

    async fn delete(&self, _id: &str) -> Result<bool, AppError> {
        Err(AppError::Unsupported(
            "TheMealDB API is read-only. Cannot delete recipes.".to_string(),
        ))
    }
}
