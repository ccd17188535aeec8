//! Recipe model and request bodies.

use serde::{Deserialize, Serialize};

/// Recipe identifier.
///
/// The file store assigns sequential integers; the external provider uses
/// opaque string ids which pass through verbatim. Serialized untagged so the
/// wire shape is a bare number or string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecipeId {
    Num(i64),
    Text(String),
}

impl RecipeId {
    /// Numeric view of the id, if it has one.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            RecipeId::Num(n) => Some(*n),
            RecipeId::Text(s) => s.parse().ok(),
        }
    }
}

impl std::fmt::Display for RecipeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecipeId::Num(n) => write!(f, "{}", n),
            RecipeId::Text(s) => write!(f, "{}", s),
        }
    }
}

/// One ingredient line: name plus free-text measure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub ingredient: String,
    #[serde(default)]
    pub measure: String,
}

/// A normalized recipe, regardless of backing source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
}

/// Request body for creating a new recipe.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRecipeRequest {
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub youtube: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
}

impl CreateRecipeRequest {
    /// Build the stored record from this request and an assigned id.
    pub fn into_recipe(self, id: i64) -> Recipe {
        Recipe {
            id: RecipeId::Num(id),
            name: self.name,
            category: self.category,
            area: self.area,
            instructions: self.instructions,
            image: self.image,
            tags: self.tags,
            youtube: self.youtube,
            ingredients: self.ingredients,
        }
    }
}

/// Request body for updating an existing recipe.
///
/// Shallow merge semantics: supplied fields overwrite, omitted fields are
/// retained unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateRecipeRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub youtube: Option<String>,
    #[serde(default)]
    pub ingredients: Option<Vec<Ingredient>>,
}

impl UpdateRecipeRequest {
    /// Apply this partial update onto an existing record.
    pub fn apply(&self, recipe: &mut Recipe) {
        if let Some(name) = &self.name {
            recipe.name = name.clone();
        }
        if let Some(category) = &self.category {
            recipe.category = Some(category.clone());
        }
        if let Some(area) = &self.area {
            recipe.area = Some(area.clone());
        }
        if let Some(instructions) = &self.instructions {
            recipe.instructions = Some(instructions.clone());
        }
        if let Some(image) = &self.image {
            recipe.image = Some(image.clone());
        }
        if let Some(tags) = &self.tags {
            recipe.tags = tags.clone();
        }
        if let Some(youtube) = &self.youtube {
            recipe.youtube = Some(youtube.clone());
        }
        if let Some(ingredients) = &self.ingredients {
            recipe.ingredients = ingredients.clone();
        }
    }
}
