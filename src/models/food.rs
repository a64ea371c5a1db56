//! Food catalog models.

use serde::{Deserialize, Serialize};

/// A dish in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Food {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cultural_significance: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_of_dish: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serving_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prep_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spice_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Incremented server-side for every search hit on this dish.
    pub searches: i64,
    pub is_trending: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Ranking entry for the "top foods" and "most searched" listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodSummary {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub searches: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Request body for creating a food.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFoodRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub long_description: Option<String>,
    #[serde(default)]
    pub cultural_significance: Option<String>,
    #[serde(default)]
    pub ingredients: Option<String>,
    #[serde(default)]
    pub origin_of_dish: Option<String>,
    #[serde(default)]
    pub serving_size: Option<String>,
    #[serde(default)]
    pub prep_time: Option<String>,
    #[serde(default)]
    pub spice_level: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub is_trending: bool,
}

/// Request body for updating a food. Absent fields keep their value.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateFoodRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub long_description: Option<String>,
    #[serde(default)]
    pub cultural_significance: Option<String>,
    #[serde(default)]
    pub ingredients: Option<String>,
    #[serde(default)]
    pub origin_of_dish: Option<String>,
    #[serde(default)]
    pub serving_size: Option<String>,
    #[serde(default)]
    pub prep_time: Option<String>,
    #[serde(default)]
    pub spice_level: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub is_trending: Option<bool>,
}

/// A named variation of a dish (e.g. steamed vs. fried momo).
///
/// Variations form a flat family under a parent food: looking up a member's
/// `food_id` yields the `parent_food_id` the whole family is keyed by.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodVariation {
    pub id: String,
    pub food_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_food_id: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub created_at: String,
}

/// A restaurant serving a given dish, with its price there.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServingRestaurant {
    pub id: String,
    pub name: String,
    pub location: String,
    pub rating: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map_url: Option<String>,
    pub price: f64,
}
