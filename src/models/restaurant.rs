//! Restaurant catalog models.

use serde::{Deserialize, Serialize};

/// A restaurant in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    pub description: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map_url: Option<String>,
    pub rating: f64,
    /// Incremented server-side every time the detail view is requested.
    pub visits: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Ranking entry for the "top shops" listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantSummary {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub visits: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Request body for creating a restaurant.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRestaurantRequest {
    pub name: String,
    pub description: String,
    pub location: String,
    #[serde(default)]
    pub contact_number: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub map_url: Option<String>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub category: Option<String>,
}

/// Request body for updating a restaurant. Absent fields keep their value.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRestaurantRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub contact_number: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub map_url: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub category: Option<String>,
}

/// A dish on a restaurant's menu, joined from the bridge table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    /// Id of the food row, not of the bridge row.
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub price: f64,
}

/// A restaurant-food bridge row ("this dish is served here at this price").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuLink {
    pub id: String,
    pub restaurant_id: String,
    pub food_id: String,
    pub price: f64,
}

/// Request body for linking a food to a restaurant.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMenuLinkRequest {
    pub restaurant_id: String,
    pub food_id: String,
    pub price: f64,
}
