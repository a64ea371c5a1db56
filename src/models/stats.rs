//! Aggregated statistics served to the admin overview.

use serde::{Deserialize, Serialize};

use super::FoodSummary;

/// Catalog-wide counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverviewStats {
    pub restaurant_count: i64,
    pub food_count: i64,
    pub food_category_count: i64,
    pub restaurant_category_count: i64,
}

/// Ranking entry ordered by like tally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopVotedItem {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub likes: i64,
    pub dislikes: i64,
}

/// Full payload of the stats endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsReport {
    pub overview: OverviewStats,
    pub top_voted_foods: Vec<TopVotedItem>,
    pub top_voted_restaurants: Vec<TopVotedItem>,
    pub most_searched_foods: Vec<FoodSummary>,
}
