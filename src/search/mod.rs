//! Search and suggestion service.
//!
//! Runs the restaurant and food name lookups concurrently, bumps search
//! counters for matched foods in the background, and merges both result
//! sets into one kind-tagged list with restaurants first.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::db::Repository;
use crate::errors::AppError;

/// Which catalog an entry in the merged result list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchKind {
    Restaurant,
    Food,
}

/// A restaurant whose name matched the query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantMatch {
    pub id: String,
    pub name: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// A food whose name matched the query, with one serving restaurant's name
/// when any restaurant carries it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodMatch {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restaurant_name: Option<String>,
}

/// One entry in the merged search result list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub kind: SearchKind,
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restaurant_name: Option<String>,
}

/// A random (food, restaurant) pairing for the surprise endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomSuggestion {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub restaurant_name: String,
}

/// Search service over the catalog repository.
#[derive(Clone)]
pub struct SearchService {
    repo: Arc<Repository>,
}

impl SearchService {
    pub fn new(repo: Arc<Repository>) -> Self {
        Self { repo }
    }

    /// Search both catalogs for a name substring.
    ///
    /// The query is trimmed first; a blank query returns an empty list
    /// without touching the database. Restaurant and food lookups run
    /// concurrently and either failure fails the whole search. Search
    /// counters for matched foods are bumped in background tasks whose
    /// failures are logged and swallowed.
    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>, AppError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let (restaurants, foods) = tokio::join!(
            self.repo.search_restaurants(query),
            self.repo.search_foods(query),
        );
        let restaurants = restaurants?;
        let foods = foods?;

        for food in &foods {
            let repo = Arc::clone(&self.repo);
            let food_id = food.id.clone();
            tokio::spawn(async move {
                if let Err(err) = repo.increment_food_searches(&food_id).await {
                    tracing::warn!(food_id = %food_id, "Failed to bump search counter: {}", err);
                }
            });
        }

        Ok(merge_results(&restaurants, &foods))
    }

    /// Pick a random food/restaurant pairing.
    ///
    /// `None` means the catalog has no menu links yet; callers should treat
    /// that as a normal empty outcome.
    pub async fn random_suggestion(&self) -> Result<Option<RandomSuggestion>, AppError> {
        self.repo.random_restaurant_food().await
    }
}

/// Merge the two match lists into one, restaurants first, preserving the
/// order each lookup returned.
pub fn merge_results(restaurants: &[RestaurantMatch], foods: &[FoodMatch]) -> Vec<SearchResult> {
    let mut merged = Vec::with_capacity(restaurants.len() + foods.len());

    for r in restaurants {
        merged.push(SearchResult {
            kind: SearchKind::Restaurant,
            id: r.id.clone(),
            name: r.name.clone(),
            location: Some(r.location.clone()),
            category: r.category.clone(),
            image_url: r.image_url.clone(),
            restaurant_name: None,
        });
    }

    for f in foods {
        merged.push(SearchResult {
            kind: SearchKind::Food,
            id: f.id.clone(),
            name: f.name.clone(),
            location: None,
            category: f.category.clone(),
            image_url: f.image_url.clone(),
            restaurant_name: f.restaurant_name.clone(),
        });
    }

    merged
}
