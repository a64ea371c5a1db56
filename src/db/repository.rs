//! Database repository for all catalog operations.
//!
//! Everything the old hosted platform did in SQL functions lives here:
//! substring search, counter increments, vote tallies, rankings and the
//! random pairing pick, next to the plain CRUD.

use chrono::Utc;
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::{
    ContentType, CreateFoodRequest, CreateMenuLinkRequest, CreateRestaurantRequest,
    CreateVloggerFeatureRequest, Food, FoodSummary, FoodVariation, MenuItem, MenuLink,
    OverviewStats, Restaurant, RestaurantSummary, ServingRestaurant, TopVotedItem,
    UpdateFoodRequest, UpdateRestaurantRequest, UpdateVloggerFeatureRequest, VloggerFeature,
    VoteCount,
};
use crate::search::{FoodMatch, RandomSuggestion, RestaurantMatch};

/// Database repository for all data operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    #[cfg(test)]
    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    // ==================== RESTAURANT OPERATIONS ====================

    /// List all restaurants.
    pub async fn list_restaurants(&self) -> Result<Vec<Restaurant>, AppError> {
        let rows = sqlx::query(
            "SELECT id, name, description, location, contact_number, website, image_url, map_url, rating, visits, category, created_at, updated_at FROM restaurants ORDER BY name"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(restaurant_from_row).collect())
    }

    /// Get a restaurant by ID.
    pub async fn get_restaurant(&self, id: &str) -> Result<Option<Restaurant>, AppError> {
        let row = sqlx::query(
            "SELECT id, name, description, location, contact_number, website, image_url, map_url, rating, visits, category, created_at, updated_at FROM restaurants WHERE id = ?"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(restaurant_from_row))
    }

    /// Create a new restaurant.
    pub async fn create_restaurant(
        &self,
        request: &CreateRestaurantRequest,
    ) -> Result<Restaurant, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO restaurants (id, name, description, location, contact_number, website, image_url, map_url, rating, visits, category, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, 0, ?, ?, ?)"
        )
        .bind(&id)
        .bind(&request.name)
        .bind(&request.description)
        .bind(&request.location)
        .bind(&request.contact_number)
        .bind(&request.website)
        .bind(&request.image_url)
        .bind(&request.map_url)
        .bind(request.rating)
        .bind(&request.category)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(Restaurant {
            id,
            name: request.name.clone(),
            description: request.description.clone(),
            location: request.location.clone(),
            contact_number: request.contact_number.clone(),
            website: request.website.clone(),
            image_url: request.image_url.clone(),
            map_url: request.map_url.clone(),
            rating: request.rating,
            visits: 0,
            category: request.category.clone(),
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// Update a restaurant. Absent request fields keep their stored value.
    pub async fn update_restaurant(
        &self,
        id: &str,
        request: &UpdateRestaurantRequest,
    ) -> Result<Restaurant, AppError> {
        let existing = self
            .get_restaurant(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Restaurant {} not found", id)))?;

        let now = Utc::now().to_rfc3339();

        let name = request.name.as_ref().unwrap_or(&existing.name);
        let description = request.description.as_ref().unwrap_or(&existing.description);
        let location = request.location.as_ref().unwrap_or(&existing.location);
        let contact_number = request
            .contact_number
            .clone()
            .or(existing.contact_number.clone());
        let website = request.website.clone().or(existing.website.clone());
        let image_url = request.image_url.clone().or(existing.image_url.clone());
        let map_url = request.map_url.clone().or(existing.map_url.clone());
        let rating = request.rating.unwrap_or(existing.rating);
        let category = request.category.clone().or(existing.category.clone());

        let result = sqlx::query(
            "UPDATE restaurants SET name = ?, description = ?, location = ?, contact_number = ?, website = ?, image_url = ?, map_url = ?, rating = ?, category = ?, updated_at = ? WHERE id = ?"
        )
        .bind(name)
        .bind(description)
        .bind(location)
        .bind(&contact_number)
        .bind(&website)
        .bind(&image_url)
        .bind(&map_url)
        .bind(rating)
        .bind(&category)
        .bind(&now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Restaurant {} not found", id)));
        }

        Ok(Restaurant {
            id: id.to_string(),
            name: name.clone(),
            description: description.clone(),
            location: location.clone(),
            contact_number,
            website,
            image_url,
            map_url,
            rating,
            visits: existing.visits,
            category,
            created_at: existing.created_at,
            updated_at: now,
        })
    }

    /// Delete a restaurant along with its menu links, votes and features.
    pub async fn delete_restaurant(&self, id: &str) -> Result<(), AppError> {
        // Use a transaction so dependent rows never outlive the parent
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM restaurants WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Restaurant {} not found", id)));
        }

        sqlx::query("DELETE FROM restaurant_foods WHERE restaurant_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM restaurant_votes WHERE restaurant_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM vlogger_features WHERE restaurant_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }

    /// Increment a restaurant's visit counter. Missing rows are a no-op.
    pub async fn increment_restaurant_visits(&self, id: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE restaurants SET visits = visits + 1 WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Restaurants ranked by visit count.
    pub async fn top_restaurants(&self, limit: usize) -> Result<Vec<RestaurantSummary>, AppError> {
        let rows = sqlx::query(
            "SELECT id, name, category, visits, image_url FROM restaurants ORDER BY visits DESC, name LIMIT ?"
        )
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| RestaurantSummary {
                id: row.get("id"),
                name: row.get("name"),
                category: row.get("category"),
                visits: row.get("visits"),
                image_url: row.get("image_url"),
            })
            .collect())
    }

    /// Case-insensitive substring match on restaurant names.
    pub async fn search_restaurants(&self, query: &str) -> Result<Vec<RestaurantMatch>, AppError> {
        let rows = sqlx::query(
            "SELECT id, name, location, image_url, category FROM restaurants WHERE name LIKE '%' || ? || '%' COLLATE NOCASE ORDER BY name"
        )
        .bind(query)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| RestaurantMatch {
                id: row.get("id"),
                name: row.get("name"),
                location: row.get("location"),
                image_url: row.get("image_url"),
                category: row.get("category"),
            })
            .collect())
    }

    /// A restaurant's menu, optionally narrowed to one food category.
    pub async fn restaurant_menu(
        &self,
        restaurant_id: &str,
        category: Option<&str>,
    ) -> Result<Vec<MenuItem>, AppError> {
        let rows = match category {
            Some(category) => {
                sqlx::query(
                    "SELECT f.id, f.name, f.category, f.image_url, rf.price FROM restaurant_foods rf JOIN foods f ON f.id = rf.food_id WHERE rf.restaurant_id = ? AND f.category = ? ORDER BY f.name"
                )
                .bind(restaurant_id)
                .bind(category)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query(
                    "SELECT f.id, f.name, f.category, f.image_url, rf.price FROM restaurant_foods rf JOIN foods f ON f.id = rf.food_id WHERE rf.restaurant_id = ? ORDER BY f.name"
                )
                .bind(restaurant_id)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(rows
            .into_iter()
            .map(|row| MenuItem {
                id: row.get("id"),
                name: row.get("name"),
                category: row.get("category"),
                image_url: row.get("image_url"),
                price: row.get("price"),
            })
            .collect())
    }

    // ==================== FOOD OPERATIONS ====================

    /// List all foods.
    pub async fn list_foods(&self) -> Result<Vec<Food>, AppError> {
        let rows = sqlx::query(
            r#"SELECT id, name, description, long_description, cultural_significance,
                      ingredients, origin_of_dish, serving_size, prep_time, spice_level,
                      image_url, category, searches, is_trending, created_at, updated_at
               FROM foods ORDER BY name"#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(food_from_row).collect())
    }

    /// Get a food by ID.
    pub async fn get_food(&self, id: &str) -> Result<Option<Food>, AppError> {
        let row = sqlx::query(
            r#"SELECT id, name, description, long_description, cultural_significance,
                      ingredients, origin_of_dish, serving_size, prep_time, spice_level,
                      image_url, category, searches, is_trending, created_at, updated_at
               FROM foods WHERE id = ?"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(food_from_row))
    }

    /// Create a new food.
    pub async fn create_food(&self, request: &CreateFoodRequest) -> Result<Food, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"INSERT INTO foods (
                id, name, description, long_description, cultural_significance,
                ingredients, origin_of_dish, serving_size, prep_time, spice_level,
                image_url, category, searches, is_trending, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 0, ?, ?, ?)"#,
        )
        .bind(&id)
        .bind(&request.name)
        .bind(&request.description)
        .bind(&request.long_description)
        .bind(&request.cultural_significance)
        .bind(&request.ingredients)
        .bind(&request.origin_of_dish)
        .bind(&request.serving_size)
        .bind(&request.prep_time)
        .bind(&request.spice_level)
        .bind(&request.image_url)
        .bind(&request.category)
        .bind(request.is_trending as i32)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(Food {
            id,
            name: request.name.clone(),
            description: request.description.clone(),
            long_description: request.long_description.clone(),
            cultural_significance: request.cultural_significance.clone(),
            ingredients: request.ingredients.clone(),
            origin_of_dish: request.origin_of_dish.clone(),
            serving_size: request.serving_size.clone(),
            prep_time: request.prep_time.clone(),
            spice_level: request.spice_level.clone(),
            image_url: request.image_url.clone(),
            category: request.category.clone(),
            searches: 0,
            is_trending: request.is_trending,
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// Update a food. Absent request fields keep their stored value.
    pub async fn update_food(&self, id: &str, request: &UpdateFoodRequest) -> Result<Food, AppError> {
        let existing = self
            .get_food(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Food {} not found", id)))?;

        let now = Utc::now().to_rfc3339();

        let name = request.name.as_ref().unwrap_or(&existing.name);
        let description = request.description.clone().or(existing.description.clone());
        let long_description = request
            .long_description
            .clone()
            .or(existing.long_description.clone());
        let cultural_significance = request
            .cultural_significance
            .clone()
            .or(existing.cultural_significance.clone());
        let ingredients = request.ingredients.clone().or(existing.ingredients.clone());
        let origin_of_dish = request
            .origin_of_dish
            .clone()
            .or(existing.origin_of_dish.clone());
        let serving_size = request
            .serving_size
            .clone()
            .or(existing.serving_size.clone());
        let prep_time = request.prep_time.clone().or(existing.prep_time.clone());
        let spice_level = request.spice_level.clone().or(existing.spice_level.clone());
        let image_url = request.image_url.clone().or(existing.image_url.clone());
        let category = request.category.clone().or(existing.category.clone());
        let is_trending = request.is_trending.unwrap_or(existing.is_trending);

        let result = sqlx::query(
            r#"UPDATE foods SET
                name = ?, description = ?, long_description = ?, cultural_significance = ?,
                ingredients = ?, origin_of_dish = ?, serving_size = ?, prep_time = ?,
                spice_level = ?, image_url = ?, category = ?, is_trending = ?, updated_at = ?
            WHERE id = ?"#,
        )
        .bind(name)
        .bind(&description)
        .bind(&long_description)
        .bind(&cultural_significance)
        .bind(&ingredients)
        .bind(&origin_of_dish)
        .bind(&serving_size)
        .bind(&prep_time)
        .bind(&spice_level)
        .bind(&image_url)
        .bind(&category)
        .bind(is_trending as i32)
        .bind(&now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Food {} not found", id)));
        }

        Ok(Food {
            id: id.to_string(),
            name: name.clone(),
            description,
            long_description,
            cultural_significance,
            ingredients,
            origin_of_dish,
            serving_size,
            prep_time,
            spice_level,
            image_url,
            category,
            searches: existing.searches,
            is_trending,
            created_at: existing.created_at,
            updated_at: now,
        })
    }

    /// Delete a food along with its menu links and votes.
    pub async fn delete_food(&self, id: &str) -> Result<(), AppError> {
        // Use a transaction so dependent rows never outlive the parent
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM foods WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Food {} not found", id)));
        }

        sqlx::query("DELETE FROM restaurant_foods WHERE food_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM food_votes WHERE food_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }

    /// Increment a food's search counter. Missing rows are a no-op.
    pub async fn increment_food_searches(&self, id: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE foods SET searches = searches + 1 WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Foods ranked by search counter.
    pub async fn top_foods(&self, limit: usize) -> Result<Vec<FoodSummary>, AppError> {
        let rows = sqlx::query(
            "SELECT id, name, category, searches, image_url FROM foods ORDER BY searches DESC, name LIMIT ?"
        )
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| FoodSummary {
                id: row.get("id"),
                name: row.get("name"),
                category: row.get("category"),
                searches: row.get("searches"),
                image_url: row.get("image_url"),
            })
            .collect())
    }

    /// Case-insensitive substring match on food names, with one serving
    /// restaurant's name joined in when the bridge table has any.
    pub async fn search_foods(&self, query: &str) -> Result<Vec<FoodMatch>, AppError> {
        let rows = sqlx::query(
            r#"SELECT f.id, f.name, f.category, f.image_url,
                      (SELECT r.name FROM restaurant_foods rf
                       JOIN restaurants r ON r.id = rf.restaurant_id
                       WHERE rf.food_id = f.id
                       ORDER BY r.name LIMIT 1) AS restaurant_name
               FROM foods f
               WHERE f.name LIKE '%' || ? || '%' COLLATE NOCASE
               ORDER BY f.name"#,
        )
        .bind(query)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| FoodMatch {
                id: row.get("id"),
                name: row.get("name"),
                category: row.get("category"),
                image_url: row.get("image_url"),
                restaurant_name: row.get("restaurant_name"),
            })
            .collect())
    }

    /// Variations in the same family as the given food.
    ///
    /// A food that is itself a variation resolves to its parent first, so
    /// every member of a family sees the full set.
    pub async fn food_variations(&self, food_id: &str) -> Result<Vec<FoodVariation>, AppError> {
        let parent_row = sqlx::query("SELECT parent_food_id FROM food_variations WHERE food_id = ? LIMIT 1")
            .bind(food_id)
            .fetch_optional(&self.pool)
            .await?;

        let parent_id: String = parent_row
            .and_then(|row| row.get::<Option<String>, _>("parent_food_id"))
            .unwrap_or_else(|| food_id.to_string());

        let rows = sqlx::query(
            "SELECT id, food_id, parent_food_id, name, description, image_url, created_at FROM food_variations WHERE parent_food_id = ? ORDER BY name"
        )
        .bind(&parent_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| FoodVariation {
                id: row.get("id"),
                food_id: row.get("food_id"),
                parent_food_id: row.get("parent_food_id"),
                name: row.get("name"),
                description: row.get("description"),
                image_url: row.get("image_url"),
                created_at: row.get("created_at"),
            })
            .collect())
    }

    /// Insert a variation row. Used by seeding and tests; there is no public
    /// route for this yet.
    pub async fn create_food_variation(
        &self,
        food_id: &str,
        parent_food_id: Option<&str>,
        name: &str,
        description: Option<&str>,
        image_url: Option<&str>,
    ) -> Result<FoodVariation, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO food_variations (id, food_id, parent_food_id, name, description, image_url, created_at) VALUES (?, ?, ?, ?, ?, ?, ?)"
        )
        .bind(&id)
        .bind(food_id)
        .bind(parent_food_id)
        .bind(name)
        .bind(description)
        .bind(image_url)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(FoodVariation {
            id,
            food_id: food_id.to_string(),
            parent_food_id: parent_food_id.map(|s| s.to_string()),
            name: name.to_string(),
            description: description.map(|s| s.to_string()),
            image_url: image_url.map(|s| s.to_string()),
            created_at: now,
        })
    }

    /// Restaurants serving the given food, with prices.
    pub async fn food_restaurants(&self, food_id: &str) -> Result<Vec<ServingRestaurant>, AppError> {
        let rows = sqlx::query(
            r#"SELECT r.id, r.name, r.location, r.rating, r.image_url, r.map_url, rf.price
               FROM restaurant_foods rf
               JOIN restaurants r ON r.id = rf.restaurant_id
               WHERE rf.food_id = ?
               ORDER BY r.name"#,
        )
        .bind(food_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| ServingRestaurant {
                id: row.get("id"),
                name: row.get("name"),
                location: row.get("location"),
                rating: row.get("rating"),
                image_url: row.get("image_url"),
                map_url: row.get("map_url"),
                price: row.get("price"),
            })
            .collect())
    }

    /// Pick one random (food, restaurant) pairing from the bridge table.
    ///
    /// Returns `None` on an empty bridge table; that is a valid outcome, not
    /// an error. The nested join columns are read with `try_get` so a
    /// malformed row fails loudly instead of coercing to empty strings.
    pub async fn random_restaurant_food(&self) -> Result<Option<RandomSuggestion>, AppError> {
        let row = sqlx::query(
            r#"SELECT f.id AS food_id, f.name AS food_name, f.category AS food_category,
                      f.image_url AS food_image_url, r.name AS restaurant_name
               FROM restaurant_foods rf
               JOIN foods f ON f.id = rf.food_id
               JOIN restaurants r ON r.id = rf.restaurant_id
               ORDER BY RANDOM() LIMIT 1"#,
        )
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some(RandomSuggestion {
            id: row.try_get("food_id")?,
            name: row.try_get("food_name")?,
            category: row.try_get("food_category")?,
            image_url: row.try_get("food_image_url")?,
            restaurant_name: row.try_get("restaurant_name")?,
        }))
    }

    // ==================== MENU LINK OPERATIONS ====================

    /// Link a food to a restaurant at a price.
    pub async fn create_menu_link(
        &self,
        request: &CreateMenuLinkRequest,
    ) -> Result<MenuLink, AppError> {
        let id = uuid::Uuid::new_v4().to_string();

        sqlx::query(
            "INSERT INTO restaurant_foods (id, restaurant_id, food_id, price) VALUES (?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&request.restaurant_id)
        .bind(&request.food_id)
        .bind(request.price)
        .execute(&self.pool)
        .await
        .map_err(|err| match err {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => AppError::Validation(
                "Food is already on this restaurant's menu".to_string(),
            ),
            other => AppError::from(other),
        })?;

        Ok(MenuLink {
            id,
            restaurant_id: request.restaurant_id.clone(),
            food_id: request.food_id.clone(),
            price: request.price,
        })
    }

    /// Remove a menu link.
    pub async fn delete_menu_link(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM restaurant_foods WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Menu link {} not found", id)));
        }

        Ok(())
    }

    // ==================== VOTE OPERATIONS ====================

    /// Record a vote for a food.
    pub async fn add_food_vote(&self, food_id: &str, liked: bool) -> Result<(), AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query("INSERT INTO food_votes (id, food_id, liked, created_at) VALUES (?, ?, ?, ?)")
            .bind(&id)
            .bind(food_id)
            .bind(liked as i32)
            .bind(&now)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Record a vote for a restaurant.
    pub async fn add_restaurant_vote(
        &self,
        restaurant_id: &str,
        liked: bool,
    ) -> Result<(), AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO restaurant_votes (id, restaurant_id, liked, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(restaurant_id)
        .bind(liked as i32)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Tally votes for a food.
    pub async fn food_vote_counts(&self, food_id: &str) -> Result<VoteCount, AppError> {
        let row = sqlx::query(
            r#"SELECT COALESCE(SUM(CASE WHEN liked <> 0 THEN 1 ELSE 0 END), 0) AS likes,
                      COALESCE(SUM(CASE WHEN liked = 0 THEN 1 ELSE 0 END), 0) AS dislikes
               FROM food_votes WHERE food_id = ?"#,
        )
        .bind(food_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(VoteCount {
            likes: row.get("likes"),
            dislikes: row.get("dislikes"),
        })
    }

    /// Tally votes for a restaurant.
    pub async fn restaurant_vote_counts(&self, restaurant_id: &str) -> Result<VoteCount, AppError> {
        let row = sqlx::query(
            r#"SELECT COALESCE(SUM(CASE WHEN liked <> 0 THEN 1 ELSE 0 END), 0) AS likes,
                      COALESCE(SUM(CASE WHEN liked = 0 THEN 1 ELSE 0 END), 0) AS dislikes
               FROM restaurant_votes WHERE restaurant_id = ?"#,
        )
        .bind(restaurant_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(VoteCount {
            likes: row.get("likes"),
            dislikes: row.get("dislikes"),
        })
    }

    /// Foods ranked by like tally. Only foods with at least one vote rank.
    pub async fn top_voted_foods(&self, limit: usize) -> Result<Vec<TopVotedItem>, AppError> {
        let rows = sqlx::query(
            r#"SELECT f.id, f.name, f.category, f.image_url,
                      COALESCE(SUM(CASE WHEN v.liked <> 0 THEN 1 ELSE 0 END), 0) AS likes,
                      COALESCE(SUM(CASE WHEN v.liked = 0 THEN 1 ELSE 0 END), 0) AS dislikes
               FROM foods f
               JOIN food_votes v ON v.food_id = f.id
               GROUP BY f.id
               ORDER BY likes DESC, f.name
               LIMIT ?"#,
        )
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(top_voted_from_row).collect())
    }

    /// Restaurants ranked by like tally. Only restaurants with votes rank.
    pub async fn top_voted_restaurants(&self, limit: usize) -> Result<Vec<TopVotedItem>, AppError> {
        let rows = sqlx::query(
            r#"SELECT r.id, r.name, r.category, r.image_url,
                      COALESCE(SUM(CASE WHEN v.liked <> 0 THEN 1 ELSE 0 END), 0) AS likes,
                      COALESCE(SUM(CASE WHEN v.liked = 0 THEN 1 ELSE 0 END), 0) AS dislikes
               FROM restaurants r
               JOIN restaurant_votes v ON v.restaurant_id = r.id
               GROUP BY r.id
               ORDER BY likes DESC, r.name
               LIMIT ?"#,
        )
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(top_voted_from_row).collect())
    }

    // ==================== VLOGGER FEATURE OPERATIONS ====================

    /// List all vlogger features with the owning restaurant's name, newest
    /// feature first. Admin listing.
    pub async fn list_vlogger_features(&self) -> Result<Vec<VloggerFeature>, AppError> {
        let rows = sqlx::query(
            r#"SELECT v.id, v.restaurant_id, v.vlogger_name, v.content_type, v.content_url,
                      v.feature_date, v.platform, v.description, v.created_at,
                      r.name AS restaurant_name
               FROM vlogger_features v
               LEFT JOIN restaurants r ON r.id = v.restaurant_id
               ORDER BY v.feature_date DESC"#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(|row| feature_from_row(row, true)).collect()
    }

    /// Vlogger features for one restaurant, newest first.
    pub async fn restaurant_vlogger_features(
        &self,
        restaurant_id: &str,
    ) -> Result<Vec<VloggerFeature>, AppError> {
        let rows = sqlx::query(
            r#"SELECT id, restaurant_id, vlogger_name, content_type, content_url,
                      feature_date, platform, description, created_at
               FROM vlogger_features
               WHERE restaurant_id = ?
               ORDER BY feature_date DESC"#,
        )
        .bind(restaurant_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(|row| feature_from_row(row, false)).collect()
    }

    /// Create a vlogger feature.
    pub async fn create_vlogger_feature(
        &self,
        request: &CreateVloggerFeatureRequest,
    ) -> Result<VloggerFeature, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO vlogger_features (id, restaurant_id, vlogger_name, content_type, content_url, feature_date, platform, description, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)"
        )
        .bind(&id)
        .bind(&request.restaurant_id)
        .bind(&request.vlogger_name)
        .bind(request.content_type.as_str())
        .bind(&request.content_url)
        .bind(&request.feature_date)
        .bind(&request.platform)
        .bind(&request.description)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(VloggerFeature {
            id,
            restaurant_id: request.restaurant_id.clone(),
            vlogger_name: request.vlogger_name.clone(),
            content_type: request.content_type.clone(),
            content_url: request.content_url.clone(),
            feature_date: request.feature_date.clone(),
            platform: request.platform.clone(),
            description: request.description.clone(),
            created_at: now,
            restaurant_name: None,
        })
    }

    /// Update a vlogger feature. Absent request fields keep their value.
    pub async fn update_vlogger_feature(
        &self,
        id: &str,
        request: &UpdateVloggerFeatureRequest,
    ) -> Result<VloggerFeature, AppError> {
        let row = sqlx::query(
            r#"SELECT id, restaurant_id, vlogger_name, content_type, content_url,
                      feature_date, platform, description, created_at
               FROM vlogger_features WHERE id = ?"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let existing = row
            .as_ref()
            .map(|row| feature_from_row(row, false))
            .transpose()?
            .ok_or_else(|| AppError::NotFound(format!("Vlogger feature {} not found", id)))?;

        let restaurant_id = request
            .restaurant_id
            .as_ref()
            .unwrap_or(&existing.restaurant_id);
        let vlogger_name = request
            .vlogger_name
            .as_ref()
            .unwrap_or(&existing.vlogger_name);
        let content_type = request
            .content_type
            .clone()
            .unwrap_or(existing.content_type.clone());
        let content_url = request.content_url.as_ref().unwrap_or(&existing.content_url);
        let feature_date = request
            .feature_date
            .as_ref()
            .unwrap_or(&existing.feature_date);
        let platform = request.platform.as_ref().unwrap_or(&existing.platform);
        let description = request.description.clone().or(existing.description.clone());

        sqlx::query(
            "UPDATE vlogger_features SET restaurant_id = ?, vlogger_name = ?, content_type = ?, content_url = ?, feature_date = ?, platform = ?, description = ? WHERE id = ?"
        )
        .bind(restaurant_id)
        .bind(vlogger_name)
        .bind(content_type.as_str())
        .bind(content_url)
        .bind(feature_date)
        .bind(platform)
        .bind(&description)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(VloggerFeature {
            id: id.to_string(),
            restaurant_id: restaurant_id.clone(),
            vlogger_name: vlogger_name.clone(),
            content_type,
            content_url: content_url.clone(),
            feature_date: feature_date.clone(),
            platform: platform.clone(),
            description,
            created_at: existing.created_at,
            restaurant_name: None,
        })
    }

    /// Delete a vlogger feature.
    pub async fn delete_vlogger_feature(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM vlogger_features WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Vlogger feature {} not found",
                id
            )));
        }

        Ok(())
    }

    // ==================== STATS OPERATIONS ====================

    /// Catalog-wide counts.
    pub async fn overview_stats(&self) -> Result<OverviewStats, AppError> {
        let row = sqlx::query(
            r#"SELECT
                (SELECT COUNT(*) FROM restaurants) AS restaurant_count,
                (SELECT COUNT(*) FROM foods) AS food_count,
                (SELECT COUNT(DISTINCT category) FROM foods WHERE category IS NOT NULL) AS food_category_count,
                (SELECT COUNT(DISTINCT category) FROM restaurants WHERE category IS NOT NULL) AS restaurant_category_count"#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(OverviewStats {
            restaurant_count: row.get("restaurant_count"),
            food_count: row.get("food_count"),
            food_category_count: row.get("food_category_count"),
            restaurant_category_count: row.get("restaurant_category_count"),
        })
    }
}

// Helper functions for row conversion

fn restaurant_from_row(row: &sqlx::sqlite::SqliteRow) -> Restaurant {
    Restaurant {
        id: row.get("id"),
        name: row.get("name"),
        description: row.get("description"),
        location: row.get("location"),
        contact_number: row.get("contact_number"),
        website: row.get("website"),
        image_url: row.get("image_url"),
        map_url: row.get("map_url"),
        rating: row.get("rating"),
        visits: row.get("visits"),
        category: row.get("category"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn food_from_row(row: &sqlx::sqlite::SqliteRow) -> Food {
    let is_trending: i32 = row.get("is_trending");
    Food {
        id: row.get("id"),
        name: row.get("name"),
        description: row.get("description"),
        long_description: row.get("long_description"),
        cultural_significance: row.get("cultural_significance"),
        ingredients: row.get("ingredients"),
        origin_of_dish: row.get("origin_of_dish"),
        serving_size: row.get("serving_size"),
        prep_time: row.get("prep_time"),
        spice_level: row.get("spice_level"),
        image_url: row.get("image_url"),
        category: row.get("category"),
        searches: row.get("searches"),
        is_trending: is_trending != 0,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn feature_from_row(
    row: &sqlx::sqlite::SqliteRow,
    with_restaurant_name: bool,
) -> Result<VloggerFeature, AppError> {
    let content_type_str: String = row.get("content_type");
    let content_type = ContentType::from_str(&content_type_str).ok_or_else(|| {
        AppError::Internal(format!("Unknown content type '{}'", content_type_str))
    })?;

    Ok(VloggerFeature {
        id: row.get("id"),
        restaurant_id: row.get("restaurant_id"),
        vlogger_name: row.get("vlogger_name"),
        content_type,
        content_url: row.get("content_url"),
        feature_date: row.get("feature_date"),
        platform: row.get("platform"),
        description: row.get("description"),
        created_at: row.get("created_at"),
        restaurant_name: if with_restaurant_name {
            row.get("restaurant_name")
        } else {
            None
        },
    })
}

fn top_voted_from_row(row: &sqlx::sqlite::SqliteRow) -> TopVotedItem {
    TopVotedItem {
        id: row.get("id"),
        name: row.get("name"),
        category: row.get("category"),
        image_url: row.get("image_url"),
        likes: row.get("likes"),
        dislikes: row.get("dislikes"),
    }
}
