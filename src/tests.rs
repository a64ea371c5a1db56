//! Integration tests running against a real server on an ephemeral port
//! with a throwaway SQLite database.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};

use crate::config::Config;
use crate::db::{self, Repository};
use crate::models::{CreateFoodRequest, CreateMenuLinkRequest, CreateRestaurantRequest};
use crate::search::SearchService;
use crate::{create_router, AppState};

const TEST_PSK: &str = "test-admin-key";

struct TestFixture {
    base_url: String,
    client: reqwest::Client,
    repo: Arc<Repository>,
    _temp_dir: tempfile::TempDir,
}

impl TestFixture {
    /// Spin up a server with the admin PSK set.
    async fn new() -> Self {
        Self::with_psk(Some(TEST_PSK)).await
    }

    async fn with_psk(psk: Option<&str>) -> Self {
        let temp_dir = tempfile::tempdir().unwrap();
        let db_path = temp_dir.path().join("test.sqlite");

        let pool = db::init_database(&db_path).await.unwrap();
        let repo = Arc::new(Repository::new(pool));

        let config = Config {
            api_psk: psk.map(|s| s.to_string()),
            db_path,
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            log_level: "warn".to_string(),
        };

        let state = AppState {
            search: Arc::new(SearchService::new(repo.clone())),
            repo: repo.clone(),
            config: Arc::new(config),
        };

        let app = create_router(state);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        tokio::time::sleep(Duration::from_millis(100)).await;

        Self {
            base_url: format!("http://{}", addr),
            client: reqwest::Client::new(),
            repo,
            _temp_dir: temp_dir,
        }
    }

    async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
            .unwrap()
    }

    async fn get_json(&self, path: &str) -> Value {
        self.get(path).await.json().await.unwrap()
    }

    async fn post_json(&self, path: &str, body: &Value) -> reqwest::Response {
        self.client
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await
            .unwrap()
    }

    async fn admin_post(&self, path: &str, body: &Value) -> reqwest::Response {
        self.client
            .post(format!("{}{}", self.base_url, path))
            .header("x-api-key", TEST_PSK)
            .json(body)
            .send()
            .await
            .unwrap()
    }

    async fn admin_put(&self, path: &str, body: &Value) -> reqwest::Response {
        self.client
            .put(format!("{}{}", self.base_url, path))
            .header("x-api-key", TEST_PSK)
            .json(body)
            .send()
            .await
            .unwrap()
    }

    async fn admin_delete(&self, path: &str) -> reqwest::Response {
        self.client
            .delete(format!("{}{}", self.base_url, path))
            .header("x-api-key", TEST_PSK)
            .send()
            .await
            .unwrap()
    }

    /// Seed a restaurant directly through the repository.
    async fn seed_restaurant(&self, name: &str) -> String {
        let restaurant = self
            .repo
            .create_restaurant(&CreateRestaurantRequest {
                name: name.to_string(),
                description: "A test restaurant".to_string(),
                location: "Kathmandu".to_string(),
                contact_number: None,
                website: None,
                image_url: None,
                map_url: None,
                rating: 4.0,
                category: Some("Newari".to_string()),
            })
            .await
            .unwrap();
        restaurant.id
    }

    /// Seed a food directly through the repository.
    async fn seed_food(&self, name: &str) -> String {
        let food = self
            .repo
            .create_food(&CreateFoodRequest {
                name: name.to_string(),
                description: Some("A test dish".to_string()),
                long_description: None,
                cultural_significance: None,
                ingredients: None,
                origin_of_dish: None,
                serving_size: None,
                prep_time: None,
                spice_level: None,
                image_url: None,
                category: Some("Snacks".to_string()),
                is_trending: false,
            })
            .await
            .unwrap();
        food.id
    }

    /// Link a food onto a restaurant's menu.
    async fn seed_menu_link(&self, restaurant_id: &str, food_id: &str, price: f64) -> String {
        let link = self
            .repo
            .create_menu_link(&CreateMenuLinkRequest {
                restaurant_id: restaurant_id.to_string(),
                food_id: food_id.to_string(),
                price,
            })
            .await
            .unwrap();
        link.id
    }
}

// ==================== HEALTH ====================

#[tokio::test]
async fn test_health_check() {
    let fixture = TestFixture::new().await;
    let body = fixture.get_json("/health").await;
    assert_eq!(body["status"], "ok");
}

// ==================== SEARCH ====================

#[tokio::test]
async fn test_search_merges_restaurants_before_foods() {
    let fixture = TestFixture::new().await;
    fixture.seed_restaurant("Momo Hut").await;
    fixture.seed_food("Momo").await;
    fixture.seed_food("Chicken Momo").await;
    fixture.seed_food("Sel Roti").await;

    let body = fixture.get_json("/api/search?q=momo").await;
    assert_eq!(body["success"], true);

    let results = body["data"].as_array().unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(results[0]["kind"], "restaurant");
    assert_eq!(results[0]["name"], "Momo Hut");
    assert_eq!(results[1]["kind"], "food");
    assert_eq!(results[2]["kind"], "food");
}

#[tokio::test]
async fn test_search_is_case_insensitive_substring() {
    let fixture = TestFixture::new().await;
    fixture.seed_food("Chatamari").await;

    let body = fixture.get_json("/api/search?q=TAMA").await;
    let results = body["data"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["name"], "Chatamari");
}

#[tokio::test]
async fn test_search_blank_query_returns_empty_without_counting() {
    let fixture = TestFixture::new().await;
    let food_id = fixture.seed_food("Momo").await;

    let body = fixture.get_json("/api/search?q=%20%20").await;
    assert_eq!(body["success"], true);
    assert!(body["data"].as_array().unwrap().is_empty());

    let body = fixture.get_json("/api/search").await;
    assert!(body["data"].as_array().unwrap().is_empty());

    tokio::time::sleep(Duration::from_millis(200)).await;
    let food = fixture.repo.get_food(&food_id).await.unwrap().unwrap();
    assert_eq!(food.searches, 0);
}

#[tokio::test]
async fn test_search_bumps_food_counters() {
    let fixture = TestFixture::new().await;
    let food_id = fixture.seed_food("Momo").await;
    fixture.seed_food("Yomari").await;

    fixture.get_json("/api/search?q=momo").await;

    // Counter bumps run in background tasks
    tokio::time::sleep(Duration::from_millis(300)).await;
    let momo = fixture.repo.get_food(&food_id).await.unwrap().unwrap();
    assert_eq!(momo.searches, 1);
}

#[tokio::test]
async fn test_search_food_carries_serving_restaurant_name() {
    let fixture = TestFixture::new().await;
    let restaurant_id = fixture.seed_restaurant("Honacha").await;
    let linked = fixture.seed_food("Bara").await;
    fixture.seed_food("Barafy").await;
    fixture.seed_menu_link(&restaurant_id, &linked, 80.0).await;

    let body = fixture.get_json("/api/search?q=bara").await;
    let results = body["data"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["restaurant_name"], "Honacha");
    assert!(results[1].get("restaurant_name").is_none());
}

#[tokio::test]
async fn test_search_survives_failing_counter_bump() {
    let fixture = TestFixture::new().await;
    let food_id = fixture.seed_food("Momo").await;

    // Reads still work but every counter bump errors out
    sqlx::query(
        "CREATE TRIGGER block_counter_updates BEFORE UPDATE OF searches ON foods \
         BEGIN SELECT RAISE(ABORT, 'counter updates disabled'); END",
    )
    .execute(fixture.repo.pool())
    .await
    .unwrap();

    let response = fixture.get("/api/search?q=momo").await;
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    let results = body["data"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["name"], "Momo");

    tokio::time::sleep(Duration::from_millis(300)).await;
    let food = fixture.repo.get_food(&food_id).await.unwrap().unwrap();
    assert_eq!(food.searches, 0);
}

// ==================== SURPRISE ====================

#[tokio::test]
async fn test_surprise_empty_catalog_is_null_not_error() {
    let fixture = TestFixture::new().await;

    let response = fixture.get("/api/surprise").await;
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert!(body["data"].is_null());
}

#[tokio::test]
async fn test_surprise_returns_a_pairing() {
    let fixture = TestFixture::new().await;
    let restaurant_id = fixture.seed_restaurant("Honacha").await;
    let food_id = fixture.seed_food("Bara").await;
    fixture.seed_menu_link(&restaurant_id, &food_id, 80.0).await;

    let body = fixture.get_json("/api/surprise").await;
    assert_eq!(body["data"]["name"], "Bara");
    assert_eq!(body["data"]["restaurant_name"], "Honacha");
}

// ==================== RESTAURANTS ====================

#[tokio::test]
async fn test_restaurant_detail_bumps_visits() {
    let fixture = TestFixture::new().await;
    let id = fixture.seed_restaurant("Sasa").await;

    let body = fixture.get_json(&format!("/api/restaurants/{}", id)).await;
    assert_eq!(body["data"]["name"], "Sasa");

    tokio::time::sleep(Duration::from_millis(300)).await;
    let restaurant = fixture.repo.get_restaurant(&id).await.unwrap().unwrap();
    assert_eq!(restaurant.visits, 1);
}

#[tokio::test]
async fn test_restaurant_not_found() {
    let fixture = TestFixture::new().await;

    let response = fixture.get("/api/restaurants/no-such-id").await;
    assert_eq!(response.status(), 404);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_top_restaurants_ranked_by_visits() {
    let fixture = TestFixture::new().await;
    let quiet = fixture.seed_restaurant("Quiet Corner").await;
    let busy = fixture.seed_restaurant("Busy Bee").await;
    for _ in 0..3 {
        fixture.repo.increment_restaurant_visits(&busy).await.unwrap();
    }
    fixture.repo.increment_restaurant_visits(&quiet).await.unwrap();

    let body = fixture.get_json("/api/restaurants/top?limit=2").await;
    let top = body["data"].as_array().unwrap();
    assert_eq!(top.len(), 2);
    assert_eq!(top[0]["name"], "Busy Bee");
    assert_eq!(top[0]["visits"], 3);
    assert_eq!(top[1]["name"], "Quiet Corner");
}

#[tokio::test]
async fn test_restaurant_menu_with_category_filter() {
    let fixture = TestFixture::new().await;
    let restaurant_id = fixture.seed_restaurant("Honacha").await;
    let bara = fixture.seed_food("Bara").await;
    let lassi = fixture
        .repo
        .create_food(&CreateFoodRequest {
            name: "Lassi".to_string(),
            description: None,
            long_description: None,
            cultural_significance: None,
            ingredients: None,
            origin_of_dish: None,
            serving_size: None,
            prep_time: None,
            spice_level: None,
            image_url: None,
            category: Some("Drinks".to_string()),
            is_trending: false,
        })
        .await
        .unwrap()
        .id;
    fixture.seed_menu_link(&restaurant_id, &bara, 80.0).await;
    fixture.seed_menu_link(&restaurant_id, &lassi, 120.0).await;

    let body = fixture
        .get_json(&format!("/api/restaurants/{}/menu", restaurant_id))
        .await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let body = fixture
        .get_json(&format!("/api/restaurants/{}/menu?category=Drinks", restaurant_id))
        .await;
    let menu = body["data"].as_array().unwrap();
    assert_eq!(menu.len(), 1);
    assert_eq!(menu[0]["name"], "Lassi");
    assert_eq!(menu[0]["price"], 120.0);
}

// ==================== FOODS ====================

#[tokio::test]
async fn test_food_detail_and_listing() {
    let fixture = TestFixture::new().await;
    let id = fixture.seed_food("Yomari").await;

    let body = fixture.get_json(&format!("/api/foods/{}", id)).await;
    assert_eq!(body["data"]["name"], "Yomari");
    assert_eq!(body["data"]["searches"], 0);

    let body = fixture.get_json("/api/foods").await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_food_serving_restaurants() {
    let fixture = TestFixture::new().await;
    let honacha = fixture.seed_restaurant("Honacha").await;
    let sasa = fixture.seed_restaurant("Sasa").await;
    let bara = fixture.seed_food("Bara").await;
    fixture.seed_menu_link(&honacha, &bara, 80.0).await;
    fixture.seed_menu_link(&sasa, &bara, 95.0).await;

    let body = fixture
        .get_json(&format!("/api/foods/{}/restaurants", bara))
        .await;
    let serving = body["data"].as_array().unwrap();
    assert_eq!(serving.len(), 2);
    assert_eq!(serving[0]["name"], "Honacha");
    assert_eq!(serving[0]["price"], 80.0);
    assert_eq!(serving[1]["name"], "Sasa");
}

#[tokio::test]
async fn test_food_variations_resolve_family_from_member() {
    let fixture = TestFixture::new().await;
    let momo = fixture.seed_food("Momo").await;
    let steamed = fixture.seed_food("Steamed Momo").await;
    let fried = fixture.seed_food("Fried Momo").await;

    fixture
        .repo
        .create_food_variation(&steamed, Some(&momo), "Steamed Momo", None, None)
        .await
        .unwrap();
    fixture
        .repo
        .create_food_variation(&fried, Some(&momo), "Fried Momo", None, None)
        .await
        .unwrap();

    // Parent sees the whole family
    let body = fixture.get_json(&format!("/api/foods/{}/variations", momo)).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    // A member resolves its parent first and sees the same family
    let body = fixture
        .get_json(&format!("/api/foods/{}/variations", fried))
        .await;
    let family = body["data"].as_array().unwrap();
    assert_eq!(family.len(), 2);
    assert_eq!(family[0]["name"], "Fried Momo");
    assert_eq!(family[1]["name"], "Steamed Momo");
}

#[tokio::test]
async fn test_unknown_food_subresources_are_404() {
    let fixture = TestFixture::new().await;

    for path in [
        "/api/foods/no-such-id/variations",
        "/api/foods/no-such-id/votes",
        "/api/foods/no-such-id/restaurants",
    ] {
        let response = fixture.get(path).await;
        assert_eq!(response.status(), 404, "{}", path);
    }
}

#[tokio::test]
async fn test_unknown_restaurant_subresources_are_404() {
    let fixture = TestFixture::new().await;

    for path in [
        "/api/restaurants/no-such-id/features",
        "/api/restaurants/no-such-id/votes",
        "/api/restaurants/no-such-id/menu",
    ] {
        let response = fixture.get(path).await;
        assert_eq!(response.status(), 404, "{}", path);
    }
}

#[tokio::test]
async fn test_top_foods_ranked_by_searches() {
    let fixture = TestFixture::new().await;
    let momo = fixture.seed_food("Momo").await;
    fixture.seed_food("Yomari").await;
    for _ in 0..5 {
        fixture.repo.increment_food_searches(&momo).await.unwrap();
    }

    let body = fixture.get_json("/api/foods/top?limit=1").await;
    let top = body["data"].as_array().unwrap();
    assert_eq!(top.len(), 1);
    assert_eq!(top[0]["name"], "Momo");
    assert_eq!(top[0]["searches"], 5);
}

// ==================== VOTES ====================

#[tokio::test]
async fn test_food_votes_tally() {
    let fixture = TestFixture::new().await;
    let id = fixture.seed_food("Momo").await;

    let path = format!("/api/foods/{}/votes", id);
    fixture.post_json(&path, &json!({ "liked": true })).await;
    fixture.post_json(&path, &json!({ "liked": true })).await;
    let response = fixture.post_json(&path, &json!({ "liked": false })).await;
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["likes"], 2);
    assert_eq!(body["data"]["dislikes"], 1);

    let body = fixture.get_json(&path).await;
    assert_eq!(body["data"]["likes"], 2);
    assert_eq!(body["data"]["dislikes"], 1);
}

#[tokio::test]
async fn test_vote_on_unknown_restaurant_is_404() {
    let fixture = TestFixture::new().await;
    let response = fixture
        .post_json("/api/restaurants/no-such-id/votes", &json!({ "liked": true }))
        .await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_restaurant_votes_empty_tally() {
    let fixture = TestFixture::new().await;
    let id = fixture.seed_restaurant("Sasa").await;

    let body = fixture
        .get_json(&format!("/api/restaurants/{}/votes", id))
        .await;
    assert_eq!(body["data"]["likes"], 0);
    assert_eq!(body["data"]["dislikes"], 0);
}

// ==================== ADMIN AUTH ====================

#[tokio::test]
async fn test_admin_requires_api_key() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .post_json("/api/admin/restaurants", &json!({ "name": "X", "description": "d", "location": "l" }))
        .await;
    assert_eq!(response.status(), 401);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_admin_rejects_wrong_key() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .client
        .post(format!("{}/api/admin/foods", fixture.base_url))
        .header("x-api-key", "wrong-key")
        .json(&json!({ "name": "Momo" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn test_admin_accepts_bearer_token() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .client
        .post(format!("{}/api/admin/foods", fixture.base_url))
        .header("authorization", format!("Bearer {}", TEST_PSK))
        .json(&json!({ "name": "Momo" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_admin_open_when_no_psk_configured() {
    let fixture = TestFixture::with_psk(None).await;

    let response = fixture
        .post_json("/api/admin/foods", &json!({ "name": "Momo" }))
        .await;
    assert_eq!(response.status(), 200);
}

// ==================== ADMIN CRUD ====================

#[tokio::test]
async fn test_restaurant_crud_flow() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .admin_post(
            "/api/admin/restaurants",
            &json!({
                "name": "Honacha",
                "description": "Classic Newari eatery",
                "location": "Patan",
                "rating": 4.5,
                "category": "Newari"
            }),
        )
        .await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    let id = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["visits"], 0);

    // Partial update leaves untouched fields alone
    let response = fixture
        .admin_put(
            &format!("/api/admin/restaurants/{}", id),
            &json!({ "rating": 4.8 }),
        )
        .await;
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["rating"], 4.8);
    assert_eq!(body["data"]["name"], "Honacha");
    assert_eq!(body["data"]["location"], "Patan");

    let response = fixture
        .admin_delete(&format!("/api/admin/restaurants/{}", id))
        .await;
    assert_eq!(response.status(), 200);

    let response = fixture.get(&format!("/api/restaurants/{}", id)).await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_create_restaurant_rejects_blank_name() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .admin_post(
            "/api/admin/restaurants",
            &json!({ "name": "   ", "description": "d", "location": "l" }),
        )
        .await;
    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_food_update_preserves_counters() {
    let fixture = TestFixture::new().await;
    let id = fixture.seed_food("Momo").await;
    fixture.repo.increment_food_searches(&id).await.unwrap();

    let response = fixture
        .admin_put(
            &format!("/api/admin/foods/{}", id),
            &json!({ "spice_level": "Medium", "is_trending": true }),
        )
        .await;
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["name"], "Momo");
    assert_eq!(body["data"]["spice_level"], "Medium");
    assert_eq!(body["data"]["is_trending"], true);
    assert_eq!(body["data"]["searches"], 1);
}

#[tokio::test]
async fn test_delete_food_removes_menu_links_and_votes() {
    let fixture = TestFixture::new().await;
    let restaurant_id = fixture.seed_restaurant("Honacha").await;
    let food_id = fixture.seed_food("Bara").await;
    fixture.seed_menu_link(&restaurant_id, &food_id, 80.0).await;
    fixture.repo.add_food_vote(&food_id, true).await.unwrap();

    let response = fixture
        .admin_delete(&format!("/api/admin/foods/{}", food_id))
        .await;
    assert_eq!(response.status(), 200);

    let body = fixture
        .get_json(&format!("/api/restaurants/{}/menu", restaurant_id))
        .await;
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_restaurant_removes_dependent_rows() {
    let fixture = TestFixture::new().await;
    let restaurant_id = fixture.seed_restaurant("Honacha").await;
    let food_id = fixture.seed_food("Bara").await;
    fixture.seed_menu_link(&restaurant_id, &food_id, 80.0).await;
    fixture
        .repo
        .add_restaurant_vote(&restaurant_id, true)
        .await
        .unwrap();
    fixture
        .admin_post(
            "/api/admin/features",
            &json!({
                "restaurant_id": restaurant_id,
                "vlogger_name": "FoodmanduTV",
                "content_type": "video",
                "content_url": "https://example.com/v/1",
                "feature_date": "2026-08-01",
                "platform": "YouTube"
            }),
        )
        .await;

    let response = fixture
        .admin_delete(&format!("/api/admin/restaurants/{}", restaurant_id))
        .await;
    assert_eq!(response.status(), 200);

    // Menu links, votes and features go with the restaurant
    let serving = fixture.repo.food_restaurants(&food_id).await.unwrap();
    assert!(serving.is_empty());
    let counts = fixture
        .repo
        .restaurant_vote_counts(&restaurant_id)
        .await
        .unwrap();
    assert_eq!(counts.likes, 0);
    let features = fixture.repo.list_vlogger_features().await.unwrap();
    assert!(features.is_empty());
}

#[tokio::test]
async fn test_menu_link_rejects_duplicates_and_unknown_sides() {
    let fixture = TestFixture::new().await;
    let restaurant_id = fixture.seed_restaurant("Honacha").await;
    let food_id = fixture.seed_food("Bara").await;

    let body = json!({ "restaurant_id": restaurant_id, "food_id": food_id, "price": 80.0 });
    let response = fixture.admin_post("/api/admin/menu", &body).await;
    assert_eq!(response.status(), 200);

    let response = fixture.admin_post("/api/admin/menu", &body).await;
    assert_eq!(response.status(), 400);

    let response = fixture
        .admin_post(
            "/api/admin/menu",
            &json!({ "restaurant_id": restaurant_id, "food_id": "no-such-food", "price": 1.0 }),
        )
        .await;
    assert_eq!(response.status(), 404);
}

// ==================== VLOGGER FEATURES ====================

#[tokio::test]
async fn test_vlogger_feature_flow() {
    let fixture = TestFixture::new().await;
    let restaurant_id = fixture.seed_restaurant("Honacha").await;

    let response = fixture
        .admin_post(
            "/api/admin/features",
            &json!({
                "restaurant_id": restaurant_id,
                "vlogger_name": "FoodmanduTV",
                "content_type": "video",
                "content_url": "https://example.com/v/1",
                "feature_date": "2026-08-01",
                "platform": "YouTube"
            }),
        )
        .await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    let feature_id = body["data"]["id"].as_str().unwrap().to_string();

    // Public per-restaurant listing
    let body = fixture
        .get_json(&format!("/api/restaurants/{}/features", restaurant_id))
        .await;
    let features = body["data"].as_array().unwrap();
    assert_eq!(features.len(), 1);
    assert_eq!(features[0]["vlogger_name"], "FoodmanduTV");
    assert_eq!(features[0]["content_type"], "video");

    // Admin listing joins in the restaurant's name
    let response = fixture
        .client
        .get(format!("{}/api/admin/features", fixture.base_url))
        .header("x-api-key", TEST_PSK)
        .send()
        .await
        .unwrap();
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"][0]["restaurant_name"], "Honacha");

    let response = fixture
        .admin_delete(&format!("/api/admin/features/{}", feature_id))
        .await;
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_feature_update_rejects_unknown_restaurant() {
    let fixture = TestFixture::new().await;
    let restaurant_id = fixture.seed_restaurant("Honacha").await;

    let response = fixture
        .admin_post(
            "/api/admin/features",
            &json!({
                "restaurant_id": restaurant_id,
                "vlogger_name": "FoodmanduTV",
                "content_type": "video",
                "content_url": "https://example.com/v/1",
                "feature_date": "2026-08-01",
                "platform": "YouTube"
            }),
        )
        .await;
    let body: Value = response.json().await.unwrap();
    let feature_id = body["data"]["id"].as_str().unwrap().to_string();

    // Repointing at a nonexistent restaurant is rejected
    let response = fixture
        .admin_put(
            &format!("/api/admin/features/{}", feature_id),
            &json!({ "restaurant_id": "no-such-id" }),
        )
        .await;
    assert_eq!(response.status(), 404);

    // The feature still belongs to the original restaurant
    let body = fixture
        .get_json(&format!("/api/restaurants/{}/features", restaurant_id))
        .await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_vlogger_feature_unknown_restaurant_is_404() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .admin_post(
            "/api/admin/features",
            &json!({
                "restaurant_id": "no-such-id",
                "vlogger_name": "FoodmanduTV",
                "content_type": "image",
                "content_url": "https://example.com/i/1",
                "feature_date": "2026-08-01",
                "platform": "Instagram"
            }),
        )
        .await;
    assert_eq!(response.status(), 404);
}

// ==================== STATS ====================

#[tokio::test]
async fn test_stats_report() {
    let fixture = TestFixture::new().await;
    let restaurant_id = fixture.seed_restaurant("Honacha").await;
    let food_id = fixture.seed_food("Bara").await;
    fixture.seed_food("Yomari").await;
    fixture.repo.add_food_vote(&food_id, true).await.unwrap();
    fixture
        .repo
        .add_restaurant_vote(&restaurant_id, true)
        .await
        .unwrap();
    fixture.repo.increment_food_searches(&food_id).await.unwrap();

    let body = fixture.get_json("/api/stats").await;
    let overview = &body["data"]["overview"];
    assert_eq!(overview["restaurant_count"], 1);
    assert_eq!(overview["food_count"], 2);
    assert_eq!(overview["food_category_count"], 1);

    assert_eq!(body["data"]["top_voted_foods"][0]["name"], "Bara");
    assert_eq!(body["data"]["top_voted_foods"][0]["likes"], 1);
    assert_eq!(body["data"]["top_voted_restaurants"][0]["name"], "Honacha");
    assert_eq!(body["data"]["most_searched_foods"][0]["name"], "Bara");
}
