//! HTTP-level integration tests for recipe lookup, listing, and sampling.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router
//! without an actual TCP listener.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{body_json, get, TestDeps, SAMPLE_URL};
use scrapeme_db::models::recipe::CreateRecipe;
use scrapeme_db::repositories::RecipeRepo;
use scrapeme_scraper::FakeScraper;
use sqlx::PgPool;

const RECIPE_URL: &str = "https://www.example.com/recipe/21/fried-rice";

fn parse_uri(url: &str) -> String {
    format!("/api/v1/recipes/parse?url={url}")
}

// ---------------------------------------------------------------------------
// GET /recipes/parse
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_parse_returns_serialized_recipe(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, &parse_uri(RECIPE_URL)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
    for key in [
        "id",
        "source_url",
        "description",
        "title",
        "author",
        "total_time",
        "yields",
        "image",
        "ingredients",
        "instructions",
        "views",
        "type",
        "created_at",
        "updated_at",
    ] {
        assert!(keys.iter().any(|k| k == key), "missing key {key}");
    }
    assert_eq!(json["source_url"], RECIPE_URL);
    assert_eq!(json["type"], "url");
    assert_eq!(json["views"], 1);
    assert_eq!(json["description"], "A quick weeknight fried rice.");
    assert!(json["created_at"].as_str().unwrap().contains('T'));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_parse_twice_increments_views_without_rescraping(pool: PgPool) {
    let deps = TestDeps::default();

    let app = common::build_test_app_with(pool.clone(), &deps);
    let first = body_json(get(app, &parse_uri(RECIPE_URL)).await).await;

    let app = common::build_test_app_with(pool, &deps);
    let second = body_json(get(app, &parse_uri(&format!("{RECIPE_URL}/"))).await).await;

    assert_eq!(second["id"], first["id"]);
    assert_eq!(second["views"], 2);
    assert_eq!(deps.scraper.call_count(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_parse_missing_url_returns_400(pool: PgPool) {
    for uri in ["/api/v1/recipes/parse", "/api/v1/recipes/parse?url="] {
        let app = common::build_test_app(pool.clone());
        let response = get(app, uri).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["error"],
            "Missing required 'url' query parameter."
        );
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_parse_invalid_url_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, &parse_uri("ftp://example.com/recipe")).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Invalid URL provided.");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_parse_scrape_failure_passes_message_through(pool: PgPool) {
    let deps = TestDeps {
        scraper: Arc::new(FakeScraper::failing("Website not supported: example.com")),
        ..TestDeps::default()
    };
    let app = common::build_test_app_with(pool.clone(), &deps);
    let response = get(app, &parse_uri(RECIPE_URL)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "Website not supported: example.com"
    );
    assert_eq!(RecipeRepo::count(&pool, None).await.unwrap(), 0);
}

// ---------------------------------------------------------------------------
// GET /recipes
// ---------------------------------------------------------------------------

async fn seed(pool: &PgPool, titles: &[&str]) {
    for title in titles {
        RecipeRepo::create(
            pool,
            &CreateRecipe {
                title: title.to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_defaults(pool: PgPool) {
    seed(&pool, &["First", "Second"]).await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/recipes").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["query"], "");
    assert_eq!(json["results"][0]["title"], "Second");
    assert_eq!(json["results"][0]["type"], "user_input");
    assert_eq!(
        json["pagination"],
        serde_json::json!({
            "page": 1,
            "page_size": 10,
            "total_items": 2,
            "total_pages": 1,
            "has_next": false,
            "has_previous": false,
        })
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_search_and_paging(pool: PgPool) {
    seed(&pool, &["Pesto Pasta", "Tomato Soup", "Pasta Bake", "Pasta Salad"]).await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/recipes?q=pasta&page=2&page_size=2").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["query"], "pasta");
    assert_eq!(json["results"].as_array().unwrap().len(), 1);
    assert_eq!(json["results"][0]["title"], "Pesto Pasta");
    assert_eq!(json["pagination"]["total_items"], 3);
    assert_eq!(json["pagination"]["total_pages"], 2);
    assert_eq!(json["pagination"]["has_next"], false);
    assert_eq!(json["pagination"]["has_previous"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_rejects_invalid_page(pool: PgPool) {
    for uri in ["/api/v1/recipes?page=0", "/api/v1/recipes?page=abc"] {
        let app = common::build_test_app(pool.clone());
        let response = get(app, uri).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["error"],
            "Invalid 'page' parameter. Must be a positive integer."
        );
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_rejects_invalid_page_size(pool: PgPool) {
    for uri in ["/api/v1/recipes?page_size=0", "/api/v1/recipes?page_size=101"] {
        let app = common::build_test_app(pool.clone());
        let response = get(app, uri).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["error"],
            "Invalid 'page_size' parameter. Must be between 1 and 100."
        );
    }
}

// ---------------------------------------------------------------------------
// GET /recipes/sample
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_sample_scrapes_configured_url_without_storing(pool: PgPool) {
    let deps = TestDeps::default();
    let app = common::build_test_app_with(pool.clone(), &deps);

    let response = get(app, "/api/v1/recipes/sample").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["title"], "Chinese Chicken Fried Rice II");
    assert_eq!(deps.scraper.calls(), vec![SAMPLE_URL]);
    assert_eq!(RecipeRepo::count(&pool, None).await.unwrap(), 0);
}
