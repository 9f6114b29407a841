//! Integration tests for the research area, direction and feature endpoints,
//! run against both storage backends.

mod common;

use axum::http::StatusCode;
use common::{body_json, create, delete, get, patch_json, post_json, put_json};
use labsite_db::research_store::ResearchBackend;
use serde_json::json;
use sqlx::SqlitePool;

fn area(title: &str) -> serde_json::Value {
    json!({ "title": title, "description": format!("About {title}") })
}

async fn orders(app: axum::Router, uri: &str) -> Vec<(String, i64)> {
    let list = body_json(get(app, uri).await).await;
    list.as_array()
        .unwrap()
        .iter()
        .map(|item| {
            (
                item["title"].as_str().unwrap().to_string(),
                item["order"].as_i64().unwrap(),
            )
        })
        .collect()
}

async fn delete_renumbers_survivors(backend: ResearchBackend, pool: SqlitePool) {
    let t = common::build_test_app_with(pool, backend).await;
    let mut ids = Vec::new();
    for title in ["A", "B", "C", "D"] {
        ids.push(create(t.app(), "/api/research-areas", area(title)).await);
    }

    let response = delete(t.app(), &format!("/api/research-areas/{}", ids[1])).await;
    assert_eq!(response.status(), StatusCode::OK);

    let listed = orders(t.app(), "/api/research-areas").await;
    assert_eq!(
        listed,
        vec![("A".into(), 1), ("C".into(), 2), ("D".into(), 3)]
    );

    let id = create(t.app(), "/api/research-areas", area("E")).await;
    assert!(id > ids[3], "ids must not be reused");
}

#[sqlx::test(migrations = false)]
async fn delete_renumbers_survivors_in_documents(pool: SqlitePool) {
    delete_renumbers_survivors(ResearchBackend::Document, pool).await;
}

#[sqlx::test(migrations = false)]
async fn delete_renumbers_survivors_in_sqlite(pool: SqlitePool) {
    delete_renumbers_survivors(ResearchBackend::Sqlite, pool).await;
}

async fn new_area_gets_default_link(backend: ResearchBackend, pool: SqlitePool) {
    let t = common::build_test_app_with(pool, backend).await;
    let response = post_json(t.app(), "/api/research-areas", area("Vision")).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let id = json["id"].as_i64().unwrap();
    assert_eq!(json["link"], format!("/main/research#{id}"));
    assert_eq!(json["order"], 1);
    assert_eq!(json["isActive"], true);

    let feature = body_json(
        post_json(t.app(), "/api/research-features", area("Lab")).await,
    )
    .await;
    assert!(feature.get("link").is_none());
}

#[sqlx::test(migrations = false)]
async fn new_area_gets_default_link_in_documents(pool: SqlitePool) {
    new_area_gets_default_link(ResearchBackend::Document, pool).await;
}

#[sqlx::test(migrations = false)]
async fn new_area_gets_default_link_in_sqlite(pool: SqlitePool) {
    new_area_gets_default_link(ResearchBackend::Sqlite, pool).await;
}

#[sqlx::test(migrations = false)]
async fn kinds_are_listed_independently(pool: SqlitePool) {
    let t = common::build_test_app(pool).await;
    create(t.app(), "/api/research-areas", area("Area")).await;
    create(t.app(), "/api/research-directions", json!({ "title": "Direction" })).await;

    let directions = orders(t.app(), "/api/research-directions").await;
    assert_eq!(directions, vec![("Direction".into(), 1)]);
    let features = body_json(get(t.app(), "/api/research-features").await).await;
    assert_eq!(features, json!([]));
}

#[sqlx::test(migrations = false)]
async fn description_is_required_for_areas_only(pool: SqlitePool) {
    let t = common::build_test_app(pool).await;
    let response = post_json(t.app(), "/api/research-areas", json!({ "title": "Bare" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json(t.app(), "/api/research-directions", json!({ "title": "Bare" })).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = false)]
async fn update_clamps_order_and_returns_item(pool: SqlitePool) {
    let t = common::build_test_app(pool).await;
    let id = create(t.app(), "/api/research-features", area("Lab")).await;

    let response = patch_json(
        t.app(),
        &format!("/api/research-features/{id}"),
        json!({ "order": -3, "isActive": false }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["order"], 1);
    assert_eq!(json["isActive"], false);

    let response = put_json(
        t.app(),
        &format!("/api/research-features/{id}"),
        json!({ "title": "Clean room" }),
    )
    .await;
    assert_eq!(body_json(response).await["title"], "Clean room");
}

#[sqlx::test(migrations = false)]
async fn active_filter_applies_before_limit(pool: SqlitePool) {
    let t = common::build_test_app(pool).await;
    create(
        t.app(),
        "/api/research-areas",
        json!({ "title": "Hidden", "description": "x", "isActive": false }),
    )
    .await;
    create(t.app(), "/api/research-areas", area("Shown 1")).await;
    create(t.app(), "/api/research-areas", area("Shown 2")).await;

    let listed = orders(t.app(), "/api/research-areas?active=true&limit=1").await;
    assert_eq!(listed, vec![("Shown 1".into(), 2)]);

    let listed = orders(t.app(), "/api/research-areas").await;
    assert_eq!(listed.len(), 3);
}

#[sqlx::test(migrations = false)]
async fn missing_research_item_returns_404_with_kind_name(pool: SqlitePool) {
    let t = common::build_test_app(pool).await;
    let response = get(t.app(), "/api/research-directions/42").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("ResearchDirection"));

    let response = delete(t.app(), "/api/research-directions/42").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = false)]
async fn document_backend_writes_into_data_dir(pool: SqlitePool) {
    let t = common::build_test_app(pool).await;
    create(t.app(), "/api/research-areas", area("Persisted")).await;

    let raw = std::fs::read_to_string(t.data_dir.path().join("researchAreas.json")).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(doc["researchAreas"][0]["title"], "Persisted");
}

#[sqlx::test(migrations = false)]
async fn null_description_clears_directions_but_not_areas(pool: SqlitePool) {
    let t = common::build_test_app(pool).await;
    let area_id = create(t.app(), "/api/research-areas", area("Photonics")).await;
    let direction_id = create(t.app(), "/api/research-directions", area("Sensing")).await;

    let response = patch_json(
        t.app(),
        &format!("/api/research-areas/{area_id}"),
        json!({ "description": null }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = patch_json(
        t.app(),
        &format!("/api/research-directions/{direction_id}"),
        json!({ "description": null }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(get(t.app(), &format!("/api/research-directions/{direction_id}")).await).await;
    assert!(json.get("description").map_or(true, |d| d.is_null()));
}

#[sqlx::test(migrations = false)]
async fn misshapen_document_is_a_500_and_left_alone(pool: SqlitePool) {
    let t = common::build_test_app(pool).await;
    let path = t.data_dir.path().join("researchAreas.json");
    std::fs::write(&path, r#"{ "areas": [] }"#).unwrap();

    let response = get(t.app(), "/api/research-areas").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let response = post_json(t.app(), "/api/research-areas", area("Lost")).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), r#"{ "areas": [] }"#);
}
