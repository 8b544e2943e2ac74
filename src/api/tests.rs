// HTTP-level tests: the full routing table over the in-memory store.

use actix_web::{body::MessageBody, dev::ServiceResponse, http::StatusCode, test, web, App};
use mongodb::bson::oid::ObjectId;
use serde_json::{json, Value};
use std::sync::Arc;

use super::favorites::{ALREADY_FAVORITE, NOTHING_TO_DELETE, NOT_A_FAVORITE};
use crate::database::{memory::MemoryStore, FavoritesStore, PartnerStore};
use crate::services::auth_service::{issue_token, JwtConfig, ADMIN_ROLE};

macro_rules! app {
    ($store:expr) => {{
        let store: Arc<MemoryStore> = $store;
        test::init_service(
            App::new()
                .app_data(web::Data::from(store.clone() as Arc<dyn FavoritesStore>))
                .app_data(web::Data::from(store as Arc<dyn PartnerStore>))
                .app_data(web::Data::new(JwtConfig::for_tests()))
                .configure(super::routes),
        )
        .await
    }};
}

fn bearer(user_id: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", issue_token(user_id, &["user"])))
}

fn admin_bearer() -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", issue_token("root", &["user", ADMIN_ROLE])))
}

async fn body_text(resp: ServiceResponse<impl MessageBody>) -> String {
    String::from_utf8(test::read_body(resp).await.to_vec()).unwrap()
}

#[actix_web::test]
async fn test_favorites_require_token() {
    let app = app!(Arc::new(MemoryStore::new()));

    let req = test::TestRequest::get().uri("/api/v1/favorites").to_request();
    let err = test::try_call_service(&app, req).await.err().expect("request should be rejected");
    assert_eq!(err.as_response_error().status_code(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_favorites_flow() {
    let store = Arc::new(MemoryStore::new());
    let lake = store.insert_campsite("React Lake");
    let river = store.insert_campsite("Chrome River");
    let app = app!(store.clone());

    // create with duplicates in the request
    let req = test::TestRequest::post()
        .uri("/api/v1/favorites")
        .insert_header(bearer("alice"))
        .set_json(json!([{ "_id": lake.to_hex() }, { "_id": lake.to_hex() }]))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["campsites"], json!([lake.to_hex()]));

    // single add of something already there
    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/favorites/{}", lake.to_hex()))
        .insert_header(bearer("alice"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_text(resp).await, ALREADY_FAVORITE);

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/favorites/{}", river.to_hex()))
        .insert_header(bearer("alice"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["campsites"], json!([lake.to_hex(), river.to_hex()]));

    // populated read
    let req = test::TestRequest::get()
        .uri("/api/v1/favorites")
        .insert_header(bearer("alice"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["campsites"][0]["name"], "React Lake");
    assert_eq!(body["campsites"][1]["_id"], river.to_hex());

    // removing a campsite that is not a favorite
    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/favorites/{}", ObjectId::new().to_hex()))
        .insert_header(bearer("alice"))
        .to_request();
    assert_eq!(body_text(test::call_service(&app, req).await).await, NOT_A_FAVORITE);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/favorites/{}", lake.to_hex()))
        .insert_header(bearer("alice"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["campsites"], json!([river.to_hex()]));

    // bob has nothing
    let req = test::TestRequest::delete()
        .uri("/api/v1/favorites")
        .insert_header(bearer("bob"))
        .to_request();
    assert_eq!(body_text(test::call_service(&app, req).await).await, NOTHING_TO_DELETE);

    let req = test::TestRequest::delete()
        .uri("/api/v1/favorites")
        .insert_header(bearer("alice"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["user"], "alice");
    assert_eq!(store.favorites_count(), 0);
}

#[actix_web::test]
async fn test_invalid_campsite_id_is_bad_request() {
    let app = app!(Arc::new(MemoryStore::new()));

    let req = test::TestRequest::post()
        .uri("/api/v1/favorites/not-an-id")
        .insert_header(bearer("alice"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_unsupported_routes_answer_fixed_text() {
    let app = app!(Arc::new(MemoryStore::new()));

    for body in [json!({}), json!({ "anything": [1, 2, 3] })] {
        let req = test::TestRequest::put()
            .uri("/api/v1/favorites")
            .insert_header(bearer("alice"))
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        assert_eq!(body_text(resp).await, "PUT operation not supported on /favorites");
    }

    let partner = ObjectId::new().to_hex();
    let comment = ObjectId::new().to_hex();
    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/partners/{}/comments/{}", partner, comment))
        .insert_header(bearer("alice"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        body_text(resp).await,
        "POST operation not supported on /partners/{partnerId}/comments/{commentId}"
    );

    let req = test::TestRequest::put()
        .uri("/api/v1/partners")
        .insert_header(bearer("alice"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_partner_writes_need_admin() {
    let app = app!(Arc::new(MemoryStore::new()));

    let req = test::TestRequest::post()
        .uri("/api/v1/partners")
        .insert_header(bearer("alice"))
        .set_json(json!({ "name": "Mongo Fly Shop" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri("/api/v1/partners")
        .insert_header(admin_bearer())
        .set_json(json!({ "name": "Mongo Fly Shop", "featured": true }))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(created["featured"], true);

    // public read, no token
    let req = test::TestRequest::get().uri("/api/v1/partners").to_request();
    let listed: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let req = test::TestRequest::post().uri("/api/v1/partners").set_json(json!({ "name": "X" })).to_request();
    let err = test::try_call_service(&app, req).await.err().expect("write without token");
    assert_eq!(err.as_response_error().status_code(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_comment_ownership_over_http() {
    let store = Arc::new(MemoryStore::new());
    store.insert_user("A", "Ada");
    let app = app!(store);

    let req = test::TestRequest::post()
        .uri("/api/v1/partners")
        .insert_header(admin_bearer())
        .set_json(json!({ "name": "Mongo Fly Shop" }))
        .to_request();
    let partner: Value = test::call_and_read_body_json(&app, req).await;
    let partner_id = partner["id"].as_str().unwrap().to_string();
    let comments_uri = format!("/api/v1/partners/{}/comments", partner_id);

    // empty list, not an error
    let req = test::TestRequest::get().uri(&comments_uri).to_request();
    let comments: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(comments, json!([]));

    let req = test::TestRequest::post()
        .uri(&comments_uri)
        .insert_header(bearer("A"))
        .set_json(json!({ "rating": 3, "text": "Decent" }))
        .to_request();
    test::call_service(&app, req).await;
    let req = test::TestRequest::post()
        .uri(&comments_uri)
        .insert_header(bearer("B"))
        .set_json(json!({ "rating": 5, "text": "Superb" }))
        .to_request();
    let partner: Value = test::call_and_read_body_json(&app, req).await;
    let first = partner["comments"][0]["id"].as_str().unwrap().to_string();
    let second = partner["comments"][1]["id"].as_str().unwrap().to_string();
    assert_eq!(partner["comments"][0]["author"]["name"], "Ada");

    // B cannot edit A's comment
    let req = test::TestRequest::put()
        .uri(&format!("{}/{}", comments_uri, first))
        .insert_header(bearer("B"))
        .set_json(json!({ "rating": 1 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::put()
        .uri(&format!("{}/{}", comments_uri, first))
        .insert_header(bearer("A"))
        .set_json(json!({ "text": "Better than expected" }))
        .to_request();
    let partner: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(partner["comments"][0]["rating"], 3);
    assert_eq!(partner["comments"][0]["text"], "Better than expected");

    // A deletes own comment, then fails on B's
    let req = test::TestRequest::delete()
        .uri(&format!("{}/{}", comments_uri, first))
        .insert_header(bearer("A"))
        .to_request();
    let partner: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(partner["comments"].as_array().unwrap().len(), 1);
    assert_eq!(partner["comments"][0]["id"], second);

    let req = test::TestRequest::delete()
        .uri(&format!("{}/{}", comments_uri, second))
        .insert_header(bearer("A"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get().uri(&format!("{}/{}", comments_uri, second)).to_request();
    let comment: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(comment["rating"], 5);
    assert_eq!(comment["author"]["user_id"], "B");

    // admin clears everything
    let req = test::TestRequest::delete()
        .uri(&comments_uri)
        .insert_header(admin_bearer())
        .to_request();
    let partner: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(partner["comments"], json!([]));
}

#[actix_web::test]
async fn test_missing_partner_is_not_found() {
    let app = app!(Arc::new(MemoryStore::new()));

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/partners/{}/comments", ObjectId::new().to_hex()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().starts_with("Partner"));
}

#[actix_web::test]
async fn test_token_signed_with_public_default_is_rejected() {
    let app = app!(Arc::new(MemoryStore::new()));
    let forged = JwtConfig::sign("default-secret-change-me", &JwtConfig::for_tests(), "mallory", &[ADMIN_ROLE]);

    let req = test::TestRequest::delete()
        .uri("/api/v1/partners")
        .insert_header(("Authorization", format!("Bearer {}", forged)))
        .to_request();
    let err = test::try_call_service(&app, req).await.err().expect("forged token should be rejected");
    assert_eq!(err.as_response_error().status_code(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_public_reads_ignore_stale_token() {
    let app = app!(Arc::new(MemoryStore::new()));

    let req = test::TestRequest::get()
        .uri("/api/v1/partners")
        .insert_header(("Authorization", "Bearer expired.or.garbage"))
        .to_request();
    let listed: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(listed, json!([]));

    // writes still need a valid token
    let req = test::TestRequest::post()
        .uri("/api/v1/partners")
        .insert_header(("Authorization", "Bearer expired.or.garbage"))
        .set_json(json!({ "name": "X" }))
        .to_request();
    let err = test::try_call_service(&app, req).await.err().expect("write with bad token");
    assert_eq!(err.as_response_error().status_code(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_malformed_bodies_answer_json_bad_request() {
    let app = app!(Arc::new(MemoryStore::new()));

    let req = test::TestRequest::post()
        .uri("/api/v1/partners")
        .insert_header(admin_bearer())
        .set_json(json!({ "name": "Mongo Fly Shop" }))
        .to_request();
    let partner: Value = test::call_and_read_body_json(&app, req).await;
    let comments_uri = format!("/api/v1/partners/{}/comments", partner["id"].as_str().unwrap());

    for body in [json!({ "rating": 300, "text": "Loud" }), json!({ "text": "No rating" })] {
        let req = test::TestRequest::post()
            .uri(&comments_uri)
            .insert_header(bearer("alice"))
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
    }

    let req = test::TestRequest::post()
        .uri("/api/v1/favorites")
        .insert_header(bearer("alice"))
        .set_json(json!({ "_id": "not a list" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
}

#[actix_web::test]
async fn test_empty_favorites_request_creates_nothing() {
    let store = Arc::new(MemoryStore::new());
    let app = app!(store.clone());

    let req = test::TestRequest::post()
        .uri("/api/v1/favorites")
        .insert_header(bearer("alice"))
        .set_json(json!([]))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
    assert_eq!(store.favorites_count(), 0);
}

#[actix_web::test]
async fn test_health_check() {
    let app = test::init_service(App::new().route("/health", web::get().to(super::health::health_check))).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], env!("CARGO_PKG_NAME"));
}
