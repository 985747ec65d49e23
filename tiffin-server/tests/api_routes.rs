//! HTTP-level tests: router wiring, role gates, cookie issuance.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use tower::ServiceExt;

use tiffin_server::api;
use tiffin_server::auth::{JwtConfig, hash_password};
use tiffin_server::core::{Config, ServerState};
use tiffin_server::db;
use tiffin_server::otp::TwoFactorClient;

async fn test_state() -> ServerState {
    let config = Config {
        work_dir: "/tmp/tiffin-test".to_string(),
        http_port: 0,
        jwt: JwtConfig {
            secret: "integration-test-secret-integration!".to_string(),
            admin_expiration_minutes: 24 * 60,
            kitchen_expiration_minutes: 7 * 24 * 60,
        },
        environment: "development".to_string(),
        admin_password_hash: Some(hash_password("admin-secret").unwrap()),
        kitchen_password_hash: Some(hash_password("kitchen-secret").unwrap()),
        otp_api_key: None,
        otp_template: None,
        otp_country_code: "91".to_string(),
    };

    let db = db::memory().await.expect("Failed to open in-memory db");
    let otp = Arc::new(TwoFactorClient::new(None, "91", None));
    ServerState::assemble(config, db, otp)
}

fn app(state: &ServerState) -> Router {
    api::build_app(state).with_state(state.clone())
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn login(state: &ServerState, path: &str, password: &str) -> (StatusCode, serde_json::Value) {
    let response = app(state)
        .oneshot(json_request("POST", path, serde_json::json!({ "password": password })))
        .await
        .unwrap();
    let status = response.status();
    let body = body_json(response).await;
    (status, body)
}

#[tokio::test]
async fn test_health_is_public() {
    let state = test_state().await;

    let response = app(&state)
        .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_staff_routes_require_a_token() {
    let state = test_state().await;

    let response = app(&state)
        .oneshot(Request::get("/api/orders").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_login_sets_cookie_and_grants_access() {
    let state = test_state().await;

    // Wrong password is a unified 400
    let (status, _) = login(&state, "/api/auth/admin/login", "nope").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Correct password returns a token and an httpOnly cookie
    let response = app(&state)
        .oneshot(json_request(
            "POST",
            "/api/auth/admin/login",
            serde_json::json!({ "password": "admin-secret" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("admin_token="));
    assert!(cookie.contains("HttpOnly"));

    let body = body_json(response).await;
    let token = body["token"].as_str().unwrap().to_string();
    assert_eq!(body["role"], "admin");

    // Bearer token opens the admin-only category mutation
    let response = app(&state)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/categories")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::from(
                    serde_json::json!({ "name": "Thali" }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // The cookie works too
    let response = app(&state)
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/orders")
                .header(header::COOKIE, cookie.split(';').next().unwrap())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_kitchen_role_cannot_mutate_the_menu() {
    let state = test_state().await;

    let (status, body) = login(&state, "/api/auth/kitchen/login", "kitchen-secret").await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap().to_string();

    // Kitchen can read the staff order list
    let response = app(&state)
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/orders")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // But not create categories
    let response = app(&state)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/categories")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::from(
                    serde_json::json!({ "name": "Thali" }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_otp_endpoints_validate_before_the_gateway() {
    let state = test_state().await;

    // Malformed phone fails locally with 400
    let response = app(&state)
        .oneshot(json_request(
            "POST",
            "/api/auth/otp/send",
            serde_json::json!({ "phone": "12345" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Valid phone reaches the (unconfigured) gateway and surfaces 502
    let response = app(&state)
        .oneshot(json_request(
            "POST",
            "/api/auth/otp/send",
            serde_json::json!({ "phone": "9876543210" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    // OTP shape is validated too
    let response = app(&state)
        .oneshot(json_request(
            "POST",
            "/api/auth/otp/verify",
            serde_json::json!({ "phone": "9876543210", "otp": "12" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_table_cart_flow_over_http() {
    let state = test_state().await;

    // Seed one category + menu item as admin
    let (_, body) = login(&state, "/api/auth/admin/login", "admin-secret").await;
    let token = body["token"].as_str().unwrap().to_string();

    let response = app(&state)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/categories")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::from(
                    serde_json::json!({ "name": "Drinks" }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    let category = body_json(response).await;

    let response = app(&state)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/menu")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::from(
                    serde_json::json!({
                        "name": "Chai",
                        "price": 20.0,
                        "category_id": category["id"],
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let chai = body_json(response).await;

    // Add it twice to table 3's cart
    for _ in 0..2 {
        let response = app(&state)
            .oneshot(json_request(
                "POST",
                "/api/tables/3/cart/items",
                serde_json::json!({ "menu_item_id": chai["id"] }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app(&state)
        .oneshot(Request::get("/api/tables/3/cart").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let cart = body_json(response).await;
    assert_eq!(cart["entries"][0]["quantity"], 2);

    // Checkout produces a dine-in order and clears the cart
    let response = app(&state)
        .oneshot(json_request(
            "POST",
            "/api/tables/3/cart/checkout",
            serde_json::json!({ "customer_name": "Table Three" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let order = body_json(response).await;
    assert_eq!(order["order_type"], "dine-in");
    assert_eq!(order["table_no"], "3");
    assert_eq!(order["status"], "order-received");

    let response = app(&state)
        .oneshot(Request::get("/api/tables/3/cart").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let cart = body_json(response).await;
    assert!(cart["entries"].as_array().unwrap().is_empty());
}
