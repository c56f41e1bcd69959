//! In-process tests for the HTTP surface.
//!
//! Each test builds a fresh router over fresh stores and drives it with
//! `tower::ServiceExt::oneshot`, so no port is bound.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, HeaderMap, Request, StatusCode},
    Router,
};
use axum_extra::extract::cookie::Cookie;
use serde_json::{json, Value};
use shoestore::auth::{CredentialVerifier, SessionToken};
use shoestore::{routes, AppState, Config};
use tower::ServiceExt;

// =============================================================================
// Helpers
// =============================================================================

fn app() -> Router {
    let config = Config { static_root: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/public")), ..Config::default() };
    routes::router(AppState::new(&config, None))
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder().method(method).uri(uri).header(header::CONTENT_TYPE, "application/json").body(Body::from(body.to_string())).unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder().method(method).uri(uri).body(Body::empty()).unwrap()
}

async fn raw(app: &Router, req: Request<Body>) -> (StatusCode, HeaderMap, Vec<u8>) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, headers, body.to_vec())
}

async fn call(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let (status, _, body) = raw(app, req).await;
    let json = if body.is_empty() { Value::Null } else { serde_json::from_slice(&body).unwrap() };
    (status, json)
}

/// `name=value` pair of the cart cookie set by a response.
fn cart_cookie(headers: &HeaderMap) -> String {
    let set_cookie = headers.get(header::SET_COOKIE).expect("cart cookie set").to_str().unwrap();
    set_cookie.split(';').next().unwrap().to_string()
}

async fn add_to_cart(app: &Router, cookie: Option<&str>, item: Value) -> String {
    let mut req = json_request("POST", "/api/cart", item);
    if let Some(c) = cookie { req.headers_mut().insert(header::COOKIE, c.parse().unwrap()); }
    let (status, headers, body) = raw(app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_slice::<Value>(&body).unwrap(), json!({"success": true}));
    cart_cookie(&headers)
}

async fn read_cart(app: &Router, cookie: &str) -> Value {
    let mut req = empty_request("GET", "/api/cart");
    req.headers_mut().insert(header::COOKIE, cookie.parse().unwrap());
    let (status, body) = call(app, req).await;
    assert_eq!(status, StatusCode::OK);
    body
}

fn order_body(email: Option<&str>) -> Value {
    let mut customer = json!({"name": "Sara", "phone": "0300-0000000"});
    if let Some(e) = email { customer["email"] = json!(e); }
    json!({
        "items": [{"id": 1, "quantity": 2}],
        "total": 179.98,
        "customer_info": customer,
        "payment_method": "bank_transfer",
        "verification": {"transaction_id": "TX-991", "screenshot": "data:image/png;base64,AAAA"}
    })
}

// =============================================================================
// Catalog
// =============================================================================

#[tokio::test]
async fn fresh_catalog_has_two_seeded_products() {
    let app = app();
    let (status, body) = call(&app, empty_request("GET", "/api/products")).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = body.as_array().unwrap().iter().map(|p| p["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(body[0]["name"], "Running Shoes");
    assert_eq!(body[1]["sold"], false);

    let (_, admin) = call(&app, empty_request("GET", "/api/admin/products")).await;
    assert_eq!(admin, body);
}

#[tokio::test]
async fn single_product_lookup() {
    let app = app();
    let (status, body) = call(&app, empty_request("GET", "/api/products/2")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Casual Sneakers");

    let (status, body) = call(&app, empty_request("GET", "/api/products/999")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Product not found"}));
}

#[tokio::test]
async fn create_product_and_list_it() {
    let app = app();
    let (status, first) = call(&app, json_request("POST", "/api/admin/products", json!({"name": "Trail Boot", "price": "120", "category": "outdoor"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["success"], true);
    let (_, second) = call(&app, json_request("POST", "/api/admin/products", json!({"name": "Slide", "price": 15.5, "category": "casual", "description": "Pool slide"}))).await;
    assert!(second["id"].as_i64().unwrap() >= first["id"].as_i64().unwrap());

    let (_, products) = call(&app, empty_request("GET", "/api/products")).await;
    let products = products.as_array().unwrap();
    assert_eq!(products.len(), 4);
    assert_eq!(products[2]["id"], first["id"]);
    assert_eq!(products[2]["price"], 120.0);
    assert_eq!(products[2]["image"], "https://via.placeholder.com/250x250?text=Trail+Boot");
    assert_eq!(products[3]["description"], "Pool slide");
}

#[tokio::test]
async fn create_product_requires_name_price_category() {
    let app = app();
    for body in [
        json!({"price": 10, "category": "c"}),
        json!({"name": "A", "category": "c"}),
        json!({"name": "A", "price": 10}),
        json!({"name": "", "price": 10, "category": "c"}),
    ] {
        let (status, resp) = call(&app, json_request("POST", "/api/admin/products", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(resp, json!({"error": "Missing required fields"}));
    }
    let (_, products) = call(&app, empty_request("GET", "/api/products")).await;
    assert_eq!(products.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn update_product_replaces_fields_and_keeps_image() {
    let app = app();
    let (status, body) = call(&app, json_request("PUT", "/api/admin/products/77", json!({"name": "A", "price": 1, "category": "c"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Product not found"}));

    let (status, _) = call(&app, json_request("PUT", "/api/admin/products/1", json!({"name": "A"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = call(&app, json_request("PUT", "/api/admin/products/1", json!({"name": "Road Racer", "price": 95, "category": "running", "description": "Updated", "sold": true}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true}));

    let (_, p) = call(&app, empty_request("GET", "/api/products/1")).await;
    assert_eq!(p, json!({
        "id": 1, "name": "Road Racer", "price": 95.0, "category": "running",
        "image": "https://via.placeholder.com/250x250?text=Running+Shoes",
        "description": "Updated", "sold": true
    }));
}

#[tokio::test]
async fn delete_is_idempotent() {
    let app = app();
    let (status, body) = call(&app, empty_request("DELETE", "/api/admin/products/12345")).await;
    assert_eq!((status, body), (StatusCode::OK, json!({"success": true})));

    let (_, body) = call(&app, empty_request("DELETE", "/api/admin/products/2")).await;
    assert_eq!(body, json!({"success": true}));
    let (_, products) = call(&app, empty_request("GET", "/api/products")).await;
    assert_eq!(products.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn toggle_sold_twice_restores_value() {
    let app = app();
    let (status, body) = call(&app, empty_request("PUT", "/api/admin/products/1/toggle_sold")).await;
    assert_eq!((status, body), (StatusCode::OK, json!({"success": true, "sold": true})));
    let (_, body) = call(&app, empty_request("PUT", "/api/admin/products/1/toggle_sold")).await;
    assert_eq!(body, json!({"success": true, "sold": false}));

    let (status, body) = call(&app, empty_request("PUT", "/api/admin/products/9/toggle_sold")).await;
    assert_eq!((status, body), (StatusCode::NOT_FOUND, json!({"error": "Product not found"})));
}

// =============================================================================
// Cart
// =============================================================================

#[tokio::test]
async fn cart_without_cookie_is_empty() {
    let (status, body) = call(&app(), empty_request("GET", "/api/cart")).await;
    assert_eq!((status, body), (StatusCode::OK, json!([])));
}

#[tokio::test]
async fn cart_merges_quantities_then_appends() {
    let app = app();
    let cookie = add_to_cart(&app, None, json!({"id": 1, "quantity": 2, "name": "Running Shoes"})).await;
    let cookie = add_to_cart(&app, Some(&cookie), json!({"id": 1, "quantity": 3})).await;
    assert_eq!(read_cart(&app, &cookie).await, json!([{"id": 1, "quantity": 5, "name": "Running Shoes"}]));

    let cookie = add_to_cart(&app, Some(&cookie), json!({"id": 2, "quantity": 1})).await;
    let cart = read_cart(&app, &cookie).await;
    assert_eq!(cart.as_array().unwrap().len(), 2);
    assert_eq!(cart[1], json!({"id": 2, "quantity": 1}));
}

#[tokio::test]
async fn cart_cookie_decodes_to_the_json_array() {
    let app = app();
    let req = json_request("POST", "/api/cart", json!({"id": 1, "quantity": 2}));
    let (_, headers, _) = raw(&app, req).await;
    let set_cookie = headers.get(header::SET_COOKIE).unwrap().to_str().unwrap();
    let cookie = Cookie::parse_encoded(set_cookie.to_string()).unwrap();
    assert_eq!(cookie.name(), "cart");
    assert_eq!(cookie.path(), Some("/"));
    assert_eq!(serde_json::from_str::<Value>(cookie.value()).unwrap(), json!([{"id": 1, "quantity": 2}]));
}

#[tokio::test]
async fn client_encoded_cart_cookie_is_read_once() {
    let app = app();
    let cookie = "cart=%5B%7B%22id%22%3A1%2C%22quantity%22%3A1%2C%22promo%22%3A%2250%2541%22%7D%5D";
    assert_eq!(read_cart(&app, cookie).await, json!([{"id": 1, "quantity": 1, "promo": "50%41"}]));

    let cookie = add_to_cart(&app, Some(cookie), json!({"id": 1, "quantity": 4})).await;
    assert_eq!(read_cart(&app, &cookie).await, json!([{"id": 1, "quantity": 5, "promo": "50%41"}]));
}

#[tokio::test]
async fn malformed_cart_cookie_is_rejected() {
    let mut req = empty_request("GET", "/api/cart");
    req.headers_mut().insert(header::COOKIE, "cart=garbage".parse().unwrap());
    let (status, body) = call(&app(), req).await;
    assert_eq!((status, body), (StatusCode::BAD_REQUEST, json!({"error": "Malformed cart cookie"})));
}

// =============================================================================
// Orders
// =============================================================================

#[tokio::test]
async fn orders_get_sequential_ids_and_pending_status() {
    let app = app();
    let (status, body) = call(&app, json_request("POST", "/api/place_order", order_body(Some("sara@example.com")))).await;
    assert_eq!((status, body), (StatusCode::OK, json!({"success": true, "order_id": 1})));
    let (_, body) = call(&app, json_request("POST", "/api/place_order", json!({}))).await;
    assert_eq!(body["order_id"], 2);

    let (_, orders) = call(&app, empty_request("GET", "/api/orders")).await;
    assert_eq!(orders.as_array().unwrap().len(), 2);
    assert_eq!(orders[0]["status"], "pending_verification");
    assert_eq!(orders[0]["verification"]["transaction_id"], "TX-991");
    assert!(orders[0]["date"].as_str().unwrap().contains('T'));
    assert_eq!(orders[1]["items"], Value::Null);
}

#[tokio::test]
async fn approving_an_order_only_changes_status() {
    let app = app();
    call(&app, json_request("POST", "/api/place_order", order_body(Some("sara@example.com")))).await;
    let (_, before) = call(&app, empty_request("GET", "/api/orders/1")).await;

    let (status, body) = call(&app, json_request("PUT", "/api/orders/1", json!({"status": "approved"}))).await;
    assert_eq!((status, body), (StatusCode::OK, json!({"success": true})));

    let (_, mut after) = call(&app, empty_request("GET", "/api/orders/1")).await;
    assert_eq!(after["status"], "approved");
    after["status"] = before["status"].clone();
    assert_eq!(after, before);
}

#[tokio::test]
async fn order_status_accepts_any_string_and_tolerates_missing_email() {
    let app = app();
    call(&app, json_request("POST", "/api/place_order", order_body(None))).await;
    let (status, _) = call(&app, json_request("PUT", "/api/orders/1", json!({"status": "approved"}))).await;
    assert_eq!(status, StatusCode::OK);
    call(&app, json_request("PUT", "/api/orders/1", json!({"status": "rejected"}))).await;
    let (_, order) = call(&app, empty_request("GET", "/api/orders/1")).await;
    assert_eq!(order["status"], "rejected");
}

#[tokio::test]
async fn unknown_order_is_not_found() {
    let app = app();
    let (status, body) = call(&app, json_request("PUT", "/api/orders/3", json!({"status": "approved"}))).await;
    assert_eq!((status, body), (StatusCode::NOT_FOUND, json!({"error": "Order not found"})));
    let (status, _) = call(&app, empty_request("GET", "/api/orders/3")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Admin login
// =============================================================================

#[tokio::test]
async fn admin_login_with_configured_credentials() {
    let app = app();
    let defaults = Config::default();
    let (status, body) = call(&app, json_request("POST", "/api/admin/login", json!({"username": defaults.admin_username, "password": defaults.admin_password}))).await;
    assert_eq!((status, body), (StatusCode::OK, json!({"success": true, "token": "fake-jwt-token"})));
}

#[tokio::test]
async fn admin_login_rejects_anything_else() {
    let app = app();
    for body in [json!({"username": Config::default().admin_username, "password": "nope"}), json!({}), json!({"username": "root", "password": "root"})] {
        let (status, resp) = call(&app, json_request("POST", "/api/admin/login", body)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(resp, json!({"success": false, "error": "Invalid credentials"}));
    }
}

struct OneTimeCode;

impl CredentialVerifier for OneTimeCode {
    fn verify(&self, username: &str, password: &str) -> Option<SessionToken> {
        (username == "ops" && password == "424242").then(|| SessionToken::new("otp-session"))
    }
}

#[tokio::test]
async fn admin_login_uses_pluggable_verifier() {
    let state = AppState::new(&Config::default(), None).with_verifier(Arc::new(OneTimeCode));
    let app = routes::router(state);
    let (status, body) = call(&app, json_request("POST", "/api/admin/login", json!({"username": "ops", "password": "424242"}))).await;
    assert_eq!((status, body), (StatusCode::OK, json!({"success": true, "token": "otp-session"})));
    let defaults = Config::default();
    let (status, _) = call(&app, json_request("POST", "/api/admin/login", json!({"username": defaults.admin_username, "password": defaults.admin_password}))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Settings, health and static pages
// =============================================================================

#[tokio::test]
async fn settings_merge() {
    let app = app();
    let (_, settings) = call(&app, empty_request("GET", "/api/settings")).await;
    assert_eq!(settings["name"], "ShoeStore");

    let (status, body) = call(&app, json_request("POST", "/api/settings", json!({"contact": "021-111", "whatsapp": "0300"}))).await;
    assert_eq!((status, body), (StatusCode::OK, json!({"success": true})));
    let (_, settings) = call(&app, empty_request("GET", "/api/settings")).await;
    assert_eq!(settings["contact"], "021-111");
    assert_eq!(settings["whatsapp"], "0300");
    assert_eq!(settings["name"], "ShoeStore");

    let (status, _) = call(&app, json_request("POST", "/api/settings", json!("flat"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn health() {
    let (status, body) = call(&app(), empty_request("GET", "/health")).await;
    assert_eq!((status, body), (StatusCode::OK, json!({"status": "healthy", "service": "shoestore"})));
}

#[tokio::test]
async fn storefront_pages_map_to_files() {
    let app = app();
    for (path, title) in [("/", "Home"), ("/products", "Products"), ("/cart", "Cart"), ("/contact", "Contact"), ("/payment", "Payment")] {
        let (status, _, body) = raw(&app, empty_request("GET", path)).await;
        assert_eq!(status, StatusCode::OK, "{path}");
        assert!(String::from_utf8(body).unwrap().contains(&format!("ShoeStore - {title}")));
    }
}

#[tokio::test]
async fn other_paths_are_served_from_static_root_only() {
    let app = app();
    let (status, _, body) = raw(&app, empty_request("GET", "/styles.css")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(String::from_utf8(body).unwrap().contains("font-family"));

    let (status, _, _) = raw(&app, empty_request("GET", "/missing.html")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _, _) = raw(&app, empty_request("GET", "/../Cargo.toml")).await;
    assert_ne!(status, StatusCode::OK);
}
