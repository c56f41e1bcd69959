//! HTTP surface: storefront pages, the public JSON API and the admin API.

use axum::{
    extract::{DefaultBodyLimit, Path, State},
    routing::{get, post, put},
    Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tower_http::{cors::CorsLayer, services::{ServeDir, ServeFile}, trace::TraceLayer};

use crate::auth::LoginRequest;
use crate::domain::aggregates::{Cart, CartItem, Order, OrderStatus, OrderRequest, Product, ProductInput, CART_COOKIE};
use crate::domain::events::{DomainEvent, ProductEvent, OrderEvent};
use crate::{AppState, EcommerceError, Result};

/// Payment screenshots arrive inline with the order.
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Top-level storefront pages and the file each one serves.
const PAGES: [(&str, &str); 5] = [
    ("/", "index.html"),
    ("/products", "products.html"),
    ("/cart", "cart.html"),
    ("/contact", "contact.html"),
    ("/payment", "payment.html"),
];

pub fn router(state: AppState) -> Router {
    let root = state.static_root.clone();
    let mut app = Router::new()
        .route("/health", get(|| async { Json(json!({"status": "healthy", "service": "shoestore"})) }))
        .route("/api/products", get(list_products))
        .route("/api/products/:id", get(get_product))
        .route("/api/cart", get(get_cart).post(add_to_cart))
        .route("/api/admin/login", post(admin_login))
        .route("/api/admin/products", get(list_products).post(create_product))
        .route("/api/admin/products/:id", put(update_product).delete(delete_product))
        .route("/api/admin/products/:id/toggle_sold", put(toggle_sold))
        .route("/api/place_order", post(place_order))
        .route("/api/orders", get(list_orders))
        .route("/api/orders/:id", get(get_order).put(update_order_status))
        .route("/api/settings", get(get_settings).post(update_settings));

    for (path, file) in PAGES {
        app = app.route_service(path, ServeFile::new(root.join(file)));
    }

    // ServeDir refuses `..` segments, so lookups never leave the static root.
    app.fallback_service(ServeDir::new(&root))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// -----------------------------------------------------------------------------
// Catalog
// -----------------------------------------------------------------------------

async fn list_products(State(s): State<AppState>) -> Json<Vec<Product>> { Json(s.catalog.list().await) }

async fn get_product(State(s): State<AppState>, Path(id): Path<i64>) -> Result<Json<Product>> {
    s.catalog.get(id).await.map(Json)
}

// -----------------------------------------------------------------------------
// Cart
// -----------------------------------------------------------------------------

fn cart_from(jar: &CookieJar) -> Result<Cart> { Cart::from_cookie(jar.get(CART_COOKIE).map(|c| c.value())) }

async fn get_cart(jar: CookieJar) -> Result<Json<Cart>> { cart_from(&jar).map(Json) }

async fn add_to_cart(jar: CookieJar, Json(item): Json<CartItem>) -> Result<(CookieJar, Json<Value>)> {
    let mut cart = cart_from(&jar)?;
    tracing::debug!(product_id = item.id, quantity = item.quantity.value(), "adding to cart");
    cart.add_item(item);
    tracing::debug!(lines = cart.item_count(), "cart updated");
    let cookie = Cookie::build((CART_COOKIE, cart.to_cookie_value()?)).path("/");
    Ok((jar.add(cookie), Json(json!({"success": true}))))
}

// -----------------------------------------------------------------------------
// Admin
// -----------------------------------------------------------------------------

async fn admin_login(State(s): State<AppState>, Json(r): Json<LoginRequest>) -> Result<Json<Value>> {
    let username = r.username.unwrap_or_default();
    match s.auth.verify(&username, r.password.as_deref().unwrap_or_default()) {
        Some(token) => {
            tracing::info!(%username, "admin login");
            Ok(Json(json!({"success": true, "token": token})))
        }
        None => {
            tracing::warn!(%username, "admin login rejected");
            Err(EcommerceError::InvalidCredentials)
        }
    }
}

async fn create_product(State(s): State<AppState>, Json(r): Json<ProductInput>) -> Result<Json<Value>> {
    let p = s.catalog.create(r).await?;
    s.events.publish(DomainEvent::Product(ProductEvent::Created { product_id: p.id, name: p.name })).await;
    Ok(Json(json!({"success": true, "id": p.id})))
}

async fn update_product(State(s): State<AppState>, Path(id): Path<i64>, Json(r): Json<ProductInput>) -> Result<Json<Value>> {
    s.catalog.update(id, r).await?;
    s.events.publish(DomainEvent::Product(ProductEvent::Updated { product_id: id })).await;
    Ok(Json(json!({"success": true})))
}

async fn delete_product(State(s): State<AppState>, Path(id): Path<i64>) -> Json<Value> {
    if s.catalog.delete(id).await > 0 {
        s.events.publish(DomainEvent::Product(ProductEvent::Deleted { product_id: id })).await;
    }
    Json(json!({"success": true}))
}

async fn toggle_sold(State(s): State<AppState>, Path(id): Path<i64>) -> Result<Json<Value>> {
    let sold = s.catalog.toggle_sold(id).await?;
    s.events.publish(DomainEvent::Product(ProductEvent::SoldToggled { product_id: id, sold })).await;
    Ok(Json(json!({"success": true, "sold": sold})))
}

// -----------------------------------------------------------------------------
// Orders
// -----------------------------------------------------------------------------

async fn place_order(State(s): State<AppState>, Json(r): Json<OrderRequest>) -> Json<Value> {
    let order = s.orders.place(r).await;
    s.events.publish(DomainEvent::Order(OrderEvent::Placed { order_id: order.id })).await;
    Json(json!({"success": true, "order_id": order.id}))
}

async fn list_orders(State(s): State<AppState>) -> Json<Vec<Order>> { Json(s.orders.list().await) }

async fn get_order(State(s): State<AppState>, Path(id): Path<u64>) -> Result<Json<Order>> {
    s.orders.get(id).await.map(Json)
}

#[derive(Debug, Deserialize)]
struct StatusUpdate { status: String }

async fn update_order_status(State(s): State<AppState>, Path(id): Path<u64>, Json(r): Json<StatusUpdate>) -> Result<Json<Value>> {
    let events = s.orders.update_status(id, OrderStatus::from(r.status)).await?;
    for event in events { s.events.publish(event).await; }
    Ok(Json(json!({"success": true})))
}

// -----------------------------------------------------------------------------
// Settings
// -----------------------------------------------------------------------------

async fn get_settings(State(s): State<AppState>) -> Json<Map<String, Value>> { Json(s.settings.get().await) }

async fn update_settings(State(s): State<AppState>, Json(patch): Json<Value>) -> Result<Json<Value>> {
    s.settings.merge(patch).await?;
    Ok(Json(json!({"success": true})))
}
