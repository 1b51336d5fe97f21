//! REST API for the storefront.
//!
//! Provides a stateless HTTP server with JSON endpoints. Handlers share a
//! [`Store`] holding only the data directory; every request reads the JSON
//! files fresh and mutations rewrite them before responding.
//!
//! ## Endpoints
//!
//! - `GET /products` - The whole catalog
//! - `GET /products/{id}?user=<name>` - One product and its recommendations, logs a view for `user`
//! - `GET /recommend/{id}` - Scored recommendations for a product
//! - `POST /login` - Register a username
//! - `GET /home?user=<name>` - Catalog plus recommendations from the user's last view
//!
//! Errors come back as `{"error": "..."}` with 404 for unknown ids, 400 for
//! bad input and 500 for storage failures.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use actix_web::{App, HttpServer, web};
//! use cartiq::Store;
//!
//! #[actix_web::main]
//! async fn main() -> std::io::Result<()> {
//!     let store = web::Data::new(Store::new("data"));
//!     HttpServer::new(move || App::new().app_data(store.clone()).configure(cartiq::server::config))
//!         .bind("0.0.0.0:7878")?
//!         .run()
//!         .await
//! }
//! ```

use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::catalog::Product;
use crate::error::{Error, Result};
use crate::recommender::{RECOMMENDATION_COUNT, rank};
use crate::store::Store;

// --- Request structs ---

#[derive(Deserialize)]
struct UserQuery {
    user: Option<String>,
}

#[derive(Deserialize)]
struct LoginRequest {
    username: String,
}

// --- Response structs ---

#[derive(Serialize)]
struct ProductsResponse {
    products: Vec<Product>,
}

#[derive(Serialize)]
struct RecommendResponse {
    target: u64,
    matches: Vec<MatchResult>,
}

#[derive(Serialize)]
struct MatchResult {
    score: f64,
    product: Product,
}

#[derive(Serialize)]
struct LoginResponse {
    username: String,
    created: bool,
}

#[derive(Serialize)]
struct HomeResponse {
    products: Vec<Product>,
    recommendations: Vec<Product>,
}

/// Blank `?user=` counts as anonymous
fn user_name(query: &UserQuery) -> Option<&str> {
    query.user.as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
}

// --- Handlers ---

async fn products_handler(store: web::Data<Store>) -> Result<HttpResponse> {
    let products = store.catalog()?;
    Ok(HttpResponse::Ok().json(ProductsResponse { products }))
}

async fn product_handler(
    store: web::Data<Store>,
    id: web::Path<u64>,
    query: web::Query<UserQuery>,
) -> Result<HttpResponse> {
    let view = store.view_product(user_name(&query), id.into_inner())?;
    Ok(HttpResponse::Ok().json(view))
}

async fn recommend_handler(store: web::Data<Store>, id: web::Path<u64>) -> Result<HttpResponse> {
    let target = id.into_inner();
    let catalog = store.catalog()?;

    let matches = rank(&catalog, target, RECOMMENDATION_COUNT)?
        .into_iter()
        .map(|(i, score)| MatchResult { score, product: catalog[i].clone() })
        .collect();

    Ok(HttpResponse::Ok().json(RecommendResponse { target, matches }))
}

async fn login_handler(
    store: web::Data<Store>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse> {
    let username = body.username.trim().to_string();
    let created = store.register_user(&username)?;

    info!(%username, created, "login");
    Ok(HttpResponse::Ok().json(LoginResponse { username, created }))
}

async fn home_handler(
    store: web::Data<Store>,
    query: web::Query<UserQuery>,
) -> Result<HttpResponse> {
    let products = store.catalog()?;

    let recommendations = match user_name(&query) {
        Some(user) => store.recommendations_for(user)?,
        None => Vec::new(),
    };

    Ok(HttpResponse::Ok().json(HomeResponse { products, recommendations }))
}

async fn not_found() -> Result<HttpResponse> {
    Err(Error::NotFound("no such endpoint".to_string()))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/products").route(web::get().to(products_handler)))
       .service(web::resource("/products/{id}").route(web::get().to(product_handler)))
       .service(web::resource("/recommend/{id}").route(web::get().to(recommend_handler)))
       .service(web::resource("/login").route(web::post().to(login_handler)))
       .service(web::resource("/home").route(web::get().to(home_handler)))
       .default_service(web::to(not_found));
}
