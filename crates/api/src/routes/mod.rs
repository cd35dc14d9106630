//! HTTP route handlers for the API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                  - Liveness check
//! GET    /health/ready            - Readiness check (database)
//!
//! # Per resource: customers, addresses, wish-lists, categories, products
//! POST   /api/{path}              - Create
//! PUT    /api/{path}              - Update
//! GET    /api/{path}              - List by criteria, paged
//! GET    /api/{path}/count        - Count by criteria
//! GET    /api/{path}/{id}         - Get one
//! DELETE /api/{path}/{id}         - Delete
//! ```

pub mod health;
pub mod resource;

use axum::{Router, routing::get};

use crate::middleware::failure_alert_middleware;
use crate::models::{Address, Category, Customer, Product, WishList};
use crate::state::AppState;

/// Create all routes for the API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .merge(resource::routes::<Customer>())
        .merge(resource::routes::<Address>())
        .merge(resource::routes::<WishList>())
        .merge(resource::routes::<Category>())
        .merge(resource::routes::<Product>())
}

/// All routes with failure alerts, bound to `state`.
pub fn app(state: AppState) -> Router {
    routes()
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            failure_alert_middleware,
        ))
        .with_state(state)
}
