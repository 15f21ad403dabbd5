//! HTTP route handlers for the admin panel.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health           - Health check
//!
//! # Dashboard
//! GET  /                 - Dashboard overview
//!
//! # Discounts (read/write to Shopify)
//! GET  /discounts        - Discount listing
//! GET  /discounts/new    - Create form
//! POST /discounts        - Create a discount
//! GET  /discounts/{id}   - Detail; id may be a full gid, url-encoded,
//!                          or a bare numeric tail
//!
//! # Reports
//! GET  /reports          - Performance overview
//! ```

use axum::{Router, routing::get};

use crate::state::AppState;

pub mod dashboard;
pub mod discounts;
pub mod reports;

/// Build the application router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::index))
        .route("/discounts", get(discounts::index).post(discounts::create))
        .route("/discounts/new", get(discounts::new_discount))
        .route("/discounts/{id}", get(discounts::show))
        .route("/reports", get(reports::index))
}
