//! # shop-api
//!
//! HTTP layer for storefront-rs.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - Literal page routes and static file serving
//! - Checkout session proxy to the payment provider
//! - Prometheus scrape endpoint
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/metrics` | Prometheus metrics |
//! | GET | `/health` | Health check |
//! | GET | `/`, `/success`, `/cancel` | Pages |
//! | GET | `/workshop1`, `/workshop2`, `/workshop3` | Workshop pages |
//! | POST | `/create-checkout-session/{pid}` | Create checkout session |
//! | GET | `/*` | Static files |

pub mod handlers;
pub mod metrics;
pub mod routes;
pub mod state;

pub use metrics::Metrics;
pub use routes::create_router;
pub use state::{AppConfig, AppState};
