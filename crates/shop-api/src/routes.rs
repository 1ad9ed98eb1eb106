//! # Routes
//!
//! Axum router configuration for the storefront.
//!
//! Match priority, highest first:
//! 1. `/metrics`
//! 2. explicit routes (`/health`, literal pages, checkout)
//! 3. static files under the configured root (router fallback)
//!
//! Axum always prefers a registered route over the fallback, so nothing under
//! the static root can shadow `/metrics` or a page route.

use crate::handlers;
use crate::metrics;
use crate::state::AppState;
use axum::{
    extract::State,
    handler::HandlerWithoutStateExt,
    middleware,
    routing::{get, post},
    Router,
};
use shop_core::Page;
use tower_http::{services::ServeDir, trace::TraceLayer};

/// Create the main application router
///
/// Routes:
/// - GET  /metrics - Prometheus scrape
/// - GET  /health - Health check
/// - GET  /, /success, /cancel, /workshop1..3 - Literal pages (trailing `/` accepted)
/// - POST /create-checkout-session/{pid} - Create checkout session
/// - GET  /* - Static files, JSON 404 for anything else
pub fn create_router(state: AppState) -> Router {
    // Misses and non-GET methods get the same JSON 404 as a missing page
    let static_files = ServeDir::new(state.static_dir())
        .call_fallback_on_method_not_allowed(true)
        .not_found_service(handlers::not_found.into_service());

    // Literal pages, each also reachable with a trailing slash
    let mut page_routes = Router::new();
    for page in Page::ALL {
        let serve = get(move |state: State<AppState>| handlers::serve_page(state, page));
        page_routes = page_routes.route(page.route(), serve.clone());
        if page != Page::Home {
            page_routes = page_routes.route(&format!("{}/", page.route()), serve);
        }
    }

    Router::new()
        // Metrics first
        .route("/metrics", get(handlers::metrics))
        .route("/health", get(handlers::health))
        .merge(page_routes)
        // Checkout
        .route(
            "/create-checkout-session/{pid}",
            post(handlers::create_checkout_session),
        )
        // Request counters for matched routes only
        .route_layer(middleware::from_fn_with_state(
            state.metrics.clone(),
            metrics::track_requests,
        ))
        // Everything else is a static file lookup
        .fallback_service(static_files)
        .layer(TraceLayer::new_for_http())
        // State
        .with_state(state)
}
