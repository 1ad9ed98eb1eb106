//! # Request Handlers
//!
//! Axum request handlers for the storefront: literal pages, the checkout
//! session proxy, metrics scrape and health check.

use crate::metrics::CheckoutOutcome;
use crate::state::AppState;
use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::{header, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shop_core::{Page, PriceId, SessionReference, ShopError};
use tracing::{debug, error, info, instrument, warn};

// =============================================================================
// Response Types
// =============================================================================

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: u16) -> Self {
        Self {
            error: error.into(),
            code,
        }
    }
}

/// Error half of every fallible handler
pub type ApiError = (StatusCode, Json<ErrorResponse>);

fn shop_error_to_response(err: ShopError) -> ApiError {
    let code = err.status_code();
    let response = ErrorResponse::new(err.to_string(), code);
    (
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(response),
    )
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "storefront",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Prometheus scrape endpoint.
///
/// Encoding failures are reported as plain text 500s.
pub async fn metrics(State(state): State<AppState>) -> Response {
    match state.metrics.encode() {
        Ok((content_type, body)) => {
            ([(header::CONTENT_TYPE, content_type)], body).into_response()
        }
        Err(e) => {
            error!("Failed to encode metrics: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

/// Fallback for paths with no route and no file under the static root
pub async fn not_found(uri: Uri) -> ApiError {
    debug!("No route or file for {}", uri.path());
    shop_error_to_response(ShopError::PageNotFound {
        path: uri.path().to_string(),
    })
}

/// Serve one of the literal pages from the static root
#[instrument(skip(state), fields(file = page.file()))]
pub async fn serve_page(
    State(state): State<AppState>,
    page: Page,
) -> Result<Html<Vec<u8>>, ApiError> {
    let path = page.resolve(state.static_dir());

    match tokio::fs::read(&path).await {
        Ok(contents) => {
            debug!("Serving {} ({} bytes)", path.display(), contents.len());
            Ok(Html(contents))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!("Page file missing: {}", path.display());
            Err(shop_error_to_response(ShopError::PageNotFound {
                path: page.file().to_string(),
            }))
        }
        Err(e) => {
            error!("Failed to read {}: {}", path.display(), e);
            Err(shop_error_to_response(ShopError::Io(format!(
                "failed to read {}",
                page.file()
            ))))
        }
    }
}

/// Create a checkout session for a single price and return its id
#[instrument(skip(state, pid), fields(provider = state.payments.provider_name()))]
pub async fn create_checkout_session(
    State(state): State<AppState>,
    pid: Result<Path<String>, PathRejection>,
) -> Result<Json<SessionReference>, ApiError> {
    let price = pid
        .map_err(|rejection| ShopError::InvalidPriceId {
            price_id: String::new(),
            reason: rejection.body_text(),
        })
        .and_then(|Path(pid)| PriceId::parse(&pid))
        .map_err(|e| {
            warn!("Rejected checkout request: {}", e);
            state.metrics.record_checkout(CheckoutOutcome::Rejected);
            shop_error_to_response(e)
        })?;

    let params = state.checkout.session_params(&state.config.domain, &price);

    info!(
        "Creating checkout: price={}, success_url={}",
        price, params.success_url
    );

    let session = state
        .payments
        .create_checkout(&params)
        .await
        .map_err(|e| {
            error!(retryable = e.is_retryable(), "Failed to create checkout: {}", e);
            let outcome = match e {
                ShopError::InvalidRequest(_) => CheckoutOutcome::Rejected,
                _ => CheckoutOutcome::Failed,
            };
            state.metrics.record_checkout(outcome);
            shop_error_to_response(e)
        })?;

    state.metrics.record_checkout(CheckoutOutcome::Created);
    info!("Created checkout session: {}", session.session_id);

    Ok(Json(SessionReference::from(session)))
}
