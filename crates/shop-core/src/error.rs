//! # Storefront Error Types
//!
//! Typed error handling for the storefront backend.
//! All fallible operations return `Result<T, ShopError>`.

use thiserror::Error;

/// Core error type for all storefront operations
#[derive(Debug, Error)]
pub enum ShopError {
    /// Configuration errors (missing env vars, unreadable settings)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Price identifier rejected before reaching the provider
    #[error("Invalid price id '{price_id}': {reason}")]
    InvalidPriceId { price_id: String, reason: String },

    /// Request rejected by the provider as invalid (unknown price, bad params)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Payment provider API error
    #[error("Provider error [{provider}]: {message}")]
    ProviderError { provider: String, message: String },

    /// Network/HTTP error communicating with provider
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Rate limited by provider
    #[error("Rate limited by {provider}")]
    RateLimited { provider: String },

    /// Page file missing under the static root
    #[error("Page not found: {path}")]
    PageNotFound { path: String },

    /// Filesystem error other than a missing file
    #[error("I/O error: {0}")]
    Io(String),

    /// Metrics registration or encoding failure
    #[error("Metrics error: {0}")]
    Metrics(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ShopError {
    /// Returns true if this error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ShopError::NetworkError(_) | ShopError::RateLimited { .. }
        )
    }

    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            ShopError::Configuration(_) => 500,
            ShopError::InvalidPriceId { .. } => 400,
            ShopError::InvalidRequest(_) => 400,
            ShopError::ProviderError { .. } => 502,
            ShopError::NetworkError(_) => 503,
            ShopError::RateLimited { .. } => 429,
            ShopError::PageNotFound { .. } => 404,
            ShopError::Io(_) => 500,
            ShopError::Metrics(_) => 500,
            ShopError::Serialization(_) => 500,
        }
    }
}

/// Result type alias for storefront operations
pub type ShopResult<T> = Result<T, ShopError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(ShopError::NetworkError("timeout".into()).is_retryable());
        assert!(ShopError::RateLimited {
            provider: "stripe".into()
        }
        .is_retryable());
        assert!(!ShopError::InvalidRequest("No such price".into()).is_retryable());
        assert!(!ShopError::ProviderError {
            provider: "stripe".into(),
            message: "Invalid API Key".into()
        }
        .is_retryable());
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ShopError::InvalidPriceId {
                price_id: "".into(),
                reason: "empty".into()
            }
            .status_code(),
            400
        );
        assert_eq!(
            ShopError::PageNotFound {
                path: "index.html".into()
            }
            .status_code(),
            404
        );
        assert_eq!(
            ShopError::ProviderError {
                provider: "stripe".into(),
                message: "boom".into()
            }
            .status_code(),
            502
        );
        assert_eq!(ShopError::NetworkError("reset".into()).status_code(), 503);
    }

    #[test]
    fn test_display() {
        let err = ShopError::ProviderError {
            provider: "stripe".into(),
            message: "Invalid API Key provided".into(),
        };
        assert_eq!(
            err.to_string(),
            "Provider error [stripe]: Invalid API Key provided"
        );
    }
}
