//! # Application State
//!
//! Shared state for the Axum application.
//! Contains configuration, checkout settings, the payment strategy and the
//! metrics registry. Everything is built once at startup and injected into
//! handlers through `State`.

use crate::metrics::Metrics;
use shop_core::{BoxedPaymentStrategy, CheckoutSettings, ShopError, ShopResult};
use shop_stripe::{StripeCheckoutStrategy, StripeConfig};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Directory static files and pages are served from
    pub static_dir: PathBuf,
    /// Public URL of the site, used to build checkout redirect URLs
    pub domain: String,
    /// Environment (development, staging, production)
    pub environment: String,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> ShopResult<Self> {
        dotenvy::dotenv().ok();

        let port = match std::env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| ShopError::Configuration(format!("PORT is not a valid port: {}", raw)))?,
            Err(_) => 3000,
        };

        Ok(Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port,
            static_dir: PathBuf::from(required_var("STATIC_DIR")?),
            domain: required_var("DOMAIN")?.trim_end_matches('/').to_string(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        })
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> ShopResult<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ShopError::Configuration(format!("Invalid socket address: {}", e)))
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

fn required_var(name: &str) -> ShopResult<String> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ShopError::Configuration(format!("{} not set", name)))
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Application config
    pub config: Arc<AppConfig>,
    /// Fixed checkout session fields
    pub checkout: Arc<CheckoutSettings>,
    /// Payment provider
    pub payments: BoxedPaymentStrategy,
    /// Metrics registry
    pub metrics: Metrics,
}

impl AppState {
    /// Create a new AppState with the Stripe strategy, all from the environment
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env()?;
        let checkout = load_checkout_settings()?;

        let stripe_config = StripeConfig::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize Stripe: {}", e))?;
        if let Some(warning) = stripe_key_warning(&stripe_config, &config) {
            tracing::warn!("{}", warning);
        }
        let stripe = StripeCheckoutStrategy::new(stripe_config)
            .map_err(|e| anyhow::anyhow!("Failed to initialize Stripe: {}", e))?;

        if !config.static_dir.is_dir() {
            tracing::warn!(
                "STATIC_DIR {} is not a directory; every page will 404",
                config.static_dir.display()
            );
        }

        Ok(Self::from_parts(
            config,
            checkout,
            Arc::new(stripe),
            Metrics::new()?,
        ))
    }

    /// Assemble state from already-built parts
    pub fn from_parts(
        config: AppConfig,
        checkout: CheckoutSettings,
        payments: BoxedPaymentStrategy,
        metrics: Metrics,
    ) -> Self {
        Self {
            config: Arc::new(config),
            checkout: Arc::new(checkout),
            payments,
            metrics,
        }
    }

    /// Static root
    pub fn static_dir(&self) -> &Path {
        &self.config.static_dir
    }
}

/// Flag a Stripe key whose mode does not match the environment
fn stripe_key_warning(stripe: &StripeConfig, config: &AppConfig) -> Option<&'static str> {
    if stripe.is_live_mode() && !config.is_production() {
        Some("Live Stripe key outside production: checkouts will create real charges")
    } else if stripe.is_test_mode() && config.is_production() {
        Some("Test Stripe key in production: no real payments will be taken")
    } else {
        None
    }
}

/// Load checkout settings from `CHECKOUT_CONFIG` or `config/checkout.toml`
fn load_checkout_settings() -> ShopResult<CheckoutSettings> {
    if let Ok(path) = std::env::var("CHECKOUT_CONFIG") {
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ShopError::Configuration(format!("Failed to read {}: {}", path, e)))?;
        let settings = CheckoutSettings::from_toml_str(&content)?;
        tracing::info!("Loaded checkout settings from {}", path);
        return Ok(settings);
    }

    let config_paths = ["config/checkout.toml", "../config/checkout.toml"];

    for path in config_paths {
        if let Ok(content) = std::fs::read_to_string(path) {
            let settings = CheckoutSettings::from_toml_str(&content)?;
            tracing::info!("Loaded checkout settings from {}", path);
            return Ok(settings);
        }
    }

    tracing::debug!("No checkout settings file found, using defaults");
    Ok(CheckoutSettings::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AppConfig {
        AppConfig {
            host: "0.0.0.0".to_string(),
            port: 3000,
            static_dir: PathBuf::from("public"),
            domain: "http://localhost:3000".to_string(),
            environment: "test".to_string(),
        }
    }

    #[test]
    fn test_socket_addr() {
        let addr = config().socket_addr().unwrap();
        assert_eq!(addr.to_string(), "0.0.0.0:3000");
    }

    #[test]
    fn test_socket_addr_invalid_host() {
        let config = AppConfig {
            host: "not a host".to_string(),
            ..config()
        };
        assert!(matches!(
            config.socket_addr(),
            Err(ShopError::Configuration(_))
        ));
    }

    #[test]
    fn test_stripe_key_warning() {
        let production = AppConfig {
            environment: "production".to_string(),
            ..config()
        };

        assert!(stripe_key_warning(&StripeConfig::new("sk_live_abc"), &config()).is_some());
        assert!(stripe_key_warning(&StripeConfig::new("sk_test_abc"), &production).is_some());
        assert!(stripe_key_warning(&StripeConfig::new("sk_live_abc"), &production).is_none());
        assert!(stripe_key_warning(&StripeConfig::new("sk_test_abc"), &config()).is_none());
    }

    #[test]
    fn test_is_production() {
        assert!(!config().is_production());

        let config = AppConfig {
            environment: "production".to_string(),
            ..config()
        };
        assert!(config.is_production());
    }
}
