//! # shop-stripe
//!
//! Stripe payment strategy for storefront-rs.
//!
//! `StripeCheckoutStrategy` creates hosted Checkout Sessions for prices
//! configured in the Stripe dashboard.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use shop_core::{CheckoutSettings, PaymentStrategy, PriceId};
//! use shop_stripe::{StripeCheckoutStrategy, StripeConfig};
//!
//! // Create strategy from environment
//! let strategy = StripeCheckoutStrategy::new(StripeConfig::from_env()?)?;
//!
//! let price = PriceId::parse("price_1NxyzABC")?;
//! let params = CheckoutSettings::default().session_params("https://shop.example", &price);
//! let session = strategy.create_checkout(&params).await?;
//!
//! // Hand session.session_id to Stripe.js redirectToCheckout
//! ```

pub mod checkout;
pub mod config;

// Re-exports
pub use checkout::{form_params, StripeCheckoutStrategy};
pub use config::StripeConfig;
