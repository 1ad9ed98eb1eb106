//! # shop-core
//!
//! Core types and traits for the storefront checkout backend.
//!
//! This crate provides:
//! - `PaymentStrategy` trait for implementing payment providers
//! - `CheckoutSettings` and `SessionParams` for the checkout flow
//! - `PriceId` for validated price identifiers
//! - `Page` for the fixed page routing table
//! - `ShopError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use shop_core::{CheckoutSettings, PaymentStrategy, PriceId};
//!
//! let price = PriceId::parse("price_1NxyzABC")?;
//! let params = CheckoutSettings::default().session_params("https://shop.example", &price);
//!
//! // Create checkout session using a strategy
//! let session = strategy.create_checkout(&params).await?;
//! ```

pub mod checkout;
pub mod error;
pub mod page;
pub mod price;
pub mod strategy;

// Re-exports for convenience
pub use checkout::{
    CheckoutMode, CheckoutSession, CheckoutSettings, SessionLineItem, SessionParams,
    SessionReference, CHECKOUT_SESSION_PLACEHOLDER,
};
pub use error::{ShopError, ShopResult};
pub use page::Page;
pub use price::PriceId;
pub use strategy::{BoxedPaymentStrategy, PaymentStrategy};
