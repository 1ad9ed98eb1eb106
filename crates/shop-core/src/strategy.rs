//! # Payment Strategy Trait
//!
//! Strategy trait for payment providers. The HTTP layer only sees this
//! trait, so tests can swap in a stub and the provider can be replaced
//! without touching handlers.
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │       PaymentStrategy (trait)        │
//! │  ├── create_checkout()               │
//! │  └── provider_name()                 │
//! └──────────────────────────────────────┘
//!                    ▲
//!          ┌─────────┴─────────┐
//!  ┌───────┴───────┐   ┌───────┴───────┐
//!  │StripeCheckout │   │  test stubs   │
//!  │   Strategy    │   │               │
//!  └───────────────┘   └───────────────┘
//! ```

use crate::checkout::{CheckoutSession, SessionParams};
use crate::error::ShopResult;
use async_trait::async_trait;
use std::sync::Arc;

/// Core trait for payment provider implementations.
#[async_trait]
pub trait PaymentStrategy: Send + Sync {
    /// Create a hosted checkout session.
    ///
    /// # Arguments
    /// * `params` - Fully substituted session fields
    ///
    /// # Returns
    /// The provider's `CheckoutSession`.
    async fn create_checkout(&self, params: &SessionParams) -> ShopResult<CheckoutSession>;

    /// Get the provider name (for logging and metrics).
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a boxed payment strategy (dynamic dispatch)
pub type BoxedPaymentStrategy = Arc<dyn PaymentStrategy>;
