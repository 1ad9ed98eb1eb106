//! # Checkout Types
//!
//! Declarative checkout settings and the session types exchanged with
//! payment providers.

use crate::error::{ShopError, ShopResult};
use crate::price::PriceId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Placeholder the provider replaces with the real session id on redirect
pub const CHECKOUT_SESSION_PLACEHOLDER: &str = "{CHECKOUT_SESSION_ID}";

/// Checkout mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutMode {
    /// One-time payment
    #[default]
    Payment,
    /// Subscription
    Subscription,
    /// Setup (save card for later)
    Setup,
}

impl CheckoutMode {
    pub fn as_str(self) -> &'static str {
        match self {
            CheckoutMode::Payment => "payment",
            CheckoutMode::Subscription => "subscription",
            CheckoutMode::Setup => "setup",
        }
    }
}

/// Fixed fields applied to every checkout session.
///
/// Paths are joined onto the configured public domain when a session
/// is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckoutSettings {
    /// Checkout mode
    pub mode: CheckoutMode,

    /// Path of the page shown after a successful payment
    pub success_path: String,

    /// Query parameter carrying the session id on the success redirect
    pub session_id_param: String,

    /// Path of the page shown when the customer cancels
    pub cancel_path: String,

    /// Accepted payment method types
    pub payment_method_types: Vec<String>,

    /// Quantity of the single line item
    pub quantity: u32,

    /// Whether customers may enter promotion codes
    pub allow_promotion_codes: bool,
}

impl Default for CheckoutSettings {
    fn default() -> Self {
        Self {
            mode: CheckoutMode::Payment,
            success_path: "/success".to_string(),
            session_id_param: "id".to_string(),
            cancel_path: "/cancel".to_string(),
            payment_method_types: vec!["card".to_string()],
            quantity: 1,
            allow_promotion_codes: true,
        }
    }
}

impl CheckoutSettings {
    /// Parse settings from TOML. Missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> ShopResult<Self> {
        let settings: Self = toml::from_str(content)
            .map_err(|e| ShopError::Configuration(format!("Invalid checkout settings: {}", e)))?;

        if settings.quantity == 0 {
            return Err(ShopError::Configuration(
                "Checkout quantity must be at least 1".to_string(),
            ));
        }

        if settings.payment_method_types.is_empty() {
            return Err(ShopError::Configuration(
                "At least one payment method type is required".to_string(),
            ));
        }

        Ok(settings)
    }

    /// Success URL with the provider's session id placeholder
    pub fn success_url(&self, domain: &str) -> String {
        let base = join_url(domain, &self.success_path);
        let separator = if base.contains('?') { '&' } else { '?' };
        format!(
            "{}{}{}={}",
            base, separator, self.session_id_param, CHECKOUT_SESSION_PLACEHOLDER
        )
    }

    /// Cancel URL
    pub fn cancel_url(&self, domain: &str) -> String {
        join_url(domain, &self.cancel_path)
    }

    /// Substitute the settings into a session-creation request for one price
    pub fn session_params(&self, domain: &str, price: &PriceId) -> SessionParams {
        SessionParams {
            mode: self.mode,
            success_url: self.success_url(domain),
            cancel_url: self.cancel_url(domain),
            payment_method_types: self.payment_method_types.clone(),
            line_items: vec![SessionLineItem {
                price: price.clone(),
                quantity: self.quantity,
            }],
            allow_promotion_codes: self.allow_promotion_codes,
        }
    }
}

fn join_url(domain: &str, path: &str) -> String {
    format!(
        "{}/{}",
        domain.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// A line item referencing a provider-side price
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionLineItem {
    pub price: PriceId,
    pub quantity: u32,
}

/// Fully substituted session-creation request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionParams {
    pub mode: CheckoutMode,
    pub success_url: String,
    pub cancel_url: String,
    pub payment_method_types: Vec<String>,
    pub line_items: Vec<SessionLineItem>,
    pub allow_promotion_codes: bool,
}

/// A checkout session created by a provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Provider's session ID
    pub session_id: String,

    /// Payment provider name
    pub provider: String,

    /// Hosted checkout URL, when the provider returns one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkout_url: Option<String>,

    /// Session expiration time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,

    /// When we created the session
    pub created_at: DateTime<Utc>,
}

/// Session reference returned to the browser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionReference {
    pub id: String,
}

impl From<CheckoutSession> for SessionReference {
    fn from(session: CheckoutSession) -> Self {
        Self {
            id: session.session_id,
        }
    }
}
