//! # Stripe Checkout Sessions
//!
//! Implementation of the Stripe Checkout Sessions API.
//! Sessions reference prices that already exist in the Stripe dashboard.

use crate::config::StripeConfig;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use shop_core::{CheckoutSession, PaymentStrategy, SessionParams, ShopError, ShopResult};
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

const PROVIDER: &str = "stripe";

/// Stripe Checkout Session strategy
///
/// Uses Stripe's hosted checkout page, so card data never touches this server.
pub struct StripeCheckoutStrategy {
    config: StripeConfig,
    client: Client,
}

impl StripeCheckoutStrategy {
    /// Create a new Stripe checkout strategy
    pub fn new(config: StripeConfig) -> ShopResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ShopError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn sessions_url(&self) -> String {
        format!("{}/v1/checkout/sessions", self.config.api_base_url)
    }
}

/// Encode session params in Stripe's bracketed form notation
pub fn form_params(params: &SessionParams) -> Vec<(String, String)> {
    let mut form: Vec<(String, String)> = vec![
        ("mode".to_string(), params.mode.as_str().to_string()),
        ("success_url".to_string(), params.success_url.clone()),
        ("cancel_url".to_string(), params.cancel_url.clone()),
    ];

    for (i, method) in params.payment_method_types.iter().enumerate() {
        form.push((format!("payment_method_types[{}]", i), method.clone()));
    }

    for (i, item) in params.line_items.iter().enumerate() {
        form.push((
            format!("line_items[{}][price]", i),
            item.price.as_str().to_string(),
        ));
        form.push((
            format!("line_items[{}][quantity]", i),
            item.quantity.to_string(),
        ));
    }

    form.push((
        "allow_promotion_codes".to_string(),
        params.allow_promotion_codes.to_string(),
    ));

    form
}

/// Translate a non-2xx Stripe response into a `ShopError`
fn classify_error(status: StatusCode, body: &str) -> ShopError {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return ShopError::RateLimited {
            provider: PROVIDER.to_string(),
        };
    }

    match serde_json::from_str::<StripeErrorResponse>(body) {
        Ok(parsed) => {
            let invalid_request = parsed.error.error_type.as_deref() == Some("invalid_request_error")
                && matches!(status, StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND);

            if invalid_request {
                ShopError::InvalidRequest(parsed.error.message)
            } else {
                ShopError::ProviderError {
                    provider: PROVIDER.to_string(),
                    message: parsed.error.message,
                }
            }
        }
        Err(_) => ShopError::ProviderError {
            provider: PROVIDER.to_string(),
            message: format!("HTTP {}: {}", status, body),
        },
    }
}

#[async_trait]
impl PaymentStrategy for StripeCheckoutStrategy {
    #[instrument(skip(self, params), fields(items = params.line_items.len(), mode = params.mode.as_str()))]
    async fn create_checkout(&self, params: &SessionParams) -> ShopResult<CheckoutSession> {
        if params.line_items.is_empty() {
            return Err(ShopError::InvalidRequest(
                "Session has no line items".to_string(),
            ));
        }

        let form = form_params(params);
        let idempotency_key = Uuid::new_v4().to_string();

        debug!(
            "Creating Stripe checkout session: {} form fields, idempotency_key={}",
            form.len(),
            idempotency_key
        );

        let response = self
            .client
            .post(self.sessions_url())
            .header("Authorization", self.config.auth_header())
            .header("Stripe-Version", &self.config.api_version)
            .header("Idempotency-Key", &idempotency_key)
            .form(&form)
            .send()
            .await
            .map_err(|e| ShopError::NetworkError(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ShopError::NetworkError(e.to_string()))?;

        if !status.is_success() {
            error!("Stripe API error: status={}, body={}", status, body);
            return Err(classify_error(status, &body));
        }

        let session_response: StripeCheckoutSessionResponse =
            serde_json::from_str(&body).map_err(|e| {
                ShopError::Serialization(format!("Failed to parse Stripe response: {}", e))
            })?;

        info!("Created Stripe checkout session: id={}", session_response.id);

        Ok(CheckoutSession {
            session_id: session_response.id,
            provider: PROVIDER.to_string(),
            checkout_url: session_response.url,
            expires_at: session_response
                .expires_at
                .and_then(|ts| DateTime::from_timestamp(ts, 0)),
            created_at: Utc::now(),
        })
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}

// =============================================================================
// Stripe API Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct StripeCheckoutSessionResponse {
    id: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    expires_at: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct StripeErrorResponse {
    error: StripeError,
}

#[derive(Debug, Deserialize)]
struct StripeError {
    message: String,
    #[serde(rename = "type", default)]
    error_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use shop_core::{CheckoutSettings, PriceId};
    use wiremock::matchers::{body_string_contains, header, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn params(price: &str) -> SessionParams {
        let price = PriceId::parse(price).unwrap();
        CheckoutSettings::default().session_params("https://shop.example", &price)
    }

    fn strategy_for(server: &MockServer) -> StripeCheckoutStrategy {
        let config = StripeConfig::new("sk_test_abc123").with_api_base_url(server.uri());
        StripeCheckoutStrategy::new(config).unwrap()
    }

    #[test]
    fn test_form_params() {
        let form = form_params(&params("price_123"));
        let get = |key: &str| {
            form.iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
        };

        assert_eq!(get("mode"), Some("payment"));
        assert_eq!(
            get("success_url"),
            Some("https://shop.example/success?id={CHECKOUT_SESSION_ID}")
        );
        assert_eq!(get("cancel_url"), Some("https://shop.example/cancel"));
        assert_eq!(get("payment_method_types[0]"), Some("card"));
        assert_eq!(get("line_items[0][price]"), Some("price_123"));
        assert_eq!(get("line_items[0][quantity]"), Some("1"));
        assert_eq!(get("allow_promotion_codes"), Some("true"));
        assert_eq!(get("line_items[1][price]"), None);
    }

    #[test]
    fn test_classify_invalid_price() {
        let body = r#"{"error":{"message":"No such price: 'price_x'","type":"invalid_request_error"}}"#;
        let err = classify_error(StatusCode::BAD_REQUEST, body);
        assert!(matches!(err, ShopError::InvalidRequest(ref m) if m.contains("No such price")));
    }

    #[test]
    fn test_classify_auth_failure() {
        let body = r#"{"error":{"message":"Invalid API Key provided","type":"invalid_request_error"}}"#;
        let err = classify_error(StatusCode::UNAUTHORIZED, body);
        assert_eq!(err.status_code(), 502);
    }

    #[test]
    fn test_classify_unparseable_body() {
        let err = classify_error(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>");
        match err {
            ShopError::ProviderError { message, .. } => assert!(message.contains("500")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_checkout_success() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/checkout/sessions"))
            .and(header("Authorization", "Bearer sk_test_abc123"))
            .and(header_exists("Idempotency-Key"))
            .and(body_string_contains("line_items%5B0%5D%5Bprice%5D=price_123"))
            .and(body_string_contains("mode=payment"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "cs_test_a1b2c3",
                "object": "checkout.session",
                "url": "https://checkout.stripe.com/c/pay/cs_test_a1b2c3",
                "expires_at": 1_900_000_000
            })))
            .expect(1)
            .mount(&server)
            .await;

        let session = strategy_for(&server)
            .create_checkout(&params("price_123"))
            .await
            .unwrap();

        assert_eq!(session.session_id, "cs_test_a1b2c3");
        assert_eq!(session.provider, "stripe");
        assert_eq!(
            session.checkout_url.as_deref(),
            Some("https://checkout.stripe.com/c/pay/cs_test_a1b2c3")
        );
        assert!(session.expires_at.is_some());
    }

    #[tokio::test]
    async fn test_create_checkout_provider_rejects_price() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/checkout/sessions"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": {
                    "message": "No such price: 'price_missing'",
                    "type": "invalid_request_error",
                    "param": "line_items[0][price]"
                }
            })))
            .mount(&server)
            .await;

        let err = strategy_for(&server)
            .create_checkout(&params("price_missing"))
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn test_create_checkout_malformed_response() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/checkout/sessions"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = strategy_for(&server)
            .create_checkout(&params("price_123"))
            .await
            .unwrap_err();

        assert!(matches!(err, ShopError::Serialization(_)));
    }

    #[tokio::test]
    async fn test_create_checkout_unreachable() {
        // Nothing listens on port 9 locally
        let config = StripeConfig::new("sk_test_abc123").with_api_base_url("http://127.0.0.1:9");
        let strategy = StripeCheckoutStrategy::new(config).unwrap();

        let err = strategy.create_checkout(&params("price_123")).await.unwrap_err();
        assert!(matches!(err, ShopError::NetworkError(_)));
        assert!(err.is_retryable());
    }
}
