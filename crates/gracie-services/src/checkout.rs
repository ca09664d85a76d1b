//! Subscription catalogue and checkout-session client
//!
//! Checkout is a thin redirect: the client posts the chosen price to the
//! configured checkout endpoint and hands back the session URL. Payment
//! itself never passes through this crate.

use gracie_core::{GracieError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::config::GracieConfig;

const REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CHECKOUT_ERROR: &str = "Failed to create checkout session";
const FALLBACK_NOTICE: &str = "Failed to start checkout process. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutMode {
    Subscription,
    Payment,
}

impl CheckoutMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutMode::Subscription => "subscription",
            CheckoutMode::Payment => "payment",
        }
    }
}

/// A purchasable plan
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Product {
    pub price_id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub price: f32,
    pub mode: CheckoutMode,
    pub features: &'static [&'static str],
}

pub const PRODUCTS: [Product; 2] = [
    Product {
        price_id: "price_monthly_plus",
        name: "Monthly Plus",
        description: "Advanced text and audio analysis with enhanced features",
        price: 9.99,
        mode: CheckoutMode::Subscription,
        features: &[
            "Advanced text and audio analysis",
            "30 day history retention",
            "Up to 1,000 tokens per month",
            "Detailed analysis reports",
            "Export functionality (coming soon)",
            "Priority support",
        ],
    },
    Product {
        price_id: "price_monthly_pro",
        name: "Monthly Pro",
        description: "Premium analysis with unlimited features and API access",
        price: 24.99,
        mode: CheckoutMode::Subscription,
        features: &[
            "Premium text and audio analysis",
            "Unlimited history retention",
            "Up to 3,000 tokens per month",
            "Advanced analytics",
            "Export functionality (coming soon)",
            "API access (coming soon)",
            "Custom analysis rules (coming soon)",
            "Priority support",
        ],
    },
];

pub fn product_by_price_id(price_id: &str) -> Option<&'static Product> {
    PRODUCTS.iter().find(|p| p.price_id == price_id)
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let period = match self.mode {
            CheckoutMode::Subscription => "/month",
            CheckoutMode::Payment => "",
        };
        writeln!(f, "{} (${:.2}{})  [{}]", self.name, self.price, period, self.price_id)?;
        write!(f, "  {}", self.description)?;
        for feature in self.features {
            write!(f, "\n  * {}", feature)?;
        }
        Ok(())
    }
}

/// Source of the signed-in user's session token
pub trait CredentialStore {
    fn session_token(&self) -> Option<String>;
}

/// Fixed token, e.g. from config or a CLI flag
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials(pub Option<String>);

impl CredentialStore for StaticCredentials {
    fn session_token(&self) -> Option<String> {
        self.0.clone().filter(|t| !t.trim().is_empty())
    }
}

impl CredentialStore for GracieConfig {
    fn session_token(&self) -> Option<String> {
        self.auth_token().map(str::to_string)
    }
}

/// Request body sent to the checkout endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub price_id: String,
    pub mode: CheckoutMode,
}

/// Transport seam: posts a checkout request, returns raw status and body
pub trait CheckoutGateway {
    fn post(&self, request: &CheckoutRequest, token: &str) -> Result<(u16, String)>;
}

/// HTTP gateway to the hosted checkout function
pub struct HttpCheckoutGateway {
    url: String,
}

impl HttpCheckoutGateway {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn from_config(config: &GracieConfig) -> Result<Self> {
        let url = config.checkout_url().ok_or_else(|| {
            GracieError::ConfigError(format!(
                "Checkout URL not configured. Set {} or add [checkout] url to .gracie/config.toml",
                crate::config::ENV_CHECKOUT_URL
            ))
        })?;
        Ok(Self::new(url))
    }
}

impl CheckoutGateway for HttpCheckoutGateway {
    fn post(&self, request: &CheckoutRequest, token: &str) -> Result<(u16, String)> {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(REQUEST_TIMEOUT_SECS)))
            .http_status_as_error(false)
            .build();
        let agent: ureq::Agent = config.into();

        let mut response = agent
            .post(&self.url)
            .header("Content-Type", "application/json")
            .header("Authorization", &format!("Bearer {}", token))
            .send_json(request)
            .map_err(|e| GracieError::CheckoutFailed(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| GracieError::CheckoutFailed(e.to_string()))?;
        Ok((status, body))
    }
}

/// Decode the checkout endpoint's reply into a redirect URL
pub fn parse_checkout_response(status: u16, body: &str) -> Result<String> {
    let data: serde_json::Value = serde_json::from_str(body).unwrap_or(serde_json::Value::Null);

    if !(200..300).contains(&status) {
        let message = data
            .get("error")
            .and_then(|e| e.as_str())
            .filter(|e| !e.is_empty())
            .unwrap_or(DEFAULT_CHECKOUT_ERROR);
        return Err(GracieError::CheckoutFailed(message.to_string()));
    }

    data.get("url")
        .and_then(|u| u.as_str())
        .filter(|u| !u.is_empty())
        .map(str::to_string)
        .ok_or_else(|| GracieError::CheckoutFailed(DEFAULT_CHECKOUT_ERROR.to_string()))
}

pub struct CheckoutClient<G: CheckoutGateway> {
    gateway: G,
}

impl<G: CheckoutGateway> CheckoutClient<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    /// Create a checkout session and return the URL to redirect to
    pub fn start(&self, product: &Product, credentials: &dyn CredentialStore) -> Result<String> {
        let token = credentials
            .session_token()
            .ok_or(GracieError::Unauthenticated)?;

        let request = CheckoutRequest {
            price_id: product.price_id.to_string(),
            mode: product.mode,
        };
        tracing::info!(
            price_id = product.price_id,
            mode = product.mode.as_str(),
            "starting checkout"
        );

        let (status, body) = self.gateway.post(&request, &token)?;
        parse_checkout_response(status, &body).inspect_err(|e| {
            tracing::warn!(status, error = %e, "checkout failed");
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeVariant {
    Default,
    Destructive,
}

/// Transient notification raised by a failed checkout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub variant: NoticeVariant,
}

impl Notice {
    pub fn from_error(err: &GracieError) -> Self {
        let title = match err {
            GracieError::Unauthenticated => "Authentication Required",
            _ => "Checkout Error",
        };
        let description = err.to_string();
        Self {
            title: title.to_string(),
            description: if description.trim().is_empty() {
                FALLBACK_NOTICE.to_string()
            } else {
                description
            },
            variant: NoticeVariant::Destructive,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.description)
    }
}

/// Per-plan loading state around a checkout attempt
#[derive(Debug, Default)]
pub struct CheckoutFlow {
    loading_price_id: Option<String>,
    notices: Vec<Notice>,
}

impl CheckoutFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn loading_price_id(&self) -> Option<&str> {
        self.loading_price_id.as_deref()
    }

    /// Notices raised since the last call; they are shown once and dropped
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Run one checkout; failures become notices. The loading marker is
    /// cleared whatever the outcome.
    pub fn purchase<G: CheckoutGateway>(
        &mut self,
        client: &CheckoutClient<G>,
        product: &Product,
        credentials: &dyn CredentialStore,
    ) -> Option<String> {
        self.loading_price_id = Some(product.price_id.to_string());
        let outcome = client.start(product, credentials);
        self.loading_price_id = None;

        match outcome {
            Ok(url) => Some(url),
            Err(err) => {
                self.notices.push(Notice::from_error(&err));
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct ScriptedGateway {
        reply: (u16, String),
        seen: RefCell<Vec<(CheckoutRequest, String)>>,
    }

    impl ScriptedGateway {
        fn new(status: u16, body: &str) -> Self {
            Self {
                reply: (status, body.to_string()),
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl CheckoutGateway for ScriptedGateway {
        fn post(&self, request: &CheckoutRequest, token: &str) -> Result<(u16, String)> {
            self.seen
                .borrow_mut()
                .push((request.clone(), token.to_string()));
            Ok(self.reply.clone())
        }
    }

    fn signed_in() -> StaticCredentials {
        StaticCredentials(Some("tok".to_string()))
    }

    #[test]
    fn catalogue_has_two_subscription_plans() {
        let plus = product_by_price_id("price_monthly_plus").unwrap();
        assert_eq!(plus.name, "Monthly Plus");
        assert!((plus.price - 9.99).abs() < 1e-4);
        let pro = product_by_price_id("price_monthly_pro").unwrap();
        assert!((pro.price - 24.99).abs() < 1e-4);
        assert_eq!(pro.features.len(), 8);
        assert!(PRODUCTS.iter().all(|p| p.mode == CheckoutMode::Subscription));
        assert!(product_by_price_id("price_yearly").is_none());
    }

    #[test]
    fn missing_credentials_never_hit_the_network() {
        let client = CheckoutClient::new(ScriptedGateway::new(200, "{}"));
        let err = client
            .start(&PRODUCTS[0], &StaticCredentials(None))
            .unwrap_err();
        assert_eq!(err.kind(), "unauthenticated");
        assert!(client.gateway.seen.borrow().is_empty());

        let notice = Notice::from_error(&err);
        assert_eq!(notice.title, "Authentication Required");
        assert_eq!(notice.description, "Please sign in to purchase a subscription.");
        assert_eq!(notice.variant, NoticeVariant::Destructive);
    }

    #[test]
    fn success_returns_redirect_and_sends_bearer() {
        let client = CheckoutClient::new(ScriptedGateway::new(
            200,
            r#"{"sessionId":"cs_1","url":"https://checkout.example/cs_1"}"#,
        ));
        let url = client.start(&PRODUCTS[1], &signed_in()).unwrap();
        assert_eq!(url, "https://checkout.example/cs_1");

        let seen = client.gateway.seen.borrow();
        assert_eq!(seen[0].0.price_id, "price_monthly_pro");
        assert_eq!(seen[0].1, "tok");
        let body = serde_json::to_value(&seen[0].0).unwrap();
        let expected = serde_json::json!({"priceId": "price_monthly_pro", "mode": "subscription"});
        assert_eq!(body, expected);
    }

    #[test]
    fn error_body_message_is_used() {
        let err = parse_checkout_response(400, r#"{"error":"No such price"}"#).unwrap_err();
        assert_eq!(err.to_string(), "No such price");
        assert_eq!(err.kind(), "request-failed");

        let err = parse_checkout_response(502, "<html>bad gateway</html>").unwrap_err();
        assert_eq!(err.to_string(), DEFAULT_CHECKOUT_ERROR);

        let err = parse_checkout_response(200, "{}").unwrap_err();
        assert_eq!(err.to_string(), DEFAULT_CHECKOUT_ERROR);
    }

    #[test]
    fn flow_clears_loading_and_records_notice() {
        let client = CheckoutClient::new(ScriptedGateway::new(500, r#"{"error":"boom"}"#));
        let mut flow = CheckoutFlow::new();
        assert!(flow.purchase(&client, &PRODUCTS[0], &signed_in()).is_none());
        assert!(flow.loading_price_id().is_none());
        let notices = flow.take_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].title, "Checkout Error");
        assert_eq!(notices[0].description, "boom");
        assert!(flow.take_notices().is_empty());
    }

    #[test]
    fn repeated_failures_do_not_pile_up_once_shown() {
        let client = CheckoutClient::new(ScriptedGateway::new(500, r#"{"error":"boom"}"#));
        let mut flow = CheckoutFlow::new();
        for _ in 0..3 {
            flow.purchase(&client, &PRODUCTS[0], &signed_in());
            assert_eq!(flow.take_notices().len(), 1);
        }
    }

    #[test]
    fn blank_error_falls_back_to_generic_notice() {
        let notice = Notice::from_error(&GracieError::CheckoutFailed(String::new()));
        assert_eq!(notice.description, FALLBACK_NOTICE);
    }
}
