use crate::domain::redirect::RedirectTarget;
use crate::domain::widget::PaymentPreference;
use crate::error::Result;
use serde::Deserialize;
use std::time::Duration;

pub const ENV_PREFIX: &str = "CHECKOUT";

pub const DEFAULT_WALLET_PUBLIC_KEY: &str = "test_public_key_placeholder";
pub const DEFAULT_PRODUCT_NAME: &str = "Fresh produce order";
pub const DEFAULT_RETURN_URL: &str = "http://localhost:3000/checkout";
pub const DEFAULT_HOSTED_ENDPOINT: &str = "https://uat.hosted-pay.example/epay/main";
pub const DEFAULT_MERCHANT_CODE: &str = "EPAYTEST";
pub const DEFAULT_SUCCESS_URL: &str = "http://localhost:3000/payment/success";
pub const DEFAULT_FAILURE_URL: &str = "http://localhost:3000/payment/failure";
pub const DEFAULT_REDIRECT_RELEASE_DELAY_MS: u64 = 1000;

/// Settings for the checkout dispatcher, read from `CHECKOUT_*` variables.
#[derive(Debug, Deserialize, Clone)]
pub struct CheckoutConfig {
    pub wallet_public_key: String,
    pub wallet_product_name: String,
    pub wallet_return_url: String,
    pub wallet_payment_preferences: Vec<PaymentPreference>,
    pub hosted_endpoint: String,
    pub hosted_merchant_code: String,
    pub hosted_success_url: String,
    pub hosted_failure_url: String,
    pub redirect_release_delay_ms: u64,
    pub widget_timeout_ms: Option<u64>,
    pub reject_empty_cart: bool,
}

impl CheckoutConfig {
    pub fn load() -> Result<Self> {
        let preferences: Vec<&str> = PaymentPreference::all()
            .iter()
            .map(PaymentPreference::code)
            .collect();

        let config_builder = config::Config::builder()
            .set_default("wallet_public_key", DEFAULT_WALLET_PUBLIC_KEY)?
            .set_default("wallet_product_name", DEFAULT_PRODUCT_NAME)?
            .set_default("wallet_return_url", DEFAULT_RETURN_URL)?
            .set_default("wallet_payment_preferences", preferences)?
            .set_default("hosted_endpoint", DEFAULT_HOSTED_ENDPOINT)?
            .set_default("hosted_merchant_code", DEFAULT_MERCHANT_CODE)?
            .set_default("hosted_success_url", DEFAULT_SUCCESS_URL)?
            .set_default("hosted_failure_url", DEFAULT_FAILURE_URL)?
            .set_default("redirect_release_delay_ms", DEFAULT_REDIRECT_RELEASE_DELAY_MS)?
            .set_default("reject_empty_cart", false)?
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("wallet_payment_preferences"),
            )
            .build()?;

        Ok(config_builder.try_deserialize()?)
    }

    pub fn redirect_release_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_release_delay_ms)
    }

    pub fn widget_timeout(&self) -> Option<Duration> {
        self.widget_timeout_ms.map(Duration::from_millis)
    }

    pub fn redirect_target(&self) -> RedirectTarget {
        RedirectTarget {
            endpoint: self.hosted_endpoint.clone(),
            merchant_code: self.hosted_merchant_code.clone(),
            success_url: self.hosted_success_url.clone(),
            failure_url: self.hosted_failure_url.clone(),
        }
    }
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            wallet_public_key: DEFAULT_WALLET_PUBLIC_KEY.to_string(),
            wallet_product_name: DEFAULT_PRODUCT_NAME.to_string(),
            wallet_return_url: DEFAULT_RETURN_URL.to_string(),
            wallet_payment_preferences: PaymentPreference::all(),
            hosted_endpoint: DEFAULT_HOSTED_ENDPOINT.to_string(),
            hosted_merchant_code: DEFAULT_MERCHANT_CODE.to_string(),
            hosted_success_url: DEFAULT_SUCCESS_URL.to_string(),
            hosted_failure_url: DEFAULT_FAILURE_URL.to_string(),
            redirect_release_delay_ms: DEFAULT_REDIRECT_RELEASE_DELAY_MS,
            widget_timeout_ms: None,
            reject_empty_cart: false,
        }
    }
}
