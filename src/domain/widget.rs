use serde::{Deserialize, Serialize};

/// Payment channels the wallet widget may offer inside its overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentPreference {
    Wallet,
    #[serde(rename = "EBANKING")]
    EBanking,
    MobileBanking,
    ConnectIps,
    Sct,
}

impl PaymentPreference {
    pub fn all() -> Vec<PaymentPreference> {
        vec![
            PaymentPreference::Wallet,
            PaymentPreference::EBanking,
            PaymentPreference::MobileBanking,
            PaymentPreference::ConnectIps,
            PaymentPreference::Sct,
        ]
    }

    pub fn code(&self) -> &'static str {
        match self {
            PaymentPreference::Wallet => "WALLET",
            PaymentPreference::EBanking => "EBANKING",
            PaymentPreference::MobileBanking => "MOBILE_BANKING",
            PaymentPreference::ConnectIps => "CONNECT_IPS",
            PaymentPreference::Sct => "SCT",
        }
    }
}

/// Configuration passed to the wallet widget constructor.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetConfig {
    pub public_key: String,
    pub product_identity: String,
    pub product_name: String,
    pub product_url: String,
    pub payment_preference: Vec<PaymentPreference>,
}

impl WidgetConfig {
    /// Returns the first problem that would make the widget refuse this configuration.
    pub fn problem(&self) -> Option<&'static str> {
        if self.public_key.trim().is_empty() {
            Some("public key is empty")
        } else if self.product_identity.trim().is_empty() {
            Some("product identity is empty")
        } else if self.product_name.trim().is_empty() {
            Some("product name is empty")
        } else if self.payment_preference.is_empty() {
            Some("no payment preference")
        } else {
            None
        }
    }
}

/// A successful payment as reported by the widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetPayment {
    pub idx: String,
    pub token: String,
    pub amount: u64,
    pub raw: serde_json::Value,
}

/// The one-shot result of showing the widget.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetOutcome {
    Success(WidgetPayment),
    Failure(String),
    Cancelled,
}
