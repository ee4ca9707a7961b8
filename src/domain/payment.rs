use super::money::Price;
use super::redirect::RedirectForm;
use crate::error::CheckoutError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The completion strategies a customer can pick at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PaymentMethod {
    CashOnDelivery,
    WalletWidget,
    HostedRedirect,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] = [
        PaymentMethod::CashOnDelivery,
        PaymentMethod::WalletWidget,
        PaymentMethod::HostedRedirect,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            PaymentMethod::CashOnDelivery => "cod",
            PaymentMethod::WalletWidget => "wallet",
            PaymentMethod::HostedRedirect => "hosted",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::CashOnDelivery => "Cash on Delivery",
            PaymentMethod::WalletWidget => "Digital Wallet",
            PaymentMethod::HostedRedirect => "Online Payment",
        }
    }

    pub fn is_available(&self) -> bool {
        true
    }

    /// Methods offered to the customer, already filtered by availability.
    pub fn available() -> Vec<PaymentMethod> {
        Self::ALL.into_iter().filter(|m| m.is_available()).collect()
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for PaymentMethod {
    type Err = CheckoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.code() == s)
            .ok_or_else(|| CheckoutError::ValidationError(format!("Unknown payment method: {s}")))
    }
}

impl TryFrom<String> for PaymentMethod {
    type Error = CheckoutError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PaymentMethod> for String {
    fn from(method: PaymentMethod) -> Self {
        method.code().to_string()
    }
}

/// The normalized record handed to the completion callback.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResult {
    pub payment_method: PaymentMethod,
    pub transaction_id: String,
    pub amount: Price,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_payload: Option<serde_json::Map<String, serde_json::Value>>,
}

/// Observable state of the processing guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckoutStatus {
    #[default]
    Idle,
    Processing { method: PaymentMethod },
}

impl CheckoutStatus {
    pub fn is_processing(&self) -> bool {
        matches!(self, CheckoutStatus::Processing { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    EmptyCart,
    AlreadyProcessing,
    MethodUnavailable,
}

/// What a single `complete_checkout` call ended with.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutOutcome {
    /// The strategy succeeded and the callback received this result.
    Completed(CheckoutResult),
    /// The browser was sent to the hosted provider; completion happens out of band.
    Redirected(RedirectForm),
    /// The customer closed the wallet widget.
    Cancelled,
    /// Nothing was attempted.
    Skipped(SkipReason),
}

impl CheckoutOutcome {
    pub fn result(&self) -> Option<&CheckoutResult> {
        match self {
            CheckoutOutcome::Completed(result) => Some(result),
            _ => None,
        }
    }
}
