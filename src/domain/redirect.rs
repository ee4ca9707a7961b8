use super::money::Price;
use crate::error::Result;

/// Field names of the hosted provider's payment request, in submission order.
pub const FIELD_NAMES: [&str; 9] = ["amt", "psc", "pdc", "txAmt", "tAmt", "pid", "scd", "su", "fu"];

/// Where the hosted provider should send the browser afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct RedirectTarget {
    pub endpoint: String,
    pub merchant_code: String,
    pub success_url: String,
    pub failure_url: String,
}

/// A form that is POSTed to the hosted payment endpoint in a new browsing target.
#[derive(Debug, Clone, PartialEq)]
pub struct RedirectForm {
    pub endpoint: String,
    pub fields: Vec<(String, String)>,
}

impl RedirectForm {
    /// Builds the payment request for `total`.
    ///
    /// Service charge, delivery charge and tax are always zero, so the total
    /// amount equals the amount. Fails when `total` cannot be written with
    /// two decimals.
    pub fn payment_request(
        total: Price,
        product_id: &str,
        target: &RedirectTarget,
    ) -> Result<Self> {
        let amount = total.to_fixed_2()?;
        let values = [
            amount.as_str(),
            "0",
            "0",
            "0",
            amount.as_str(),
            product_id,
            target.merchant_code.as_str(),
            target.success_url.as_str(),
            target.failure_url.as_str(),
        ];
        let fields = FIELD_NAMES
            .iter()
            .zip(values)
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();

        Ok(Self {
            endpoint: target.endpoint.clone(),
            fields,
        })
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|(key, _)| key.as_str()).collect()
    }
}
