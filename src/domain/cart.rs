use super::money::Price;
use crate::error::{CheckoutError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single product line as stored in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: String,
    pub name: String,
    pub unit_price: Price,
    pub quantity: u32,
}

impl CartLine {
    pub fn subtotal(&self) -> Result<Price> {
        let subtotal = self
            .unit_price
            .value()
            .checked_mul(Decimal::from(self.quantity))
            .ok_or_else(|| CheckoutError::ValidationError("Line subtotal overflow".to_string()))?;
        Price::new(subtotal)
    }
}

/// Read-only view of the cart handed to the dispatcher.
///
/// `reference` identifies the purchased product when the cart holds a single
/// product; wallet checkouts use it as the product identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSnapshot {
    pub total_items: u32,
    pub total_price: Price,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl CartSnapshot {
    pub fn new(total_items: u32, total_price: Price) -> Self {
        Self {
            total_items,
            total_price,
            reference: None,
        }
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Aggregates cart lines into a snapshot.
    pub fn from_lines(lines: &[CartLine]) -> Result<Self> {
        let mut total_items: u32 = 0;
        let mut total_price = Price::ZERO;
        for line in lines {
            total_items = total_items
                .checked_add(line.quantity)
                .ok_or_else(|| CheckoutError::ValidationError("Too many items".to_string()))?;
            total_price = total_price.checked_add(line.subtotal()?)?;
        }

        let reference = match lines.split_first() {
            Some((first, rest)) if rest.iter().all(|l| l.product_id == first.product_id) => {
                Some(first.product_id.clone())
            }
            _ => None,
        };

        Ok(Self {
            total_items,
            total_price,
            reference,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.total_items == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn line(product_id: &str, unit_price: Decimal, quantity: u32) -> CartLine {
        CartLine {
            product_id: product_id.to_string(),
            name: format!("{product_id} crate"),
            unit_price: Price::new(unit_price).unwrap(),
            quantity,
        }
    }

    #[test]
    fn test_from_lines_totals() {
        let lines = vec![line("tomato", dec!(120.00), 2), line("spinach", dec!(210.00), 1)];
        let cart = CartSnapshot::from_lines(&lines).unwrap();
        assert_eq!(cart.total_items, 3);
        assert_eq!(cart.total_price.value(), dec!(450.00));
        assert_eq!(cart.reference, None);
    }

    #[test]
    fn test_from_lines_total_overflow() {
        let lines = vec![
            line("truffle", dec!(50000000000000000000000000000), 1),
            line("saffron", dec!(50000000000000000000000000000), 1),
        ];
        assert!(matches!(
            CartSnapshot::from_lines(&lines),
            Err(CheckoutError::ValidationError(_))
        ));
    }

    #[test]
    fn test_single_product_becomes_reference() {
        let lines = vec![line("carrot", dec!(40.00), 2), line("carrot", dec!(40.00), 1)];
        let cart = CartSnapshot::from_lines(&lines).unwrap();
        assert_eq!(cart.reference.as_deref(), Some("carrot"));
    }

    #[test]
    fn test_empty_lines_make_empty_cart() {
        let cart = CartSnapshot::from_lines(&[]).unwrap();
        assert!(cart.is_empty());
        assert_eq!(cart.total_price, Price::ZERO);
    }
}
