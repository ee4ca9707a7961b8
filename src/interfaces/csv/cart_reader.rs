use crate::domain::cart::{CartLine, CartSnapshot};
use crate::error::{CheckoutError, Result};
use std::io::Read;

/// Reads cart lines from a CSV source with a
/// `product_id, name, unit_price, quantity` header.
pub struct CartReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> CartReader<R> {
    /// Wraps a cart export; surrounding whitespace in every field is ignored.
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(source);
        Self { reader }
    }

    /// Yields one `CartLine` per row, failing per row on bad input.
    pub fn lines(self) -> impl Iterator<Item = Result<CartLine>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(CheckoutError::from))
    }

    /// Reads every line and aggregates them into a snapshot.
    ///
    /// Any malformed line rejects the whole cart.
    pub fn snapshot(self) -> Result<CartSnapshot> {
        let lines = self.lines().collect::<Result<Vec<_>>>()?;
        CartSnapshot::from_lines(&lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_reader_valid_stream() {
        let data = "product_id, name, unit_price, quantity\n\
                    tomato, Tomatoes 1kg, 120.00, 2\n\
                    spinach, Spinach bunch, 210.00, 1";
        let reader = CartReader::new(data.as_bytes());
        let lines: Vec<Result<CartLine>> = reader.lines().collect();

        assert_eq!(lines.len(), 2);
        let first = lines[0].as_ref().unwrap();
        assert_eq!(first.product_id, "tomato");
        assert_eq!(first.quantity, 2);
        assert_eq!(first.unit_price.value(), dec!(120.00));
    }

    #[test]
    fn test_snapshot_aggregates() {
        let data = "product_id, name, unit_price, quantity\n\
                    tomato, Tomatoes 1kg, 120.00, 2\n\
                    spinach, Spinach bunch, 210.00, 1";
        let cart = CartReader::new(data.as_bytes()).snapshot().unwrap();
        assert_eq!(cart.total_items, 3);
        assert_eq!(cart.total_price.value(), dec!(450.00));
    }

    #[test]
    fn test_negative_price_is_rejected() {
        let data = "product_id, name, unit_price, quantity\ntomato, Tomatoes, -1.00, 2";
        let reader = CartReader::new(data.as_bytes());
        assert!(reader.snapshot().is_err());
    }
}
