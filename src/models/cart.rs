use regex::Regex;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;
use validator::{Validate, ValidationError};

/// A single cart entry. Two items with the same fields are equal; there is
/// no other identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct LineItem {
    #[validate(length(min = 1, message = "Item name must not be empty"))]
    pub name: String,

    #[validate(range(min = 0.0, message = "Unit price must not be negative"))]
    #[validate(custom(function = "validate_unit_price", message = "Unit price must be a finite number"))]
    pub unit_price: f64,

    pub quantity: u32,
}

// `range` lets NaN and +inf through since neither compares below the minimum.
fn validate_unit_price(unit_price: f64) -> Result<(), ValidationError> {
    if !unit_price.is_finite() {
        return Err(ValidationError::new("unit_price_not_finite"));
    }
    Ok(())
}

impl LineItem {
    pub fn new(name: impl Into<String>, unit_price: f64, quantity: u32) -> Self {
        Self {
            name: name.into(),
            unit_price,
            quantity,
        }
    }

    pub fn line_total(&self) -> f64 {
        self.unit_price * f64::from(self.quantity)
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum LineItemParseError {
    #[error("Invalid item '{input}': expected NAME:PRICE:QTY")]
    InvalidFormat { input: String },

    #[error("Invalid price '{value}'")]
    InvalidPrice { value: String },

    #[error("Invalid quantity '{value}'")]
    InvalidQuantity { value: String },
}

lazy_static::lazy_static! {
    static ref ITEM_SPEC_REGEX: Regex =
        Regex::new(r"^(?P<name>.+):(?P<price>[^:]+):(?P<qty>[^:]+)$").unwrap();
}

/// Parses the `NAME:PRICE:QTY` form used on the command line. The name may
/// itself contain colons; price and quantity are always the last two fields.
impl FromStr for LineItem {
    type Err = LineItemParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = ITEM_SPEC_REGEX
            .captures(s.trim())
            .ok_or_else(|| LineItemParseError::InvalidFormat {
                input: s.to_string(),
            })?;

        let price = caps["price"].trim();
        let unit_price = price
            .parse::<f64>()
            .map_err(|_| LineItemParseError::InvalidPrice {
                value: price.to_string(),
            })?;

        let qty = caps["qty"].trim();
        let quantity = qty
            .parse::<u32>()
            .map_err(|_| LineItemParseError::InvalidQuantity {
                value: qty.to_string(),
            })?;

        Ok(LineItem::new(caps["name"].trim(), unit_price, quantity))
    }
}

/// Append-only list of line items.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the item as-is. No validation and no deduplication.
    pub fn add(&mut self, item: LineItem) {
        self.items.push(item);
    }

    /// Snapshot of the contents in insertion order.
    pub fn items(&self) -> Vec<LineItem> {
        self.items.clone()
    }

    pub fn as_slice(&self) -> &[LineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn subtotal(&self) -> f64 {
        self.items.iter().map(LineItem::line_total).sum()
    }
}

impl FromIterator<LineItem> for Cart {
    fn from_iter<I: IntoIterator<Item = LineItem>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_add_keeps_duplicates() {
        let mut cart = Cart::new();
        cart.add(LineItem::new("Apple", 1.0, 3));
        cart.add(LineItem::new("Apple", 1.0, 3));

        let items = cart.items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0], items[1]);
    }

    #[test]
    fn test_items_is_a_snapshot() {
        let mut cart = Cart::new();
        cart.add(LineItem::new("Apple", 1.0, 3));

        let mut snapshot = cart.items();
        snapshot.push(LineItem::new("Pear", 5.0, 1));
        snapshot[0].quantity = 99;

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.as_slice()[0].quantity, 3);
    }

    #[test]
    fn test_add_accepts_unvalidated_values() {
        let mut cart = Cart::new();
        cart.add(LineItem::new("", -4.0, 0));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.subtotal(), 0.0);
    }

    #[test]
    fn test_subtotal() {
        let cart: Cart = vec![LineItem::new("Apple", 1.0, 3), LineItem::new("Banana", 2.0, 2)]
            .into_iter()
            .collect();

        assert_eq!(cart.subtotal(), 7.0);
        assert_eq!(Cart::new().subtotal(), 0.0);
    }

    #[test]
    fn test_parse_item() {
        let item: LineItem = "Apple:1.25:3".parse().unwrap();
        assert_eq!(item, LineItem::new("Apple", 1.25, 3));

        let item: LineItem = " Item:With:Colons:2:1 ".parse().unwrap();
        assert_eq!(item.name, "Item:With:Colons");
        assert_eq!(item.unit_price, 2.0);
        assert_eq!(item.quantity, 1);
    }

    #[test]
    fn test_parse_item_errors() {
        assert!(matches!(
            "Apple".parse::<LineItem>(),
            Err(LineItemParseError::InvalidFormat { .. })
        ));
        assert_eq!(
            "Apple:cheap:3".parse::<LineItem>(),
            Err(LineItemParseError::InvalidPrice {
                value: "cheap".to_string()
            })
        );
        assert_eq!(
            "Apple:1:-3".parse::<LineItem>(),
            Err(LineItemParseError::InvalidQuantity {
                value: "-3".to_string()
            })
        );
    }

    #[test]
    fn test_validate() {
        assert!(LineItem::new("Apple", 1.0, 3).validate().is_ok());
        assert!(LineItem::new("Free sample", 0.0, 1).validate().is_ok());
        assert!(LineItem::new("", 1.0, 3).validate().is_err());
        assert!(LineItem::new("Apple", -1.0, 3).validate().is_err());

        for spec in ["Apple:NaN:3", "Apple:inf:3", "Apple:-inf:3"] {
            let item: LineItem = spec.parse().unwrap();
            assert!(item.validate().is_err(), "{} should not validate", spec);
        }
    }

    proptest! {
        // Whole-number prices keep the float sum exact, so any order must agree.
        #[test]
        fn subtotal_is_order_independent(
            lines in proptest::collection::vec((0u32..10_000, 0u32..100), 0..20)
        ) {
            let items: Vec<LineItem> = lines
                .iter()
                .enumerate()
                .map(|(i, (price, qty))| LineItem::new(format!("item-{i}"), f64::from(*price), *qty))
                .collect();

            let expected: f64 = lines
                .iter()
                .map(|(price, qty)| f64::from(*price) * f64::from(*qty))
                .sum();

            let forward: Cart = items.iter().cloned().collect();
            let reversed: Cart = items.iter().rev().cloned().collect();

            prop_assert_eq!(forward.subtotal(), expected);
            prop_assert_eq!(reversed.subtotal(), expected);
        }
    }
}
