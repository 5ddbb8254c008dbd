//! Parsing of raw form input into validated catalog values.
//!
//! Product forms arrive as text. They are parsed exactly once, here, into typed
//! values; the store never sees unvalidated strings.

use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use supplyhub_core::{Field, ValidationError};

use crate::pricing::DiscountPercent;

/// Raw product form fields, as typed by the user.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductForm {
    pub name: String,
    pub price: String,
    pub quantity: String,
    pub unit: String,
}

impl ProductForm {
    pub fn new(
        name: impl Into<String>,
        price: impl Into<String>,
        quantity: impl Into<String>,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            price: price.into(),
            quantity: quantity.into(),
            unit: unit.into(),
        }
    }

    pub fn parse(&self) -> Result<ProductDraft, ValidationError> {
        ProductDraft::parse(&self.name, &self.price, &self.quantity, &self.unit)
    }

    /// Parse for the edit dialog: a negative quantity is stored as zero.
    pub fn parse_edit(&self) -> Result<ProductDraft, ValidationError> {
        ProductDraft::parse_edit(&self.name, &self.price, &self.quantity, &self.unit)
    }
}

/// What to do with a quantity below zero.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum NegativeQuantity {
    Reject,
    ClampToZero,
}

/// Validated product fields, ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub price: Decimal,
    pub quantity: u64,
    pub unit: String,
}

impl ProductDraft {
    /// Parse and validate all four fields, reporting every invalid one.
    pub fn parse(
        name: &str,
        price: &str,
        quantity: &str,
        unit: &str,
    ) -> Result<Self, ValidationError> {
        Self::parse_with(name, price, quantity, unit, NegativeQuantity::Reject)
    }

    /// Like [`ProductDraft::parse`], but a negative quantity clamps to zero
    /// instead of failing. Used when editing an existing product.
    pub fn parse_edit(
        name: &str,
        price: &str,
        quantity: &str,
        unit: &str,
    ) -> Result<Self, ValidationError> {
        Self::parse_with(name, price, quantity, unit, NegativeQuantity::ClampToZero)
    }

    fn parse_with(
        name: &str,
        price: &str,
        quantity: &str,
        unit: &str,
        negative: NegativeQuantity,
    ) -> Result<Self, ValidationError> {
        let mut issues = ValidationError::new();

        let name = required_text(name, Field::Name, &mut issues);
        let price = parse_price(price, &mut issues);
        let quantity = parse_quantity(quantity, negative, &mut issues);
        let unit = required_text(unit, Field::Unit, &mut issues);

        let (Some(name), Some(price), Some(quantity), Some(unit)) = (name, price, quantity, unit)
        else {
            return Err(issues);
        };
        issues.into_result(Self {
            name,
            price,
            quantity,
            unit,
        })
    }
}

/// Parse a discount percent typed into the discount editor.
pub fn parse_percent(raw: &str) -> Result<DiscountPercent, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::single(Field::Discount, "cannot be empty"));
    }
    let value = parse_number(raw)
        .ok_or_else(|| ValidationError::single(Field::Discount, "must be a number"))?;
    DiscountPercent::from_decimal(value)
}

fn required_text(raw: &str, field: Field, issues: &mut ValidationError) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        issues.push(field, "cannot be empty");
        return None;
    }
    Some(trimmed.to_string())
}

fn parse_price(raw: &str, issues: &mut ValidationError) -> Option<Decimal> {
    let raw = raw.trim();
    if raw.is_empty() {
        issues.push(Field::Price, "cannot be empty");
        return None;
    }
    let Some(price) = parse_number(raw) else {
        issues.push(Field::Price, "must be a number");
        return None;
    };
    if price <= Decimal::ZERO {
        issues.push(Field::Price, "must be greater than zero");
        return None;
    }
    Some(price)
}

fn parse_quantity(
    raw: &str,
    negative: NegativeQuantity,
    issues: &mut ValidationError,
) -> Option<u64> {
    let raw = raw.trim();
    if raw.is_empty() {
        issues.push(Field::Quantity, "cannot be empty");
        return None;
    }
    let Ok(quantity) = raw.parse::<i64>() else {
        issues.push(Field::Quantity, "must be a whole number");
        return None;
    };
    match (u64::try_from(quantity), negative) {
        (Ok(quantity), _) => Some(quantity),
        (Err(_), NegativeQuantity::ClampToZero) => Some(0),
        (Err(_), NegativeQuantity::Reject) => {
            issues.push(Field::Quantity, "cannot be negative");
            None
        }
    }
}

fn parse_number(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_trimmed_fields() {
        let draft = ProductDraft::parse("  Rice 25kg ", "10400", " 30 ", " bag").unwrap();
        assert_eq!(draft.name, "Rice 25kg");
        assert_eq!(draft.price, Decimal::from(10400));
        assert_eq!(draft.quantity, 30);
        assert_eq!(draft.unit, "bag");
    }

    #[test]
    fn accepts_decimal_prices_from_the_backend() {
        let draft = ProductDraft::parse("Potatoes (bag)", "1200.00", "50", "kg").unwrap();
        assert_eq!(draft.price, Decimal::from(1200));
    }

    #[test]
    fn reports_every_invalid_field() {
        let err = ProductDraft::parse(" ", "abc", "1.5", "").unwrap_err();
        let fields: Vec<Field> = err.fields().collect();
        assert_eq!(
            fields,
            vec![Field::Name, Field::Price, Field::Quantity, Field::Unit]
        );
    }

    #[test]
    fn rejects_non_positive_price_and_negative_quantity() {
        let err = ProductDraft::parse("Salt", "0", "-3", "kg").unwrap_err();
        assert!(err.has_field(Field::Price));
        assert!(err.has_field(Field::Quantity));
        assert!(!err.has_field(Field::Name));
    }

    #[test]
    fn edit_parse_clamps_negative_quantity() {
        let draft = ProductDraft::parse_edit("Salt", "150", "-3", "kg").unwrap();
        assert_eq!(draft.quantity, 0);

        let err = ProductDraft::parse_edit("Salt", "0", "-3", "kg").unwrap_err();
        assert_eq!(err.fields().collect::<Vec<_>>(), vec![Field::Price]);

        let form = ProductForm::new("Salt", "150", "-3", "kg");
        assert!(form.parse().is_err());
        assert_eq!(form.parse_edit().unwrap().quantity, 0);
    }

    #[test]
    fn form_parse_delegates() {
        let form = ProductForm::new("Sugar 25kg", "9800", "12", "bag");
        assert_eq!(form.parse().unwrap().quantity, 12);
    }

    #[test]
    fn percent_parsing() {
        assert_eq!(parse_percent(" 20 ").unwrap().value(), 20);
        assert_eq!(parse_percent("12.5").unwrap().value(), 13);
        assert!(parse_percent("").is_err());
        assert!(parse_percent("ten").is_err());
        assert!(parse_percent("0").is_err());
        assert!(parse_percent("100").is_err());
    }
}
