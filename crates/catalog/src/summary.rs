//! Dashboard figures derived from a catalog snapshot.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::store::CatalogStore;

/// Headline numbers for the supplier dashboard.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogSummary {
    pub products: usize,
    pub out_of_stock: usize,
    pub discounted: usize,
    pub total_units: u64,
    /// Sum of `current_price * quantity` over all products.
    #[serde(with = "rust_decimal::serde::float")]
    pub stock_value: Decimal,
}

impl CatalogSummary {
    pub fn of(store: &CatalogStore) -> Self {
        store
            .products()
            .iter()
            .fold(Self::default(), |mut acc, p| {
                acc.products += 1;
                if !p.in_stock() {
                    acc.out_of_stock += 1;
                }
                if p.is_discounted() {
                    acc.discounted += 1;
                }
                acc.total_units = acc.total_units.saturating_add(p.quantity());
                acc.stock_value = acc
                    .stock_value
                    .saturating_add(p.current_price().saturating_mul(Decimal::from(p.quantity())));
                acc
            })
    }
}
