//! Supplier catalog domain module.
//!
//! This crate contains the business rules for a supplier's product catalog:
//! typed input validation, discount pricing, stock adjustment and search. It is
//! deterministic domain logic (no IO, no HTTP, no storage); synchronizing with a
//! backend is the session crate's job.

pub mod format;
pub mod input;
pub mod pricing;
pub mod product;
pub mod store;
pub mod summary;

pub use format::{CurrencyFormat, LocaleFormatter, PriceFormatter, UnknownCurrency};
pub use input::{ProductDraft, ProductForm, parse_percent};
pub use pricing::{DiscountPercent, discounted_price};
pub use product::Product;
pub use store::{CatalogStore, Search};
pub use summary::CatalogSummary;
