//! In-memory catalog store for one supplier session.

use std::iter::FusedIterator;

use rust_decimal::Decimal;
use tracing::{debug, info};

use supplyhub_core::{DomainError, DomainResult, ProductId, SupplierId};

use crate::input::{ProductDraft, ProductForm, parse_percent};
use crate::pricing::DiscountPercent;
use crate::product::Product;

/// The authoritative product list of one supplier session.
///
/// Products are kept newest first; that order is what the catalog screen shows
/// and what [`CatalogStore::search`] yields. Every mutation either succeeds
/// completely or leaves the store untouched.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    supplier_id: SupplierId,
    products: Vec<Product>,
}

impl CatalogStore {
    pub fn new(supplier_id: SupplierId) -> Self {
        Self {
            supplier_id,
            products: Vec::new(),
        }
    }

    pub fn supplier_id(&self) -> SupplierId {
        self.supplier_id
    }

    /// Products in display order (newest first).
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id_typed() == id)
    }

    fn get_mut(&mut self, id: ProductId) -> Option<&mut Product> {
        self.products.iter_mut().find(|p| p.id_typed() == id)
    }

    /// Validate raw form fields and add the product at the top of the catalog.
    pub fn add_product(
        &mut self,
        name: &str,
        price: &str,
        quantity: &str,
        unit: &str,
    ) -> DomainResult<Product> {
        let draft = ProductDraft::parse(name, price, quantity, unit)?;
        Ok(self.add(draft))
    }

    /// Add an already validated product at the top of the catalog.
    pub fn add(&mut self, draft: ProductDraft) -> Product {
        let product = Product::from_draft(ProductId::new(), draft);
        info!(
            supplier_id = %self.supplier_id,
            product_id = %product.id_typed(),
            name = product.name(),
            price = %product.base_price(),
            quantity = product.quantity(),
            "product added"
        );
        self.products.insert(0, product.clone());
        product
    }

    /// Remove a product. Unknown ids are ignored; returns whether anything was
    /// removed.
    pub fn remove_product(&mut self, id: ProductId) -> bool {
        let before = self.products.len();
        self.products.retain(|p| p.id_typed() != id);
        let removed = self.products.len() != before;

        if removed {
            info!(supplier_id = %self.supplier_id, product_id = %id, "product removed");
        } else {
            debug!(supplier_id = %self.supplier_id, product_id = %id, "remove ignored: unknown product");
        }
        removed
    }

    /// Apply a signed stock delta, clamping at zero. `None` for unknown ids.
    pub fn adjust_stock(&mut self, id: ProductId, delta: i64) -> Option<Product> {
        let supplier_id = self.supplier_id;
        let Some(product) = self.get_mut(id) else {
            debug!(%supplier_id, product_id = %id, delta, "stock adjustment ignored: unknown product");
            return None;
        };

        let before = product.quantity();
        product.adjust_stock(delta);
        info!(
            %supplier_id,
            product_id = %id,
            delta,
            before,
            after = product.quantity(),
            "stock adjusted"
        );
        Some(product.clone())
    }

    /// Discount a product by `percent` of its base price.
    ///
    /// `percent` must lie strictly between 0 and 100. The discount is always
    /// computed from the base price, so applying 10% and then 30% leaves the
    /// product at 70% of base, not 63%.
    pub fn apply_discount(&mut self, id: ProductId, percent: Decimal) -> DomainResult<Product> {
        let discount = DiscountPercent::from_decimal(percent)?;
        self.set_discount(id, discount)
    }

    /// Drop any discount; the current price returns to the base price.
    pub fn clear_discount(&mut self, id: ProductId) -> DomainResult<Product> {
        self.set_discount(id, DiscountPercent::none())
    }

    /// Discount editor semantics: blank input clears the discount, anything
    /// else must be a valid percent.
    pub fn set_discount_from_input(&mut self, id: ProductId, raw: &str) -> DomainResult<Product> {
        if raw.trim().is_empty() {
            return self.clear_discount(id);
        }
        let discount = parse_percent(raw)?;
        self.set_discount(id, discount)
    }

    fn set_discount(&mut self, id: ProductId, discount: DiscountPercent) -> DomainResult<Product> {
        let supplier_id = self.supplier_id;
        let product = self.get_mut(id).ok_or_else(DomainError::not_found)?;

        product.set_discount(discount)?;
        info!(
            %supplier_id,
            product_id = %id,
            discount = discount.value(),
            base_price = %product.base_price(),
            current_price = %product.current_price(),
            "discount updated"
        );
        Ok(product.clone())
    }

    /// Replace name, price, quantity and unit from raw form fields.
    ///
    /// The new price becomes the base price; an active discount stays active
    /// and is re-applied to it. A negative quantity is stored as zero.
    pub fn edit_product(&mut self, id: ProductId, form: &ProductForm) -> DomainResult<Product> {
        let draft = form.parse_edit()?;
        self.edit(id, draft)
    }

    /// Replace every editable field with already validated values.
    pub fn edit(&mut self, id: ProductId, draft: ProductDraft) -> DomainResult<Product> {
        let supplier_id = self.supplier_id;
        let product = self.get_mut(id).ok_or_else(DomainError::not_found)?;

        product.replace(draft)?;
        info!(
            %supplier_id,
            product_id = %id,
            name = product.name(),
            base_price = %product.base_price(),
            current_price = %product.current_price(),
            quantity = product.quantity(),
            "product edited"
        );
        Ok(product.clone())
    }

    /// Case-insensitive substring search over product names, in display order.
    ///
    /// An empty query matches everything. The returned iterator is lazy and
    /// can be cloned to restart from the same position.
    pub fn search(&self, query: &str) -> Search<'_> {
        Search {
            products: self.products.iter(),
            needle: query.to_lowercase(),
        }
    }
}

/// Lazy iterator returned by [`CatalogStore::search`].
#[derive(Debug, Clone)]
pub struct Search<'a> {
    products: std::slice::Iter<'a, Product>,
    needle: String,
}

impl<'a> Iterator for Search<'a> {
    type Item = &'a Product;

    fn next(&mut self) -> Option<Self::Item> {
        let needle = self.needle.as_str();
        self.products
            .find(|p| needle.is_empty() || p.name().to_lowercase().contains(needle))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.products.size_hint().1)
    }
}

impl FusedIterator for Search<'_> {}
