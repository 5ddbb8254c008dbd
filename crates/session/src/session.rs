//! Supplier session: owns the catalog and forwards accepted changes.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::info;

use supplyhub_catalog::{CatalogStore, CatalogSummary, Product, ProductForm, Search};
use supplyhub_core::{DomainResult, ProductId, SupplierId};

use crate::config::{SessionConfig, SyncMode};
use crate::sync::{CatalogChange, CatalogSync, HttpSync, NoopSync, SyncError};

/// One supplier's working session.
///
/// Created when the supplier logs in and closed when they leave. Each
/// operation is applied to the local catalog first; only if it changed
/// something is the change published to the sync sink.
pub struct SupplierSession {
    store: CatalogStore,
    sync: Arc<dyn CatalogSync>,
    opened_at: DateTime<Utc>,
}

impl core::fmt::Debug for SupplierSession {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SupplierSession")
            .field("supplier_id", &self.store.supplier_id())
            .field("products", &self.store.len())
            .field("opened_at", &self.opened_at)
            .finish_non_exhaustive()
    }
}

impl SupplierSession {
    pub fn new(supplier_id: SupplierId, sync: Arc<dyn CatalogSync>) -> Self {
        info!(%supplier_id, "supplier session opened");
        Self {
            store: CatalogStore::new(supplier_id),
            sync,
            opened_at: Utc::now(),
        }
    }

    /// Session wired to the sink selected by `config.sync_mode`.
    pub fn from_config(supplier_id: SupplierId, config: &SessionConfig) -> Result<Self, SyncError> {
        let sync: Arc<dyn CatalogSync> = match config.sync_mode {
            SyncMode::Mock => Arc::new(NoopSync),
            SyncMode::Http => {
                let mut http = HttpSync::new(config.api_url.clone(), config.sync_timeout)?;
                if let Some(token) = &config.api_token {
                    http = http.with_token(token.clone());
                }
                Arc::new(http)
            }
        };
        Ok(Self::new(supplier_id, sync))
    }

    pub fn supplier_id(&self) -> SupplierId {
        self.store.supplier_id()
    }

    pub fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }

    /// Read-only view of the catalog.
    pub fn catalog(&self) -> &CatalogStore {
        &self.store
    }

    pub fn search(&self, query: &str) -> Search<'_> {
        self.store.search(query)
    }

    pub fn summary(&self) -> CatalogSummary {
        CatalogSummary::of(&self.store)
    }

    pub fn add_product(
        &mut self,
        name: &str,
        price: &str,
        quantity: &str,
        unit: &str,
    ) -> DomainResult<Product> {
        let product = self.store.add_product(name, price, quantity, unit)?;
        self.sync.publish(CatalogChange::created(&product));
        Ok(product)
    }

    /// Callers are expected to have confirmed the removal with the user.
    pub fn remove_product(&mut self, id: ProductId) -> bool {
        let removed = self.store.remove_product(id);
        if removed {
            self.sync.publish(CatalogChange::Removed(id));
        }
        removed
    }

    pub fn adjust_stock(&mut self, id: ProductId, delta: i64) -> Option<Product> {
        let product = self.store.adjust_stock(id, delta)?;
        self.publish_update(&product);
        Some(product)
    }

    pub fn apply_discount(&mut self, id: ProductId, percent: Decimal) -> DomainResult<Product> {
        let product = self.store.apply_discount(id, percent)?;
        self.publish_update(&product);
        Ok(product)
    }

    pub fn clear_discount(&mut self, id: ProductId) -> DomainResult<Product> {
        let product = self.store.clear_discount(id)?;
        self.publish_update(&product);
        Ok(product)
    }

    pub fn set_discount_from_input(&mut self, id: ProductId, raw: &str) -> DomainResult<Product> {
        let product = self.store.set_discount_from_input(id, raw)?;
        self.publish_update(&product);
        Ok(product)
    }

    pub fn edit_product(&mut self, id: ProductId, form: &ProductForm) -> DomainResult<Product> {
        let product = self.store.edit_product(id, form)?;
        self.publish_update(&product);
        Ok(product)
    }

    fn publish_update(&self, product: &Product) {
        self.sync.publish(CatalogChange::updated(product));
    }

    /// End the session. The catalog is dropped; nothing is persisted.
    pub fn close(self) {
        let open_for = Utc::now() - self.opened_at;
        info!(
            supplier_id = %self.store.supplier_id(),
            products = self.store.len(),
            open_for_secs = open_for.num_seconds(),
            "supplier session closed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSync {
        changes: Mutex<Vec<CatalogChange>>,
    }

    impl RecordingSync {
        fn kinds(&self) -> Vec<&'static str> {
            self.changes.lock().unwrap().iter().map(|c| c.kind()).collect()
        }
    }

    impl CatalogSync for RecordingSync {
        fn publish(&self, change: CatalogChange) {
            self.changes.lock().unwrap().push(change);
        }
    }

    fn session() -> (SupplierSession, Arc<RecordingSync>) {
        let sync = Arc::new(RecordingSync::default());
        let session = SupplierSession::new(SupplierId::new(), sync.clone());
        (session, sync)
    }

    #[test]
    fn every_accepted_mutation_is_published_once() {
        let (mut session, sync) = session();
        let rice = session.add_product("Rice 25kg", "10400", "30", "bag").unwrap();
        let id = rice.id_typed();

        session.apply_discount(id, Decimal::from(20)).unwrap();
        session.adjust_stock(id, -5).unwrap();
        session.clear_discount(id).unwrap();
        session.set_discount_from_input(id, "10").unwrap();
        session
            .edit_product(id, &ProductForm::new("Rice 25kg", "11000", "25", "bag"))
            .unwrap();
        assert!(session.remove_product(id));

        assert_eq!(
            sync.kinds(),
            vec!["created", "updated", "updated", "updated", "updated", "updated", "removed"]
        );
    }

    #[test]
    fn rejected_and_noop_operations_publish_nothing() {
        let (mut session, sync) = session();
        let rice = session.add_product("Rice 25kg", "10400", "30", "bag").unwrap();
        let id = rice.id_typed();
        sync.changes.lock().unwrap().clear();

        assert!(session.add_product("", "1", "1", "kg").is_err());
        assert!(session.apply_discount(id, Decimal::ZERO).is_err());
        assert!(session.apply_discount(id, Decimal::ONE_HUNDRED).is_err());
        assert!(session.apply_discount(ProductId::new(), Decimal::from(5)).is_err());
        assert!(session.adjust_stock(ProductId::new(), 1).is_none());
        assert!(!session.remove_product(ProductId::new()));

        assert!(sync.kinds().is_empty());
        assert_eq!(session.catalog().get(id), Some(&rice));
    }

    #[test]
    fn update_change_carries_the_new_state() {
        let (mut session, sync) = session();
        let rice = session.add_product("Rice 25kg", "10400", "30", "bag").unwrap();
        session.apply_discount(rice.id_typed(), Decimal::from(20)).unwrap();

        let changes = sync.changes.lock().unwrap();
        match changes.last() {
            Some(CatalogChange::Updated(id, payload)) => {
                assert_eq!(*id, rice.id_typed());
                assert_eq!(payload.discount_percent, Some(20));
                assert_eq!(payload.price, Decimal::from(10400));
            }
            other => panic!("expected Updated change, got {other:?}"),
        }
    }

    #[test]
    fn mock_config_builds_a_working_session() {
        let mut session =
            SupplierSession::from_config(SupplierId::new(), &SessionConfig::default()).unwrap();
        session.add_product("Onions (bag)", "900", "30", "kg").unwrap();
        session.add_product("Potatoes (bag)", "1200", "0", "kg").unwrap();

        let summary = session.summary();
        assert_eq!(summary.products, 2);
        assert_eq!(summary.out_of_stock, 1);
        assert_eq!(session.search("onion").count(), 1);
        session.close();
    }
}
