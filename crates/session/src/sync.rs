//! Best-effort synchronization of catalog changes with the API.
//!
//! Every accepted catalog mutation is published as a [`CatalogChange`] after
//! it has been applied locally. Publishing never blocks and never reports
//! failure back to the caller: delivery is at most once, failures are logged,
//! and nothing is rolled back or retried.

use std::time::Duration;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use supplyhub_catalog::Product;
use supplyhub_core::ProductId;

use crate::offline::Connectivity;

/// Product body sent to the API.
///
/// Creation sends `{name, price, quantity, unit}`; updates add the active
/// discount so the backend can mirror the displayed price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPayload {
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub quantity: u64,
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_percent: Option<u8>,
}

impl ProductPayload {
    /// Body for `POST /products`.
    pub fn for_create(product: &Product) -> Self {
        Self {
            name: product.name().to_string(),
            price: product.base_price(),
            quantity: product.quantity(),
            unit: product.unit().to_string(),
            discount_percent: None,
        }
    }

    /// Body for `PUT /products/{id}`.
    pub fn for_update(product: &Product) -> Self {
        Self {
            discount_percent: Some(product.discount().value()),
            ..Self::for_create(product)
        }
    }
}

/// A catalog mutation that already happened locally.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogChange {
    Created(ProductId, ProductPayload),
    Updated(ProductId, ProductPayload),
    Removed(ProductId),
}

impl CatalogChange {
    pub fn created(product: &Product) -> Self {
        Self::Created(product.id_typed(), ProductPayload::for_create(product))
    }

    pub fn updated(product: &Product) -> Self {
        Self::Updated(product.id_typed(), ProductPayload::for_update(product))
    }

    pub fn product_id(&self) -> ProductId {
        match self {
            Self::Created(id, _) | Self::Updated(id, _) | Self::Removed(id) => *id,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Created(..) => "created",
            Self::Updated(..) => "updated",
            Self::Removed(_) => "removed",
        }
    }
}

/// Sink for catalog changes.
///
/// Implementations must return promptly and must swallow their own failures.
pub trait CatalogSync: Send + Sync {
    fn publish(&self, change: CatalogChange);
}

/// Mock mode: changes stay local.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSync;

impl CatalogSync for NoopSync {
    fn publish(&self, change: CatalogChange) {
        debug!(
            product_id = %change.product_id(),
            change = change.kind(),
            "mock mode: change kept local"
        );
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("failed to build HTTP client: {0}")]
    Client(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("API error ({0}): {1}")]
    Api(u16, String),
}

/// Pushes changes to the REST API on background tokio tasks.
#[derive(Debug, Clone)]
pub struct HttpSync {
    client: reqwest::Client,
    api_url: String,
    token: Option<String>,
    connectivity: Connectivity,
}

impl HttpSync {
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> Result<Self, SyncError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SyncError::Client(e.to_string()))?;

        Ok(Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token: None,
            connectivity: Connectivity::new(),
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn connectivity(&self) -> &Connectivity {
        &self.connectivity
    }

    /// Send one change and wait for the response.
    pub async fn send(&self, change: &CatalogChange) -> Result<(), SyncError> {
        let mut req = match change {
            CatalogChange::Created(_, payload) => self
                .client
                .post(format!("{}/products", self.api_url))
                .json(payload),
            CatalogChange::Updated(id, payload) => self
                .client
                .put(format!("{}/products/{}", self.api_url, id))
                .json(payload),
            CatalogChange::Removed(id) => self
                .client
                .delete(format!("{}/products/{}", self.api_url, id)),
        };

        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| SyncError::Network(e.to_string()))?;

        // The response body is not needed: local state is authoritative.
        let status = resp.status();
        if !status.is_success() {
            return Err(SyncError::Api(
                status.as_u16(),
                resp.text().await.unwrap_or_default(),
            ));
        }
        Ok(())
    }
}

impl CatalogSync for HttpSync {
    fn publish(&self, change: CatalogChange) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!(
                product_id = %change.product_id(),
                change = change.kind(),
                "no async runtime; catalog change not synced"
            );
            return;
        };

        let sync = self.clone();
        runtime.spawn(async move {
            match sync.send(&change).await {
                Ok(()) => {
                    sync.connectivity.set_online();
                    debug!(
                        product_id = %change.product_id(),
                        change = change.kind(),
                        "catalog change synced"
                    );
                }
                Err(err) => {
                    sync.connectivity.set_offline();
                    warn!(
                        product_id = %change.product_id(),
                        change = change.kind(),
                        error = %err,
                        "catalog sync failed; keeping local state"
                    );
                }
            }
        });
    }
}
