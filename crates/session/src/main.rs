//! Demo entry point: runs a short supplier session against the configured sink.

use std::time::Duration;

use anyhow::Context;
use rust_decimal::Decimal;

use supplyhub_catalog::{LocaleFormatter, PriceFormatter};
use supplyhub_core::SupplierId;
use supplyhub_session::{SessionConfig, SupplierSession, SyncMode};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    supplyhub_observability::init();

    let config = SessionConfig::from_env().context("invalid configuration")?;
    let formatter =
        LocaleFormatter::new(&config.currency).context("invalid currency configuration")?;

    let mut session = SupplierSession::from_config(SupplierId::new(), &config)
        .context("failed to start supplier session")?;

    session.add_product("Potatoes (bag)", "1200.00", "50", "kg")?;
    let onions = session.add_product("Onions (bag)", "900.00", "30", "kg")?;
    let rice = session.add_product("Rice 25kg", "10400", "30", "bag")?;

    session.apply_discount(rice.id_typed(), Decimal::from(20))?;
    session.adjust_stock(onions.id_typed(), -30);

    for product in session.catalog().products() {
        tracing::info!(
            product_id = %product.id_typed(),
            name = product.name(),
            price = %formatter.format(product.current_price()),
            base_price = %formatter.format(product.base_price()),
            discount = %product.discount(),
            stock = product.quantity(),
            unit = product.unit(),
            "catalog entry"
        );
    }

    let summary = session.summary();
    tracing::info!(
        products = summary.products,
        out_of_stock = summary.out_of_stock,
        discounted = summary.discounted,
        stock_value = %formatter.format(summary.stock_value),
        "catalog summary"
    );

    if config.sync_mode == SyncMode::Http {
        // Sync runs on background tasks; give in-flight requests their timeout
        // before the runtime shuts down.
        tokio::time::sleep(config.sync_timeout.min(Duration::from_secs(2))).await;
    }

    session.close();
    Ok(())
}
