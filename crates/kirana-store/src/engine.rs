//! # POS Engine
//!
//! The single application-state owner: catalog, stock ledger, sale history,
//! UPI profile, and the live cart, together with the table store they are
//! flushed to.
//!
//! ## Lifecycle
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │  PosEngine::open(store)                                              │
//! │    load productDetails → Catalog                                     │
//! │    load inventory      → StockLedger (quantities only)               │
//! │    load billHistory    → SaleHistory                                 │
//! │    load upiDetails     → UpiProfile                                  │
//! │    cart starts empty (never persisted)                               │
//! │                                                                      │
//! │  every mutating operation:                                           │
//! │    core op succeeds → flush the affected table(s) → return           │
//! │    core op rejects  → state untouched, error surfaced                │
//! │                                                                      │
//! │  commit_sale: core commit → flush inventory + billHistory →          │
//! │               clear cart → return receipt                            │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All operations run to completion before the next user action or scan
//! event is processed; the engine has no internal suspension points, so no
//! locking discipline is needed.

use chrono::Utc;
use tracing::{debug, info};

use kirana_core::{
    cart::ScanOutcome, catalog, sale, Cart, Catalog, Money, SaleHistory, SaleReceipt, StockLedger,
    UpiProfile,
};

use crate::error::StoreResult;
use crate::snapshot::BackupDocument;
use crate::tables::{
    InventoryRow, InventoryTable, JsonTableStore, BILL_HISTORY, INVENTORY, PRODUCT_DETAILS,
    UPI_DETAILS,
};

/// Owns the live application state and its persistence.
#[derive(Debug)]
pub struct PosEngine {
    store: JsonTableStore,
    catalog: Catalog,
    stock: StockLedger,
    history: SaleHistory,
    upi: UpiProfile,
    cart: Cart,
}

impl PosEngine {
    /// Loads all four tables from the store; missing tables start empty.
    pub fn open(store: JsonTableStore) -> StoreResult<Self> {
        let catalog: Catalog = store.load(PRODUCT_DETAILS)?.unwrap_or_default();

        let mut stock = StockLedger::new();
        let inventory: InventoryTable = store.load(INVENTORY)?.unwrap_or_default();
        for (code, row) in inventory {
            stock.set(code, row.quantity);
        }

        let history: SaleHistory = store.load(BILL_HISTORY)?.unwrap_or_default();
        let upi: UpiProfile = store.load(UPI_DETAILS)?.unwrap_or_default();

        debug!(
            products = catalog.len(),
            stock_rows = stock.len(),
            sales = history.len(),
            "engine state loaded"
        );

        Ok(PosEngine {
            store,
            catalog,
            stock,
            history,
            upi,
            cart: Cart::new(),
        })
    }

    // =========================================================================
    // Cart Operations (session state - never flushed)
    // =========================================================================

    /// Feeds one decoded scan into the cart engine.
    pub fn add_scan(&mut self, code: &str) -> StoreResult<ScanOutcome> {
        let outcome = self.cart.add_scan(code, &self.catalog, &self.stock)?;
        debug!(code = %code, ?outcome, "scan processed");
        Ok(outcome)
    }

    /// Edits a cart line's quantity.
    pub fn set_quantity(&mut self, code: &str, quantity: i64) -> StoreResult<()> {
        self.cart.set_quantity(code, quantity, &self.stock)?;
        Ok(())
    }

    /// Abandons the current sale.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }

    // =========================================================================
    // Maintenance Operations (flushed)
    // =========================================================================

    /// Saves or replaces a product and overwrites its stock level.
    pub fn upsert_product(
        &mut self,
        code: &str,
        name: &str,
        price: Money,
        quantity: i64,
    ) -> StoreResult<()> {
        catalog::upsert_product(&mut self.catalog, &mut self.stock, code, name, price, quantity)?;
        self.flush_catalog()?;
        self.flush_inventory()?;
        info!(code = %code, name = %name, %price, quantity, "product saved");
        Ok(())
    }

    /// Saves or replaces a customer identity.
    pub fn upsert_customer(&mut self, code: &str, name: &str, phone: &str) -> StoreResult<()> {
        catalog::upsert_customer(&mut self.catalog, &mut self.stock, code, name, phone)?;
        self.flush_catalog()?;
        self.flush_inventory()?;
        info!(code = %code, name = %name, "customer saved");
        Ok(())
    }

    /// Operator stock correction.
    pub fn adjust_stock(&mut self, code: &str, new_quantity: i64) -> StoreResult<()> {
        self.stock.adjust(code, new_quantity)?;
        self.flush_inventory()?;
        info!(code = %code, new_quantity, "stock adjusted");
        Ok(())
    }

    /// Saves the UPI payee profile.
    pub fn save_upi_profile(&mut self, profile: UpiProfile) -> StoreResult<()> {
        self.upi = profile;
        self.store.save(UPI_DETAILS, &self.upi)?;
        info!("UPI profile saved");
        Ok(())
    }

    // =========================================================================
    // Commit
    // =========================================================================

    /// Commits the current cart: debits stock, appends history, flushes
    /// both tables, and clears the cart.
    pub fn commit_sale(&mut self) -> StoreResult<SaleReceipt> {
        let receipt = sale::commit_sale(
            &self.cart,
            &self.catalog,
            &mut self.stock,
            &mut self.history,
            &self.upi,
            Utc::now(),
        )?;

        self.flush_inventory()?;
        self.store.save(BILL_HISTORY, &self.history)?;
        self.cart.clear();

        info!(
            total = %receipt.record.total(),
            lines = receipt.record.lines.len(),
            customer = receipt.customer.as_ref().map(|c| c.name()),
            "sale committed"
        );
        Ok(receipt)
    }

    // =========================================================================
    // Backup / Restore
    // =========================================================================

    /// Snapshot of all four tables as one document.
    pub fn export(&self) -> BackupDocument {
        BackupDocument {
            product_details: self
                .catalog
                .iter()
                .map(|entry| (entry.code().to_string(), entry.clone()))
                .collect(),
            inventory: self.inventory_table(),
            bill_history: self.history.records().to_vec(),
            upi_details: Some(self.upi.clone()).filter(|p| *p != UpiProfile::default()),
        }
    }

    /// Writes the backup document to a file.
    pub fn export_to(&self, path: &std::path::Path) -> StoreResult<()> {
        self.export().write_to(path)?;
        info!(path = %path.display(), "backup exported");
        Ok(())
    }

    /// Replaces ALL state with the document's contents and flushes every
    /// table. The live cart is discarded (it belongs to the old state).
    pub fn import(&mut self, doc: BackupDocument) -> StoreResult<()> {
        let mut catalog = Catalog::new();
        for (_, entry) in doc.product_details {
            catalog.upsert(entry);
        }

        let mut stock = StockLedger::new();
        for (code, row) in &doc.inventory {
            stock.set(code.clone(), row.quantity);
        }

        self.catalog = catalog;
        self.stock = stock;
        self.history = SaleHistory::new();
        for record in doc.bill_history {
            self.history.append(record);
        }
        self.upi = doc.upi_details.unwrap_or_default();
        self.cart.clear();

        self.flush_catalog()?;
        self.flush_inventory()?;
        self.store.save(BILL_HISTORY, &self.history)?;
        self.store.save(UPI_DETAILS, &self.upi)?;
        info!("backup imported");
        Ok(())
    }

    /// Reads a backup document from a file and imports it.
    pub fn import_from(&mut self, path: &std::path::Path) -> StoreResult<()> {
        let doc = BackupDocument::read_from(path)?;
        self.import(doc)
    }

    // =========================================================================
    // Read Accessors
    // =========================================================================

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn stock(&self) -> &StockLedger {
        &self.stock
    }

    pub fn history(&self) -> &SaleHistory {
        &self.history
    }

    pub fn upi_profile(&self) -> &UpiProfile {
        &self.upi
    }

    pub fn cart_total(&self) -> Money {
        self.cart.total(&self.catalog)
    }

    /// Sum of all committed sale totals, for the dashboard.
    pub fn total_sales(&self) -> Money {
        self.history.total_sales()
    }

    /// Products at or below the low-stock threshold, for the dashboard.
    pub fn low_stock(&self) -> impl Iterator<Item = (&str, i64)> {
        self.stock.low_stock()
    }

    // =========================================================================
    // Flush Helpers
    // =========================================================================

    fn flush_catalog(&self) -> StoreResult<()> {
        self.store.save(PRODUCT_DETAILS, &self.catalog)
    }

    fn flush_inventory(&self) -> StoreResult<()> {
        self.store.save(INVENTORY, &self.inventory_table())
    }

    /// Joins stock levels with catalog names/prices into the persisted
    /// inventory rows. Codes without a product entry cannot occur (customer
    /// upserts drop their stock row), but are skipped defensively.
    fn inventory_table(&self) -> InventoryTable {
        self.stock
            .iter()
            .filter_map(|(code, quantity)| {
                let entry = self.catalog.get(code)?;
                Some((
                    code.to_string(),
                    InventoryRow {
                        name: entry.name().to_string(),
                        price_paise: entry.price()?.paise(),
                        quantity,
                    },
                ))
            })
            .collect()
    }
}
