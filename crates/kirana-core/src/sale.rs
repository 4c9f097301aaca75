//! # Sale Committer & History
//!
//! Finalizing a cart into a persisted [`SaleRecord`] and debiting stock.
//!
//! ## Commit Sequence
//! ```text
//! ┌────────────────────────────────────────────────────────────────────┐
//! │  commit_sale(cart, catalog, stock, history, upi, now)              │
//! │                                                                    │
//! │  1. upi incomplete? ────────────► Err(ConfigurationMissing),       │
//! │                                   NO side effects                  │
//! │  2. total = cart.total()                                           │
//! │  3. partition: product lines (snapshotted) + optional customer     │
//! │  4. debit stock per product line, clamped at 0                     │
//! │  5. append SaleRecord {now, total, lines}                          │
//! │  6. return receipt {record, customer?}                             │
//! │                                                                    │
//! │  Steps 4-5 are one effective unit: the system is single-threaded   │
//! │  and run-to-completion, so no partial commit is observable and no  │
//! │  rollback path exists. Only step 1 can fail.                       │
//! └────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The committer does NOT clear the cart: cart-state ownership stays with
//! the cart engine. Every caller clears immediately after a successful
//! commit (the expected usage contract).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::catalog::Catalog;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::stock::StockLedger;
use crate::types::{CatalogEntry, SaleLine, SaleRecord, UpiProfile};

// =============================================================================
// Sale History
// =============================================================================

/// Append-only ordered sequence of committed sales.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SaleHistory {
    records: Vec<SaleRecord>,
}

impl SaleHistory {
    pub fn new() -> Self {
        SaleHistory::default()
    }

    /// Appends a committed record. There is no removal or edit operation;
    /// history only grows.
    pub fn append(&mut self, record: SaleRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[SaleRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sum of all committed totals, for the dashboard.
    pub fn total_sales(&self) -> Money {
        self.records.iter().map(|r| r.total()).sum()
    }
}

// =============================================================================
// Sale Receipt
// =============================================================================

/// What `commit_sale` hands back so the caller can route delivery
/// (print/share) without the committer knowing about presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleReceipt {
    /// The record that was appended to history.
    pub record: SaleRecord,
    /// The attached customer entry, if the cart carried one.
    /// Always the `Customer` variant.
    pub customer: Option<CatalogEntry>,
}

// =============================================================================
// Commit
// =============================================================================

/// Validates, totals, debits stock, and appends the sale to history.
///
/// The timestamp is passed in by the caller so the core stays deterministic
/// under test; the engine passes `Utc::now()`.
pub fn commit_sale(
    cart: &Cart,
    catalog: &Catalog,
    stock: &mut StockLedger,
    history: &mut SaleHistory,
    upi: &UpiProfile,
    timestamp: DateTime<Utc>,
) -> CoreResult<SaleReceipt> {
    if !upi.is_complete() {
        return Err(CoreError::ConfigurationMissing);
    }

    let total = cart.total(catalog);

    // Snapshot product lines: name and price frozen at commit time.
    let lines: Vec<SaleLine> = cart
        .product_lines(catalog)
        .filter_map(|line| {
            let entry = catalog.get(&line.code)?;
            Some(SaleLine {
                code: line.code.clone(),
                name: entry.name().to_string(),
                unit_price_paise: entry.price()?.paise(),
                quantity: line.quantity,
            })
        })
        .collect();

    // Defensive clamp: validation already happened at scan/edit time, but
    // commit never throws on an attempted overdraw.
    for line in &lines {
        stock.debit_clamped(&line.code, line.quantity);
    }

    let record = SaleRecord {
        timestamp,
        total_paise: total.paise(),
        lines,
    };
    history.append(record.clone());

    let customer = cart
        .customer_line(catalog)
        .and_then(|line| catalog.get(&line.code))
        .cloned();

    Ok(SaleReceipt { record, customer })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{upsert_customer, upsert_product};

    fn fixture() -> (Catalog, StockLedger, UpiProfile) {
        let mut catalog = Catalog::new();
        let mut stock = StockLedger::new();
        upsert_product(
            &mut catalog,
            &mut stock,
            "A1",
            "Tea Dust",
            Money::from_paise(1000),
            3,
        )
        .unwrap();
        upsert_product(
            &mut catalog,
            &mut stock,
            "B2",
            "Sugar 1kg",
            Money::from_paise(4550),
            10,
        )
        .unwrap();
        upsert_customer(&mut catalog, &mut stock, "cust1", "Asha", "9876543210").unwrap();
        let upi = UpiProfile::new("shop@upi", "Kirana Stores", "Groceries");
        (catalog, stock, upi)
    }

    fn scanned_cart(catalog: &Catalog, stock: &StockLedger, codes: &[&str]) -> Cart {
        let mut cart = Cart::new();
        for code in codes {
            cart.add_scan(code, catalog, stock).unwrap();
        }
        cart
    }

    #[test]
    fn test_commit_requires_complete_upi_profile() {
        let (catalog, mut stock, _) = fixture();
        let mut history = SaleHistory::new();
        let cart = scanned_cart(&catalog, &stock, &["A1"]);

        let err = commit_sale(
            &cart,
            &catalog,
            &mut stock,
            &mut history,
            &UpiProfile::default(),
            Utc::now(),
        )
        .unwrap_err();

        assert_eq!(err, CoreError::ConfigurationMissing);
        // no side effects
        assert_eq!(stock.available("A1"), 3);
        assert!(history.is_empty());
    }

    #[test]
    fn test_commit_debits_stock_and_appends_history() {
        let (catalog, mut stock, upi) = fixture();
        let mut history = SaleHistory::new();
        let mut cart = scanned_cart(&catalog, &stock, &["A1", "B2"]);
        cart.set_quantity("A1", 3, &stock).unwrap();

        let receipt =
            commit_sale(&cart, &catalog, &mut stock, &mut history, &upi, Utc::now()).unwrap();

        // 3 × 10.00 + 45.50
        assert_eq!(receipt.record.total(), Money::from_paise(7550));
        assert_eq!(stock.available("A1"), 0);
        assert_eq!(stock.available("B2"), 9);
        assert_eq!(history.len(), 1);
        assert_eq!(history.records()[0], receipt.record);
    }

    #[test]
    fn test_commit_excludes_customer_from_lines_and_total() {
        let (catalog, mut stock, upi) = fixture();
        let mut history = SaleHistory::new();
        let cart = scanned_cart(&catalog, &stock, &["cust1", "A1"]);

        let receipt =
            commit_sale(&cart, &catalog, &mut stock, &mut history, &upi, Utc::now()).unwrap();

        assert_eq!(receipt.record.lines.len(), 1);
        assert_eq!(receipt.record.lines[0].code, "A1");
        assert_eq!(receipt.record.total(), Money::from_paise(1000));

        let customer = receipt.customer.expect("customer attached");
        assert_eq!(customer.name(), "Asha");
        assert!(customer.is_customer());
    }

    #[test]
    fn test_commit_snapshot_survives_catalog_change() {
        let (mut catalog, mut stock, upi) = fixture();
        let mut history = SaleHistory::new();
        let cart = scanned_cart(&catalog, &stock, &["A1"]);

        commit_sale(&cart, &catalog, &mut stock, &mut history, &upi, Utc::now()).unwrap();

        // re-price the product after the sale
        upsert_product(
            &mut catalog,
            &mut stock,
            "A1",
            "Tea Dust",
            Money::from_paise(9999),
            5,
        )
        .unwrap();

        let line = &history.records()[0].lines[0];
        assert_eq!(line.unit_price_paise, 1000);
        assert_eq!(line.name, "Tea Dust");
    }

    #[test]
    fn test_commit_clamps_overdraw_at_zero() {
        let (catalog, mut stock, upi) = fixture();
        let mut history = SaleHistory::new();
        let mut cart = scanned_cart(&catalog, &stock, &["A1"]);
        cart.set_quantity("A1", 2, &stock).unwrap();

        // stock shrank between the edit and the commit
        stock.set("A1", 1);
        commit_sale(&cart, &catalog, &mut stock, &mut history, &upi, Utc::now()).unwrap();

        assert_eq!(stock.available("A1"), 0);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_empty_cart_commits_a_zero_record() {
        let (catalog, mut stock, upi) = fixture();
        let mut history = SaleHistory::new();
        let cart = Cart::new();

        let receipt =
            commit_sale(&cart, &catalog, &mut stock, &mut history, &upi, Utc::now()).unwrap();

        assert!(receipt.record.lines.is_empty());
        assert!(receipt.record.total().is_zero());
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_total_sales_accumulates() {
        let (catalog, mut stock, upi) = fixture();
        let mut history = SaleHistory::new();

        let cart = scanned_cart(&catalog, &stock, &["A1"]);
        commit_sale(&cart, &catalog, &mut stock, &mut history, &upi, Utc::now()).unwrap();
        let cart = scanned_cart(&catalog, &stock, &["B2"]);
        commit_sale(&cart, &catalog, &mut stock, &mut history, &upi, Utc::now()).unwrap();

        assert_eq!(history.total_sales(), Money::from_paise(5550));
    }
}
