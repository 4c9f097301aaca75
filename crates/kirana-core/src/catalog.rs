//! # Catalog Store
//!
//! Mapping from scanned code to [`CatalogEntry`], plus the maintenance
//! operations that keep the catalog and the stock ledger consistent.
//!
//! ## Maintenance Rules
//! ```text
//! ┌────────────────────────────────────────────────────────────────────┐
//! │  upsert_product(code, name, price, qty)                            │
//! │    price > 0, code/name non-empty, qty >= 0                        │
//! │    → catalog[code] = Product  AND  stock[code] = qty (overwrite)   │
//! │                                                                    │
//! │  upsert_customer(code, name, phone)                                │
//! │    code/name/phone non-empty                                       │
//! │    → catalog[code] = Customer AND  stock row removed               │
//! │                                                                    │
//! │  A code maps to exactly one variant at a time; re-saving may flip  │
//! │  it between Product and Customer.                                  │
//! └────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreResult;
use crate::money::Money;
use crate::stock::StockLedger;
use crate::types::CatalogEntry;
use crate::validation::{
    validate_code, validate_name, validate_phone, validate_price, validate_stock_level,
};

/// Code → entry mapping. No logic beyond lookup; the business rules live in
/// the upsert functions below and in the cart engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    entries: BTreeMap<String, CatalogEntry>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Catalog::default()
    }

    /// Looks up the entry for a code.
    pub fn get(&self, code: &str) -> Option<&CatalogEntry> {
        self.entries.get(code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.entries.contains_key(code)
    }

    /// Replaces whatever was at the entry's code.
    pub fn upsert(&mut self, entry: CatalogEntry) {
        self.entries.insert(entry.code().to_string(), entry);
    }

    /// Iterates entries in code order.
    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =============================================================================
// Maintenance Operations
// =============================================================================

/// Saves (or replaces) a product and overwrites its stock level.
///
/// Rejects with `InvalidProduct` on blank code/name or non-positive price,
/// and `InvalidQuantity` on a negative stock quantity. On rejection neither
/// the catalog nor the ledger is touched.
pub fn upsert_product(
    catalog: &mut Catalog,
    stock: &mut StockLedger,
    code: &str,
    name: &str,
    price: Money,
    quantity: i64,
) -> CoreResult<()> {
    validate_code(code)?;
    validate_name(name)?;
    validate_price(price)?;
    validate_stock_level(quantity)?;

    let code = code.trim();
    catalog.upsert(CatalogEntry::Product {
        code: code.to_string(),
        name: name.trim().to_string(),
        price_paise: price.paise(),
    });
    stock.set(code, quantity);
    Ok(())
}

/// Saves (or replaces) a customer identity.
///
/// Any stock row at that code is dropped: a code holds one variant at a
/// time, and customers carry no stock.
pub fn upsert_customer(
    catalog: &mut Catalog,
    stock: &mut StockLedger,
    code: &str,
    name: &str,
    phone: &str,
) -> CoreResult<()> {
    validate_code(code)?;
    validate_name(name)?;
    validate_phone(phone)?;

    let code = code.trim();
    catalog.upsert(CatalogEntry::Customer {
        code: code.to_string(),
        name: name.trim().to_string(),
        phone: phone.trim().to_string(),
    });
    stock.remove(code);
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
