//! # Cart Engine
//!
//! The in-memory, session-scoped cart and the rules governing how scanned
//! codes mutate it.
//!
//! ## Scan Decision Table
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │  add_scan(code)                                                      │
//! │                                                                      │
//! │  same code as last scan ───────────► Debounced (no mutation)         │
//! │  unknown code ─────────────────────► Err(NotFound)                   │
//! │  customer ─────────────────────────► replace existing customer line, │
//! │                                      append {code, qty 1}            │
//! │  product already in cart ──────────► AlreadyInCart (qty unchanged)   │
//! │  product, stock > 0 ───────────────► append {code, qty 1}            │
//! │  product, stock exhausted ─────────► Err(OutOfStock)                 │
//! │                                                                      │
//! │  The debounce key is the LAST SCANNED CODE, not a time window: a     │
//! │  continuous-scan camera re-emits the same decode many times per      │
//! │  second, and only a different code re-arms the scanner. Any known    │
//! │  code re-arms it, including one rejected for stock.                  │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - At most one line per product code.
//! - At most one customer line; scanning a second customer replaces the
//!   first ("attach sale to this customer", not "add customer as item").
//! - Quantities are positive integers, validated against live stock.
//! - The cart is never persisted; it exists for one session only.

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::stock::StockLedger;
use crate::types::CatalogEntry;
use crate::validation::validate_quantity;

// =============================================================================
// Cart Line
// =============================================================================

/// One `{code, quantity}` entry in the live cart.
///
/// Deliberately NOT a snapshot: the cart always prices against the live
/// catalog. Freezing happens at commit time, in [`crate::sale`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub code: String,
    pub quantity: i64,
}

// =============================================================================
// Scan Outcome
// =============================================================================

/// What a successful `add_scan` did, so the presentation layer can react
/// without re-deriving it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    /// A new product line was appended with quantity 1.
    Added,
    /// The scan attached (or re-attached) a customer to the cart.
    CustomerAttached,
    /// The product is already in the cart; quantity left unchanged.
    /// Repeat scans never increment - quantity is edited explicitly.
    AlreadyInCart,
    /// Identical consecutive scan suppressed; nothing happened.
    Debounced,
}

// =============================================================================
// Cart
// =============================================================================

/// The in-progress, unsaved transaction.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
    /// Continuous-scan debounce: the last code the scanner resolved.
    last_scanned: Option<String>,
}

impl Cart {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Processes one decoded scan against the catalog and stock ledger.
    pub fn add_scan(
        &mut self,
        code: &str,
        catalog: &Catalog,
        stock: &StockLedger,
    ) -> CoreResult<ScanOutcome> {
        if self.last_scanned.as_deref() == Some(code) {
            return Ok(ScanOutcome::Debounced);
        }

        let entry = catalog
            .get(code)
            .ok_or_else(|| CoreError::NotFound(code.to_string()))?;

        // Re-arm the debounce for every known code, even when the scan is
        // then rejected for stock. Unknown codes never touch it.
        self.last_scanned = Some(code.to_string());

        if self.lines.iter().any(|line| line.code == code) {
            return Ok(ScanOutcome::AlreadyInCart);
        }

        match entry {
            CatalogEntry::Customer { .. } => {
                // one customer identity per cart: the new scan replaces it
                self.lines
                    .retain(|line| !catalog.get(&line.code).is_some_and(|e| e.is_customer()));
                self.lines.push(CartLine {
                    code: code.to_string(),
                    quantity: 1,
                });
                Ok(ScanOutcome::CustomerAttached)
            }
            CatalogEntry::Product { name, .. } => {
                if stock.available(code) > 0 {
                    self.lines.push(CartLine {
                        code: code.to_string(),
                        quantity: 1,
                    });
                    Ok(ScanOutcome::Added)
                } else {
                    Err(CoreError::OutOfStock {
                        code: code.to_string(),
                        name: name.clone(),
                    })
                }
            }
        }
    }

    /// Sets a line's quantity after validating it against live stock.
    ///
    /// On any rejection the line is left unchanged so the caller can
    /// re-display the old value.
    pub fn set_quantity(&mut self, code: &str, quantity: i64, stock: &StockLedger) -> CoreResult<()> {
        validate_quantity(quantity)?;

        let available = stock.available(code);
        if quantity > available {
            return Err(CoreError::InsufficientStock {
                code: code.to_string(),
                available,
                requested: quantity,
            });
        }

        let line = self
            .lines
            .iter_mut()
            .find(|line| line.code == code)
            .ok_or_else(|| CoreError::NotFound(code.to_string()))?;
        line.quantity = quantity;
        Ok(())
    }

    /// Cart total: product lines only, customer lines contribute zero.
    pub fn total(&self, catalog: &Catalog) -> Money {
        self.lines
            .iter()
            .filter_map(|line| {
                catalog
                    .get(&line.code)
                    .and_then(|entry| entry.price())
                    .map(|price| price.multiply_quantity(line.quantity))
            })
            .sum()
    }

    /// Empties the cart unconditionally and re-arms the scanner debounce.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.last_scanned = None;
    }

    /// All lines, in scan order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// The customer line, if one is attached.
    pub fn customer_line<'a>(&'a self, catalog: &Catalog) -> Option<&'a CartLine> {
        self.lines
            .iter()
            .find(|line| catalog.get(&line.code).is_some_and(|e| e.is_customer()))
    }

    /// Product-backed lines only, in scan order.
    pub fn product_lines<'a>(&'a self, catalog: &'a Catalog) -> impl Iterator<Item = &'a CartLine> {
        self.lines
            .iter()
            .filter(|line| matches!(catalog.get(&line.code), Some(e) if !e.is_customer()))
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
