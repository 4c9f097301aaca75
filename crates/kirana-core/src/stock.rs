//! # Stock Ledger
//!
//! Remaining quantity per product code.
//!
//! ## Invariants
//! - A quantity never goes negative: a debit that would underflow clamps to
//!   zero (no back-order tracking).
//! - Only confirmed sales and explicit maintenance operations mutate levels.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::validation::validate_stock_level;
use crate::LOW_STOCK_THRESHOLD;

/// Mapping from product code to remaining quantity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StockLedger {
    levels: BTreeMap<String, i64>,
}

impl StockLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        StockLedger::default()
    }

    /// Remaining quantity for a code. Codes without a row read as zero,
    /// so customers and unknown codes are simply "out of stock".
    pub fn available(&self, code: &str) -> i64 {
        self.levels.get(code).copied().unwrap_or(0)
    }

    /// Whether the ledger tracks this code at all.
    pub fn contains(&self, code: &str) -> bool {
        self.levels.contains_key(code)
    }

    /// Sets a level outright (product upsert overwrites, never increments).
    pub fn set(&mut self, code: impl Into<String>, quantity: i64) {
        self.levels.insert(code.into(), quantity);
    }

    /// Drops the row for a code (the code became a customer).
    pub fn remove(&mut self, code: &str) {
        self.levels.remove(code);
    }

    /// Operator stock correction. Zero is allowed, negative is rejected,
    /// and the code must already be tracked.
    pub fn adjust(&mut self, code: &str, new_quantity: i64) -> CoreResult<()> {
        validate_stock_level(new_quantity)?;
        match self.levels.get_mut(code) {
            Some(level) => {
                *level = new_quantity;
                Ok(())
            }
            None => Err(CoreError::NotFound(code.to_string())),
        }
    }

    /// Debits a sale quantity, clamping at zero. Returns the new level.
    ///
    /// Commit-time debits never fail: quantity validation already happened
    /// at scan/edit time, and the clamp absorbs any residual overdraw.
    pub fn debit_clamped(&mut self, code: &str, quantity: i64) -> i64 {
        match self.levels.get_mut(code) {
            Some(level) => {
                *level = (*level - quantity).max(0);
                *level
            }
            None => 0,
        }
    }

    /// Codes at or below the low-stock threshold, for the dashboard.
    pub fn low_stock(&self) -> impl Iterator<Item = (&str, i64)> {
        self.levels
            .iter()
            .filter(|(_, &qty)| qty <= LOW_STOCK_THRESHOLD)
            .map(|(code, &qty)| (code.as_str(), qty))
    }

    /// Iterates all (code, quantity) rows in code order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.levels.iter().map(|(code, &qty)| (code.as_str(), qty))
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
