//! # Domain Types
//!
//! Core domain types used throughout Kirana POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                        Domain Types                              │
//! │                                                                  │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────┐      │
//! │  │  CatalogEntry  │  │   SaleRecord   │  │   UpiProfile   │      │
//! │  │  ────────────  │  │  ────────────  │  │  ────────────  │      │
//! │  │  Product{..}   │  │  timestamp     │  │  payee_id      │      │
//! │  │  Customer{..}  │  │  total_paise   │  │  payee_name    │      │
//! │  │                │  │  lines[]       │  │  note          │      │
//! │  └────────────────┘  └────────────────┘  └────────────────┘      │
//! │                                                                  │
//! │  A code identifies exactly ONE CatalogEntry variant at a time;   │
//! │  re-saving a code may flip it between Product and Customer.      │
//! └──────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Catalog Entry
// =============================================================================

/// A record the scanner can resolve a code to: either something sold
/// (a product) or someone the sale is attached to (a customer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CatalogEntry {
    /// A product available for sale.
    #[serde(rename_all = "camelCase")]
    Product {
        code: String,
        name: String,
        /// Unit price in paise.
        price_paise: i64,
    },

    /// A customer identity. Scanning one attaches the sale to that
    /// customer; it never contributes to the total.
    #[serde(rename_all = "camelCase")]
    Customer {
        code: String,
        name: String,
        /// Stored verbatim; no format validation beyond non-empty.
        phone: String,
    },
}

impl CatalogEntry {
    /// The scanned code this entry is keyed by.
    pub fn code(&self) -> &str {
        match self {
            CatalogEntry::Product { code, .. } | CatalogEntry::Customer { code, .. } => code,
        }
    }

    /// Display name.
    pub fn name(&self) -> &str {
        match self {
            CatalogEntry::Product { name, .. } | CatalogEntry::Customer { name, .. } => name,
        }
    }

    /// Whether this entry is a customer identity.
    pub fn is_customer(&self) -> bool {
        matches!(self, CatalogEntry::Customer { .. })
    }

    /// Unit price for products, `None` for customers.
    pub fn price(&self) -> Option<Money> {
        match self {
            CatalogEntry::Product { price_paise, .. } => Some(Money::from_paise(*price_paise)),
            CatalogEntry::Customer { .. } => None,
        }
    }
}

// =============================================================================
// Sale Line
// =============================================================================

/// A product line in a committed sale.
///
/// Uses the snapshot pattern: name and unit price are frozen at commit time
/// so history stays correct even if the catalog changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleLine {
    pub code: String,
    /// Product name at commit time (frozen).
    pub name: String,
    /// Unit price in paise at commit time (frozen).
    pub unit_price_paise: i64,
    pub quantity: i64,
}

impl SaleLine {
    /// Returns the frozen unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_paise(self.unit_price_paise)
    }

    /// Line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Sale Record
// =============================================================================

/// A committed sale. Immutable once appended to history.
///
/// Customer lines are excluded from `lines` and from `total_paise`;
/// customer identification does not contribute to price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRecord {
    pub timestamp: DateTime<Utc>,
    /// Sale total in paise.
    pub total_paise: i64,
    pub lines: Vec<SaleLine>,
}

impl SaleRecord {
    /// Returns the sale total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_paise(self.total_paise)
    }
}

// =============================================================================
// UPI Profile
// =============================================================================

/// The payee details encoded into every payment-request URI.
///
/// Must be fully populated before a sale can be billed; see
/// [`UpiProfile::is_complete`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpiProfile {
    /// UPI virtual payment address, e.g. `shop@upi`.
    pub payee_id: String,
    /// Payee display name (`pn=`).
    pub payee_name: String,
    /// Transaction note (`tn=`).
    pub note: String,
}

impl UpiProfile {
    pub fn new(
        payee_id: impl Into<String>,
        payee_name: impl Into<String>,
        note: impl Into<String>,
    ) -> Self {
        UpiProfile {
            payee_id: payee_id.into(),
            payee_name: payee_name.into(),
            note: note.into(),
        }
    }

    /// True when every field is non-blank. Billing is refused otherwise.
    pub fn is_complete(&self) -> bool {
        !self.payee_id.trim().is_empty()
            && !self.payee_name.trim().is_empty()
            && !self.note.trim().is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
