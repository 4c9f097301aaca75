//! # kirana-core: Pure Business Logic for Kirana POS
//!
//! This crate is the heart of Kirana POS: the cart/inventory reconciliation
//! engine and everything it needs, as pure functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌────────────────────────────────────────────────────────────────────┐
//! │                      Kirana POS Architecture                       │
//! │                                                                    │
//! │  ┌──────────────────────────────────────────────────────────────┐  │
//! │  │                    apps/cli (REPL)                           │  │
//! │  │   scan ──► qty ──► bill          product / customer / stock  │  │
//! │  └─────────────────────────────┬────────────────────────────────┘  │
//! │                                │                                   │
//! │  ┌─────────────────────────────▼────────────────────────────────┐  │
//! │  │              kirana-store (PosEngine + JSON tables)          │  │
//! │  │   load at startup ── flush after every mutation              │  │
//! │  └─────────────────────────────┬────────────────────────────────┘  │
//! │                                │                                   │
//! │  ┌─────────────────────────────▼────────────────────────────────┐  │
//! │  │               ★ kirana-core (THIS CRATE) ★                   │  │
//! │  │                                                              │  │
//! │  │   ┌────────┐ ┌────────┐ ┌────────┐ ┌────────┐ ┌─────────┐   │  │
//! │  │   │ money  │ │  cart  │ │  sale  │ │  upi   │ │ invoice │   │  │
//! │  │   └────────┘ └────────┘ └────────┘ └────────┘ └─────────┘   │  │
//! │  │   ┌────────┐ ┌────────┐ ┌────────┐ ┌────────────┐           │  │
//! │  │   │ types  │ │catalog │ │ stock  │ │ validation │           │  │
//! │  │   └────────┘ └────────┘ └────────┘ └────────────┘           │  │
//! │  │                                                              │  │
//! │  │   NO I/O • NO CLOCK READS • PURE FUNCTIONS                   │  │
//! │  └──────────────────────────────────────────────────────────────┘  │
//! └────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (CatalogEntry, SaleRecord, UpiProfile, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - The six recoverable domain error kinds
//! - [`catalog`] - Code → entry mapping plus the maintenance operations
//! - [`stock`] - Stock ledger with clamped debits
//! - [`cart`] - The cart engine: scans, quantity edits, totals
//! - [`sale`] - Sale history and the sale committer
//! - [`upi`] - `upi://pay` payment-request URI construction
//! - [`invoice`] - Plain-text invoice rendering
//! - [`validation`] - Field validation shared by the maintenance operations
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output; commit timestamps are
//!    passed in by the caller, never read from a clock here
//! 2. **Integer Money**: all monetary values are paise (i64), so 2-decimal
//!    currency arithmetic is exact
//! 3. **Explicit Errors**: every failure is a typed [`error::CoreError`]
//!    variant; a rejected operation leaves state untouched
//!
//! ## Example
//!
//! ```rust
//! use kirana_core::{Cart, Catalog, StockLedger, Money};
//!
//! let mut catalog = Catalog::new();
//! let mut stock = StockLedger::new();
//! kirana_core::catalog::upsert_product(
//!     &mut catalog, &mut stock, "A1", "Tea Dust", Money::from_paise(1000), 3,
//! ).unwrap();
//!
//! let mut cart = Cart::new();
//! cart.add_scan("A1", &catalog, &stock).unwrap();
//! assert_eq!(cart.total(&catalog), Money::from_paise(1000));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod invoice;
pub mod money;
pub mod sale;
pub mod stock;
pub mod types;
pub mod upi;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLine, ScanOutcome};
pub use catalog::Catalog;
pub use error::{CoreError, CoreResult};
pub use money::Money;
pub use sale::{SaleHistory, SaleReceipt};
pub use stock::StockLedger;
pub use types::{CatalogEntry, SaleLine, SaleRecord, UpiProfile};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Stock level at or below which a product appears on the dashboard's
/// low-stock list.
pub const LOW_STOCK_THRESHOLD: i64 = 5;
