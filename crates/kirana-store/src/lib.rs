//! # kirana-store: Persistence and Engine Orchestration
//!
//! Everything between the pure core and the presentation layer:
//!
//! - [`tables`] - the four JSON tables (`productDetails`, `inventory`,
//!   `billHistory`, `upiDetails`), loaded as whole values and saved
//!   atomically (write temp file, rename over)
//! - [`snapshot`] - export/import of all four tables as one backup document
//! - [`engine`] - [`PosEngine`]: owns the application state, loads it at
//!   startup, routes every operation through kirana-core, and flushes the
//!   affected tables after each successful mutation
//! - [`error`] - storage failures ([`StoreError`]), transparently wrapping
//!   domain rejections from the core
//!
//! Persistence is synchronous and single-writer: the system has one logical
//! thread of control, so correctness rests on call ordering alone.

pub mod engine;
pub mod error;
pub mod snapshot;
pub mod tables;

pub use engine::PosEngine;
pub use error::{StoreError, StoreResult};
pub use snapshot::BackupDocument;
pub use tables::{InventoryRow, JsonTableStore};
