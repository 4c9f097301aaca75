//! # JSON Table Store
//!
//! A key-value store of JSON blobs: four logical tables, one file each,
//! under a single data directory.
//!
//! ```text
//! <data dir>/
//!   productDetails.json   code → CatalogEntry
//!   inventory.json        code → { name, pricePaise, quantity }
//!   billHistory.json      [ SaleRecord, ... ]
//!   upiDetails.json       UpiProfile
//! ```
//!
//! Tables are loaded and saved as whole values. Saves go through a temp
//! file renamed over the target, so a crash mid-write leaves the previous
//! file intact. A missing file reads as `None` (first run).

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{StoreError, StoreResult};

// =============================================================================
// Table Names
// =============================================================================

/// Catalog table: code → CatalogEntry.
pub const PRODUCT_DETAILS: &str = "productDetails";
/// Stock table: code → InventoryRow.
pub const INVENTORY: &str = "inventory";
/// Sale history table: ordered list of SaleRecord.
pub const BILL_HISTORY: &str = "billHistory";
/// UPI profile table: a single UpiProfile value.
pub const UPI_DETAILS: &str = "upiDetails";

const TABLE_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

// =============================================================================
// Inventory Row
// =============================================================================

/// One persisted inventory row.
///
/// Name and price mirror the catalog at save time, keeping the table layout
/// of the original deployment (each row is self-describing for external
/// readers). On load only `quantity` feeds the stock ledger; the catalog
/// table stays authoritative for name and price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRow {
    pub name: String,
    pub price_paise: i64,
    pub quantity: i64,
}

/// The inventory table as persisted.
pub type InventoryTable = BTreeMap<String, InventoryRow>;

// =============================================================================
// Store
// =============================================================================

/// Directory-backed store for the four tables.
#[derive(Debug, Clone)]
pub struct JsonTableStore {
    dir: PathBuf,
}

impl JsonTableStore {
    /// Opens (and creates if needed) the data directory.
    pub fn open(dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StoreError::Io {
            table: dir.display().to_string(),
            source,
        })?;
        Ok(JsonTableStore { dir })
    }

    /// The file backing a table.
    pub fn table_path(&self, table: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", table, TABLE_EXTENSION))
    }

    /// Loads a whole table. Missing file → `Ok(None)`.
    pub fn load<T: DeserializeOwned>(&self, table: &str) -> StoreResult<Option<T>> {
        let path = self.table_path(table);
        if !path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&path).map_err(|source| StoreError::Io {
            table: table.to_string(),
            source,
        })?;
        let value = serde_json::from_str(&data).map_err(|source| StoreError::Corrupt {
            table: table.to_string(),
            source,
        })?;
        Ok(Some(value))
    }

    /// Saves a whole table atomically: write `<table>.json.tmp`, then
    /// rename over the real file.
    pub fn save<T: Serialize>(&self, table: &str, value: &T) -> StoreResult<()> {
        let path = self.table_path(table);
        let data = serde_json::to_string_pretty(value).map_err(|source| StoreError::Corrupt {
            table: table.to_string(),
            source,
        })?;

        let tmp = tmp_path(&path);
        fs::write(&tmp, data.as_bytes()).map_err(|source| StoreError::Io {
            table: table.to_string(),
            source,
        })?;
        fs::rename(&tmp, &path).map_err(|source| StoreError::Io {
            table: table.to_string(),
            source,
        })?;

        debug!(table = %table, path = %path.display(), "table flushed");
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_table_reads_as_none() {
        let dir = tempdir().expect("tempdir");
        let store = JsonTableStore::open(dir.path()).expect("open store");

        let loaded: Option<InventoryTable> = store.load(INVENTORY).expect("load");
        assert!(loaded.is_none());
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = tempdir().expect("tempdir");
        let store = JsonTableStore::open(dir.path()).expect("open store");

        let mut table = InventoryTable::new();
        table.insert(
            "A1".to_string(),
            InventoryRow {
                name: "Tea Dust".to_string(),
                price_paise: 1000,
                quantity: 3,
            },
        );

        store.save(INVENTORY, &table).expect("save");
        let loaded: InventoryTable = store.load(INVENTORY).expect("load").expect("present");
        assert_eq!(loaded, table);

        // no temp file left behind
        assert!(!tmp_path(&store.table_path(INVENTORY)).exists());
    }

    #[test]
    fn test_corrupt_table_is_reported_not_swallowed() {
        let dir = tempdir().expect("tempdir");
        let store = JsonTableStore::open(dir.path()).expect("open store");

        std::fs::write(store.table_path(INVENTORY), b"{ not json").expect("write garbage");
        let err = store.load::<InventoryTable>(INVENTORY).unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { ref table, .. } if table == INVENTORY));
    }
}
