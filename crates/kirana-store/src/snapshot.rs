//! # Backup Document
//!
//! Export/import of the union of all four tables as one JSON document, for
//! backup and restore across devices or reinstalls.
//!
//! The document's field names match the table names, so a backup is
//! readable next to the live data directory.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use kirana_core::{CatalogEntry, SaleRecord, UpiProfile};

use crate::error::{StoreError, StoreResult};
use crate::tables::InventoryTable;

/// The union of all four persisted tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupDocument {
    #[serde(default)]
    pub product_details: BTreeMap<String, CatalogEntry>,
    #[serde(default)]
    pub inventory: InventoryTable,
    #[serde(default)]
    pub bill_history: Vec<SaleRecord>,
    #[serde(default)]
    pub upi_details: Option<UpiProfile>,
}

impl BackupDocument {
    /// Writes the document as pretty JSON.
    pub fn write_to(&self, path: &Path) -> StoreResult<()> {
        let data = serde_json::to_string_pretty(self).map_err(|err| StoreError::Backup {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
        fs::write(path, data.as_bytes()).map_err(|err| StoreError::Backup {
            path: path.display().to_string(),
            message: err.to_string(),
        })
    }

    /// Reads a document back. Missing fields default to empty tables, so a
    /// partial backup still imports.
    pub fn read_from(path: &Path) -> StoreResult<Self> {
        let data = fs::read_to_string(path).map_err(|err| StoreError::Backup {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
        serde_json::from_str(&data).map_err(|err| StoreError::Backup {
            path: path.display().to_string(),
            message: err.to_string(),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::InventoryRow;
    use tempfile::tempdir;

    #[test]
    fn test_backup_file_round_trips() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("backup.json");

        let mut doc = BackupDocument::default();
        doc.product_details.insert(
            "A1".to_string(),
            CatalogEntry::Product {
                code: "A1".to_string(),
                name: "Tea Dust".to_string(),
                price_paise: 1000,
            },
        );
        doc.inventory.insert(
            "A1".to_string(),
            InventoryRow {
                name: "Tea Dust".to_string(),
                price_paise: 1000,
                quantity: 3,
            },
        );
        doc.upi_details = Some(UpiProfile::new("shop@upi", "Kirana Stores", "Groceries"));

        doc.write_to(&path).expect("write backup");
        let loaded = BackupDocument::read_from(&path).expect("read backup");
        assert_eq!(loaded, doc);
    }

    #[test]
    fn test_partial_document_defaults_empty() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("partial.json");
        fs::write(&path, b"{\"billHistory\": []}").expect("write");

        let doc = BackupDocument::read_from(&path).expect("read");
        assert!(doc.product_details.is_empty());
        assert!(doc.upi_details.is_none());
    }
}
