//! End-to-end engine tests: real files in a temp directory, full
//! scan → edit → commit → reopen cycles.

use tempfile::tempdir;

use kirana_core::{CoreError, Money, ScanOutcome, UpiProfile};
use kirana_store::{JsonTableStore, PosEngine, StoreError};

fn engine_in(dir: &std::path::Path) -> PosEngine {
    let store = JsonTableStore::open(dir).expect("open store");
    PosEngine::open(store).expect("open engine")
}

fn seeded_engine(dir: &std::path::Path) -> PosEngine {
    let mut engine = engine_in(dir);
    engine
        .upsert_product("A1", "Tea Dust", Money::from_paise(1000), 3)
        .expect("product A1");
    engine
        .upsert_product("B2", "Sugar 1kg", Money::from_paise(4550), 10)
        .expect("product B2");
    engine
        .upsert_customer("cust1", "Asha", "9876543210")
        .expect("customer");
    engine
        .save_upi_profile(UpiProfile::new("shop@upi", "Kirana Stores", "Groceries"))
        .expect("upi profile");
    engine
}

#[test]
fn test_fresh_directory_opens_empty() {
    let dir = tempdir().expect("tempdir");
    let engine = engine_in(dir.path());

    assert!(engine.catalog().is_empty());
    assert!(engine.stock().is_empty());
    assert!(engine.history().is_empty());
    assert!(!engine.upi_profile().is_complete());
    assert!(engine.cart().is_empty());
}

#[test]
fn test_state_survives_reopen() {
    let dir = tempdir().expect("tempdir");
    seeded_engine(dir.path());

    let reopened = engine_in(dir.path());
    assert_eq!(reopened.catalog().len(), 3);
    assert_eq!(reopened.stock().available("A1"), 3);
    assert_eq!(reopened.stock().available("B2"), 10);
    assert_eq!(reopened.catalog().get("A1").expect("A1").name(), "Tea Dust");
    assert!(reopened.catalog().get("cust1").expect("cust1").is_customer());
    assert_eq!(reopened.upi_profile().payee_id, "shop@upi");
}

#[test]
fn test_cart_is_session_state_not_persisted() {
    let dir = tempdir().expect("tempdir");
    let mut engine = seeded_engine(dir.path());
    engine.add_scan("A1").expect("scan");
    assert_eq!(engine.cart().len(), 1);

    let reopened = engine_in(dir.path());
    assert!(reopened.cart().is_empty());
}

#[test]
fn test_full_sale_cycle() {
    // A1: stock 3 at 10.00. Scan once, push quantity to the limit, bill.
    let dir = tempdir().expect("tempdir");
    let mut engine = seeded_engine(dir.path());

    assert_eq!(engine.add_scan("A1").expect("scan"), ScanOutcome::Added);

    // over the stock limit
    let err = engine.set_quantity("A1", 5).expect_err("over stock");
    assert!(matches!(
        err,
        StoreError::Core(CoreError::InsufficientStock {
            available: 3,
            requested: 5,
            ..
        })
    ));
    assert_eq!(engine.cart().lines()[0].quantity, 1);

    // exactly the stock limit
    engine.set_quantity("A1", 3).expect("qty 3");
    assert_eq!(engine.cart_total().to_decimal_string(), "30.00");

    let receipt = engine.commit_sale().expect("commit");
    assert_eq!(receipt.record.total(), Money::from_paise(3000));
    assert_eq!(engine.stock().available("A1"), 0);
    assert_eq!(engine.history().len(), 1);
    assert!(engine.cart().is_empty());

    // both flushes landed on disk
    let reopened = engine_in(dir.path());
    assert_eq!(reopened.stock().available("A1"), 0);
    assert_eq!(reopened.history().len(), 1);
    assert_eq!(reopened.history().records()[0].lines[0].name, "Tea Dust");
    assert_eq!(reopened.total_sales(), Money::from_paise(3000));
}

#[test]
fn test_commit_refused_without_upi_profile() {
    let dir = tempdir().expect("tempdir");
    let mut engine = engine_in(dir.path());
    engine
        .upsert_product("A1", "Tea Dust", Money::from_paise(1000), 3)
        .expect("product");
    engine.add_scan("A1").expect("scan");

    let err = engine.commit_sale().expect_err("no upi profile");
    assert!(matches!(
        err,
        StoreError::Core(CoreError::ConfigurationMissing)
    ));

    // nothing was debited or recorded, and the cart is still live
    assert_eq!(engine.stock().available("A1"), 3);
    assert!(engine.history().is_empty());
    assert_eq!(engine.cart().len(), 1);
}

#[test]
fn test_customer_scan_attaches_to_receipt() {
    let dir = tempdir().expect("tempdir");
    let mut engine = seeded_engine(dir.path());

    assert_eq!(
        engine.add_scan("cust1").expect("customer scan"),
        ScanOutcome::CustomerAttached
    );
    engine.add_scan("A1").expect("product scan");

    let receipt = engine.commit_sale().expect("commit");
    assert_eq!(receipt.customer.expect("customer").name(), "Asha");
    assert_eq!(receipt.record.lines.len(), 1);
    assert_eq!(receipt.record.total(), Money::from_paise(1000));
}

#[test]
fn test_adjust_stock_persists() {
    let dir = tempdir().expect("tempdir");
    let mut engine = seeded_engine(dir.path());

    engine.adjust_stock("B2", 2).expect("adjust");
    let err = engine.adjust_stock("X9", 5).expect_err("unknown code");
    assert!(matches!(err, StoreError::Core(CoreError::NotFound(_))));

    let reopened = engine_in(dir.path());
    assert_eq!(reopened.stock().available("B2"), 2);
}

#[test]
fn test_low_stock_report() {
    let dir = tempdir().expect("tempdir");
    let engine = seeded_engine(dir.path());

    // A1 at 3 is at or below the threshold; B2 at 10 is not
    let low: Vec<_> = engine.stock().low_stock().collect();
    assert_eq!(low, vec![("A1", 3)]);
}

#[test]
fn test_backup_round_trip_into_fresh_store() {
    let source_dir = tempdir().expect("tempdir");
    let target_dir = tempdir().expect("tempdir");
    let backup = source_dir.path().join("backup.json");

    let mut source = seeded_engine(source_dir.path());
    source.add_scan("A1").expect("scan");
    source.commit_sale().expect("commit");
    source.export_to(&backup).expect("export");

    let mut target = engine_in(target_dir.path());
    target.import_from(&backup).expect("import");

    assert_eq!(target.catalog().len(), 3);
    assert_eq!(target.stock().available("A1"), 2);
    assert_eq!(target.history().len(), 1);
    assert_eq!(target.upi_profile().payee_id, "shop@upi");

    // the import flushed, so the target directory reopens identically
    let reopened = engine_in(target_dir.path());
    assert_eq!(reopened.catalog().len(), 3);
    assert_eq!(reopened.history().len(), 1);
}

#[test]
fn test_import_replaces_existing_state() {
    let source_dir = tempdir().expect("tempdir");
    let target_dir = tempdir().expect("tempdir");
    let backup = source_dir.path().join("backup.json");

    seeded_engine(source_dir.path()).export_to(&backup).expect("export");

    let mut target = engine_in(target_dir.path());
    target
        .upsert_product("Z9", "Old Stock", Money::from_paise(100), 1)
        .expect("product");
    target.import_from(&backup).expect("import");

    // pre-import state is gone, not merged
    assert!(target.catalog().get("Z9").is_none());
    assert!(target.catalog().get("A1").is_some());
}

#[test]
fn test_corrupt_table_fails_open_loudly() {
    let dir = tempdir().expect("tempdir");
    seeded_engine(dir.path());

    let store = JsonTableStore::open(dir.path()).expect("open store");
    std::fs::write(store.table_path("inventory"), b"not json").expect("corrupt");

    let err = PosEngine::open(store).expect_err("corrupt inventory");
    assert!(matches!(err, StoreError::Corrupt { ref table, .. } if table == "inventory"));
}
