use pushkind_inventory::domain::inventory::InventoryListQuery;
use pushkind_inventory::domain::transaction::{TransactionKind, TransactionListQuery};
use pushkind_inventory::forms::inventory::{AddInventoryForm, EditInventoryForm};
use pushkind_inventory::repository::{InventoryReader, TransactionReader};
use pushkind_inventory::services::{ServiceError, inventory};

mod common;

#[test]
fn adding_an_item_writes_record_and_opening_transaction() {
    let test_db = common::TestDb::new("inventory_add_item.db");
    let repo = test_db.repo();
    let product = common::seed_product(&repo, "Palm oil", "PO-1L", "12.50");

    let record = inventory::add_inventory(
        &repo,
        &common::station(),
        AddInventoryForm {
            product_id: product.id,
            quantity: 8,
            min_quantity: 3,
        },
    )
    .expect("add inventory");

    let (total, items) = repo
        .list_inventory(InventoryListQuery::new(1))
        .expect("list inventory");
    assert_eq!(total, 1);
    assert_eq!(items[0].record.id, record.id);
    assert_eq!(items[0].product_name, "Palm oil");

    let (total, transactions) = repo
        .list_transactions(TransactionListQuery::new(1))
        .expect("list transactions");
    assert_eq!(total, 1);
    assert_eq!(transactions[0].kind, TransactionKind::In);
    assert_eq!(transactions[0].quantity, 8);
    assert_eq!(transactions[0].price_cents, 1250);
    assert_eq!(transactions[0].inventory_id, Some(record.id));
}

#[test]
fn tracking_a_product_twice_is_rejected() {
    let test_db = common::TestDb::new("inventory_add_twice.db");
    let repo = test_db.repo();
    let product = common::seed_product(&repo, "Salt", "SALT", "1");
    common::seed_stock(&repo, product.id, 1);

    let result = inventory::add_inventory(
        &repo,
        &common::station(),
        AddInventoryForm {
            product_id: product.id,
            quantity: 4,
            min_quantity: 0,
        },
    );

    assert!(matches!(result, Err(ServiceError::Form(_))));
}

#[test]
fn edits_log_the_quantity_difference() {
    let test_db = common::TestDb::new("inventory_edit_delta.db");
    let repo = test_db.repo();
    let product = common::seed_product(&repo, "Sugar", "SUG", "3");
    common::seed_stock(&repo, product.id, 10);
    let record = repo
        .get_inventory_by_product(product.id, 1)
        .expect("load record")
        .expect("record exists");

    let shrunk = inventory::update_inventory(
        &repo,
        &common::station(),
        record.id,
        EditInventoryForm {
            quantity: 6,
            min_quantity: 2,
        },
    )
    .expect("shrink");
    assert_eq!(shrunk.quantity, 6);
    assert!(!shrunk.is_low_stock());

    // Unchanged quantity logs nothing.
    inventory::update_inventory(
        &repo,
        &common::station(),
        record.id,
        EditInventoryForm {
            quantity: 6,
            min_quantity: 6,
        },
    )
    .expect("threshold only");

    let (total, transactions) = repo
        .list_transactions(TransactionListQuery::new(1).kind(TransactionKind::Out))
        .expect("list transactions");
    assert_eq!(total, 1);
    assert_eq!(transactions[0].quantity, 4);

    let (low_total, _) = repo
        .list_inventory(InventoryListQuery::new(1).low_stock_only())
        .expect("low stock");
    assert_eq!(low_total, 1);
}

#[test]
fn negative_quantity_is_rejected() {
    let test_db = common::TestDb::new("inventory_negative.db");
    let repo = test_db.repo();
    let product = common::seed_product(&repo, "Flour", "FLR", "2");
    common::seed_stock(&repo, product.id, 1);
    let record = repo
        .get_inventory_by_product(product.id, 1)
        .expect("load record")
        .expect("record exists");

    let result = inventory::update_inventory(
        &repo,
        &common::station(),
        record.id,
        EditInventoryForm {
            quantity: -1,
            min_quantity: 0,
        },
    );

    assert!(matches!(result, Err(ServiceError::Form(_))));
}
