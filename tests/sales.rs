use pushkind_inventory::domain::sale::PaymentMethod;
use pushkind_inventory::domain::sync::SyncStatus;
use pushkind_inventory::domain::transaction::{TransactionKind, TransactionListQuery};
use pushkind_inventory::forms::sales::{CheckoutForm, CheckoutLineForm};
use pushkind_inventory::forms::stock_receipts::{AddStockReceiptForm, StockReceiptLineForm};
use pushkind_inventory::repository::{InventoryReader, TransactionReader};
use pushkind_inventory::services::{ServiceError, receipts, sales, stock_receipts};

mod common;

fn cart(lines: &[(i32, i32)]) -> CheckoutForm {
    CheckoutForm {
        items: lines
            .iter()
            .map(|&(product_id, quantity)| CheckoutLineForm {
                product_id,
                quantity,
            })
            .collect(),
        payment_method: PaymentMethod::Cash,
        customer_id: None,
    }
}

#[test]
fn checkout_decrements_stock_and_logs_sale_movements() {
    let test_db = common::TestDb::new("sales_checkout.db");
    let repo = test_db.repo();
    let soda = common::seed_product(&repo, "Soda", "SODA", "2.50");
    let chips = common::seed_product(&repo, "Chips", "CHIPS", "1.20");
    common::seed_stock(&repo, soda.id, 10);
    common::seed_stock(&repo, chips.id, 5);

    let sale = sales::checkout(
        &repo,
        &common::station(),
        cart(&[(soda.id, 3), (chips.id, 2)]),
    )
    .expect("checkout");

    assert_eq!(sale.total_cents, 3 * 250 + 2 * 120);
    assert_eq!(sale.items.len(), 2);
    assert_eq!(sale.sync_status, SyncStatus::Pending);

    let soda_stock = repo
        .get_inventory_by_product(soda.id, 1)
        .expect("load")
        .expect("record");
    assert_eq!(soda_stock.quantity, 7);

    let (total, movements) = repo
        .list_transactions(TransactionListQuery::new(1).kind(TransactionKind::Sale))
        .expect("list transactions");
    assert_eq!(total, 2);
    assert!(
        movements
            .iter()
            .all(|movement| movement.reference.as_deref() == Some(sale.reference().as_str()))
    );

    let receipt = receipts::receipt_for_sale(
        &repo,
        &common::station(),
        sale.id,
        chrono::NaiveDateTime::default(),
    )
    .expect("receipt");
    assert_eq!(receipt.total_cents, sale.total_cents);
}

#[test]
fn checkout_beyond_stock_changes_nothing() {
    let test_db = common::TestDb::new("sales_insufficient.db");
    let repo = test_db.repo();
    let soda = common::seed_product(&repo, "Soda", "SODA", "2.50");
    common::seed_stock(&repo, soda.id, 2);

    let result = sales::checkout(&repo, &common::station(), cart(&[(soda.id, 3)]));

    assert!(matches!(result, Err(ServiceError::Form(_))));
    let soda_stock = repo
        .get_inventory_by_product(soda.id, 1)
        .expect("load")
        .expect("record");
    assert_eq!(soda_stock.quantity, 2);
}

#[test]
fn stock_receipt_adds_inventory_with_invoice_reference() {
    let test_db = common::TestDb::new("sales_stock_receipt.db");
    let repo = test_db.repo();
    let supplier = common::seed_supplier(&repo, "Kano Mills");
    let flour = common::seed_product(&repo, "Flour", "FLR", "20");

    let receipt = stock_receipts::create_stock_receipt(
        &repo,
        &common::station(),
        AddStockReceiptForm {
            supplier_id: supplier.id,
            invoice_number: "INV-2041".to_string(),
            received_on: common::date(2025, 1, 10),
            notes: None,
            items: vec![StockReceiptLineForm {
                product_id: flour.id,
                quantity: 12,
                unit_price: "18.75".to_string(),
            }],
        },
    )
    .expect("create stock receipt");

    assert_eq!(receipt.total_cents, 12 * 1875);
    assert_eq!(receipt.items[0].subtotal_cents, 12 * 1875);

    let flour_stock = repo
        .get_inventory_by_product(flour.id, 1)
        .expect("load")
        .expect("record created");
    assert_eq!(flour_stock.quantity, 12);

    let (_, movements) = repo
        .list_transactions(TransactionListQuery::new(1).product_id(flour.id))
        .expect("list transactions");
    assert_eq!(movements.len(), 1);
    assert_eq!(movements[0].reference.as_deref(), Some("INV-2041"));
}
