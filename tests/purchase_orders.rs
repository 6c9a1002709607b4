use pushkind_inventory::domain::activity::{ActivityAction, ActivityListQuery, NewActivity};
use pushkind_inventory::domain::purchase_order::{
    PurchaseOrder, PurchaseOrderStatus, ReceivedItem,
};
use pushkind_inventory::domain::transaction::{TransactionKind, TransactionListQuery};
use pushkind_inventory::forms::purchase_orders::{
    PurchaseOrderForm, PurchaseOrderLineForm, ReceiveLineForm, ReceivePurchaseOrderForm,
};
use pushkind_inventory::repository::{
    ActivityReader, DieselRepository, InventoryReader, PurchaseOrderWriter, TransactionReader,
    WriteError,
};
use pushkind_inventory::services::{ServiceError, purchase_orders};

mod common;

fn place_order(repo: &DieselRepository) -> PurchaseOrder {
    let supplier = common::seed_supplier(repo, "Dangote Foods");
    let rice = common::seed_product(repo, "Rice 50kg", "RICE50", "45000");
    let beans = common::seed_product(repo, "Beans 25kg", "BEANS25", "30000");

    purchase_orders::create_purchase_order(
        repo,
        &common::station(),
        PurchaseOrderForm {
            supplier_id: supplier.id,
            expected_delivery: common::date(2025, 2, 1),
            notes: Some("Deliver before noon".to_string()),
            items: vec![
                PurchaseOrderLineForm {
                    product_id: rice.id,
                    quantity: 4,
                    unit_price: "42000".to_string(),
                },
                PurchaseOrderLineForm {
                    product_id: beans.id,
                    quantity: 2,
                    unit_price: "28500.50".to_string(),
                },
            ],
        },
    )
    .expect("create purchase order")
}

fn activity_count(repo: &DieselRepository) -> usize {
    repo.list_activities(ActivityListQuery::new(1))
        .expect("list activities")
        .0
}

#[test]
fn new_orders_start_requested_with_exact_total() {
    let test_db = common::TestDb::new("po_create.db");
    let repo = test_db.repo();

    let order = place_order(&repo);

    assert_eq!(order.status, PurchaseOrderStatus::Requested);
    assert_eq!(order.items.len(), 2);
    assert_eq!(order.total_cents, 4 * 4_200_000 + 2 * 2_850_050);
}

#[test]
fn approving_updates_status_and_appends_one_activity() {
    let test_db = common::TestDb::new("po_approve.db");
    let repo = test_db.repo();
    let order = place_order(&repo);
    let before = activity_count(&repo);

    let approved = purchase_orders::approve_purchase_order(&repo, &common::station(), order.id)
        .expect("approve");

    assert_eq!(approved.status, PurchaseOrderStatus::Approved);
    let reloaded = purchase_orders::get_purchase_order(&repo, &common::station(), order.id)
        .expect("reload");
    assert_eq!(reloaded.status, PurchaseOrderStatus::Approved);

    let (after, activities) = repo
        .list_activities(ActivityListQuery::new(1))
        .expect("list activities");
    assert_eq!(after, before + 1);
    assert_eq!(activities[0].action, ActivityAction::PurchaseOrderApproved);
    assert_eq!(activities[0].subject_id, Some(order.id));
    assert_eq!(activities[0].actioned_by, "Tester");
}

#[test]
fn receiving_requires_approval() {
    let test_db = common::TestDb::new("po_receive_requested.db");
    let repo = test_db.repo();
    let order = place_order(&repo);

    let result = purchase_orders::receive_purchase_order(
        &repo,
        &common::station(),
        order.id,
        ReceivePurchaseOrderForm::default(),
    );

    assert!(matches!(result, Err(ServiceError::Conflict)));
}

#[test]
fn receiving_adds_stock_and_logs_transactions() {
    let test_db = common::TestDb::new("po_receive.db");
    let repo = test_db.repo();
    let order = place_order(&repo);
    purchase_orders::approve_purchase_order(&repo, &common::station(), order.id)
        .expect("approve");

    let rice_line = &order.items[0];
    let beans_line = &order.items[1];
    common::seed_stock(&repo, beans_line.product_id, 1);

    let received = purchase_orders::receive_purchase_order(
        &repo,
        &common::station(),
        order.id,
        ReceivePurchaseOrderForm {
            items: vec![ReceiveLineForm {
                item_id: rice_line.id,
                quantity_received: 3,
            }],
        },
    )
    .expect("receive");

    assert_eq!(received.status, PurchaseOrderStatus::Received);
    let received_rice = received
        .items
        .iter()
        .find(|item| item.id == rice_line.id)
        .expect("rice line");
    assert_eq!(received_rice.quantity_received, 3);

    let rice_stock = repo
        .get_inventory_by_product(rice_line.product_id, 1)
        .expect("load rice")
        .expect("rice record created");
    assert_eq!(rice_stock.quantity, 3);
    let beans_stock = repo
        .get_inventory_by_product(beans_line.product_id, 1)
        .expect("load beans")
        .expect("beans record");
    assert_eq!(beans_stock.quantity, 3);

    let (_, transactions) = repo
        .list_transactions(TransactionListQuery::new(1).kind(TransactionKind::In))
        .expect("list transactions");
    let reference = format!("PO-{}", order.id);
    let from_order: Vec<_> = transactions
        .iter()
        .filter(|t| t.reference.as_deref() == Some(reference.as_str()))
        .collect();
    assert_eq!(from_order.len(), 2);
}

#[test]
fn receiving_twice_conflicts_and_leaves_stock_alone() {
    let test_db = common::TestDb::new("po_receive_twice.db");
    let repo = test_db.repo();
    let order = place_order(&repo);
    purchase_orders::approve_purchase_order(&repo, &common::station(), order.id)
        .expect("approve");
    let rice = order.items[0].product_id;

    purchase_orders::receive_purchase_order(
        &repo,
        &common::station(),
        order.id,
        ReceivePurchaseOrderForm::default(),
    )
    .expect("first receive");
    let activities = activity_count(&repo);

    let again = purchase_orders::receive_purchase_order(
        &repo,
        &common::station(),
        order.id,
        ReceivePurchaseOrderForm::default(),
    );

    assert!(matches!(again, Err(ServiceError::Conflict)));
    let stock = repo
        .get_inventory_by_product(rice, 1)
        .expect("load rice")
        .expect("rice record");
    assert_eq!(stock.quantity, 4);
    assert_eq!(activity_count(&repo), activities);
}

#[test]
fn stale_receive_is_rejected_inside_the_write() {
    let test_db = common::TestDb::new("po_receive_stale.db");
    let repo = test_db.repo();
    let order = place_order(&repo);
    purchase_orders::approve_purchase_order(&repo, &common::station(), order.id)
        .expect("approve");
    purchase_orders::receive_purchase_order(
        &repo,
        &common::station(),
        order.id,
        ReceivePurchaseOrderForm::default(),
    )
    .expect("receive");
    let activities = activity_count(&repo);

    // A second worker that read the order while it was still approved.
    let received: Vec<ReceivedItem> = order
        .items
        .iter()
        .map(|item| ReceivedItem {
            item_id: item.id,
            quantity_received: item.quantity,
        })
        .collect();
    let activity = NewActivity::new(&common::station(), ActivityAction::PurchaseOrderReceived)
        .with_subject(order.id);
    let result = repo.receive_purchase_order(order.id, 1, &received, &activity);

    assert!(matches!(result, Err(WriteError::StatusChanged)));
    let stock = repo
        .get_inventory_by_product(order.items[0].product_id, 1)
        .expect("load rice")
        .expect("rice record");
    assert_eq!(stock.quantity, 4);
    assert_eq!(activity_count(&repo), activities);
}

#[test]
fn stale_approval_is_rejected_inside_the_write() {
    let test_db = common::TestDb::new("po_approve_stale.db");
    let repo = test_db.repo();
    let order = place_order(&repo);
    purchase_orders::approve_purchase_order(&repo, &common::station(), order.id)
        .expect("approve");

    let activity = NewActivity::new(&common::station(), ActivityAction::PurchaseOrderApproved)
        .with_subject(order.id);
    let result = repo.update_purchase_order_status(
        order.id,
        1,
        PurchaseOrderStatus::Requested,
        PurchaseOrderStatus::Approved,
        &activity,
    );

    assert!(matches!(result, Err(WriteError::StatusChanged)));
}

#[test]
fn forbidden_transitions_conflict() {
    let test_db = common::TestDb::new("po_transitions.db");
    let repo = test_db.repo();
    let order = place_order(&repo);
    let station = common::station();

    assert!(matches!(
        purchase_orders::pay_purchase_order(&repo, &station, order.id),
        Err(ServiceError::Conflict)
    ));

    let cancelled =
        purchase_orders::cancel_purchase_order(&repo, &station, order.id).expect("cancel");
    assert_eq!(cancelled.status, PurchaseOrderStatus::Cancelled);

    assert!(matches!(
        purchase_orders::approve_purchase_order(&repo, &station, order.id),
        Err(ServiceError::Conflict)
    ));
}

#[test]
fn only_requested_orders_can_be_edited() {
    let test_db = common::TestDb::new("po_edit.db");
    let repo = test_db.repo();
    let order = place_order(&repo);
    let station = common::station();
    let product_id = order.items[0].product_id;

    let edit = || PurchaseOrderForm {
        supplier_id: order.supplier_id,
        expected_delivery: common::date(2025, 3, 1),
        notes: None,
        items: vec![PurchaseOrderLineForm {
            product_id,
            quantity: 1,
            unit_price: "10".to_string(),
        }],
    };

    let edited =
        purchase_orders::update_purchase_order(&repo, &station, order.id, edit()).expect("edit");
    assert_eq!(edited.items.len(), 1);
    assert_eq!(edited.total_cents, 1000);

    purchase_orders::approve_purchase_order(&repo, &station, order.id).expect("approve");
    assert!(matches!(
        purchase_orders::update_purchase_order(&repo, &station, order.id, edit()),
        Err(ServiceError::Conflict)
    ));
}
