use pushkind_common::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use serde::Deserialize;

use crate::domain::activity::{ActivityAction, NewActivity};
use crate::domain::purchase_order::{
    NewPurchaseOrderItem, PurchaseOrder, PurchaseOrderAction, PurchaseOrderListQuery,
    PurchaseOrderStatus, ReceivedItem,
};
use crate::domain::station::Station;
use crate::forms::purchase_orders::{PurchaseOrderForm, ReceivePurchaseOrderForm};
use crate::repository::{ProductReader, PurchaseOrderReader, PurchaseOrderWriter, SupplierReader};
use crate::services::{ServiceError, ServiceResult};

#[derive(Debug, Default, Deserialize)]
pub struct PurchaseOrdersQuery {
    pub status: Option<PurchaseOrderStatus>,
    pub supplier_id: Option<i32>,
    pub page: Option<usize>,
}

/// Purchase orders of the location, newest first.
pub fn list_purchase_orders<R>(
    repo: &R,
    station: &Station,
    query: PurchaseOrdersQuery,
) -> ServiceResult<Paginated<PurchaseOrder>>
where
    R: PurchaseOrderReader + ?Sized,
{
    let page = query.page.unwrap_or(1);
    let mut list_query =
        PurchaseOrderListQuery::new(station.location_id).paginate(page, DEFAULT_ITEMS_PER_PAGE);
    if let Some(status) = query.status {
        list_query = list_query.status(status);
    }
    if let Some(supplier_id) = query.supplier_id {
        list_query = list_query.supplier_id(supplier_id);
    }

    let (total, orders) = repo
        .list_purchase_orders(list_query)
        .map_err(ServiceError::from)?;

    Ok(Paginated::new(
        orders,
        page,
        total.div_ceil(DEFAULT_ITEMS_PER_PAGE),
    ))
}

pub fn get_purchase_order<R>(
    repo: &R,
    station: &Station,
    order_id: i32,
) -> ServiceResult<PurchaseOrder>
where
    R: PurchaseOrderReader + ?Sized,
{
    repo.get_purchase_order_by_id(order_id, station.location_id)?
        .ok_or(ServiceError::NotFound)
}

/// Creates a `requested` order.
pub fn create_purchase_order<R>(
    repo: &R,
    station: &Station,
    form: PurchaseOrderForm,
) -> ServiceResult<PurchaseOrder>
where
    R: PurchaseOrderWriter + SupplierReader + ProductReader + ?Sized,
{
    let new_order = form
        .into_new_purchase_order(station.location_id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    ensure_references_exist(repo, station, new_order.supplier_id, &new_order.items)?;

    let activity = NewActivity::new(station, ActivityAction::PurchaseOrderAdded);
    repo.create_purchase_order(&new_order, &activity)
        .map_err(ServiceError::from)
}

/// Replaces the header and lines of an order that is still `requested`.
pub fn update_purchase_order<R>(
    repo: &R,
    station: &Station,
    order_id: i32,
    form: PurchaseOrderForm,
) -> ServiceResult<PurchaseOrder>
where
    R: PurchaseOrderReader + PurchaseOrderWriter + SupplierReader + ProductReader + ?Sized,
{
    let updates = form
        .into_update_purchase_order()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let order = get_purchase_order(repo, station, order_id)?;
    if !order.status.is_editable() {
        return Err(ServiceError::Conflict);
    }

    ensure_references_exist(repo, station, updates.supplier_id, &updates.items)?;

    let activity =
        NewActivity::new(station, ActivityAction::PurchaseOrderEdited).with_subject(order_id);
    repo.update_purchase_order(order_id, station.location_id, &updates, &activity)
        .map_err(ServiceError::from)
}

pub fn approve_purchase_order<R>(
    repo: &R,
    station: &Station,
    order_id: i32,
) -> ServiceResult<PurchaseOrder>
where
    R: PurchaseOrderReader + PurchaseOrderWriter + ?Sized,
{
    change_status(repo, station, order_id, PurchaseOrderAction::Approve)
}

pub fn pay_purchase_order<R>(
    repo: &R,
    station: &Station,
    order_id: i32,
) -> ServiceResult<PurchaseOrder>
where
    R: PurchaseOrderReader + PurchaseOrderWriter + ?Sized,
{
    change_status(repo, station, order_id, PurchaseOrderAction::Pay)
}

pub fn cancel_purchase_order<R>(
    repo: &R,
    station: &Station,
    order_id: i32,
) -> ServiceResult<PurchaseOrder>
where
    R: PurchaseOrderReader + PurchaseOrderWriter + ?Sized,
{
    change_status(repo, station, order_id, PurchaseOrderAction::Cancel)
}

/// Marks an approved order received and adds the delivered goods to
/// inventory. Lines missing from `form` count as delivered in full.
pub fn receive_purchase_order<R>(
    repo: &R,
    station: &Station,
    order_id: i32,
    form: ReceivePurchaseOrderForm,
) -> ServiceResult<PurchaseOrder>
where
    R: PurchaseOrderReader + PurchaseOrderWriter + ?Sized,
{
    let overrides = form
        .into_received_items()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let order = get_purchase_order(repo, station, order_id)?;
    if order.status.apply(PurchaseOrderAction::Receive).is_none() {
        return Err(ServiceError::Conflict);
    }

    if let Some(unknown) = overrides
        .iter()
        .find(|received| !order.items.iter().any(|item| item.id == received.item_id))
    {
        return Err(ServiceError::Form(format!(
            "item {} is not part of order {}",
            unknown.item_id,
            order.reference()
        )));
    }

    let received: Vec<ReceivedItem> = order
        .items
        .iter()
        .map(|item| ReceivedItem {
            item_id: item.id,
            quantity_received: overrides
                .iter()
                .find(|received| received.item_id == item.id)
                .map_or(item.quantity, |received| received.quantity_received),
        })
        .collect();

    let activity =
        NewActivity::new(station, ActivityAction::PurchaseOrderReceived).with_subject(order_id);
    let received_order = repo
        .receive_purchase_order(order_id, station.location_id, &received, &activity)
        .map_err(ServiceError::from)?;
    log::info!("Received purchase order {}", received_order.reference());

    Ok(received_order)
}

fn change_status<R>(
    repo: &R,
    station: &Station,
    order_id: i32,
    action: PurchaseOrderAction,
) -> ServiceResult<PurchaseOrder>
where
    R: PurchaseOrderReader + PurchaseOrderWriter + ?Sized,
{
    let order = get_purchase_order(repo, station, order_id)?;
    let Some(status) = order.status.apply(action) else {
        return Err(ServiceError::Conflict);
    };

    let activity_action = match action {
        PurchaseOrderAction::Approve => ActivityAction::PurchaseOrderApproved,
        PurchaseOrderAction::Receive => ActivityAction::PurchaseOrderReceived,
        PurchaseOrderAction::Pay => ActivityAction::PurchaseOrderPaid,
        PurchaseOrderAction::Cancel => ActivityAction::PurchaseOrderCancelled,
    };
    let activity = NewActivity::new(station, activity_action).with_subject(order_id);

    repo.update_purchase_order_status(
        order_id,
        station.location_id,
        order.status,
        status,
        &activity,
    )
    .map_err(ServiceError::from)
}

fn ensure_references_exist<R>(
    repo: &R,
    station: &Station,
    supplier_id: i32,
    items: &[NewPurchaseOrderItem],
) -> ServiceResult<()>
where
    R: SupplierReader + ProductReader + ?Sized,
{
    if repo
        .get_supplier_by_id(supplier_id, station.location_id)?
        .is_none()
    {
        return Err(ServiceError::Form(format!(
            "supplier {supplier_id} does not exist"
        )));
    }

    for item in items {
        if repo
            .get_product_by_id(item.product_id, station.location_id)?
            .is_none()
        {
            return Err(ServiceError::Form(format!(
                "product {} does not exist",
                item.product_id
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    use crate::domain::purchase_order::PurchaseOrderItem;
    use crate::domain::sync::SyncStatus;
    use crate::forms::purchase_orders::{PurchaseOrderLineForm, ReceiveLineForm};
    use crate::repository::WriteError;
    use crate::repository::mock::MockPurchaseOrderRepo;

    fn fixed_datetime() -> NaiveDateTime {
        match NaiveDate::from_ymd_opt(2024, 1, 1) {
            Some(date) => date.and_hms_opt(0, 0, 0).unwrap_or_default(),
            None => NaiveDateTime::default(),
        }
    }

    fn station() -> Station {
        Station::new(1, "Manager")
    }

    fn sample_order(id: i32, status: PurchaseOrderStatus) -> PurchaseOrder {
        PurchaseOrder {
            id,
            location_id: 1,
            supplier_id: 2,
            status,
            expected_delivery: fixed_datetime().date(),
            notes: None,
            total_cents: 3000,
            items: vec![
                PurchaseOrderItem {
                    id: 10,
                    product_id: 5,
                    quantity: 10,
                    quantity_received: 0,
                    unit_price_cents: 200,
                },
                PurchaseOrderItem {
                    id: 11,
                    product_id: 6,
                    quantity: 2,
                    quantity_received: 0,
                    unit_price_cents: 500,
                },
            ],
            sync_status: SyncStatus::Pending,
            created_at: fixed_datetime(),
            updated_at: fixed_datetime(),
        }
    }

    fn order_form() -> PurchaseOrderForm {
        PurchaseOrderForm {
            supplier_id: 2,
            expected_delivery: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            notes: None,
            items: vec![PurchaseOrderLineForm {
                product_id: 5,
                quantity: 10,
                unit_price: "2".to_string(),
            }],
        }
    }

    #[test]
    fn approve_moves_requested_order_and_logs_once() {
        let mut repo = MockPurchaseOrderRepo::new();
        repo.expect_get_purchase_order_by_id()
            .returning(|id, _| Ok(Some(sample_order(id, PurchaseOrderStatus::Requested))));
        repo.expect_update_purchase_order_status()
            .times(1)
            .withf(|id, location_id, from, to, activity| {
                assert_eq!(*id, 7);
                assert_eq!(*location_id, 1);
                assert_eq!(*from, PurchaseOrderStatus::Requested);
                assert_eq!(*to, PurchaseOrderStatus::Approved);
                assert_eq!(activity.action, ActivityAction::PurchaseOrderApproved);
                assert_eq!(activity.subject_id, Some(7));
                true
            })
            .returning(|id, _, _, to, _| Ok(sample_order(id, to)));

        let order = approve_purchase_order(&repo, &station(), 7).expect("expected success");

        assert_eq!(order.status, PurchaseOrderStatus::Approved);
    }

    #[test]
    fn approve_losing_a_race_conflicts() {
        let mut repo = MockPurchaseOrderRepo::new();
        repo.expect_get_purchase_order_by_id()
            .returning(|id, _| Ok(Some(sample_order(id, PurchaseOrderStatus::Requested))));
        repo.expect_update_purchase_order_status()
            .times(1)
            .returning(|_, _, _, _, _| Err(WriteError::StatusChanged));

        let result = approve_purchase_order(&repo, &station(), 7);

        assert!(matches!(result, Err(ServiceError::Conflict)));
    }

    #[test]
    fn paying_unreceived_order_conflicts() {
        let mut repo = MockPurchaseOrderRepo::new();
        repo.expect_get_purchase_order_by_id()
            .returning(|id, _| Ok(Some(sample_order(id, PurchaseOrderStatus::Approved))));
        repo.expect_update_purchase_order_status().never();

        let result = pay_purchase_order(&repo, &station(), 7);

        assert!(matches!(result, Err(ServiceError::Conflict)));
    }

    #[test]
    fn cancelling_received_order_conflicts() {
        let mut repo = MockPurchaseOrderRepo::new();
        repo.expect_get_purchase_order_by_id()
            .returning(|id, _| Ok(Some(sample_order(id, PurchaseOrderStatus::Received))));
        repo.expect_update_purchase_order_status().never();

        let result = cancel_purchase_order(&repo, &station(), 7);

        assert!(matches!(result, Err(ServiceError::Conflict)));
    }

    #[test]
    fn missing_order_is_not_found() {
        let mut repo = MockPurchaseOrderRepo::new();
        repo.expect_get_purchase_order_by_id().returning(|_, _| Ok(None));

        let result = approve_purchase_order(&repo, &station(), 7);

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn receive_defaults_to_ordered_quantities() {
        let mut repo = MockPurchaseOrderRepo::new();
        repo.expect_get_purchase_order_by_id()
            .returning(|id, _| Ok(Some(sample_order(id, PurchaseOrderStatus::Approved))));
        repo.expect_receive_purchase_order()
            .times(1)
            .withf(|_, _, received, activity| {
                assert_eq!(
                    received,
                    &[
                        ReceivedItem {
                            item_id: 10,
                            quantity_received: 8,
                        },
                        ReceivedItem {
                            item_id: 11,
                            quantity_received: 2,
                        },
                    ]
                );
                assert_eq!(activity.action, ActivityAction::PurchaseOrderReceived);
                true
            })
            .returning(|id, _, _, _| Ok(sample_order(id, PurchaseOrderStatus::Received)));

        let form = ReceivePurchaseOrderForm {
            items: vec![ReceiveLineForm {
                item_id: 10,
                quantity_received: 8,
            }],
        };

        let order = receive_purchase_order(&repo, &station(), 7, form).expect("expected success");

        assert_eq!(order.status, PurchaseOrderStatus::Received);
    }

    #[test]
    fn receive_requires_approval() {
        let mut repo = MockPurchaseOrderRepo::new();
        repo.expect_get_purchase_order_by_id()
            .returning(|id, _| Ok(Some(sample_order(id, PurchaseOrderStatus::Requested))));
        repo.expect_receive_purchase_order().never();

        let result = receive_purchase_order(
            &repo,
            &station(),
            7,
            ReceivePurchaseOrderForm::default(),
        );

        assert!(matches!(result, Err(ServiceError::Conflict)));
    }

    #[test]
    fn receive_rejects_foreign_items() {
        let mut repo = MockPurchaseOrderRepo::new();
        repo.expect_get_purchase_order_by_id()
            .returning(|id, _| Ok(Some(sample_order(id, PurchaseOrderStatus::Approved))));
        repo.expect_receive_purchase_order().never();

        let form = ReceivePurchaseOrderForm {
            items: vec![ReceiveLineForm {
                item_id: 99,
                quantity_received: 1,
            }],
        };

        let result = receive_purchase_order(&repo, &station(), 7, form);

        assert!(matches!(result, Err(ServiceError::Form(message)) if message.contains("PO-7")));
    }

    #[test]
    fn create_requires_known_supplier() {
        let mut repo = MockPurchaseOrderRepo::new();
        repo.expect_get_supplier_by_id().returning(|_, _| Ok(None));
        repo.expect_create_purchase_order().never();

        let result = create_purchase_order(&repo, &station(), order_form());

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn editing_approved_order_conflicts() {
        let mut repo = MockPurchaseOrderRepo::new();
        repo.expect_get_purchase_order_by_id()
            .returning(|id, _| Ok(Some(sample_order(id, PurchaseOrderStatus::Approved))));
        repo.expect_update_purchase_order().never();

        let result = update_purchase_order(&repo, &station(), 7, order_form());

        assert!(matches!(result, Err(ServiceError::Conflict)));
    }
}
