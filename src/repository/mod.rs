use pushkind_common::db::{DbConnection, DbPool};
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};
use thiserror::Error;

use crate::domain::{
    activity::{Activity, ActivityListQuery, NewActivity},
    category::{Category, CategoryListQuery, NewCategory, UpdateCategory},
    customer::{Customer, CustomerListQuery, NewCustomer, UpdateCustomer},
    inventory::{
        InventoryItem, InventoryListQuery, InventoryRecord, NewInventoryRecord,
        UpdateInventoryRecord,
    },
    location::{Location, NewLocation, UpdateLocation},
    menu::{Menu, MenuCategory, MenuListQuery, NewMenu, NewMenuCategory, UpdateMenu},
    product::{NewProduct, Product, ProductListQuery, UpdateProduct},
    purchase_order::{
        NewPurchaseOrder, PurchaseOrder, PurchaseOrderListQuery, PurchaseOrderStatus,
        ReceivedItem, UpdatePurchaseOrder,
    },
    sale::{NewSale, Sale, SaleListQuery},
    stock_receipt::{NewStockReceipt, StockReceipt, StockReceiptListQuery},
    supplier::{NewSupplier, Supplier, SupplierListQuery, UpdateSupplier},
    sync::SyncStatus,
    transaction::{InventoryTransaction, TransactionListQuery},
};

pub mod activity;
pub mod category;
pub mod customer;
pub mod inventory;
pub mod location;
pub mod menu;
pub mod product;
pub mod purchase_order;
pub mod sale;
pub mod stock;
pub mod stock_receipt;
pub mod supplier;
pub mod sync;
pub mod transaction;

#[cfg(test)]
pub mod mock;

#[derive(Clone)]
/// Diesel-backed repository implementation that wraps an r2d2 pool.
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Failure of a write that moves stock or advances a status.
///
/// Raised inside the store transaction, so nothing of the write is kept.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(
        "insufficient stock for product {product_id}: {available} available, {requested} requested"
    )]
    InsufficientStock {
        product_id: i32,
        available: i32,
        requested: i32,
    },
    #[error("stock of product {product_id} would exceed the supported maximum")]
    QuantityOverflow { product_id: i32 },
    /// Another request changed the record's status first.
    #[error("status changed concurrently")]
    StatusChanged,
}

impl From<diesel::result::Error> for WriteError {
    fn from(err: diesel::result::Error) -> Self {
        Self::Repository(err.into())
    }
}

pub type WriteResult<T> = Result<T, WriteError>;

/// Offset and limit for a 1-based page.
pub(crate) fn page_bounds(page: usize, per_page: usize) -> (i64, i64) {
    let offset = ((page.max(1) - 1) * per_page) as i64;
    (offset, per_page as i64)
}

/// Read-only operations over location records.
pub trait LocationReader {
    fn get_location_by_id(&self, id: i32) -> RepositoryResult<Option<Location>>;
    fn list_locations(&self) -> RepositoryResult<Vec<Location>>;
}

/// Write operations over location records.
pub trait LocationWriter {
    fn create_location(&self, new_location: &NewLocation) -> RepositoryResult<Location>;
    fn update_location(&self, id: i32, updates: &UpdateLocation) -> RepositoryResult<Location>;
}

pub trait CategoryReader {
    fn get_category_by_id(&self, id: i32, location_id: i32) -> RepositoryResult<Option<Category>>;
    fn list_categories(&self, query: CategoryListQuery)
    -> RepositoryResult<(usize, Vec<Category>)>;
}

pub trait CategoryWriter {
    fn create_category(&self, new_category: &NewCategory) -> RepositoryResult<Category>;
    fn update_category(
        &self,
        id: i32,
        location_id: i32,
        updates: &UpdateCategory,
    ) -> RepositoryResult<Category>;
}

/// Read-only operations over product records.
pub trait ProductReader {
    fn get_product_by_id(&self, id: i32, location_id: i32) -> RepositoryResult<Option<Product>>;
    fn get_product_by_sku(&self, sku: &str, location_id: i32)
    -> RepositoryResult<Option<Product>>;
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
}

/// Write operations over product records. Each write appends `activity`
/// within the same transaction.
pub trait ProductWriter {
    fn create_product(
        &self,
        new_product: &NewProduct,
        activity: &NewActivity,
    ) -> RepositoryResult<Product>;
    fn update_product(
        &self,
        id: i32,
        location_id: i32,
        updates: &UpdateProduct,
        activity: &NewActivity,
    ) -> RepositoryResult<Product>;
    /// Insert every product or none of them.
    fn import_products(
        &self,
        new_products: &[NewProduct],
        activity: &NewActivity,
    ) -> RepositoryResult<usize>;
}

pub trait InventoryReader {
    fn get_inventory_by_id(
        &self,
        id: i32,
        location_id: i32,
    ) -> RepositoryResult<Option<InventoryRecord>>;
    fn get_inventory_by_product(
        &self,
        product_id: i32,
        location_id: i32,
    ) -> RepositoryResult<Option<InventoryRecord>>;
    fn list_inventory(
        &self,
        query: InventoryListQuery,
    ) -> RepositoryResult<(usize, Vec<InventoryItem>)>;
}

/// Inventory writes also log the resulting stock movement.
pub trait InventoryWriter {
    /// Insert the record and, for a positive opening quantity, an `in`
    /// transaction priced at the product's price.
    fn create_inventory(&self, new_record: &NewInventoryRecord)
    -> RepositoryResult<InventoryRecord>;
    /// Apply the new quantity and log the difference as `in` or `out`.
    fn update_inventory(
        &self,
        id: i32,
        location_id: i32,
        updates: &UpdateInventoryRecord,
    ) -> RepositoryResult<InventoryRecord>;
}

pub trait TransactionReader {
    fn list_transactions(
        &self,
        query: TransactionListQuery,
    ) -> RepositoryResult<(usize, Vec<InventoryTransaction>)>;
}

pub trait SupplierReader {
    fn get_supplier_by_id(&self, id: i32, location_id: i32) -> RepositoryResult<Option<Supplier>>;
    fn list_suppliers(&self, query: SupplierListQuery)
    -> RepositoryResult<(usize, Vec<Supplier>)>;
}

pub trait SupplierWriter {
    fn create_supplier(
        &self,
        new_supplier: &NewSupplier,
        activity: &NewActivity,
    ) -> RepositoryResult<Supplier>;
    fn update_supplier(
        &self,
        id: i32,
        location_id: i32,
        updates: &UpdateSupplier,
        activity: &NewActivity,
    ) -> RepositoryResult<Supplier>;
}

pub trait CustomerReader {
    fn get_customer_by_id(&self, id: i32, location_id: i32) -> RepositoryResult<Option<Customer>>;
    fn list_customers(&self, query: CustomerListQuery)
    -> RepositoryResult<(usize, Vec<Customer>)>;
}

pub trait CustomerWriter {
    fn create_customer(
        &self,
        new_customer: &NewCustomer,
        activity: &NewActivity,
    ) -> RepositoryResult<Customer>;
    fn update_customer(
        &self,
        id: i32,
        location_id: i32,
        updates: &UpdateCustomer,
        activity: &NewActivity,
    ) -> RepositoryResult<Customer>;
}

pub trait PurchaseOrderReader {
    fn get_purchase_order_by_id(
        &self,
        id: i32,
        location_id: i32,
    ) -> RepositoryResult<Option<PurchaseOrder>>;
    fn list_purchase_orders(
        &self,
        query: PurchaseOrderListQuery,
    ) -> RepositoryResult<(usize, Vec<PurchaseOrder>)>;
}

pub trait PurchaseOrderWriter {
    fn create_purchase_order(
        &self,
        new_order: &NewPurchaseOrder,
        activity: &NewActivity,
    ) -> RepositoryResult<PurchaseOrder>;
    /// Replace the order header and all of its lines. Fails with
    /// [`WriteError::StatusChanged`] unless the order is still `requested`.
    fn update_purchase_order(
        &self,
        id: i32,
        location_id: i32,
        updates: &UpdatePurchaseOrder,
        activity: &NewActivity,
    ) -> WriteResult<PurchaseOrder>;
    /// Move the order from `from` to `to`. Fails with
    /// [`WriteError::StatusChanged`] when it is no longer in `from`.
    fn update_purchase_order_status(
        &self,
        id: i32,
        location_id: i32,
        from: PurchaseOrderStatus,
        to: PurchaseOrderStatus,
        activity: &NewActivity,
    ) -> WriteResult<PurchaseOrder>;
    /// Mark an `approved` order received, store the delivered quantities and
    /// add them to inventory.
    fn receive_purchase_order(
        &self,
        id: i32,
        location_id: i32,
        received: &[ReceivedItem],
        activity: &NewActivity,
    ) -> WriteResult<PurchaseOrder>;
}

pub trait SaleReader {
    fn get_sale_by_id(&self, id: i32, location_id: i32) -> RepositoryResult<Option<Sale>>;
    fn list_sales(&self, query: SaleListQuery) -> RepositoryResult<(usize, Vec<Sale>)>;
}

pub trait SaleWriter {
    /// Store the sale and take every line out of inventory.
    fn create_sale(&self, new_sale: &NewSale) -> WriteResult<Sale>;
}

pub trait StockReceiptReader {
    fn get_stock_receipt_by_id(
        &self,
        id: i32,
        location_id: i32,
    ) -> RepositoryResult<Option<StockReceipt>>;
    fn list_stock_receipts(
        &self,
        query: StockReceiptListQuery,
    ) -> RepositoryResult<(usize, Vec<StockReceipt>)>;
}

pub trait StockReceiptWriter {
    /// Store the receipt and add every line to inventory.
    fn create_stock_receipt(&self, new_receipt: &NewStockReceipt) -> WriteResult<StockReceipt>;
}

pub trait ActivityReader {
    fn list_activities(&self, query: ActivityListQuery)
    -> RepositoryResult<(usize, Vec<Activity>)>;
}

pub trait MenuReader {
    fn get_menu_by_id(&self, id: i32, location_id: i32) -> RepositoryResult<Option<Menu>>;
    fn list_menus(&self, query: MenuListQuery) -> RepositoryResult<(usize, Vec<Menu>)>;
    fn get_menu_category_by_id(
        &self,
        id: i32,
        location_id: i32,
    ) -> RepositoryResult<Option<MenuCategory>>;
    fn list_menu_categories(&self, location_id: i32) -> RepositoryResult<Vec<MenuCategory>>;
}

pub trait MenuWriter {
    fn create_menu(&self, new_menu: &NewMenu, activity: &NewActivity) -> RepositoryResult<Menu>;
    fn update_menu(
        &self,
        id: i32,
        location_id: i32,
        updates: &UpdateMenu,
        activity: &NewActivity,
    ) -> RepositoryResult<Menu>;
    fn create_menu_category(
        &self,
        new_category: &NewMenuCategory,
        activity: &NewActivity,
    ) -> RepositoryResult<MenuCategory>;
}

/// Records waiting to be pushed to the remote API.
///
/// Both `pending` records and those whose last push failed are listed.
pub trait SyncQueueReader {
    fn list_pending_transactions(&self, location_id: i32)
    -> RepositoryResult<Vec<InventoryTransaction>>;
    fn list_pending_sales(&self, location_id: i32) -> RepositoryResult<Vec<Sale>>;
}

pub trait SyncQueueWriter {
    fn set_transaction_sync_status(&self, id: i32, status: SyncStatus) -> RepositoryResult<()>;
    fn set_sale_sync_status(&self, id: i32, status: SyncStatus) -> RepositoryResult<()>;
}
