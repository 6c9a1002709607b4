use mockall::mock;

use super::{
    ActivityReader, CategoryReader, CategoryWriter, CustomerReader, CustomerWriter,
    InventoryReader, InventoryWriter, LocationReader, LocationWriter, MenuReader, MenuWriter,
    ProductReader, ProductWriter, PurchaseOrderReader, PurchaseOrderWriter, SaleReader,
    SaleWriter, StockReceiptReader, StockReceiptWriter, SupplierReader, SupplierWriter,
    SyncQueueReader, SyncQueueWriter, TransactionReader, WriteResult,
};
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
use pushkind_common::repository::errors::RepositoryResult;

mock! {
    pub LocationRepo {}

    impl LocationReader for LocationRepo {
        fn get_location_by_id(&self, id: i32) -> RepositoryResult<Option<Location>>;
        fn list_locations(&self) -> RepositoryResult<Vec<Location>>;
    }

    impl LocationWriter for LocationRepo {
        fn create_location(&self, new_location: &NewLocation) -> RepositoryResult<Location>;
        fn update_location(&self, id: i32, updates: &UpdateLocation) -> RepositoryResult<Location>;
    }
}

mock! {
    pub CategoryRepo {}

    impl CategoryReader for CategoryRepo {
        fn get_category_by_id(&self, id: i32, location_id: i32) -> RepositoryResult<Option<Category>>;
        fn list_categories(&self, query: CategoryListQuery) -> RepositoryResult<(usize, Vec<Category>)>;
    }

    impl CategoryWriter for CategoryRepo {
        fn create_category(&self, new_category: &NewCategory) -> RepositoryResult<Category>;
        fn update_category(&self, id: i32, location_id: i32, updates: &UpdateCategory) -> RepositoryResult<Category>;
    }
}

mock! {
    pub ProductRepo {}

    impl ProductReader for ProductRepo {
        fn get_product_by_id(&self, id: i32, location_id: i32) -> RepositoryResult<Option<Product>>;
        fn get_product_by_sku(&self, sku: &str, location_id: i32) -> RepositoryResult<Option<Product>>;
        fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
    }

    impl ProductWriter for ProductRepo {
        fn create_product(&self, new_product: &NewProduct, activity: &NewActivity) -> RepositoryResult<Product>;
        fn update_product(&self, id: i32, location_id: i32, updates: &UpdateProduct, activity: &NewActivity) -> RepositoryResult<Product>;
        fn import_products(&self, new_products: &[NewProduct], activity: &NewActivity) -> RepositoryResult<usize>;
    }
}

mock! {
    pub InventoryRepo {}

    impl InventoryReader for InventoryRepo {
        fn get_inventory_by_id(&self, id: i32, location_id: i32) -> RepositoryResult<Option<InventoryRecord>>;
        fn get_inventory_by_product(&self, product_id: i32, location_id: i32) -> RepositoryResult<Option<InventoryRecord>>;
        fn list_inventory(&self, query: InventoryListQuery) -> RepositoryResult<(usize, Vec<InventoryItem>)>;
    }

    impl InventoryWriter for InventoryRepo {
        fn create_inventory(&self, new_record: &NewInventoryRecord) -> RepositoryResult<InventoryRecord>;
        fn update_inventory(&self, id: i32, location_id: i32, updates: &UpdateInventoryRecord) -> RepositoryResult<InventoryRecord>;
    }

    impl ProductReader for InventoryRepo {
        fn get_product_by_id(&self, id: i32, location_id: i32) -> RepositoryResult<Option<Product>>;
        fn get_product_by_sku(&self, sku: &str, location_id: i32) -> RepositoryResult<Option<Product>>;
        fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
    }
}

mock! {
    pub TransactionRepo {}

    impl TransactionReader for TransactionRepo {
        fn list_transactions(&self, query: TransactionListQuery) -> RepositoryResult<(usize, Vec<InventoryTransaction>)>;
    }

    impl SaleReader for TransactionRepo {
        fn get_sale_by_id(&self, id: i32, location_id: i32) -> RepositoryResult<Option<Sale>>;
        fn list_sales(&self, query: SaleListQuery) -> RepositoryResult<(usize, Vec<Sale>)>;
    }

    impl ProductReader for TransactionRepo {
        fn get_product_by_id(&self, id: i32, location_id: i32) -> RepositoryResult<Option<Product>>;
        fn get_product_by_sku(&self, sku: &str, location_id: i32) -> RepositoryResult<Option<Product>>;
        fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
    }
}

mock! {
    pub SupplierRepo {}

    impl SupplierReader for SupplierRepo {
        fn get_supplier_by_id(&self, id: i32, location_id: i32) -> RepositoryResult<Option<Supplier>>;
        fn list_suppliers(&self, query: SupplierListQuery) -> RepositoryResult<(usize, Vec<Supplier>)>;
    }

    impl SupplierWriter for SupplierRepo {
        fn create_supplier(&self, new_supplier: &NewSupplier, activity: &NewActivity) -> RepositoryResult<Supplier>;
        fn update_supplier(&self, id: i32, location_id: i32, updates: &UpdateSupplier, activity: &NewActivity) -> RepositoryResult<Supplier>;
    }
}

mock! {
    pub CustomerRepo {}

    impl CustomerReader for CustomerRepo {
        fn get_customer_by_id(&self, id: i32, location_id: i32) -> RepositoryResult<Option<Customer>>;
        fn list_customers(&self, query: CustomerListQuery) -> RepositoryResult<(usize, Vec<Customer>)>;
    }

    impl CustomerWriter for CustomerRepo {
        fn create_customer(&self, new_customer: &NewCustomer, activity: &NewActivity) -> RepositoryResult<Customer>;
        fn update_customer(&self, id: i32, location_id: i32, updates: &UpdateCustomer, activity: &NewActivity) -> RepositoryResult<Customer>;
    }
}

mock! {
    pub PurchaseOrderRepo {}

    impl PurchaseOrderReader for PurchaseOrderRepo {
        fn get_purchase_order_by_id(&self, id: i32, location_id: i32) -> RepositoryResult<Option<PurchaseOrder>>;
        fn list_purchase_orders(&self, query: PurchaseOrderListQuery) -> RepositoryResult<(usize, Vec<PurchaseOrder>)>;
    }

    impl PurchaseOrderWriter for PurchaseOrderRepo {
        fn create_purchase_order(&self, new_order: &NewPurchaseOrder, activity: &NewActivity) -> RepositoryResult<PurchaseOrder>;
        fn update_purchase_order(&self, id: i32, location_id: i32, updates: &UpdatePurchaseOrder, activity: &NewActivity) -> WriteResult<PurchaseOrder>;
        fn update_purchase_order_status(&self, id: i32, location_id: i32, from: PurchaseOrderStatus, to: PurchaseOrderStatus, activity: &NewActivity) -> WriteResult<PurchaseOrder>;
        fn receive_purchase_order(&self, id: i32, location_id: i32, received: &[ReceivedItem], activity: &NewActivity) -> WriteResult<PurchaseOrder>;
    }

    impl SupplierReader for PurchaseOrderRepo {
        fn get_supplier_by_id(&self, id: i32, location_id: i32) -> RepositoryResult<Option<Supplier>>;
        fn list_suppliers(&self, query: SupplierListQuery) -> RepositoryResult<(usize, Vec<Supplier>)>;
    }

    impl ProductReader for PurchaseOrderRepo {
        fn get_product_by_id(&self, id: i32, location_id: i32) -> RepositoryResult<Option<Product>>;
        fn get_product_by_sku(&self, sku: &str, location_id: i32) -> RepositoryResult<Option<Product>>;
        fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
    }
}

mock! {
    pub SaleRepo {}

    impl SaleReader for SaleRepo {
        fn get_sale_by_id(&self, id: i32, location_id: i32) -> RepositoryResult<Option<Sale>>;
        fn list_sales(&self, query: SaleListQuery) -> RepositoryResult<(usize, Vec<Sale>)>;
    }

    impl SaleWriter for SaleRepo {
        fn create_sale(&self, new_sale: &NewSale) -> WriteResult<Sale>;
    }

    impl ProductReader for SaleRepo {
        fn get_product_by_id(&self, id: i32, location_id: i32) -> RepositoryResult<Option<Product>>;
        fn get_product_by_sku(&self, sku: &str, location_id: i32) -> RepositoryResult<Option<Product>>;
        fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
    }

    impl InventoryReader for SaleRepo {
        fn get_inventory_by_id(&self, id: i32, location_id: i32) -> RepositoryResult<Option<InventoryRecord>>;
        fn get_inventory_by_product(&self, product_id: i32, location_id: i32) -> RepositoryResult<Option<InventoryRecord>>;
        fn list_inventory(&self, query: InventoryListQuery) -> RepositoryResult<(usize, Vec<InventoryItem>)>;
    }

    impl CustomerReader for SaleRepo {
        fn get_customer_by_id(&self, id: i32, location_id: i32) -> RepositoryResult<Option<Customer>>;
        fn list_customers(&self, query: CustomerListQuery) -> RepositoryResult<(usize, Vec<Customer>)>;
    }
}

mock! {
    pub StockReceiptRepo {}

    impl StockReceiptReader for StockReceiptRepo {
        fn get_stock_receipt_by_id(&self, id: i32, location_id: i32) -> RepositoryResult<Option<StockReceipt>>;
        fn list_stock_receipts(&self, query: StockReceiptListQuery) -> RepositoryResult<(usize, Vec<StockReceipt>)>;
    }

    impl StockReceiptWriter for StockReceiptRepo {
        fn create_stock_receipt(&self, new_receipt: &NewStockReceipt) -> WriteResult<StockReceipt>;
    }

    impl SupplierReader for StockReceiptRepo {
        fn get_supplier_by_id(&self, id: i32, location_id: i32) -> RepositoryResult<Option<Supplier>>;
        fn list_suppliers(&self, query: SupplierListQuery) -> RepositoryResult<(usize, Vec<Supplier>)>;
    }

    impl ProductReader for StockReceiptRepo {
        fn get_product_by_id(&self, id: i32, location_id: i32) -> RepositoryResult<Option<Product>>;
        fn get_product_by_sku(&self, sku: &str, location_id: i32) -> RepositoryResult<Option<Product>>;
        fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
    }
}

mock! {
    pub ActivityReader {}

    impl ActivityReader for ActivityReader {
        fn list_activities(&self, query: ActivityListQuery) -> RepositoryResult<(usize, Vec<Activity>)>;
    }
}

mock! {
    pub MenuRepo {}

    impl MenuReader for MenuRepo {
        fn get_menu_by_id(&self, id: i32, location_id: i32) -> RepositoryResult<Option<Menu>>;
        fn list_menus(&self, query: MenuListQuery) -> RepositoryResult<(usize, Vec<Menu>)>;
        fn get_menu_category_by_id(&self, id: i32, location_id: i32) -> RepositoryResult<Option<MenuCategory>>;
        fn list_menu_categories(&self, location_id: i32) -> RepositoryResult<Vec<MenuCategory>>;
    }

    impl MenuWriter for MenuRepo {
        fn create_menu(&self, new_menu: &NewMenu, activity: &NewActivity) -> RepositoryResult<Menu>;
        fn update_menu(&self, id: i32, location_id: i32, updates: &UpdateMenu, activity: &NewActivity) -> RepositoryResult<Menu>;
        fn create_menu_category(&self, new_category: &NewMenuCategory, activity: &NewActivity) -> RepositoryResult<MenuCategory>;
    }
}

mock! {
    pub SyncQueue {}

    impl SyncQueueReader for SyncQueue {
        fn list_pending_transactions(&self, location_id: i32) -> RepositoryResult<Vec<InventoryTransaction>>;
        fn list_pending_sales(&self, location_id: i32) -> RepositoryResult<Vec<Sale>>;
    }

    impl SyncQueueWriter for SyncQueue {
        fn set_transaction_sync_status(&self, id: i32, status: SyncStatus) -> RepositoryResult<()>;
        fn set_sale_sync_status(&self, id: i32, status: SyncStatus) -> RepositoryResult<()>;
    }
}
