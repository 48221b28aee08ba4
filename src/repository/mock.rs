use mockall::mock;

use super::{
    BillReader, BillWriter, BusinessReader, BusinessWriter, NotificationReader,
    NotificationWriter, ProductReader, ProductWriter, SaleReader, UserReader, UserWriter,
};
use crate::domain::{
    bill::{Bill, BillListQuery, BillOutcome, NewBill},
    business::{Business, NewBusiness},
    notification::{NewNotification, Notification},
    product::{NewProduct, Product, ProductListQuery, UpdateProduct},
    sale::{Sale, SaleListQuery},
    user::{NewUser, User},
};
use crate::repository::errors::RepositoryResult;

mock! {
    pub Repository {}

    impl UserReader for Repository {
        fn get_user_by_external_id(&self, external_id: &str) -> RepositoryResult<Option<User>>;
    }

    impl UserWriter for Repository {
        fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
        fn set_premium(&self, external_id: &str) -> RepositoryResult<User>;
    }

    impl BusinessReader for Repository {
        fn get_business_by_id(&self, id: i32, owner_id: i32) -> RepositoryResult<Option<Business>>;
        fn list_businesses(&self, owner_id: i32) -> RepositoryResult<Vec<Business>>;
    }

    impl BusinessWriter for Repository {
        fn create_business(&self, new_business: &NewBusiness) -> RepositoryResult<Business>;
    }

    impl ProductReader for Repository {
        fn get_product_by_id(&self, id: i32, business_id: i32) -> RepositoryResult<Option<Product>>;
        fn get_product_by_barcode(&self, barcode: &str, business_id: i32) -> RepositoryResult<Option<Product>>;
        fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
        fn list_low_stock(&self, business_id: i32, limit: i64) -> RepositoryResult<Vec<Product>>;
        fn count_products(&self, business_id: i32) -> RepositoryResult<i64>;
    }

    impl ProductWriter for Repository {
        fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
        fn update_product(&self, product_id: i32, business_id: i32, updates: &UpdateProduct) -> RepositoryResult<Product>;
        fn adjust_stock(&self, product_id: i32, business_id: i32, delta: i32) -> RepositoryResult<Product>;
        fn delete_product(&self, product_id: i32, business_id: i32) -> RepositoryResult<()>;
    }

    impl BillReader for Repository {
        fn get_bill_by_id(&self, id: i32, business_id: i32) -> RepositoryResult<Option<Bill>>;
        fn list_bills(&self, query: BillListQuery) -> RepositoryResult<(usize, Vec<Bill>)>;
    }

    impl BillWriter for Repository {
        fn create_bill(&self, new_bill: &NewBill) -> RepositoryResult<BillOutcome>;
    }

    impl SaleReader for Repository {
        fn list_sales(&self, query: SaleListQuery) -> RepositoryResult<Vec<Sale>>;
        fn sales_totals(&self, business_id: i32) -> RepositoryResult<(i64, i64)>;
    }

    impl NotificationReader for Repository {
        fn list_unread(&self, business_id: i32) -> RepositoryResult<Vec<Notification>>;
    }

    impl NotificationWriter for Repository {
        fn create_notification(&self, new_notification: &NewNotification) -> RepositoryResult<Notification>;
        fn mark_read(&self, notification_id: i32, business_id: i32) -> RepositoryResult<Notification>;
    }
}
