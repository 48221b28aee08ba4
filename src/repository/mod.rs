use crate::db::{DbConnection, DbPool};
use crate::domain::bill::{Bill, BillListQuery, BillOutcome, NewBill};
use crate::domain::business::{Business, NewBusiness};
use crate::domain::notification::{NewNotification, Notification};
use crate::domain::product::{NewProduct, Product, ProductListQuery, UpdateProduct};
use crate::domain::sale::{Sale, SaleListQuery};
use crate::domain::user::{NewUser, User};
use crate::repository::errors::RepositoryResult;

pub mod errors;

pub mod bill;
pub mod business;
pub mod notification;
pub mod product;
pub mod sale;
pub mod user;

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

/// Read-only operations over user accounts.
pub trait UserReader {
    fn get_user_by_external_id(&self, external_id: &str) -> RepositoryResult<Option<User>>;
}

/// Write operations over user accounts.
pub trait UserWriter {
    fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
    /// Flip the premium flag on. Idempotent.
    fn set_premium(&self, external_id: &str) -> RepositoryResult<User>;
}

/// Read-only operations over businesses, always scoped to their owner.
pub trait BusinessReader {
    fn get_business_by_id(&self, id: i32, owner_id: i32) -> RepositoryResult<Option<Business>>;
    fn list_businesses(&self, owner_id: i32) -> RepositoryResult<Vec<Business>>;
}

/// Write operations over businesses.
pub trait BusinessWriter {
    fn create_business(&self, new_business: &NewBusiness) -> RepositoryResult<Business>;
}

/// Read-only operations over the product catalog.
pub trait ProductReader {
    fn get_product_by_id(&self, id: i32, business_id: i32) -> RepositoryResult<Option<Product>>;
    fn get_product_by_barcode(
        &self,
        barcode: &str,
        business_id: i32,
    ) -> RepositoryResult<Option<Product>>;
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
    /// Products ordered by ascending stock, capped at `limit`.
    fn list_low_stock(&self, business_id: i32, limit: i64) -> RepositoryResult<Vec<Product>>;
    fn count_products(&self, business_id: i32) -> RepositoryResult<i64>;
}

/// Write operations over the product catalog.
pub trait ProductWriter {
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
    fn update_product(
        &self,
        product_id: i32,
        business_id: i32,
        updates: &UpdateProduct,
    ) -> RepositoryResult<Product>;
    /// Apply a relative stock change. Negative deltas use an atomic
    /// conditional update and fail with `InsufficientStock` rather than
    /// ever persisting a negative level.
    fn adjust_stock(
        &self,
        product_id: i32,
        business_id: i32,
        delta: i32,
    ) -> RepositoryResult<Product>;
    fn delete_product(&self, product_id: i32, business_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over bills.
pub trait BillReader {
    fn get_bill_by_id(&self, id: i32, business_id: i32) -> RepositoryResult<Option<Bill>>;
    fn list_bills(&self, query: BillListQuery) -> RepositoryResult<(usize, Vec<Bill>)>;
}

/// Write operations over bills. Pricing, stock decrements and the ledger
/// append all happen inside one transaction here.
pub trait BillWriter {
    fn create_bill(&self, new_bill: &NewBill) -> RepositoryResult<BillOutcome>;
}

/// Read-only operations over the append-only sales ledger.
pub trait SaleReader {
    /// Ledger rows in the query window, newest first.
    fn list_sales(&self, query: SaleListQuery) -> RepositoryResult<Vec<Sale>>;
    /// All-time `(revenue_cents, sale_count)` for a business.
    fn sales_totals(&self, business_id: i32) -> RepositoryResult<(i64, i64)>;
}

/// Read-only operations over notifications.
pub trait NotificationReader {
    fn list_unread(&self, business_id: i32) -> RepositoryResult<Vec<Notification>>;
}

/// Write operations over notifications.
pub trait NotificationWriter {
    fn create_notification(
        &self,
        new_notification: &NewNotification,
    ) -> RepositoryResult<Notification>;
    /// One-way `UNREAD -> READ` transition; re-reading a read notification
    /// is a no-op returning the stored row.
    fn mark_read(&self, notification_id: i32, business_id: i32) -> RepositoryResult<Notification>;
}
