use serde::Serialize;
use validator::Validate;

use crate::auth::AuthenticatedUser;
use crate::domain::bill::{Bill, BillItemError, BillListQuery};
use crate::domain::notification::{NewNotification, NotificationKind};
use crate::forms::bills::CreateBillForm;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{BillReader, BillWriter, BusinessReader, NotificationWriter, UserReader};
use crate::services::{ServiceError, ServiceResult};

/// What the billing endpoint returns: the committed receipt plus the
/// lines that could not be billed. A partially fulfilled cart is still a
/// success.
#[derive(Debug, Serialize)]
pub struct BillReceipt {
    pub bill: Bill,
    pub errors: Vec<BillItemError>,
}

/// Converts a cart into a persisted bill.
///
/// Pricing, stock decrements and the ledger append happen atomically in
/// the repository; low-stock notifications are emitted afterwards and are
/// never allowed to unwind the bill.
pub fn create_bill<R>(
    repo: &R,
    auth: &AuthenticatedUser,
    business_id: i32,
    form: CreateBillForm,
) -> ServiceResult<BillReceipt>
where
    R: UserReader + BusinessReader + BillWriter + NotificationWriter + ?Sized,
{
    form.validate()
        .map_err(|err| ServiceError::Validation(err.to_string()))?;

    let (_, business) = crate::services::authorize_business(repo, auth, business_id)?;

    let new_bill = form.into_new_bill(business.id);
    let outcome = repo.create_bill(&new_bill).map_err(ServiceError::from)?;

    let Some(bill) = outcome.bill else {
        return Err(ServiceError::NoValidItems(outcome.errors));
    };

    for product in &outcome.low_stock {
        let message = format!(
            "{} is running low: {} left (threshold {})",
            product.name, product.stock, product.low_stock_threshold
        );
        let notification =
            NewNotification::new(business.id, message, NotificationKind::LowStock);
        if let Err(err) = repo.create_notification(&notification) {
            log::error!(
                "Failed to record low-stock notification for product {}: {err}",
                product.id
            );
        }
    }

    Ok(BillReceipt {
        bill,
        errors: outcome.errors,
    })
}

/// Fetch one bill, scoped by business.
pub fn get_bill<R>(
    repo: &R,
    auth: &AuthenticatedUser,
    business_id: i32,
    bill_id: i32,
) -> ServiceResult<Bill>
where
    R: UserReader + BusinessReader + BillReader + ?Sized,
{
    let (_, business) = crate::services::authorize_business(repo, auth, business_id)?;

    repo.get_bill_by_id(bill_id, business.id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)
}

/// Bills of a business, newest first.
pub fn list_bills<R>(
    repo: &R,
    auth: &AuthenticatedUser,
    business_id: i32,
    page: Option<usize>,
) -> ServiceResult<Paginated<Bill>>
where
    R: UserReader + BusinessReader + BillReader + ?Sized,
{
    let (_, business) = crate::services::authorize_business(repo, auth, business_id)?;

    let page = page.unwrap_or(1);
    let query = BillListQuery::new(business.id).paginate(page, DEFAULT_ITEMS_PER_PAGE);

    let (total, bills) = repo.list_bills(query).map_err(ServiceError::from)?;
    let total_pages = total.div_ceil(DEFAULT_ITEMS_PER_PAGE);

    Ok(Paginated::new(bills, page, total_pages))
}
