use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::auth::AuthenticatedUser;
use crate::domain::product::{NewProduct, Product, ProductListQuery};
use crate::forms::products::{AddProductForm, AdjustStockForm, UpdateProductForm};
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{BusinessReader, ProductReader, ProductWriter, UserReader};
use crate::services::{ServiceError, ServiceResult};
use crate::{BARCODE_LEN, DEFAULT_LOW_STOCK_LIMIT};

/// Attempts before giving up on finding an unclaimed barcode token.
const BARCODE_ATTEMPTS: usize = 5;

/// Query parameters accepted by the product list endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ProductsQuery {
    /// Optional search string matched against name or barcode.
    pub search: Option<String>,
    /// Page requested by the client (1-based).
    pub page: Option<usize>,
}

/// A random short token for scanning. Uniqueness is not guaranteed here;
/// the global unique index on the barcode column is, and creation retries
/// on collision.
fn barcode_token() -> String {
    let token = Uuid::new_v4().simple().to_string();
    token[..BARCODE_LEN].to_ascii_uppercase()
}

/// Creates a product in the business catalog, assigning a globally unique
/// barcode.
pub fn create_product<R>(
    repo: &R,
    auth: &AuthenticatedUser,
    business_id: i32,
    form: AddProductForm,
) -> ServiceResult<Product>
where
    R: UserReader + BusinessReader + ProductWriter + ?Sized,
{
    form.validate()
        .map_err(|err| ServiceError::Validation(err.to_string()))?;

    let name = form.name.trim().to_string();
    if name.is_empty() {
        return Err(ServiceError::Validation(
            "product name cannot be empty".to_string(),
        ));
    }

    let (_, business) = crate::services::authorize_business(repo, auth, business_id)?;

    for _ in 0..BARCODE_ATTEMPTS {
        let mut new_product = NewProduct::new(
            business.id,
            name.clone(),
            form.price_cents,
            form.stock,
            form.low_stock_threshold,
            barcode_token(),
        );
        if let Some(image) = form.image.as_ref().filter(|value| !value.trim().is_empty()) {
            new_product = new_product.with_image(image.clone());
        }

        match repo.create_product(&new_product) {
            Ok(product) => return Ok(product),
            Err(err) if err.is_unique_violation() => continue,
            Err(err) => return Err(err.into()),
        }
    }

    Err(ServiceError::Internal(
        "could not allocate a unique barcode".to_string(),
    ))
}

/// Fetch one product, scoped by business.
pub fn get_product<R>(
    repo: &R,
    auth: &AuthenticatedUser,
    business_id: i32,
    product_id: i32,
) -> ServiceResult<Product>
where
    R: UserReader + BusinessReader + ProductReader + ?Sized,
{
    let (_, business) = crate::services::authorize_business(repo, auth, business_id)?;

    repo.get_product_by_id(product_id, business.id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)
}

/// Resolve a scanned barcode to a product of this business.
pub fn find_by_barcode<R>(
    repo: &R,
    auth: &AuthenticatedUser,
    business_id: i32,
    barcode: &str,
) -> ServiceResult<Product>
where
    R: UserReader + BusinessReader + ProductReader + ?Sized,
{
    let (_, business) = crate::services::authorize_business(repo, auth, business_id)?;

    repo.get_product_by_barcode(barcode, business.id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)
}

/// Paginated product listing with optional name/barcode search.
pub fn list_products<R>(
    repo: &R,
    auth: &AuthenticatedUser,
    business_id: i32,
    query: ProductsQuery,
) -> ServiceResult<Paginated<Product>>
where
    R: UserReader + BusinessReader + ProductReader + ?Sized,
{
    let (_, business) = crate::services::authorize_business(repo, auth, business_id)?;

    let page = query.page.unwrap_or(1);
    let mut list_query = ProductListQuery::new(business.id).paginate(page, DEFAULT_ITEMS_PER_PAGE);

    if let Some(term) = query.search.as_ref().filter(|term| !term.trim().is_empty()) {
        list_query = list_query.search(term.trim());
    }

    let (total, items) = repo.list_products(list_query).map_err(ServiceError::from)?;
    let total_pages = total.div_ceil(DEFAULT_ITEMS_PER_PAGE);

    Ok(Paginated::new(items, page, total_pages))
}

/// Apply a relative stock change (positive restock, negative consumption).
pub fn adjust_stock<R>(
    repo: &R,
    auth: &AuthenticatedUser,
    business_id: i32,
    product_id: i32,
    form: AdjustStockForm,
) -> ServiceResult<Product>
where
    R: UserReader + BusinessReader + ProductWriter + ?Sized,
{
    if form.delta == 0 {
        return Err(ServiceError::Validation(
            "stock adjustment cannot be zero".to_string(),
        ));
    }
    // i32::MIN cannot be negated for the stock guard.
    if form.delta == i32::MIN {
        return Err(ServiceError::Validation(
            "stock adjustment out of range".to_string(),
        ));
    }

    let (_, business) = crate::services::authorize_business(repo, auth, business_id)?;

    repo.adjust_stock(product_id, business.id, form.delta)
        .map_err(ServiceError::from)
}

/// Partial update of product fields (name, price, threshold, image).
pub fn update_product<R>(
    repo: &R,
    auth: &AuthenticatedUser,
    business_id: i32,
    product_id: i32,
    form: UpdateProductForm,
) -> ServiceResult<Product>
where
    R: UserReader + BusinessReader + ProductWriter + ?Sized,
{
    form.validate()
        .map_err(|err| ServiceError::Validation(err.to_string()))?;

    let updates = form.into_update();
    if updates.is_empty() {
        return Err(ServiceError::Validation(
            "update carries no changes".to_string(),
        ));
    }

    let (_, business) = crate::services::authorize_business(repo, auth, business_id)?;

    repo.update_product(product_id, business.id, &updates)
        .map_err(ServiceError::from)
}

/// Remove a product from the catalog. Historical bills and ledger rows
/// keep referencing its id.
pub fn delete_product<R>(
    repo: &R,
    auth: &AuthenticatedUser,
    business_id: i32,
    product_id: i32,
) -> ServiceResult<()>
where
    R: UserReader + BusinessReader + ProductWriter + ?Sized,
{
    let (_, business) = crate::services::authorize_business(repo, auth, business_id)?;

    repo.delete_product(product_id, business.id)
        .map_err(ServiceError::from)
}

/// Products closest to running out, ascending by stock.
pub fn low_stock<R>(
    repo: &R,
    auth: &AuthenticatedUser,
    business_id: i32,
    limit: Option<i64>,
) -> ServiceResult<Vec<Product>>
where
    R: UserReader + BusinessReader + ProductReader + ?Sized,
{
    let (_, business) = crate::services::authorize_business(repo, auth, business_id)?;

    let limit = limit.unwrap_or(DEFAULT_LOW_STOCK_LIMIT).max(1);
    repo.list_low_stock(business.id, limit)
        .map_err(ServiceError::from)
}
