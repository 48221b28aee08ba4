use actix_web::{HttpResponse, Responder, delete, get, patch, post, web};
use serde::Deserialize;

use crate::auth::AuthenticatedUser;
use crate::forms::products::{AddProductForm, AdjustStockForm, UpdateProductForm};
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::products;
use crate::services::products::ProductsQuery;

#[derive(Debug, Default, Deserialize)]
pub struct LowStockQuery {
    pub limit: Option<i64>,
}

#[post("/v1/businesses/{business_id}/products")]
/// Add a product to the catalog. The barcode is generated server side.
pub async fn add_product(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    path: web::Path<i32>,
    form: web::Json<AddProductForm>,
) -> impl Responder {
    match products::create_product(repo.get_ref(), &user, path.into_inner(), form.into_inner()) {
        Ok(product) => HttpResponse::Created().json(product),
        Err(err) => error_response(err, "Failed to create product"),
    }
}

#[get("/v1/businesses/{business_id}/products")]
/// Paginated catalog listing with optional name/barcode search.
pub async fn list_products(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    path: web::Path<i32>,
    params: web::Query<ProductsQuery>,
) -> impl Responder {
    match products::list_products(repo.get_ref(), &user, path.into_inner(), params.into_inner()) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => error_response(err, "Failed to list products"),
    }
}

#[get("/v1/businesses/{business_id}/products/low-stock")]
pub async fn list_low_stock(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    path: web::Path<i32>,
    params: web::Query<LowStockQuery>,
) -> impl Responder {
    match products::low_stock(repo.get_ref(), &user, path.into_inner(), params.limit) {
        Ok(short) => HttpResponse::Ok().json(short),
        Err(err) => error_response(err, "Failed to list low-stock products"),
    }
}

#[get("/v1/businesses/{business_id}/products/barcode/{barcode}")]
/// Resolve a scanned barcode within the business catalog.
pub async fn find_by_barcode(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    path: web::Path<(i32, String)>,
) -> impl Responder {
    let (business_id, barcode) = path.into_inner();
    match products::find_by_barcode(repo.get_ref(), &user, business_id, &barcode) {
        Ok(product) => HttpResponse::Ok().json(product),
        Err(err) => error_response(err, "Failed to resolve barcode"),
    }
}

#[get("/v1/businesses/{business_id}/products/{product_id}")]
pub async fn show_product(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    path: web::Path<(i32, i32)>,
) -> impl Responder {
    let (business_id, product_id) = path.into_inner();
    match products::get_product(repo.get_ref(), &user, business_id, product_id) {
        Ok(product) => HttpResponse::Ok().json(product),
        Err(err) => error_response(err, "Failed to load product"),
    }
}

#[patch("/v1/businesses/{business_id}/products/{product_id}")]
pub async fn edit_product(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    path: web::Path<(i32, i32)>,
    form: web::Json<UpdateProductForm>,
) -> impl Responder {
    let (business_id, product_id) = path.into_inner();
    match products::update_product(
        repo.get_ref(),
        &user,
        business_id,
        product_id,
        form.into_inner(),
    ) {
        Ok(product) => HttpResponse::Ok().json(product),
        Err(err) => error_response(err, "Failed to update product"),
    }
}

#[delete("/v1/businesses/{business_id}/products/{product_id}")]
/// Remove a product. Receipts and ledger rows referencing it survive.
pub async fn delete_product(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    path: web::Path<(i32, i32)>,
) -> impl Responder {
    let (business_id, product_id) = path.into_inner();
    match products::delete_product(repo.get_ref(), &user, business_id, product_id) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err, "Failed to delete product"),
    }
}

#[post("/v1/businesses/{business_id}/products/{product_id}/stock")]
/// Relative stock adjustment. A decrement below zero is rejected without
/// changing anything.
pub async fn adjust_stock(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    path: web::Path<(i32, i32)>,
    form: web::Json<AdjustStockForm>,
) -> impl Responder {
    let (business_id, product_id) = path.into_inner();
    match products::adjust_stock(
        repo.get_ref(),
        &user,
        business_id,
        product_id,
        form.into_inner(),
    ) {
        Ok(product) => HttpResponse::Ok().json(product),
        Err(err) => error_response(err, "Failed to adjust stock"),
    }
}
