use actix_web::{HttpResponse, Responder, get, post, web};
use serde::Deserialize;

use crate::auth::AuthenticatedUser;
use crate::forms::bills::CreateBillForm;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::billing;

#[derive(Debug, Default, Deserialize)]
pub struct BillsQuery {
    pub page: Option<usize>,
}

#[post("/v1/businesses/{business_id}/bills")]
/// Convert a cart into a bill. Lines that cannot be billed are reported
/// in the receipt while the rest commit; a cart with no billable lines
/// is rejected outright.
pub async fn add_bill(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    path: web::Path<i32>,
    form: web::Json<CreateBillForm>,
) -> impl Responder {
    match billing::create_bill(repo.get_ref(), &user, path.into_inner(), form.into_inner()) {
        Ok(receipt) => HttpResponse::Created().json(receipt),
        Err(err) => error_response(err, "Failed to create bill"),
    }
}

#[get("/v1/businesses/{business_id}/bills")]
pub async fn list_bills(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    path: web::Path<i32>,
    params: web::Query<BillsQuery>,
) -> impl Responder {
    match billing::list_bills(repo.get_ref(), &user, path.into_inner(), params.page) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => error_response(err, "Failed to list bills"),
    }
}

#[get("/v1/businesses/{business_id}/bills/{bill_id}")]
pub async fn show_bill(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    path: web::Path<(i32, i32)>,
) -> impl Responder {
    let (business_id, bill_id) = path.into_inner();
    match billing::get_bill(repo.get_ref(), &user, business_id, bill_id) {
        Ok(bill) => HttpResponse::Ok().json(bill),
        Err(err) => error_response(err, "Failed to load bill"),
    }
}
