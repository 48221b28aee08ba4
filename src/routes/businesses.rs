use actix_web::{HttpResponse, Responder, get, post, web};

use crate::auth::AuthenticatedUser;
use crate::forms::businesses::AddBusinessForm;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::businesses;

#[post("/v1/businesses")]
/// Register a business for the authenticated account. Non-premium
/// accounts are limited to one.
pub async fn add_business(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<AddBusinessForm>,
) -> impl Responder {
    match businesses::create_business(repo.get_ref(), &user, form.into_inner()) {
        Ok(business) => HttpResponse::Created().json(business),
        Err(err) => error_response(err, "Failed to create business"),
    }
}

#[get("/v1/businesses")]
pub async fn list_businesses(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match businesses::list_businesses(repo.get_ref(), &user) {
        Ok(owned) => HttpResponse::Ok().json(owned),
        Err(err) => error_response(err, "Failed to list businesses"),
    }
}

#[get("/v1/businesses/{business_id}")]
pub async fn show_business(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    path: web::Path<i32>,
) -> impl Responder {
    match businesses::get_business(repo.get_ref(), &user, path.into_inner()) {
        Ok(business) => HttpResponse::Ok().json(business),
        Err(err) => error_response(err, "Failed to load business"),
    }
}
