use actix_web::{HttpResponse, Responder, get, post, web};

use crate::auth::AuthenticatedUser;
use crate::forms::notifications::AddNotificationForm;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::notifications;

#[get("/v1/businesses/{business_id}/notifications")]
/// Unread notifications, newest first.
pub async fn list_notifications(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    path: web::Path<i32>,
) -> impl Responder {
    match notifications::list_unread(repo.get_ref(), &user, path.into_inner()) {
        Ok(unread) => HttpResponse::Ok().json(unread),
        Err(err) => error_response(err, "Failed to list notifications"),
    }
}

#[post("/v1/businesses/{business_id}/notifications")]
pub async fn add_notification(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    path: web::Path<i32>,
    form: web::Json<AddNotificationForm>,
) -> impl Responder {
    match notifications::notify(repo.get_ref(), &user, path.into_inner(), form.into_inner()) {
        Ok(notification) => HttpResponse::Created().json(notification),
        Err(err) => error_response(err, "Failed to create notification"),
    }
}

#[post("/v1/businesses/{business_id}/notifications/{notification_id}/read")]
/// Mark a notification read. Re-marking is a no-op and keeps the
/// original read timestamp.
pub async fn mark_notification_read(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    path: web::Path<(i32, i32)>,
) -> impl Responder {
    let (business_id, notification_id) = path.into_inner();
    match notifications::mark_read(repo.get_ref(), &user, business_id, notification_id) {
        Ok(notification) => HttpResponse::Ok().json(notification),
        Err(err) => error_response(err, "Failed to mark notification read"),
    }
}
