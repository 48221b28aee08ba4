use actix_identity::Identity;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, Responder, get, post, web};

use crate::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::users;

/// Header set by the authenticating proxy with the verified subject id.
const AUTH_SUB_HEADER: &str = "X-Auth-Sub";
/// Header set by the authenticating proxy with the verified email.
const AUTH_EMAIL_HEADER: &str = "X-Auth-Email";

fn proxy_header(req: &HttpRequest, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

#[post("/auth/session")]
/// Exchange the proxy-verified identity headers for a cookie session.
///
/// The service never checks credentials itself; requests reaching this
/// endpoint have already been authenticated upstream.
pub async fn create_session(req: HttpRequest) -> impl Responder {
    let (Some(sub), Some(email)) = (
        proxy_header(&req, AUTH_SUB_HEADER),
        proxy_header(&req, AUTH_EMAIL_HEADER),
    ) else {
        return HttpResponse::Unauthorized().finish();
    };

    let user = AuthenticatedUser::new(sub, email);
    let session_string = match user.to_session_string() {
        Ok(session_string) => session_string,
        Err(err) => {
            log::error!("Failed to serialize session identity: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    match Identity::login(&req.extensions(), session_string) {
        Ok(_) => HttpResponse::Ok().json(user),
        Err(err) => {
            log::error!("Failed to establish session: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/auth/logout")]
pub async fn logout(identity: Identity) -> impl Responder {
    identity.logout();
    HttpResponse::Ok().finish()
}

#[get("/v1/profile")]
/// Find-or-create the account behind the session and report onboarding
/// state. Answers `201 Created` on the visit that created the account.
pub async fn show_profile(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match users::onboard(repo.get_ref(), &user) {
        Ok(profile) if profile.created => HttpResponse::Created().json(profile),
        Ok(profile) => HttpResponse::Ok().json(profile),
        Err(err) => error_response(err, "Failed to load profile"),
    }
}

#[post("/v1/upgrade")]
pub async fn upgrade_account(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match users::upgrade(repo.get_ref(), &user) {
        Ok(account) => HttpResponse::Ok().json(account),
        Err(err) => error_response(err, "Failed to upgrade account"),
    }
}
