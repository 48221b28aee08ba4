use actix_web::{HttpResponse, Responder, get, web};
use serde::Deserialize;

use crate::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::routes::products::LowStockQuery;
use crate::services::analytics;
use crate::services::analytics::ReportWindow;
use crate::services::products;

#[derive(Debug, Deserialize)]
pub struct PeriodQuery {
    pub period: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct MonthlyQuery {
    pub months_back: Option<u32>,
}

#[get("/v1/businesses/{business_id}/analytics/totals")]
/// All-time revenue and catalog size.
pub async fn show_totals(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    path: web::Path<i32>,
) -> impl Responder {
    match analytics::totals_snapshot(repo.get_ref(), &user, path.into_inner()) {
        Ok(snapshot) => HttpResponse::Ok().json(snapshot),
        Err(err) => error_response(err, "Failed to load totals"),
    }
}

#[get("/v1/businesses/{business_id}/analytics/report")]
/// Windowed sales report with top-product rankings.
pub async fn show_report(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    path: web::Path<i32>,
    params: web::Query<ReportWindow>,
) -> impl Responder {
    match analytics::sales_report(repo.get_ref(), &user, path.into_inner(), params.into_inner()) {
        Ok(report) => HttpResponse::Ok().json(report),
        Err(err) => error_response(err, "Failed to build sales report"),
    }
}

#[get("/v1/businesses/{business_id}/analytics/period-sales")]
/// Ledger rows for a fixed trailing period (`7_days` or `30_days`).
pub async fn show_period_sales(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    path: web::Path<i32>,
    params: web::Query<PeriodQuery>,
) -> impl Responder {
    match analytics::period_sales(repo.get_ref(), &user, path.into_inner(), &params.period) {
        Ok(sales) => HttpResponse::Ok().json(sales),
        Err(err) => error_response(err, "Failed to load period sales"),
    }
}

#[get("/v1/businesses/{business_id}/analytics/monthly-top")]
/// Calendar-month trend of the top products by revenue.
pub async fn show_monthly_top(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    path: web::Path<i32>,
    params: web::Query<MonthlyQuery>,
) -> impl Responder {
    match analytics::monthly_top_products(
        repo.get_ref(),
        &user,
        path.into_inner(),
        params.months_back,
    ) {
        Ok(rollup) => HttpResponse::Ok().json(rollup),
        Err(err) => error_response(err, "Failed to build monthly rollup"),
    }
}

#[get("/v1/businesses/{business_id}/analytics/low-stock")]
/// Products closest to running out, for the dashboard.
pub async fn show_low_stock(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    path: web::Path<i32>,
    params: web::Query<LowStockQuery>,
) -> impl Responder {
    match products::low_stock(repo.get_ref(), &user, path.into_inner(), params.limit) {
        Ok(short) => HttpResponse::Ok().json(short),
        Err(err) => error_response(err, "Failed to load low-stock snapshot"),
    }
}
