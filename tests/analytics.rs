use stockbook::auth::AuthenticatedUser;
use stockbook::domain::bill::{BillItemRequest, NewBill};
use stockbook::repository::{BillWriter, DieselRepository, ProductWriter};
use stockbook::services::analytics::{self, ReportWindow};
use stockbook::services::ServiceError;

mod common;

fn owner() -> AuthenticatedUser {
    AuthenticatedUser::new("owner-1", "owner-1@example.com")
}

fn sell(repo: &DieselRepository, business_id: i32, product_id: i32, quantity: i32) {
    let outcome = repo
        .create_bill(&NewBill::new(
            business_id,
            vec![BillItemRequest {
                product_id,
                quantity,
            }],
        ))
        .unwrap();
    assert!(outcome.bill.is_some());
}

#[test]
fn test_totals_snapshot_reflects_ledger_and_catalog() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let (_, business_id) = common::seed_business(&repo, "owner-1", "Corner Shop");
    let mug = common::seed_product(&repo, business_id, "Mug", 1000, 50, 1);
    common::seed_product(&repo, business_id, "Cap", 2000, 50, 1);

    sell(&repo, business_id, mug, 2);
    sell(&repo, business_id, mug, 1);

    let snapshot = analytics::totals_snapshot(&repo, &owner(), business_id).unwrap();
    assert_eq!(snapshot.total_sales_cents, 3000);
    assert_eq!(snapshot.total_products, 2);
}

#[test]
fn test_sales_report_totals_average_and_rankings() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let (_, business_id) = common::seed_business(&repo, "owner-1", "Corner Shop");
    let mug = common::seed_product(&repo, business_id, "Mug", 100, 50, 1);
    let cap = common::seed_product(&repo, business_id, "Cap", 2000, 50, 1);

    // Mug: qty 10, revenue 1000. Cap: qty 2, revenue 4000.
    sell(&repo, business_id, mug, 10);
    sell(&repo, business_id, cap, 2);

    let report =
        analytics::sales_report(&repo, &owner(), business_id, ReportWindow::default()).unwrap();

    assert_eq!(report.total_orders, 2);
    assert_eq!(report.total_cents, 5000);
    assert_eq!(report.average_cents, 2500);

    assert_eq!(report.top_by_quantity[0].name, "Mug");
    assert_eq!(report.top_by_quantity[0].quantity, 10);
    assert_eq!(report.top_by_revenue[0].name, "Cap");
    assert_eq!(report.top_by_revenue[0].revenue_cents, 4000);
    assert_eq!(report.sales.len(), 2);
}

#[test]
fn test_totals_snapshot_zeroed_on_empty_ledger() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let (_, business_id) = common::seed_business(&repo, "owner-1", "Corner Shop");
    common::seed_product(&repo, business_id, "Mug", 1000, 50, 1);

    // SUM over zero ledger rows is NULL at the store; it must surface as 0.
    let snapshot = analytics::totals_snapshot(&repo, &owner(), business_id).unwrap();
    assert_eq!(snapshot.total_sales_cents, 0);
    assert_eq!(snapshot.total_products, 1);
}

#[test]
fn test_sales_report_empty_window_is_zeroed_not_an_error() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let (_, business_id) = common::seed_business(&repo, "owner-1", "Corner Shop");

    let report =
        analytics::sales_report(&repo, &owner(), business_id, ReportWindow::default()).unwrap();

    assert_eq!(report.total_cents, 0);
    assert_eq!(report.average_cents, 0);
    assert_eq!(report.total_orders, 0);
    assert!(report.top_by_revenue.is_empty());
    assert!(report.sales.is_empty());
}

#[test]
fn test_sales_report_names_deleted_products_unknown() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let (_, business_id) = common::seed_business(&repo, "owner-1", "Corner Shop");
    let mug = common::seed_product(&repo, business_id, "Mug", 1000, 50, 1);

    sell(&repo, business_id, mug, 1);
    repo.delete_product(mug, business_id).unwrap();

    let report =
        analytics::sales_report(&repo, &owner(), business_id, ReportWindow::default()).unwrap();

    // The ledger row survives the deletion; only the name is gone.
    assert_eq!(report.total_cents, 1000);
    assert_eq!(report.top_by_revenue[0].name, "Unknown");
}

#[test]
fn test_period_sales_accepts_known_tokens_only() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let (_, business_id) = common::seed_business(&repo, "owner-1", "Corner Shop");
    let mug = common::seed_product(&repo, business_id, "Mug", 1000, 50, 1);
    sell(&repo, business_id, mug, 1);

    let week = analytics::period_sales(&repo, &owner(), business_id, "7_days").unwrap();
    assert_eq!(week.len(), 1);
    let month = analytics::period_sales(&repo, &owner(), business_id, "30_days").unwrap();
    assert_eq!(month.len(), 1);

    let err = analytics::period_sales(&repo, &owner(), business_id, "90_days")
        .expect_err("expected unknown period to be rejected");
    assert!(matches!(err, ServiceError::Validation(_)));
}

#[test]
fn test_monthly_top_products_buckets_current_month() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let (_, business_id) = common::seed_business(&repo, "owner-1", "Corner Shop");
    let mug = common::seed_product(&repo, business_id, "Mug", 100, 50, 1);
    let cap = common::seed_product(&repo, business_id, "Cap", 2000, 50, 1);

    sell(&repo, business_id, mug, 10);
    sell(&repo, business_id, cap, 1);

    let rollup = analytics::monthly_top_products(&repo, &owner(), business_id, None).unwrap();

    // All sales landed just now, so exactly one month appears.
    assert_eq!(rollup.len(), 1);
    assert_eq!(rollup[0].top[0].name, "Cap");
    assert_eq!(rollup[0].top[0].revenue_cents, 2000);
    assert_eq!(rollup[0].top[1].name, "Mug");
}

#[test]
fn test_analytics_are_hidden_from_other_accounts() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let (_, business_id) = common::seed_business(&repo, "owner-1", "Corner Shop");
    common::seed_business(&repo, "owner-2", "Theirs");

    let stranger = AuthenticatedUser::new("owner-2", "owner-2@example.com");
    let err = analytics::totals_snapshot(&repo, &stranger, business_id)
        .expect_err("expected cross-account analytics to be refused");
    assert!(matches!(err, ServiceError::NotFound));
}
