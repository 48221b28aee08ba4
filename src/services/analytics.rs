use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::AuthenticatedUser;
use crate::domain::product::ProductListQuery;
use crate::domain::sale::{Sale, SaleListQuery};
use crate::repository::{BusinessReader, ProductReader, SaleReader, UserReader};
use crate::services::{ServiceError, ServiceResult};

/// Rankings keep the top three products, as the dashboard displays.
const TOP_PRODUCT_COUNT: usize = 3;
/// Default trend depth for the monthly rollup.
const DEFAULT_MONTHS_BACK: u32 = 6;
/// Shown in reports for products deleted after the sale was recorded.
const UNKNOWN_PRODUCT_NAME: &str = "Unknown";

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// All-time headline numbers for the dashboard.
#[derive(Debug, Serialize)]
pub struct TotalsSnapshot {
    pub total_sales_cents: i64,
    pub total_products: i64,
}

/// One product's aggregate standing within a window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductRank {
    pub product_id: i32,
    /// Current catalog name, or "Unknown" for deleted products.
    pub name: String,
    pub quantity: i64,
    pub revenue_cents: i64,
}

/// Windowed sales report with top-product rankings and the raw ledger rows.
#[derive(Debug, Serialize)]
pub struct SalesReport {
    pub total_cents: i64,
    /// Average sale value; zero (not an error) for an empty window.
    pub average_cents: i64,
    pub total_orders: usize,
    pub top_by_quantity: Vec<ProductRank>,
    pub top_by_revenue: Vec<ProductRank>,
    pub sales: Vec<Sale>,
}

/// One calendar month of the trend rollup. Months without sales are
/// omitted entirely rather than zero-filled.
#[derive(Debug, Serialize)]
pub struct MonthlyTopProducts {
    pub year: i32,
    pub month: String,
    pub top: Vec<ProductRank>,
}

/// Optional report window; defaults to all-time when both bounds are absent.
#[derive(Debug, Default, Deserialize)]
pub struct ReportWindow {
    pub from: Option<NaiveDateTime>,
    pub to: Option<NaiveDateTime>,
}

/// All-time revenue plus catalog size.
pub fn totals_snapshot<R>(
    repo: &R,
    auth: &AuthenticatedUser,
    business_id: i32,
) -> ServiceResult<TotalsSnapshot>
where
    R: UserReader + BusinessReader + SaleReader + ProductReader + ?Sized,
{
    let (_, business) = crate::services::authorize_business(repo, auth, business_id)?;

    let (total_sales_cents, _) = repo.sales_totals(business.id).map_err(ServiceError::from)?;
    let total_products = repo
        .count_products(business.id)
        .map_err(ServiceError::from)?;

    Ok(TotalsSnapshot {
        total_sales_cents,
        total_products,
    })
}

/// Windowed sales report. Reads are idempotent: the same window over an
/// unchanged ledger yields the same report.
pub fn sales_report<R>(
    repo: &R,
    auth: &AuthenticatedUser,
    business_id: i32,
    window: ReportWindow,
) -> ServiceResult<SalesReport>
where
    R: UserReader + BusinessReader + SaleReader + ProductReader + ?Sized,
{
    let (_, business) = crate::services::authorize_business(repo, auth, business_id)?;

    let mut query = SaleListQuery::new(business.id);
    if let Some(from) = window.from {
        query = query.from(from);
    }
    if let Some(to) = window.to {
        query = query.to(to);
    }

    let sales = repo.list_sales(query).map_err(ServiceError::from)?;
    let names = product_names(repo, business.id)?;

    let total_cents: i64 = sales.iter().map(|sale| sale.total_price_cents).sum();
    let total_orders = sales.len();
    let average_cents = if total_orders == 0 {
        0
    } else {
        rounded_div(total_cents, total_orders as i64)
    };

    let aggregates = aggregate_by_product(&sales);
    let top_by_quantity = top_ranked(&aggregates, &names, |entry| entry.0);
    let top_by_revenue = top_ranked(&aggregates, &names, |entry| entry.1);

    Ok(SalesReport {
        total_cents,
        average_cents,
        total_orders,
        top_by_quantity,
        top_by_revenue,
        sales,
    })
}

/// Ledger rows for a fixed trailing period. Only the two period tokens
/// the dashboard knows are accepted.
pub fn period_sales<R>(
    repo: &R,
    auth: &AuthenticatedUser,
    business_id: i32,
    period: &str,
) -> ServiceResult<Vec<Sale>>
where
    R: UserReader + BusinessReader + SaleReader + ?Sized,
{
    let days = match period {
        "7_days" => 7,
        "30_days" => 30,
        other => {
            return Err(ServiceError::Validation(format!(
                "unknown period `{other}`"
            )));
        }
    };

    let (_, business) = crate::services::authorize_business(repo, auth, business_id)?;

    let now = Utc::now().naive_utc();
    let query = SaleListQuery::new(business.id)
        .from(now - chrono::Duration::days(days))
        .to(now);

    repo.list_sales(query).map_err(ServiceError::from)
}

/// Calendar-month trend: the top products by revenue for each of the
/// trailing months that actually had sales.
pub fn monthly_top_products<R>(
    repo: &R,
    auth: &AuthenticatedUser,
    business_id: i32,
    months_back: Option<u32>,
) -> ServiceResult<Vec<MonthlyTopProducts>>
where
    R: UserReader + BusinessReader + SaleReader + ProductReader + ?Sized,
{
    let months_back = months_back.unwrap_or(DEFAULT_MONTHS_BACK).max(1);

    let (_, business) = crate::services::authorize_business(repo, auth, business_id)?;

    let now = Utc::now().naive_utc();
    let from = month_window_start(now, months_back);
    let sales = repo
        .list_sales(SaleListQuery::new(business.id).from(from))
        .map_err(ServiceError::from)?;
    let names = product_names(repo, business.id)?;

    // BTreeMap keys keep the months in calendar order.
    let mut buckets: BTreeMap<(i32, u32), Vec<Sale>> = BTreeMap::new();
    for sale in sales {
        let key = (sale.sold_at.year(), sale.sold_at.month());
        buckets.entry(key).or_default().push(sale);
    }

    let rollup = buckets
        .into_iter()
        .map(|((year, month), month_sales)| {
            let aggregates = aggregate_by_product(&month_sales);
            MonthlyTopProducts {
                year,
                month: month_name(month),
                top: top_ranked(&aggregates, &names, |entry| entry.1),
            }
        })
        .collect();

    Ok(rollup)
}

/// Group ledger rows by product: id -> (quantity, revenue_cents).
fn aggregate_by_product(sales: &[Sale]) -> BTreeMap<i32, (i64, i64)> {
    let mut aggregates: BTreeMap<i32, (i64, i64)> = BTreeMap::new();
    for sale in sales {
        let entry = aggregates.entry(sale.product_id).or_default();
        entry.0 += i64::from(sale.quantity);
        entry.1 += sale.total_price_cents;
    }
    aggregates
}

/// Take the top products by the given metric. The stable sort over the
/// id-ordered aggregate map breaks metric ties by ascending product id.
fn top_ranked<F>(
    aggregates: &BTreeMap<i32, (i64, i64)>,
    names: &HashMap<i32, String>,
    metric: F,
) -> Vec<ProductRank>
where
    F: Fn(&(i64, i64)) -> i64,
{
    let mut entries: Vec<(i32, (i64, i64))> = aggregates
        .iter()
        .map(|(product_id, entry)| (*product_id, *entry))
        .collect();
    entries.sort_by(|a, b| metric(&b.1).cmp(&metric(&a.1)));

    entries
        .into_iter()
        .take(TOP_PRODUCT_COUNT)
        .map(|(product_id, (quantity, revenue_cents))| ProductRank {
            product_id,
            name: names
                .get(&product_id)
                .cloned()
                .unwrap_or_else(|| UNKNOWN_PRODUCT_NAME.to_string()),
            quantity,
            revenue_cents,
        })
        .collect()
}

fn product_names<R>(repo: &R, business_id: i32) -> ServiceResult<HashMap<i32, String>>
where
    R: ProductReader + ?Sized,
{
    let (_, products) = repo
        .list_products(ProductListQuery::new(business_id))
        .map_err(ServiceError::from)?;

    Ok(products
        .into_iter()
        .map(|product| (product.id, product.name))
        .collect())
}

/// First instant of the calendar month `months_back - 1` months before
/// `now`'s month, so a window of N months includes the current one.
fn month_window_start(now: NaiveDateTime, months_back: u32) -> NaiveDateTime {
    let months = now.year() * 12 + now.month0() as i32 - (months_back as i32 - 1);
    let year = months.div_euclid(12);
    let month0 = months.rem_euclid(12) as u32;

    NaiveDate::from_ymd_opt(year, month0 + 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .unwrap_or(now)
}

fn month_name(month: u32) -> String {
    MONTH_NAMES
        .get(month.saturating_sub(1) as usize)
        .copied()
        .unwrap_or(UNKNOWN_PRODUCT_NAME)
        .to_string()
}

/// Integer division rounding half away from zero for non-negative input.
fn rounded_div(numerator: i64, denominator: i64) -> i64 {
    (numerator + denominator / 2) / denominator
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use mockall::predicate::eq;

    use crate::domain::business::Business;
    use crate::domain::product::Product;
    use crate::domain::user::User;
    use crate::repository::mock::MockRepository;

    fn datetime(year: i32, month: u32, day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(12, 0, 0))
            .unwrap_or_default()
    }

    fn sample_user() -> User {
        User {
            id: 7,
            external_id: "ext-7".to_string(),
            email: "owner@example.com".to_string(),
            premium: false,
            created_at: datetime(2026, 1, 1),
            updated_at: datetime(2026, 1, 1),
        }
    }

    fn sample_business() -> Business {
        Business {
            id: 1,
            owner_id: 7,
            name: "Corner Shop".to_string(),
            image: None,
            created_at: datetime(2026, 1, 1),
            updated_at: datetime(2026, 1, 1),
        }
    }

    fn sample_product(id: i32, name: &str) -> Product {
        Product {
            id,
            business_id: 1,
            name: name.to_string(),
            price_cents: 100,
            stock: 10,
            low_stock_threshold: 2,
            barcode: format!("BARCODE{id:05}"),
            image: None,
            created_at: datetime(2026, 1, 1),
            updated_at: datetime(2026, 1, 1),
        }
    }

    fn sale(product_id: i32, quantity: i32, total_price_cents: i64, sold_at: NaiveDateTime) -> Sale {
        Sale {
            id: 0,
            business_id: 1,
            product_id,
            quantity,
            total_price_cents,
            sold_at,
        }
    }

    fn auth() -> AuthenticatedUser {
        AuthenticatedUser::new("ext-7", "owner@example.com")
    }

    fn expect_authorized(repo: &mut MockRepository) {
        repo.expect_get_user_by_external_id()
            .returning(|_| Ok(Some(sample_user())));
        repo.expect_get_business_by_id()
            .returning(|_, _| Ok(Some(sample_business())));
    }

    #[test]
    fn sales_report_empty_window_has_zero_average() {
        let mut repo = MockRepository::new();
        expect_authorized(&mut repo);
        repo.expect_list_sales().returning(|_| Ok(Vec::new()));
        repo.expect_list_products()
            .returning(|_| Ok((0, Vec::new())));

        let report =
            sales_report(&repo, &auth(), 1, ReportWindow::default()).expect("report should build");

        assert_eq!(report.total_cents, 0);
        assert_eq!(report.average_cents, 0);
        assert_eq!(report.total_orders, 0);
        assert!(report.top_by_revenue.is_empty());
    }

    #[test]
    fn sales_report_ranks_by_quantity_and_revenue() {
        let mut repo = MockRepository::new();
        expect_authorized(&mut repo);

        let when = datetime(2026, 3, 5);
        repo.expect_list_sales().returning(move |_| {
            Ok(vec![
                // product 1: qty 10, revenue 100; product 2: qty 2, revenue 900.
                sale(1, 10, 100, when),
                sale(2, 2, 900, when),
            ])
        });
        repo.expect_list_products().returning(|_| {
            Ok((
                2,
                vec![sample_product(1, "Pencil"), sample_product(2, "Printer")],
            ))
        });

        let report =
            sales_report(&repo, &auth(), 1, ReportWindow::default()).expect("report should build");

        assert_eq!(report.top_by_quantity[0].product_id, 1);
        assert_eq!(report.top_by_revenue[0].product_id, 2);
        assert_eq!(report.top_by_revenue[0].name, "Printer");
        assert_eq!(report.total_cents, 1000);
        assert_eq!(report.average_cents, 500);
    }

    #[test]
    fn sales_report_names_deleted_products_unknown() {
        let mut repo = MockRepository::new();
        expect_authorized(&mut repo);

        let when = datetime(2026, 3, 5);
        repo.expect_list_sales()
            .returning(move |_| Ok(vec![sale(42, 1, 700, when)]));
        repo.expect_list_products()
            .returning(|_| Ok((0, Vec::new())));

        let report =
            sales_report(&repo, &auth(), 1, ReportWindow::default()).expect("report should build");

        assert_eq!(report.top_by_revenue[0].name, UNKNOWN_PRODUCT_NAME);
        assert_eq!(report.top_by_revenue[0].revenue_cents, 700);
    }

    #[test]
    fn period_sales_rejects_unknown_token() {
        let repo = MockRepository::new();

        let result = period_sales(&repo, &auth(), 1, "90_days");

        assert!(matches!(result, Err(ServiceError::Validation(_))));
    }

    #[test]
    fn monthly_rollup_takes_top_three_by_revenue() {
        let mut repo = MockRepository::new();
        expect_authorized(&mut repo);

        // March: X=300, Y=500, Z=100, W=50 -> [Y, X, Z].
        let march = datetime(2026, 3, 10);
        repo.expect_list_sales().returning(move |_| {
            Ok(vec![
                sale(1, 3, 30000, march), // X
                sale(2, 5, 50000, march), // Y
                sale(3, 1, 10000, march), // Z
                sale(4, 1, 5000, march),  // W
            ])
        });
        repo.expect_list_products().returning(|_| {
            Ok((
                4,
                vec![
                    sample_product(1, "ProductX"),
                    sample_product(2, "ProductY"),
                    sample_product(3, "ProductZ"),
                    sample_product(4, "ProductW"),
                ],
            ))
        });

        let rollup = monthly_top_products(&repo, &auth(), 1, Some(6)).expect("rollup should build");

        assert_eq!(rollup.len(), 1);
        assert_eq!(rollup[0].month, "March");
        let names: Vec<&str> = rollup[0].top.iter().map(|rank| rank.name.as_str()).collect();
        assert_eq!(names, vec!["ProductY", "ProductX", "ProductZ"]);
        assert_eq!(rollup[0].top[0].revenue_cents, 50000);
    }

    #[test]
    fn monthly_rollup_breaks_revenue_ties_by_product_id() {
        let mut repo = MockRepository::new();
        expect_authorized(&mut repo);

        let may = datetime(2026, 5, 2);
        repo.expect_list_sales().returning(move |_| {
            Ok(vec![sale(9, 1, 200, may), sale(3, 1, 200, may)])
        });
        repo.expect_list_products().returning(|_| {
            Ok((
                2,
                vec![sample_product(3, "Tape"), sample_product(9, "Glue")],
            ))
        });

        let rollup = monthly_top_products(&repo, &auth(), 1, Some(6)).expect("rollup should build");

        assert_eq!(rollup[0].top[0].product_id, 3);
        assert_eq!(rollup[0].top[1].product_id, 9);
    }

    #[test]
    fn totals_snapshot_combines_ledger_and_catalog() {
        let mut repo = MockRepository::new();
        expect_authorized(&mut repo);
        repo.expect_sales_totals()
            .with(eq(1))
            .returning(|_| Ok((123_45, 9)));
        repo.expect_count_products().with(eq(1)).returning(|_| Ok(4));

        let snapshot = totals_snapshot(&repo, &auth(), 1).expect("snapshot should build");

        assert_eq!(snapshot.total_sales_cents, 123_45);
        assert_eq!(snapshot.total_products, 4);
    }
}
