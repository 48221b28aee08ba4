use std::collections::HashMap;

use diesel::prelude::*;

use crate::{
    domain::bill::{
        Bill as DomainBill, BillItem as DomainBillItem, BillItemError, BillItemErrorReason,
        BillListQuery, BillOutcome, NewBill as DomainNewBill, apply_discount,
    },
    domain::product::Product as DomainProduct,
    models::bill::{
        Bill as DbBill, BillItem as DbBillItem, NewBill as DbNewBill, NewBillItem as DbNewBillItem,
    },
    models::product::Product as DbProduct,
    models::sale::NewSale as DbNewSale,
    repository::errors::{RepositoryError, RepositoryResult},
    repository::{BillReader, BillWriter, DieselRepository},
};

impl BillReader for DieselRepository {
    fn get_bill_by_id(&self, id: i32, business_id: i32) -> RepositoryResult<Option<DomainBill>> {
        use crate::schema::{bill_items, bills};

        let mut conn = self.conn()?;
        let bill = bills::table
            .filter(bills::id.eq(id))
            .filter(bills::business_id.eq(business_id))
            .first::<DbBill>(&mut conn)
            .optional()?;

        let Some(bill) = bill else {
            return Ok(None);
        };

        let items = bill_items::table
            .filter(bill_items::bill_id.eq(bill.id))
            .order(bill_items::id.asc())
            .load::<DbBillItem>(&mut conn)?;

        Ok(Some(DomainBill::from((bill, items))))
    }

    fn list_bills(&self, query: BillListQuery) -> RepositoryResult<(usize, Vec<DomainBill>)> {
        use crate::schema::{bill_items, bills};

        let mut conn = self.conn()?;

        let total = bills::table
            .filter(bills::business_id.eq(query.business_id))
            .count()
            .get_result::<i64>(&mut conn)? as usize;

        let mut items = bills::table
            .filter(bills::business_id.eq(query.business_id))
            .order(bills::created_at.desc())
            .then_order_by(bills::id.desc())
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(pagination) = &query.pagination {
            let offset = ((pagination.page.max(1) - 1) * pagination.per_page) as i64;
            let limit = pagination.per_page as i64;
            items = items.offset(offset).limit(limit);
        }

        let db_bills = items.load::<DbBill>(&mut conn)?;
        if db_bills.is_empty() {
            return Ok((total, Vec::new()));
        }

        let bill_ids: Vec<i32> = db_bills.iter().map(|bill| bill.id).collect();
        let rows = bill_items::table
            .filter(bill_items::bill_id.eq_any(&bill_ids))
            .order(bill_items::id.asc())
            .load::<DbBillItem>(&mut conn)?;

        let mut items_by_bill: HashMap<i32, Vec<DbBillItem>> = HashMap::new();
        for row in rows {
            items_by_bill.entry(row.bill_id).or_default().push(row);
        }

        let domain_bills = db_bills
            .into_iter()
            .map(|bill| {
                let items = items_by_bill.remove(&bill.id).unwrap_or_default();
                DomainBill::from((bill, items))
            })
            .collect();

        Ok((total, domain_bills))
    }
}

impl BillWriter for DieselRepository {
    fn create_bill(&self, new_bill: &DomainNewBill) -> RepositoryResult<BillOutcome> {
        use crate::schema::{bill_items, bills, products, sales};

        let mut conn = self.conn()?;
        let now = chrono::Utc::now().naive_utc();

        conn.transaction::<BillOutcome, RepositoryError, _>(|conn| {
            struct Line {
                product_id: i32,
                name: String,
                quantity: i32,
                unit_price_cents: i64,
                subtotal_cents: i64,
            }

            let mut errors: Vec<BillItemError> = Vec::new();
            let mut lines: Vec<Line> = Vec::new();
            let mut low_stock: Vec<DomainProduct> = Vec::new();

            for item in &new_bill.items {
                let product = products::table
                    .filter(products::id.eq(item.product_id))
                    .filter(products::business_id.eq(new_bill.business_id))
                    .first::<DbProduct>(conn)
                    .optional()?;

                let Some(product) = product else {
                    errors.push(BillItemError {
                        product_id: item.product_id,
                        reason: BillItemErrorReason::NotFound,
                    });
                    continue;
                };

                // Conditional decrement; zero rows affected means another
                // bill consumed the stock first. The failing line is
                // dropped, sibling lines proceed.
                let updated = diesel::update(
                    products::table
                        .filter(products::id.eq(item.product_id))
                        .filter(products::business_id.eq(new_bill.business_id))
                        .filter(products::stock.ge(item.quantity)),
                )
                .set((
                    products::stock.eq(products::stock - item.quantity),
                    products::updated_at.eq(now),
                ))
                .get_result::<DbProduct>(conn)
                .optional()?;

                let Some(post) = updated else {
                    errors.push(BillItemError {
                        product_id: item.product_id,
                        reason: BillItemErrorReason::InsufficientStock,
                    });
                    continue;
                };

                // The unit price is snapshotted from the stored product
                // inside this transaction, never taken from the caller.
                let unit_price_cents = product.price_cents;
                let subtotal_cents = unit_price_cents * i64::from(item.quantity);

                lines.push(Line {
                    product_id: product.id,
                    name: product.name,
                    quantity: item.quantity,
                    unit_price_cents,
                    subtotal_cents,
                });

                let post: DomainProduct = post.into();
                if post.is_low_stock() {
                    low_stock.push(post);
                }
            }

            if lines.is_empty() {
                // No decrements happened for failed lines, so there is
                // nothing to unwind; report the failures without a bill.
                return Ok(BillOutcome {
                    bill: None,
                    errors,
                    low_stock,
                });
            }

            let subtotal_sum: i64 = lines.iter().map(|line| line.subtotal_cents).sum();
            let total_cents = apply_discount(subtotal_sum, new_bill.discount_percent);

            let db_bill = diesel::insert_into(bills::table)
                .values(&DbNewBill {
                    business_id: new_bill.business_id,
                    customer_name: new_bill.customer_name.as_deref(),
                    customer_email: new_bill.customer_email.as_deref(),
                    customer_phone: new_bill.customer_phone.as_deref(),
                    notes: new_bill.notes.as_deref(),
                    discount_percent: new_bill.discount_percent,
                    total_cents,
                    created_at: now,
                })
                .get_result::<DbBill>(conn)?;

            let db_items: Vec<DbNewBillItem> = lines
                .iter()
                .map(|line| DbNewBillItem {
                    bill_id: db_bill.id,
                    product_id: line.product_id,
                    name: line.name.as_str(),
                    quantity: line.quantity,
                    unit_price_cents: line.unit_price_cents,
                    subtotal_cents: line.subtotal_cents,
                })
                .collect();
            diesel::insert_into(bill_items::table)
                .values(&db_items)
                .execute(conn)?;

            // One ledger row per committed line, stamped with the bill time.
            let db_sales: Vec<DbNewSale> = lines
                .iter()
                .map(|line| DbNewSale {
                    business_id: new_bill.business_id,
                    product_id: line.product_id,
                    quantity: line.quantity,
                    total_price_cents: line.subtotal_cents,
                    sold_at: db_bill.created_at,
                })
                .collect();
            diesel::insert_into(sales::table)
                .values(&db_sales)
                .execute(conn)?;

            let items: Vec<DomainBillItem> = lines
                .into_iter()
                .map(|line| DomainBillItem {
                    product_id: line.product_id,
                    name: line.name,
                    quantity: line.quantity,
                    unit_price_cents: line.unit_price_cents,
                    subtotal_cents: line.subtotal_cents,
                })
                .collect();

            Ok(BillOutcome {
                bill: Some(db_bill.into_domain_items(items)),
                errors,
                low_stock,
            })
        })
    }
}
