use diesel::prelude::*;

use crate::{
    domain::sale::{Sale as DomainSale, SaleListQuery},
    models::sale::Sale as DbSale,
    repository::errors::RepositoryResult,
    repository::{DieselRepository, SaleReader},
};

impl SaleReader for DieselRepository {
    fn list_sales(&self, query: SaleListQuery) -> RepositoryResult<Vec<DomainSale>> {
        use crate::schema::sales;

        let mut conn = self.conn()?;

        let mut items = sales::table
            .filter(sales::business_id.eq(query.business_id))
            .order(sales::sold_at.desc())
            .then_order_by(sales::id.desc())
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(from) = query.from {
            items = items.filter(sales::sold_at.ge(from));
        }

        if let Some(to) = query.to {
            items = items.filter(sales::sold_at.le(to));
        }

        let db_sales = items.load::<DbSale>(&mut conn)?;

        Ok(db_sales.into_iter().map(Into::into).collect())
    }

    fn sales_totals(&self, business_id: i32) -> RepositoryResult<(i64, i64)> {
        use crate::schema::sales;
        use diesel::dsl::sql;
        use diesel::sql_types::{BigInt, Nullable};

        let mut conn = self.conn()?;

        // SUM over an empty ledger is NULL; the cast keeps the cents in i64.
        let revenue = sales::table
            .filter(sales::business_id.eq(business_id))
            .select(sql::<Nullable<BigInt>>("SUM(total_price_cents)"))
            .first::<Option<i64>>(&mut conn)?
            .unwrap_or(0);

        let count = sales::table
            .filter(sales::business_id.eq(business_id))
            .count()
            .get_result::<i64>(&mut conn)?;

        Ok((revenue, count))
    }
}
