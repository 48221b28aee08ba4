use diesel::prelude::*;

use crate::{
    domain::product::{
        NewProduct as DomainNewProduct, Product as DomainProduct, ProductListQuery,
        UpdateProduct as DomainUpdateProduct,
    },
    models::product::{
        NewProduct as DbNewProduct, Product as DbProduct, UpdateProduct as DbUpdateProduct,
    },
    repository::errors::{RepositoryError, RepositoryResult},
    repository::{DieselRepository, ProductReader, ProductWriter},
};

impl ProductReader for DieselRepository {
    fn get_product_by_id(
        &self,
        id: i32,
        business_id: i32,
    ) -> RepositoryResult<Option<DomainProduct>> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let product = products::table
            .filter(products::id.eq(id))
            .filter(products::business_id.eq(business_id))
            .first::<DbProduct>(&mut conn)
            .optional()?;

        Ok(product.map(Into::into))
    }

    fn get_product_by_barcode(
        &self,
        barcode: &str,
        business_id: i32,
    ) -> RepositoryResult<Option<DomainProduct>> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let product = products::table
            .filter(products::barcode.eq(barcode))
            .filter(products::business_id.eq(business_id))
            .first::<DbProduct>(&mut conn)
            .optional()?;

        Ok(product.map(Into::into))
    }

    fn list_products(
        &self,
        query: ProductListQuery,
    ) -> RepositoryResult<(usize, Vec<DomainProduct>)> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let mut count_query = products::table
            .filter(products::business_id.eq(query.business_id))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(term) = query.search.as_ref() {
            // SQLite LIKE is case-insensitive for ASCII by default.
            let pattern = format!("%{}%", term);
            count_query = count_query.filter(
                products::name
                    .like(pattern.clone())
                    .or(products::barcode.like(pattern)),
            );
        }

        let total = count_query.count().get_result::<i64>(&mut conn)? as usize;

        let mut items = products::table
            .filter(products::business_id.eq(query.business_id))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(term) = query.search.as_ref() {
            let pattern = format!("%{}%", term);
            items = items.filter(
                products::name
                    .like(pattern.clone())
                    .or(products::barcode.like(pattern)),
            );
        }

        items = items
            .order(products::created_at.desc())
            .then_order_by(products::id.desc());

        if let Some(pagination) = &query.pagination {
            let offset = ((pagination.page.max(1) - 1) * pagination.per_page) as i64;
            let limit = pagination.per_page as i64;
            items = items.offset(offset).limit(limit);
        }

        let db_products = items.load::<DbProduct>(&mut conn)?;

        Ok((total, db_products.into_iter().map(Into::into).collect()))
    }

    fn list_low_stock(&self, business_id: i32, limit: i64) -> RepositoryResult<Vec<DomainProduct>> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let db_products = products::table
            .filter(products::business_id.eq(business_id))
            .order(products::stock.asc())
            .then_order_by(products::id.asc())
            .limit(limit)
            .load::<DbProduct>(&mut conn)?;

        Ok(db_products.into_iter().map(Into::into).collect())
    }

    fn count_products(&self, business_id: i32) -> RepositoryResult<i64> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let total = products::table
            .filter(products::business_id.eq(business_id))
            .count()
            .get_result::<i64>(&mut conn)?;

        Ok(total)
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, new_product: &DomainNewProduct) -> RepositoryResult<DomainProduct> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let db_new = DbNewProduct::from(new_product);

        let created = diesel::insert_into(products::table)
            .values(&db_new)
            .get_result::<DbProduct>(&mut conn)?;

        Ok(created.into())
    }

    fn update_product(
        &self,
        product_id: i32,
        business_id: i32,
        updates: &DomainUpdateProduct,
    ) -> RepositoryResult<DomainProduct> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateProduct::from(updates);

        let target = products::table
            .filter(products::id.eq(product_id))
            .filter(products::business_id.eq(business_id));

        let updated = diesel::update(target)
            .set(&db_updates)
            .get_result::<DbProduct>(&mut conn)?;

        Ok(updated.into())
    }

    fn adjust_stock(
        &self,
        product_id: i32,
        business_id: i32,
        delta: i32,
    ) -> RepositoryResult<DomainProduct> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let now = chrono::Utc::now().naive_utc();

        // The `stock >= -delta` guard makes the decrement atomic: two
        // concurrent sales of the last unit cannot both pass it.
        let updated = if delta < 0 {
            // checked_neg: i32::MIN has no negation, and no stock level
            // can satisfy such a decrement anyway.
            match delta.checked_neg() {
                Some(required) => diesel::update(
                    products::table
                        .filter(products::id.eq(product_id))
                        .filter(products::business_id.eq(business_id))
                        .filter(products::stock.ge(required)),
                )
                .set((
                    products::stock.eq(products::stock + delta),
                    products::updated_at.eq(now),
                ))
                .get_result::<DbProduct>(&mut conn)
                .optional()?,
                None => None,
            }
        } else {
            diesel::update(
                products::table
                    .filter(products::id.eq(product_id))
                    .filter(products::business_id.eq(business_id)),
            )
            .set((
                products::stock.eq(products::stock + delta),
                products::updated_at.eq(now),
            ))
            .get_result::<DbProduct>(&mut conn)
            .optional()?
        };

        match updated {
            Some(product) => Ok(product.into()),
            None => {
                let exists = products::table
                    .filter(products::id.eq(product_id))
                    .filter(products::business_id.eq(business_id))
                    .count()
                    .get_result::<i64>(&mut conn)?
                    > 0;

                if exists {
                    Err(RepositoryError::InsufficientStock)
                } else {
                    Err(RepositoryError::NotFound)
                }
            }
        }
    }

    fn delete_product(&self, product_id: i32, business_id: i32) -> RepositoryResult<()> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let target = products::table
            .filter(products::id.eq(product_id))
            .filter(products::business_id.eq(business_id));

        let deleted = diesel::delete(target).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
