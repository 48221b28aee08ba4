use diesel::prelude::*;

use crate::{
    domain::business::{Business as DomainBusiness, NewBusiness as DomainNewBusiness},
    models::business::{Business as DbBusiness, NewBusiness as DbNewBusiness},
    repository::errors::RepositoryResult,
    repository::{BusinessReader, BusinessWriter, DieselRepository},
};

impl BusinessReader for DieselRepository {
    fn get_business_by_id(
        &self,
        id: i32,
        owner_id: i32,
    ) -> RepositoryResult<Option<DomainBusiness>> {
        use crate::schema::businesses;

        let mut conn = self.conn()?;
        let business = businesses::table
            .filter(businesses::id.eq(id))
            .filter(businesses::owner_id.eq(owner_id))
            .first::<DbBusiness>(&mut conn)
            .optional()?;

        Ok(business.map(Into::into))
    }

    fn list_businesses(&self, owner_id: i32) -> RepositoryResult<Vec<DomainBusiness>> {
        use crate::schema::businesses;

        let mut conn = self.conn()?;
        let businesses = businesses::table
            .filter(businesses::owner_id.eq(owner_id))
            .order(businesses::created_at.asc())
            .load::<DbBusiness>(&mut conn)?;

        Ok(businesses.into_iter().map(Into::into).collect())
    }
}

impl BusinessWriter for DieselRepository {
    fn create_business(&self, new_business: &DomainNewBusiness) -> RepositoryResult<DomainBusiness> {
        use crate::schema::businesses;

        let mut conn = self.conn()?;
        let db_new = DbNewBusiness::from(new_business);

        let created = diesel::insert_into(businesses::table)
            .values(&db_new)
            .get_result::<DbBusiness>(&mut conn)?;

        Ok(created.into())
    }
}
