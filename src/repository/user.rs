use diesel::prelude::*;

use crate::{
    domain::user::{NewUser as DomainNewUser, User as DomainUser},
    models::user::{NewUser as DbNewUser, User as DbUser},
    repository::errors::RepositoryResult,
    repository::{DieselRepository, UserReader, UserWriter},
};

impl UserReader for DieselRepository {
    fn get_user_by_external_id(&self, external_id: &str) -> RepositoryResult<Option<DomainUser>> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let user = users::table
            .filter(users::external_id.eq(external_id))
            .first::<DbUser>(&mut conn)
            .optional()?;

        Ok(user.map(Into::into))
    }
}

impl UserWriter for DieselRepository {
    fn create_user(&self, new_user: &DomainNewUser) -> RepositoryResult<DomainUser> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let db_new = DbNewUser::from(new_user);

        let created = diesel::insert_into(users::table)
            .values(&db_new)
            .get_result::<DbUser>(&mut conn)?;

        Ok(created.into())
    }

    fn set_premium(&self, external_id: &str) -> RepositoryResult<DomainUser> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let now = chrono::Utc::now().naive_utc();

        let updated = diesel::update(users::table.filter(users::external_id.eq(external_id)))
            .set((users::premium.eq(true), users::updated_at.eq(now)))
            .get_result::<DbUser>(&mut conn)?;

        Ok(updated.into())
    }
}
