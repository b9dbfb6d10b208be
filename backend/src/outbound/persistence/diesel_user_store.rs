//! PostgreSQL-backed `UserStore` implementation using Diesel ORM.
//!
//! The name filter becomes a case-insensitive `ILIKE` with the filter text
//! escaped, so it matches literally. Unsorted listings fall back to creation
//! order.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{UserStore, UserStoreError};
use crate::domain::{NewUser, SortDirection, User, UserId, UserListQuery, UserPatch};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewUserRow, UserChangeset, UserRow};
use super::pool::DbPool;
use super::schema::users;

/// Diesel-backed implementation of the [`UserStore`] port.
#[derive(Clone)]
pub struct DieselUserStore {
    pool: DbPool,
}

impl DieselUserStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn parse_id(id: &UserId) -> Result<Uuid, UserStoreError> {
    id.to_uuid()
        .ok_or_else(|| UserStoreError::invalid_id(id.as_str()))
}

fn row_to_user(row: UserRow) -> Result<User, UserStoreError> {
    let age = u32::try_from(row.age)
        .map_err(|_| UserStoreError::query(format!("stored age {} is negative", row.age)))?;
    Ok(User::new(UserId::from(row.id), row.name, row.email, age))
}

fn age_for_db(age: i64) -> Result<i32, UserStoreError> {
    i32::try_from(age).map_err(|_| UserStoreError::query(format!("age {age} out of range")))
}

/// Escape `LIKE` metacharacters and wrap the text for a substring match.
fn contains_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn clamp_to_i32(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
}

fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[async_trait]
impl UserStore for DieselUserStore {
    async fn find(&self, query: &UserListQuery) -> Result<Vec<User>, UserStoreError> {
        let mut statement = users::table.select(UserRow::as_select()).into_boxed();

        if let Some(filter) = query.name_filter() {
            statement = statement.filter(users::name.ilike(contains_pattern(filter.as_str())));
        }
        if let Some(range) = query.age_range() {
            if let Some(min) = range.min() {
                if min > i64::from(i32::MAX) {
                    return Ok(Vec::new());
                }
                statement = statement.filter(users::age.ge(clamp_to_i32(min)));
            }
            if let Some(max) = range.max() {
                statement = statement.filter(users::age.le(clamp_to_i32(max)));
            }
        }
        if let Some(sort) = query.sort() {
            for field in sort.fields() {
                let descending = field.direction == SortDirection::Descending;
                statement = match (field.field.as_str(), descending) {
                    ("name", false) => statement.then_order_by(users::name.asc()),
                    ("name", true) => statement.then_order_by(users::name.desc()),
                    ("email", false) => statement.then_order_by(users::email.asc()),
                    ("email", true) => statement.then_order_by(users::email.desc()),
                    ("age", false) => statement.then_order_by(users::age.asc()),
                    ("age", true) => statement.then_order_by(users::age.desc()),
                    ("id" | "_id", false) => statement.then_order_by(users::id.asc()),
                    ("id" | "_id", true) => statement.then_order_by(users::id.desc()),
                    _ => statement,
                };
            }
        }
        statement = statement
            .then_order_by(users::created_at.asc())
            .then_order_by(users::id.asc())
            .offset(to_i64(query.offset()))
            .limit(to_i64(query.limit()));

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<UserRow> = statement
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_user).collect()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserStoreError> {
        let uuid = parse_id(id)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = users::table
            .find(uuid)
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_user).transpose()
    }

    async fn insert(&self, user: &NewUser) -> Result<User, UserStoreError> {
        user.validate().map_err(UserStoreError::validation)?;
        let new_row = NewUserRow {
            id: Uuid::new_v4(),
            name: &user.name,
            email: &user.email,
            age: age_for_db(user.age)?,
        };

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::insert_into(users::table)
            .values(&new_row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_user(row)
    }

    async fn update_by_id(
        &self,
        id: &UserId,
        patch: &UserPatch,
    ) -> Result<Option<User>, UserStoreError> {
        let uuid = parse_id(id)?;
        patch.validate().map_err(UserStoreError::validation)?;
        let changes = UserChangeset {
            name: patch.name.as_deref(),
            email: patch.email.as_deref(),
            age: patch.age.map(age_for_db).transpose()?,
            updated_at: Utc::now(),
        };

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::update(users::table.find(uuid))
            .set(&changes)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_user).transpose()
    }

    async fn delete_by_id(&self, id: &UserId) -> Result<(), UserStoreError> {
        let uuid = parse_id(id)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(users::table.find(uuid))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("sam", "%sam%")]
    #[case("50%", "%50\\%%")]
    #[case("a_b", "%a\\_b%")]
    #[case("c:\\dir", "%c:\\\\dir%")]
    fn filter_text_is_escaped(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(contains_pattern(text), expected);
    }

    #[rstest]
    #[case(-5, -5)]
    #[case(i64::MIN, i32::MIN)]
    #[case(i64::MAX, i32::MAX)]
    fn bounds_clamp_into_column_range(#[case] value: i64, #[case] expected: i32) {
        assert_eq!(clamp_to_i32(value), expected);
    }

    #[rstest]
    fn negative_stored_age_is_reported() {
        let row = UserRow {
            id: Uuid::nil(),
            name: "Sam".to_owned(),
            email: "sam@example.com".to_owned(),
            age: -1,
        };
        assert!(matches!(row_to_user(row), Err(UserStoreError::Query { .. })));
    }

    #[rstest]
    fn malformed_id_is_rejected_before_querying() {
        assert_eq!(
            parse_id(&UserId::new("abc")),
            Err(UserStoreError::invalid_id("abc"))
        );
    }
}
