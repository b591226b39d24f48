//! Users Repository

use littlelemon::{
    ids::UserId,
    roles::{RoleSet, StaffGroup},
};
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::{
    domain::users::models::{NewUser, User},
    ids::try_get_id,
};

const CREATE_USER_SQL: &str = include_str!("sql/create_user.sql");
const GET_USER_SQL: &str = include_str!("sql/get_user.sql");
const GET_USER_GROUPS_SQL: &str = include_str!("sql/get_user_groups.sql");
const LIST_GROUP_MEMBERS_SQL: &str = include_str!("sql/list_group_members.sql");
const ADD_USER_TO_GROUP_SQL: &str = include_str!("sql/add_user_to_group.sql");
const REMOVE_USER_FROM_GROUP_SQL: &str = include_str!("sql/remove_user_from_group.sql");
const LOCK_USER_SQL: &str = include_str!("sql/lock_user.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgUsersRepository;

impl PgUsersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: &NewUser,
    ) -> Result<User, sqlx::Error> {
        query_as::<Postgres, User>(CREATE_USER_SQL)
            .bind(&user.username)
            .bind(&user.email)
            .bind(user.is_superuser)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserId,
    ) -> Result<Option<User>, sqlx::Error> {
        query_as::<Postgres, User>(GET_USER_SQL)
            .bind(user.into_raw())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn get_user_groups(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserId,
    ) -> Result<Vec<StaffGroup>, sqlx::Error> {
        let names = query_scalar::<Postgres, String>(GET_USER_GROUPS_SQL)
            .bind(user.into_raw())
            .fetch_all(&mut **tx)
            .await?;

        names
            .iter()
            .map(|name| {
                name.parse::<StaffGroup>()
                    .map_err(|e| sqlx::Error::ColumnDecode {
                        index: "group_name".to_string(),
                        source: Box::new(e),
                    })
            })
            .collect()
    }

    /// Hold a row lock on the user until the transaction ends.
    ///
    /// Cart writes and checkout take this lock first, so they run one at a time per user.
    pub(crate) async fn lock_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserId,
    ) -> Result<(), sqlx::Error> {
        query(LOCK_USER_SQL)
            .bind(user.into_raw())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// Resolve a user's roles, or `None` when the user does not exist.
    pub(crate) async fn get_roles(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserId,
    ) -> Result<Option<RoleSet>, sqlx::Error> {
        let Some(record) = self.get_user(tx, user).await? else {
            return Ok(None);
        };

        let groups = self.get_user_groups(tx, user).await?;

        Ok(Some(RoleSet::resolve(record.is_superuser, groups)))
    }

    pub(crate) async fn list_group_members(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        group: StaffGroup,
    ) -> Result<Vec<User>, sqlx::Error> {
        query_as::<Postgres, User>(LIST_GROUP_MEMBERS_SQL)
            .bind(group.as_str())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn add_user_to_group(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserId,
        group: StaffGroup,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(ADD_USER_TO_GROUP_SQL)
            .bind(user.into_raw())
            .bind(group.as_str())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn remove_user_from_group(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserId,
        group: StaffGroup,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(REMOVE_USER_FROM_GROUP_SQL)
            .bind(user.into_raw())
            .bind(group.as_str())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for User {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: try_get_id(row, "id")?,
            username: row.try_get("username")?,
            email: row.try_get("email")?,
            is_superuser: row.try_get("is_superuser")?,
        })
    }
}
