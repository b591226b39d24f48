//! Staff groups service.

use async_trait::async_trait;
use littlelemon::{
    ids::UserId,
    policy::{Action, Resource},
    roles::{Principal, StaffGroup},
};
use mockall::automock;
use tracing::{debug, info};

use crate::{
    database::Db,
    domain::{
        authorize,
        users::{
            errors::StaffServiceError,
            models::{NewUser, User},
            repository::PgUsersRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgStaffService {
    db: Db,
    repository: PgUsersRepository,
}

impl PgStaffService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgUsersRepository::new(),
        }
    }

    /// Create a user account. Operator-only; not exposed over HTTP.
    ///
    /// # Errors
    ///
    /// Returns an error when the username is taken or storage fails.
    pub async fn create_user(&self, user: NewUser) -> Result<User, StaffServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_user(&mut tx, &user).await?;

        tx.commit().await?;

        info!(user_id = %created.id, username = %created.username, "created user");

        Ok(created)
    }

    /// Add a user to a staff group without a policy check. Operator-only.
    ///
    /// # Errors
    ///
    /// Returns an error when the user does not exist or storage fails.
    pub async fn add_to_group(
        &self,
        user: UserId,
        group: StaffGroup,
    ) -> Result<User, StaffServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self
            .repository
            .get_user(&mut tx, user)
            .await?
            .ok_or(StaffServiceError::UserNotFound)?;

        self.repository
            .add_user_to_group(&mut tx, user, group)
            .await?;

        tx.commit().await?;

        Ok(record)
    }
}

#[async_trait]
impl StaffService for PgStaffService {
    async fn list_members(
        &self,
        principal: Principal,
        group: StaffGroup,
    ) -> Result<Vec<User>, StaffServiceError> {
        authorize(&principal, Resource::StaffGroup, Action::List, None)?;

        let mut tx = self.db.begin().await?;

        let members = self.repository.list_group_members(&mut tx, group).await?;

        tx.commit().await?;

        Ok(members)
    }

    async fn grant(
        &self,
        principal: Principal,
        group: StaffGroup,
        user: UserId,
    ) -> Result<User, StaffServiceError> {
        authorize(&principal, Resource::StaffGroup, Action::Create, None)?;

        let mut tx = self.db.begin().await?;

        let record = self
            .repository
            .get_user(&mut tx, user)
            .await?
            .ok_or(StaffServiceError::UserNotFound)?;

        let added = self
            .repository
            .add_user_to_group(&mut tx, user, group)
            .await?;

        tx.commit().await?;

        if added == 0 {
            debug!(user_id = %user, %group, "user already in group");
        } else {
            info!(user_id = %user, %group, granted_by = %principal.user, "granted staff group");
        }

        Ok(record)
    }

    async fn revoke(
        &self,
        principal: Principal,
        group: StaffGroup,
        user: UserId,
    ) -> Result<User, StaffServiceError> {
        authorize(&principal, Resource::StaffGroup, Action::Delete, None)?;

        let mut tx = self.db.begin().await?;

        let record = self
            .repository
            .get_user(&mut tx, user)
            .await?
            .ok_or(StaffServiceError::UserNotFound)?;

        let removed = self
            .repository
            .remove_user_from_group(&mut tx, user, group)
            .await?;

        if removed == 0 {
            return Err(StaffServiceError::NotMember(group));
        }

        tx.commit().await?;

        info!(user_id = %user, %group, revoked_by = %principal.user, "revoked staff group");

        Ok(record)
    }
}

#[automock]
#[async_trait]
pub trait StaffService: Send + Sync {
    /// List the members of a staff group.
    async fn list_members(
        &self,
        principal: Principal,
        group: StaffGroup,
    ) -> Result<Vec<User>, StaffServiceError>;

    /// Add a user to a staff group. Adding an existing member is a no-op.
    async fn grant(
        &self,
        principal: Principal,
        group: StaffGroup,
        user: UserId,
    ) -> Result<User, StaffServiceError>;

    /// Remove a user from a staff group.
    async fn revoke(
        &self,
        principal: Principal,
        group: StaffGroup,
        user: UserId,
    ) -> Result<User, StaffServiceError>;
}
