//! Carts service.

use async_trait::async_trait;
use littlelemon::{
    policy::{Action, Resource},
    pricing::Quantity,
    roles::Principal,
};
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        authorize,
        carts::{
            data::NewCartLine, errors::CartsServiceError, models::CartLine,
            repository::PgCartsRepository,
        },
        users::PgUsersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    repository: PgCartsRepository,
    users_repository: PgUsersRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCartsRepository::new(),
            users_repository: PgUsersRepository::new(),
        }
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn list_cart(&self, principal: Principal) -> Result<Vec<CartLine>, CartsServiceError> {
        authorize(&principal, Resource::Cart, Action::List, None)?;

        let mut tx = self.db.begin().await?;

        let lines = self
            .repository
            .list_cart_lines(&mut tx, principal.user)
            .await?;

        tx.commit().await?;

        Ok(lines)
    }

    async fn add_to_cart(
        &self,
        principal: Principal,
        line: NewCartLine,
    ) -> Result<CartLine, CartsServiceError> {
        authorize(&principal, Resource::Cart, Action::Create, None)?;

        let requested = Quantity::try_from(line.quantity)?;

        let mut tx = self.db.begin().await?;

        self.users_repository
            .lock_user(&mut tx, principal.user)
            .await?;

        let existing = self
            .repository
            .get_cart_quantity(&mut tx, principal.user, line.menuitem)
            .await?;

        let quantity = Quantity::try_from(i64::from(existing) + i64::from(requested.get()))?;

        let added = self
            .repository
            .add_cart_line(&mut tx, principal.user, line.menuitem, quantity)
            .await?
            .ok_or(CartsServiceError::UnknownMenuItem)?;

        tx.commit().await?;

        info!(
            user_id = %principal.user,
            menu_item_id = %line.menuitem,
            quantity = added.quantity,
            "added to cart"
        );

        Ok(added)
    }

    async fn clear_cart(&self, principal: Principal) -> Result<u64, CartsServiceError> {
        authorize(&principal, Resource::Cart, Action::Delete, None)?;

        let mut tx = self.db.begin().await?;

        self.users_repository
            .lock_user(&mut tx, principal.user)
            .await?;

        let removed = self.repository.clear_cart(&mut tx, principal.user).await?;

        tx.commit().await?;

        info!(user_id = %principal.user, removed, "cleared cart");

        Ok(removed)
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// The principal's own cart lines, oldest first.
    async fn list_cart(&self, principal: Principal) -> Result<Vec<CartLine>, CartsServiceError>;

    /// Add `line.quantity` of a menu item, merging into an existing line for the same item.
    async fn add_to_cart(
        &self,
        principal: Principal,
        line: NewCartLine,
    ) -> Result<CartLine, CartsServiceError>;

    /// Remove every line from the principal's cart. Returns how many were removed.
    async fn clear_cart(&self, principal: Principal) -> Result<u64, CartsServiceError>;
}
