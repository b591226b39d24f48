//! Catalog service.

use async_trait::async_trait;
use littlelemon::{
    catalog::{self, MenuItemFilter},
    ids::MenuItemId,
    pagination::PageRequest,
    policy::{Action, Resource},
    roles::Principal,
};
use mockall::automock;
use tracing::{debug, info};

use crate::{
    database::Db,
    domain::{
        authorize,
        catalog::{
            data::{MenuItemUpdate, NewCategory, NewMenuItem},
            errors::CatalogServiceError,
            models::{Category, MenuItem},
            repository::{MenuItemRecord, PgCatalogRepository},
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgCatalogService {
    db: Db,
    repository: PgCatalogRepository,
}

impl PgCatalogService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCatalogRepository::new(),
        }
    }
}

/// Clean and validate the merged state of a menu item.
fn menu_item_record(
    current: Option<&MenuItem>,
    update: MenuItemUpdate,
) -> Result<MenuItemRecord, CatalogServiceError> {
    let title = update
        .title
        .or_else(|| current.map(|item| item.title.clone()))
        .ok_or(catalog::CatalogError::EmptyTitle)?;

    let price = update
        .price
        .or_else(|| current.map(|item| item.price))
        .unwrap_or_default();

    let category = update
        .category
        .or_else(|| current.map(|item| item.category.id))
        .ok_or(CatalogServiceError::UnknownCategory)?;

    Ok(MenuItemRecord {
        title: catalog::menu_item_title(&title)?,
        price: catalog::price(price)?,
        featured: update
            .featured
            .or_else(|| current.map(|item| item.featured))
            .unwrap_or_default(),
        category,
    })
}

#[async_trait]
impl CatalogService for PgCatalogService {
    async fn list_menu_items(
        &self,
        filter: MenuItemFilter,
        page: PageRequest,
    ) -> Result<Vec<MenuItem>, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let count = self.repository.count_menu_items(&mut tx, &filter).await?;

        let Some(window) = page.resolve(count) else {
            debug!(?page, "invalid page size, returning no menu items");

            return Ok(Vec::new());
        };

        let items = self
            .repository
            .list_menu_items(&mut tx, &filter, window)
            .await?;

        tx.commit().await?;

        Ok(items)
    }

    async fn get_menu_item(&self, item: MenuItemId) -> Result<MenuItem, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let item = self.repository.get_menu_item(&mut tx, item).await?;

        tx.commit().await?;

        Ok(item)
    }

    async fn create_menu_item(
        &self,
        principal: Principal,
        item: NewMenuItem,
    ) -> Result<MenuItem, CatalogServiceError> {
        authorize(&principal, Resource::MenuItem, Action::Create, None)?;

        let record = menu_item_record(None, item.into())?;

        let mut tx = self.db.begin().await?;

        let created = self.repository.create_menu_item(&mut tx, &record).await?;

        tx.commit().await?;

        info!(menu_item_id = %created.id, created_by = %principal.user, "created menu item");

        Ok(created)
    }

    async fn update_menu_item(
        &self,
        principal: Principal,
        item: MenuItemId,
        update: MenuItemUpdate,
    ) -> Result<MenuItem, CatalogServiceError> {
        authorize(&principal, Resource::MenuItem, Action::Update, None)?;

        let mut tx = self.db.begin().await?;

        let current = self.repository.lock_menu_item(&mut tx, item).await?;

        let record = menu_item_record(Some(&current), update)?;

        let updated = self
            .repository
            .update_menu_item(&mut tx, item, &record)
            .await?;

        tx.commit().await?;

        info!(menu_item_id = %item, updated_by = %principal.user, "updated menu item");

        Ok(updated)
    }

    async fn delete_menu_item(
        &self,
        principal: Principal,
        item: MenuItemId,
    ) -> Result<(), CatalogServiceError> {
        authorize(&principal, Resource::MenuItem, Action::Delete, None)?;

        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_menu_item(&mut tx, item).await?;

        if rows_affected == 0 {
            return Err(CatalogServiceError::NotFound);
        }

        tx.commit().await?;

        info!(menu_item_id = %item, deleted_by = %principal.user, "deleted menu item");

        Ok(())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let categories = self.repository.list_categories(&mut tx).await?;

        tx.commit().await?;

        Ok(categories)
    }

    async fn create_category(
        &self,
        principal: Principal,
        category: NewCategory,
    ) -> Result<Category, CatalogServiceError> {
        authorize(&principal, Resource::Category, Action::Create, None)?;

        let slug = catalog::category_slug(&category.slug)?;
        let title = catalog::category_title(&category.title)?;

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_category(&mut tx, &slug, &title)
            .await?;

        tx.commit().await?;

        info!(category_id = %created.id, slug = %created.slug, "created category");

        Ok(created)
    }
}

#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// List menu items matching `filter`, one page at a time.
    ///
    /// An unusable page size yields an empty list rather than an error.
    async fn list_menu_items(
        &self,
        filter: MenuItemFilter,
        page: PageRequest,
    ) -> Result<Vec<MenuItem>, CatalogServiceError>;

    async fn get_menu_item(&self, item: MenuItemId) -> Result<MenuItem, CatalogServiceError>;

    async fn create_menu_item(
        &self,
        principal: Principal,
        item: NewMenuItem,
    ) -> Result<MenuItem, CatalogServiceError>;

    /// Apply `update` over the stored menu item and revalidate the result.
    async fn update_menu_item(
        &self,
        principal: Principal,
        item: MenuItemId,
        update: MenuItemUpdate,
    ) -> Result<MenuItem, CatalogServiceError>;

    async fn delete_menu_item(
        &self,
        principal: Principal,
        item: MenuItemId,
    ) -> Result<(), CatalogServiceError>;

    async fn list_categories(&self) -> Result<Vec<Category>, CatalogServiceError>;

    async fn create_category(
        &self,
        principal: Principal,
        category: NewCategory,
    ) -> Result<Category, CatalogServiceError>;
}
