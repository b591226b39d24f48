//! Catalog Repository

use littlelemon::{
    catalog::MenuItemFilter,
    ids::{CategoryId, MenuItemId},
    pagination::PageWindow,
};
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::{
    domain::catalog::models::{Category, MenuItem},
    ids::try_get_id,
};

const LIST_CATEGORIES_SQL: &str = include_str!("sql/list_categories.sql");
const CREATE_CATEGORY_SQL: &str = include_str!("sql/create_category.sql");
const COUNT_MENU_ITEMS_SQL: &str = include_str!("sql/count_menu_items.sql");
const LIST_MENU_ITEMS_SQL: &str = include_str!("sql/list_menu_items.sql");
const GET_MENU_ITEM_SQL: &str = include_str!("sql/get_menu_item.sql");
const LOCK_MENU_ITEM_SQL: &str = include_str!("sql/lock_menu_item.sql");
const CREATE_MENU_ITEM_SQL: &str = include_str!("sql/create_menu_item.sql");
const UPDATE_MENU_ITEM_SQL: &str = include_str!("sql/update_menu_item.sql");
const DELETE_MENU_ITEM_SQL: &str = include_str!("sql/delete_menu_item.sql");

/// Stored menu item row values, already cleaned and validated.
#[derive(Debug, Clone)]
pub(crate) struct MenuItemRecord {
    pub title: String,
    pub price: Decimal,
    pub featured: bool,
    pub category: CategoryId,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCatalogRepository;

impl PgCatalogRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_categories(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Category>, sqlx::Error> {
        query_as::<Postgres, Category>(LIST_CATEGORIES_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_category(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        slug: &str,
        title: &str,
    ) -> Result<Category, sqlx::Error> {
        query_as::<Postgres, Category>(CREATE_CATEGORY_SQL)
            .bind(slug)
            .bind(title)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn count_menu_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: &MenuItemFilter,
    ) -> Result<u64, sqlx::Error> {
        let count = query_scalar::<Postgres, i64>(COUNT_MENU_ITEMS_SQL)
            .bind(filter.category.map(CategoryId::into_raw))
            .bind(filter.price_from)
            .bind(filter.price_to)
            .bind(filter.search.as_deref().map(escape_like))
            .fetch_one(&mut **tx)
            .await?;

        Ok(u64::try_from(count).unwrap_or_default())
    }

    pub(crate) async fn list_menu_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: &MenuItemFilter,
        window: PageWindow,
    ) -> Result<Vec<MenuItem>, sqlx::Error> {
        query_as::<Postgres, MenuItem>(LIST_MENU_ITEMS_SQL)
            .bind(filter.category.map(CategoryId::into_raw))
            .bind(filter.price_from)
            .bind(filter.price_to)
            .bind(filter.search.as_deref().map(escape_like))
            .bind(i64::try_from(window.limit).unwrap_or(i64::MAX))
            .bind(i64::try_from(window.offset).unwrap_or(i64::MAX))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_menu_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: MenuItemId,
    ) -> Result<MenuItem, sqlx::Error> {
        query_as::<Postgres, MenuItem>(GET_MENU_ITEM_SQL)
            .bind(item.into_raw())
            .fetch_one(&mut **tx)
            .await
    }

    /// Fetch a menu item and hold a row lock on it until the transaction ends.
    pub(crate) async fn lock_menu_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: MenuItemId,
    ) -> Result<MenuItem, sqlx::Error> {
        query_as::<Postgres, MenuItem>(LOCK_MENU_ITEM_SQL)
            .bind(item.into_raw())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_menu_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        record: &MenuItemRecord,
    ) -> Result<MenuItem, sqlx::Error> {
        query_as::<Postgres, MenuItem>(CREATE_MENU_ITEM_SQL)
            .bind(&record.title)
            .bind(record.price)
            .bind(record.featured)
            .bind(record.category.into_raw())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_menu_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: MenuItemId,
        record: &MenuItemRecord,
    ) -> Result<MenuItem, sqlx::Error> {
        query_as::<Postgres, MenuItem>(UPDATE_MENU_ITEM_SQL)
            .bind(item.into_raw())
            .bind(&record.title)
            .bind(record.price)
            .bind(record.featured)
            .bind(record.category.into_raw())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_menu_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: MenuItemId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_MENU_ITEM_SQL)
            .bind(item.into_raw())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

/// Escape `ILIKE` wildcards so search text matches literally.
fn escape_like(search: &str) -> String {
    let mut escaped = String::with_capacity(search.len());

    for ch in search.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }

        escaped.push(ch);
    }

    escaped
}

impl<'r> FromRow<'r, PgRow> for Category {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: try_get_id(row, "id")?,
            slug: row.try_get("slug")?,
            title: row.try_get("title")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for MenuItem {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        try_get_menu_item(row, "")
    }
}

/// Decode a menu item joined with its category.
///
/// Menu item columns carry `prefix`; category columns are always `category_id`,
/// `category_slug` and `category_title`.
pub(crate) fn try_get_menu_item(row: &PgRow, prefix: &str) -> sqlx::Result<MenuItem> {
    Ok(MenuItem {
        id: try_get_id(row, &format!("{prefix}id"))?,
        title: row.try_get(format!("{prefix}title").as_str())?,
        price: row.try_get(format!("{prefix}price").as_str())?,
        featured: row.try_get(format!("{prefix}featured").as_str())?,
        category: Category {
            id: try_get_id(row, "category_id")?,
            slug: row.try_get("category_slug")?,
            title: row.try_get("category_title")?,
        },
    })
}
