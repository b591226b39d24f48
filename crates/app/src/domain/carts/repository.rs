//! Carts Repository

use littlelemon::{
    ids::{MenuItemId, UserId},
    pricing::Quantity,
};
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::{
    domain::{
        carts::models::{CartLine, LockedCartLine},
        catalog::try_get_menu_item,
    },
    ids::{try_get_id, try_get_quantity},
};

const LIST_CART_LINES_SQL: &str = include_str!("sql/list_cart_lines.sql");
const ADD_CART_LINE_SQL: &str = include_str!("sql/add_cart_line.sql");
const LOCK_CART_LINES_SQL: &str = include_str!("sql/lock_cart_lines.sql");
const CLEAR_CART_SQL: &str = include_str!("sql/clear_cart.sql");
const GET_CART_QUANTITY_SQL: &str = include_str!("sql/get_cart_quantity.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartsRepository;

impl PgCartsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_cart_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserId,
    ) -> Result<Vec<CartLine>, sqlx::Error> {
        query_as::<Postgres, CartLine>(LIST_CART_LINES_SQL)
            .bind(user.into_raw())
            .fetch_all(&mut **tx)
            .await
    }

    /// Quantity already in the cart for a menu item, zero when there is no line for it.
    pub(crate) async fn get_cart_quantity(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserId,
        menuitem: MenuItemId,
    ) -> Result<u32, sqlx::Error> {
        let quantity = query_scalar::<Postgres, i32>(GET_CART_QUANTITY_SQL)
            .bind(user.into_raw())
            .bind(menuitem.into_raw())
            .fetch_optional(&mut **tx)
            .await?;

        Ok(quantity.map_or(0, i32::unsigned_abs))
    }

    /// Insert a cart line, or replace the quantity of an existing one.
    ///
    /// An existing line keeps its unit price. Returns `None` when the menu item does not exist.
    pub(crate) async fn add_cart_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserId,
        menuitem: MenuItemId,
        quantity: Quantity,
    ) -> Result<Option<CartLine>, sqlx::Error> {
        query_as::<Postgres, CartLine>(ADD_CART_LINE_SQL)
            .bind(user.into_raw())
            .bind(menuitem.into_raw())
            .bind(i32::from(quantity))
            .fetch_optional(&mut **tx)
            .await
    }

    /// Fetch the user's cart lines and hold row locks on them until the transaction ends.
    pub(crate) async fn lock_cart_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserId,
    ) -> Result<Vec<LockedCartLine>, sqlx::Error> {
        query_as::<Postgres, LockedCartLine>(LOCK_CART_LINES_SQL)
            .bind(user.into_raw())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn clear_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(CLEAR_CART_SQL)
            .bind(user.into_raw())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for CartLine {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            menuitem: try_get_menu_item(row, "menuitem_")?,
            quantity: try_get_quantity(row, "quantity")?,
            unit_price: row.try_get("unit_price")?,
            price: row.try_get("price")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for LockedCartLine {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            menuitem: try_get_id(row, "menuitem_id")?,
            quantity: try_get_quantity(row, "quantity")?,
            unit_price: row.try_get("unit_price")?,
            price: row.try_get("price")?,
        })
    }
}
