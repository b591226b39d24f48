//! Orders Repository

use std::collections::HashMap;

use jiff::civil::Date;
use jiff_sqlx::Date as SqlxDate;
use littlelemon::{
    ids::{OrderId, UserId},
    orders::{OrderChanges, OrderFilter, OrderStatus},
    pagination::PageWindow,
    policy::OrderScope,
};
use rust_decimal::Decimal;
use sqlx::{
    Encode, FromRow, Postgres, Row, Transaction, Type,
    postgres::{PgArguments, PgRow},
    query,
    query::{QueryAs, QueryScalar},
    query_as, query_scalar,
};

use crate::{
    domain::orders::models::{Order, OrderItem},
    ids::{try_get_id, try_get_optional_id, try_get_quantity},
};

const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const INSERT_ORDER_ITEMS_SQL: &str = include_str!("sql/insert_order_items.sql");
const COUNT_ORDERS_SQL: &str = include_str!("sql/count_orders.sql");
const LIST_ORDERS_SQL: &str = include_str!("sql/list_orders.sql");
const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const LOCK_ORDER_SQL: &str = include_str!("sql/lock_order.sql");
const UPDATE_ORDER_SQL: &str = include_str!("sql/update_order.sql");
const DELETE_ORDER_SQL: &str = include_str!("sql/delete_order.sql");
const LIST_ORDER_ITEMS_SQL: &str = include_str!("sql/list_order_items.sql");

/// An order item row tagged with the order it belongs to.
struct OrderItemRecord {
    order: OrderId,
    item: OrderItem,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Insert an order header. Items are added separately.
    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserId,
        total: Decimal,
        date: Date,
    ) -> Result<Order, sqlx::Error> {
        query_as::<Postgres, Order>(CREATE_ORDER_SQL)
            .bind(user.into_raw())
            .bind(OrderStatus::default().as_str())
            .bind(total)
            .bind(SqlxDate::from(date))
            .fetch_one(&mut **tx)
            .await
    }

    /// Insert exactly the given items under an order.
    pub(crate) async fn insert_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderId,
        items: &[OrderItem],
    ) -> Result<u64, sqlx::Error> {
        let menuitems: Vec<i64> = items.iter().map(|item| item.menuitem.into_raw()).collect();
        let quantities: Vec<i32> = items
            .iter()
            .map(|item| i32::try_from(item.quantity).unwrap_or(i32::MAX))
            .collect();
        let unit_prices: Vec<Decimal> = items.iter().map(|item| item.unit_price).collect();
        let prices: Vec<Decimal> = items.iter().map(|item| item.price).collect();

        let rows_affected = query(INSERT_ORDER_ITEMS_SQL)
            .bind(order.into_raw())
            .bind(menuitems)
            .bind(quantities)
            .bind(unit_prices)
            .bind(prices)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn count_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        scope: OrderScope,
        filter: &OrderFilter,
    ) -> Result<u64, sqlx::Error> {
        let count = bind_filter(
            query_scalar::<Postgres, i64>(COUNT_ORDERS_SQL),
            scope,
            filter,
        )
        .fetch_one(&mut **tx)
        .await?;

        Ok(u64::try_from(count).unwrap_or_default())
    }

    /// List order headers in the scope, without their items.
    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        scope: OrderScope,
        filter: &OrderFilter,
        window: PageWindow,
    ) -> Result<Vec<Order>, sqlx::Error> {
        bind_filter(query_as::<Postgres, Order>(LIST_ORDERS_SQL), scope, filter)
            .bind(i64::try_from(window.limit).unwrap_or(i64::MAX))
            .bind(i64::try_from(window.offset).unwrap_or(i64::MAX))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderId,
    ) -> Result<Order, sqlx::Error> {
        query_as::<Postgres, Order>(GET_ORDER_SQL)
            .bind(order.into_raw())
            .fetch_one(&mut **tx)
            .await
    }

    /// Fetch an order header and hold a row lock on it until the transaction ends.
    pub(crate) async fn lock_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderId,
    ) -> Result<Order, sqlx::Error> {
        query_as::<Postgres, Order>(LOCK_ORDER_SQL)
            .bind(order.into_raw())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderId,
        changes: OrderChanges,
    ) -> Result<Order, sqlx::Error> {
        query_as::<Postgres, Order>(UPDATE_ORDER_SQL)
            .bind(order.into_raw())
            .bind(changes.delivery_crew.map(UserId::into_raw))
            .bind(changes.status.map(OrderStatus::as_str))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_ORDER_SQL)
            .bind(order.into_raw())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Fill in the items of each order.
    pub(crate) async fn attach_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: &mut [Order],
    ) -> Result<(), sqlx::Error> {
        if orders.is_empty() {
            return Ok(());
        }

        let ids: Vec<i64> = orders.iter().map(|order| order.id.into_raw()).collect();

        let records = query_as::<Postgres, OrderItemRecord>(LIST_ORDER_ITEMS_SQL)
            .bind(ids)
            .fetch_all(&mut **tx)
            .await?;

        let mut items: HashMap<OrderId, Vec<OrderItem>> = HashMap::new();

        for record in records {
            items.entry(record.order).or_default().push(record.item);
        }

        for order in orders {
            order.items = items.remove(&order.id).unwrap_or_default();
        }

        Ok(())
    }
}

fn scope_params(scope: OrderScope) -> (Option<i64>, Option<i64>) {
    match scope {
        OrderScope::All => (None, None),
        OrderScope::PlacedBy(user) => (Some(user.into_raw()), None),
        OrderScope::AssignedTo(user) => (None, Some(user.into_raw())),
    }
}

/// The query builders that order filters are bound onto.
trait BindValue<'q>: Sized {
    fn bind_value<T>(self, value: T) -> Self
    where
        T: 'q + Encode<'q, Postgres> + Type<Postgres>;
}

impl<'q, O> BindValue<'q> for QueryAs<'q, Postgres, O, PgArguments> {
    fn bind_value<T>(self, value: T) -> Self
    where
        T: 'q + Encode<'q, Postgres> + Type<Postgres>,
    {
        self.bind(value)
    }
}

impl<'q, O> BindValue<'q> for QueryScalar<'q, Postgres, O, PgArguments> {
    fn bind_value<T>(self, value: T) -> Self
    where
        T: 'q + Encode<'q, Postgres> + Type<Postgres>,
    {
        self.bind(value)
    }
}

/// Bind the scope and filter parameters `$1..=$9` shared by the count and list queries.
fn bind_filter<'q, Q>(statement: Q, scope: OrderScope, filter: &OrderFilter) -> Q
where
    Q: BindValue<'q>,
{
    let (placed_by, assigned_to) = scope_params(scope);

    statement
        .bind_value(placed_by)
        .bind_value(assigned_to)
        .bind_value(filter.user.map(UserId::into_raw))
        .bind_value(filter.delivery_crew.map(UserId::into_raw))
        .bind_value(filter.status.map(OrderStatus::as_str))
        .bind_value(filter.total_from)
        .bind_value(filter.total_to)
        .bind_value(filter.date_from.map(SqlxDate::from))
        .bind_value(filter.date_to.map(SqlxDate::from))
}

impl<'r> FromRow<'r, PgRow> for Order {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status = row
            .try_get::<String, _>("status")?
            .parse::<OrderStatus>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            id: try_get_id(row, "id")?,
            user: try_get_id(row, "user_id")?,
            delivery_crew: try_get_optional_id(row, "delivery_crew_id")?,
            status,
            total: row.try_get("total")?,
            date: row.try_get::<SqlxDate, _>("date")?.to_jiff(),
            items: Vec::new(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            order: try_get_id(row, "order_id")?,
            item: OrderItem {
                menuitem: try_get_id(row, "menuitem_id")?,
                quantity: try_get_quantity(row, "quantity")?,
                unit_price: row.try_get("unit_price")?,
                price: row.try_get("price")?,
            },
        })
    }
}
