//! Order response bodies.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use littlelemon_app::domain::orders::models::{Order, OrderItem};

use crate::fields::amount;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    /// Menu item id
    pub menuitem: i64,

    pub quantity: u32,

    pub unit_price: String,

    pub price: String,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        Self {
            menuitem: item.menuitem.into_raw(),
            quantity: item.quantity,
            unit_price: amount(item.unit_price),
            price: amount(item.price),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub id: i64,

    /// Customer that placed the order
    pub user: i64,

    pub delivery_crew: Option<i64>,

    /// `pending`, `processing`, `out_for_delivery` or `delivered`
    pub status: String,

    pub total: String,

    /// `YYYY-MM-DD`
    pub date: String,

    pub items: Vec<OrderItemResponse>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id.into_raw(),
            user: order.user.into_raw(),
            delivery_crew: order.delivery_crew.map(|crew| crew.into_raw()),
            status: order.status.as_str().to_owned(),
            total: amount(order.total),
            date: order.date.to_string(),
            items: order.items.into_iter().map(Into::into).collect(),
        }
    }
}
