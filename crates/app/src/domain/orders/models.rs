//! Order Models

use jiff::civil::Date;
use littlelemon::{
    ids::{MenuItemId, OrderId, UserId},
    orders::OrderStatus,
    policy::OrderParties,
};
use rust_decimal::Decimal;

/// Order Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: OrderId,
    pub user: UserId,
    pub delivery_crew: Option<UserId>,
    pub status: OrderStatus,

    /// Sum of the item prices when the order was placed.
    pub total: Decimal,

    /// Date the order was placed.
    pub date: Date,

    pub items: Vec<OrderItem>,
}

impl Order {
    /// The users an order-level permission is checked against.
    #[must_use]
    pub const fn parties(&self) -> OrderParties {
        OrderParties {
            owner: self.user,
            delivery_crew: self.delivery_crew,
        }
    }
}

/// Order Item Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItem {
    pub menuitem: MenuItemId,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub price: Decimal,
}
