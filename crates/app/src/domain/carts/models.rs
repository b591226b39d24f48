//! Cart Models

use littlelemon::ids::MenuItemId;
use rust_decimal::Decimal;

use crate::domain::catalog::models::MenuItem;

/// Cart Line Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub menuitem: MenuItem,
    pub quantity: u32,

    /// Menu item price when the line was first created.
    pub unit_price: Decimal,

    /// `unit_price * quantity`.
    pub price: Decimal,
}

/// A cart line as it is copied into an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LockedCartLine {
    pub menuitem: MenuItemId,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub price: Decimal,
}
