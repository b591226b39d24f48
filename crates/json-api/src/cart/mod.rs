//! The caller's cart, served under `/cart/menu-items`.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use littlelemon_app::domain::carts::models::CartLine;

use crate::{catalog::MenuItemResponse, fields::amount};

pub(crate) mod create;
pub(crate) mod delete;
mod errors;
pub(crate) mod index;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartLineResponse {
    pub menuitem: MenuItemResponse,

    pub quantity: u32,

    /// Menu item price when the line was first added
    pub unit_price: String,

    pub price: String,
}

impl From<CartLine> for CartLineResponse {
    fn from(line: CartLine) -> Self {
        Self {
            menuitem: line.menuitem.into(),
            quantity: line.quantity,
            unit_price: amount(line.unit_price),
            price: amount(line.price),
        }
    }
}
