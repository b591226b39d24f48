//! Catalog Models

use littlelemon::ids::{CategoryId, MenuItemId};
use rust_decimal::Decimal;

/// Category Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub slug: String,
    pub title: String,
}

/// Menu Item Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub title: String,
    pub price: Decimal,
    pub featured: bool,
    pub category: Category,
}
