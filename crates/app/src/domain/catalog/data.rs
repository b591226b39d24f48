//! Catalog write payloads.
//!
//! Text and prices arrive raw; the service cleans and validates them before storage.

use littlelemon::ids::CategoryId;
use rust_decimal::Decimal;

/// New Category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub slug: String,
    pub title: String,
}

/// New Menu Item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMenuItem {
    pub title: String,
    pub price: Decimal,
    pub featured: bool,
    pub category: CategoryId,
}

/// Menu Item Update
///
/// Fields left as `None` keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuItemUpdate {
    pub title: Option<String>,
    pub price: Option<Decimal>,
    pub featured: Option<bool>,
    pub category: Option<CategoryId>,
}

impl From<NewMenuItem> for MenuItemUpdate {
    fn from(item: NewMenuItem) -> Self {
        Self {
            title: Some(item.title),
            price: Some(item.price),
            featured: Some(item.featured),
            category: Some(item.category),
        }
    }
}
