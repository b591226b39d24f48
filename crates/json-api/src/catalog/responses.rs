//! Catalog response bodies.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use littlelemon_app::domain::catalog::models::{Category, MenuItem};

use crate::fields::amount;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoryResponse {
    pub id: i64,

    /// URL-safe identifier
    pub slug: String,

    pub title: String,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id.into_raw(),
            slug: category.slug,
            title: category.title,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct MenuItemResponse {
    pub id: i64,

    pub title: String,

    /// Price with two decimal places, e.g. `"9.50"`
    pub price: String,

    /// Shown on the front page
    pub featured: bool,

    pub category: CategoryResponse,
}

impl From<MenuItem> for MenuItemResponse {
    fn from(item: MenuItem) -> Self {
        Self {
            id: item.id.into_raw(),
            title: item.title,
            price: amount(item.price),
            featured: item.featured,
            category: item.category.into(),
        }
    }
}
