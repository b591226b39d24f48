//! Menu items and categories

pub(crate) mod categories;
mod errors;
pub(crate) mod menu_items;
mod responses;

pub(crate) use responses::{CategoryResponse, MenuItemResponse};
