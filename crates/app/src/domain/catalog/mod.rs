//! Menu items and categories

pub mod data;
pub mod errors;
pub mod models;
mod repository;
pub mod service;

pub use errors::CatalogServiceError;
pub(crate) use repository::{PgCatalogRepository, try_get_menu_item};
pub use service::*;
