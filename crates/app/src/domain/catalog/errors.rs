//! Catalog service errors.

use littlelemon::{catalog::CatalogError, policy::AccessDenied};
use sqlx::{Error, error::ErrorKind};
use thiserror::Error;

const CATEGORY_SLUG_CONSTRAINT: &str = "categories_slug_key";
const ORDER_ITEM_MENU_ITEM_CONSTRAINT: &str = "order_items_menuitem_id_fkey";

#[derive(Debug, Error)]
pub enum CatalogServiceError {
    #[error(transparent)]
    Invalid(#[from] CatalogError),

    #[error("menu item with this title already exists.")]
    DuplicateTitle,

    #[error("category with this slug already exists.")]
    DuplicateSlug,

    #[error("Category does not exist.")]
    UnknownCategory,

    #[error("Menu item is part of an existing order.")]
    InUse,

    #[error(transparent)]
    Forbidden(#[from] AccessDenied),

    #[error("Menu item not found.")]
    NotFound,

    #[error("invalid menu item data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for CatalogServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        let Some(database_error) = error.as_database_error() else {
            return Self::Sql(error);
        };

        let constraint = database_error.constraint();

        match database_error.kind() {
            ErrorKind::UniqueViolation if constraint == Some(CATEGORY_SLUG_CONSTRAINT) => {
                Self::DuplicateSlug
            }
            ErrorKind::UniqueViolation => Self::DuplicateTitle,
            ErrorKind::ForeignKeyViolation
                if constraint == Some(ORDER_ITEM_MENU_ITEM_CONSTRAINT) =>
            {
                Self::InUse
            }
            ErrorKind::ForeignKeyViolation => Self::UnknownCategory,
            ErrorKind::NotNullViolation | ErrorKind::CheckViolation => Self::InvalidData,
            ErrorKind::Other | _ => Self::Sql(error),
        }
    }
}
