//! Carts service errors.

use littlelemon::{policy::AccessDenied, pricing::QuantityError};
use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::database::is_out_of_range;

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error(transparent)]
    InvalidQuantity(#[from] QuantityError),

    #[error("Menu item does not exist.")]
    UnknownMenuItem,

    #[error(transparent)]
    Forbidden(#[from] AccessDenied),

    #[error("invalid cart data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for CartsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::UnknownMenuItem;
        }

        if is_out_of_range(&error) {
            return Self::InvalidQuantity(QuantityError::TooLarge);
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::ForeignKeyViolation) => Self::UnknownMenuItem,
            Some(ErrorKind::NotNullViolation | ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
