//! Orders service errors.

use littlelemon::{orders::OrderUpdateError, policy::AccessDenied};
use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::database::is_out_of_range;

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("Cart is empty")]
    EmptyCart,

    #[error("Order total is too large.")]
    TotalTooLarge,

    #[error("User is not delivery crew.")]
    NotDeliveryCrew,

    #[error("Status field is required in the request.")]
    StatusRequired,

    #[error(transparent)]
    Forbidden(#[from] AccessDenied),

    #[error("Order not found.")]
    NotFound,

    #[error("invalid order data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<OrderUpdateError> for OrdersServiceError {
    fn from(error: OrderUpdateError) -> Self {
        match error {
            OrderUpdateError::Forbidden(denied) => Self::Forbidden(denied),
            OrderUpdateError::StatusRequired => Self::StatusRequired,
        }
    }
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        if is_out_of_range(&error) {
            return Self::TotalTooLarge;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::ForeignKeyViolation) => Self::NotDeliveryCrew,
            Some(ErrorKind::NotNullViolation | ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
