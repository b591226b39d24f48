//! Order Errors

use tracing::error;

use littlelemon_app::domain::orders::OrdersServiceError;

use crate::errors::ApiError;

pub(crate) fn into_api_error(error: OrdersServiceError) -> ApiError {
    match error {
        OrdersServiceError::Forbidden(denied) => denied.into(),
        OrdersServiceError::NotFound => ApiError::not_found(error.to_string()),
        OrdersServiceError::EmptyCart
        | OrdersServiceError::TotalTooLarge
        | OrdersServiceError::NotDeliveryCrew
        | OrdersServiceError::StatusRequired => ApiError::bad_request(error.to_string()),
        OrdersServiceError::InvalidData => ApiError::bad_request("Invalid order payload."),
        OrdersServiceError::Sql(source) => {
            error!("order storage error: {source}");

            ApiError::internal()
        }
    }
}
