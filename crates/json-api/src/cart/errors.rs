//! Cart Errors

use tracing::error;

use littlelemon_app::domain::carts::CartsServiceError;

use crate::errors::ApiError;

pub(crate) fn into_api_error(error: CartsServiceError) -> ApiError {
    match error {
        CartsServiceError::Forbidden(denied) => denied.into(),
        CartsServiceError::InvalidQuantity(_) | CartsServiceError::UnknownMenuItem => {
            ApiError::bad_request(error.to_string())
        }
        CartsServiceError::InvalidData => ApiError::bad_request("Invalid cart payload."),
        CartsServiceError::Sql(source) => {
            error!("cart storage error: {source}");

            ApiError::internal()
        }
    }
}
