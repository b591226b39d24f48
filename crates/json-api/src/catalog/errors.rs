//! Catalog Errors

use tracing::error;

use littlelemon_app::domain::catalog::CatalogServiceError;

use crate::errors::ApiError;

pub(crate) fn into_api_error(error: CatalogServiceError) -> ApiError {
    match error {
        CatalogServiceError::Forbidden(denied) => denied.into(),
        CatalogServiceError::NotFound => ApiError::not_found(error.to_string()),
        CatalogServiceError::Invalid(_)
        | CatalogServiceError::DuplicateTitle
        | CatalogServiceError::DuplicateSlug
        | CatalogServiceError::UnknownCategory
        | CatalogServiceError::InUse => ApiError::bad_request(error.to_string()),
        CatalogServiceError::InvalidData => ApiError::bad_request("Invalid menu item payload."),
        CatalogServiceError::Sql(source) => {
            error!("catalog storage error: {source}");

            ApiError::internal()
        }
    }
}
