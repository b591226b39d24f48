//! Staff Group Errors

use tracing::error;

use littlelemon_app::domain::users::StaffServiceError;

use crate::errors::ApiError;

pub(crate) fn into_api_error(error: StaffServiceError) -> ApiError {
    match error {
        StaffServiceError::Forbidden(denied) => denied.into(),
        StaffServiceError::UserNotFound => ApiError::not_found(error.to_string()),
        StaffServiceError::NotMember(_) => ApiError::bad_request(error.to_string()),
        StaffServiceError::AlreadyExists | StaffServiceError::InvalidData => {
            ApiError::bad_request("Invalid user payload.")
        }
        StaffServiceError::Sql(source) => {
            error!("staff storage error: {source}");

            ApiError::internal()
        }
    }
}

#[cfg(test)]
mod tests {
    use littlelemon::roles::StaffGroup;
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn non_members_are_bad_requests() {
        let error = into_api_error(StaffServiceError::NotMember(StaffGroup::DeliveryCrew));

        assert_eq!(error.status, StatusCode::BAD_REQUEST);
        assert_eq!(error.message, "User is not a delivery crew staff.");
    }

    #[test]
    fn unknown_users_are_not_found() {
        let error = into_api_error(StaffServiceError::UserNotFound);

        assert_eq!(error, ApiError::not_found("User not found."));
    }
}
