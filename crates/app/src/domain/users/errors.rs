//! Staff service errors.

use littlelemon::{policy::AccessDenied, roles::StaffGroup};
use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StaffServiceError {
    #[error(transparent)]
    Forbidden(#[from] AccessDenied),

    #[error("User not found.")]
    UserNotFound,

    #[error("{}", not_member_message(.0))]
    NotMember(StaffGroup),

    #[error("user already exists")]
    AlreadyExists,

    #[error("invalid user data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

fn not_member_message(group: &StaffGroup) -> &'static str {
    match group {
        StaffGroup::Manager => "User is not a manager.",
        StaffGroup::DeliveryCrew => "User is not a delivery crew staff.",
    }
}

impl From<Error> for StaffServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::UserNotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::UserNotFound,
            Some(ErrorKind::NotNullViolation | ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
