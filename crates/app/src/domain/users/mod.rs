//! Users and staff groups

pub mod errors;
pub mod models;
mod repository;
pub mod service;

pub use errors::StaffServiceError;
pub(crate) use repository::PgUsersRepository;
pub use service::*;
