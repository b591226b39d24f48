//! Bearer token authentication: issuing, revoking and resolving tokens to principals.

mod errors;
mod models;
mod repository;
mod service;
mod token;

pub use errors::*;
pub use models::*;
pub use service::*;
pub use token::{ApiTokenError, ApiTokenVersion, BearerToken, TokenSecret};
