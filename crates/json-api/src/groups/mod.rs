//! Staff group membership handlers, served under `/groups/{group}/users`.

use salvo::oapi::{ToSchema, extract::PathParam};
use serde::{Deserialize, Serialize};

use littlelemon::{
    policy::{Action, Resource, ensure},
    roles::{Principal, StaffGroup},
};
use littlelemon_app::domain::users::models::User;

use crate::errors::ApiError;

pub(crate) mod create;
pub(crate) mod delete;
mod errors;
pub(crate) mod index;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.into_raw(),
            username: user.username,
            email: user.email,
        }
    }
}

/// Check the caller may `action` memberships, then resolve the `{group}` path segment.
///
/// Only `manager` and `delivery-crew` resolve; anything else is 404 for permitted callers.
fn staff_group(
    principal: &Principal,
    action: Action,
    group: PathParam<String>,
) -> Result<StaffGroup, ApiError> {
    ensure(principal, Resource::StaffGroup, action, None)?;

    group
        .into_inner()
        .parse()
        .map_err(|_ignored| ApiError::not_found("Not found."))
}
