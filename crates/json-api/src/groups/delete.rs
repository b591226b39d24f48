//! Revoke Group Membership Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use littlelemon::{ids::UserId, policy::Action, roles::StaffGroup};

use crate::{
    errors::{ApiError, MessageResponse},
    extensions::*,
    groups::{errors::into_api_error, staff_group},
    state::State,
};

const fn revoked_message(group: StaffGroup) -> &'static str {
    match group {
        StaffGroup::Manager => "User's manager status revoked.",
        StaffGroup::DeliveryCrew => "User's delivery crew status revoked.",
    }
}

/// Revoke Group Membership Handler
#[endpoint(
    tags("groups"),
    summary = "Revoke Group Membership",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Membership revoked"),
        (status_code = StatusCode::BAD_REQUEST, description = "User is not in the group"),
        (status_code = StatusCode::FORBIDDEN, description = "Not a manager"),
        (status_code = StatusCode::NOT_FOUND, description = "Unknown user or group"),
    ),
)]
pub(crate) async fn handler(
    group: PathParam<String>,
    id: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<MessageResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;
    let group = staff_group(&principal, Action::Delete, group)?;

    state
        .app
        .staff
        .revoke(principal, group, UserId::from_raw(id.into_inner()))
        .await
        .map_err(into_api_error)?;

    Ok(Json(MessageResponse::new(revoked_message(group))))
}
