//! Group Members Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use littlelemon::policy::Action;

use crate::{
    errors::ApiError,
    extensions::*,
    groups::{UserResponse, errors::into_api_error, staff_group},
    state::State,
};

/// Group Members Handler
///
/// Lists the users in `manager` or `delivery-crew`. Managers only.
#[endpoint(
    tags("groups"),
    summary = "List Group Members",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Group members"),
        (status_code = StatusCode::FORBIDDEN, description = "Not a manager"),
        (status_code = StatusCode::NOT_FOUND, description = "Unknown group"),
    ),
)]
pub(crate) async fn handler(
    group: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;
    let group = staff_group(&principal, Action::List, group)?;

    let members = state
        .app
        .staff
        .list_members(principal, group)
        .await
        .map_err(into_api_error)?;

    Ok(Json(members.into_iter().map(Into::into).collect()))
}
