//! Grant Group Membership Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use littlelemon::{ids::UserId, policy::Action, roles::StaffGroup};

use crate::{
    errors::{ApiError, MessageResponse},
    extensions::*,
    fields::FieldValue,
    groups::{errors::into_api_error, staff_group},
    state::State,
};

const MISSING_USER_ID: &str = "Please provide a user_id in the request payload.";

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct GrantRequest {
    #[serde(default)]
    #[salvo(schema(value_type = Option<i64>))]
    pub user_id: Option<FieldValue>,
}

const fn granted_message(group: StaffGroup) -> &'static str {
    match group {
        StaffGroup::Manager => "User granted manager status.",
        StaffGroup::DeliveryCrew => "User granted Delivery Crew status.",
    }
}

/// Grant Group Membership Handler
///
/// Adds a user to the group. Granting an existing member succeeds again.
#[endpoint(
    tags("groups"),
    summary = "Grant Group Membership",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Membership granted"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing user_id"),
        (status_code = StatusCode::FORBIDDEN, description = "Not a manager"),
        (status_code = StatusCode::NOT_FOUND, description = "Unknown user or group"),
    ),
)]
pub(crate) async fn handler(
    group: PathParam<String>,
    json: JsonBody<GrantRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<MessageResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;
    let group = staff_group(&principal, Action::Create, group)?;

    let user = json
        .into_inner()
        .user_id
        .ok_or_else(|| ApiError::bad_request(MISSING_USER_ID))?
        .parse::<UserId>("A valid integer is required.")?;

    state
        .app
        .staff
        .grant(principal, group, user)
        .await
        .map_err(into_api_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(MessageResponse::new(granted_message(group))))
}
