//! Delete Menu Item Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use littlelemon::ids::MenuItemId;

use crate::{catalog::errors::into_api_error, errors::ApiError, extensions::*, state::State};

/// Delete Menu Item Handler
#[endpoint(
    tags("menu-items"),
    summary = "Delete Menu Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Menu item deleted"),
        (status_code = StatusCode::BAD_REQUEST, description = "Menu item has been ordered"),
        (status_code = StatusCode::FORBIDDEN, description = "Not a manager"),
        (status_code = StatusCode::NOT_FOUND, description = "Menu item not found"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<i64>,
    depot: &mut Depot,
) -> Result<StatusCode, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;
    let id = MenuItemId::from_raw(id.into_inner());

    state
        .app
        .catalog
        .delete_menu_item(principal, id)
        .await
        .map_err(into_api_error)?;

    Ok(StatusCode::NO_CONTENT)
}
