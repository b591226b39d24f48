//! Replace Menu Item Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};

use littlelemon::{
    ids::MenuItemId,
    policy::{Action, Resource, ensure},
};
use littlelemon_app::domain::catalog::data::{MenuItemUpdate, NewMenuItem};

use crate::{
    catalog::{MenuItemResponse, errors::into_api_error, menu_items::create::MenuItemRequest},
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Replace Menu Item Handler
///
/// Every field is required. Use `PATCH` for partial changes.
#[endpoint(
    tags("menu-items"),
    summary = "Replace Menu Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Menu item replaced"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid menu item"),
        (status_code = StatusCode::FORBIDDEN, description = "Not a manager"),
        (status_code = StatusCode::NOT_FOUND, description = "Menu item not found"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<i64>,
    json: JsonBody<MenuItemRequest>,
    depot: &mut Depot,
) -> Result<Json<MenuItemResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    ensure(&principal, Resource::MenuItem, Action::Update, None)?;

    let update = MenuItemUpdate::from(NewMenuItem::try_from(json.into_inner())?);

    let item = state
        .app
        .catalog
        .update_menu_item(principal, MenuItemId::from_raw(id.into_inner()), update)
        .await
        .map_err(into_api_error)?;

    Ok(Json(item.into()))
}
