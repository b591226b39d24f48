//! Get Menu Item Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use littlelemon::ids::MenuItemId;

use crate::{
    catalog::{MenuItemResponse, errors::into_api_error},
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Get Menu Item Handler
#[endpoint(
    tags("menu-items"),
    summary = "Get Menu Item",
    responses(
        (status_code = StatusCode::OK, description = "Menu item found"),
        (status_code = StatusCode::NOT_FOUND, description = "Menu item not found"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<MenuItemResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let item = state
        .app
        .catalog
        .get_menu_item(MenuItemId::from_raw(id.into_inner()))
        .await
        .map_err(into_api_error)?;

    Ok(Json(item.into()))
}
