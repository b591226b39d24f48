//! Create Menu Item Handler

use std::sync::Arc;

use rust_decimal::Decimal;
use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use littlelemon::{
    ids::CategoryId,
    policy::{Action, Resource, ensure},
};
use littlelemon_app::domain::catalog::data::NewMenuItem;

use crate::{
    catalog::{MenuItemResponse, errors::into_api_error},
    errors::ApiError,
    extensions::*,
    fields::{FieldValue, required},
    state::State,
};

pub(super) const INVALID_PRICE: &str = "A valid number is required.";
pub(super) const INVALID_CATEGORY: &str = "A valid integer is required.";

/// Menu item fields. `price` and `category_id` may be numbers or strings.
///
/// `title`, `price` and `category_id` are required; they are checked after the role check.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct MenuItemRequest {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    #[salvo(schema(value_type = String))]
    pub price: Option<FieldValue>,

    #[serde(default)]
    pub featured: bool,

    #[serde(default)]
    #[salvo(schema(value_type = i64))]
    pub category_id: Option<FieldValue>,
}

impl TryFrom<MenuItemRequest> for NewMenuItem {
    type Error = ApiError;

    fn try_from(request: MenuItemRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            title: required(request.title, "title")?,
            price: required(request.price, "price")?.parse::<Decimal>(INVALID_PRICE)?,
            featured: request.featured,
            category: required(request.category_id, "category_id")?
                .parse::<CategoryId>(INVALID_CATEGORY)?,
        })
    }
}

/// Create Menu Item Handler
#[endpoint(
    tags("menu-items"),
    summary = "Create Menu Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Menu item created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid menu item"),
        (status_code = StatusCode::FORBIDDEN, description = "Not a manager"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<MenuItemRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<MenuItemResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    ensure(&principal, Resource::MenuItem, Action::Create, None)?;

    let item = state
        .app
        .catalog
        .create_menu_item(principal, json.into_inner().try_into()?)
        .await
        .map_err(into_api_error)?;

    res.add_header(LOCATION, format!("/menu-items/{}", item.id), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(item.into()))
}
