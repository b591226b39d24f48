//! Menu Item Index Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use littlelemon::{catalog::MenuItemFilter, pagination::PageRequest};

use crate::{
    catalog::{MenuItemResponse, errors::into_api_error},
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Menu Item Index Handler
///
/// Lists menu items, filtered and paginated. Open to anonymous callers.
#[endpoint(
    tags("menu-items"),
    summary = "List Menu Items",
    responses(
        (status_code = StatusCode::OK, description = "Menu items"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unparseable filter"),
    ),
)]
pub(crate) async fn handler(
    category: QueryParam<String, false>,
    from_price: QueryParam<String, false>,
    to_price: QueryParam<String, false>,
    search: QueryParam<String, false>,
    page: QueryParam<String, false>,
    perpage: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<Vec<MenuItemResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let filter = MenuItemFilter {
        category: category.parse_or_400("category")?,
        price_from: from_price.parse_or_400("from_price")?,
        price_to: to_price.parse_or_400("to_price")?,
        search: search.non_blank(),
    };

    let items = state
        .app
        .catalog
        .list_menu_items(filter, PageRequest::new(page.into_inner(), perpage.into_inner()))
        .await
        .map_err(into_api_error)?;

    Ok(Json(items.into_iter().map(Into::into).collect()))
}
