//! Cart Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    cart::{CartLineResponse, errors::into_api_error},
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Cart Index Handler
#[endpoint(
    tags("cart"),
    summary = "List Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Lines in the caller's cart"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not authenticated"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<CartLineResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let lines = state
        .app
        .carts
        .list_cart(principal)
        .await
        .map_err(into_api_error)?;

    Ok(Json(lines.into_iter().map(Into::into).collect()))
}
