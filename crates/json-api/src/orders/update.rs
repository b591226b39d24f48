//! Update Order Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use littlelemon::{
    ids::{OrderId, UserId},
    orders::{OrderChanges, OrderStatus},
};

use crate::{
    errors::ApiError,
    extensions::*,
    fields::{FieldValue, present},
    orders::{OrderResponse, errors::into_api_error},
    state::State,
};

/// Order changes. Managers may send either field; the assigned delivery crew only `status`.
///
/// Blank text in either field means the field was left out.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderUpdateRequest {
    /// User id of a delivery crew member
    #[serde(default)]
    #[salvo(schema(value_type = Option<i64>))]
    pub delivery_crew: Option<FieldValue>,

    /// Status name, or `0` / `1` for pending / delivered
    #[serde(default)]
    #[salvo(schema(value_type = Option<String>))]
    pub status: Option<FieldValue>,
}

impl TryFrom<OrderUpdateRequest> for OrderChanges {
    type Error = ApiError;

    fn try_from(request: OrderUpdateRequest) -> Result<Self, Self::Error> {
        let status = present(request.status)
            .map(|status| {
                status
                    .to_string()
                    .trim()
                    .parse::<OrderStatus>()
                    .map_err(|error| ApiError::bad_request(error.to_string()))
            })
            .transpose()?;

        Ok(Self {
            delivery_crew: present(request.delivery_crew)
                .map(|crew| crew.parse::<UserId>("A valid integer is required."))
                .transpose()?,
            status,
        })
    }
}

/// Update Order Handler
#[endpoint(
    tags("orders"),
    summary = "Update Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid status or delivery crew"),
        (status_code = StatusCode::FORBIDDEN, description = "Not allowed to change this order"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<i64>,
    json: JsonBody<OrderUpdateRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;
    let changes = OrderChanges::try_from(json.into_inner())?;

    let order = state
        .app
        .orders
        .update_order(principal, OrderId::from_raw(id.into_inner()), changes)
        .await
        .map_err(into_api_error)?;

    Ok(Json(order.into()))
}
