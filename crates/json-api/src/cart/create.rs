//! Add To Cart Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use littlelemon::{ids::MenuItemId, pricing::QuantityError};
use littlelemon_app::domain::carts::data::NewCartLine;

use crate::{
    cart::{CartLineResponse, errors::into_api_error},
    errors::ApiError,
    extensions::*,
    fields::{FieldValue, required},
    state::State,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartLineRequest {
    #[serde(default)]
    #[salvo(schema(value_type = i64))]
    pub menuitem_id: Option<FieldValue>,

    /// Added to any quantity already in the cart
    #[serde(default)]
    #[salvo(schema(value_type = i64))]
    pub quantity: Option<FieldValue>,
}

impl TryFrom<CartLineRequest> for NewCartLine {
    type Error = ApiError;

    fn try_from(request: CartLineRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            menuitem: required(request.menuitem_id, "menuitem_id")?
                .parse::<MenuItemId>("A valid integer is required.")?,
            quantity: required(request.quantity, "quantity")?
                .parse::<i64>(&QuantityError::NotPositive.to_string())?,
        })
    }
}

/// Add To Cart Handler
///
/// Adding an item that is already in the cart merges the quantities.
#[endpoint(
    tags("cart"),
    summary = "Add To Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Cart line created or merged"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid quantity or menu item"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CartLineRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CartLineResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let line = state
        .app
        .carts
        .add_to_cart(principal, json.into_inner().try_into()?)
        .await
        .map_err(into_api_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(line.into()))
}

#[cfg(test)]
mod tests {
    use littlelemon_app::domain::carts::{CartsServiceError, MockCartsService, models::CartLine};
    use rust_decimal::Decimal;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::{
        errors::MessageResponse,
        test_helpers::{CUSTOMER, Mocks, make_menu_item},
    };

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        Mocks {
            carts,
            ..Mocks::default()
        }
        .service(Some(CUSTOMER), Router::with_path("cart/menu-items").post(handler))
    }

    #[tokio::test]
    async fn adds_line_from_string_fields() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_add_to_cart()
            .once()
            .withf(|_, line| {
                *line
                    == NewCartLine {
                        menuitem: MenuItemId::from_raw(3),
                        quantity: 2,
                    }
            })
            .return_once(|_, _| {
                Ok(CartLine {
                    menuitem: make_menu_item(3, "Greek Salad", Decimal::new(950, 2)),
                    quantity: 2,
                    unit_price: Decimal::new(950, 2),
                    price: Decimal::new(1900, 2),
                })
            });

        let mut res = TestClient::post("http://example.com/cart/menu-items")
            .json(&json!({ "menuitem_id": "3", "quantity": "2" }))
            .send(&make_service(carts))
            .await;

        let body: CartLineResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body.menuitem.id, 3);
        assert_eq!(body.price, "19.00");

        Ok(())
    }

    #[tokio::test]
    async fn fractional_quantity_returns_400() -> TestResult {
        let mut carts = MockCartsService::new();

        carts.expect_add_to_cart().never();

        let mut res = TestClient::post("http://example.com/cart/menu-items")
            .json(&json!({ "menuitem_id": 3, "quantity": 1.5 }))
            .send(&make_service(carts))
            .await;

        let body: MessageResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.message, "Quantity must be a positive integer.");

        Ok(())
    }

    #[tokio::test]
    async fn zero_quantity_returns_400() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_add_to_cart()
            .once()
            .return_once(|_, _| Err(CartsServiceError::InvalidQuantity(QuantityError::NotPositive)));

        let mut res = TestClient::post("http://example.com/cart/menu-items")
            .json(&json!({ "menuitem_id": 3, "quantity": 0 }))
            .send(&make_service(carts))
            .await;

        let body: MessageResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.message, "Quantity must be a positive integer.");

        Ok(())
    }

    #[tokio::test]
    async fn unknown_menu_item_returns_400() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_add_to_cart()
            .once()
            .return_once(|_, _| Err(CartsServiceError::UnknownMenuItem));

        let mut res = TestClient::post("http://example.com/cart/menu-items")
            .json(&json!({ "menuitem_id": 99, "quantity": 1 }))
            .send(&make_service(carts))
            .await;

        let body: MessageResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.message, "Menu item does not exist.");

        Ok(())
    }

    #[tokio::test]
    async fn merged_quantity_over_cap_returns_400() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_add_to_cart()
            .once()
            .return_once(|_, _| Err(CartsServiceError::InvalidQuantity(QuantityError::TooLarge)));

        let mut res = TestClient::post("http://example.com/cart/menu-items")
            .json(&json!({ "menuitem_id": 3, "quantity": 32_767 }))
            .send(&make_service(carts))
            .await;

        let body: MessageResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.message, "Quantity must not exceed 32767.");

        Ok(())
    }

    #[tokio::test]
    async fn missing_menu_item_returns_400() -> TestResult {
        let mut carts = MockCartsService::new();

        carts.expect_add_to_cart().never();

        let mut res = TestClient::post("http://example.com/cart/menu-items")
            .json(&json!({ "quantity": 1 }))
            .send(&make_service(carts))
            .await;

        let body: MessageResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.message, "menuitem_id: This field is required.");

        Ok(())
    }

    #[tokio::test]
    async fn anonymous_request_is_rejected_before_payload_checks() -> TestResult {
        let mut carts = MockCartsService::new();

        carts.expect_add_to_cart().never();

        let res = TestClient::post("http://example.com/cart/menu-items")
            .json(&json!({}))
            .send(
                &Mocks {
                    carts,
                    ..Mocks::default()
                }
                .service(None, Router::with_path("cart/menu-items").post(handler)),
            )
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
