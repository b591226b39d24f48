//! Patch Menu Item Handler

use std::sync::Arc;

use rust_decimal::Decimal;
use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use littlelemon::{
    ids::{CategoryId, MenuItemId},
    policy::{Action, Resource, ensure},
};
use littlelemon_app::domain::catalog::data::MenuItemUpdate;

use crate::{
    catalog::{
        MenuItemResponse,
        errors::into_api_error,
        menu_items::create::{INVALID_CATEGORY, INVALID_PRICE},
    },
    errors::ApiError,
    extensions::*,
    fields::FieldValue,
    state::State,
};

/// Partial menu item change. Omitted fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct MenuItemPatchRequest {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    #[salvo(schema(value_type = Option<String>))]
    pub price: Option<FieldValue>,

    #[serde(default)]
    pub featured: Option<bool>,

    #[serde(default)]
    #[salvo(schema(value_type = Option<i64>))]
    pub category_id: Option<FieldValue>,
}

impl TryFrom<MenuItemPatchRequest> for MenuItemUpdate {
    type Error = ApiError;

    fn try_from(request: MenuItemPatchRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            price: request
                .price
                .map(|price| price.parse::<Decimal>(INVALID_PRICE))
                .transpose()?,
            category: request
                .category_id
                .map(|category| category.parse::<CategoryId>(INVALID_CATEGORY))
                .transpose()?,
            title: request.title,
            featured: request.featured,
        })
    }
}

/// Patch Menu Item Handler
#[endpoint(
    tags("menu-items"),
    summary = "Patch Menu Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Menu item updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid menu item"),
        (status_code = StatusCode::FORBIDDEN, description = "Not a manager"),
        (status_code = StatusCode::NOT_FOUND, description = "Menu item not found"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<i64>,
    json: JsonBody<MenuItemPatchRequest>,
    depot: &mut Depot,
) -> Result<Json<MenuItemResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    ensure(&principal, Resource::MenuItem, Action::Update, None)?;

    let item = state
        .app
        .catalog
        .update_menu_item(
            principal,
            MenuItemId::from_raw(id.into_inner()),
            json.into_inner().try_into()?,
        )
        .await
        .map_err(into_api_error)?;

    Ok(Json(item.into()))
}

#[cfg(test)]
mod tests {
    use littlelemon::roles::Principal;
    use littlelemon_app::domain::catalog::MockCatalogService;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::{
        errors::MessageResponse,
        test_helpers::{CREW, MANAGER, Mocks, make_menu_item},
    };

    use super::*;

    fn make_service(catalog: MockCatalogService, principal: Principal) -> Service {
        Mocks {
            catalog,
            ..Mocks::default()
        }
        .service(Some(principal), Router::with_path("menu-items/{id}").patch(handler))
    }

    #[tokio::test]
    async fn only_sent_fields_change() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog
            .expect_update_menu_item()
            .once()
            .withf(|_, _, update| {
                *update
                    == MenuItemUpdate {
                        featured: Some(true),
                        ..MenuItemUpdate::default()
                    }
            })
            .return_once(|_, _, _| {
                let mut item = make_menu_item(5, "Lemon Cake", Decimal::new(600, 2));
                item.featured = true;
                Ok(item)
            });

        let mut res = TestClient::patch("http://example.com/menu-items/5")
            .json(&json!({ "featured": true }))
            .send(&make_service(catalog, MANAGER))
            .await;

        let body: MenuItemResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(body.featured);

        Ok(())
    }

    #[tokio::test]
    async fn bad_category_id_returns_400() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog.expect_update_menu_item().never();

        let mut res = TestClient::patch("http://example.com/menu-items/5")
            .json(&json!({ "category_id": "desserts" }))
            .send(&make_service(catalog, MANAGER))
            .await;

        let body: MessageResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.message, INVALID_CATEGORY);

        Ok(())
    }

    #[tokio::test]
    async fn delivery_crew_is_forbidden() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog.expect_update_menu_item().never();

        let res = TestClient::patch("http://example.com/menu-items/5")
            .json(&json!({ "featured": true }))
            .send(&make_service(catalog, CREW))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
