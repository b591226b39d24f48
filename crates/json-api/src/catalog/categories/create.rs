//! Create Category Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use littlelemon::policy::{Action, Resource, ensure};
use littlelemon_app::domain::catalog::data::NewCategory;

use crate::{
    catalog::{CategoryResponse, errors::into_api_error},
    errors::ApiError,
    extensions::*,
    fields::required,
    state::State,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoryRequest {
    /// Slugified before storage
    #[serde(default)]
    #[salvo(schema(value_type = String))]
    pub slug: Option<String>,

    #[serde(default)]
    #[salvo(schema(value_type = String))]
    pub title: Option<String>,
}

impl TryFrom<CategoryRequest> for NewCategory {
    type Error = ApiError;

    fn try_from(request: CategoryRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            slug: required(request.slug, "slug")?,
            title: required(request.title, "title")?,
        })
    }
}

/// Create Category Handler
#[endpoint(
    tags("categories"),
    summary = "Create Category",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Category created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid or duplicate category"),
        (status_code = StatusCode::FORBIDDEN, description = "Not a manager"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CategoryRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CategoryResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    ensure(&principal, Resource::Category, Action::Create, None)?;

    let category = state
        .app
        .catalog
        .create_category(principal, json.into_inner().try_into()?)
        .await
        .map_err(into_api_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(category.into()))
}

#[cfg(test)]
mod tests {
    use littlelemon::roles::Principal;
    use littlelemon_app::domain::catalog::{CatalogServiceError, MockCatalogService};
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::{
        errors::MessageResponse,
        test_helpers::{CUSTOMER, MANAGER, Mocks, make_category},
    };

    use super::*;

    fn make_service(catalog: MockCatalogService, principal: Principal) -> Service {
        Mocks {
            catalog,
            ..Mocks::default()
        }
        .service(Some(principal), Router::with_path("categories").post(handler))
    }

    #[tokio::test]
    async fn manager_creates_category() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog
            .expect_create_category()
            .once()
            .withf(|_, category| category.slug == "Mains" && category.title == "Mains")
            .return_once(|_, _| Ok(make_category()));

        let mut res = TestClient::post("http://example.com/categories")
            .json(&json!({ "slug": "Mains", "title": "Mains" }))
            .send(&make_service(catalog, MANAGER))
            .await;

        let body: CategoryResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body.slug, "mains");

        Ok(())
    }

    #[tokio::test]
    async fn customer_is_forbidden() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog.expect_create_category().never();

        let mut res = TestClient::post("http://example.com/categories")
            .json(&json!({ "slug": "mains" }))
            .send(&make_service(catalog, CUSTOMER))
            .await;

        let body: MessageResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));
        assert_eq!(body.message, "You are not authorized to perform this action.");

        Ok(())
    }

    #[tokio::test]
    async fn duplicate_slug_returns_400() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog
            .expect_create_category()
            .once()
            .return_once(|_, _| Err(CatalogServiceError::DuplicateSlug));

        let mut res = TestClient::post("http://example.com/categories")
            .json(&json!({ "slug": "mains", "title": "Mains" }))
            .send(&make_service(catalog, MANAGER))
            .await;

        let body: MessageResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.message, "category with this slug already exists.");

        Ok(())
    }

    #[tokio::test]
    async fn missing_title_returns_400() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog.expect_create_category().never();

        let mut res = TestClient::post("http://example.com/categories")
            .json(&json!({ "slug": "mains" }))
            .send(&make_service(catalog, MANAGER))
            .await;

        let body: MessageResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.message, "title: This field is required.");

        Ok(())
    }
}
