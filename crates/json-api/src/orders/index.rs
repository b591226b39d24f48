//! Order Index Handler

use std::sync::Arc;

use jiff::civil::Date;
use rust_decimal::Decimal;
use salvo::{oapi::extract::QueryParam, prelude::*};

use littlelemon::{
    ids::UserId,
    orders::{OrderFilter, OrderStatus},
    pagination::PageRequest,
};

use crate::{
    errors::ApiError,
    extensions::*,
    orders::{OrderResponse, errors::into_api_error},
    state::State,
};

/// Order Index Handler
///
/// Customers see their own orders, delivery crew the orders assigned to them and managers
/// every order. The `userID` and `delivery-crew` filters narrow that scope further.
#[endpoint(
    tags("orders"),
    summary = "List Orders",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Orders visible to the caller"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unparseable filter"),
    ),
)]
pub(crate) async fn handler(
    status: QueryParam<String, false>,
    from_total: QueryParam<String, false>,
    to_total: QueryParam<String, false>,
    start_date: QueryParam<String, false>,
    end_date: QueryParam<String, false>,
    page: QueryParam<String, false>,
    perpage: QueryParam<String, false>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<Vec<OrderResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let filter = OrderFilter {
        user: req
            .query::<String>("userID")
            .parse_or_400::<UserId>("userID")?,
        delivery_crew: req
            .query::<String>("delivery-crew")
            .parse_or_400::<UserId>("delivery-crew")?,
        status: status.parse_or_400::<OrderStatus>("status")?,
        total_from: from_total.parse_or_400::<Decimal>("from_total")?,
        total_to: to_total.parse_or_400::<Decimal>("to_total")?,
        date_from: start_date.parse_or_400::<Date>("start_date")?,
        date_to: end_date.parse_or_400::<Date>("end_date")?,
    };

    let orders = state
        .app
        .orders
        .list_orders(
            principal,
            filter,
            PageRequest::new(page.into_inner(), perpage.into_inner()),
        )
        .await
        .map_err(into_api_error)?;

    Ok(Json(orders.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use littlelemon_app::domain::orders::MockOrdersService;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::{
        errors::MessageResponse,
        test_helpers::{CUSTOMER, MANAGER, Mocks, make_order},
    };

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        Mocks {
            orders,
            ..Mocks::default()
        }
        .service(Some(MANAGER), Router::with_path("orders").get(handler))
    }

    #[tokio::test]
    async fn forwards_every_filter() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_list_orders()
            .once()
            .withf(|principal, filter, page| {
                *principal == MANAGER
                    && *filter
                        == OrderFilter {
                            user: Some(UserId::from_raw(1)),
                            delivery_crew: Some(UserId::from_raw(3)),
                            status: Some(OrderStatus::Delivered),
                            total_from: Some(Decimal::new(10, 0)),
                            total_to: Some(Decimal::new(50, 0)),
                            date_from: Some(date(2026, 3, 1)),
                            date_to: Some(date(2026, 3, 31)),
                        }
                    && *page == PageRequest::new(Some("2".to_string()), Some("10".to_string()))
            })
            .return_once(|_, _, _| Ok(vec![make_order(1, CUSTOMER.user)]));

        let mut res = TestClient::get(
            "http://example.com/orders?userID=1&delivery-crew=3&status=1&from_total=10\
             &to_total=50&start_date=2026-03-01&end_date=2026-03-31&page=2&perpage=10",
        )
        .send(&make_service(orders))
        .await;

        let body: Vec<OrderResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.len(), 1);
        assert_eq!(body[0].total, "19.00");

        Ok(())
    }

    #[tokio::test]
    async fn blank_filters_are_ignored() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_list_orders()
            .once()
            .withf(|_, filter, _| *filter == OrderFilter::default())
            .return_once(|_, _, _| Ok(vec![]));

        let res = TestClient::get("http://example.com/orders?status=&userID=")
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn bad_date_returns_400() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_list_orders().never();

        let mut res = TestClient::get("http://example.com/orders?start_date=yesterday")
            .send(&make_service(orders))
            .await;

        let body: MessageResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.message, "Invalid value for start_date.");

        Ok(())
    }

    #[tokio::test]
    async fn anonymous_caller_returns_401() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_list_orders().never();

        let svc = Mocks {
            orders,
            ..Mocks::default()
        }
        .service(None, Router::with_path("orders").get(handler));

        let res = TestClient::get("http://example.com/orders").send(&svc).await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
