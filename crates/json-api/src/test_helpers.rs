//! Test helpers.

use std::sync::Arc;

use jiff::civil::date;
use rust_decimal::Decimal;
use salvo::{affix_state::inject, prelude::*};

use littlelemon::{
    ids::{CategoryId, MenuItemId, OrderId, UserId},
    orders::OrderStatus,
    roles::{Principal, Role, RoleSet},
};
use littlelemon_app::{
    auth::MockAuthService,
    context::AppContext,
    domain::{
        carts::MockCartsService,
        catalog::{
            MockCatalogService,
            models::{Category, MenuItem},
        },
        orders::{
            MockOrdersService,
            models::{Order, OrderItem},
        },
        users::MockStaffService,
    },
};

use crate::{extensions::*, state::State};

pub(crate) const CUSTOMER: Principal = Principal::new(UserId::from_raw(1), RoleSet::CUSTOMER);

pub(crate) const MANAGER: Principal = Principal::new(
    UserId::from_raw(2),
    RoleSet::CUSTOMER.with(Role::Manager),
);

pub(crate) const CREW: Principal = Principal::new(
    UserId::from_raw(3),
    RoleSet::CUSTOMER.with(Role::DeliveryCrew),
);

/// One mock per service. Any call without an expectation fails the test.
#[derive(Default)]
pub(crate) struct Mocks {
    pub(crate) catalog: MockCatalogService,
    pub(crate) carts: MockCartsService,
    pub(crate) orders: MockOrdersService,
    pub(crate) staff: MockStaffService,
    pub(crate) auth: MockAuthService,
}

impl Mocks {
    pub(crate) fn into_state(self) -> Arc<State> {
        State::shared(AppContext {
            catalog: Arc::new(self.catalog),
            carts: Arc::new(self.carts),
            orders: Arc::new(self.orders),
            staff: Arc::new(self.staff),
            auth: Arc::new(self.auth),
        })
    }

    /// Serve `route` with these mocks, as `principal` or anonymously.
    pub(crate) fn service(self, principal: Option<Principal>, route: Router) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(self.into_state()))
                .hoop(AuthenticateAs(principal))
                .push(route),
        )
        .catcher(crate::errors::catcher())
    }
}

/// Stand-in for the bearer middleware.
struct AuthenticateAs(Option<Principal>);

#[salvo::handler]
impl AuthenticateAs {
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut FlowCtrl,
    ) {
        if let Some(principal) = self.0 {
            depot.insert_principal(principal);
        }

        ctrl.call_next(req, depot, res).await;
    }
}

pub(crate) fn make_category() -> Category {
    Category {
        id: CategoryId::from_raw(1),
        slug: "mains".to_string(),
        title: "Mains".to_string(),
    }
}

pub(crate) fn make_menu_item(id: i64, title: &str, price: Decimal) -> MenuItem {
    MenuItem {
        id: MenuItemId::from_raw(id),
        title: title.to_string(),
        price,
        featured: false,
        category: make_category(),
    }
}

/// A pending order for `user` holding two of menu item 3 at 9.50.
pub(crate) fn make_order(id: i64, user: UserId) -> Order {
    let unit_price = Decimal::new(950, 2);

    Order {
        id: OrderId::from_raw(id),
        user,
        delivery_crew: None,
        status: OrderStatus::Pending,
        total: Decimal::new(1900, 2),
        date: date(2026, 3, 14),
        items: vec![OrderItem {
            menuitem: MenuItemId::from_raw(3),
            quantity: 2,
            unit_price,
            price: unit_price * Decimal::from(2),
        }],
    }
}
