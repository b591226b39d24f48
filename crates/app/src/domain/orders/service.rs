//! Orders service.

use async_trait::async_trait;
use jiff::Zoned;
use littlelemon::{
    ids::OrderId,
    orders::{OrderChanges, OrderFilter, check_update},
    pagination::PageRequest,
    policy::{Action, Resource, order_scope},
    pricing::order_total,
    roles::{Principal, Role},
};
use mockall::automock;
use tracing::{debug, info};

use crate::{
    database::Db,
    domain::{
        authorize,
        carts::PgCartsRepository,
        orders::{
            errors::OrdersServiceError,
            models::{Order, OrderItem},
            repository::PgOrdersRepository,
        },
        users::PgUsersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    repository: PgOrdersRepository,
    carts_repository: PgCartsRepository,
    users_repository: PgUsersRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgOrdersRepository::new(),
            carts_repository: PgCartsRepository::new(),
            users_repository: PgUsersRepository::new(),
        }
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn place_order(&self, principal: Principal) -> Result<Order, OrdersServiceError> {
        authorize(&principal, Resource::Order, Action::Create, None)?;

        let mut tx = self.db.begin().await?;

        self.users_repository
            .lock_user(&mut tx, principal.user)
            .await?;

        let lines = self
            .carts_repository
            .lock_cart_lines(&mut tx, principal.user)
            .await?;

        if lines.is_empty() {
            return Err(OrdersServiceError::EmptyCart);
        }

        let items: Vec<OrderItem> = lines
            .into_iter()
            .map(|line| OrderItem {
                menuitem: line.menuitem,
                quantity: line.quantity,
                unit_price: line.unit_price,
                price: line.price,
            })
            .collect();

        let total = order_total(items.iter().map(|item| item.price));

        let mut order = self
            .repository
            .create_order(&mut tx, principal.user, total, Zoned::now().date())
            .await?;

        self.repository
            .insert_order_items(&mut tx, order.id, &items)
            .await?;

        self.carts_repository
            .clear_cart(&mut tx, principal.user)
            .await?;

        tx.commit().await?;

        order.items = items;

        info!(
            order_id = %order.id,
            user_id = %principal.user,
            total = %order.total,
            items = order.items.len(),
            "placed order"
        );

        Ok(order)
    }

    async fn list_orders(
        &self,
        principal: Principal,
        filter: OrderFilter,
        page: PageRequest,
    ) -> Result<Vec<Order>, OrdersServiceError> {
        authorize(&principal, Resource::Order, Action::List, None)?;

        let scope = order_scope(&principal);

        let mut tx = self.db.begin().await?;

        let count = self.repository.count_orders(&mut tx, scope, &filter).await?;

        let Some(window) = page.resolve(count) else {
            debug!(?page, "invalid page size, returning no orders");

            return Ok(Vec::new());
        };

        let mut orders = self
            .repository
            .list_orders(&mut tx, scope, &filter, window)
            .await?;

        self.repository.attach_items(&mut tx, &mut orders).await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn get_order(
        &self,
        principal: Principal,
        order: OrderId,
    ) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let mut record = self.repository.get_order(&mut tx, order).await?;

        authorize(
            &principal,
            Resource::Order,
            Action::Read,
            Some(&record.parties()),
        )?;

        self.repository
            .attach_items(&mut tx, std::slice::from_mut(&mut record))
            .await?;

        tx.commit().await?;

        Ok(record)
    }

    async fn update_order(
        &self,
        principal: Principal,
        order: OrderId,
        changes: OrderChanges,
    ) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self.repository.lock_order(&mut tx, order).await?;

        check_update(&principal, &current.parties(), &changes).inspect_err(|error| {
            debug!(user_id = %principal.user, order_id = %order, %error, "order update rejected");
        })?;

        if let Some(crew) = changes.delivery_crew {
            let is_crew = self
                .users_repository
                .get_roles(&mut tx, crew)
                .await?
                .is_some_and(|roles| roles.contains(Role::DeliveryCrew));

            if !is_crew {
                return Err(OrdersServiceError::NotDeliveryCrew);
            }
        }

        let mut updated = if changes.is_empty() {
            current
        } else {
            self.repository.update_order(&mut tx, order, changes).await?
        };

        self.repository
            .attach_items(&mut tx, std::slice::from_mut(&mut updated))
            .await?;

        tx.commit().await?;

        info!(
            order_id = %order,
            updated_by = %principal.user,
            status = %updated.status,
            delivery_crew = ?updated.delivery_crew,
            "updated order"
        );

        Ok(updated)
    }

    async fn delete_order(
        &self,
        principal: Principal,
        order: OrderId,
    ) -> Result<(), OrdersServiceError> {
        authorize(&principal, Resource::Order, Action::Delete, None)?;

        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_order(&mut tx, order).await?;

        if rows_affected == 0 {
            return Err(OrdersServiceError::NotFound);
        }

        tx.commit().await?;

        info!(order_id = %order, deleted_by = %principal.user, "deleted order");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Turn the principal's cart into an order and empty the cart, atomically.
    async fn place_order(&self, principal: Principal) -> Result<Order, OrdersServiceError>;

    /// List the orders the principal may see, narrowed by `filter`, one page at a time.
    ///
    /// An unusable page size yields an empty list rather than an error.
    async fn list_orders(
        &self,
        principal: Principal,
        filter: OrderFilter,
        page: PageRequest,
    ) -> Result<Vec<Order>, OrdersServiceError>;

    async fn get_order(
        &self,
        principal: Principal,
        order: OrderId,
    ) -> Result<Order, OrdersServiceError>;

    /// Assign delivery crew and/or change status.
    ///
    /// Managers may change both. The assigned delivery crew may change the status only.
    async fn update_order(
        &self,
        principal: Principal,
        order: OrderId,
        changes: OrderChanges,
    ) -> Result<Order, OrdersServiceError>;

    async fn delete_order(
        &self,
        principal: Principal,
        order: OrderId,
    ) -> Result<(), OrdersServiceError>;
}

#[cfg(test)]
mod tests {
    use littlelemon::{ids::UserId, orders::OrderStatus};
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{domain::carts::data::NewCartLine, test::TestContext};

    use super::*;

    async fn order_for(ctx: &TestContext, customer: Principal) -> TestResult<Order> {
        let mains = ctx.create_category("mains", "Mains").await;
        let salad = ctx
            .create_menu_item("Greek Salad", Decimal::new(950, 2), mains.id)
            .await;

        ctx.carts
            .add_to_cart(
                customer,
                NewCartLine {
                    menuitem: salad.id,
                    quantity: 2,
                },
            )
            .await?;

        Ok(ctx.orders.place_order(customer).await?)
    }

    #[tokio::test]
    #[ignore = "requires a docker daemon"]
    async fn place_order_moves_cart_into_order() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = ctx.create_user("peach").await;

        let order = order_for(&ctx, customer).await?;

        assert_eq!(order.total.to_string(), "19.00");
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items.first().map(|item| item.quantity), Some(2));
        assert!(ctx.carts.list_cart(customer).await?.is_empty());

        let second = ctx.orders.place_order(customer).await;

        assert!(
            matches!(second, Err(OrdersServiceError::EmptyCart)),
            "expected EmptyCart, got {second:?}"
        );

        let stored = ctx.orders.get_order(customer, order.id).await?;

        assert_eq!(stored, order);

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a docker daemon"]
    async fn cart_add_during_checkout_is_ordered_or_left_in_cart() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = ctx.create_user("peach").await;
        let mains = ctx.create_category("mains", "Mains").await;
        let salad = ctx
            .create_menu_item("Greek Salad", Decimal::new(950, 2), mains.id)
            .await;
        let soup = ctx
            .create_menu_item("Lentil Soup", Decimal::new(750, 2), mains.id)
            .await;

        for _ in 0..10 {
            ctx.carts
                .add_to_cart(
                    customer,
                    NewCartLine {
                        menuitem: salad.id,
                        quantity: 2,
                    },
                )
                .await?;

            let (placed, added) = tokio::join!(
                ctx.orders.place_order(customer),
                ctx.carts.add_to_cart(
                    customer,
                    NewCartLine {
                        menuitem: soup.id,
                        quantity: 1,
                    },
                ),
            );

            let order = placed?;
            added?;

            let stored = ctx.orders.get_order(customer, order.id).await?;
            let soup_ordered = stored.items.iter().any(|item| item.menuitem == soup.id);
            let cart = ctx.carts.list_cart(customer).await?;

            assert_eq!(stored.total, order_total(stored.items.iter().map(|item| item.price)));
            assert_eq!(stored.items, order.items);
            assert_eq!(soup_ordered, cart.is_empty(), "soup is in exactly one place");

            ctx.carts.clear_cart(customer).await?;
        }

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a docker daemon"]
    async fn failed_checkout_leaves_cart_and_orders_untouched() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = ctx.create_user("peach").await;
        let manager = ctx.manager("mario").await;
        let mains = ctx.create_category("mains", "Mains").await;
        let salad = ctx
            .create_menu_item("Greek Salad", Decimal::new(950, 2), mains.id)
            .await;

        ctx.carts
            .add_to_cart(
                customer,
                NewCartLine {
                    menuitem: salad.id,
                    quantity: 2,
                },
            )
            .await?;

        sqlx::raw_sql(
            "CREATE FUNCTION reject_order_items() RETURNS trigger LANGUAGE plpgsql AS $$ \
             BEGIN RAISE EXCEPTION 'order items are closed'; END $$; \
             CREATE TRIGGER reject_order_items BEFORE INSERT ON order_items \
             FOR EACH STATEMENT EXECUTE FUNCTION reject_order_items();",
        )
        .execute(ctx.db.pool())
        .await?;

        let result = ctx.orders.place_order(customer).await;

        assert!(
            matches!(result, Err(OrdersServiceError::Sql(_))),
            "expected a storage error, got {result:?}"
        );

        let cart = ctx.carts.list_cart(customer).await?;

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.first().map(|line| line.quantity), Some(2));
        assert!(
            ctx.orders
                .list_orders(manager, OrderFilter::default(), PageRequest::default())
                .await?
                .is_empty()
        );

        sqlx::raw_sql("DROP TRIGGER reject_order_items ON order_items")
            .execute(ctx.db.pool())
            .await?;

        let order = ctx.orders.place_order(customer).await?;

        assert_eq!(order.total.to_string(), "19.00");
        assert!(ctx.carts.list_cart(customer).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a docker daemon"]
    async fn empty_cart_checkout_creates_no_order() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = ctx.create_user("peach").await;
        let manager = ctx.manager("mario").await;

        let result = ctx.orders.place_order(customer).await;

        assert!(matches!(result, Err(OrdersServiceError::EmptyCart)));
        assert!(
            ctx.orders
                .list_orders(manager, OrderFilter::default(), PageRequest::default())
                .await?
                .is_empty()
        );

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a docker daemon"]
    async fn customers_only_see_their_own_orders() -> TestResult {
        let ctx = TestContext::new().await;
        let peach = ctx.create_user("peach").await;
        let daisy = ctx.create_user("daisy").await;
        let manager = ctx.manager("mario").await;

        let order = order_for(&ctx, peach).await?;

        assert!(
            ctx.orders
                .list_orders(daisy, OrderFilter::default(), PageRequest::default())
                .await?
                .is_empty()
        );
        assert_eq!(
            ctx.orders
                .list_orders(manager, OrderFilter::default(), PageRequest::default())
                .await?
                .len(),
            1
        );

        let result = ctx.orders.get_order(daisy, order.id).await;

        assert!(matches!(result, Err(OrdersServiceError::Forbidden(_))));

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a docker daemon"]
    async fn manager_assigns_crew_who_then_updates_status() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = ctx.create_user("peach").await;
        let manager = ctx.manager("mario").await;
        let crew = ctx.delivery_crew("toad").await;

        let order = order_for(&ctx, customer).await?;

        let assigned = ctx
            .orders
            .update_order(
                manager,
                order.id,
                OrderChanges {
                    delivery_crew: Some(crew.user),
                    status: None,
                },
            )
            .await?;

        assert_eq!(assigned.delivery_crew, Some(crew.user));
        assert_eq!(assigned.items.len(), 1);

        let listed = ctx
            .orders
            .list_orders(crew, OrderFilter::default(), PageRequest::default())
            .await?;

        assert_eq!(listed.len(), 1);

        let delivered = ctx
            .orders
            .update_order(
                crew,
                order.id,
                OrderChanges {
                    delivery_crew: None,
                    status: Some(OrderStatus::Delivered),
                },
            )
            .await?;

        assert_eq!(delivered.status, OrderStatus::Delivered);

        let missing_status = ctx
            .orders
            .update_order(crew, order.id, OrderChanges::default())
            .await;

        assert!(matches!(
            missing_status,
            Err(OrdersServiceError::StatusRequired)
        ));

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a docker daemon"]
    async fn assigning_non_crew_leaves_order_unchanged() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = ctx.create_user("peach").await;
        let manager = ctx.manager("mario").await;

        let order = order_for(&ctx, customer).await?;

        for crew in [customer.user, UserId::from_raw(9_999)] {
            let result = ctx
                .orders
                .update_order(
                    manager,
                    order.id,
                    OrderChanges {
                        delivery_crew: Some(crew),
                        status: Some(OrderStatus::Processing),
                    },
                )
                .await;

            assert!(
                matches!(result, Err(OrdersServiceError::NotDeliveryCrew)),
                "expected NotDeliveryCrew, got {result:?}"
            );
        }

        let stored = ctx.orders.get_order(manager, order.id).await?;

        assert_eq!(stored, order);

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a docker daemon"]
    async fn owner_cannot_update_own_order() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = ctx.create_user("peach").await;

        let order = order_for(&ctx, customer).await?;

        let result = ctx
            .orders
            .update_order(
                customer,
                order.id,
                OrderChanges {
                    delivery_crew: None,
                    status: Some(OrderStatus::Delivered),
                },
            )
            .await;

        assert!(matches!(result, Err(OrdersServiceError::Forbidden(_))));

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a docker daemon"]
    async fn delete_checks_role_before_existence() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = ctx.create_user("peach").await;
        let manager = ctx.manager("mario").await;

        let forbidden = ctx
            .orders
            .delete_order(customer, OrderId::from_raw(9_999))
            .await;

        assert!(matches!(forbidden, Err(OrdersServiceError::Forbidden(_))));

        let missing = ctx
            .orders
            .delete_order(manager, OrderId::from_raw(9_999))
            .await;

        assert!(matches!(missing, Err(OrdersServiceError::NotFound)));

        let order = order_for(&ctx, customer).await?;

        ctx.orders.delete_order(manager, order.id).await?;

        let gone = ctx.orders.get_order(manager, order.id).await;

        assert!(matches!(gone, Err(OrdersServiceError::NotFound)));

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a docker daemon"]
    async fn list_orders_filters_by_total_and_status() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = ctx.create_user("peach").await;
        let manager = ctx.manager("mario").await;

        order_for(&ctx, customer).await?;

        let above = ctx
            .orders
            .list_orders(
                manager,
                OrderFilter {
                    total_from: Some(Decimal::new(20, 0)),
                    ..OrderFilter::default()
                },
                PageRequest::default(),
            )
            .await?;

        let pending = ctx
            .orders
            .list_orders(
                manager,
                OrderFilter {
                    status: Some(OrderStatus::Pending),
                    total_to: Some(Decimal::new(19, 0)),
                    ..OrderFilter::default()
                },
                PageRequest::default(),
            )
            .await?;

        assert!(above.is_empty());
        assert_eq!(pending.len(), 1);

        Ok(())
    }
}
