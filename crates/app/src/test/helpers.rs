//! Test Helpers

use littlelemon::{
    ids::{CategoryId, UserId},
    roles::{Principal, Role, RoleSet},
};
use rust_decimal::Decimal;

use crate::{
    domain::{
        catalog::{
            CatalogService,
            data::{NewCategory, NewMenuItem},
            models::{Category, MenuItem},
        },
        users::models::{NewUser, User},
    },
    test::TestContext,
};

/// Catalog writes only check roles, so seeding needs no stored user.
fn seeding_admin() -> Principal {
    Principal::new(UserId::from_raw(0), RoleSet::CUSTOMER.with(Role::Admin))
}

pub(crate) async fn create_user(ctx: &TestContext, username: &str, is_superuser: bool) -> User {
    ctx.staff
        .create_user(NewUser {
            username: username.to_string(),
            email: format!("{username}@littlelemon.test"),
            is_superuser,
        })
        .await
        .expect("Failed to create test user")
}

impl TestContext {
    pub async fn create_category(&self, slug: &str, title: &str) -> Category {
        self.catalog
            .create_category(
                seeding_admin(),
                NewCategory {
                    slug: slug.to_string(),
                    title: title.to_string(),
                },
            )
            .await
            .expect("Failed to create test category")
    }

    pub async fn create_menu_item(
        &self,
        title: &str,
        price: Decimal,
        category: CategoryId,
    ) -> MenuItem {
        self.catalog
            .create_menu_item(
                seeding_admin(),
                NewMenuItem {
                    title: title.to_string(),
                    price,
                    featured: false,
                    category,
                },
            )
            .await
            .expect("Failed to create test menu item")
    }
}
