//! Route tree

use std::sync::Arc;

use salvo::{
    affix_state::inject,
    oapi::{
        OpenApi,
        security::{Http, HttpAuthScheme, SecurityScheme},
        swagger_ui::SwaggerUi,
    },
    prelude::*,
    trailing_slash::remove_slash,
};

use crate::{
    auth, cart, catalog, errors, groups, healthcheck,
    observability::{metrics_handler, request_logging},
    orders,
    state::State,
};

const OPENAPI_PATH: &str = "/api-doc/openapi.json";

/// The routes behind the error catcher.
pub(crate) fn service(state: Arc<State>) -> Service {
    Service::new(service_router(state)).catcher(errors::catcher())
}

/// The whole route tree: middleware, probes, resources and the generated API docs.
pub(crate) fn service_router(state: Arc<State>) -> Router {
    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(request_logging)
        .hoop(remove_slash())
        .hoop(inject(state))
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(metrics_handler))
        .push(app_router());

    let doc = OpenApi::new("Little Lemon API", env!("CARGO_PKG_VERSION"))
        .add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
        .merge_router(&router);

    router
        .push(doc.into_router(OPENAPI_PATH))
        .push(SwaggerUi::new(OPENAPI_PATH).into_router("docs"))
}

/// Every resource route, behind the bearer-token middleware.
fn app_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .push(
            Router::with_path("menu-items")
                .get(catalog::menu_items::index::handler)
                .post(catalog::menu_items::create::handler)
                .push(
                    Router::with_path("{id}")
                        .get(catalog::menu_items::get::handler)
                        .put(catalog::menu_items::update::handler)
                        .patch(catalog::menu_items::patch::handler)
                        .delete(catalog::menu_items::delete::handler),
                ),
        )
        .push(
            Router::with_path("categories")
                .get(catalog::categories::index::handler)
                .post(catalog::categories::create::handler),
        )
        .push(
            Router::with_path("groups/{group}/users")
                .get(groups::index::handler)
                .post(groups::create::handler)
                .push(Router::with_path("{id}").delete(groups::delete::handler)),
        )
        .push(
            Router::with_path("cart/menu-items")
                .get(cart::index::handler)
                .post(cart::create::handler)
                .delete(cart::delete::handler),
        )
        .push(
            Router::with_path("orders")
                .get(orders::index::handler)
                .post(orders::create::handler)
                .push(
                    Router::with_path("{id}")
                        .get(orders::get::handler)
                        .patch(orders::update::handler)
                        .delete(orders::delete::handler),
                ),
        )
}
