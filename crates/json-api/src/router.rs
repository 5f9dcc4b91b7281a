//! App Router

use salvo::Router;

use crate::{carts, checkout, orders, session};

/// Storefront routes. Every route runs inside a cart session.
pub(crate) fn app_router() -> Router {
    Router::new()
        .hoop(session::middleware::handler)
        .push(
            Router::with_path("cart")
                .get(carts::get::handler)
                .delete(carts::clear::handler)
                .push(Router::with_path("count").get(carts::count::handler))
                .push(
                    Router::with_path("items")
                        .post(carts::items::create::handler)
                        .push(
                            Router::with_path("{variant}")
                                .put(carts::items::update::handler)
                                .delete(carts::items::delete::handler),
                        ),
                ),
        )
        .push(Router::with_path("checkout").post(checkout::create::handler))
        .push(Router::with_path("orders/{order}").get(orders::get::handler))
}
