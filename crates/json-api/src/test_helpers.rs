//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use storefront_app::{
    context::AppContext,
    domain::{
        carts::{MockCartsService, mirror::CartLine},
        catalog::{
            MockCatalogService,
            models::{ProductUuid, VariantOption, VariantUuid},
        },
        checkout::MockCheckoutService,
        customers::{MockCustomersService, models::CustomerProfile},
        orders::{
            MockOrdersService,
            models::{Order, OrderLine, OrderLineUuid, OrderStatus, OrderUuid},
        },
        reservations::{MockReservationsService, models::SessionKey},
    },
};

use crate::{config::session::SessionConfig, session, state::State};

pub(crate) const TEST_SESSION_KEY: SessionKey =
    SessionKey::from_uuid(Uuid::from_u128(0x0f1e_2d3c_4b5a_4968_8776_5544_3322_1100));

/// `Cookie` header value carrying [`TEST_SESSION_KEY`].
pub(crate) fn session_cookie() -> String {
    format!("{}={TEST_SESSION_KEY}", session::SESSION_COOKIE)
}

fn strict_carts_mock() -> MockCartsService {
    let mut carts = MockCartsService::new();

    carts.expect_get_cart().never();
    carts.expect_add_item().never();
    carts.expect_update_item().never();
    carts.expect_remove_item().never();
    carts.expect_clear_cart().never();

    carts
}

fn strict_checkout_mock() -> MockCheckoutService {
    let mut checkout = MockCheckoutService::new();

    checkout.expect_place_order().never();

    checkout
}

fn strict_orders_mock() -> MockOrdersService {
    let mut orders = MockOrdersService::new();

    orders.expect_get_order().never();
    orders.expect_advance_order().never();

    orders
}

fn app_context(
    carts: MockCartsService,
    checkout: MockCheckoutService,
    orders: MockOrdersService,
) -> AppContext {
    AppContext {
        carts: Arc::new(carts),
        catalog: Arc::new(MockCatalogService::new()),
        checkout: Arc::new(checkout),
        customers: Arc::new(MockCustomersService::new()),
        orders: Arc::new(orders),
        reservations: Arc::new(MockReservationsService::new()),
    }
}

fn session_config() -> SessionConfig {
    SessionConfig {
        session_cookie_secure: false,
    }
}

/// State whose services all reject any call.
pub(crate) fn strict_state() -> Arc<State> {
    State::from_app_context(
        app_context(
            strict_carts_mock(),
            strict_checkout_mock(),
            strict_orders_mock(),
        ),
        session_config(),
    )
}

fn service(app: AppContext, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(State::from_app_context(app, session_config())))
            .hoop(session::middleware::handler)
            .push(route),
    )
}

pub(crate) fn carts_service(carts: MockCartsService, route: Router) -> Service {
    service(
        app_context(carts, strict_checkout_mock(), strict_orders_mock()),
        route,
    )
}

pub(crate) fn checkout_service(checkout: MockCheckoutService, route: Router) -> Service {
    service(
        app_context(strict_carts_mock(), checkout, strict_orders_mock()),
        route,
    )
}

pub(crate) fn orders_service(orders: MockOrdersService, route: Router) -> Service {
    service(
        app_context(strict_carts_mock(), strict_checkout_mock(), orders),
        route,
    )
}

pub(crate) fn make_cart_line_for(
    variant: VariantUuid,
    price: Decimal,
    quantity: u32,
) -> CartLine {
    CartLine {
        variant_uuid: variant,
        product_uuid: ProductUuid::new(),
        product_name: "Camiseta".to_string(),
        product_slug: "camiseta".to_string(),
        sku: format!("CAM-{variant}"),
        quantity,
        price,
        discount_price: None,
        options: vec![VariantOption {
            option: "Talla".to_string(),
            value: "M".to_string(),
        }],
        image_url: None,
        stock: 10,
        reserved_at: Timestamp::UNIX_EPOCH,
        expires_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_cart_line(
    price: Decimal,
    discount_price: Option<Decimal>,
    quantity: u32,
) -> CartLine {
    CartLine {
        discount_price,
        ..make_cart_line_for(VariantUuid::new(), price, quantity)
    }
}

pub(crate) fn make_order(uuid: OrderUuid, total: Decimal) -> Order {
    Order {
        uuid,
        customer_uuid: None,
        status: OrderStatus::Pending,
        total,
        provider_order_id: None,
        provider_response: None,
        tracking_number: None,
        shipping_company: None,
        lines: Vec::new(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_order_line(order: OrderUuid, price: Decimal, quantity: u32) -> OrderLine {
    OrderLine {
        uuid: OrderLineUuid::new(),
        order_uuid: order,
        product_uuid: Some(ProductUuid::new()),
        variant_uuid: Some(VariantUuid::new()),
        sku: "CAM-001".to_string(),
        product_name: "Camiseta".to_string(),
        quantity,
        price,
        position: 0,
        provider_product_id: None,
    }
}

pub(crate) fn make_profile() -> CustomerProfile {
    CustomerProfile {
        name: "Ana Gómez".to_string(),
        phone: "3001234567".to_string(),
        department: "Antioquia".to_string(),
        city: "Medellín".to_string(),
        address: "Calle 10 # 43-12".to_string(),
        ..CustomerProfile::default()
    }
}
