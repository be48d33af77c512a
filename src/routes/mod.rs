mod admin;
mod health;
mod login;
mod me;
mod merchants;
mod orders;
mod password_reset;
mod products;
mod register;

use axum::{
    Router, middleware,
    routing::{get, patch, post},
};

use crate::{AppState, middleware::{auth_middleware, require_admin}};

pub fn create_router(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/auth/register", post(register::register_user))
        .route("/auth/login", post(login::login_user))
        .route("/auth/forgot-password", post(password_reset::forgot_password))
        .route("/auth/reset-password", post(password_reset::reset_password))
        .route("/merchants", get(merchants::list_merchants))
        .route("/products", get(products::list_products));

    let authenticated = Router::new()
        .route("/auth/me", get(me::current_user))
        .route("/orders/checkout", post(orders::checkout))
        .route("/orders/my-orders", get(orders::my_orders))
        .route("/orders/{id}", get(orders::get_order))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Auth layer runs first, then the role guard
    let admin = Router::new()
        .route("/orders", get(orders::list_all_orders))
        .route("/orders/{id}/status", patch(orders::update_order_status))
        .route("/admin/stats", get(admin::get_stats))
        .layer(middleware::from_fn(require_admin))
        .layer(middleware::from_fn_with_state(state, auth_middleware));

    public.merge(authenticated).merge(admin)
}
