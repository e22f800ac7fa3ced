//! Rutas de la API
//!
//! Cada recurso expone su router público y, si corresponde, uno de
//! administración. Aquí se ensamblan bajo `/api` con sus middlewares.

pub mod catalog_routes;
pub mod checkout_routes;
pub mod customer_routes;
pub mod order_routes;
pub mod portal_routes;
pub mod pricing_routes;
pub mod project_routes;
pub mod quote_routes;
pub mod revision_routes;
pub mod vehicle_routes;

use axum::{middleware::from_fn, middleware::from_fn_with_state, Router};

use crate::middleware::{admin_only_middleware, auth_middleware, rate_limit_middleware};
use crate::state::AppState;

/// Router completo de `/api`
pub fn create_api_router(state: &AppState) -> Router<AppState> {
    let rate_limited = || from_fn_with_state(state.clone(), rate_limit_middleware);
    let authenticated = || from_fn_with_state(state.clone(), auth_middleware);

    // Formularios públicos que escriben en la base
    let submissions = Router::new()
        .nest("/quotes", quote_routes::create_quote_router())
        .nest("/customers", customer_routes::create_customer_router())
        .nest("/checkout", checkout_routes::create_checkout_router())
        .route_layer(rate_limited());

    // Cliente autenticado
    let customer = Router::new()
        .nest(
            "/revisions",
            revision_routes::create_revision_router().route_layer(rate_limited()),
        )
        .nest("/portal", portal_routes::create_portal_router())
        .route_layer(authenticated());

    // Administración: autenticación y después lista de administradores
    let admin = Router::new()
        .nest("/quotes", quote_routes::create_admin_quote_router())
        .nest("/customers", customer_routes::create_admin_customer_router())
        .nest("/orders", order_routes::create_admin_order_router())
        .nest("/projects", project_routes::create_admin_project_router())
        .nest("/revisions", revision_routes::create_admin_revision_router())
        .nest("/vehicles", vehicle_routes::create_admin_vehicle_router(state.config.max_upload_bytes))
        .merge(catalog_routes::create_admin_catalog_router())
        .route_layer(from_fn(admin_only_middleware))
        .route_layer(authenticated());

    Router::new()
        .nest("/pricing", pricing_routes::create_pricing_router())
        .nest("/vehicles", vehicle_routes::create_vehicle_router())
        .nest("/webhooks", checkout_routes::create_webhook_router())
        .merge(catalog_routes::create_catalog_router())
        .merge(submissions)
        .merge(customer)
        .nest("/admin", admin)
}
