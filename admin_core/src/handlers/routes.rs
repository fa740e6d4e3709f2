//! Route table of the admin console

use crate::{
    handlers::{admin, dashboard, health},
    AppState,
};
use axum::{
    routing::{get, post},
    Router,
};

pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(admin::handle_root))
        .route("/health", get(health::handle_health))
        .route("/admin", get(admin::handle_login_page).post(admin::handle_login))
        .route("/home", get(admin::handle_home))
        .route("/logout", get(admin::handle_logout))
        .route("/admin/requests", get(dashboard::handle_requests_page))
        .route(
            "/admin/requests/:request_id/send-email",
            post(dashboard::handle_send_email),
        )
        .route("/api/admin/dashboard", get(dashboard::handle_api_dashboard))
        .route(
            "/api/admin/requests/:request_id/success",
            post(dashboard::handle_api_mark_success),
        )
}
