//! Admin request dashboard pages and JSON endpoints

use crate::{
    error::Result,
    models::{ApiResponse, MarkSuccessPayload, SendEmailForm},
    pages::{render, RequestsPage},
    AppState,
};
use axum::{
    extract::{Form, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::info;

pub async fn handle_requests_page(State(state): State<AppState>) -> Result<Response> {
    info!("GET /admin/requests - loading dashboard");

    state.dashboard.load().await;

    let page = RequestsPage::new(&state.navigation.pet_form_url, state.dashboard.view());
    Ok(render(&page)?.into_response())
}

/// Runs the action and renders the page from the resulting local state.
pub async fn handle_send_email(
    State(state): State<AppState>,
    Path(request_id): Path<String>,
    Form(form): Form<SendEmailForm>,
) -> Result<Response> {
    info!("POST /admin/requests/{}/send-email", request_id);

    let command = form.into_command(request_id);
    let outcome = state.dashboard.send_email_and_mark_success(&command).await;

    let page = RequestsPage::new(&state.navigation.pet_form_url, state.dashboard.view())
        .with_notice(outcome.acknowledgment(), outcome.is_success());
    Ok(render(&page)?.into_response())
}

pub async fn handle_api_dashboard(State(state): State<AppState>) -> impl IntoResponse {
    state.dashboard.load().await;
    Json(ApiResponse::success(state.dashboard.view()))
}

pub async fn handle_api_mark_success(
    State(state): State<AppState>,
    Path(request_id): Path<String>,
    Json(payload): Json<MarkSuccessPayload>,
) -> impl IntoResponse {
    info!("POST /api/admin/requests/{}/success", request_id);

    let command = payload.into_command(request_id);
    let outcome = state.dashboard.send_email_and_mark_success(&command).await;
    let body = json!({ "outcome": outcome });

    if outcome.is_success() {
        (StatusCode::OK, Json(ApiResponse::success(body)))
    } else {
        let mut response = ApiResponse::error(outcome.acknowledgment().to_string());
        response.data = Some(body);
        (StatusCode::BAD_GATEWAY, Json(response))
    }
}
