//! Admin gate: login form, home view and logout

use crate::{
    auth::{AdminCredentials, LoginDecision},
    error::Result,
    pages::{render, HomePage, LoginPage},
    AppState,
};
use axum::{
    extract::{Form, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

const LOGIN_NOTICE: &str = "login";

pub async fn handle_root() -> Redirect {
    Redirect::to("/admin")
}

pub async fn handle_login_page() -> Result<Response> {
    let page = LoginPage {
        username: String::new(),
        error: None,
    };
    Ok(render(&page)?.into_response())
}

pub async fn handle_login(
    State(state): State<AppState>,
    Form(credentials): Form<AdminCredentials>,
) -> Result<Response> {
    match state.gate.login(&credentials) {
        LoginDecision::Granted => {
            Ok(Redirect::to(&format!("/home?notice={LOGIN_NOTICE}")).into_response())
        }
        decision @ LoginDecision::Denied => {
            let page = LoginPage {
                username: credentials.username,
                error: Some(decision.message().to_string()),
            };
            Ok((StatusCode::UNAUTHORIZED, render(&page)?).into_response())
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct HomeQuery {
    notice: Option<String>,
}

pub async fn handle_home(
    State(state): State<AppState>,
    Query(query): Query<HomeQuery>,
) -> Result<Response> {
    let notice = query
        .notice
        .filter(|notice| notice == LOGIN_NOTICE)
        .map(|_| LoginDecision::Granted.message().to_string());

    let page = HomePage {
        pet_form_url: state.navigation.pet_form_url.clone(),
        notice,
    };
    Ok(render(&page)?.into_response())
}

pub async fn handle_logout() -> Redirect {
    Redirect::to("/admin")
}
