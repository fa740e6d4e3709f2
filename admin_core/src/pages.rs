//! Server-rendered admin pages

use crate::dashboard::{DashboardView, PendingRequestView, SuccessEntryView};
use crate::error::Result;
use askama::Template;
use axum::response::Html;

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginPage {
    pub username: String,
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomePage {
    pub pet_form_url: String,
    pub notice: Option<String>,
}

#[derive(Template)]
#[template(path = "requests.html")]
pub struct RequestsPage {
    pub pet_form_url: String,
    pub notice: Option<String>,
    pub notice_ok: bool,
    pub pending: Vec<PendingRequestView>,
    pub successful: Vec<SuccessEntryView>,
}

impl RequestsPage {
    pub fn new(pet_form_url: &str, view: DashboardView) -> Self {
        Self {
            pet_form_url: pet_form_url.to_string(),
            notice: None,
            notice_ok: true,
            pending: view.pending,
            successful: view.successful,
        }
    }

    pub fn with_notice(mut self, message: &str, ok: bool) -> Self {
        self.notice = Some(message.to_string());
        self.notice_ok = ok;
        self
    }
}

pub fn render<T: Template>(page: &T) -> Result<Html<String>> {
    Ok(Html(page.render()?))
}
