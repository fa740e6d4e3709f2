use admin_core::{
    config::{AdminConfig, NavigationConfig},
    create_app, AdminGate, AdoptionRequest, DashboardService, ImageUrlResolver, Pet, PetBackend,
    Result, SuccessEntry, AppState,
};
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use std::sync::Arc;
use tower::ServiceExt;

struct EmptyBackend;

#[async_trait]
impl PetBackend for EmptyBackend {
    async fn list_requests(&self) -> Result<Vec<AdoptionRequest>> {
        Ok(Vec::new())
    }

    async fn list_pets(&self, _ids: &[String]) -> Result<Vec<Pet>> {
        Ok(Vec::new())
    }

    async fn list_success_entries(&self) -> Result<Vec<SuccessEntry>> {
        Ok(Vec::new())
    }

    async fn send_notification(&self, _user_email: &str, _pet_name: Option<&str>) -> Result<()> {
        Ok(())
    }

    async fn commit_success(&self, _request_id: &str, _pet_id: &str) -> Result<()> {
        Ok(())
    }
}

fn setup_app() -> Router {
    let admin = AdminConfig {
        username: "admin".to_string(),
        password: "admin123".to_string(),
    };
    let images = ImageUrlResolver::new("http://backend.test", "/uploads", "");
    let dashboard = DashboardService::new(Arc::new(EmptyBackend), images);
    let state = AppState::new(AdminGate::from_config(&admin), dashboard, NavigationConfig::default());
    create_app(state)
}

fn login_request(username: &str, password: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/admin")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(format!("username={username}&password={password}")))
        .unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_login_form_is_served() {
    let request = Request::builder().uri("/admin").body(Body::empty()).unwrap();

    let response = setup_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("Admin Login"));
    assert!(html.contains("Login as Admin"));
}

#[tokio::test]
async fn test_wrong_password_is_rejected_without_navigation() {
    let response = setup_app().oneshot(login_request("admin", "wrong")).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get(header::LOCATION).is_none());
    assert!(body_text(response).await.contains("Invalid admin credentials"));
}

#[tokio::test]
async fn test_correct_credentials_navigate_home() {
    let response = setup_app().oneshot(login_request("admin", "admin123")).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/home?notice=login"
    );
}

#[tokio::test]
async fn test_home_acknowledges_login() {
    let request = Request::builder()
        .uri("/home?notice=login")
        .body(Body::empty())
        .unwrap();

    let response = setup_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("Admin login successful!"));
    assert!(html.contains("/admin/requests"));
}

#[tokio::test]
async fn test_home_ignores_unknown_notice() {
    let request = Request::builder()
        .uri("/home?notice=hacked")
        .body(Body::empty())
        .unwrap();

    let response = setup_app().oneshot(request).await.unwrap();
    let html = body_text(response).await;
    assert!(!html.contains("Admin login successful!"));
    assert!(!html.contains("hacked"));
}

#[tokio::test]
async fn test_logout_and_root_return_to_login() {
    for uri in ["/logout", "/"] {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = setup_app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/admin");
    }
}

#[tokio::test]
async fn test_health_reports_dashboard_attached() {
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();

    let response = setup_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["data"]["status"], "healthy");
    assert_eq!(json["data"]["dashboard_attached"], true);
}
