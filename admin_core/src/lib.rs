//! Admin console for the FourPaws pet-adoption platform: a credential gate
//! and a dashboard over the adoption requests held by the pet backend.

pub mod auth;
pub mod backend;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod pages;

pub use auth::{AdminAuthenticator, AdminCredentials, AdminGate, LoginDecision, StaticCredentialGate};
pub use backend::{HttpPetBackend, PetBackend};
pub use crate::config::AppConfig;
pub use dashboard::{DashboardService, DashboardState, DashboardView, ImageUrlResolver};
pub use error::{AppError, Result};
pub use handlers::routes::create_routes;
pub use models::{ActionOutcome, AdoptionRequest, Pet, SendEmailCommand, SuccessEntry};

use axum::Router;
use crate::config::NavigationConfig;
use std::{future::IntoFuture, net::SocketAddr, sync::Arc, time::Duration};
use tokio::{signal, sync::Notify};
use tower_http::timeout::TimeoutLayer;
use tracing::{info, warn};

#[derive(Clone)]
pub struct AppState {
    pub app_name: String,
    pub version: String,
    pub gate: AdminGate,
    pub dashboard: DashboardService,
    pub navigation: NavigationConfig,
}

impl AppState {
    pub fn new(gate: AdminGate, dashboard: DashboardService, navigation: NavigationConfig) -> Self {
        Self {
            app_name: "FourPaws Admin".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            gate,
            dashboard,
            navigation,
        }
    }

    /// Wires the HTTP pet backend and the configured admin credentials.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let backend = HttpPetBackend::new(&config.backend)?;
        let images = ImageUrlResolver::from_config(&config.backend);
        let dashboard = DashboardService::new(Arc::new(backend), images);
        let gate = AdminGate::from_config(&config.admin);

        Ok(Self::new(gate, dashboard, config.navigation.clone()))
    }
}

pub fn create_app(state: AppState) -> Router {
    create_app_with_config(state, &AppConfig::default())
}

pub fn create_app_with_config(state: AppState, config: &AppConfig) -> Router {
    let mut router = Router::new().merge(create_routes());

    router = router.layer(middleware::cors::cors_layer_from_config(&config.cors));

    router = router.layer(TimeoutLayer::new(Duration::from_secs(
        config.server.request_timeout_seconds,
    )));

    if config.logging.log_requests {
        router = middleware::logging::with_request_tracing(router);
    }

    router.with_state(state)
}

/// Serves until Ctrl+C or SIGTERM, then detaches the dashboard so late
/// backend responses are dropped. In-flight requests get `drain_timeout`
/// to finish once the signal arrives.
pub async fn run_server(
    app: Router,
    addr: SocketAddr,
    dashboard: DashboardService,
    drain_timeout: Duration,
) -> Result<()> {
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    let signalled = Arc::new(Notify::new());
    let notifier = signalled.clone();
    let serve = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            notifier.notify_one();
        })
        .into_future();
    tokio::pin!(serve);

    tokio::select! {
        result = &mut serve => result?,
        _ = async {
            signalled.notified().await;
            tokio::time::sleep(drain_timeout).await;
        } => {
            warn!("In-flight requests still running after {:?}, shutting down anyway", drain_timeout);
        }
    }

    dashboard.detach();

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
