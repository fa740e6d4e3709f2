use crate::auth::models::{AdminCredentials, LoginDecision};
use crate::config::AdminConfig;
use std::sync::Arc;
use tracing::{info, warn};

/// Decides whether submitted credentials open the admin console.
pub trait AdminAuthenticator: Send + Sync {
    fn verify(&self, credentials: &AdminCredentials) -> bool;
}

/// Compares against one configured username/password pair by exact string
/// equality. No lockout, throttling or session is kept between attempts.
#[derive(Clone)]
pub struct StaticCredentialGate {
    username: String,
    password: String,
}

impl StaticCredentialGate {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn from_config(config: &AdminConfig) -> Self {
        Self::new(config.username.clone(), config.password.clone())
    }
}

impl AdminAuthenticator for StaticCredentialGate {
    fn verify(&self, credentials: &AdminCredentials) -> bool {
        credentials.username == self.username && credentials.password == self.password
    }
}

#[derive(Clone)]
pub struct AdminGate {
    authenticator: Arc<dyn AdminAuthenticator>,
}

impl AdminGate {
    pub fn new(authenticator: Arc<dyn AdminAuthenticator>) -> Self {
        Self { authenticator }
    }

    pub fn from_config(config: &AdminConfig) -> Self {
        Self::new(Arc::new(StaticCredentialGate::from_config(config)))
    }

    pub fn login(&self, credentials: &AdminCredentials) -> LoginDecision {
        if self.authenticator.verify(credentials) {
            info!(username = %credentials.username, "Admin login accepted");
            LoginDecision::Granted
        } else {
            warn!(username = %credentials.username, "Admin login rejected");
            LoginDecision::Denied
        }
    }
}
