use serde::Deserialize;

/// Username and password submitted on the admin login form.
#[derive(Clone, Deserialize)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

impl AdminCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginDecision {
    Granted,
    Denied,
}

impl LoginDecision {
    pub fn message(self) -> &'static str {
        match self {
            LoginDecision::Granted => "Admin login successful!",
            LoginDecision::Denied => "Invalid admin credentials",
        }
    }
}
