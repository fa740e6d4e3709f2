//! Adoption domain records as the pet backend serves them

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A pending adoption request, created by the public intake flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdoptionRequest {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "petId")]
    pub pet_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    /// Legacy filesystem path, relative path, bare file name or full URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// A completed adoption, persisted by the backend when a request is
/// marked successful.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessEntry {
    #[serde(rename = "_id")]
    pub id: String,
    pub request: AdoptionRequest,
    #[serde(default)]
    pub pet: Option<Pet>,
    #[serde(rename = "successDate")]
    pub success_date: DateTime<Utc>,
}

/// Admin action: email the applicant, then move the request into the
/// success collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailCommand {
    pub user_email: String,
    #[serde(default)]
    pub pet_name: Option<String>,
    pub pet_id: String,
    pub request_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionOutcome {
    Succeeded,
    Failed,
}

impl ActionOutcome {
    pub fn is_success(self) -> bool {
        matches!(self, ActionOutcome::Succeeded)
    }

    /// Acknowledgment shown to the admin once the action settles.
    pub fn acknowledgment(self) -> &'static str {
        match self {
            ActionOutcome::Succeeded => {
                "Email sent successfully, and request moved to success collection"
            }
            ActionOutcome::Failed => "Error processing request",
        }
    }
}
