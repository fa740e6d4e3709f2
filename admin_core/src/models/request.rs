//! Request and response models

use serde::{Deserialize, Serialize};

use super::adoption::SendEmailCommand;

/// Form posted by the "Send Email" button on the dashboard. The request id
/// travels in the path.
#[derive(Debug, Serialize, Deserialize)]
pub struct SendEmailForm {
    pub email: String,
    pub pet_id: String,
    #[serde(default)]
    pub pet_name: String,
}

impl SendEmailForm {
    pub fn into_command(self, request_id: String) -> SendEmailCommand {
        let pet_name = Some(self.pet_name).filter(|name| !name.is_empty());
        SendEmailCommand {
            user_email: self.email,
            pet_name,
            pet_id: self.pet_id,
            request_id,
        }
    }
}

/// JSON body for marking a request successful through the API. The
/// request id travels in the path.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkSuccessPayload {
    pub user_email: String,
    #[serde(default)]
    pub pet_name: Option<String>,
    pub pet_id: String,
}

impl MarkSuccessPayload {
    pub fn into_command(self, request_id: String) -> SendEmailCommand {
        SendEmailCommand {
            user_email: self.user_email,
            pet_name: self.pet_name,
            pet_id: self.pet_id,
            request_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message),
        }
    }
}
