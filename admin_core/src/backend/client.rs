//! HTTP client for the pet backend that owns requests, pets and adoptions

use crate::config::BackendConfig;
use crate::error::{AppError, Result};
use crate::models::{AdoptionRequest, Pet, SuccessEntry};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// Remote operations the admin dashboard depends on.
#[async_trait]
pub trait PetBackend: Send + Sync {
    async fn list_requests(&self) -> Result<Vec<AdoptionRequest>>;
    /// Fetch pets for a set of ids in one call.
    async fn list_pets(&self, ids: &[String]) -> Result<Vec<Pet>>;
    async fn list_success_entries(&self) -> Result<Vec<SuccessEntry>>;
    async fn send_notification(&self, user_email: &str, pet_name: Option<&str>) -> Result<()>;
    /// Ask the backend to move the request/pet pair into the success collection.
    async fn commit_success(&self, request_id: &str, pet_id: &str) -> Result<()>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SendMailBody<'a> {
    user_email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pet_name: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MarkSuccessBody<'a> {
    request_id: &'a str,
    pet_id: &'a str,
}

#[derive(Clone)]
pub struct HttpPetBackend {
    client: Client,
    base_url: String,
}

impl HttpPetBackend {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| AppError::Backend(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self::with_client(client, &config.base_url))
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn fetch_json<T: DeserializeOwned>(&self, request: RequestBuilder, what: &str) -> Result<T> {
        let response = request
            .send()
            .await
            .map_err(|e| AppError::Backend(format!("Failed to fetch {what}: {e}")))?;

        if !response.status().is_success() {
            return Err(AppError::Backend(format!(
                "Backend returned {} for {what}",
                response.status()
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| AppError::Backend(format!("Failed to parse {what}: {e}")))
    }

    async fn post_ack<B: Serialize + Sync>(&self, path: &str, body: &B, what: &str) -> Result<()> {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::Backend(format!("Failed to {what}: {e}")))?;

        if !response.status().is_success() {
            return Err(AppError::Backend(format!(
                "Backend returned {} when trying to {what}",
                response.status()
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl PetBackend for HttpPetBackend {
    async fn list_requests(&self) -> Result<Vec<AdoptionRequest>> {
        let request = self.client.get(self.url("/getrequests"));
        self.fetch_json(request, "adoption requests").await
    }

    async fn list_pets(&self, ids: &[String]) -> Result<Vec<Pet>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        debug!("Fetching {} pets by id", ids.len());
        let request = self
            .client
            .get(self.url("/getpetlist"))
            .query(&[("ids", ids.join(","))]);
        self.fetch_json(request, "pet list").await
    }

    async fn list_success_entries(&self) -> Result<Vec<SuccessEntry>> {
        let request = self.client.get(self.url("/getSuccessEntries"));
        self.fetch_json(request, "success entries").await
    }

    async fn send_notification(&self, user_email: &str, pet_name: Option<&str>) -> Result<()> {
        let body = SendMailBody { user_email, pet_name };
        self.post_ack("/send-mail", &body, "send notification").await
    }

    async fn commit_success(&self, request_id: &str, pet_id: &str) -> Result<()> {
        let body = MarkSuccessBody { request_id, pet_id };
        self.post_ack("/mark-success", &body, "mark request successful").await
    }
}
