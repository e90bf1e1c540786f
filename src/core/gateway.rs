//! HTTP gateway to the MedBot service.
//!
//! Information Hiding:
//! - Wire request/response shapes hidden from callers
//! - Transport and status failures normalized into `RequestError`
//! - No state retained between calls

use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::core::error::RequestError;

/// Media type the service accepts for document ingestion.
pub const PDF_MEDIA_TYPE: &str = "application/pdf";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
    session_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    response: String,
}

#[derive(Debug, Serialize)]
struct SessionRequest<'a> {
    session_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct DocumentList {
    documents: Vec<String>,
}

/// Health report from `GET {base}/health`.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub message: String,
}

/// Stateless caller for the service endpoints. One request per call, no
/// retry and no backoff; a failed call is reported once and left to the
/// caller's policy.
pub struct RequestGateway {
    client: Client,
    base_url: String,
    session_id: String,
}

impl RequestGateway {
    pub fn new(settings: &Settings) -> Self {
        Self {
            client: Client::new(),
            base_url: settings.service.base_url.clone(),
            session_id: settings.service.session_id.clone(),
        }
    }

    /// Submit one chat turn and return the service's reply text.
    pub async fn send_chat(&self, message: &str) -> Result<String, RequestError> {
        let request = ChatRequest {
            message,
            session_id: &self.session_id,
        };

        let response = self
            .client
            .post(format!("{}/chat", self.base_url))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(
                "[RequestGateway] Chat request failed with status {}: {}",
                status,
                body
            );
            return Err(RequestError::Server(status));
        }

        let reply = response.json::<ChatReply>().await?;
        Ok(reply.response)
    }

    /// Upload one document. Success is any 2xx status; the response body
    /// carries ingest details this client does not depend on.
    pub async fn upload_document(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<(), RequestError> {
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(PDF_MEDIA_TYPE)?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(format!("{}/upload", self.base_url))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(
                "[RequestGateway] Upload of '{}' failed with status {}: {}",
                file_name,
                status,
                body
            );
            return Err(RequestError::Server(status));
        }

        Ok(())
    }

    /// Ask the service whether it is up.
    pub async fn health(&self) -> Result<HealthStatus, RequestError> {
        let response = self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RequestError::Server(status));
        }

        Ok(response.json::<HealthStatus>().await?)
    }

    /// List the documents the service has ingested so far.
    pub async fn list_documents(&self) -> Result<Vec<String>, RequestError> {
        let response = self
            .client
            .get(format!("{}/documents", self.base_url))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RequestError::Server(status));
        }

        let list = response.json::<DocumentList>().await?;
        Ok(list.documents)
    }

    /// Drop the remote context for this session.
    pub async fn clear_session(&self) -> Result<(), RequestError> {
        let request = SessionRequest {
            session_id: &self.session_id,
        };

        let response = self
            .client
            .post(format!("{}/clear_session", self.base_url))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RequestError::Server(status));
        }

        Ok(())
    }
}
