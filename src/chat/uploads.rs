//! Sequential document upload into the conversation context.
//!
//! Information Hiding:
//! - Eligibility filtering internalized
//! - File reading and per-file failure handling hidden from callers
//! - Registry mutated only through successful uploads

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::core::gateway::{RequestGateway, PDF_MEDIA_TYPE};

/// A file the user offered for upload, before eligibility filtering.
#[derive(Debug, Clone)]
pub struct UploadCandidate {
    path: PathBuf,
    media_type: Option<String>,
}

impl UploadCandidate {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            media_type: None,
        }
    }

    /// Attach a declared media type, for callers that know one. The CLI
    /// never does; paths carry only names.
    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.to_string_lossy().into_owned())
    }

    /// Eligible when the declared media type is PDF or the name carries
    /// the literal `.pdf` extension.
    fn is_pdf_document(&self) -> bool {
        self.media_type.as_deref() == Some(PDF_MEDIA_TYPE) || self.file_name().ends_with(".pdf")
    }
}

/// A document the service acknowledged. Registry entries are append-only
/// for the lifetime of the process.
#[derive(Debug, Clone, Serialize)]
pub struct UploadedDocument {
    pub name: String,
    pub size_bytes: u64,
}

/// Per-file result of a batch, for progress display.
#[derive(Debug, Clone)]
pub struct UploadOutcome {
    pub name: String,
    pub uploaded: bool,
}

/// Feeds eligible documents to the gateway one at a time and keeps the
/// registry of successful uploads.
///
/// A failed file is skipped with a log line and the batch carries on; the
/// user sees the failure only as an omission from the registry.
#[derive(Debug, Default)]
pub struct UploadCoordinator {
    registry: Vec<UploadedDocument>,
    uploading: bool,
}

impl UploadCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upload a batch. Non-PDF candidates never reach the network; each
    /// accepted file is awaited before the next starts, so at most one
    /// upload is ever in flight.
    pub async fn submit(
        &mut self,
        gateway: &RequestGateway,
        candidates: Vec<UploadCandidate>,
    ) -> Vec<UploadOutcome> {
        let total = candidates.len();
        let accepted: Vec<UploadCandidate> = candidates
            .into_iter()
            .filter(|candidate| candidate.is_pdf_document())
            .collect();

        if accepted.len() < total {
            tracing::debug!(
                "[UploadCoordinator] Skipped {} non-PDF file(s)",
                total - accepted.len()
            );
        }

        self.uploading = true;
        let mut outcomes = Vec::with_capacity(accepted.len());

        for candidate in &accepted {
            let name = candidate.file_name();
            let uploaded = self.upload_one(gateway, &name, &candidate.path).await;
            outcomes.push(UploadOutcome { name, uploaded });
        }

        self.uploading = false;
        outcomes
    }

    async fn upload_one(&mut self, gateway: &RequestGateway, name: &str, path: &Path) -> bool {
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(error) => {
                tracing::warn!("[UploadCoordinator] Could not read '{}': {}", name, error);
                return false;
            }
        };

        let size_bytes = bytes.len() as u64;
        match gateway.upload_document(name, bytes).await {
            Ok(()) => {
                self.registry.push(UploadedDocument {
                    name: name.to_string(),
                    size_bytes,
                });
                tracing::info!(
                    "[UploadCoordinator] Uploaded '{}' ({} bytes)",
                    name,
                    size_bytes
                );
                true
            }
            Err(error) => {
                tracing::warn!("[UploadCoordinator] Upload of '{}' failed: {}", name, error);
                false
            }
        }
    }

    /// Read-only view of the documents the service has accepted so far.
    pub fn documents(&self) -> &[UploadedDocument] {
        &self.registry
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading
    }
}
