//! Uploaded file records and the files service trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileItem {
    pub filename: String,
    pub url: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub uploaded_at: Option<DateTime<Utc>>,
}

/// File contents to upload as a multipart `file` field.
#[derive(Debug, Clone, PartialEq)]
pub struct FileUpload {
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[async_trait]
pub trait FileService: Send + Sync {
    async fn upload(&self, file: FileUpload) -> Result<FileItem>;

    async fn list(&self) -> Result<Vec<FileItem>>;

    /// Deletes a file. A 404 surfaces as `HubError::NotFound { entity_type: "File", .. }`.
    async fn delete(&self, filename: &str) -> Result<()>;
}
