//! HTTP implementation of `FileService`.

use async_trait::async_trait;
use guildhall_core::HubError;
use guildhall_core::error::Result;
use guildhall_core::files::{FileItem, FileService, FileUpload};
use reqwest::Method;
use reqwest::multipart::{Form, Part};

use crate::http::ApiClient;
use crate::http::error::not_found_as;

pub const UPLOAD_PATH: &str = "/api/v1/files/upload";
pub const LIST_PATH: &str = "/api/v1/files/";

#[derive(Debug, Clone)]
pub struct HttpFileService {
    api: ApiClient,
}

impl HttpFileService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

fn upload_form(file: FileUpload) -> Result<Form> {
    let mut part = Part::bytes(file.bytes).file_name(file.filename);
    if let Some(content_type) = file.content_type.as_deref() {
        part = part.mime_str(content_type).map_err(|e| {
            HubError::internal(format!("Invalid content type '{}': {}", content_type, e))
        })?;
    }
    Ok(Form::new().part("file", part))
}

#[async_trait]
impl FileService for HttpFileService {
    async fn upload(&self, file: FileUpload) -> Result<FileItem> {
        tracing::debug!("[Files] Uploading {} ({} bytes)", file.filename, file.bytes.len());
        let form = upload_form(file)?;
        self.api
            .send_json(self.api.post(UPLOAD_PATH).multipart(form))
            .await
    }

    async fn list(&self) -> Result<Vec<FileItem>> {
        self.api.send_json(self.api.get(LIST_PATH)).await
    }

    async fn delete(&self, filename: &str) -> Result<()> {
        let url = self
            .api
            .url_with_segments(&["api", "v1", "files", filename])?;
        self.api
            .send_empty(self.api.request_url(Method::DELETE, url))
            .await
            .map_err(|e| not_found_as(e, "File", filename))
    }
}
