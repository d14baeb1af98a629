use crate::content_graph::domain::{ContentItem, UploadResponse};
use crate::content_graph::services::UploadOptions;
use crate::ports::outbound::{ClientError, UploadClient};
use crate::shared::error::PackError;
use crate::shared::Result;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use std::path::Path;
use std::time::Duration;

/// Endpoint accepting zipped packs
const BUNDLE_UPLOAD_ENDPOINT: &str = "/contentpacks/installed/upload";

/// Header carrying the API key id for advanced keys
const AUTH_ID_HEADER: &str = "x-xdr-auth-id";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Connection settings for [`PlatformUploadClient`]
#[derive(Debug, Clone)]
pub struct PlatformSettings {
    pub base_url: String,
    pub api_key: String,
    pub auth_id: Option<String>,
    pub timeout: Duration,
}

impl PlatformSettings {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            auth_id: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_auth_id(mut self, auth_id: Option<String>) -> Self {
        self.auth_id = auth_id;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// PlatformUploadClient adapter for the platform's content upload API
///
/// Files are sent as a multipart `file` field. A 2xx status is a success,
/// a 4xx status comes back as an [`UploadResponse`] for the caller to
/// interpret, and a 5xx status is a [`ClientError::Api`].
pub struct PlatformUploadClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    auth_id: Option<String>,
}

impl std::fmt::Debug for PlatformUploadClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlatformUploadClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("auth_id", &self.auth_id)
            .finish()
    }
}

impl PlatformUploadClient {
    /// Creates a client for `settings`
    ///
    /// # Errors
    /// Returns an error if the base URL is not http(s), the API key is empty,
    /// or the HTTP client cannot be built
    pub fn new(settings: PlatformSettings) -> Result<Self> {
        let base_url = settings.base_url.trim_end_matches('/').to_string();
        if !(base_url.starts_with("https://") || base_url.starts_with("http://")) {
            return Err(PackError::Validation {
                message: format!("Platform URL must start with http:// or https://: {}", base_url),
            }
            .into());
        }
        if settings.api_key.trim().is_empty() {
            return Err(PackError::Validation {
                message: "Platform API key is empty".to_string(),
            }
            .into());
        }

        let version = env!("CARGO_PKG_VERSION");
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .user_agent(format!("packwright/{}", version))
            .build()?;

        Ok(Self {
            client,
            base_url,
            api_key: settings.api_key,
            auth_id: settings.auth_id,
        })
    }

    fn url(&self, endpoint: &str, options: &UploadOptions) -> String {
        format!(
            "{}{}?skipValidation={}&skipVerify={}",
            self.base_url, endpoint, options.skip_validation, options.skip_verify
        )
    }

    fn file_part(file: &Path) -> std::result::Result<Part, ClientError> {
        let bytes = std::fs::read(file).map_err(|e| {
            ClientError::Transport(format!("Failed to read {}: {}", file.display(), e))
        })?;
        let file_name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Part::bytes(bytes).file_name(file_name))
    }

    async fn post_file(
        &self,
        url: String,
        file: &Path,
    ) -> std::result::Result<Option<UploadResponse>, ClientError> {
        let form = Form::new().part("file", Self::file_part(file)?);
        let mut request = self
            .client
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, &self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .multipart(form);
        if let Some(auth_id) = &self.auth_id {
            request = request.header(AUTH_ID_HEADER, auth_id);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        tracing::debug!(url = %url, status = status.as_u16(), "Platform responded");

        if status.is_success() {
            return Ok(None);
        }
        if status.is_server_error() {
            return Err(ClientError::Api {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
                body,
            });
        }
        Ok(Some(UploadResponse {
            status: status.as_u16(),
            body: serde_json::from_str(&body).unwrap_or(Value::String(body)),
        }))
    }
}

#[async_trait]
impl UploadClient for PlatformUploadClient {
    async fn upload_bundle(
        &self,
        archive: &Path,
        options: &UploadOptions,
    ) -> std::result::Result<Option<UploadResponse>, ClientError> {
        self.post_file(self.url(BUNDLE_UPLOAD_ENDPOINT, options), archive)
            .await
    }

    async fn upload_item(
        &self,
        item: &ContentItem,
        file: &Path,
        options: &UploadOptions,
    ) -> std::result::Result<Option<UploadResponse>, ClientError> {
        let endpoint = item
            .content_type()
            .capabilities()
            .upload_endpoint
            .ok_or_else(|| {
                ClientError::Transport(format!("{} has no upload endpoint", item.content_type()))
            })?;
        self.post_file(self.url(endpoint, options), file).await
    }
}
