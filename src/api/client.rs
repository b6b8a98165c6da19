use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::models::{AuthPayload, LoginRequest, Material, RegisterRequest, UploadFile};
use super::response::{error_message, ApiResponse, Page};

/// HTTP client for the Classroom Buddy backend.
///
/// Stateless with respect to the session: callers pass the token explicitly.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let client = Client::builder().build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn login_url(&self) -> String {
        self.url("/api/auth/login")
    }

    fn register_url(&self) -> String {
        self.url("/api/auth/register")
    }

    fn subject_materials_url(&self, subject_id: &str) -> String {
        self.url(&format!(
            "/api/material/{}",
            urlencoding::encode(subject_id)
        ))
    }

    fn my_materials_url(&self) -> String {
        self.url("/api/material/me")
    }

    fn upload_url(&self) -> String {
        self.url("/api/material/upload")
    }

    // ========================================================================
    // Auth
    // ========================================================================

    /// Exchange credentials for a session token.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, ApiError> {
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        tracing::debug!(username = %username, "Logging in");
        let payload: AuthPayload = self
            .send(self.client.post(self.login_url()).json(&body), "login")
            .await?;

        if payload.token.trim().is_empty() {
            return Err(ApiError::Decode("login: response token is empty".to_string()));
        }

        Ok(payload.token)
    }

    /// Create an account. Returns the server's confirmation message, if any.
    pub async fn register(&self, request: &RegisterRequest) -> Result<Option<String>, ApiError> {
        tracing::debug!(username = %request.username, role = ?request.role, "Registering");
        let body = self
            .execute(self.client.post(self.register_url()).json(request))
            .await?;

        // The payload is not used; a body without an envelope still counts as success.
        let message = serde_json::from_slice::<ApiResponse<serde_json::Value>>(&body)
            .ok()
            .and_then(|envelope| envelope.message);

        Ok(message)
    }

    // ========================================================================
    // Materials
    // ========================================================================

    /// List one page of materials for a subject.
    pub async fn list_materials_by_subject(
        &self,
        token: Option<&str>,
        subject_id: &str,
        size: u32,
    ) -> Result<Page<Material>, ApiError> {
        tracing::debug!(subject = %subject_id, size, "Listing materials by subject");
        let request = self
            .client
            .get(self.subject_materials_url(subject_id))
            .query(&[("size", size)]);

        self.send(authorize(request, token), "list materials by subject")
            .await
    }

    /// List one page of the materials owned by the token's user.
    pub async fn materials_for_current_user(
        &self,
        token: &str,
        size: u32,
    ) -> Result<Page<Material>, ApiError> {
        tracing::debug!(size, "Listing materials for current user");
        let request = self
            .client
            .get(self.my_materials_url())
            .query(&[("size", size)]);

        self.send(authorize(request, Some(token)), "list my materials")
            .await
    }

    /// Upload a file under a subject. Returns the created material's id.
    pub async fn upload_material(
        &self,
        token: &str,
        subject_id: &str,
        file: UploadFile,
    ) -> Result<i64, ApiError> {
        tracing::debug!(
            subject = %subject_id,
            file_name = %file.file_name,
            byte_size = file.byte_size(),
            "Uploading material"
        );

        let part = Part::bytes(file.data.to_vec())
            .file_name(file.file_name)
            .mime_str(&file.mime_type)?;
        let form = Form::new()
            .text("subject", subject_id.to_string())
            .part("file", part);

        let request = self.client.post(self.upload_url()).multipart(form);
        self.send(authorize(request, Some(token)), "upload material")
            .await
    }

    /// Fetch the file behind a material URL. CDN URLs need no token.
    pub async fn download(&self, url: &str) -> Result<bytes::Bytes, ApiError> {
        tracing::debug!(url = %url, "Downloading material");
        self.execute(self.client.get(url)).await
    }

    // ========================================================================
    // Transport
    // ========================================================================

    /// Send a request and decode the envelope's payload.
    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        endpoint: &str,
    ) -> Result<T, ApiError> {
        let body = self.execute(request).await?;
        ApiResponse::decode_data(&body, endpoint)
    }

    /// Send a request and return the raw body of a success response.
    async fn execute(&self, request: RequestBuilder) -> Result<bytes::Bytes, ApiError> {
        let resp = request.send().await.map_err(ApiError::from)?;

        let status = resp.status();
        let body = resp
            .bytes()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !status.is_success() {
            let message = error_message(&body);
            tracing::debug!(status = status.as_u16(), message = ?message, "Request failed");
            return Err(ApiError::Http { status, message });
        }

        Ok(body)
    }
}

fn authorize(request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token {
        Some(token) => request.bearer_auth(token),
        None => request,
    }
}
