/// HTTP client for the PixShare backend
///
/// A thin wrapper over reqwest. Authenticated endpoints take the bearer
/// token as an explicit parameter, so the caller always knows which
/// credential a request carries.

use reqwest::multipart;

use super::error::{ApiError, ErrorBody};
use super::models::{
    AuthResponse, AuthToken, ImageRecord, LoginRequest, RegisterRequest, UploadRequest,
};

/// Server used when PIXSHARE_SERVER_URL is not set
const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000";

/// Client for all backend calls.
/// Cloning is cheap (reqwest clients share their connection pool), so a
/// clone can move into every background task.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client against the given server.
    /// If this fails, we panic because the app cannot make a single
    /// request without an HTTP client.
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .user_agent(concat!("PixShare/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to build HTTP client");

        let base_url = base_url.into().trim_end_matches('/').to_string();

        ApiClient { http, base_url }
    }

    /// Create a client from the PIXSHARE_SERVER_URL environment variable
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("PIXSHARE_SERVER_URL").unwrap_or_else(|_| DEFAULT_SERVER_URL.to_string());
        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    /// Exchange credentials for a token and user identity
    pub async fn login(&self, username: String, password: String) -> Result<AuthResponse, ApiError> {
        let response = self
            .http
            .post(self.url("/login"))
            .json(&LoginRequest { username, password })
            .send()
            .await
            .map_err(ApiError::network)?;

        Self::parse_json(response).await
    }

    /// Create an account. A successful registration logs the caller in,
    /// same response shape as login.
    pub async fn register(
        &self,
        username: String,
        email: String,
        password: String,
    ) -> Result<AuthResponse, ApiError> {
        let response = self
            .http
            .post(self.url("/register"))
            .json(&RegisterRequest {
                username,
                email,
                password,
            })
            .send()
            .await
            .map_err(ApiError::network)?;

        Self::parse_json(response).await
    }

    /// Fetch the caller's images for one visibility scope
    pub async fn list_images(
        &self,
        auth: &AuthToken,
        private: bool,
    ) -> Result<Vec<ImageRecord>, ApiError> {
        let response = self
            .http
            .get(self.url("/images"))
            .query(&[("private", private)])
            .bearer_auth(auth.secret())
            .send()
            .await
            .map_err(ApiError::network)?;

        Self::parse_json(response).await
    }

    /// Push one image as a multipart form (file, caption, is_private)
    pub async fn upload_image(
        &self,
        auth: &AuthToken,
        upload: UploadRequest,
    ) -> Result<ImageRecord, ApiError> {
        let part = multipart::Part::bytes(upload.bytes)
            .file_name(upload.filename)
            .mime_str(&upload.content_type)
            .map_err(|e| ApiError::Unexpected(e.to_string()))?;

        let form = multipart::Form::new()
            .part("file", part)
            .text("caption", upload.caption)
            .text("is_private", if upload.is_private { "true" } else { "false" });

        let response = self
            .http
            .post(self.url("/images/upload"))
            .bearer_auth(auth.secret())
            .multipart(form)
            .send()
            .await
            .map_err(ApiError::network)?;

        Self::parse_json(response).await
    }

    /// Delete one image by id
    pub async fn delete_image(&self, auth: &AuthToken, id: &str) -> Result<(), ApiError> {
        let response = self
            .http
            .delete(self.url(&format!("/images/{id}")))
            .bearer_auth(auth.secret())
            .send()
            .await
            .map_err(ApiError::network)?;

        Self::check(response).await.map(|_| ())
    }

    /// Turn a non-success status into a Rejected error carrying the
    /// server's detail text when there is one
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let detail = response
            .json::<ErrorBody>()
            .await
            .map(|body| body.detail)
            .unwrap_or_default();

        Err(ApiError::Rejected {
            status: status.as_u16(),
            detail,
        })
    }

    async fn parse_json<T>(response: reqwest::Response) -> Result<T, ApiError>
    where
        T: serde::de::DeserializeOwned,
    {
        Self::check(response)
            .await?
            .json::<T>()
            .await
            .map_err(ApiError::unexpected)
    }
}
